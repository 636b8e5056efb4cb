//! ACA Employer Shared Responsibility Engine
//!
//! This crate estimates IRC §4980H employer penalties, tests employee
//! offers against the IRS affordability safe harbors, and determines
//! full-time and Applicable Large Employer status, with every calculation
//! recorded in an audit trace.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
