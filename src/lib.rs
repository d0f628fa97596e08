//! Day-rate (TJM) calculator and French working-days calendar.
//!
//! This crate derives the day rates a freelancer needs to charge from their
//! monthly expenses, tax rates and working-time allocation, using a working-day
//! count that accounts for French public holidays.

#![warn(missing_docs)]

pub mod api;
pub mod cache;
pub mod calculation;
pub mod calendar;
pub mod config;
pub mod error;
pub mod models;
