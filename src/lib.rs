//! Commission payroll engine for Icelandic telemarketing agents.
//!
//! Computes a pay statement for one agent over one 26th-to-25th pay period:
//! hourly earnings, a sales bonus above an hours-based threshold, vacation
//! pay, pension and union deductions, and progressive income tax with a
//! personal allowance credit. Every step is recorded in an audit trace.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
