//! Per-school aggregation and ranking.
//!
//! This module turns the yearly results of each school into averages and
//! least-squares trend predictions, flattens them into report rows and
//! ranks the rows by a chosen column.

pub mod aggregate;
pub mod analyzer;
pub mod ranking;
pub mod types;
pub mod utility;
