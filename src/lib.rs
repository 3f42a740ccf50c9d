//! Weekly course timetabling.
//!
//! Courses for several degree programs are placed on a Monday to Friday grid of
//! twelve one-hour slots by four greedy passes: remote courses, courses shared
//! between paired programs, single-program courses, and finally classroom
//! allocation. Demand that cannot be placed is dropped with a warning and
//! reported as a [`data::Shortfall`].

pub mod availability;
pub mod catalog;
pub mod checkpoint;
pub mod config;
pub mod data;
pub mod error;
pub mod grid;
pub mod interchange;
pub mod server;
pub mod slots;
pub mod solver;

pub use error::{Error, Result};
