//! Derived views computed from task lists.
//!
//! Every function here is pure: it reads a slice of tasks plus an explicit
//! `now` where time matters, and returns owned results.

pub mod board;
pub mod dashboard;
pub mod filter;
pub mod summary;
