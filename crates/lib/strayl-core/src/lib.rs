//! Core types and services for strayl-mcp.
//!
//! This crate owns the backend API client for the Strayl search service,
//! the time-period token resolver, the result formatters, and the control
//! plane that turns one tool request into one backend call plus a rendered
//! text response.

pub mod client;
pub mod control;
pub mod error;
pub mod format;
pub mod models;
pub mod time_period;
