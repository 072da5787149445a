//! Middleware module

pub mod rate_limit;
