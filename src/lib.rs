//! abf: an anti-bruteforce filter guarding an authentication endpoint.
//!
//! The core decision engine lives in [`bucket`], [`limiter`],
//! [`multi_limiter`], [`acl`], and [`decision`]. Everything else in this
//! crate (configuration, HTTP transport, logging, the binary entrypoint) is
//! a thin shell around that core.

pub mod acl;
pub mod bucket;
pub mod config;
pub mod decision;
pub mod error;
pub mod http;
pub mod limiter;
pub mod logging;
pub mod multi_limiter;
