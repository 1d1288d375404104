//! Client for the remote record gateway that stores Nanny applications.
//!
//! Every call returns a [`GatewayResponse`] envelope carrying the HTTP status
//! and, for successful calls, the decoded record. Interpreting non-200
//! statuses is left to the caller; this crate performs no retries.

mod client;
mod gateway_url;
mod params;

pub(crate) use gateway_url::*;

pub use client::*;
pub use params::GatewayParams;
