//! Caseworker identity.
//!
//! Authentication happens in front of this service; the authenticating proxy
//! passes the caseworker's identity on in a request header.

mod extractor;

pub use extractor::{Caseworker, CASEWORKER_HEADER};
