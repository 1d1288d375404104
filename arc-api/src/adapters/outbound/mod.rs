//! Concrete implementations of the outbound ports.

pub mod gateway;
pub mod notify;
pub mod postgres;
