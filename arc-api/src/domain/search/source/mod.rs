//! Nanny search source implementations.

mod gateway;
#[cfg(test)]
mod mock;

pub use gateway::GatewayNannySource;
#[cfg(test)]
pub use mock::MockNannySource;
