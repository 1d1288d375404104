mod audit_log;
#[cfg(test)]
mod mock;
mod notifier;
mod review_store;

pub use audit_log::*;
#[cfg(test)]
pub use mock::*;
pub use notifier::*;
pub use review_store::*;
