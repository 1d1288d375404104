//! Childminder search repository implementations.

#[cfg(test)]
mod mock;
mod postgres;

#[cfg(test)]
pub use mock::{MockChildminderApplication, MockChildminderRepository};
pub use postgres::PgChildminderRepository;
