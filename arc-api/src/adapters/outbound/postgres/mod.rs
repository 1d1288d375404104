mod audit_log;
mod review_store;

pub use audit_log::PostgresAuditLog;
pub use review_store::PostgresReviewStore;
