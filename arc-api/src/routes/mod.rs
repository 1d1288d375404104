pub(crate) mod audit;
pub(crate) mod error;
pub(crate) mod review;
pub(crate) mod search;

pub(crate) use error::ApiError;
