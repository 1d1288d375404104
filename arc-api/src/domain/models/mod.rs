mod application;
mod audit;
mod caseworker;
mod notification;
mod review;

pub use application::*;
pub use audit::*;
pub use caseworker::*;
pub use notification::*;
pub use review::*;
