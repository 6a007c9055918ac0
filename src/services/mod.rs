pub mod catalog;
pub mod chat;
pub mod errors;
pub mod recipes;
pub mod stats;

pub use errors::{ServiceError, ServiceResult};
