//! Models Module
//!
//! Request and response DTOs for the cache server REST API.

mod requests;
mod responses;

pub use requests::{SetRequest, ValType};
pub use responses::{ErrorResponse, GetResponse, HealthResponse, SetResponse};
