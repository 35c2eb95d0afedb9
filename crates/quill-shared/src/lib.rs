//! # Quill Shared
//!
//! Wire types of the HTTP API: request bodies with their validation rules,
//! response bodies, and the RFC 7807 error body.

pub mod dto;
pub mod response;

pub use response::{ErrorResponse, FieldError, SuccessResponse};
