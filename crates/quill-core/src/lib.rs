//! # Quill Core
//!
//! The domain layer of the Quill blogging backend.
//! This crate contains the post aggregate, the authorization policy and the
//! application services, with zero infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod policy;
pub mod ports;
pub mod query;
pub mod services;

pub use error::DomainError;
pub use policy::{Action, Principal};
pub use query::{FilterKind, PostFilter, PostQuery};
