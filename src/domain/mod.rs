//! # Domain Layer
//!
//! Request and methodology models, the error taxonomy, and the pure
//! validation and prompt services. Nothing here performs I/O.

pub mod error;
pub mod models;
pub mod services;

pub use error::*;
pub use models::*;
pub use services::*;
