//! Pure domain services: request validation, prompt rendering and
//! provider output validation.

mod prompt_builder;
mod request_validator;
mod response_validator;
mod shape;

pub use prompt_builder::*;
pub use request_validator::*;
pub use response_validator::*;
pub use shape::{FieldPath, ShapeChecker};
