//! # Application Layer
//!
//! Use cases orchestrating the domain services around the completion port.

pub mod interfaces;
pub mod use_cases;

pub use interfaces::*;
pub use use_cases::*;
