mod error;
mod server;

pub use error::{ApiError, ErrorBody};
pub use server::{router, serve};
