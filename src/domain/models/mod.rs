mod completion_config;
mod methodology;
mod questionnaire;
mod user_response;

pub use completion_config::*;
pub use methodology::*;
pub use questionnaire::*;
pub use user_response::*;
