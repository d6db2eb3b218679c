mod anthropic_client;
pub mod http;
mod mock_completion;
mod openai_client;

pub use anthropic_client::*;
pub use mock_completion::*;
pub use openai_client::*;
