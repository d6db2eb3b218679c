pub mod generate_controller;
mod input;
pub mod prompt_controller;
pub mod questions_controller;
pub mod schema_controller;

pub use generate_controller::{format_methodology, GenerateController};
pub use input::{prepare, read_input};
pub use prompt_controller::PromptController;
pub use questions_controller::QuestionsController;
pub use schema_controller::SchemaController;
