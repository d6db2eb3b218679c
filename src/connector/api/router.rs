use anyhow::Result;

use crate::Commands;

use super::container::Container;
use super::controller::{
    GenerateController, PromptController, QuestionsController, SchemaController,
};

pub struct Router<'a> {
    generate_controller: GenerateController<'a>,
    prompt_controller: PromptController<'a>,
    questions_controller: QuestionsController<'a>,
    schema_controller: SchemaController,
}

impl<'a> Router<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self {
            generate_controller: GenerateController::new(container),
            prompt_controller: PromptController::new(container),
            questions_controller: QuestionsController::new(container),
            schema_controller: SchemaController::new(),
        }
    }

    pub async fn route(&self, command: Commands) -> Result<String> {
        match command {
            Commands::Generate {
                input,
                format,
                answers,
            } => self.generate_controller.generate(input, format, answers).await,
            Commands::Prompt { input, answers } => {
                self.prompt_controller.prompt(input, answers).await
            }
            Commands::Questions => self.questions_controller.list().await,
            Commands::Schema => self.schema_controller.schema().await,
            Commands::Serve { .. } => unreachable!("serve command is handled separately in main"),
        }
    }
}
