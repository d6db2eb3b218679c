use std::sync::Arc;

use anyhow::Result;
use tracing::debug;

use crate::application::{CompletionClient, GenerateMethodologyUseCase};
use crate::domain::{CompletionConfig, Questionnaire};
use crate::{AnthropicClient, MockCompletion, OpenAiClient};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ProviderKind {
    #[default]
    #[value(name = "openai")]
    OpenAi,
    Anthropic,
}

#[derive(Debug, Clone, Default)]
pub struct ContainerConfig {
    pub provider: ProviderKind,
    /// Answer every prompt offline with a canned, conforming methodology.
    pub mock_provider: bool,
    pub completion: CompletionConfig,
}

pub struct Container {
    client: Arc<dyn CompletionClient>,
    questionnaire: Questionnaire,
    config: ContainerConfig,
}

impl Container {
    pub fn new(config: ContainerConfig) -> Result<Self> {
        let client: Arc<dyn CompletionClient> = if config.mock_provider {
            debug!("Using mock completion provider");
            Arc::new(MockCompletion::new())
        } else {
            match config.provider {
                ProviderKind::OpenAi => {
                    debug!("Using OpenAI completion provider");
                    Arc::new(OpenAiClient::from_env(config.completion.clone())?)
                }
                ProviderKind::Anthropic => {
                    debug!("Using Anthropic completion provider");
                    Arc::new(AnthropicClient::from_env(config.completion.clone()))
                }
            }
        };

        Ok(Self::with_client(config, client))
    }

    /// Wire an already-built client, bypassing provider selection.
    pub fn with_client(config: ContainerConfig, client: Arc<dyn CompletionClient>) -> Self {
        Self {
            client,
            questionnaire: Questionnaire::standard(),
            config,
        }
    }

    pub fn generate_use_case(&self) -> GenerateMethodologyUseCase {
        GenerateMethodologyUseCase::new(self.client.clone())
            .with_questionnaire(self.questionnaire.clone())
    }

    pub fn questionnaire(&self) -> &Questionnaire {
        &self.questionnaire
    }

    pub fn model_name(&self) -> &str {
        self.client.model_name()
    }

    pub fn config(&self) -> &ContainerConfig {
        &self.config
    }
}
