use std::sync::Arc;
use std::time::Instant;

use serde_json::Value;
use tracing::{debug, error, info, warn};

use crate::application::CompletionClient;
use crate::domain::{
    DomainError, FormEntry, MethodologyResponse, PromptBuilder, Questionnaire, RequestValidator,
    ResponseCategory, ResponseValidator, UserResponse, Violation,
};

/// Validated input together with the prompt rendered from it.
#[derive(Debug, Clone)]
pub struct PreparedPrompt {
    pub responses: Vec<UserResponse>,
    pub categories: Vec<ResponseCategory>,
    pub prompt: String,
}

impl PreparedPrompt {
    pub fn from_responses(responses: Vec<UserResponse>) -> Result<Self, DomainError> {
        let categories = PromptBuilder::distinct_categories(&responses);
        let prompt = PromptBuilder::build(&responses, &categories)?;
        Ok(Self {
            responses,
            categories,
            prompt,
        })
    }
}

/// validate input → build prompt → complete → validate output.
///
/// Every failure is terminal for the call; nothing is retried.
pub struct GenerateMethodologyUseCase {
    client: Arc<dyn CompletionClient>,
    questionnaire: Questionnaire,
}

impl GenerateMethodologyUseCase {
    pub fn new(client: Arc<dyn CompletionClient>) -> Self {
        Self {
            client,
            questionnaire: Questionnaire::standard(),
        }
    }

    pub fn with_questionnaire(mut self, questionnaire: Questionnaire) -> Self {
        self.questionnaire = questionnaire;
        self
    }

    pub fn prepare(&self, input: &Value) -> Result<PreparedPrompt, DomainError> {
        let responses = RequestValidator::validate(input)?;
        PreparedPrompt::from_responses(responses)
    }

    /// Flatten raw form answers, refusing the submission while any question
    /// of the questionnaire is unanswered.
    pub fn prepare_answers(&self, answers: &[FormEntry]) -> Result<PreparedPrompt, DomainError> {
        let missing = self.questionnaire.unanswered(answers);
        if !missing.is_empty() {
            let violations = missing
                .iter()
                .map(|q| Violation::new("Please answer all questions before proceeding", q.question))
                .collect();
            return Err(DomainError::invalid_input(violations));
        }

        PreparedPrompt::from_responses(self.questionnaire.to_user_responses(answers))
    }

    pub async fn execute(&self, input: &Value) -> Result<MethodologyResponse, DomainError> {
        let prepared = self.prepare(input)?;
        self.run(prepared).await
    }

    pub async fn execute_answers(
        &self,
        answers: &[FormEntry],
    ) -> Result<MethodologyResponse, DomainError> {
        let prepared = self.prepare_answers(answers)?;
        self.run(prepared).await
    }

    pub async fn run(&self, prepared: PreparedPrompt) -> Result<MethodologyResponse, DomainError> {
        let categories = prepared
            .categories
            .iter()
            .map(|c| c.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        info!(
            "Generating methodology with {} for {} responses (categories: {})",
            self.client.model_name(),
            prepared.responses.len(),
            categories
        );
        debug!("Prompt is {} bytes", prepared.prompt.len());

        let start_time = Instant::now();

        let raw = self.client.complete(&prepared.prompt).await.map_err(|e| {
            error!("Completion request failed: {e}");
            e
        })?;
        debug!("Provider returned {} bytes", raw.len());

        let validator = ResponseValidator::new().with_allowed_categories(&prepared.categories);
        let methodology = validator.validate(&raw).map_err(|e| {
            warn!("Rejected provider output: {e}");
            e
        })?;

        info!(
            "Methodology validated in {:.2}s ({} recommendation groups, {} scheduled days)",
            start_time.elapsed().as_secs_f64(),
            methodology.recommendations.len(),
            methodology.weekly_schedule.schedule.len()
        );

        Ok(methodology)
    }
}
