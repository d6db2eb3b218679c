use anyhow::{Context, Result};
use tokio::io::AsyncReadExt;

use crate::application::{GenerateMethodologyUseCase, PreparedPrompt};
use crate::domain::{DomainError, FormEntry, RequestValidator, Violation};

/// Read a request file, or stdin when `path` is `-`.
pub async fn read_input(path: &str) -> Result<String> {
    if path == "-" {
        let mut buf = String::new();
        tokio::io::stdin()
            .read_to_string(&mut buf)
            .await
            .context("failed to read stdin")?;
        return Ok(buf);
    }
    tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("failed to read {path}"))
}

/// Validate raw input text and render its prompt. `answers` selects the raw
/// form-answer shape instead of flattened responses.
pub fn prepare(
    use_case: &GenerateMethodologyUseCase,
    raw: &str,
    answers: bool,
) -> Result<PreparedPrompt, DomainError> {
    if answers {
        let entries: Vec<FormEntry> = serde_json::from_str(raw).map_err(|e| {
            DomainError::invalid_input(vec![Violation::new(
                format!("Answers are not valid: {e}"),
                "",
            )])
        })?;
        use_case.prepare_answers(&entries)
    } else {
        PreparedPrompt::from_responses(RequestValidator::validate_str(raw)?)
    }
}
