use async_trait::async_trait;
use tracing::debug;

use crate::application::CompletionClient;
use crate::domain::{
    BlockCategory, DaySchedule, DomainError, MethodologyResponse, Recommendation,
    ResponseCategory, TimeBlock, Weekday, WeeklySchedule, RECOMMENDATION_CATEGORY_HINT,
};

/// Offline stand-in for a completion provider.
///
/// Answers every prompt with the same conforming methodology, with one
/// recommendation group for each category the prompt allows.
pub struct MockCompletion {
    model: String,
}

impl MockCompletion {
    pub fn new() -> Self {
        Self {
            model: "mock-completion".to_string(),
        }
    }

    fn categories_in(prompt: &str) -> Vec<ResponseCategory> {
        let Some(start) = prompt.find(RECOMMENDATION_CATEGORY_HINT) else {
            return Vec::new();
        };
        let rest = &prompt[start + RECOMMENDATION_CATEGORY_HINT.len()..];
        let list = rest.split(')').next().unwrap_or_default();
        list.split(", ")
            .filter_map(ResponseCategory::parse)
            .collect()
    }

    fn block(
        start: &str,
        end: &str,
        activity: &str,
        category: BlockCategory,
        description: &str,
    ) -> TimeBlock {
        TimeBlock {
            start_time: start.to_string(),
            end_time: end.to_string(),
            activity: activity.to_string(),
            category,
            description: description.to_string(),
        }
    }

    fn methodology(categories: &[ResponseCategory]) -> MethodologyResponse {
        let recommendations = categories
            .iter()
            .map(|c| Recommendation {
                category: c.as_str().to_string(),
                items: (1..=3)
                    .map(|i| format!("Focus area {i} for your {c} answers"))
                    .collect(),
            })
            .collect();

        MethodologyResponse {
            learning_path: "Begin with blockchain fundamentals, move on to smart contract \
                            development, then consolidate with a capstone project."
                .to_string(),
            time_strategy: "Short weekday sessions for theory, a longer weekend block for \
                            hands-on practice."
                .to_string(),
            recommendations,
            suggested_resources: vec![
                "Mastering Ethereum (book)".to_string(),
                "Solidity documentation".to_string(),
            ],
            weekly_schedule: WeeklySchedule {
                schedule: vec![
                    DaySchedule {
                        day: Weekday::Monday,
                        blocks: vec![Self::block(
                            "19:00",
                            "20:00",
                            "Blockchain Fundamentals",
                            BlockCategory::Learning,
                            "Watch curated video content on blockchain basics",
                        )],
                    },
                    DaySchedule {
                        day: Weekday::Wednesday,
                        blocks: vec![Self::block(
                            "19:00",
                            "19:45",
                            "Weekly Review",
                            BlockCategory::Review,
                            "Revisit notes and quiz yourself on key concepts",
                        )],
                    },
                    DaySchedule {
                        day: Weekday::Saturday,
                        blocks: vec![Self::block(
                            "10:00",
                            "12:00",
                            "Hands-on Project",
                            BlockCategory::Practical,
                            "Work on a smart contract development exercise",
                        )],
                    },
                ],
                notes: vec![
                    "Schedule adapts to your available weekly hours".to_string(),
                    "Mix of theoretical and practical learning".to_string(),
                ],
            },
        }
    }
}

impl Default for MockCompletion {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CompletionClient for MockCompletion {
    async fn complete(&self, prompt: &str) -> Result<String, DomainError> {
        let categories = Self::categories_in(prompt);
        debug!(
            "Generating mock methodology for {} categories",
            categories.len()
        );

        serde_json::to_string_pretty(&Self::methodology(&categories))
            .map_err(|e| DomainError::internal(format!("failed to serialize mock methodology: {e}")))
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{PromptBuilder, ResponseValidator, UserResponse};

    #[tokio::test]
    async fn test_mock_output_passes_validation_for_prompt_categories() {
        let responses = vec![
            UserResponse::new("languages?", "Rust", ResponseCategory::Technical),
            UserResponse::new("hours?", "5-10 hours", ResponseCategory::Preferences),
        ];
        let categories = PromptBuilder::distinct_categories(&responses);
        let prompt = PromptBuilder::build(&responses, &categories).unwrap();

        let raw = MockCompletion::new().complete(&prompt).await.unwrap();
        let methodology = ResponseValidator::new()
            .with_allowed_categories(&categories)
            .validate(&raw)
            .unwrap();

        let groups: Vec<&str> = methodology
            .recommendations
            .iter()
            .map(|r| r.category.as_str())
            .collect();
        assert_eq!(groups, vec!["technical", "preferences"]);
    }

    #[tokio::test]
    async fn test_mock_is_deterministic() {
        let mock = MockCompletion::new();
        let a = mock.complete("anything").await.unwrap();
        let b = mock.complete("anything").await.unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_categories_in_without_hint_is_empty() {
        assert!(MockCompletion::categories_in("no hint here").is_empty());
    }
}
