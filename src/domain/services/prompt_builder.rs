use std::collections::HashSet;

use crate::domain::{
    BlockCategory, DomainError, ResponseCategory, UserResponse, Weekday, RECOMMENDATION_ITEMS,
};

/// Text that precedes the allowed recommendation categories in the output
/// shape embedded in every prompt.
pub const RECOMMENDATION_CATEGORY_HINT: &str = "\"category\": \"string (one of: ";

const RESPONSES: &str = "{{RESPONSES}}";
const CATEGORIES: &str = "{{CATEGORIES}}";
const ITEMS: &str = "{{ITEMS}}";
const DAYS: &str = "{{DAYS}}";
const BLOCK_CATEGORIES: &str = "{{BLOCK_CATEGORIES}}";

const TEMPLATE: &str = r#"You are a world-class blockchain education expert and learning coach. Your task is to analyze a student's background and goals, and create a personalized blockchain learning methodology based on their responses.

Here are the user's responses:
{{RESPONSES}}

Create a personalized blockchain learning methodology that includes:
1. A detailed learning path structure and pacing
2. A weekly time allocation strategy
3. For each category ({{CATEGORIES}}), provide exactly {{ITEMS}} specific and unique learning recommendations
4. Suggested detailed outline of resources and tools
5. A detailed weekly schedule

IMPORTANT: Your response must be a valid JSON object with the following structure:
{
    "learningPath": "string",
    "timeStrategy": "string",
    "recommendations": [
        {
            "category": "string (one of: {{CATEGORIES}})",
            "items": ["string", "string", "string"]
        }
    ],
    "suggestedResources": ["string"],
    "weeklySchedule": {
        "schedule": [
            {
                "day": {{DAYS}},
                "blocks": [
                    {
                        "startTime": "string (format: HH:MM)",
                        "endTime": "string (format: HH:MM)",
                        "activity": "string",
                        "category": {{BLOCK_CATEGORIES}},
                        "description": "string"
                    }
                ]
            }
        ],
        "notes": ["string"]
    }
}

IMPORTANT NOTES:
1. The "category" field in schedule blocks MUST be one of: {{BLOCK_CATEGORIES}}
2. The "day" field MUST be a valid day of the week (Monday through Sunday)
3. Times must be in 24-hour format (e.g., "09:00", "14:30")
4. Each array should contain at least one item
5. For recommendations, provide exactly {{ITEMS}} specific and actionable items for each category
6. Only include recommendation entries for these categories: {{CATEGORIES}}
7. Make recommendations highly specific to the user's background and goals
8. Return only the JSON object, with no prose and no code fences"#;

/// Renders the instruction sent to the completion provider.
pub struct PromptBuilder;

impl PromptBuilder {
    /// Distinct categories in order of first appearance.
    pub fn distinct_categories(responses: &[UserResponse]) -> Vec<ResponseCategory> {
        let mut seen = HashSet::new();
        responses
            .iter()
            .map(UserResponse::category)
            .filter(|c| seen.insert(*c))
            .collect()
    }

    pub fn build(
        responses: &[UserResponse],
        categories: &[ResponseCategory],
    ) -> Result<String, DomainError> {
        let records = serde_json::to_string_pretty(responses)
            .map_err(|e| DomainError::internal(format!("failed to serialize responses: {e}")))?;

        let category_list = categories
            .iter()
            .map(|c| c.as_str())
            .collect::<Vec<_>>()
            .join(", ");

        // User-supplied text goes in last so it is never scanned for markers.
        Ok(TEMPLATE
            .replace(CATEGORIES, &category_list)
            .replace(ITEMS, &RECOMMENDATION_ITEMS.to_string())
            .replace(DAYS, &alternatives(&Weekday::names()))
            .replace(BLOCK_CATEGORIES, &alternatives(&BlockCategory::names()))
            .replace(RESPONSES, &records))
    }

    /// Derive the categories from `responses`, then build.
    pub fn build_for(responses: &[UserResponse]) -> Result<String, DomainError> {
        Self::build(responses, &Self::distinct_categories(responses))
    }
}

fn alternatives(names: &[&str]) -> String {
    names
        .iter()
        .map(|n| format!("\"{n}\""))
        .collect::<Vec<_>>()
        .join(" | ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(category: ResponseCategory) -> UserResponse {
        UserResponse::new("q", "a", category)
    }

    #[test]
    fn distinct_categories_keep_first_seen_order() {
        let responses = vec![
            response(ResponseCategory::Technical),
            response(ResponseCategory::Background),
            response(ResponseCategory::Technical),
            response(ResponseCategory::Preferences),
            response(ResponseCategory::Background),
        ];

        assert_eq!(
            PromptBuilder::distinct_categories(&responses),
            vec![
                ResponseCategory::Technical,
                ResponseCategory::Background,
                ResponseCategory::Preferences,
            ]
        );
    }

    #[test]
    fn single_background_answer_requests_only_background() {
        let responses = vec![UserResponse::new(
            "role?",
            "Developer",
            ResponseCategory::Background,
        )];

        let categories = PromptBuilder::distinct_categories(&responses);
        assert_eq!(categories, vec![ResponseCategory::Background]);

        let prompt = PromptBuilder::build(&responses, &categories).unwrap();
        assert!(prompt.contains(
            "For each category (background), provide exactly 3 specific and unique learning recommendations"
        ));
        assert!(prompt.contains("\"category\": \"string (one of: background)\""));
        assert!(prompt.contains("Only include recommendation entries for these categories: background"));
        assert!(!prompt.contains("technical"));
        assert!(!prompt.contains("preferences"));
    }

    #[test]
    fn prompt_embeds_records_verbatim() {
        let responses = vec![UserResponse::new(
            "What is your current role?",
            "Student",
            ResponseCategory::Background,
        )];

        let prompt = PromptBuilder::build_for(&responses).unwrap();
        let expected = "[\n  {\n    \"question\": \"What is your current role?\",\n    \"answer\": \"Student\",\n    \"category\": \"background\"\n  }\n]";
        assert!(prompt.contains(expected));
    }

    #[test]
    fn prompt_spells_out_enumerations_and_time_format() {
        let prompt = PromptBuilder::build_for(&[response(ResponseCategory::Technical)]).unwrap();

        assert!(prompt.contains(
            r#""day": "Monday" | "Tuesday" | "Wednesday" | "Thursday" | "Friday" | "Saturday" | "Sunday","#
        ));
        assert!(prompt.contains(r#""category": "learning" | "practical" | "review" | "project","#));
        assert!(prompt.contains("\"startTime\": \"string (format: HH:MM)\""));
        assert!(prompt.contains(RECOMMENDATION_CATEGORY_HINT));
        assert!(!prompt.contains("{{"));
    }

    #[test]
    fn markers_in_answers_are_not_expanded() {
        let responses = vec![UserResponse::new(
            "goal?",
            "{{CATEGORIES}}",
            ResponseCategory::Preferences,
        )];

        let prompt = PromptBuilder::build_for(&responses).unwrap();
        assert!(prompt.contains("\"answer\": \"{{CATEGORIES}}\""));
    }

    #[test]
    fn build_is_deterministic() {
        let responses = vec![
            response(ResponseCategory::Preferences),
            response(ResponseCategory::Background),
        ];
        assert_eq!(
            PromptBuilder::build_for(&responses).unwrap(),
            PromptBuilder::build_for(&responses).unwrap()
        );
    }
}
