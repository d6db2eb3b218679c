use serde::{Deserialize, Serialize};

use super::{ResponseCategory, UserResponse};

/// Separator used when a multi-select answer is flattened into one string.
pub const MULTI_SELECT_SEPARATOR: &str = ", ";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum QuestionKind {
    Select,
    MultiSelect,
}

#[derive(Debug, Clone, Serialize)]
pub struct Question {
    pub question: &'static str,
    pub category: ResponseCategory,
    pub kind: QuestionKind,
    pub options: &'static [&'static str],
}

#[derive(Debug, Clone, Serialize)]
pub struct Section {
    pub title: &'static str,
    pub questions: Vec<Question>,
}

/// A raw form answer before flattening: one selection or several.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FormAnswer {
    Single(String),
    Multiple(Vec<String>),
}

impl FormAnswer {
    pub fn is_empty(&self) -> bool {
        match self {
            FormAnswer::Single(s) => s.is_empty(),
            FormAnswer::Multiple(v) => v.is_empty(),
        }
    }

    pub fn flatten(&self) -> String {
        match self {
            FormAnswer::Single(s) => s.clone(),
            FormAnswer::Multiple(v) => v.join(MULTI_SELECT_SEPARATOR),
        }
    }
}

/// One submitted form field, keyed by the question text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormEntry {
    pub question: String,
    pub answer: FormAnswer,
}

impl FormEntry {
    pub fn new(question: impl Into<String>, answer: FormAnswer) -> Self {
        Self {
            question: question.into(),
            answer,
        }
    }
}

/// The question bank presented to the learner, grouped in steps.
#[derive(Debug, Clone, Serialize)]
pub struct Questionnaire {
    sections: Vec<Section>,
}

impl Questionnaire {
    pub fn new(sections: Vec<Section>) -> Self {
        Self { sections }
    }

    pub fn standard() -> Self {
        Self::new(vec![
            Section {
                title: "Technical Background",
                questions: vec![
                    Question {
                        question: "What is your current role?",
                        category: ResponseCategory::Background,
                        kind: QuestionKind::Select,
                        options: &[
                            "Software Developer",
                            "Student",
                            "Business Professional",
                            "Entrepreneur",
                            "Other",
                        ],
                    },
                    Question {
                        question: "What programming languages are you familiar with?",
                        category: ResponseCategory::Technical,
                        kind: QuestionKind::MultiSelect,
                        options: &[
                            "JavaScript/TypeScript",
                            "Python",
                            "Java",
                            "C++",
                            "Solidity",
                            "Rust",
                            "Go",
                            "None",
                        ],
                    },
                ],
            },
            Section {
                title: "Blockchain Experience",
                questions: vec![
                    Question {
                        question: "What is your experience level with blockchain?",
                        category: ResponseCategory::Technical,
                        kind: QuestionKind::Select,
                        options: &[
                            "Complete Beginner",
                            "Basic Understanding",
                            "Some Development Experience",
                            "Professional Experience",
                        ],
                    },
                    Question {
                        question: "Which blockchain platforms interest you?",
                        category: ResponseCategory::Technical,
                        kind: QuestionKind::MultiSelect,
                        options: &["Ethereum", "Solana", "Polkadot", "Cardano", "Bitcoin", "Other"],
                    },
                ],
            },
            Section {
                title: "Learning Preferences",
                questions: vec![
                    Question {
                        question: "How much time can you dedicate to learning per week?",
                        category: ResponseCategory::Preferences,
                        kind: QuestionKind::Select,
                        options: &["0-5 hours", "5-10 hours", "10-20 hours", "20+ hours"],
                    },
                    Question {
                        question: "What are your learning goals?",
                        category: ResponseCategory::Preferences,
                        kind: QuestionKind::MultiSelect,
                        options: &[
                            "Build DApps",
                            "Smart Contract Development",
                            "Blockchain Architecture",
                            "Cryptocurrency Trading",
                            "Web3 Business Development",
                        ],
                    },
                ],
            },
        ])
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn questions(&self) -> impl Iterator<Item = &Question> {
        self.sections.iter().flat_map(|s| s.questions.iter())
    }

    pub fn find(&self, question: &str) -> Option<&Question> {
        self.questions().find(|q| q.question == question)
    }

    /// Questions with no answer, or an empty one, in bank order.
    pub fn unanswered(&self, answers: &[FormEntry]) -> Vec<&Question> {
        self.questions()
            .filter(|q| {
                !answers
                    .iter()
                    .any(|a| a.question == q.question && !a.answer.is_empty())
            })
            .collect()
    }

    /// Flatten form answers into `UserResponse`s, keeping submission order.
    ///
    /// Questions missing from the bank are filed under `preferences`.
    pub fn to_user_responses(&self, answers: &[FormEntry]) -> Vec<UserResponse> {
        answers
            .iter()
            .map(|entry| {
                let category = self
                    .find(&entry.question)
                    .map(|q| q.category)
                    .unwrap_or(ResponseCategory::Preferences);
                UserResponse::new(entry.question.clone(), entry.answer.flatten(), category)
            })
            .collect()
    }
}

impl Default for Questionnaire {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single(s: &str) -> FormAnswer {
        FormAnswer::Single(s.to_string())
    }

    fn multiple(items: &[&str]) -> FormAnswer {
        FormAnswer::Multiple(items.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn test_standard_bank_has_three_sections_of_two() {
        let q = Questionnaire::standard();
        assert_eq!(q.sections().len(), 3);
        assert!(q.sections().iter().all(|s| s.questions.len() == 2));
    }

    #[test]
    fn test_multi_select_is_joined_with_comma() {
        let q = Questionnaire::standard();
        let answers = vec![FormEntry::new(
            "Which blockchain platforms interest you?",
            multiple(&["Ethereum", "Solana"]),
        )];

        let responses = q.to_user_responses(&answers);
        assert_eq!(responses.len(), 1);
        assert_eq!(responses[0].answer(), "Ethereum, Solana");
        assert_eq!(responses[0].category(), ResponseCategory::Technical);
    }

    #[test]
    fn test_unknown_question_defaults_to_preferences() {
        let q = Questionnaire::standard();
        let responses =
            q.to_user_responses(&[FormEntry::new("Favourite chain?", single("Ethereum"))]);
        assert_eq!(responses[0].category(), ResponseCategory::Preferences);
    }

    #[test]
    fn test_unanswered_treats_empty_selection_as_missing() {
        let q = Questionnaire::standard();
        let answers = vec![
            FormEntry::new("What is your current role?", single("Student")),
            FormEntry::new(
                "What programming languages are you familiar with?",
                multiple(&[]),
            ),
        ];

        let missing = q.unanswered(&answers);
        assert_eq!(missing.len(), 5);
        assert_eq!(
            missing[0].question,
            "What programming languages are you familiar with?"
        );
    }

    #[test]
    fn test_form_answer_accepts_string_or_list() {
        let entries: Vec<FormEntry> = serde_json::from_str(
            r#"[{"question":"a","answer":"x"},{"question":"b","answer":["y","z"]}]"#,
        )
        .unwrap();
        assert_eq!(entries[0].answer, single("x"));
        assert_eq!(entries[1].answer, multiple(&["y", "z"]));
    }
}
