use serde::{Deserialize, Serialize};

/// Questionnaire category an answer is filed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseCategory {
    Background,
    Technical,
    Preferences,
}

impl ResponseCategory {
    pub const ALL: [ResponseCategory; 3] = [
        ResponseCategory::Background,
        ResponseCategory::Technical,
        ResponseCategory::Preferences,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ResponseCategory::Background => "background",
            ResponseCategory::Technical => "technical",
            ResponseCategory::Preferences => "preferences",
        }
    }

    /// Exact, case-sensitive match on the wire name.
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == s)
    }

    pub fn names() -> Vec<&'static str> {
        Self::ALL.iter().map(|c| c.as_str()).collect()
    }
}

impl std::fmt::Display for ResponseCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One answered questionnaire question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserResponse {
    question: String,
    answer: String,
    category: ResponseCategory,
}

impl UserResponse {
    pub fn new(
        question: impl Into<String>,
        answer: impl Into<String>,
        category: ResponseCategory,
    ) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
            category,
        }
    }

    pub fn question(&self) -> &str {
        &self.question
    }

    pub fn answer(&self) -> &str {
        &self.answer
    }

    pub fn category(&self) -> ResponseCategory {
        self.category
    }
}
