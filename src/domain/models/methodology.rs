use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Number of items every recommendation entry must carry.
pub const RECOMMENDATION_ITEMS: usize = 3;

/// 24-hour `HH:MM` pattern for time block bounds.
pub const TIME_FORMAT: &str = r"^([01][0-9]|2[0-3]):[0-5][0-9]$";

/// The validated learning methodology returned by the provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct MethodologyResponse {
    /// Narrative learning path structure and pacing.
    pub learning_path: String,
    /// Narrative weekly time allocation strategy.
    pub time_strategy: String,
    /// One entry per questionnaire category present in the request.
    pub recommendations: Vec<Recommendation>,
    /// Outline of resources and tools, at least one entry.
    #[schemars(length(min = 1))]
    pub suggested_resources: Vec<String>,
    pub weekly_schedule: WeeklySchedule,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Recommendation {
    pub category: String,
    /// Exactly [`RECOMMENDATION_ITEMS`] items.
    #[schemars(length(equal = 3))]
    pub items: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct WeeklySchedule {
    pub schedule: Vec<DaySchedule>,
    pub notes: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct DaySchedule {
    pub day: Weekday,
    pub blocks: Vec<TimeBlock>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TimeBlock {
    /// 24-hour `HH:MM`.
    #[schemars(regex(pattern = r"^([01][0-9]|2[0-3]):[0-5][0-9]$"))]
    pub start_time: String,
    /// 24-hour `HH:MM`.
    #[schemars(regex(pattern = r"^([01][0-9]|2[0-3]):[0-5][0-9]$"))]
    pub end_time: String,
    pub activity: String,
    pub category: BlockCategory,
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
            Weekday::Saturday => "Saturday",
            Weekday::Sunday => "Sunday",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.as_str() == s)
    }

    pub fn names() -> Vec<&'static str> {
        Self::ALL.iter().map(|d| d.as_str()).collect()
    }
}

impl std::fmt::Display for Weekday {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Purpose of a schedule block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum BlockCategory {
    Learning,
    Practical,
    Review,
    Project,
}

impl BlockCategory {
    pub const ALL: [BlockCategory; 4] = [
        BlockCategory::Learning,
        BlockCategory::Practical,
        BlockCategory::Review,
        BlockCategory::Project,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BlockCategory::Learning => "learning",
            BlockCategory::Practical => "practical",
            BlockCategory::Review => "review",
            BlockCategory::Project => "project",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == s)
    }

    pub fn names() -> Vec<&'static str> {
        Self::ALL.iter().map(|c| c.as_str()).collect()
    }
}

impl std::fmt::Display for BlockCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
