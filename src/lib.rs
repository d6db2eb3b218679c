pub mod application;
pub mod cli;
pub mod connector;
pub mod domain;

pub use application::{CompletionClient, GenerateMethodologyUseCase, PreparedPrompt};

pub use cli::{Commands, OutputFormat};

pub use connector::{AnthropicClient, MockCompletion, OpenAiClient};

pub use domain::{
    BlockCategory, CompletionConfig, DaySchedule, DomainError, FormAnswer, FormEntry,
    MethodologyResponse, PromptBuilder, Questionnaire, Recommendation, RequestValidator,
    ResponseCategory, ResponseValidator, TimeBlock, UserResponse, Violation, Weekday,
    WeeklySchedule,
};
