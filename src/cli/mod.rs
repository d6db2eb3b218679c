use clap::{Subcommand, ValueEnum};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Serve the HTTP API (POST /api/methodology, POST /api/questionnaire)
    Serve {
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// Bind to 0.0.0.0 instead of 127.0.0.1, exposing the server on all network interfaces
        #[arg(long)]
        public: bool,
    },

    /// Generate a methodology from a JSON file of responses ("-" reads stdin)
    Generate {
        input: String,

        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,

        /// Treat the input as raw form answers ({question, answer: string | [string]})
        #[arg(long)]
        answers: bool,
    },

    /// Print the prompt that would be sent to the provider, without sending it
    Prompt {
        input: String,

        #[arg(long)]
        answers: bool,
    },

    /// List the questionnaire
    Questions,

    /// Print the JSON Schema of the methodology response
    Schema,
}
