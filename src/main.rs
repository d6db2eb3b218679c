use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing::Level;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use methodology::connector::api::{Container, ContainerConfig, ProviderKind, Router};
use methodology::connector::http;
use methodology::{Commands, CompletionConfig};

#[derive(Parser)]
#[command(name = "methodology")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[arg(short, long, global = true)]
    verbose: bool,

    #[arg(long, global = true, value_enum, default_value = "openai")]
    provider: ProviderKind,

    /// Answer offline with a canned methodology instead of calling a provider
    #[arg(long, global = true)]
    mock_provider: bool,

    /// Model identifier; overrides OPENAI_MODEL / ANTHROPIC_MODEL
    #[arg(short, long, global = true)]
    model: Option<String>,

    #[arg(long, global = true, default_value = "0.7")]
    temperature: f32,

    #[arg(long, global = true, default_value = "2000")]
    max_tokens: u32,

    /// Do not ask the provider for a JSON object response format
    #[arg(long, global = true)]
    no_json_mode: bool,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_str().to_lowercase()));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let mut completion = CompletionConfig::default()
        .with_temperature(cli.temperature)
        .with_max_tokens(cli.max_tokens)
        .with_json_response(!cli.no_json_mode);
    if let Some(model) = cli.model {
        completion = completion.with_model(model);
    }

    let config = ContainerConfig {
        provider: cli.provider,
        mock_provider: cli.mock_provider,
        completion,
    };

    if let Commands::Serve { port, public } = cli.command {
        let container = Arc::new(Container::new(config)?);
        return http::serve(container, port, public).await;
    }

    let container = Container::new(config)?;
    let router = Router::new(&container);
    let output = router.route(cli.command).await?;
    println!("{}", output);

    Ok(())
}
