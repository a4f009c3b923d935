mod chat;
mod commands;
mod config;
mod util;

use clap::{Parser, Subcommand};
use riskchat_core::Normalizer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::util::exit_error;

const DEFAULT_LOG_FILTER: &str = "riskchat=info,riskchat_core=info";

#[derive(Parser)]
#[command(
    name = "riskchat",
    version,
    about = "Risk-assessment agent client: ask a question, get a structured reply"
)]
struct Cli {
    /// Agent endpoint that accepts {"message": ...}
    #[arg(long, env = "RISKCHAT_API_URL", default_value = "http://127.0.0.1:8010/api/send")]
    api_url: String,

    /// Bearer token sent with each request
    #[arg(long, env = "RISKCHAT_TOKEN", hide_env_values = true)]
    token: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check agent API health
    Health,
    /// Send a message to the agent and print both chat entries
    Ask {
        /// Message text
        message: String,
        /// Send the text as an answer to the agent's missing-data prompt
        #[arg(long)]
        supplement: bool,
    },
    /// Normalize an agent payload without calling the API
    Normalize {
        /// JSON file path, or "-" for stdin
        #[arg(long, default_value = "-")]
        file: String,
        /// Treat the input as a full response body and honor its `ok`/`detail`/`error` fields
        #[arg(long)]
        envelope: bool,
    },
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into());
    let json = std::env::var("RISKCHAT_LOG_FORMAT").is_ok_and(|f| f.eq_ignore_ascii_case("json"));

    // stdout carries command output; logs go to stderr.
    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    init_tracing();
    let cli = Cli::parse();

    let config = config::normalizer_config().unwrap_or_else(|e| {
        exit_error(&e, Some("Fix or unset the RISKCHAT_* normalizer variables"))
    });
    let normalizer = Normalizer::new(config);

    let code = match cli.command {
        Commands::Health => commands::health::run(&cli.api_url).await,
        Commands::Ask {
            message,
            supplement,
        } => {
            commands::ask::run(
                &normalizer,
                &cli.api_url,
                cli.token.as_deref(),
                &message,
                supplement,
            )
            .await
        }
        Commands::Normalize { file, envelope } => {
            commands::normalize::run(&normalizer, &file, envelope)
        }
    };

    std::process::exit(code);
}
