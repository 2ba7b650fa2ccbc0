use std::fs::OpenOptions;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use usul::app::Controller;
use usul::content::parse_blocks;
use usul::curriculum;
use usul::gateway::{Gateway, GeminiGateway};
use usul::gemini::{ApiKey, GeminiClient};
use usul::{App, Config};

#[derive(Parser)]
#[command(name = "usul")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Gemini model (e.g. gemini-2.5-flash), overrides the config file
    #[arg(long, global = true)]
    model: Option<String>,

    /// Questions per quiz, overrides the config file
    #[arg(long, global = true)]
    questions: Option<usize>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List the curriculum with topic ids
    Topics,
    /// Generate one lesson and print it
    Lesson {
        /// Topic id, as listed by `usul topics`
        topic: String,
        /// Print parsed content blocks as JSON
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load()?;
    if let Some(model) = cli.model {
        config.model = model;
    }
    if let Some(questions) = cli.questions {
        config.quiz_questions = questions;
    }

    match cli.command {
        Some(Commands::Topics) => {
            init_logging(None)?;
            print_topics();
            Ok(())
        }
        Some(Commands::Lesson { topic, json }) => {
            init_logging(None)?;
            print_lesson(&config, &topic, json).await
        }
        None => {
            // The TUI owns the terminal, so logs go to a file.
            init_logging(Some(Config::log_path()?))?;
            let controller = Controller::new(
                Arc::new(build_gateway(&config)?),
                curriculum::builtin().clone(),
                config.quiz_size(),
            )?;
            tracing::info!(model = %config.model, "starting");
            let mut app = App::new(config, controller)?;
            app.run().await
        }
    }
}

/// Initialize logging to stderr, or to `log_file` when given
fn init_logging(log_file: Option<std::path::PathBuf>) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| "usul=info".into());
    let registry = tracing_subscriber::registry().with(filter);

    match log_file {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create log directory {:?}", parent))?;
            }
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .with_context(|| format!("Failed to open log file {:?}", path))?;
            registry
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_target(false)
                        .with_ansi(false)
                        .with_writer(Mutex::new(file)),
                )
                .init();
        }
        None => {
            registry
                .with(tracing_subscriber::fmt::layer().with_target(false).with_writer(std::io::stderr))
                .init();
        }
    }
    Ok(())
}

fn build_gateway(config: &Config) -> Result<GeminiGateway> {
    let api_key = ApiKey::from_env(&config.api_key_env)
        .with_context(|| format!("Set {} to a Gemini API key", config.api_key_env))?;
    let mut client = GeminiClient::new(api_key, config.gemini_model()?, config.request_timeout())?;
    if let Some(endpoint) = &config.endpoint {
        client = client.with_endpoint(endpoint.clone());
    }
    Ok(GeminiGateway::new(client))
}

fn print_topics() {
    for category in &curriculum::builtin().categories {
        println!("{}  [{}]", category.title, category.id);
        for topic in &category.children {
            println!("    {:<18} {}", topic.id, topic.title);
        }
    }
}

async fn print_lesson(config: &Config, topic_id: &str, json: bool) -> Result<()> {
    let Some(topic) = curriculum::builtin().find(topic_id) else {
        bail!("Unknown topic '{}'; run `usul topics` for the list", topic_id);
    };
    if !topic.is_leaf() {
        bail!("'{}' is a category; pick one of its lessons", topic_id);
    }

    let gateway = build_gateway(config)?;
    let text = gateway.produce_lesson(&topic.title, &topic.description).await;

    if json {
        println!("{}", serde_json::to_string_pretty(&parse_blocks(&text))?);
    } else {
        println!("{text}");
    }
    Ok(())
}
