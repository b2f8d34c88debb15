use anyhow::{Context, Result};
use clap::Parser;
use research_assistant::models::{Config, ResearchRequest};
use research_assistant::prompts;
use research_assistant::service::ResearchService;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "research-assistant")]
#[command(about = "Summarize content or suggest further reading with Gemini")]
struct CliArgs {
    /// Operation to perform: "summarize" or "suggest".
    #[arg(value_name = "OPERATION", required_unless_present = "request")]
    operation: Option<String>,

    /// Content to process. Read from stdin when omitted.
    #[arg(value_name = "CONTENT")]
    content: Option<String>,

    /// JSON request file ({"operation": ..., "content": ...}); `-` reads stdin.
    #[arg(long, value_name = "FILE", conflicts_with_all = ["operation", "content"])]
    request: Option<PathBuf>,

    /// Print the built prompt and exit without calling the API.
    #[arg(long)]
    print_prompt: bool,
}

fn read_stdin() -> Result<String> {
    let mut input = String::new();
    std::io::stdin()
        .read_to_string(&mut input)
        .context("Failed to read stdin")?;
    Ok(input)
}

fn resolve_request(args: &CliArgs) -> Result<Option<ResearchRequest>> {
    if let Some(path) = &args.request {
        let body = if path == Path::new("-") {
            read_stdin()?
        } else {
            std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read request file {}", path.display()))?
        };
        return Ok(ResearchRequest::from_json(&body)?);
    }

    let content = match &args.content {
        Some(content) => content.clone(),
        None => read_stdin()?,
    };

    Ok(Some(ResearchRequest {
        operation: args.operation.clone(),
        content: Some(content),
    }))
}

async fn run(args: CliArgs) -> Result<()> {
    let request = resolve_request(&args)?;

    if args.print_prompt {
        println!("{}", prompts::build_prompt(request.as_ref())?);
        return Ok(());
    }

    let config = Config::from_env()?;
    info!("Using Gemini endpoint {}", config.gemini_api_url);

    // One connection pool for the lifetime of the process.
    let service = ResearchService::from_config(&config, reqwest::Client::new());
    let answer = service.process(request.as_ref()).await?;
    println!("{}", answer);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "research_assistant=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = CliArgs::parse();

    match run(args).await {
        Ok(()) => Ok(()),
        Err(e) => {
            error!("Research request failed: {:#}", e);
            std::process::exit(1);
        }
    }
}
