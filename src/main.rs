//! medsum CLI - summarise YouTube videos and trusted medical webpages
//!
//! The application logic is contained in lib.rs, and this file is responsible
//! for parsing arguments and handling top-level errors.

use clap::{Args, CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use medsum::{
    agent::OpenAIClient, logging, scraper::WebPageExtractor, transcript::YouTubeTranscripts, ui,
    ApiKey, Config, ModelName, Pipeline, Request,
};

#[derive(Parser)]
#[command(name = "medsum")]
#[command(author, version, about = "Summarise YouTube videos or trusted medical websites", long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Summarise a YouTube video or trusted medical webpage by URL
    Summarise {
        /// URL to summarise
        url: String,
        #[command(flatten)]
        options: SummariseOptions,
    },
    /// Print shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

#[derive(Args)]
struct SummariseOptions {
    /// OpenAI API key
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    api_key: Option<String>,
    /// Chat model
    #[arg(long, value_enum)]
    model: Option<ModelName>,
    /// Sampling temperature (0.0-1.0)
    #[arg(long)]
    temperature: Option<f32>,
    /// Maximum tokens in the summary (50-400)
    #[arg(long)]
    max_tokens: Option<u32>,
    /// Skip TLS certificate verification for webpage requests
    #[arg(long)]
    insecure: bool,
    /// Show raw extracted text instead of summary
    #[arg(long)]
    raw: bool,
}

type MedPipeline = Pipeline<YouTubeTranscripts, WebPageExtractor, OpenAIClient>;

fn build_pipeline(config: &Config) -> anyhow::Result<MedPipeline> {
    let transcripts = YouTubeTranscripts::new()?;
    let pages = WebPageExtractor::new(&config.fetch)?;
    let summarizer =
        OpenAIClient::new(config.agent.timeout())?.with_base_url(&config.agent.base_url);
    Ok(Pipeline::new(transcripts, pages, summarizer))
}

async fn summarise(pipeline: &MedPipeline, request: Request) -> anyhow::Result<()> {
    let summary = pipeline
        .run_with(request, |request, _| ui::print_parameters(request))
        .await?;
    ui::print_summary(&summary);
    Ok(())
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Some(Commands::Summarise { url, options }) => {
            let mut config = Config::load()?;
            config.fetch = config.fetch.insecure(options.insecure);
            let pipeline = build_pipeline(&config)?;

            let api_credential = options
                .api_key
                .map(ApiKey::new)
                .or_else(|| config.api_key())
                .unwrap_or_default();
            let request = Request::new(url, api_credential)
                .model(options.model.unwrap_or(config.agent.model))
                .temperature(options.temperature.unwrap_or(config.agent.temperature))
                .max_tokens(options.max_tokens.unwrap_or(config.agent.max_tokens));

            if options.raw {
                println!("Fetching: {}", request.raw_url);
                let doc = pipeline.extract(request).await?;
                let title = doc.title.as_deref().unwrap_or("No title");
                println!("\n=== {} ===\n", title);
                println!("{}", doc.text);
                println!("\n--- Extracted {} characters ---", doc.text.len());
            } else {
                summarise(&pipeline, request).await?;
            }
        }
        Some(Commands::Completions { shell }) => {
            clap_complete::generate(shell, &mut Cli::command(), "medsum", &mut std::io::stdout());
        }
        None => {
            // Default: interactive form
            let config = Config::load()?;
            let pipeline = build_pipeline(&config)?;
            let request = ui::prompt_request(&config)?;
            summarise(&pipeline, request).await?;
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = logging::init_tracing_subscriber(cli.verbose) {
        eprintln!("failed to initialise logging: {e}");
    }

    if let Err(e) = run(cli).await {
        ui::print_error(&e);
        std::process::exit(1);
    }
}
