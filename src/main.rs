use batchscribe::batch::{BatchOptions, BatchRunner};
use batchscribe::config::{self, Config};
use batchscribe::convert::Converter;
use batchscribe::engine::WhisperEngine;
use batchscribe::enrich::{Enricher, OllamaGenerator};
use batchscribe::input::{self, UploadEntry};
use batchscribe::locale::UiLang;
use batchscribe::render;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "batchscribe")]
#[command(author, version, about = "Batch audio transcription with Whisper and Ollama enrichment", long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Transcribe audio files sequentially
    Transcribe {
        /// Audio files to transcribe, in order
        files: Vec<PathBuf>,

        /// Append a microphone capture to the queue
        #[arg(long)]
        recording: Option<PathBuf>,

        /// Derive a structured summary from each transcript
        #[arg(long)]
        summarize: bool,

        /// Derive a bullet list from each transcript
        #[arg(long)]
        bullets: bool,

        /// Interface language (it, en); defaults to the configured one
        #[arg(short, long)]
        language: Option<String>,

        /// Output format (text, json, html)
        #[arg(short, long, default_value = "text")]
        format: String,

        /// Write the rendered output to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Configure settings
    Config {
        /// Set the Whisper model (tiny, base, small, medium, large-v3)
        #[arg(long)]
        model: Option<String>,

        /// Set the default interface language (it, en)
        #[arg(long)]
        language: Option<String>,

        /// Set the Ollama model used for enrichment
        #[arg(long)]
        ollama_model: Option<String>,

        /// Show current configuration
        #[arg(long)]
        show: bool,
    },

    /// List supported interface languages
    Languages,
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("batchscribe=debug,whisper_rs=info")
    } else {
        EnvFilter::new("batchscribe=info,whisper_rs=warn")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Transcribe {
            files,
            recording,
            summarize,
            bullets,
            language,
            format,
            output,
        } => {
            transcribe(
                files, recording, summarize, bullets, language, format, output,
            )
            .await?;
        }

        Commands::Config {
            model,
            language,
            ollama_model,
            show,
        } => {
            if show {
                config::show()?;
            } else {
                config::update(model, language, ollama_model)?;
            }
        }

        Commands::Languages => {
            println!("Supported interface languages:\n");
            for (label, code) in UiLang::choices() {
                println!("  {}  {}", code, label);
            }
        }
    }

    Ok(())
}

#[allow(clippy::too_many_arguments)]
async fn transcribe(
    files: Vec<PathBuf>,
    recording: Option<PathBuf>,
    summarize: bool,
    bullets: bool,
    language: Option<String>,
    format: String,
    output: Option<PathBuf>,
) -> anyhow::Result<()> {
    let config = Config::load()?;
    let lang = UiLang::from_code(
        language
            .as_deref()
            .unwrap_or(&config.transcription.language),
    );

    let entries: Vec<UploadEntry> = files.into_iter().map(UploadEntry::Path).collect();
    let capture = recording.map(UploadEntry::Path);
    let (paths, status) = input::enqueue_recording(capture.as_ref(), &entries, lang);
    if capture.is_some() {
        println!("{}", status);
    }

    if paths.is_empty() {
        println!("{}", render::render_text(&[], summarize, bullets, lang));
        return Ok(());
    }

    let converter = Converter::new(config.conversion.clone());
    if paths.iter().any(|p| Converter::needs_conversion(p)) && !converter.is_available() {
        warn!(
            "Converter '{}' not found; non-WAV files will not be converted",
            config.conversion.converter
        );
    }

    let engine = WhisperEngine::from_config(&config)?;

    let enricher = (summarize || bullets)
        .then(|| Enricher::new(Box::new(OllamaGenerator::new(config.enrichment.clone()))));

    let opts = BatchOptions {
        summarize,
        bullets,
        lang,
    };
    let runner = BatchRunner::new(&engine, enricher.as_ref(), converter);
    let (html, results) = runner.transcribe(&paths, &opts).await;

    let rendered = match format.as_str() {
        "html" => html,
        "json" => serde_json::to_string_pretty(&results)?,
        _ => render::render_text(&results, summarize, bullets, lang),
    };

    match output {
        Some(path) => {
            std::fs::write(&path, rendered)?;
            info!("Results written to {}", path.display());
        }
        None => println!("{}", rendered),
    }

    Ok(())
}
