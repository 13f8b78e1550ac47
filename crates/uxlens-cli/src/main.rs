//! uxlens CLI — AI design critique for screenshots.

mod render;

use anyhow::Result;
use clap::{Parser, Subcommand};
use render::{render_history_line, render_report};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use uxlens_api::GeminiClient;
use uxlens_config::{CliOverrides, UxlensConfig};
use uxlens_core::{AuditPipeline, PipelineEvent};
use uxlens_store::SessionCache;
use uxlens_types::{DesignCategory, Language};

#[derive(Parser)]
#[command(name = "uxlens", version, about = "AI design critique for screenshots")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Model to use
    #[arg(long, global = true)]
    model: Option<String>,

    /// API key (overrides GEMINI_API_KEY)
    #[arg(long, global = true)]
    api_key: Option<String>,

    /// Audit timeout in seconds
    #[arg(long, global = true)]
    timeout_secs: Option<u64>,

    /// Enable verbose/debug logging
    #[arg(long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Audit a screenshot and save the result to history
    Audit {
        /// Path to the screenshot (PNG, JPEG, WebP, or GIF)
        image: PathBuf,

        /// Design category lens for the critique
        #[arg(long)]
        category: Option<DesignCategory>,

        /// Output language for the report
        #[arg(long)]
        language: Option<Language>,
    },
    /// List saved audits, newest first
    History,
    /// Show a saved audit by ID prefix
    Show {
        /// Session ID prefix (must be unambiguous)
        prefix: String,
    },
    /// Delete all saved audits
    Clear {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with_writer(io::stderr)
        .init();

    let config = UxlensConfig::load(CliOverrides {
        api_key: cli.api_key,
        model: cli.model,
        timeout_secs: cli.timeout_secs,
    })
    .map_err(|e| anyhow::anyhow!("{e}"))?;

    let mut cache = SessionCache::new(config.data_dir.clone())
        .await
        .map_err(|e| anyhow::anyhow!("{e}"))?;
    cache.restore();

    match cli.command {
        Command::Audit {
            image,
            category,
            language,
        } => {
            run_audit(
                &config,
                &mut cache,
                &image,
                category.unwrap_or(config.default_category),
                language.unwrap_or(config.default_language),
            )
            .await
        }
        Command::History => {
            show_history(&cache);
            Ok(())
        }
        Command::Show { prefix } => show_session(&mut cache, &prefix).await,
        Command::Clear { yes } => clear_history(&mut cache, yes).await,
    }
}

async fn run_audit(
    config: &UxlensConfig,
    cache: &mut SessionCache,
    image: &std::path::Path,
    category: DesignCategory,
    language: Language,
) -> Result<()> {
    let client = GeminiClient::new(&config.api_key, &config.model)
        .map_err(|e| anyhow::anyhow!("{e}"))?
        .with_base_url(&config.base_url);

    let pipeline = AuditPipeline::new(Arc::new(client))
        .with_timeout(Duration::from_secs(config.timeout_secs));

    let session = pipeline
        .run(image, category, language, |event| match event {
            PipelineEvent::Encoding { path } => {
                eprintln!("Encoding {}...", path.display());
            }
            PipelineEvent::Auditing { auditor } => {
                eprintln!("Requesting critique from {auditor} ({})...", config.model);
            }
            PipelineEvent::Done => {}
        })
        .await
        .map_err(|e| anyhow::anyhow!("{e}"))?;

    println!("{}", render_report(&session.report));
    eprintln!(
        "Saved as {} ({}, {})",
        &session.id[..8.min(session.id.len())],
        category.as_str(),
        session.report.headline()
    );

    cache.create(session).await;
    Ok(())
}

fn show_history(cache: &SessionCache) {
    if cache.is_empty() {
        eprintln!("No saved audits. Run `uxlens audit <image>` to create one.");
        return;
    }
    eprintln!("Saved audits:");
    for record in cache.records() {
        println!("{}", render_history_line(record));
    }
}

async fn show_session(cache: &mut SessionCache, prefix: &str) -> Result<()> {
    let id = cache
        .find_by_prefix(prefix)
        .map_err(|e| anyhow::anyhow!("{e}"))?
        .id
        .clone();

    let view = cache.select(&id).await.map_err(|e| anyhow::anyhow!("{e}"))?;

    eprintln!(
        "Audit {} ({}, {})",
        view.record.short_id(),
        view.record.category.as_str(),
        view.record.age()
    );
    if view.degraded {
        eprintln!("Full-resolution image is no longer stored; thumbnail only.");
    }
    println!("{}", render_report(&view.record.report));
    Ok(())
}

async fn clear_history(cache: &mut SessionCache, yes: bool) -> Result<()> {
    if cache.is_empty() {
        eprintln!("History is already empty.");
        return Ok(());
    }

    if !yes {
        eprint!(
            "This permanently deletes {} saved audit(s). Type 'yes' to confirm: ",
            cache.len()
        );
        io::stderr().flush()?;

        let mut input = String::new();
        io::stdin().lock().read_line(&mut input)?;
        if input.trim() != "yes" {
            eprintln!("Aborted.");
            return Ok(());
        }
    }

    cache.clear_all().await;
    eprintln!("History cleared.");
    Ok(())
}
