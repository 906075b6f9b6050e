//! Footprint Intent — command-line front end for the tool intent classifier.
//!
//! Usage:
//!   footprint-intent detect "Is my password safe?"   Classify one message
//!   footprint-intent request req.json                Classify a JSON request
//!   footprint-intent tools                           List the tool registry
//!   footprint-intent chat                            Interactive chat session
//!   footprint-intent init-config                     Write the default config

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use footprint_intent::config::{self, DetectorConfig};
use footprint_intent::session::ChatSession;
use footprint_intent::{ConversationTurn, DetectionResult, ToolIntentClassifier, ToolRegistry};

// ---------------------------------------------------------------------------
// CLI definition
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(name = "footprint-intent")]
#[command(version = "0.1.0")]
#[command(about = "Suggest security tools from chat messages")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to the footprint home directory (defaults to ~/.footprint).
    #[arg(long)]
    home: Option<String>,

    /// Config file (defaults to <home>/detector.toml).
    #[arg(long)]
    config: Option<String>,

    /// Log level (trace, debug, info, warn, error). Overrides the config.
    #[arg(long)]
    log_level: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Classify a single message.
    Detect {
        /// The chat message to classify.
        message: String,

        /// JSON file holding prior turns: [{"role": "user", "text": "..."}].
        #[arg(long)]
        history: Option<PathBuf>,

        /// Print raw JSON instead of a formatted list.
        #[arg(long)]
        json: bool,
    },

    /// Classify a JSON request ({"message": ..., "history": [...]}) from a file or stdin.
    Request {
        /// Request file; reads stdin when omitted.
        file: Option<PathBuf>,
    },

    /// List the registered tools.
    Tools,

    /// Start an interactive chat session.
    Chat,

    /// Write the default configuration file.
    InitConfig {
        /// Overwrite an existing file.
        #[arg(long)]
        force: bool,
    },
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let home_dir = cli
        .home
        .as_deref()
        .map(config::resolve_path)
        .unwrap_or_else(config::default_home_dir);
    let config_path = cli
        .config
        .as_deref()
        .map(config::resolve_path)
        .unwrap_or_else(|| home_dir.join(config::CONFIG_FILE_NAME));
    let cfg = config::load_config(&config_path)
        .with_context(|| format!("Failed to load config from {}", config_path.display()))?;

    // Initialize logging
    let level = cli.log_level.as_deref().unwrap_or(&cfg.log_level);
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    if !config_path.exists() {
        debug!("No config at {}, using defaults", config_path.display());
    }

    if let Commands::InitConfig { force } = cli.command {
        return cmd_init_config(&config_path, force);
    }

    let registry = ToolRegistry::builtin().context("Failed to build tool registry")?;
    let classifier = ToolIntentClassifier::with_weights(&registry, cfg.scoring.clone())
        .context("Invalid scoring weights")?;

    match cli.command {
        Commands::Detect {
            message,
            history,
            json,
        } => cmd_detect(&classifier, &cfg, &message, history.as_deref(), json),
        Commands::Request { file } => cmd_request(&classifier, file.as_deref()),
        Commands::Tools => cmd_tools(&registry),
        Commands::Chat => cmd_chat(&classifier, &cfg).await,
        Commands::InitConfig { .. } => Ok(()),
    }
}

// ---------------------------------------------------------------------------
// Command implementations
// ---------------------------------------------------------------------------

fn cmd_detect(
    classifier: &ToolIntentClassifier<'_>,
    cfg: &DetectorConfig,
    message: &str,
    history_path: Option<&Path>,
    json: bool,
) -> Result<()> {
    let history = match history_path {
        Some(path) => load_history(path)?,
        None => Vec::new(),
    };

    let results = classifier.detect(message, &history);

    if json {
        println!("{}", serde_json::to_string_pretty(&results)?);
        return Ok(());
    }

    if results.is_empty() {
        println!("{}", "No tool detected.".dimmed());
        return Ok(());
    }
    for result in &results {
        print_detection(classifier.registry(), result, cfg.suggestion_threshold);
    }
    Ok(())
}

fn cmd_request(classifier: &ToolIntentClassifier<'_>, file: Option<&Path>) -> Result<()> {
    let raw = match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read request file {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read request from stdin")?;
            buf
        }
    };

    let request: serde_json::Value =
        serde_json::from_str(&raw).context("Request is not valid JSON")?;
    let results = classifier.detect_value(&request)?;
    println!("{}", serde_json::to_string_pretty(&results)?);
    Ok(())
}

fn cmd_tools(registry: &ToolRegistry) -> Result<()> {
    println!();
    println!("{}", "=== Registered Tools ===".bold());
    println!();
    for tool in registry.iter() {
        println!(
            "  {:<24} {}",
            tool.id.to_string().cyan(),
            tool.display_name.bold()
        );
        println!(
            "  {:<24} {} ({} triggers)",
            "",
            tool.description.dimmed(),
            tool.trigger_count()
        );
    }
    println!();
    Ok(())
}

async fn cmd_chat(classifier: &ToolIntentClassifier<'_>, cfg: &DetectorConfig) -> Result<()> {
    let mut session =
        ChatSession::with_limits(classifier, cfg.suggestion_threshold, cfg.history_limit);

    println!(
        "{} Chat session started (threshold {:.2}, up to {} suggestion(s) per message). Type {} for help.",
        ">>>".green().bold(),
        session.threshold(),
        classifier.weights().max_results,
        "/help".bold()
    );

    // Ctrl+C cancels the read loop instead of killing the process mid-line
    let cancel = CancellationToken::new();
    let ctrl_c_cancel = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            ctrl_c_cancel.cancel();
        }
    });

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("{} ", "you>".bold());
        std::io::stdout().flush()?;

        let line = tokio::select! {
            _ = cancel.cancelled() => {
                println!();
                break;
            }
            line = lines.next_line() => line.context("Failed to read from stdin")?,
        };
        let Some(line) = line else { break };
        let line = line.trim();

        match line {
            "" => continue,
            "/quit" | "/exit" => break,
            "/help" => {
                println!("  /assistant <text>  record an assistant reply");
                println!("  /history           show the conversation so far");
                println!("  /clear             forget the conversation");
                println!("  /quit              leave");
                continue;
            }
            "/history" => {
                for turn in session.history() {
                    println!("  {:>9}: {}", turn.role.to_string().dimmed(), turn.text);
                }
                continue;
            }
            "/clear" => {
                session.clear();
                info!("Conversation cleared");
                continue;
            }
            _ => {}
        }

        if let Some(reply) = line.strip_prefix("/assistant ") {
            session.assistant_message(reply);
            continue;
        }
        if line.starts_with('/') {
            warn!("Unknown command: {}", line);
            continue;
        }

        let suggestions = session.user_message(line);
        if suggestions.is_empty() {
            println!("  {}", "(no suggestion)".dimmed());
        }
        for result in &suggestions {
            print_detection(classifier.registry(), result, session.threshold());
        }
    }

    println!("{} Session ended.", "<<<".red().bold());
    Ok(())
}

fn cmd_init_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!(
            "Config already exists at {} (use --force to overwrite)",
            path.display()
        );
    }
    config::save_config(&DetectorConfig::default(), path)?;
    println!("Wrote default config to {}", path.display());
    Ok(())
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn load_history(path: &Path) -> Result<Vec<ConversationTurn>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read history file {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("History file {} is not a list of turns", path.display()))
}

fn print_detection(registry: &ToolRegistry, result: &DetectionResult, threshold: f64) {
    let name = registry
        .get(result.tool_id)
        .map(|t| t.display_name)
        .unwrap_or("unknown tool");
    let score = format!("{:.2}", result.confidence);
    let score = if result.confidence >= threshold {
        score.green()
    } else {
        score.yellow()
    };

    println!("  {} {} ({})", score, name.bold(), result.tool_id);
    for (field, value) in result.extracted_parameters.present() {
        println!("       {}: {}", field.dimmed(), value);
    }
}
