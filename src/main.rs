use std::fs;
use std::io::IsTerminal;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{anyhow, bail, Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use strategy_generator::analysis::prompt::{build_instruction, DEFAULT_TOPIC};
use strategy_generator::analysis::schema::response_schema;
use strategy_generator::analysis::{AnalysisClient, AnalysisResult};
use strategy_generator::backend::GeminiBackend;
use strategy_generator::config::{Config, ConfigOverrides, KeySource};
use strategy_generator::keygate::{capability_from_config, KeyGate, SharedCredential};
use strategy_generator::output::json::{parse_saved, render_json, ResultDocument};
use strategy_generator::output::page::render_page;
use strategy_generator::output::text;
use strategy_generator::server::{run_server, ApiState};
use strategy_generator::view::{DisplayMode, ViewController, ViewPhase, ViewState};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
    Html,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum KeySourceArg {
    Env,
    Prompt,
    None,
}

impl From<KeySourceArg> for KeySource {
    fn from(value: KeySourceArg) -> Self {
        match value {
            KeySourceArg::Env => Self::Env,
            KeySourceArg::Prompt => Self::Prompt,
            KeySourceArg::None => Self::Disabled,
        }
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "strategy-generator",
    about = "Structured AI business strategy generator"
)]
struct Cli {
    #[arg(short, long)]
    config: Option<PathBuf>,
    #[arg(short, long, value_enum)]
    output: Option<OutputFormat>,
    #[arg(short, long)]
    model: Option<String>,
    #[arg(long)]
    mode: Option<DisplayMode>,
    #[arg(long = "key-source", value_enum)]
    key_source: Option<KeySourceArg>,
    #[arg(long = "no-color")]
    no_color: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Generate {
        #[arg(long = "topic-file")]
        topic_file: Option<PathBuf>,
        #[arg(long)]
        save: Option<PathBuf>,
    },
    Serve {
        #[arg(long)]
        bind: Option<String>,
        #[arg(long = "topic-file")]
        topic_file: Option<PathBuf>,
    },
    Render {
        #[arg(long)]
        input: PathBuf,
    },
    Schema,
    Prompt {
        #[arg(long = "topic-file")]
        topic_file: Option<PathBuf>,
    },
    Config {
        #[arg(long)]
        init: bool,
        #[arg(long)]
        show: bool,
    },
}

/// Settings shared by every command that prints a result.
struct Presentation {
    format: OutputFormat,
    mode: DisplayMode,
    color: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(Config::default_path);
    let mut config = Config::load(Some(&config_path))?;
    let bind = match &cli.command {
        Commands::Serve { bind, .. } => bind.clone(),
        _ => None,
    };
    config.apply_overrides(ConfigOverrides {
        model: cli.model.clone(),
        base_url: None,
        key_source: cli.key_source.map(Into::into),
        bind,
    });

    if matches!(cli.command, Commands::Config { .. }) {
        return handle_config_command(&cli.command, &config, &config_path);
    }
    let presentation = resolve_presentation(&cli, &config)?;

    match &cli.command {
        Commands::Generate { topic_file, save } => {
            let topic = load_topic(topic_file.as_deref())?;
            let (gate, client) = build_session(&config)?;
            let (result, generated_at) = run_generate(&gate, &client, &topic).await?;
            if let Some(path) = save {
                fs::write(path, render_json(&result)?)
                    .with_context(|| format!("failed writing result: {}", path.display()))?;
                info!(path = %path.display(), "saved analysis result");
            }
            print_result(&result, &presentation, &config.backend.model, generated_at)?;
        }
        Commands::Serve { topic_file, .. } => {
            let topic = load_topic(topic_file.as_deref())?;
            let addr: SocketAddr = config
                .server
                .bind
                .parse()
                .map_err(|e| anyhow!("invalid bind address {}: {e}", config.server.bind))?;
            let (gate, client) = build_session(&config)?;
            let mut controller = ViewController::new();
            controller.init(&gate).await;
            return run_server(ApiState::new(controller, client, &topic), addr).await;
        }
        Commands::Render { input } => {
            let raw = fs::read_to_string(input)
                .with_context(|| format!("failed reading saved result: {}", input.display()))?;
            let result = parse_saved(&raw)?;
            print_result(&result, &presentation, &config.backend.model, Utc::now())?;
        }
        Commands::Schema => println!("{}", render_json(response_schema())?),
        Commands::Prompt { topic_file } => {
            let topic = load_topic(topic_file.as_deref())?;
            println!("{}", build_instruction(&topic));
        }
        Commands::Config { .. } => {}
    }
    Ok(())
}

fn handle_config_command(command: &Commands, config: &Config, config_path: &Path) -> Result<()> {
    let Commands::Config { init, show } = command else {
        return Ok(());
    };
    if *init {
        Config::write_template(config_path)?;
        println!("Wrote config template to {}", config_path.display());
    }
    if *show || !*init {
        println!("{}", render_json(config)?);
    }
    Ok(())
}

fn resolve_presentation(cli: &Cli, config: &Config) -> Result<Presentation> {
    let format = match cli.output {
        Some(format) => format,
        None => OutputFormat::from_str(&config.output.format, true)
            .map_err(|e| anyhow!("invalid output format in config: {e}"))?,
    };
    let mode = match cli.mode {
        Some(mode) => mode,
        None => config.output.mode.parse::<DisplayMode>()?,
    };
    let color = config.output.color && !cli.no_color && std::io::stdout().is_terminal();
    Ok(Presentation {
        format,
        mode,
        color,
    })
}

fn load_topic(path: Option<&Path>) -> Result<String> {
    let Some(path) = path else {
        return Ok(DEFAULT_TOPIC.to_string());
    };
    let topic = fs::read_to_string(path)
        .with_context(|| format!("failed reading topic file: {}", path.display()))?;
    if topic.trim().is_empty() {
        bail!("topic file {} is empty", path.display());
    }
    Ok(topic)
}

fn build_session(config: &Config) -> Result<(Arc<KeyGate>, AnalysisClient)> {
    let credential = SharedCredential::new();
    let gate = Arc::new(KeyGate::new(capability_from_config(
        &config.key,
        credential.clone(),
    )));
    let backend = GeminiBackend::from_config(&config.backend, credential)?;
    info!(model = backend.model(), "using Gemini backend");
    let client = AnalysisClient::new(gate.clone(), Arc::new(backend));
    Ok((gate, client))
}

/// Drives one pass through the screen flow and returns the populated result.
async fn run_generate(
    gate: &KeyGate,
    client: &AnalysisClient,
    topic: &str,
) -> Result<(AnalysisResult, DateTime<Utc>)> {
    let mut controller = ViewController::new();
    controller.init(gate).await;
    if controller.phase() == ViewPhase::AwaitingKey {
        controller.select_key(gate).await?;
    }
    if let Some(err) = &controller.state().last_error {
        bail!("{err}");
    }

    info!("generating business strategy analysis");
    controller.generate(client, topic).await?;
    let state = controller.state();
    if let Some(err) = &state.last_error {
        bail!("{err}");
    }
    let result = state
        .analysis_result
        .clone()
        .ok_or_else(|| anyhow!("analysis finished without a result"))?;
    Ok((result, state.generated_at.unwrap_or_else(Utc::now)))
}

fn print_result(
    result: &AnalysisResult,
    presentation: &Presentation,
    model: &str,
    generated_at: DateTime<Utc>,
) -> Result<()> {
    let mode = effective_mode(result, presentation.mode);
    match presentation.format {
        OutputFormat::Text => println!("{}", text::render_mode(result, mode, presentation.color)),
        OutputFormat::Json => println!(
            "{}",
            render_json(&ResultDocument::new(result, model, mode, generated_at))?
        ),
        OutputFormat::Html => {
            let state = ViewState {
                analysis_result: Some(result.clone()),
                is_key_selected: true,
                display_mode: mode,
                generated_at: Some(generated_at),
                ..ViewState::default()
            };
            println!("{}", render_page(&state));
        }
    }
    Ok(())
}

fn effective_mode(result: &AnalysisResult, requested: DisplayMode) -> DisplayMode {
    let mut controller = ViewController::new();
    controller.complete(Ok(result.clone()));
    controller
        .switch_mode(requested)
        .unwrap_or(DisplayMode::Analysis)
}
