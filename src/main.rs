mod api;
mod server;

use clap::{Args, Parser, Subcommand};
use feed_analyzer::config::AnalyzerConfig;
use feed_analyzer::synthetic::{
    default_anchor, generate_performance_feed, FeedRequest, DEFAULT_FEED_SIZE,
};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "feed-analyzer", about = "Social feed sentiment and trend analyzer")]
struct Cli {
    /// Path to a TOML config file (defaults to config/analyzer.toml).
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    Analyze(AnalyzeArgs),
    Serve(ServeArgs),
    Generate(GenerateArgs),
}

#[derive(Args, Debug, Clone)]
struct AnalyzeArgs {
    /// Request JSON file; reads stdin when omitted.
    #[arg(long)]
    input: Option<PathBuf>,
    /// Overrides the request's time_window_minutes.
    #[arg(long)]
    window: Option<i64>,
    #[arg(long)]
    pretty: bool,
}

#[derive(Args, Debug, Clone)]
struct ServeArgs {
    #[arg(long)]
    host: Option<String>,
    #[arg(long)]
    port: Option<u16>,
}

#[derive(Args, Debug, Clone)]
struct GenerateArgs {
    #[arg(long, default_value_t = DEFAULT_FEED_SIZE)]
    count: usize,
    /// Output file; writes to stdout when omitted.
    #[arg(long)]
    output: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
    load_dotenv();
    init_tracing();
    if let Err(err) = run().await {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), String> {
    let cli = Cli::parse();
    let (mut config, config_path) = AnalyzerConfig::load(cli.config)?;
    if let Some(path) = config_path.filter(|path| path.exists()) {
        tracing::debug!(path = %path.display(), "loaded config");
    }

    match cli.command {
        Command::Analyze(args) => run_analyze(args, &config),
        Command::Serve(args) => {
            if let Some(host) = args.host {
                config.server.host = host;
            }
            if let Some(port) = args.port {
                config.server.port = port;
            }
            server::serve(config).await
        }
        Command::Generate(args) => run_generate(args),
    }
}

fn run_analyze(args: AnalyzeArgs, config: &AnalyzerConfig) -> Result<(), String> {
    let payload = read_input(args.input.as_deref())?;
    let mut request: FeedRequest = serde_json::from_str(&payload)
        .map_err(|err| format!("failed to parse request: {}", err))?;
    if let Some(window) = args.window {
        request.time_window_minutes = window;
    }

    let response = api::run_analysis(&request, &config.window)
        .map_err(|err| format!("{} ({})", err.error, err.code))?;

    let serialized = if args.pretty {
        serde_json::to_string_pretty(&response)
    } else {
        serde_json::to_string(&response)
    };
    let output = serialized.map_err(|err| format!("failed to serialize analysis: {}", err))?;
    println!("{}", output);
    Ok(())
}

fn run_generate(args: GenerateArgs) -> Result<(), String> {
    let request = generate_performance_feed(args.count, default_anchor());
    let payload = serde_json::to_string(&request)
        .map_err(|err| format!("failed to serialize feed: {}", err))?;

    match args.output {
        Some(path) => {
            std::fs::write(&path, payload)
                .map_err(|err| format!("failed to write feed: {}", err))?;
            tracing::info!(path = %path.display(), count = args.count, "wrote synthetic feed");
        }
        None => println!("{}", payload),
    }
    Ok(())
}

fn read_input(path: Option<&Path>) -> Result<String, String> {
    if let Some(path) = path {
        return std::fs::read_to_string(path)
            .map_err(|err| format!("failed reading {}: {}", path.display(), err));
    }

    let mut buffer = String::new();
    io::stdin()
        .read_to_string(&mut buffer)
        .map_err(|err| format!("failed reading stdin: {}", err))?;
    if buffer.trim().is_empty() {
        return Err("missing request: pass --input or pipe JSON on stdin".to_string());
    }
    Ok(buffer)
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn load_dotenv() {
    let _ = dotenvy::dotenv();
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    let manifest_path = Path::new(manifest_dir).join(".env");
    let _ = dotenvy::from_path(manifest_path);
}
