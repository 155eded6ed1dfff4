use clap::{Parser, Subcommand};
use sentimen::commands::{self, CommandOutput};
use sentimen_application::config::{load_config_or_default, Config, LogFormat};
use std::io::Read;
use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "sentimen")]
#[command(about = "Sentiment classification with a persisted result cache.", version)]
struct Cli {
    /// Config file path (TOML). If omitted, uses env SENTIMEN_CONFIG, then built-in defaults.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print machine-readable JSON instead of text.
    #[arg(long, global = true)]
    json: bool,

    /// Prometheus listener (host:port). If omitted, uses env SENTIMEN_METRICS_ADDR.
    #[arg(long, global = true)]
    metrics_addr: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Classify one text (read from stdin when --text is omitted).
    Classify {
        #[arg(long)]
        text: Option<String>,
    },
    /// Label every row of a CSV file.
    Batch {
        #[arg(long)]
        input: PathBuf,
        /// Write the labelled CSV here instead of stdout.
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Show the label distribution.
    Stats,
    /// Show model artifacts, fingerprints and store locations.
    Info,
}

fn main() {
    let cli = Cli::parse();

    let config_path = cli
        .config
        .clone()
        .or_else(|| env_non_empty("SENTIMEN_CONFIG").map(PathBuf::from));
    let config = match load_config_or_default(config_path.as_deref()) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(1);
        }
    };

    if let Err(err) = init_tracing(&config) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
    let metrics_addr = cli
        .metrics_addr
        .clone()
        .or_else(|| env_non_empty("SENTIMEN_METRICS_ADDR"));
    if let Err(err) = init_metrics(metrics_addr.as_deref()) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }

    match run(&cli, &config) {
        Ok(output) => {
            if let Some(notice) = output.notice {
                eprintln!("{notice}");
            }
            if !output.stdout.is_empty() {
                println!("{}", output.stdout);
            }
        }
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(1);
        }
    }
}

fn run(cli: &Cli, config: &Config) -> Result<CommandOutput, String> {
    let name = match &cli.command {
        Command::Classify { .. } => "classify",
        Command::Batch { .. } => "batch",
        Command::Stats => "stats",
        Command::Info => "info",
    };
    metrics::counter!("sentimen.cli.commands_total", "command" => name).increment(1);
    let _span = tracing::info_span!("command", name).entered();

    match &cli.command {
        Command::Classify { text } => {
            let text = match text {
                Some(text) => text.clone(),
                None => read_stdin_text()?,
            };
            commands::classify(config, &text, cli.json)
        }
        Command::Batch { input, out } => commands::batch(config, input, out.as_deref(), cli.json),
        Command::Stats => commands::stats(config, cli.json),
        Command::Info => commands::info(config, cli.json),
    }
}

fn read_stdin_text() -> Result<String, String> {
    let mut buf = String::new();
    std::io::stdin()
        .read_to_string(&mut buf)
        .map_err(|err| format!("failed to read text from stdin: {err}"))?;
    Ok(buf.trim_end_matches(['\r', '\n']).to_string())
}

fn env_non_empty(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn init_tracing(config: &Config) -> Result<(), String> {
    let filter = env_non_empty("SENTIMEN_LOG").unwrap_or_else(|| config.logging.level.clone());
    let env_filter = tracing_subscriber::EnvFilter::try_new(filter)
        .map_err(|err| format!("invalid log filter: {err}"))?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr);
    match config.logging.format {
        LogFormat::Text => builder.init(),
        LogFormat::Json => builder.json().init(),
    }

    Ok(())
}

#[cfg(feature = "prometheus")]
fn init_metrics(raw: Option<&str>) -> Result<Option<SocketAddr>, String> {
    use metrics_exporter_prometheus::PrometheusBuilder;

    let Some(raw) = raw.filter(|v| !v.trim().is_empty()) else {
        return Ok(None);
    };

    let addr: SocketAddr = raw
        .parse()
        .map_err(|err| format!("invalid metrics address (expected host:port): {err}"))?;

    PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()
        .map_err(|err| format!("failed to install prometheus exporter: {err}"))?;

    tracing::info!(metrics_addr = %addr, "prometheus metrics exporter enabled");
    Ok(Some(addr))
}

#[cfg(not(feature = "prometheus"))]
fn init_metrics(raw: Option<&str>) -> Result<Option<SocketAddr>, String> {
    if raw.is_some_and(|v| !v.trim().is_empty()) {
        tracing::warn!("metrics address ignored; built without the prometheus feature");
    }
    Ok(None)
}
