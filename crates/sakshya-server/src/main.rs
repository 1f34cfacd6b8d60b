//! sakshya server binary.
//!
//! Reads `config.toml` (or the path given with `--config`), overlays
//! `SAKSHYA__*` environment variables, and serves the analysis API over HTTP.
//!
//! ```sh
//! SAKSHYA__GEMINI__API_KEY=... cargo run -p sakshya-server --bin server
//! ```

use std::path::PathBuf;

use anyhow::Context as _;
use clap::Parser;
use sakshya_gemini::GeminiBackend;
use sakshya_ocr::DocumentReader;
use sakshya_server::{AppState, ServerConfig};
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Sakshya witness-statement analysis server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,

  /// Override the configured listen port.
  #[arg(short, long)]
  port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  let settings = config::Config::builder()
    .add_source(config::File::from(cli.config).required(false))
    .add_source(
      config::Environment::with_prefix("SAKSHYA")
        .separator("__")
        .try_parsing(true),
    )
    .build()
    .context("failed to read configuration")?;

  let mut server_cfg: ServerConfig = settings
    .try_deserialize()
    .context("failed to deserialise ServerConfig")?;

  if let Some(port) = cli.port {
    server_cfg.port = port;
  }
  if server_cfg.gemini.api_key.is_none() {
    server_cfg.gemini.api_key = std::env::var("GEMINI_API_KEY").ok();
  }

  let backend =
    GeminiBackend::from_config(&server_cfg.gemini).context("failed to build Gemini client")?;
  let reader =
    DocumentReader::from_config(&server_cfg.ocr).context("failed to build OCR engines")?;

  let address = format!("{}:{}", server_cfg.host, server_cfg.port);
  let app = sakshya_server::router(AppState::new(backend, reader, server_cfg));

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}
