use clap::{Args, Parser, Subcommand};
use qrcode_batch_server::AppConfig;
use qrcode_batch_server::debug::DebugConfig;
use std::path::PathBuf;
use tracing::Level;

#[derive(Parser, Debug)]
#[command(
    name = "qrcode-batch-server",
    version,
    about = "Generate QR code batches, SVG codes and Excel code sheets over HTTP"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the HTTP server
    #[command(alias = "run")]
    Serve(ServeArgs),
}

#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Host to bind the web server to
    #[arg(short = 'H', long, env = "QRCODE_HOST", default_value = "0.0.0.0")]
    pub host: String,
    /// Port to bind the web server to
    #[arg(short, long, env = "QRCODE_PORT", default_value = "3010")]
    pub port: u16,
    /// Directory where per-request workspaces are created
    #[arg(long, env = "QRCODE_SCRATCH_DIR")]
    pub scratch_dir: Option<PathBuf>,
    /// Largest accepted total for /download-png
    #[arg(long, env = "QRCODE_MAX_COUNT", default_value = "10000")]
    pub max_count: usize,
    /// Number of codes written by /download-excel
    #[arg(long, env = "QRCODE_WORKBOOK_ROWS", default_value = "5000")]
    pub workbook_rows: usize,
    /// Content encoded by /download-svg
    #[arg(long, env = "QRCODE_SVG_PAYLOAD", default_value = "qrcode")]
    pub svg_payload: String,
    /// Write daily-rotated JSON logs into this directory instead of the console
    #[arg(long, env = "QRCODE_LOG_DIR")]
    pub log_dir: Option<PathBuf>,
    /// Emit logs as JSON
    #[arg(long, env = "QRCODE_LOG_JSON")]
    pub json_logs: bool,
    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl ServeArgs {
    /// ログ出力先があれば本番用、`--verbose` なら開発用の設定を基にする
    pub fn debug_config(&self) -> DebugConfig {
        let mut config = match (&self.log_dir, self.verbose) {
            (Some(dir), _) => DebugConfig::production(dir.clone()),
            (None, true) => DebugConfig::development(),
            (None, false) => DebugConfig::default(),
        };
        if self.verbose {
            config.log_level = Level::DEBUG;
        }
        config.use_json_format |= self.json_logs;
        config
    }

    pub fn into_app_config(self) -> AppConfig {
        let defaults = AppConfig::default();
        AppConfig {
            host: self.host,
            port: self.port,
            scratch_dir: self.scratch_dir.unwrap_or(defaults.scratch_dir),
            max_count: self.max_count,
            workbook_rows: self.workbook_rows,
            svg_payload: self.svg_payload,
            qr: defaults.qr,
        }
    }
}
