//! デバッグとログ機能
//!
//! プロジェクト全体のログ初期化と計測用ヘルパーを提供

use std::fs;
use std::path::PathBuf;
use tracing::{Level, debug, info};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::EnvFilter;

/// デバッグ設定
#[derive(Debug, Clone)]
pub struct DebugConfig {
    /// ログレベル
    pub log_level: Level,
    /// ファイルログの出力先。`None` の場合はコンソールに出力する
    pub log_directory: Option<PathBuf>,
    /// JSONフォーマットを使用するか
    pub use_json_format: bool,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: Level::INFO,
            log_directory: None,
            use_json_format: false,
        }
    }
}

impl DebugConfig {
    /// 開発環境用の設定
    pub fn development() -> Self {
        Self {
            log_level: Level::DEBUG,
            ..Self::default()
        }
    }

    /// 本番環境用の設定
    pub fn production(log_directory: PathBuf) -> Self {
        Self {
            log_level: Level::INFO,
            log_directory: Some(log_directory),
            use_json_format: true,
        }
    }

    fn default_directive(&self) -> String {
        format!(
            "qrcode_batch_server={level},tower_http={level}",
            level = self.log_level
        )
    }
}

/// ログシステムを初期化
pub fn init_logging(
    config: &DebugConfig,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // 環境変数からのフィルター設定
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(config.default_directive())?,
    };

    match &config.log_directory {
        Some(directory) => {
            fs::create_dir_all(directory)?;
            let file_appender =
                RollingFileAppender::new(Rotation::DAILY, directory, "qrcode-batch-server.log");

            if config.use_json_format {
                tracing_subscriber::fmt()
                    .with_env_filter(env_filter)
                    .with_writer(file_appender)
                    .json()
                    .try_init()?;
            } else {
                tracing_subscriber::fmt()
                    .with_env_filter(env_filter)
                    .with_writer(file_appender)
                    .with_ansi(false)
                    .try_init()?;
            }
        }
        None if config.use_json_format => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .json()
                .try_init()?;
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_target(true)
                .with_thread_ids(true)
                .try_init()?;
        }
    }

    info!("ログシステムが初期化されました");
    debug!("デバッグ設定: {:?}", config);

    Ok(())
}

/// パフォーマンス測定用のマクロ
#[macro_export]
macro_rules! measure_time {
    ($name:expr, $block:block) => {{
        let start = std::time::Instant::now();
        let result = $block;
        let duration = start.elapsed();
        tracing::info!(
            operation = $name,
            duration_ms = duration.as_millis(),
            "操作完了"
        );
        result
    }};
}

/// デバッグ用のヘルパー関数
pub mod debug_helpers {
    use tracing::{error, info};

    /// 起動時の環境情報をログに出力
    pub fn log_system_info() {
        info!("=== システム情報 ===");
        info!("OS: {}", std::env::consts::OS);
        info!("アーキテクチャ: {}", std::env::consts::ARCH);
        info!("プロジェクトバージョン: {}", env!("CARGO_PKG_VERSION"));
    }

    /// エラーの詳細情報をログに出力
    pub fn log_error_details(error: &dyn std::error::Error, context: &str) {
        error!(
            context = context,
            error = %error,
            "エラーが発生しました"
        );

        // エラーチェーンをログに出力
        let mut source = error.source();
        let mut level = 1;
        while let Some(err) = source {
            error!(
                context = context,
                level = level,
                source_error = %err,
                "エラーの原因"
            );
            source = err.source();
            level += 1;
        }
    }
}
