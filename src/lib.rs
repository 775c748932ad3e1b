//! # QR Code Batch Server
//!
//! QRコード画像（PNGバッチ・SVG）と一意なコードを並べたExcelシートを
//! オンデマンドで生成するHTTPサービス
//!
//! 以下の層に分かれています：
//!
//! - **Domain Layer**: 識別子、成果物、アーカイブ、ワークブックのモデルとポート
//! - **Application Layer**: ユースケース
//! - **Infrastructure Layer**: QR描画、ZIP、XLSX、作業ディレクトリの実装
//! - **Interface Layer**: HTTP API

pub mod application;
pub mod debug;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;

pub use domain::*;

use domain::batch::QrSettings;
use std::path::PathBuf;

/// アプリケーション全体の設定
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// リクエストごとの作業ディレクトリを作る場所
    pub scratch_dir: PathBuf,
    /// PNGバッチ1回あたりの最大件数
    pub max_count: usize,
    /// Excelに書き込むコードの行数
    pub workbook_rows: usize,
    /// SVGエンドポイントがエンコードする内容
    pub svg_payload: String,
    pub qr: QrSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3010,
            scratch_dir: std::env::temp_dir().join("qrcode-batch"),
            max_count: 10_000,
            workbook_rows: 5000,
            svg_payload: "qrcode".to_string(),
            qr: QrSettings::default(),
        }
    }
}
