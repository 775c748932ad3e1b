//! Web インターフェース
//!
//! QRコードのPNGバッチ、SVG、Excelシートをダウンロードする
//! HTTPベースのAPIを提供します。

mod archive_body;
mod error_response;
mod handlers;

pub mod server;

pub(crate) use handlers::{AppState, download_excel, download_png, download_svg, hello};
