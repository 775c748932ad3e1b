//! QRコード描画の実装

mod qrcode_renderer;

pub use qrcode_renderer::QrCodeRenderer;
