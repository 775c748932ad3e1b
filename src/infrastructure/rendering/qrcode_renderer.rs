use crate::domain::batch::{BatchError, ErrorCorrection, QrRenderer, QrSettings};
use image::{ImageBuffer, ImageFormat, Luma, imageops};
use qrcode::render::svg;
use qrcode::{EcLevel, QrCode};
use std::path::Path;
use tracing::{debug, error};

/// `qrcode` クレートを使ったQRコード描画
pub struct QrCodeRenderer {
    svg_min_size: u32,
}

impl Default for QrCodeRenderer {
    fn default() -> Self {
        Self { svg_min_size: 200 }
    }
}

impl QrCodeRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    fn encode(payload: &str, level: EcLevel) -> Result<QrCode, BatchError> {
        QrCode::with_error_correction_level(payload.as_bytes(), level).map_err(|e| {
            error!("Failed to encode QR payload '{}': {}", payload, e);
            BatchError::Render {
                payload: payload.to_string(),
                message: e.to_string(),
            }
        })
    }

    /// 一辺 `size` ピクセルちょうどの画像を描画する
    fn rasterize(code: &QrCode, size: u32) -> ImageBuffer<Luma<u8>, Vec<u8>> {
        let rendered = code
            .render::<Luma<u8>>()
            .max_dimensions(size, size)
            .build();

        if rendered.width() > size || rendered.height() > size {
            // Module count too high for the target size: scale down instead of clipping.
            return imageops::resize(&rendered, size, size, imageops::FilterType::Nearest);
        }

        // Center on a white canvas so every image has identical dimensions.
        let mut canvas = ImageBuffer::from_pixel(size, size, Luma([255u8]));
        let x = (size - rendered.width()) / 2;
        let y = (size - rendered.height()) / 2;
        imageops::overlay(&mut canvas, &rendered, i64::from(x), i64::from(y));
        canvas
    }
}

fn ec_level(level: ErrorCorrection) -> EcLevel {
    match level {
        ErrorCorrection::Low => EcLevel::L,
        ErrorCorrection::Medium => EcLevel::M,
        ErrorCorrection::Quartile => EcLevel::Q,
        ErrorCorrection::High => EcLevel::H,
    }
}

impl QrRenderer for QrCodeRenderer {
    fn write_png(
        &self,
        payload: &str,
        settings: &QrSettings,
        path: &Path,
    ) -> Result<(), BatchError> {
        let code = Self::encode(payload, ec_level(settings.error_correction))?;
        let image = Self::rasterize(&code, settings.size);

        image
            .save_with_format(path, ImageFormat::Png)
            .map_err(|e| BatchError::ArtifactWrite {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        debug!(
            path = %path.display(),
            level = %settings.error_correction,
            size = settings.size,
            "QR code written"
        );
        Ok(())
    }

    fn render_svg(&self, payload: &str) -> Result<String, BatchError> {
        let code = Self::encode(payload, EcLevel::M)?;
        let markup = code
            .render::<svg::Color>()
            .min_dimensions(self.svg_min_size, self.svg_min_size)
            .build();
        Ok(markup)
    }
}
