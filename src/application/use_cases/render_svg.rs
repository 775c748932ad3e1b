use crate::domain::batch::{BatchError, QrRenderer};
use std::sync::Arc;
use tracing::debug;

/// 固定ペイロードのQRコードを1つだけSVGで描画する
pub struct RenderSvgUseCase {
    renderer: Arc<dyn QrRenderer>,
    payload: String,
}

impl RenderSvgUseCase {
    pub fn new(renderer: Arc<dyn QrRenderer>, payload: impl Into<String>) -> Self {
        Self {
            renderer,
            payload: payload.into(),
        }
    }

    pub fn execute(&self) -> Result<String, BatchError> {
        debug!("Rendering SVG QR code for payload '{}'", self.payload);
        self.renderer.render_svg(&self.payload)
    }
}
