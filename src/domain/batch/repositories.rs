use super::entities::{ArchiveBundle, Workbook};
use super::errors::BatchError;
use super::value_objects::QrSettings;
use std::path::Path;

/// QRコードを描画する
pub trait QrRenderer: Send + Sync {
    /// `payload` をPNG画像として `path` に書き出す
    fn write_png(&self, payload: &str, settings: &QrSettings, path: &Path)
    -> Result<(), BatchError>;

    /// `payload` をSVGマークアップとして返す
    fn render_svg(&self, payload: &str) -> Result<String, BatchError>;
}

/// ディレクトリをアーカイブにまとめる
pub trait ArchiveWriter: Send + Sync {
    fn archive_dir(&self, source: &Path, target: &Path) -> Result<ArchiveBundle, BatchError>;
}

/// ワークブックをバイナリ形式にシリアライズする
pub trait WorkbookEncoder: Send + Sync {
    fn encode(&self, workbook: &Workbook) -> Result<Vec<u8>, BatchError>;
}
