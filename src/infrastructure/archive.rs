//! アーカイブ作成の実装

mod zip_archiver;

pub use zip_archiver::ZipArchiver;
