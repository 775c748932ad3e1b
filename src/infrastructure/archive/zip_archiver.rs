use crate::domain::batch::{ArchiveBundle, ArchiveWriter, BatchError};
use std::fs::{self, File};
use std::io;
use std::path::{Component, Path};
use tracing::{debug, error, info};
use zip::result::ZipError;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// ディレクトリを再帰的にZIPへ書き出すアーカイバ
///
/// エントリ名は `source` の親ディレクトリからの相対パスになる。
/// ディレクトリは末尾 `/` のエントリ、ファイルはDeflate圧縮で格納する。
pub struct ZipArchiver {
    compression: CompressionMethod,
}

impl Default for ZipArchiver {
    fn default() -> Self {
        Self {
            compression: CompressionMethod::Deflated,
        }
    }
}

impl ZipArchiver {
    pub fn new() -> Self {
        Self::default()
    }

    fn options(&self) -> SimpleFileOptions {
        SimpleFileOptions::default().compression_method(self.compression)
    }

    fn walk(
        &self,
        writer: &mut ZipWriter<File>,
        base: &Path,
        path: &Path,
        entries: &mut Vec<String>,
    ) -> Result<(), BatchError> {
        // シンボリックリンクは辿らない（ループ防止）
        let metadata = fs::symlink_metadata(path)?;
        if metadata.file_type().is_symlink() {
            debug!("Skipping symlink {}", path.display());
            return Ok(());
        }
        let name = entry_name(base, path)?;

        if metadata.is_dir() {
            let dir_name = format!("{}/", name);
            writer
                .add_directory(dir_name.as_str(), self.options())
                .map_err(|e| archive_error(&dir_name, e))?;
            entries.push(dir_name);

            let mut children = fs::read_dir(path)?
                .map(|entry| entry.map(|e| e.path()))
                .collect::<Result<Vec<_>, io::Error>>()?;
            children.sort();

            for child in children {
                self.walk(writer, base, &child, entries)?;
            }
        } else {
            writer
                .start_file(name.as_str(), self.options())
                .map_err(|e| archive_error(&name, e))?;

            let mut file = File::open(path)?;
            io::copy(&mut file, writer)?;
            entries.push(name);
        }

        Ok(())
    }
}

impl ArchiveWriter for ZipArchiver {
    fn archive_dir(&self, source: &Path, target: &Path) -> Result<ArchiveBundle, BatchError> {
        let base = source.parent().unwrap_or_else(|| Path::new(""));
        let file = File::create(target)?;
        let mut writer = ZipWriter::new(file);
        let mut entries = Vec::new();

        self.walk(&mut writer, base, source, &mut entries)?;

        writer.finish().map_err(|e| {
            error!("Failed to finalize archive {}: {}", target.display(), e);
            BatchError::Archive(format!("Failed to finalize {}: {}", target.display(), e))
        })?;

        info!(
            archive = %target.display(),
            entries = entries.len(),
            "Archive created"
        );

        Ok(ArchiveBundle {
            path: target.to_path_buf(),
            entries,
        })
    }
}

/// `base` からの相対パスを `/` 区切りのエントリ名に変換する
fn entry_name(base: &Path, path: &Path) -> Result<String, BatchError> {
    let relative = path.strip_prefix(base).map_err(|_| {
        BatchError::Archive(format!(
            "{} is not inside {}",
            path.display(),
            base.display()
        ))
    })?;

    let parts: Vec<String> = relative
        .components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();

    if parts.is_empty() {
        return Err(BatchError::Archive(format!(
            "Cannot derive an entry name for {}",
            path.display()
        )));
    }

    Ok(parts.join("/"))
}

fn archive_error(name: &str, e: ZipError) -> BatchError {
    debug!("Zip error on entry {}: {:?}", name, e);
    BatchError::Archive(format!("Failed to add entry {}: {}", name, e))
}
