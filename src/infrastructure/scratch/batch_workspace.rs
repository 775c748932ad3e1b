use crate::domain::batch::{ARCHIVE_FILE_NAME, ARTIFACT_DIR_NAME, BatchError};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use uuid::Uuid;

/// 1リクエスト分の作業ディレクトリ
///
/// `<scratch_root>/<uuid>/qrcode/` に成果物を置き、`<scratch_root>/<uuid>/qrcode.zip` に
/// アーカイブを書き出す。値が破棄されると中身ごと削除される。
#[derive(Debug)]
pub struct BatchWorkspace {
    id: Uuid,
    root: PathBuf,
    artifact_dir: PathBuf,
    archive_path: PathBuf,
}

impl BatchWorkspace {
    /// `scratch_root` の下に新しい作業ディレクトリを作成する
    pub fn create(scratch_root: &Path) -> Result<Self, BatchError> {
        let id = Uuid::new_v4();
        let root = scratch_root.join(id.to_string());
        let artifact_dir = root.join(ARTIFACT_DIR_NAME);
        let archive_path = root.join(ARCHIVE_FILE_NAME);

        fs::create_dir_all(&artifact_dir)?;
        debug!(workspace = %id, path = %root.display(), "Workspace created");

        Ok(Self {
            id,
            root,
            artifact_dir,
            archive_path,
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn artifact_dir(&self) -> &Path {
        &self.artifact_dir
    }

    pub fn archive_path(&self) -> &Path {
        &self.archive_path
    }

    /// アーカイブと成果物を削除する。失敗はログに残すだけで呼び出し元には返さない。
    fn cleanup(&self) {
        if let Err(e) = fs::remove_file(&self.archive_path)
            && e.kind() != io::ErrorKind::NotFound
        {
            warn!(
                workspace = %self.id,
                "Failed to remove archive {}: {}",
                self.archive_path.display(),
                e
            );
        }

        let pattern = format!(
            "{}/*",
            glob::Pattern::escape(&self.artifact_dir.to_string_lossy())
        );
        match remove_glob(&pattern) {
            Ok(removed) => debug!(workspace = %self.id, removed, "Artifacts removed"),
            Err(e) => warn!(workspace = %self.id, "Failed to remove artifacts: {}", e),
        }

        if let Err(e) = fs::remove_dir_all(&self.root)
            && e.kind() != io::ErrorKind::NotFound
        {
            warn!(
                workspace = %self.id,
                "Failed to remove workspace {}: {}",
                self.root.display(),
                e
            );
        }
    }
}

impl Drop for BatchWorkspace {
    fn drop(&mut self) {
        self.cleanup();
    }
}

/// グロブに一致するファイルとディレクトリをすべて削除し、削除した件数を返す
pub fn remove_glob(pattern: &str) -> Result<usize, BatchError> {
    let paths = glob::glob(pattern)
        .map_err(|e| BatchError::Io(io::Error::new(io::ErrorKind::InvalidInput, e)))?;

    let mut removed = 0;
    for entry in paths {
        let path = entry.map_err(|e| BatchError::Io(e.into()))?;
        if path.is_dir() {
            fs::remove_dir_all(&path)?;
        } else {
            fs::remove_file(&path)?;
        }
        removed += 1;
    }

    Ok(removed)
}
