//! QRコードバッチ集約のエンティティ
//!
//! 1リクエストの間だけ存在する成果物、アーカイブ、ワークブックを定義

use super::value_objects::{ArtifactId, RowCode};
use std::path::{Path, PathBuf};

/// PNGアーカイブ内のディレクトリ名
pub const ARTIFACT_DIR_NAME: &str = "qrcode";

/// PNGアーカイブのファイル名
pub const ARCHIVE_FILE_NAME: &str = "qrcode.zip";

/// Excelダウンロードのファイル名
pub const WORKBOOK_FILE_NAME: &str = "qrcode-file.xlsx";

/// ワークブックの見出しセル
pub const WORKBOOK_HEADER: &str = "Codes";

/// 生成された1つのQRコード画像
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub id: ArtifactId,
    pub sequence_index: usize,
    pub path: PathBuf,
}

impl Artifact {
    /// 連番とIDから `{index}-{id}.png` のファイル名を決める
    pub fn file_name_for(sequence_index: usize, id: &ArtifactId) -> String {
        format!("{}-{}.png", sequence_index, id)
    }

    /// `dir` 配下に置かれる成果物を組み立てる
    pub fn in_dir(dir: &Path, sequence_index: usize) -> Self {
        let id = ArtifactId::generate();
        let path = dir.join(Self::file_name_for(sequence_index, &id));
        Self {
            id,
            sequence_index,
            path,
        }
    }

    /// QRコードにエンコードする内容
    pub fn payload(&self) -> String {
        self.sequence_index.to_string()
    }

    pub fn file_name(&self) -> String {
        Self::file_name_for(self.sequence_index, &self.id)
    }
}

/// 成果物をまとめたアーカイブ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveBundle {
    pub path: PathBuf,
    /// 書き込んだ順のエントリ名（ディレクトリは末尾に `/`）
    pub entries: Vec<String>,
}

impl ArchiveBundle {
    pub fn file_entries(&self) -> impl Iterator<Item = &str> {
        self.entries
            .iter()
            .map(String::as_str)
            .filter(|name| !name.ends_with('/'))
    }

    pub fn file_count(&self) -> usize {
        self.file_entries().count()
    }
}

/// 見出し1行と一意なコード列からなるワークブック
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workbook {
    pub header: String,
    pub rows: Vec<RowCode>,
}

impl Workbook {
    /// `row_count` 個の新しいコードでワークブックを作成
    pub fn generate(row_count: usize) -> Self {
        Self {
            header: WORKBOOK_HEADER.to_string(),
            rows: (0..row_count).map(|_| RowCode::generate()).collect(),
        }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}
