//! QRコードバッチ集約の値オブジェクト
//!
//! 成果物の識別子、生成リクエスト、QRコードの描画設定を定義

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::IntErrorKind;
use std::str::FromStr;
use ulid::Ulid;
use uuid::Uuid;

/// 成果物ファイル名に使う短くソート可能な識別子
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ArtifactId(Ulid);

impl ArtifactId {
    /// 新しいIDを生成
    pub fn generate() -> Self {
        Self(Ulid::new())
    }

    /// 文字列から作成
    pub fn parse(s: &str) -> Result<Self, String> {
        let ulid = Ulid::from_string(s).map_err(|e| format!("Invalid ULID format: {}", e))?;
        Ok(Self(ulid))
    }

    /// 文字列として取得
    pub fn as_str(&self) -> String {
        self.0.to_string()
    }
}

impl FromStr for ArtifactId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for ArtifactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// スプレッドシートの1行に書き込む汎用の一意なコード
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RowCode(Uuid);

impl RowCode {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl fmt::Display for RowCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for RowCode {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

/// PNGバッチ生成のリクエスト
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub count: usize,
}

impl GenerationRequest {
    pub fn new(count: usize) -> Self {
        Self { count }
    }

    /// パスセグメントから件数を解釈する
    ///
    /// 数値として解釈できない値と負数は 0 件として扱う。
    /// 桁あふれする正の数は `usize::MAX` に丸め、上限チェックで弾かれるようにする。
    pub fn from_path_segment(segment: &str) -> Self {
        let count = match segment.trim().parse::<i64>() {
            Ok(n) => usize::try_from(n).unwrap_or(0),
            Err(e) if *e.kind() == IntErrorKind::PosOverflow => usize::MAX,
            Err(_) => 0,
        };
        Self { count }
    }

    /// 件数が上限を超えていないかチェック
    pub fn within_limit(&self, limit: usize) -> bool {
        self.count <= limit
    }
}

/// QRコードの誤り訂正レベル
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorCorrection {
    Low,
    Medium,
    Quartile,
    High,
}

impl fmt::Display for ErrorCorrection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let level = match self {
            Self::Low => "L",
            Self::Medium => "M",
            Self::Quartile => "Q",
            Self::High => "H",
        };
        write!(f, "{}", level)
    }
}

/// ラスター画像として描画する際の設定
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QrSettings {
    pub error_correction: ErrorCorrection,
    /// 出力画像の一辺のピクセル数
    pub size: u32,
}

impl Default for QrSettings {
    fn default() -> Self {
        Self {
            error_correction: ErrorCorrection::Medium,
            size: 256,
        }
    }
}
