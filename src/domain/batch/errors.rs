use thiserror::Error;

#[derive(Error, Debug)]
pub enum BatchError {
    #[error("Failed to render QR code for payload '{payload}': {message}")]
    Render { payload: String, message: String },

    #[error("Failed to write artifact {path}: {message}")]
    ArtifactWrite { path: String, message: String },

    #[error("Archive operation failed: {0}")]
    Archive(String),

    #[error("Workbook generation failed: {0}")]
    Workbook(String),

    #[error("Requested count {requested} exceeds the limit of {limit}")]
    CountTooLarge { requested: usize, limit: usize },

    #[error("File system error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Background task failed: {0}")]
    Task(String),
}

impl BatchError {
    /// 呼び出し側の入力に起因するエラーかどうか
    pub fn is_client_error(&self) -> bool {
        matches!(self, BatchError::CountTooLarge { .. })
    }
}
