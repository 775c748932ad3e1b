use crate::infrastructure::scratch::BatchWorkspace;
use axum::body::Bytes;
use std::io;
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::fs::File;
use tokio_stream::Stream;
use tokio_util::io::ReaderStream;

/// アーカイブファイルを読み出すストリーム
///
/// 作業ディレクトリを所有しているため、レスポンスボディの送信が完了するか
/// 途中で破棄された時点で成果物とアーカイブが削除される。
pub struct ArchiveStream {
    inner: ReaderStream<File>,
    _workspace: BatchWorkspace,
}

impl ArchiveStream {
    pub fn new(file: File, workspace: BatchWorkspace) -> Self {
        Self {
            inner: ReaderStream::new(file),
            _workspace: workspace,
        }
    }
}

impl Stream for ArchiveStream {
    type Item = io::Result<Bytes>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Pin::new(&mut self.get_mut().inner).poll_next(cx)
    }
}
