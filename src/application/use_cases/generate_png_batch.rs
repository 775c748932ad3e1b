use crate::domain::batch::{
    ArchiveBundle, ArchiveWriter, Artifact, BatchError, GenerationRequest, QrRenderer, QrSettings,
};
use crate::infrastructure::scratch::BatchWorkspace;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info, info_span};

/// 生成済みのアーカイブと、それを保持する作業ディレクトリ
///
/// `workspace` が破棄されるとアーカイブも成果物も削除されるため、
/// レスポンスの送信が終わるまで保持しておくこと。
#[derive(Debug)]
pub struct PreparedArchive {
    pub workspace: BatchWorkspace,
    pub bundle: ArchiveBundle,
}

/// 指定件数のQRコードPNGを生成し、1つのZIPにまとめる
pub struct GeneratePngBatchUseCase {
    renderer: Arc<dyn QrRenderer>,
    archiver: Arc<dyn ArchiveWriter>,
    scratch_root: PathBuf,
    settings: QrSettings,
    max_count: usize,
}

impl GeneratePngBatchUseCase {
    pub fn new(
        renderer: Arc<dyn QrRenderer>,
        archiver: Arc<dyn ArchiveWriter>,
        scratch_root: PathBuf,
        settings: QrSettings,
        max_count: usize,
    ) -> Self {
        Self {
            renderer,
            archiver,
            scratch_root,
            settings,
            max_count,
        }
    }

    /// バッチを生成する。最初の描画・書き込みエラーで中断する。
    pub fn execute(&self, request: GenerationRequest) -> Result<PreparedArchive, BatchError> {
        if !request.within_limit(self.max_count) {
            return Err(BatchError::CountTooLarge {
                requested: request.count,
                limit: self.max_count,
            });
        }

        let workspace = BatchWorkspace::create(&self.scratch_root)?;
        let span = info_span!("png_batch", workspace = %workspace.id(), count = request.count);
        let _guard = span.enter();

        info!("Generating {} QR codes", request.count);
        for index in 0..request.count {
            let artifact = Artifact::in_dir(workspace.artifact_dir(), index);
            self.renderer
                .write_png(&artifact.payload(), &self.settings, &artifact.path)
                .inspect_err(|e| error!("Aborting batch at artifact {}: {}", index, e))?;
        }

        let bundle = self
            .archiver
            .archive_dir(workspace.artifact_dir(), workspace.archive_path())
            .inspect_err(|e| error!("Failed to archive batch: {}", e))?;

        info!(files = bundle.file_count(), "Batch archived");

        Ok(PreparedArchive { workspace, bundle })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::archive::ZipArchiver;
    use crate::infrastructure::rendering::QrCodeRenderer;
    use std::collections::HashSet;
    use std::fs::{self, File};
    use std::path::Path;
    use tempfile::TempDir;
    use zip::ZipArchive;

    fn use_case(scratch: &Path, max_count: usize) -> GeneratePngBatchUseCase {
        GeneratePngBatchUseCase::new(
            Arc::new(QrCodeRenderer::new()),
            Arc::new(ZipArchiver::new()),
            scratch.to_path_buf(),
            QrSettings::default(),
            max_count,
        )
    }

    /// 指定したインデックスで失敗するレンダラー
    struct FailingRenderer {
        fail_at: usize,
    }

    impl QrRenderer for FailingRenderer {
        fn write_png(
            &self,
            payload: &str,
            settings: &QrSettings,
            path: &Path,
        ) -> Result<(), BatchError> {
            if payload == self.fail_at.to_string() {
                return Err(BatchError::Render {
                    payload: payload.to_string(),
                    message: "simulated failure".to_string(),
                });
            }
            QrCodeRenderer::new().write_png(payload, settings, path)
        }

        fn render_svg(&self, _payload: &str) -> Result<String, BatchError> {
            unreachable!()
        }
    }

    /// 途中までZIPを書いてから失敗するアーカイバ
    struct FailingArchiver;

    impl ArchiveWriter for FailingArchiver {
        fn archive_dir(&self, _source: &Path, target: &Path) -> Result<ArchiveBundle, BatchError> {
            fs::write(target, b"PK\x03\x04partial")?;
            Err(BatchError::Archive("simulated archive failure".to_string()))
        }
    }

    #[test]
    fn test_batch_contains_requested_files() {
        let scratch = TempDir::new().unwrap();
        let prepared = use_case(scratch.path(), 100).execute(GenerationRequest::new(12)).unwrap();

        assert_eq!(prepared.bundle.file_count(), 12);

        let mut archive = ZipArchive::new(File::open(prepared.workspace.archive_path()).unwrap())
            .unwrap();
        let mut indices = Vec::new();
        let mut ids = HashSet::new();
        for i in 0..archive.len() {
            let entry = archive.by_index(i).unwrap();
            if entry.is_dir() {
                assert_eq!(entry.name(), "qrcode/");
                continue;
            }
            let name = entry.name().trim_start_matches("qrcode/").to_string();
            let stem = name.trim_end_matches(".png");
            let (index, id) = stem.split_once('-').unwrap();
            indices.push(index.parse::<usize>().unwrap());
            assert!(ids.insert(id.to_string()));
        }
        indices.sort_unstable();
        assert_eq!(indices, (0..12).collect::<Vec<_>>());
    }

    #[test]
    fn test_zero_count_produces_empty_archive() {
        let scratch = TempDir::new().unwrap();
        let prepared = use_case(scratch.path(), 100).execute(GenerationRequest::new(0)).unwrap();

        assert_eq!(prepared.bundle.entries, vec!["qrcode/"]);
        assert!(prepared.workspace.archive_path().exists());
    }

    #[test]
    fn test_workspace_is_removed_when_dropped() {
        let scratch = TempDir::new().unwrap();
        let prepared = use_case(scratch.path(), 100).execute(GenerationRequest::new(3)).unwrap();
        assert_eq!(fs::read_dir(scratch.path()).unwrap().count(), 1);

        drop(prepared);
        assert_eq!(fs::read_dir(scratch.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_count_over_limit_is_rejected_before_writing() {
        let scratch = TempDir::new().unwrap();
        let result = use_case(scratch.path(), 5).execute(GenerationRequest::new(6));

        assert!(matches!(
            result,
            Err(BatchError::CountTooLarge {
                requested: 6,
                limit: 5
            })
        ));
        assert_eq!(fs::read_dir(scratch.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_render_failure_aborts_and_cleans_up() {
        let scratch = TempDir::new().unwrap();
        let use_case = GeneratePngBatchUseCase::new(
            Arc::new(FailingRenderer { fail_at: 2 }),
            Arc::new(ZipArchiver::new()),
            scratch.path().to_path_buf(),
            QrSettings::default(),
            100,
        );

        let result = use_case.execute(GenerationRequest::new(5));

        assert!(matches!(result, Err(BatchError::Render { .. })));
        assert_eq!(fs::read_dir(scratch.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_archive_failure_removes_partial_archive() {
        let scratch = TempDir::new().unwrap();
        let use_case = GeneratePngBatchUseCase::new(
            Arc::new(QrCodeRenderer::new()),
            Arc::new(FailingArchiver),
            scratch.path().to_path_buf(),
            QrSettings::default(),
            100,
        );

        let result = use_case.execute(GenerationRequest::new(3));

        assert!(matches!(result, Err(BatchError::Archive(_))));
        assert_eq!(fs::read_dir(scratch.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_concurrent_batches_do_not_share_files() {
        let scratch = TempDir::new().unwrap();
        let use_case = Arc::new(use_case(scratch.path(), 100));

        let handles: Vec<_> = [4usize, 7]
            .into_iter()
            .map(|count| {
                let use_case = Arc::clone(&use_case);
                std::thread::spawn(move || {
                    use_case.execute(GenerationRequest::new(count)).unwrap()
                })
            })
            .collect();
        let results: Vec<PreparedArchive> =
            handles.into_iter().map(|h| h.join().unwrap()).collect();

        assert_eq!(results[0].bundle.file_count(), 4);
        assert_eq!(results[1].bundle.file_count(), 7);

        let first: HashSet<_> = results[0].bundle.file_entries().collect();
        let second: HashSet<_> = results[1].bundle.file_entries().collect();
        assert!(first.is_disjoint(&second));
        assert_ne!(results[0].workspace.root(), results[1].workspace.root());
    }
}
