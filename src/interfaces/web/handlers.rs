use super::archive_body::ArchiveStream;
use super::error_response::ErrorResponse;
use crate::AppConfig;
use crate::application::use_cases::{
    GeneratePngBatchUseCase, GenerateWorkbookUseCase, RenderSvgUseCase,
};
use crate::domain::batch::{ARCHIVE_FILE_NAME, BatchError, GenerationRequest, WORKBOOK_FILE_NAME};
use crate::infrastructure::archive::ZipArchiver;
use crate::infrastructure::rendering::QrCodeRenderer;
use crate::infrastructure::spreadsheet::XlsxWorkbookEncoder;
use crate::measure_time;
use axum::{
    Json,
    body::Body,
    extract::{Path, State},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use tracing::{info, warn};

/// ハンドラ間で共有するユースケース
pub struct AppState {
    pub png_batch: GeneratePngBatchUseCase,
    pub svg: RenderSvgUseCase,
    pub workbook: GenerateWorkbookUseCase,
}

impl AppState {
    pub fn new(config: &AppConfig) -> Self {
        let renderer = Arc::new(QrCodeRenderer::new());

        Self {
            png_batch: GeneratePngBatchUseCase::new(
                renderer.clone(),
                Arc::new(ZipArchiver::new()),
                config.scratch_dir.clone(),
                config.qr,
                config.max_count,
            ),
            svg: RenderSvgUseCase::new(renderer, config.svg_payload.clone()),
            workbook: GenerateWorkbookUseCase::new(
                Arc::new(XlsxWorkbookEncoder::new()),
                config.workbook_rows,
            ),
        }
    }
}

/// Greeting endpoint
pub async fn hello() -> &'static str {
    "Hello, World!"
}

/// Generate `total` PNG QR codes and stream them back as a zip archive
pub async fn download_png(
    State(state): State<Arc<AppState>>,
    Path(total): Path<String>,
) -> Result<Response, ErrorResponse> {
    let request = GenerationRequest::from_path_segment(&total);
    if request.count == 0 && total.trim() != "0" {
        warn!("Non-numeric total '{}' treated as 0", total);
    }

    let worker_state = Arc::clone(&state);
    let prepared = tokio::task::spawn_blocking(move || {
        measure_time!("png_batch", { worker_state.png_batch.execute(request) })
    })
    .await
    .map_err(|e| BatchError::Task(e.to_string()))??;

    let file = tokio::fs::File::open(prepared.workspace.archive_path())
        .await
        .map_err(|e| ErrorResponse::internal(format!("Failed to open archive: {e}")))?;
    let length = file
        .metadata()
        .await
        .map_err(|e| ErrorResponse::internal(format!("Failed to stat archive: {e}")))?
        .len();

    info!(
        workspace = %prepared.workspace.id(),
        files = prepared.bundle.file_count(),
        bytes = length,
        "Streaming archive"
    );

    let body = Body::from_stream(ArchiveStream::new(file, prepared.workspace));
    let mut response = body.into_response();
    let headers = response.headers_mut();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/zip"),
    );
    headers.insert(
        header::CONTENT_DISPOSITION,
        attachment(ARCHIVE_FILE_NAME),
    );
    headers.insert(header::CONTENT_LENGTH, HeaderValue::from(length));

    Ok(response)
}

/// Render a single QR code as SVG markup wrapped in a JSON string
pub async fn download_svg(
    State(state): State<Arc<AppState>>,
) -> Result<Json<String>, ErrorResponse> {
    let svg = state.svg.execute()?;
    Ok(Json(svg))
}

/// Generate the code workbook as an xlsx attachment
pub async fn download_excel(State(state): State<Arc<AppState>>) -> Result<Response, ErrorResponse> {
    let worker_state = Arc::clone(&state);
    let bytes = tokio::task::spawn_blocking(move || {
        measure_time!("workbook", { worker_state.workbook.execute() })
    })
    .await
    .map_err(|e| BatchError::Task(e.to_string()))??;

    Ok((
        StatusCode::OK,
        [
            (
                header::CONTENT_TYPE,
                HeaderValue::from_static("application/octet-stream"),
            ),
            (header::CONTENT_DISPOSITION, attachment(WORKBOOK_FILE_NAME)),
            (
                header::HeaderName::from_static("content-transfer-encoding"),
                HeaderValue::from_static("binary"),
            ),
        ],
        bytes,
    )
        .into_response())
}

fn attachment(file_name: &'static str) -> HeaderValue {
    match HeaderValue::from_str(&format!("attachment; filename={file_name}")) {
        Ok(value) => value,
        Err(_) => HeaderValue::from_static("attachment"),
    }
}
