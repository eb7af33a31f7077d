//! HTTP upload service
//!
//! Serves a small upload page, cleans uploaded `.html` files into the
//! configured output directory and hands the results back for download.

use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    extract::{DefaultBodyLimit, Multipart, Path, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use log::{error, info, warn};
use serde::Serialize;
use tokio::net::TcpListener;

use crate::app_config::Config;
use crate::citation::{self, CitationStats};
use crate::errors::AppError;
use crate::file_utils::FileManager;

/// Shared state for all handlers
#[derive(Debug, Clone)]
pub struct ServerState {
    /// Directory cleaned uploads are written to
    pub output_dir: PathBuf,
    /// Suffix appended to the uploaded file stem
    pub suffix: String,
    /// Upload body limit in bytes, 0 for none
    pub max_upload_bytes: usize,
}

pub type SharedState = Arc<ServerState>;

impl ServerState {
    pub fn from_config(config: &Config) -> Self {
        Self {
            output_dir: config.server.output_dir.clone(),
            suffix: config.output.suffix.clone(),
            max_upload_bytes: config.server.max_upload_bytes,
        }
    }
}

/// Citation counts as reported to the upload page
#[derive(Debug, Serialize)]
struct UploadStatistics {
    total_citations_removed: usize,
    cite_with_numbers: usize,
    cite_start_markers: usize,
}

impl From<CitationStats> for UploadStatistics {
    fn from(stats: CitationStats) -> Self {
        Self {
            total_citations_removed: stats.total,
            cite_with_numbers: stats.numbered,
            cite_start_markers: stats.start,
        }
    }
}

/// Successful upload response
#[derive(Debug, Serialize)]
struct UploadResponse {
    success: bool,
    message: &'static str,
    original_filename: String,
    output_filename: String,
    download_url: String,
    statistics: UploadStatistics,
}

/// Error response
#[derive(Serialize)]
struct ErrorResponse {
    detail: String,
}

fn error_response(status: StatusCode, detail: impl Into<String>) -> Response {
    (status, Json(ErrorResponse { detail: detail.into() })).into_response()
}

const INDEX_PAGE: &str = r#"<!DOCTYPE html>
<html>
<head><meta charset="utf-8"><title>HTML Cite Cleaner</title></head>
<body>
<h1>HTML Cite Cleaner</h1>
<p>Upload an <code>.html</code> file to strip <code>[cite: N]</code> and <code>[cite_start]</code> markers.</p>
<form action="/upload" method="post" enctype="multipart/form-data">
<input type="file" name="file" accept=".html">
<button type="submit">Clean &amp; Download</button>
</form>
</body>
</html>
"#;

/// Upload page
async fn index() -> Html<&'static str> {
    Html(INDEX_PAGE)
}

/// Clean an uploaded HTML file and report statistics
async fn upload(State(state): State<SharedState>, mut multipart: Multipart) -> Response {
    let mut upload = None;

    loop {
        match multipart.next_field().await {
            Ok(Some(field)) => {
                if field.name() != Some("file") {
                    continue;
                }
                let file_name = field.file_name().unwrap_or_default().to_string();
                match field.bytes().await {
                    Ok(bytes) => {
                        upload = Some((file_name, bytes));
                        break;
                    }
                    Err(e) => return error_response(e.status(), format!("Invalid upload: {}", e)),
                }
            }
            Ok(None) => break,
            Err(e) => return error_response(e.status(), format!("Invalid upload: {}", e)),
        }
    }

    let Some((original_filename, bytes)) = upload else {
        return error_response(StatusCode::BAD_REQUEST, "No file uploaded");
    };

    if !FileManager::is_html_file(&original_filename) {
        warn!("Rejected upload with non-HTML name: {}", original_filename);
        return error_response(StatusCode::BAD_REQUEST, "Only HTML files are allowed");
    }

    let html = match String::from_utf8(bytes.to_vec()) {
        Ok(html) => html,
        Err(e) => {
            let err = AppError::from(e);
            return error_response(StatusCode::BAD_REQUEST, format!("Error processing file: {}", err));
        }
    };

    let result = citation::clean_document(&html);
    let output_filename = FileManager::cleaned_file_name(&original_filename, &state.suffix);
    let output_path = state.output_dir.join(&output_filename);

    let written = async {
        tokio::fs::create_dir_all(&state.output_dir).await?;
        tokio::fs::write(&output_path, result.cleaned.as_bytes()).await
    }
    .await;
    if let Err(e) = written {
        error!("Failed to store cleaned upload {}: {}", output_path.display(), e);
        return error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Error processing file: {}", AppError::from(e)),
        );
    }

    info!("Cleaned upload {} ({})", original_filename, result.stats);

    Json(UploadResponse {
        success: true,
        message: "File cleaned successfully",
        download_url: format!("/download/{}", output_filename),
        original_filename,
        output_filename,
        statistics: result.stats.into(),
    })
    .into_response()
}

/// Serve a previously cleaned file
async fn download(State(state): State<SharedState>, Path(filename): Path<String>) -> Response {
    if matches!(filename.as_str(), "" | "." | "..") || filename.contains(['/', '\\']) {
        return error_response(StatusCode::BAD_REQUEST, "Invalid file name");
    }

    let file_path = state.output_dir.join(&filename);
    match tokio::fs::read(&file_path).await {
        Ok(content) => (
            [
                (header::CONTENT_TYPE, "text/html; charset=utf-8".to_string()),
                (header::CONTENT_DISPOSITION, format!("attachment; filename=\"{}\"", filename)),
            ],
            content,
        )
            .into_response(),
        Err(_) => error_response(StatusCode::NOT_FOUND, "File not found"),
    }
}

/// 404 handler
async fn not_found() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found")
}

/// Build the axum router
pub fn build_router(state: SharedState) -> Router {
    let body_limit = match state.max_upload_bytes {
        0 => DefaultBodyLimit::disable(),
        limit => DefaultBodyLimit::max(limit),
    };

    Router::new()
        .route("/", get(index))
        .route("/upload", post(upload))
        .route("/download/{filename}", get(download))
        .fallback(not_found)
        .layer(body_limit)
        .with_state(state)
}

/// Run the upload service.
///
/// This function blocks until the server is shut down.
pub async fn run_server(config: &Config) -> Result<(), AppError> {
    let addr = config.server.bind_address();
    let state = Arc::new(ServerState::from_config(config));

    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::Server(format!("Failed to bind {}: {}", addr, e)))?;
    info!("Upload service listening on http://{}", addr);

    axum::serve(listener, build_router(state))
        .await
        .map_err(|e| AppError::Server(e.to_string()))?;

    Ok(())
}
