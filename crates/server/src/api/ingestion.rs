use axum::Json;
use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Multipart, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::IntoResponse;
use bytes::Bytes;
use tracing::{debug, info};

use ingest_core::{PDF_CONTENT_TYPE, preferred_language, resolve_user_id, sanitize_title};
use ingest_gateway::{IngestError, Upload};

use crate::error::ServerError;

use super::AppState;
use super::schemas::{ErrorResponse, UploadForm, UrlIngestionRequest};

/// Multipart field carrying the document.
const FILE_FIELD: &str = "file";

/// `POST /api/ingestion` -- ingest an uploaded document.
///
/// Stores the `file` part under `uploads/<sha256>/<filename>`, publishes an
/// ingestion event and returns the digest as plain text.
#[utoipa::path(
    post,
    path = "/api/ingestion",
    tag = "Ingestion",
    summary = "Upload document",
    description = "Hashes the uploaded file, stores it in object storage and publishes a document.ingestion event. The Authorization header is decoded but not verified.",
    request_body(content = UploadForm, content_type = "multipart/form-data"),
    params(
        ("Authorization" = Option<String>, Header, description = "Bearer token; only its claims are read"),
        ("Accept-Language" = Option<String>, Header, description = "Preferred language, defaults to en")
    ),
    responses(
        (status = 202, description = "Document accepted; body is the hex SHA-256 digest", body = String, content_type = "text/plain"),
        (status = 400, description = "No file part", body = ErrorResponse),
        (status = 413, description = "Upload exceeds the size limit", body = ErrorResponse),
        (status = 500, description = "Reading, storage or publishing failed", body = ErrorResponse)
    )
)]
pub async fn upload_document(
    State(state): State<AppState>,
    headers: HeaderMap,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<impl IntoResponse, ServerError> {
    let (user_id, language) = request_context(&headers);

    let file = match read_file_part(multipart, &headers, state.max_upload_bytes).await {
        Ok(file) => file,
        Err(e) => {
            state.gateway.record_rejected(&e);
            return Err(e.into());
        }
    };

    debug!(
        file_name = %file.file_name,
        size = file.data.len(),
        user_id = %user_id,
        "file part received"
    );

    let mut upload = Upload::new(file.file_name, file.data, user_id, language);
    if let Some(content_type) = file.content_type {
        upload = upload.with_content_type(content_type);
    }

    let receipt = state.gateway.ingest(upload).await?;
    info!(digest = %receipt.digest, key = %receipt.stored.key, "document accepted");

    Ok((StatusCode::ACCEPTED, receipt.digest.to_string()))
}

/// `POST /api/ingestion/url` -- download a PDF and ingest it.
#[utoipa::path(
    post,
    path = "/api/ingestion/url",
    tag = "Ingestion",
    summary = "Ingest from URL",
    description = "Downloads the PDF at pdfUrl and ingests it as <title>.pdf with a sanitized storage file name.",
    request_body(content = UrlIngestionRequest, description = "Title and download location"),
    params(
        ("Authorization" = Option<String>, Header, description = "Bearer token; only its claims are read"),
        ("Accept-Language" = Option<String>, Header, description = "Preferred language, defaults to en")
    ),
    responses(
        (status = 202, description = "Document accepted; body is the hex SHA-256 digest", body = String, content_type = "text/plain"),
        (status = 400, description = "Missing title or URL", body = ErrorResponse),
        (status = 413, description = "Remote document exceeds the size limit", body = ErrorResponse),
        (status = 500, description = "Storage or publishing failed", body = ErrorResponse),
        (status = 502, description = "Remote document could not be downloaded", body = ErrorResponse)
    )
)]
pub async fn ingest_from_url(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Json<UrlIngestionRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ServerError> {
    let (user_id, language) = request_context(&headers);

    let request = match parse_url_request(body, state.max_upload_bytes) {
        Ok(request) => request,
        Err(e) => {
            state.gateway.record_rejected(&e);
            return Err(e.into());
        }
    };

    info!(title = %request.title, user_id = %user_id, "URL ingestion requested");

    let data = match state.fetcher.fetch(&request.pdf_url).await {
        Ok(data) => data,
        Err(e) => {
            state.gateway.record_rejected(&e);
            return Err(e.into());
        }
    };

    let upload = Upload::new(sanitize_title(&request.title), data, user_id, language)
        .with_display_name(format!("{}.pdf", request.title))
        .with_content_type(PDF_CONTENT_TYPE);

    let receipt = state.gateway.ingest(upload).await?;
    info!(digest = %receipt.digest, key = %receipt.stored.key, "remote document accepted");

    Ok((StatusCode::ACCEPTED, receipt.digest.to_string()))
}

/// Unverified user id and preferred language for a request.
fn request_context(headers: &HeaderMap) -> (String, String) {
    let authorization = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    let accept_language = headers
        .get(header::ACCEPT_LANGUAGE)
        .and_then(|v| v.to_str().ok());

    (
        resolve_user_id(authorization),
        preferred_language(accept_language),
    )
}

struct FilePart {
    file_name: String,
    content_type: Option<String>,
    data: Bytes,
}

/// Find the first `file` part carrying a filename and buffer it. Other parts
/// are skipped.
async fn read_file_part(
    multipart: Result<Multipart, MultipartRejection>,
    headers: &HeaderMap,
    limit: usize,
) -> Result<FilePart, IngestError> {
    let Ok(mut multipart) = multipart else {
        return Err(file_required());
    };

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => return Err(file_required()),
            Err(e) if is_too_large(&e) => return Err(too_large(headers, limit)),
            Err(_) => return Err(file_required()),
        };

        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        // A part without a filename is a plain form value, not a file.
        let Some(file_name) = field
            .file_name()
            .filter(|name| !name.is_empty())
            .map(str::to_owned)
        else {
            continue;
        };
        let content_type = field.content_type().map(str::to_owned);

        let data = field.bytes().await.map_err(|e| {
            if is_too_large(&e) {
                too_large(headers, limit)
            } else {
                IngestError::Io(e.body_text())
            }
        })?;

        return Ok(FilePart {
            file_name,
            content_type,
            data,
        });
    }
}

fn parse_url_request(
    body: Result<Json<UrlIngestionRequest>, JsonRejection>,
    limit: usize,
) -> Result<UrlIngestionRequest, IngestError> {
    let Json(mut request) = body.map_err(|rejection| {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            IngestError::TooLarge {
                size: limit as u64,
                limit: limit as u64,
            }
        } else {
            IngestError::Validation(rejection.body_text())
        }
    })?;

    request.title = request.title.trim().to_owned();
    request.pdf_url = request.pdf_url.trim().to_owned();

    if request.title.is_empty() {
        return Err(IngestError::Validation("Title is required".into()));
    }
    if request.pdf_url.is_empty() {
        return Err(IngestError::Validation("PDF URL is required".into()));
    }
    if !(request.pdf_url.starts_with("http://") || request.pdf_url.starts_with("https://")) {
        return Err(IngestError::Validation(
            "PDF URL must use http or https".into(),
        ));
    }

    Ok(request)
}

fn file_required() -> IngestError {
    IngestError::Validation("File is required".into())
}

fn is_too_large(err: &MultipartError) -> bool {
    err.status() == StatusCode::PAYLOAD_TOO_LARGE
}

fn too_large(headers: &HeaderMap, limit: usize) -> IngestError {
    let size = headers
        .get(header::CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse().ok())
        .unwrap_or(limit as u64);
    IngestError::TooLarge {
        size,
        limit: limit as u64,
    }
}
