use crate::AppState;
use crate::api::error::AppError;
use crate::utils::validation::{FILENAME_HEADER, validate_upload};
use axum::{
    body::Body,
    extract::State,
    http::{HeaderMap, header},
    response::{IntoResponse, Response},
};
use futures::TryStreamExt;
use std::time::Instant;
use tokio_util::io::StreamReader;
use tracing::{debug, error, info, trace};

/// `POST /fileUpload`: streams a raw binary body into
/// `<temp_dir>/<filename>.uploaded`.
///
/// Validation failures return 400 with an empty body and write nothing; I/O
/// failures mid-copy propagate as 500 and may leave a partial file behind.
pub async fn file_upload(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Body,
) -> Result<Response, AppError> {
    trace!("file_upload()");
    let started = Instant::now();

    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok());
    let content_length = headers
        .get(header::CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok());
    let accept_encoding = headers
        .get(header::ACCEPT_ENCODING)
        .and_then(|v| v.to_str().ok());
    let filename = headers.get(FILENAME_HEADER).and_then(|v| v.to_str().ok());

    debug!("Header {}: {:?}", header::CONTENT_TYPE, content_type);
    debug!("Header {}: {:?}", header::CONTENT_LENGTH, content_length);
    debug!("Header {}: {:?}", header::ACCEPT_ENCODING, accept_encoding);
    debug!("Header {}: {:?}", FILENAME_HEADER, filename);

    let valid = validate_upload(
        content_type,
        content_length,
        filename,
        accept_encoding,
        state.config.enforce_accept_encoding,
    )
    .map_err(|e| {
        info!(
            "Upload rejected for file {:?} with length {:?}: {}",
            filename, content_length, e
        );
        AppError::BadRequest(e.to_string())
    })?;

    let dest = state
        .uploads
        .resolve_destination(valid.filename)
        .map_err(|e| {
            info!("Invalid file path '{}'", valid.filename);
            AppError::BadRequest(e.to_string())
        })?;

    let stream = body.into_data_stream().map_err(std::io::Error::other);
    let reader = StreamReader::new(stream);

    let bytes = state.uploads.store(&dest, reader).await.map_err(|e| {
        error!("Upload failed for file {}: {}", dest.display(), e);
        e
    })?;

    info!(
        "Uploaded file {} in {} ms, length: {}",
        dest.display(),
        started.elapsed().as_millis(),
        bytes
    );

    Ok(([(header::CONTENT_TYPE, mime::TEXT_PLAIN.as_ref())], ()).into_response())
}
