use anyhow::{Result, anyhow};
use std::path::{Path, PathBuf};

/// Request header carrying the destination file name
pub const FILENAME_HEADER: &str = "filename";

/// Suffix appended to every stored file
pub const UPLOADED_SUFFIX: &str = ".uploaded";

/// Accept-Encoding value the inactive encoding check compares against
pub const EXPECTED_ACCEPT_ENCODING: &str = "gzip, deflate-Encoding";

#[derive(Debug, Clone)]
pub struct ValidationError {
    pub code: &'static str,
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Validated view of an upload request's headers
#[derive(Debug)]
pub struct ValidUpload<'a> {
    pub filename: &'a str,
    pub content_length: i64,
}

/// Validates that the Content-Type is exactly `application/octet-stream`
pub fn validate_content_type(content_type: Option<&str>) -> Result<()> {
    match content_type {
        Some(ct) if ct == mime::APPLICATION_OCTET_STREAM.as_ref() => Ok(()),
        other => Err(anyhow!(ValidationError {
            code: "INVALID_CONTENT_TYPE",
            message: format!(
                "Content-Type must be '{}', got {:?}",
                mime::APPLICATION_OCTET_STREAM,
                other.unwrap_or("<none>")
            ),
        })),
    }
}

/// Validates that the Content-Length is a positive integer
pub fn validate_content_length(raw: Option<&str>) -> Result<i64> {
    let length = raw.and_then(|v| v.parse::<i64>().ok()).unwrap_or(-1);
    if length <= 0 {
        return Err(anyhow!(ValidationError {
            code: "INVALID_CONTENT_LENGTH",
            message: format!(
                "Content-Length must be a positive integer, got {:?}",
                raw.unwrap_or("<none>")
            ),
        }));
    }
    Ok(length)
}

/// Validates that the filename header is present and non-empty
pub fn validate_filename(filename: Option<&str>) -> Result<&str> {
    match filename {
        Some(name) if !name.is_empty() => Ok(name),
        _ => Err(anyhow!(ValidationError {
            code: "MISSING_FILENAME",
            message: format!("'{FILENAME_HEADER}' header must be present and non-empty"),
        })),
    }
}

/// Validates the Accept-Encoding header against the expected constant.
/// Only invoked when the encoding check is explicitly enabled; the check is
/// inactive by default (see `UploadConfig::enforce_accept_encoding`).
pub fn validate_accept_encoding(value: Option<&str>) -> Result<()> {
    match value {
        Some(v) if v == EXPECTED_ACCEPT_ENCODING => Ok(()),
        other => Err(anyhow!(ValidationError {
            code: "INVALID_ACCEPT_ENCODING",
            message: format!(
                "Accept-Encoding must be '{}', got {:?}",
                EXPECTED_ACCEPT_ENCODING,
                other.unwrap_or("<none>")
            ),
        })),
    }
}

/// Full validation pipeline for an upload request's headers
pub fn validate_upload<'a>(
    content_type: Option<&str>,
    content_length: Option<&str>,
    filename: Option<&'a str>,
    accept_encoding: Option<&str>,
    enforce_accept_encoding: bool,
) -> Result<ValidUpload<'a>> {
    // 1. Content type check
    validate_content_type(content_type)?;

    // 2. Length check
    let content_length = validate_content_length(content_length)?;

    // 3. Filename check
    let filename = validate_filename(filename)?;

    // 4. Encoding check, inactive unless explicitly enabled
    if enforce_accept_encoding {
        validate_accept_encoding(accept_encoding)?;
    }

    Ok(ValidUpload {
        filename,
        content_length,
    })
}

/// Resolves `<temp_dir>/<filename>.uploaded` and verifies the result is a
/// descendant of `temp_dir`, which must already be canonical.
///
/// The destination file may not exist yet, so the candidate's parent
/// directory is canonicalized instead and checked component-wise against the
/// temp dir. Symlinks inside the temp dir that point elsewhere resolve to
/// their target and fail the check.
pub fn resolve_destination(temp_dir: &Path, filename: &str) -> Result<PathBuf> {
    let candidate = temp_dir.join(format!("{filename}{UPLOADED_SUFFIX}"));

    let parent = candidate
        .parent()
        .ok_or_else(|| invalid_path(filename))?
        .canonicalize()
        .map_err(|_| invalid_path(filename))?;

    if !parent.starts_with(temp_dir) {
        return Err(invalid_path(filename));
    }

    let name = candidate.file_name().ok_or_else(|| invalid_path(filename))?;
    Ok(parent.join(name))
}

fn invalid_path(filename: &str) -> anyhow::Error {
    anyhow!(ValidationError {
        code: "INVALID_FILE_PATH",
        message: format!("invalid file path '{filename}'"),
    })
}
