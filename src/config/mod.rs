use std::env;
use std::path::PathBuf;

/// Upload endpoint configuration, read once at startup
#[derive(Debug, Clone)]
pub struct UploadConfig {
    /// Directory uploaded files are written to (default: the OS temp dir)
    pub temp_dir: PathBuf,

    /// Activates the Accept-Encoding equality check. The check exists in the
    /// validation pipeline but is intentionally inactive by default; this
    /// flag is the only way to turn it on.
    pub enforce_accept_encoding: bool,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            temp_dir: env::temp_dir(),
            enforce_accept_encoding: false,
        }
    }
}

impl UploadConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let default = Self::default();

        Self {
            temp_dir: env::var("UPLOAD_TEMP_DIR")
                .map(PathBuf::from)
                .unwrap_or(default.temp_dir),

            enforce_accept_encoding: env::var("ENFORCE_ACCEPT_ENCODING")
                .map(|v| v.to_lowercase() == "true" || v == "1")
                .unwrap_or(default.enforce_accept_encoding),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = UploadConfig::default();
        assert_eq!(config.temp_dir, std::env::temp_dir());
        assert!(!config.enforce_accept_encoding);
    }
}
