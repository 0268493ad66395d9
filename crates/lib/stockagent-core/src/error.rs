use std::error::Error;
use std::fmt;
use std::path::PathBuf;

/// Failure kinds raised while loading a portfolio document or selecting a record.
#[derive(Debug)]
pub enum PortfolioError {
    /// The HTTP source answered with a non-2xx status.
    Http { status: u16, url: String },
    /// The request never produced a status (DNS, connect, timeout).
    Transport { url: String, source: reqwest::Error },
    FileNotFound { path: PathBuf },
    Io { path: PathBuf, source: std::io::Error },
    /// The body or file content is not valid JSON.
    Parse { origin: String, source: serde_json::Error },
    /// Valid JSON whose top level is not an object keyed by access key.
    NotAnObject { origin: String },
    KeyNotFound { key: String },
    ClientBuild(reqwest::Error),
}

impl PortfolioError {
    /// HTTP status carried by the error, if it came from a non-2xx response.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl fmt::Display for PortfolioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Http { status, url } => write!(f, "HTTP {status} from {url}"),
            Self::Transport { url, source } => write!(f, "request to {url} failed: {source}"),
            Self::FileNotFound { path } => {
                write!(f, "portfolio file not found: {}", path.display())
            }
            Self::Io { path, source } => {
                write!(f, "failed to read {}: {source}", path.display())
            }
            Self::Parse { origin, source } => write!(f, "invalid JSON from {origin}: {source}"),
            Self::NotAnObject { origin } => {
                write!(f, "portfolio document from {origin} is not a JSON object")
            }
            Self::KeyNotFound { key } => write!(f, "unknown access_key: {key}"),
            Self::ClientBuild(err) => write!(f, "failed to build HTTP client: {err}"),
        }
    }
}

impl Error for PortfolioError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Transport { source, .. } | Self::ClientBuild(source) => Some(source),
            Self::Io { source, .. } => Some(source),
            Self::Parse { source, .. } => Some(source),
            Self::Http { .. }
            | Self::FileNotFound { .. }
            | Self::NotAnObject { .. }
            | Self::KeyNotFound { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_not_found_names_the_key() {
        let err = PortfolioError::KeyNotFound {
            key: "missing".to_string(),
        };
        assert_eq!(err.to_string(), "unknown access_key: missing");
        assert!(err.source().is_none());
    }

    #[test]
    fn status_is_only_reported_for_http_errors() {
        let http = PortfolioError::Http {
            status: 404,
            url: "https://example.test/p.json".to_string(),
        };
        let missing = PortfolioError::FileNotFound {
            path: PathBuf::from("nope.json"),
        };
        assert_eq!(http.status(), Some(404));
        assert_eq!(missing.status(), None);
    }
}
