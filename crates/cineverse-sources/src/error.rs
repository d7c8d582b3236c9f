use thiserror::Error;

/// Failures talking to the metadata provider. All of them are non-fatal to callers.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Metadata API token is not configured (set TMDB_API_TOKEN or run `cineverse config token`)")]
    MissingToken,

    #[error("Request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Metadata API returned {status} for {url}: {body}")]
    Status { url: String, status: u16, body: String },

    #[error("Failed to decode response from {url}: {reason}")]
    Decode { url: String, reason: String },
}

impl SourceError {
    /// 404 from the provider, e.g. a season number the series does not have.
    pub fn is_not_found(&self) -> bool {
        matches!(self, SourceError::Status { status: 404, .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_not_found_only_for_404() {
        let status = |status| SourceError::Status {
            url: "/tv/1399/season/9".to_string(),
            status,
            body: String::new(),
        };
        assert!(status(404).is_not_found());
        assert!(!status(500).is_not_found());
        assert!(!SourceError::MissingToken.is_not_found());
    }
}
