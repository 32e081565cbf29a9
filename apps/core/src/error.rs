use thiserror::Error;

/// Failure of a single resource fetch
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("network error: {0}")]
    Network(String),
    #[error("HTTP {0}")]
    HttpStatus(u16),
    #[error("invalid response body: {0}")]
    Decode(String),
}

impl FetchError {
    pub fn network(err: impl std::fmt::Display) -> Self {
        Self::Network(err.to_string())
    }

    pub fn decode(err: impl std::fmt::Display) -> Self {
        Self::Decode(err.to_string())
    }

    /// Checks an HTTP status code, mapping anything outside 2xx to an error
    pub const fn check_status(code: u16) -> Result<(), Self> {
        if code >= 200 && code < 300 {
            Ok(())
        } else {
            Err(Self::HttpStatus(code))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::FetchError;

    #[test]
    fn status_message_names_the_code() {
        assert!(FetchError::HttpStatus(500).to_string().contains("500"));
    }

    #[test]
    fn only_2xx_passes_status_check() {
        assert_eq!(FetchError::check_status(200), Ok(()));
        assert_eq!(FetchError::check_status(204), Ok(()));
        assert_eq!(
            FetchError::check_status(404),
            Err(FetchError::HttpStatus(404))
        );
        assert_eq!(
            FetchError::check_status(302),
            Err(FetchError::HttpStatus(302))
        );
    }
}
