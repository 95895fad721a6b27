//! Credential loader
//!
//! Reads the IBM Quantum API token from a hidden file in the user's home
//! directory (`~/.ibmq-token`). The file contents are the credential,
//! verbatim: no trimming, no validation, trailing newline preserved. Only
//! the HTTP Authorization header trims whitespace, since header values
//! cannot carry newlines.

use crate::constants::credential::TOKEN_FILE_NAME;
use crate::error::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// An opaque provider credential read from disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token(String);

impl Token {
    /// Wrap an already-loaded token string
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Default token file path: `~/.ibmq-token`
    pub fn default_path() -> Result<PathBuf> {
        dirs::home_dir()
            .map(|home| home.join(TOKEN_FILE_NAME))
            .ok_or_else(|| Error::Config("Could not determine home directory".to_string()))
    }

    /// Load the token from the default path
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::default_path()?)
    }

    /// Load the token from a specific file
    ///
    /// A missing or unreadable file is fatal; there is no fallback source.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::TokenNotFound(path.display().to_string()));
        }

        let raw = fs::read_to_string(path).map_err(|e| Error::TokenUnreadable {
            path: path.display().to_string(),
            source: e,
        })?;

        Ok(Self(raw))
    }

    /// The raw credential string, exactly as read from disk
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Authorization header value
    pub fn auth_header(&self) -> String {
        format!("Bearer {}", self.0.trim())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_load_preserves_trailing_newline() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".ibmq-token");
        let mut file = fs::File::create(&path).unwrap();
        write!(file, "TOKEN123\n").unwrap();

        let token = Token::load_from(&path).unwrap();
        assert_eq!(token.as_str(), "TOKEN123\n");
    }

    #[test]
    fn test_load_missing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".ibmq-token");

        let result = Token::load_from(&path);
        assert!(matches!(result, Err(Error::TokenNotFound(_))));
    }

    #[test]
    fn test_auth_header_trims_whitespace() {
        let token = Token::new("TOKEN123\n");
        assert_eq!(token.auth_header(), "Bearer TOKEN123");
        // The stored credential stays raw
        assert_eq!(token.as_str(), "TOKEN123\n");
    }

    #[test]
    fn test_auth_header_without_newline() {
        let token = Token::new("TOKEN123");
        assert_eq!(token.auth_header(), "Bearer TOKEN123");
    }
}
