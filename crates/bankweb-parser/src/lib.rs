//! Raw transaction record parsing
//!
//! Reads the page's initial transaction data and provides the field
//! parsers used to normalize each record.

use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::Arc;

pub mod error;
pub mod parser;
pub mod types;

pub use error::ParseError;
pub use parser::{parse_amount, parse_date, parse_decimal, parse_timestamp};
pub use types::RawTransaction;

use types::RecordDocument;

// ==================== Record Source Trait ====================

/// Record source reference type
pub type RecordSourceRef = Arc<dyn RecordSource>;

/// Trait for loaders of raw transaction records
#[async_trait]
pub trait RecordSource: Send + Sync {
    /// Parse records from in-memory content
    async fn parse(&self, content: &str) -> Result<Vec<RawTransaction>, ParseError>;

    /// Parse records from a file path
    async fn load(&self, path: PathBuf) -> Result<Vec<RawTransaction>, ParseError>;
}

/// JSON record source: a bare array or `{ "transactions": [...] }`
#[derive(Debug, Default)]
pub struct JsonRecordSource;

impl JsonRecordSource {
    fn parse_with_source(content: &str, location: &str) -> Result<Vec<RawTransaction>, ParseError> {
        let document: RecordDocument = serde_json::from_str(content).map_err(|e| ParseError::InvalidJson {
            location: location.to_string(),
            message: e.to_string(),
        })?;
        Ok(document.into_records())
    }
}

#[async_trait]
impl RecordSource for JsonRecordSource {
    async fn parse(&self, content: &str) -> Result<Vec<RawTransaction>, ParseError> {
        Self::parse_with_source(content, "input")
    }

    async fn load(&self, path: PathBuf) -> Result<Vec<RawTransaction>, ParseError> {
        let content = tokio::fs::read_to_string(&path).await?;
        Self::parse_with_source(&content, &path.to_string_lossy())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn test_parse_bare_array() {
        let source = JsonRecordSource;
        let records = source
            .parse(r#"[{"id":"1","type":"transfer"},{"id":"2","type":"deposit"}]"#)
            .await
            .unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].kind.as_deref(), Some("deposit"));
    }

    #[tokio::test]
    async fn test_parse_wrapped_document() {
        let source = JsonRecordSource;
        let records = source
            .parse(r#"{"transactions":[{"title":"Coffee","amount":"-$4.50","sent":true}]}"#)
            .await
            .unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].title.as_deref(), Some("Coffee"));
    }

    #[tokio::test]
    async fn test_parse_invalid_json() {
        let source = JsonRecordSource;
        let err = source.parse("not json").await.unwrap_err();
        assert!(matches!(err, ParseError::InvalidJson { ref location, .. } if location == "input"));
    }

    #[tokio::test]
    async fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"[{{"id":"a","amount":"$10.00"}}]"#).unwrap();

        let records = JsonRecordSource.load(file.path().to_path_buf()).await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].amount.as_deref(), Some("$10.00"));
    }

    #[tokio::test]
    async fn test_load_missing_file() {
        let err = JsonRecordSource
            .load(PathBuf::from("/no/such/transactions.json"))
            .await
            .unwrap_err();
        assert!(matches!(err, ParseError::IoError(_)));
    }
}
