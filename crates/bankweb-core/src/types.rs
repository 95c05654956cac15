//! Basic types for the transaction history

use serde::{Deserialize, Serialize};

/// Transaction category tag
///
/// The set is open: unknown tags are kept verbatim so that filtering stays
/// an exact match, but they display like transfers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TransactionKind {
    Transfer,
    Deposit,
    Withdrawal,
    Loan,
    /// Any other tag
    Other(String),
}

impl Default for TransactionKind {
    fn default() -> Self {
        TransactionKind::Transfer
    }
}

impl TransactionKind {
    /// The tag as it appeared in the source data
    pub fn as_str(&self) -> &str {
        match self {
            TransactionKind::Transfer => "transfer",
            TransactionKind::Deposit => "deposit",
            TransactionKind::Withdrawal => "withdrawal",
            TransactionKind::Loan => "loan",
            TransactionKind::Other(tag) => tag.as_str(),
        }
    }

    /// The kind used for icons and labels
    pub fn display_kind(&self) -> TransactionKind {
        match self {
            TransactionKind::Other(_) => TransactionKind::Transfer,
            known => known.clone(),
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self.display_kind() {
            TransactionKind::Deposit => "Deposit",
            TransactionKind::Withdrawal => "Withdrawal",
            TransactionKind::Loan => "Loan",
            _ => "Transfer",
        }
    }

    /// Built-in kinds in display order
    pub fn all_known() -> [TransactionKind; 4] {
        [
            TransactionKind::Transfer,
            TransactionKind::Deposit,
            TransactionKind::Withdrawal,
            TransactionKind::Loan,
        ]
    }
}

impl From<&str> for TransactionKind {
    fn from(tag: &str) -> Self {
        match tag {
            "transfer" => TransactionKind::Transfer,
            "deposit" => TransactionKind::Deposit,
            "withdrawal" => TransactionKind::Withdrawal,
            "loan" => TransactionKind::Loan,
            other => TransactionKind::Other(other.to_string()),
        }
    }
}

impl From<String> for TransactionKind {
    fn from(tag: String) -> Self {
        TransactionKind::from(tag.as_str())
    }
}

impl From<TransactionKind> for String {
    fn from(kind: TransactionKind) -> Self {
        kind.as_str().to_string()
    }
}

impl std::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Notification severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Info,
    Warning,
    Error,
}

impl Default for Severity {
    fn default() -> Self {
        Severity::Info
    }
}

impl std::str::FromStr for Severity {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "success" => Ok(Severity::Success),
            "info" => Ok(Severity::Info),
            "warning" | "warn" => Ok(Severity::Warning),
            "error" => Ok(Severity::Error),
            _ => Err(format!("Invalid severity: {}", s)),
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Success => write!(f, "success"),
            Severity::Info => write!(f, "info"),
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}
