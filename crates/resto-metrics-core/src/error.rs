use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RestoMetricsError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Line item not found: {account}")]
    LineItemNotFound { account: String },

    #[error("No wage record with role '{role}' in the {year} roster")]
    EmployeeNotFound { role: String, year: i32 },

    #[error("Accounting identity violated: {identity} off by {delta} in {year}")]
    IdentityViolation {
        identity: String,
        year: i32,
        delta: Decimal,
    },

    #[error("Reconciliation failure in {context}: off by {delta}")]
    ReconciliationFailure { context: String, delta: Decimal },

    #[error("Division by zero in {context}")]
    DivisionByZero { context: String },

    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Artifact write failed: {0}")]
    ArtifactWrite(#[from] std::io::Error),
}

impl From<serde_json::Error> for RestoMetricsError {
    fn from(e: serde_json::Error) -> Self {
        RestoMetricsError::SerializationError(e.to_string())
    }
}
