use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("No menu URL provided")]
    MissingMenuUrl,

    #[error("Invalid menu URL")]
    InvalidMenuUrl,

    /// The vision model answered without any content.
    #[error("Failed to parse menu text")]
    MenuTranscriptionFailed,

    /// The extraction model answered without content, or with something that
    /// is not a menu matching the schema.
    #[error("Schema extraction failed")]
    SchemaExtractionFailed,

    #[error("External service error: {0}")]
    ExternalServiceError(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Internal server error")]
    InternalServerError,
}
