use thiserror::Error;

/// Result type alias using DiffError
pub type Result<T> = std::result::Result<T, DiffError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that can be used for programmatic
/// error handling, testing, and process exit reporting. The diff operation
/// itself never fails; these kinds cover the configuration and input
/// boundary around it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    /// Options could not be parsed or hold an unknown value
    InvalidOptions,
    /// A document is not usable as a diff root
    InvalidInput,
    /// Input text could not be decoded
    Serialization,
    Io,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidOptions => "ERR_INVALID_OPTIONS",
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::Io => "ERR_IO",
        }
    }
}

/// Canonical structured error type
///
/// Carries classification fields for programmatic handling plus free-form
/// context for humans.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    path: Option<String>,
    message: String,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            path: None,
            message: String::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add file or document path context
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the operation context, if any
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the path context, if any
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(path) = &self.path {
            write!(f, " (path: {})", path)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Error taxonomy for the boundary around the diff engine
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DiffError {
    #[error("Unknown array policy: {value}")]
    UnknownArrayPolicy { value: String },

    #[error("Unknown array equality: {value}")]
    UnknownArrayEquality { value: String },

    /// Options file extension is neither `.json` nor `.toml`
    #[error("Unsupported options format: {path}")]
    UnsupportedConfigFormat { path: String },

    #[error("Failed to read {path}: {reason}")]
    ReadFile { path: String, reason: String },

    #[error("Invalid {format} options: {reason}")]
    ConfigParse { format: String, reason: String },

    #[error("Invalid JSON in {source_name}: {reason}")]
    DocumentParse { source_name: String, reason: String },

    /// Diff roots must be objects or arrays
    #[error("Document root must be an object or array, found {found}")]
    NotAContainer { found: String },
}

impl From<DiffError> for ExError {
    fn from(err: DiffError) -> Self {
        let message = err.to_string();
        match err {
            DiffError::UnknownArrayPolicy { .. } | DiffError::UnknownArrayEquality { .. } => {
                ExError::new(ExErrorKind::InvalidOptions).with_message(message)
            }
            DiffError::UnsupportedConfigFormat { path } => {
                ExError::new(ExErrorKind::InvalidOptions)
                    .with_op("load_options")
                    .with_path(path)
                    .with_message(message)
            }
            DiffError::ConfigParse { .. } => ExError::new(ExErrorKind::InvalidOptions)
                .with_op("load_options")
                .with_message(message),
            DiffError::ReadFile { path, .. } => ExError::new(ExErrorKind::Io)
                .with_path(path)
                .with_message(message),
            DiffError::DocumentParse { source_name, .. } => {
                ExError::new(ExErrorKind::Serialization)
                    .with_op("load_document")
                    .with_path(source_name)
                    .with_message(message)
            }
            DiffError::NotAContainer { .. } => ExError::new(ExErrorKind::InvalidInput)
                .with_op("load_document")
                .with_message(message),
        }
    }
}
