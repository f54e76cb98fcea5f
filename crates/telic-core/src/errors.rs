use std::sync::Arc;

use thiserror::Error;

/// Result type alias using TelicError
pub type Result<T> = std::result::Result<T, TelicError>;

/// Error type returned by caller-supplied transform and purpose functions
///
/// Any error type converts into it with `?` or `.into()`, including plain
/// strings: `Err("bad input".into())`.
pub type UserError = Box<dyn std::error::Error + Send + Sync + 'static>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that can be used for programmatic
/// error handling, testing and structured log fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Caller input
    InvalidArgument,

    // Transform contract
    InvalidTransformResult,
    UserFunction,

    // Configuration
    InvalidConfig,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidArgument => "ERR_INVALID_ARGUMENT",
            ExErrorKind::InvalidTransformResult => "ERR_INVALID_TRANSFORM_RESULT",
            ExErrorKind::UserFunction => "ERR_USER_FUNCTION",
            ExErrorKind::InvalidConfig => "ERR_INVALID_CONFIG",
        }
    }
}

/// Canonical structured error type
///
/// Carries classification fields for programmatic handling plus the
/// operation and recursion depth a failure occurred at.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    depth: Option<u32>,
    message: String,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            depth: None,
            message: String::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add recursion depth context
    pub fn with_depth(mut self, depth: u32) -> Self {
        self.depth = Some(depth);
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

    /// Get the recursion depth context, if any
    pub fn depth(&self) -> Option<u32> {
        self.depth
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
        if let Some(depth) = self.depth {
            write!(f, " (depth: {})", depth)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Error taxonomy for state container operations
#[derive(Error, Debug, Clone)]
pub enum TelicError {
    /// A caller-supplied argument is out of range or has the wrong shape
    #[error("Invalid argument '{argument}' in {op}: {reason}")]
    InvalidArgument {
        op: &'static str,
        argument: &'static str,
        reason: String,
    },

    /// A transform or purpose function produced something that cannot become the payload
    #[error("Invalid transform result in {op}: expected a mapping, got {found}")]
    InvalidTransformResult { op: &'static str, found: &'static str },

    /// A caller-supplied function failed; the original error is kept as the source
    #[error("User function failed in {op}{}: {source}", depth_suffix(.depth))]
    UserFunction {
        op: &'static str,
        depth: Option<u32>,
        #[source]
        source: Arc<dyn std::error::Error + Send + Sync + 'static>,
    },

    /// Configuration could not be parsed or contains unknown keys
    #[error("Invalid configuration: {reason}")]
    InvalidConfig { reason: String },
}

fn depth_suffix(depth: &Option<u32>) -> String {
    depth.map(|d| format!(" at depth {}", d)).unwrap_or_default()
}

impl TelicError {
    /// Wrap an error returned by a caller-supplied function
    pub fn user_function(op: &'static str, depth: Option<u32>, source: UserError) -> Self {
        TelicError::UserFunction {
            op,
            depth,
            source: Arc::from(source),
        }
    }

    /// Get the error raised by the caller's function, if this is a `UserFunction` error
    pub fn user_source(&self) -> Option<&(dyn std::error::Error + Send + Sync + 'static)> {
        match self {
            TelicError::UserFunction { source, .. } => Some(source.as_ref()),
            _ => None,
        }
    }

    /// Get the canonical error kind
    pub fn kind(&self) -> ExErrorKind {
        match self {
            TelicError::InvalidArgument { .. } => ExErrorKind::InvalidArgument,
            TelicError::InvalidTransformResult { .. } => ExErrorKind::InvalidTransformResult,
            TelicError::UserFunction { .. } => ExErrorKind::UserFunction,
            TelicError::InvalidConfig { .. } => ExErrorKind::InvalidConfig,
        }
    }
}

impl From<&TelicError> for ExError {
    fn from(err: &TelicError) -> Self {
        let message = err.to_string();
        match *err {
            TelicError::InvalidArgument { op, .. } => ExError::new(ExErrorKind::InvalidArgument)
                .with_op(op)
                .with_message(message),

            TelicError::InvalidTransformResult { op, .. } => {
                ExError::new(ExErrorKind::InvalidTransformResult)
                    .with_op(op)
                    .with_message(message)
            }

            TelicError::UserFunction { op, depth, .. } => {
                let ex = ExError::new(ExErrorKind::UserFunction)
                    .with_op(op)
                    .with_message(message);
                match depth {
                    Some(d) => ex.with_depth(d),
                    None => ex,
                }
            }

            TelicError::InvalidConfig { .. } => ExError::new(ExErrorKind::InvalidConfig)
                .with_op("load_config")
                .with_message(message),
        }
    }
}

impl From<TelicError> for ExError {
    fn from(err: TelicError) -> Self {
        ExError::from(&err)
    }
}
