//! Error types shared by every stage of the codec.

/// Errors that can occur while decoding or encoding VCF text
#[derive(Debug, thiserror::Error)]
pub enum VcfError {
    /// `##INFO`/`##FORMAT` line does not match the declaration grammar
    #[error("Invalid field declaration: '{0}'")]
    InvalidDeclaration(String),

    /// Unrecognized `Number=` token
    #[error("Invalid cardinality: '{0}'")]
    InvalidCardinality(String),

    /// Unrecognized `Type=` token
    #[error("Invalid value type: '{0}'")]
    InvalidValueType(String),

    /// Nested annotation expansion requested for a description that is not an annotation block
    #[error("Invalid nested annotation metadata: '{0}'")]
    InvalidNestedMetadata(String),

    /// Character token is not exactly one character
    #[error("Invalid character: '{0}'")]
    InvalidCharacter(String),

    /// Integer or float token is not a number
    #[error("Invalid number: '{0}'")]
    InvalidNumber(String),

    /// Flag token is neither `true` nor `false`
    #[error("Invalid flag: '{0}'")]
    InvalidFlag(String),

    /// Required string is missing or empty
    #[error("Invalid string: '{0}'")]
    InvalidString(String),

    /// Nested annotation entry has the wrong number of parts
    #[error("Nested value '{token}' has {actual} parts, expected {expected}")]
    NestedArityMismatch {
        /// Offending token
        token: String,
        /// Number of declared child fields
        expected: usize,
        /// Number of parts found in the token
        actual: usize,
    },

    /// Data line cannot be split into the fixed columns
    #[error("Malformed record: {0}")]
    MalformedRecord(String),

    /// INFO key without a `##INFO` declaration
    #[error("Unknown INFO field: '{0}'")]
    UnknownInfoField(String),

    /// FORMAT key without a `##FORMAT` declaration
    #[error("Unknown FORMAT field: '{0}'")]
    UnknownFormatField(String),

    /// Value shape disagrees with its field schema
    #[error("Value for field '{field}' does not match its schema, expected {expected}")]
    ValueTypeMismatch {
        /// Field identifier
        field: String,
        /// Expected value shape
        expected: String,
    },

    /// Failure while decoding a specific line of a document
    #[error("Line {line}: {source}")]
    Line {
        /// 1-based line number
        line: usize,
        /// Underlying error
        source: Box<VcfError>,
    },

    /// Supplementary schema could not be deserialized
    #[error("Supplementary schema error: {0}")]
    Supplement(#[from] serde_json::Error),

    /// I/O error from a streaming writer
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl VcfError {
    /// Attach a 1-based line number to this error
    pub fn at_line(self, line: usize) -> Self {
        VcfError::Line {
            line,
            source: Box::new(self),
        }
    }

    /// The underlying error with any line context removed
    pub fn root(&self) -> &VcfError {
        match self {
            VcfError::Line { source, .. } => source.root(),
            other => other,
        }
    }
}

/// Result type for codec operations
pub type Result<T> = std::result::Result<T, VcfError>;
