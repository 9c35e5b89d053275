use thiserror::Error;

/// Errors produced while translating a declaration into host attributes.
///
/// Every variant aborts the whole request, including any enclosing compound.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("unrecognized data type '{0}'")]
    UnrecognizedType(String),
    #[error("unrecognized array type '{0}'")]
    UnrecognizedCardinality(String),
    #[error("unrecognized port mode '{0}'")]
    UnrecognizedPortMode(String),
    #[error("data type '{data_type}' is not compatible with array type '{cardinality}'")]
    Incompatible {
        data_type: String,
        cardinality: String,
    },
    #[error("data type 'Curve' only supports 'Single Value', use 'Curves' for an array of curves")]
    CurveArray,
    #[error("data type 'Curves' only supports 'Array (Multi)', use 'Curve' for a single curve")]
    CurvesSingle,
    #[error("compound attribute '{name}' requires a nested structure")]
    MissingStructure { name: String },
    #[error("compound attribute '{name}' expects a dictionary structure, found {found}")]
    MalformedStructure { name: String, found: &'static str },
    #[error("invalid attribute declaration: {0}")]
    InvalidDeclaration(String),
    #[error("host rejected attribute '{name}': {message}")]
    Host { name: String, message: String },
    #[error("in child '{path}': {source}")]
    InChild {
        path: String,
        #[source]
        source: Box<BuildError>,
    },
}

impl BuildError {
    pub fn host(name: impl Into<String>, message: impl Into<String>) -> Self {
        BuildError::Host {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Attach a child name to an error raised while building a compound entry.
    /// Nested child errors collapse into one dotted path.
    pub fn in_child(name: &str, err: BuildError) -> Self {
        match err {
            BuildError::InChild { path, source } => BuildError::InChild {
                path: format!("{name}.{path}"),
                source,
            },
            other => BuildError::InChild {
                path: name.to_string(),
                source: Box::new(other),
            },
        }
    }

    /// The innermost error, skipping any child-path wrappers.
    pub fn root_cause(&self) -> &BuildError {
        match self {
            BuildError::InChild { source, .. } => source.root_cause(),
            other => other,
        }
    }

    /// True for any type/cardinality pairing error, including the Curve/Curves ones.
    pub fn is_incompatible(&self) -> bool {
        matches!(
            self.root_cause(),
            BuildError::Incompatible { .. } | BuildError::CurveArray | BuildError::CurvesSingle
        )
    }
}
