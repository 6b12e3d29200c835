use thiserror::Error;

/// Failures raised while building a namespace, group or entry.
///
/// None of these are fatal to the session: the registry logs them and skips
/// the offending registration, leaving siblings untouched.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SchemaError {
    /// Identifier does not match the naming rule.
    #[error("\"{0}\" is not a valid identifier")]
    InvalidIdentifier(String),

    /// One or more required fields are absent from an entry spec.
    #[error("missing the following required parameters: [{}] in {spec}", missing.join(", "))]
    MissingParameters {
        missing: Vec<&'static str>,
        spec: String,
    },

    /// Declared entry type is not one of the supported kinds.
    #[error("'{0}' does not match any supported input types")]
    UnsupportedType(String),

    /// Default value cannot be represented by the declared kind.
    #[error("entry '{key}': invalid default value: {reason}")]
    InvalidDefault { key: String, reason: String },

    /// Identifier already taken within its scope.
    #[error("{scope} '{id}' is already registered")]
    DuplicateIdentifier { scope: &'static str, id: String },
}
