use serde::Serialize;

use crate::Role;

/// Everything that can go wrong while reading a sentence or synthesizing its zeros.
///
/// Apart from [`Error::MissingColumn`] all of these are local to one sentence
/// (or one zero inside it); the caller decides whether to carry on.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, Serialize)]
#[serde(tag = "kind")]
pub enum Error {
    #[error("malformed feature string {raw:?}: {reason}")]
    MalformedFeatureString { raw: String, reason: &'static str },

    #[error("token {token}: {role} zero needs feature {feature}, which is absent")]
    MissingRequiredFeature {
        token: String,
        role: Role,
        feature: &'static str,
    },

    #[error("token {token}: {role} zero cannot be derived from {feature}={value}")]
    UnexpectedFeatureValue {
        token: String,
        role: Role,
        feature: &'static str,
        value: String,
    },

    #[error("token {token}: no pronoun for Number={number}, Person={person}")]
    UnknownPronounForm {
        token: String,
        number: String,
        person: String,
    },

    #[error("token {token}: head {head} does not exist in this sentence")]
    DanglingHeadReference { token: String, head: String },

    #[error("token id {id} is already taken in this sentence")]
    DuplicateTokenId { id: String },

    #[error("header has no column for required field {field}")]
    MissingColumn { field: &'static str },

    #[error("row has {found} columns, header has {expected}")]
    RaggedRow { expected: usize, found: usize },

    #[error("input line {line} is not valid UTF-8")]
    InvalidEncoding { line: usize },
}

impl Error {
    /// Stable name of the error kind, used in logs and reports.
    pub fn kind(&self) -> &'static str {
        match self {
            Error::MalformedFeatureString { .. } => "MalformedFeatureString",
            Error::MissingRequiredFeature { .. } => "MissingRequiredFeature",
            Error::UnexpectedFeatureValue { .. } => "UnexpectedFeatureValue",
            Error::UnknownPronounForm { .. } => "UnknownPronounForm",
            Error::DanglingHeadReference { .. } => "DanglingHeadReference",
            Error::DuplicateTokenId { .. } => "DuplicateTokenId",
            Error::MissingColumn { .. } => "MissingColumn",
            Error::RaggedRow { .. } => "RaggedRow",
            Error::InvalidEncoding { .. } => "InvalidEncoding",
        }
    }
}

/// A problem found while processing one sentence, with enough context to trace it back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub sentence: usize,
    /// Id of the real token the problem is attached to
    pub anchor: String,
    #[serde(flatten)]
    pub error: Error,
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "sentence {}, token {}: {}",
            self.sentence, self.anchor, self.error
        )
    }
}
