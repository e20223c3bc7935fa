//! Error types for classification, routing, configuration and generation

use std::path::PathBuf;

use thiserror::Error;

use crate::model::MemberKind;

/// Faults raised while classifying a class's members.
///
/// These indicate malformed data from the reflection front end and are
/// never recovered from locally.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClassifyError {
    #[error("{kind} '{member}' of '{owner}' has invalid visibility flags ({flags})")]
    InvalidFlags {
        kind: MemberKind,
        member: String,
        owner: String,
        flags: String,
    },

    #[error("private {kind} '{member}' reported as inherited by '{owner}' from '{ancestor}'")]
    PrivateInherited {
        kind: MemberKind,
        member: String,
        owner: String,
        ancestor: String,
    },
}

/// Faults raised by routing entry points.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RouteError {
    #[error("argument for '{operation}' has to be {expected}, {found} given")]
    InvalidArgument {
        operation: &'static str,
        expected: &'static str,
        found: &'static str,
    },

    #[error("'{symbol}' has no source file location")]
    MissingSourceLocation { symbol: String },
}

/// Errors raised while loading the symbol model.
#[derive(Error, Debug)]
pub enum ModelError {
    #[error("failed to read symbol model: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse symbol model: {0}")]
    Parse(#[from] serde_json::Error),

    #[error(transparent)]
    Classify(#[from] ClassifyError),
}

/// Errors raised while loading `stratadoc.toml`.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid value for '{field}': {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Errors raised by a constant store adapter.
#[derive(Error, Debug)]
pub enum ConstantStoreError {
    #[error("failed to read constants from '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse constants in '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Errors raised while laying out a page.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    #[error("failed to format page")]
    Format(#[from] std::fmt::Error),

    #[error(transparent)]
    Route(#[from] RouteError),

    #[error("template error: {0}")]
    Template(String),
}

/// A page that could not be produced.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerateError {
    #[error("page '{page}': {source}")]
    Classify { page: String, source: ClassifyError },

    #[error("page '{page}': {source}")]
    Route { page: String, source: RouteError },

    #[error("page '{page}': failed to read source '{}': {reason}", file.display())]
    Source {
        page: String,
        file: PathBuf,
        reason: String,
    },

    #[error("page '{page}': render failed: {source}")]
    Render { page: String, source: RenderError },
}

impl GenerateError {
    /// The page the error belongs to
    pub fn page(&self) -> &str {
        match self {
            Self::Classify { page, .. }
            | Self::Route { page, .. }
            | Self::Source { page, .. }
            | Self::Render { page, .. } => page,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn route_error_names_operation_and_kind() {
        let err = RouteError::InvalidArgument {
            operation: "link_symbol",
            expected: "a class, interface, trait or function",
            found: "namespace",
        };
        let message = err.to_string();
        assert!(message.contains("'link_symbol'"));
        assert!(message.contains("namespace given"));
    }

    #[test]
    fn classify_error_names_member_and_owner() {
        let err = ClassifyError::PrivateInherited {
            kind: MemberKind::Constant,
            member: "SECRET".to_string(),
            owner: "App\\Child".to_string(),
            ancestor: "App\\Base".to_string(),
        };
        let message = err.to_string();
        assert!(message.contains("SECRET"));
        assert!(message.contains("App\\Child"));
        assert!(message.contains("App\\Base"));
    }

    #[test]
    fn generate_error_exposes_page() {
        let err = GenerateError::Render {
            page: "class-Foo.html".to_string(),
            source: RenderError::Template("boom".to_string()),
        };
        assert_eq!(err.page(), "class-Foo.html");
        assert!(err.to_string().contains("boom"));
    }
}
