//! Error handling for newplus
//!
//! The error system is built around two types:
//! - [`NewPlusError`] - strongly-typed failures for code that needs to match on them
//! - [`ErrorContext`] - a wrapper adding user-facing details and suggestions
//!
//! Command implementations return [`anyhow::Result`]; typed errors are raised as
//! [`NewPlusError`] and travel through `anyhow` untouched. At the top level,
//! [`user_friendly_error`] finds the most specific error in the chain and turns
//! it into an [`ErrorContext`] that `main` prints to stderr.
//!
//! Variable substitution itself never fails. Everything that can fail lives
//! around it: locating templates, writing the result and reading the config.
//!
//! # Examples
//!
//! ```rust,no_run
//! use newplus_cli::core::{NewPlusError, user_friendly_error};
//!
//! let error = NewPlusError::TargetExists {
//!     path: "notes.md".to_string(),
//! };
//! let ctx = user_friendly_error(anyhow::Error::from(error));
//! ctx.display(); // Prints the error with a suggestion to use --force
//! ```

use colored::Colorize;
use std::fmt;
use thiserror::Error;

/// Typed failures raised by newplus.
///
/// Use [`user_friendly_error`] to obtain an [`ErrorContext`] with actionable
/// suggestions for any of these.
#[derive(Error, Debug)]
pub enum NewPlusError {
    /// The configured templates directory does not exist
    ///
    /// Run `newplus init` to create it with a couple of sample templates, or
    /// point `templates_dir` in the config file at an existing directory.
    #[error("Templates directory not found: {path}")]
    TemplatesDirNotFound {
        /// The directory that was searched
        path: String,
    },

    /// No template matches the requested name
    #[error("Template '{name}' not found")]
    TemplateNotFound {
        /// The name the user asked for
        name: String,
        /// Close matches among the discovered templates
        suggestions: Vec<String>,
    },

    /// The file or folder to be created already exists
    #[error("Target already exists: {path}")]
    TargetExists {
        /// The path that would have been overwritten
        path: String,
    },

    /// A target file or folder name is unusable after substitution
    #[error("Invalid target name '{name}': {reason}")]
    InvalidTargetName {
        /// The offending name
        name: String,
        /// Why it was rejected
        reason: String,
    },

    /// A variable name does not match `[A-Z_][A-Z0-9_]*`
    #[error("Invalid variable name '{name}'")]
    InvalidVariableName {
        /// The rejected name
        name: String,
    },

    /// Tokens remained after substitution in strict mode
    #[error("Unresolved variables: {}", names.join(", "))]
    UnresolvedVariables {
        /// Distinct token names left in the output
        names: Vec<String>,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    ConfigError {
        /// Description of the configuration error
        message: String,
    },

    /// File system operation failed
    #[error("File system error: {operation}")]
    FileSystemError {
        /// The operation that failed
        operation: String,
        /// The path involved
        path: String,
    },

    /// Permission denied
    #[error("Permission denied: {operation}")]
    PermissionDenied {
        /// The operation that was denied
        operation: String,
        /// The path involved
        path: String,
    },

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    /// Other error
    #[error("{message}")]
    Other {
        /// Generic error message
        message: String,
    },
}

impl Clone for NewPlusError {
    fn clone(&self) -> Self {
        match self {
            Self::TemplatesDirNotFound {
                path,
            } => Self::TemplatesDirNotFound {
                path: path.clone(),
            },
            Self::TemplateNotFound {
                name,
                suggestions,
            } => Self::TemplateNotFound {
                name: name.clone(),
                suggestions: suggestions.clone(),
            },
            Self::TargetExists {
                path,
            } => Self::TargetExists {
                path: path.clone(),
            },
            Self::InvalidTargetName {
                name,
                reason,
            } => Self::InvalidTargetName {
                name: name.clone(),
                reason: reason.clone(),
            },
            Self::InvalidVariableName {
                name,
            } => Self::InvalidVariableName {
                name: name.clone(),
            },
            Self::UnresolvedVariables {
                names,
            } => Self::UnresolvedVariables {
                names: names.clone(),
            },
            Self::ConfigError {
                message,
            } => Self::ConfigError {
                message: message.clone(),
            },
            Self::FileSystemError {
                operation,
                path,
            } => Self::FileSystemError {
                operation: operation.clone(),
                path: path.clone(),
            },
            Self::PermissionDenied {
                operation,
                path,
            } => Self::PermissionDenied {
                operation: operation.clone(),
                path: path.clone(),
            },
            // io::Error and toml errors are not Clone; keep kind and message
            Self::IoError(e) => Self::IoError(std::io::Error::new(e.kind(), e.to_string())),
            Self::TomlError(e) => Self::Other {
                message: format!("TOML parsing error: {e}"),
            },
            Self::Other {
                message,
            } => Self::Other {
                message: message.clone(),
            },
        }
    }
}

/// An error together with optional details and a suggestion for the user.
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying error
    pub error: NewPlusError,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a context with no details or suggestion.
    #[must_use]
    pub const fn new(error: NewPlusError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    /// Add a suggestion for resolving the error
    ///
    /// Suggestions are printed in green.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add additional details explaining the error
    ///
    /// Details are printed in yellow.
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Print the error, details and suggestion to stderr with colors.
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Convert any error to a user-friendly [`ErrorContext`] with suggestions
///
/// The whole `anyhow` chain is searched, so a [`NewPlusError`] wrapped in
/// `.context(...)` layers is still recognized:
/// - [`ErrorContext`] values are passed through
/// - [`NewPlusError`] variants get tailored suggestions
/// - [`std::io::Error`] gets filesystem-specific guidance
/// - [`toml::de::Error`] gets config syntax help
/// - anything else is reported with its full cause chain
#[must_use]
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    for cause in error.chain() {
        if let Some(ctx) = cause.downcast_ref::<ErrorContext>() {
            return ErrorContext {
                error: ctx.error.clone(),
                suggestion: ctx.suggestion.clone(),
                details: ctx.details.clone(),
            };
        }
        if let Some(newplus_error) = cause.downcast_ref::<NewPlusError>() {
            return create_error_context(newplus_error.clone());
        }
    }

    if let Some(io_error) = error.chain().find_map(|c| c.downcast_ref::<std::io::Error>()) {
        let location = error.to_string();
        match io_error.kind() {
            std::io::ErrorKind::PermissionDenied => {
                return ErrorContext::new(NewPlusError::PermissionDenied {
                    operation: "file access".to_string(),
                    path: location,
                })
                .with_suggestion(
                    "Check ownership and permissions of the templates and destination directories",
                )
                .with_details("newplus could not read a template or write into the destination");
            }
            std::io::ErrorKind::NotFound => {
                return ErrorContext::new(NewPlusError::FileSystemError {
                    operation: "file access".to_string(),
                    path: location,
                })
                .with_suggestion("Check that the file or directory exists and the path is correct");
            }
            std::io::ErrorKind::AlreadyExists => {
                return ErrorContext::new(NewPlusError::FileSystemError {
                    operation: "file creation".to_string(),
                    path: location,
                })
                .with_suggestion("Remove the existing file or use --force to overwrite");
            }
            _ => {}
        }
    }

    if let Some(toml_error) = error.chain().find_map(|c| c.downcast_ref::<toml::de::Error>()) {
        return ErrorContext::new(NewPlusError::ConfigError {
            message: toml_error.to_string(),
        })
        .with_suggestion("Check the TOML syntax of your config file (see 'newplus config path')")
        .with_details("TOML errors are usually caused by missing quotes or mismatched brackets");
    }

    // Generic error - include the full error chain for better diagnostics
    let mut message = error.to_string();
    let chain: Vec<String> =
        error.chain().skip(1).map(std::string::ToString::to_string).collect();

    if !chain.is_empty() {
        message.push_str("\n\nCaused by:");
        for (i, cause) in chain.iter().enumerate() {
            message.push_str(&format!("\n  {}: {}", i + 1, cause));
        }
    }

    ErrorContext::new(NewPlusError::Other {
        message,
    })
}

/// Map each [`NewPlusError`] variant to an [`ErrorContext`] with suggestions.
fn create_error_context(error: NewPlusError) -> ErrorContext {
    match &error {
        NewPlusError::TemplatesDirNotFound { path } => {
            let details = format!("newplus looks for templates in {path}");
            ErrorContext::new(error)
                .with_suggestion(
                    "Run 'newplus init' to create it, or point to another directory with \
                     'newplus config set templates_dir <DIR>'",
                )
                .with_details(details)
        }

        NewPlusError::TemplateNotFound { suggestions, .. } => {
            let suggestion = if suggestions.is_empty() {
                "Run 'newplus list' to see the available templates".to_string()
            } else {
                format!("Did you mean: {}?", suggestions.join(", "))
            };
            ErrorContext::new(error).with_suggestion(suggestion)
        }

        NewPlusError::TargetExists { .. } => ErrorContext::new(error)
            .with_suggestion("Choose another name with --name, or pass --force to overwrite")
            .with_details("newplus never overwrites existing files unless asked to"),

        NewPlusError::InvalidTargetName { .. } => ErrorContext::new(error)
            .with_suggestion(
                "Check the variables used in the template's file names, or pass --no-filename-vars",
            ),

        NewPlusError::InvalidVariableName { .. } => ErrorContext::new(error)
            .with_suggestion(
                "Use uppercase letters, digits and underscores, not starting with a digit, \
                 e.g. PROJECT_NAME=demo",
            )
            .with_details("Only names matching [A-Z_][A-Z0-9_]* can appear in $NAME$ tokens"),

        NewPlusError::UnresolvedVariables { .. } => ErrorContext::new(error)
            .with_suggestion(
                "Define the missing variables with --var NAME=VALUE or in the [variables] \
                 table of the config file",
            ),

        NewPlusError::ConfigError { .. } => ErrorContext::new(error)
            .with_suggestion(
                "Inspect the config with 'newplus config show' or recreate it with \
                 'newplus init --force'",
            ),

        NewPlusError::PermissionDenied { operation, path } => {
            let details = format!("Cannot {operation} due to insufficient permissions on {path}");
            ErrorContext::new(error)
                .with_suggestion(if cfg!(windows) {
                    "Check file permissions in File Explorer"
                } else {
                    "Check file permissions with 'ls -la'"
                })
                .with_details(details)
        }

        _ => ErrorContext::new(error),
    }
}
