//! Assembly of the variable mapping for one creation request.
//!
//! Sources are layered in a fixed precedence order, later layers winning:
//!
//! 1. built-in variables ([`super::builtins`])
//! 2. context variables describing the destination and template
//! 3. user variables from the `[variables]` table of the config file
//! 4. `--var NAME=VALUE` overrides from the command line

use std::collections::BTreeMap;
use std::path::Path;

use crate::core::NewPlusError;

use super::{VariableMap, builtins, is_valid_variable_name};

/// Context variable: file name of the destination directory.
pub const TARGET_DIR: &str = "TARGET_DIR";
/// Context variable: full path of the destination directory.
pub const TARGET_PATH: &str = "TARGET_PATH";
/// Context variable: display name of the template.
pub const TEMPLATE_NAME: &str = "TEMPLATE_NAME";
/// Context variable: name of the file or folder being created.
pub const FILE_NAME: &str = "FILE_NAME";
/// Context variable: [`FILE_NAME`] without its final extension.
pub const FILE_BASENAME: &str = "FILE_BASENAME";

/// Builder for the variable mapping handed to the resolver.
///
/// # Examples
///
/// ```rust
/// use newplus_cli::variables::VariableSet;
/// use std::path::Path;
///
/// let vars = VariableSet::new()
///     .with_target_dir(Path::new("/work/project"))
///     .with_override("AUTHOR", "Jane")
///     .unwrap()
///     .build();
///
/// assert_eq!(vars["TARGET_DIR"], "project");
/// assert_eq!(vars["AUTHOR"], "Jane");
/// assert!(vars.contains_key("DATE"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct VariableSet {
    builtins: VariableMap,
    context: VariableMap,
    user: VariableMap,
    overrides: VariableMap,
}

impl VariableSet {
    /// Start a set seeded with freshly captured built-in variables.
    #[must_use]
    pub fn new() -> Self {
        Self::with_builtins(builtins())
    }

    /// Start a set seeded with the given built-in layer.
    #[must_use]
    pub fn with_builtins(builtins: VariableMap) -> Self {
        Self {
            builtins,
            ..Self::default()
        }
    }

    /// Start a set with no built-in layer at all.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Record the destination directory as `TARGET_DIR` and `TARGET_PATH`.
    #[must_use]
    pub fn with_target_dir(mut self, dir: &Path) -> Self {
        let name = dir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| dir.to_string_lossy().into_owned());
        self.context.insert(TARGET_DIR.to_string(), name);
        self.context.insert(TARGET_PATH.to_string(), dir.to_string_lossy().into_owned());
        self
    }

    /// Record the template's display name as `TEMPLATE_NAME`.
    #[must_use]
    pub fn with_template_name(mut self, name: &str) -> Self {
        self.context.insert(TEMPLATE_NAME.to_string(), name.to_string());
        self
    }

    /// Record the created item's name as `FILE_NAME` and `FILE_BASENAME`.
    #[must_use]
    pub fn with_file_name(mut self, name: &str) -> Self {
        let base = Path::new(name)
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| name.to_string());
        self.context.insert(FILE_NAME.to_string(), name.to_string());
        self.context.insert(FILE_BASENAME.to_string(), base);
        self
    }

    /// Add the configured user variables.
    ///
    /// # Errors
    ///
    /// Returns [`NewPlusError::InvalidVariableName`] for names that can never
    /// match a token.
    pub fn with_user_variables(
        mut self,
        vars: &BTreeMap<String, String>,
    ) -> Result<Self, NewPlusError> {
        for (name, value) in vars {
            check_name(name)?;
            self.user.insert(name.clone(), value.clone());
        }
        Ok(self)
    }

    /// Add a single command-line override.
    ///
    /// # Errors
    ///
    /// Returns [`NewPlusError::InvalidVariableName`] for invalid names.
    pub fn with_override(
        mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<Self, NewPlusError> {
        let name = name.into();
        check_name(&name)?;
        self.overrides.insert(name, value.into());
        Ok(self)
    }

    /// Add several command-line overrides.
    ///
    /// # Errors
    ///
    /// Returns [`NewPlusError::InvalidVariableName`] for invalid names.
    pub fn with_overrides<I>(self, pairs: I) -> Result<Self, NewPlusError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        pairs.into_iter().try_fold(self, |set, (name, value)| set.with_override(name, value))
    }

    /// Flatten all layers into one mapping.
    #[must_use]
    pub fn build(&self) -> VariableMap {
        let mut merged = self.builtins.clone();
        for layer in [&self.context, &self.user, &self.overrides] {
            merged.extend(layer.iter().map(|(k, v)| (k.clone(), v.clone())));
        }
        merged
    }
}

fn check_name(name: &str) -> Result<(), NewPlusError> {
    if is_valid_variable_name(name) {
        Ok(())
    } else {
        Err(NewPlusError::InvalidVariableName {
            name: name.to_string(),
        })
    }
}

/// Parse a `NAME=VALUE` command-line assignment.
///
/// The value may be empty and may itself contain `=`.
///
/// # Errors
///
/// Returns [`NewPlusError::InvalidVariableName`] when there is no `=` or the
/// name is not a valid variable name.
pub fn parse_assignment(input: &str) -> Result<(String, String), NewPlusError> {
    let Some((name, value)) = input.split_once('=') else {
        return Err(NewPlusError::InvalidVariableName {
            name: input.to_string(),
        });
    };
    let name = name.trim();
    check_name(name)?;
    Ok((name.to_string(), value.to_string()))
}
