//! Template variables and `$NAME$` substitution.
//!
//! - [`resolver`]: the substitution engine ([`resolve`], [`resolve_with_report`])
//! - [`builtins`]: date/time, user, platform, random and UUID values
//! - [`context`]: layering built-ins, context, config and command-line values

pub mod builtins;
pub mod context;
pub mod resolver;

use std::collections::HashMap;

/// Mapping from variable name to replacement text.
pub type VariableMap = HashMap<String, String>;

pub use builtins::{BUILTIN_NAMES, builtins, builtins_at, platform_id};
pub use context::{VariableSet, parse_assignment};
pub use resolver::{
    MAX_PASSES, Resolution, find_tokens, is_valid_variable_name, resolve, resolve_with_report,
};
