//! `$NAME$` token substitution.
//!
//! The resolver replaces every `$NAME$` token whose name is present in a
//! [`VariableMap`] with the mapped value. Values may themselves contain tokens;
//! those are resolved by further passes, up to [`MAX_PASSES`] in total.
//!
//! # Token Syntax
//!
//! A token is a dollar sign, a name matching `[A-Z_][A-Z0-9_]*`, and a closing
//! dollar sign. Matching is case-sensitive and runs left to right without
//! overlap, so `$A$$B$` yields the two tokens `A` and `B` while `$$` and
//! `$lower$` are never tokens.
//!
//! # Cycles
//!
//! Every piece of substituted text remembers the chain of names whose
//! expansion produced it. A token naming a member of its own chain is left
//! literally in place, so `X = "$X$"` resolves to `$X$` and
//! `A = "$B$", B = "$A$"` resolves `$A$` to `$A$` after two passes. The same
//! name used in unrelated places is still substituted everywhere.
//!
//! Each pass scans the whole current text. A token that only appears once a
//! value is joined with its neighbours (`A = "$"` in `$A$B$`) is resolved
//! too, and carries the chains of every piece it spans.
//!
//! # Examples
//!
//! ```rust
//! use newplus_cli::variables::{resolve, VariableMap};
//!
//! let mut vars = VariableMap::new();
//! vars.insert("NAME".to_string(), "World".to_string());
//!
//! assert_eq!(resolve("Hello $NAME$!", &vars), "Hello World!");
//! assert_eq!(resolve("$MISSING$", &vars), "$MISSING$");
//! ```

use regex::Regex;
use std::collections::BTreeSet;
use std::sync::OnceLock;

use super::VariableMap;

/// Maximum number of substitution passes over a template.
///
/// Reaching the limit is not an error: the partially resolved text is
/// returned and a warning is logged.
pub const MAX_PASSES: usize = 10;

/// Regex matching a single `$NAME$` token. Group 1 is the name.
pub const TOKEN_PATTERN: &str = r"\$([A-Z_][A-Z0-9_]*)\$";

fn token_regex() -> &'static Regex {
    static TOKEN: OnceLock<Regex> = OnceLock::new();
    TOKEN.get_or_init(|| Regex::new(TOKEN_PATTERN).unwrap())
}

/// Outcome of a resolution, for callers that want more than the text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// The resolved text.
    pub text: String,
    /// Number of passes that substituted at least one token.
    pub passes: usize,
    /// Whether resolution stopped at [`MAX_PASSES`] with work remaining.
    pub limit_reached: bool,
    /// Distinct token names still present in `text`, in order of first appearance.
    pub unresolved: Vec<String>,
    /// Names left literal because they referenced their own expansion chain.
    pub cycles: Vec<String>,
}

impl Resolution {
    /// Returns `true` if no token remains in the resolved text.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.unresolved.is_empty()
    }
}

/// A run of text together with the names whose expansion produced it.
#[derive(Debug, Clone)]
struct Segment {
    text: String,
    chain: Vec<String>,
}

impl Segment {
    fn root(text: &str) -> Self {
        Self {
            text: text.to_string(),
            chain: Vec::new(),
        }
    }
}

/// Resolve all known `$NAME$` tokens in `template`.
///
/// Unknown tokens stay in the output verbatim. The function never fails and
/// never mutates `variables`.
///
/// # Examples
///
/// ```rust
/// use newplus_cli::variables::{resolve, VariableMap};
///
/// let vars: VariableMap = [("A", "$B$"), ("B", "$C$"), ("C", "done")]
///     .into_iter()
///     .map(|(k, v)| (k.to_string(), v.to_string()))
///     .collect();
///
/// assert_eq!(resolve("$A$", &vars), "done");
/// ```
#[must_use]
pub fn resolve(template: &str, variables: &VariableMap) -> String {
    resolve_with_report(template, variables).text
}

/// Resolve `template` and report how resolution went.
///
/// See [`resolve`] for the substitution rules.
#[must_use]
pub fn resolve_with_report(template: &str, variables: &VariableMap) -> Resolution {
    if template.is_empty() || variables.is_empty() || !template.contains('$') {
        return Resolution {
            text: template.to_string(),
            passes: 0,
            limit_reached: false,
            unresolved: find_tokens(template),
            cycles: Vec::new(),
        };
    }

    let mut segments = vec![Segment::root(template)];
    let mut cycles = BTreeSet::new();
    let mut passes = 0;

    while passes < MAX_PASSES {
        let (next, changed) = substitute_pass(segments, variables, &mut cycles);
        segments = next;
        if !changed {
            break;
        }
        passes += 1;
        tracing::trace!("Substitution pass {} of max {}", passes, MAX_PASSES);
    }

    let limit_reached = passes == MAX_PASSES && has_pending(&segments, variables);
    let text: String = segments.into_iter().map(|s| s.text).collect();

    if limit_reached {
        tracing::warn!(
            "Variable substitution stopped after {} passes; output may be partially resolved",
            MAX_PASSES
        );
    }

    Resolution {
        unresolved: find_tokens(&text),
        text,
        passes,
        limit_reached,
        cycles: cycles.into_iter().collect(),
    }
}

/// Run one left-to-right pass over the whole current text.
///
/// Tokens are matched in the joined text, so a token formed where a value
/// meets its neighbours is found like any other. A token inherits the chains
/// of every segment it overlaps.
///
/// Returns the new segment list and whether anything was substituted.
fn substitute_pass(
    segments: Vec<Segment>,
    variables: &VariableMap,
    cycles: &mut BTreeSet<String>,
) -> (Vec<Segment>, bool) {
    let layout = Layout::new(&segments);
    let mut out = Vec::with_capacity(segments.len());
    let mut last = 0;
    let mut changed = false;

    for caps in token_regex().captures_iter(&layout.text) {
        let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        let name = name.as_str();

        let mut chain = layout.chain(whole.start(), whole.end());
        if chain.iter().any(|n| n == name) {
            cycles.insert(name.to_string());
            continue;
        }

        let Some(value) = variables.get(name) else {
            continue;
        };

        layout.copy_range(last, whole.start(), &mut out);
        chain.push(name.to_string());
        if !value.is_empty() {
            out.push(Segment {
                text: value.clone(),
                chain,
            });
        }

        last = whole.end();
        changed = true;
    }

    if !changed {
        return (segments, false);
    }
    layout.copy_range(last, layout.text.len(), &mut out);
    (out, true)
}

/// Whether another pass would substitute something.
fn has_pending(segments: &[Segment], variables: &VariableMap) -> bool {
    let layout = Layout::new(segments);
    token_regex().captures_iter(&layout.text).any(|caps| {
        match (caps.get(0), caps.get(1)) {
            (Some(whole), Some(name)) => {
                let name = name.as_str();
                variables.contains_key(name)
                    && !layout.chain(whole.start(), whole.end()).iter().any(|n| n == name)
            }
            _ => false,
        }
    })
}

/// Segments joined into one string, with the byte offset of each segment.
struct Layout<'a> {
    segments: &'a [Segment],
    starts: Vec<usize>,
    text: String,
}

impl<'a> Layout<'a> {
    fn new(segments: &'a [Segment]) -> Self {
        let mut starts = Vec::with_capacity(segments.len());
        let mut text = String::new();
        for segment in segments {
            starts.push(text.len());
            text.push_str(&segment.text);
        }
        Self {
            segments,
            starts,
            text,
        }
    }

    /// Segments overlapping `start..end`, with their offsets.
    ///
    /// Segments are never empty, so the one holding byte `start` is the last
    /// one starting at or before it.
    fn overlapping(
        &self,
        start: usize,
        end: usize,
    ) -> impl Iterator<Item = (&'a Segment, usize)> + '_ {
        let first = self.starts.partition_point(|&s| s <= start).saturating_sub(1);
        self.segments[first..]
            .iter()
            .zip(self.starts[first..].iter().copied())
            .take_while(move |(_, offset)| *offset < end)
    }

    /// Union of the chains of every segment overlapping `start..end`.
    fn chain(&self, start: usize, end: usize) -> Vec<String> {
        let mut chain: Vec<String> = Vec::new();
        for (segment, _) in self.overlapping(start, end) {
            for name in &segment.chain {
                if !chain.contains(name) {
                    chain.push(name.clone());
                }
            }
        }
        chain
    }

    /// Append the text in `start..end`, keeping each part's chain.
    fn copy_range(&self, start: usize, end: usize, out: &mut Vec<Segment>) {
        for (segment, offset) in self.overlapping(start, end) {
            let from = start.max(offset) - offset;
            let to = end.min(offset + segment.text.len()) - offset;
            if from < to {
                out.push(Segment {
                    text: segment.text[from..to].to_string(),
                    chain: segment.chain.clone(),
                });
            }
        }
    }
}

/// List the distinct token names in `text`, in order of first appearance.
///
/// # Examples
///
/// ```rust
/// use newplus_cli::variables::find_tokens;
///
/// assert_eq!(find_tokens("$A$ $b$ $B$ $A$"), vec!["A", "B"]);
/// ```
#[must_use]
pub fn find_tokens(text: &str) -> Vec<String> {
    let mut seen = BTreeSet::new();
    let mut names = Vec::new();
    for caps in token_regex().captures_iter(text) {
        if let Some(name) = caps.get(1) {
            if seen.insert(name.as_str()) {
                names.push(name.as_str().to_string());
            }
        }
    }
    names
}

/// Check whether `name` is a usable variable name (`[A-Z_][A-Z0-9_]*`).
#[must_use]
pub fn is_valid_variable_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_uppercase() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_')
}
