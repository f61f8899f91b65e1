//! Copying a template to its destination with variable substitution.
//!
//! Materialization happens in two steps:
//!
//! 1. **Plan**: compute the target name, every directory to create and every
//!    file to write, resolving `$NAME$` tokens in path components when
//!    enabled. Nothing touches the filesystem, so `--dry-run` stops here.
//! 2. **Execute**: create directories, then render files in parallel on the
//!    blocking thread pool. Text files are resolved; binary files are copied
//!    verbatim. Each file is written atomically and keeps its permission bits.

use anyhow::{Context, Result};
use serde::Serialize;
use std::collections::BTreeSet;
use std::ffi::OsString;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;
use walkdir::WalkDir;

use super::{Template, TemplateKind};
use crate::core::NewPlusError;
use crate::utils::fs::{as_template_text, atomic_write, copy_permissions, ensure_dir};
use crate::utils::progress::ProgressBar;
use crate::variables::{VariableMap, VariableSet, find_tokens, resolve, resolve_with_report};

/// Settings for one materialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaterializeOptions {
    /// Resolve `$NAME$` tokens in the target name and nested path components.
    pub replace_in_filenames: bool,
    /// Drop ordering digits from the template name when no name is given.
    pub strip_starting_digits: bool,
    /// Replace an existing target instead of failing.
    pub overwrite: bool,
    /// Only compute the plan.
    pub dry_run: bool,
    /// Render a progress bar while writing files.
    pub show_progress: bool,
}

impl Default for MaterializeOptions {
    fn default() -> Self {
        Self {
            replace_in_filenames: true,
            strip_starting_digits: true,
            overwrite: false,
            dry_run: false,
            show_progress: false,
        }
    }
}

/// What a materialization created (or would create, for a dry run).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MaterializeReport {
    /// The created file or top-level folder.
    pub target: PathBuf,
    /// Directories created, parents first.
    pub directories: Vec<PathBuf>,
    /// Files written.
    pub files: Vec<PathBuf>,
    /// Number of files whose content changed through substitution.
    pub substituted: usize,
    /// Token names left in written content or names, sorted.
    pub unresolved: Vec<String>,
    pub dry_run: bool,
}

#[derive(Debug, Clone)]
struct PlannedFile {
    src: PathBuf,
    dst: PathBuf,
}

#[derive(Debug, Default)]
struct Plan {
    directories: Vec<PathBuf>,
    files: Vec<PlannedFile>,
    unresolved: BTreeSet<String>,
}

#[derive(Debug, Default)]
struct FileOutcome {
    substituted: bool,
    unresolved: Vec<String>,
}

/// Creates files and folders from templates.
///
/// # Examples
///
/// ```rust,no_run
/// use newplus_cli::templates::{
///     discover, find_template, DiscoveryOptions, MaterializeOptions, Materializer,
/// };
/// use newplus_cli::variables::VariableSet;
/// use std::path::Path;
///
/// # async fn example() -> anyhow::Result<()> {
/// let templates = discover(Path::new("templates"), &DiscoveryOptions::default())?;
/// let template = find_template(&templates, "Readme.md")?;
///
/// let dest = Path::new("my-project");
/// let vars = VariableSet::new()
///     .with_target_dir(dest)
///     .with_template_name(&template.display_name);
///
/// let report = Materializer::new(MaterializeOptions::default())
///     .materialize(template, dest, None, vars)
///     .await?;
/// println!("created {}", report.target.display());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct Materializer {
    options: MaterializeOptions,
}

impl Materializer {
    #[must_use]
    pub const fn new(options: MaterializeOptions) -> Self {
        Self {
            options,
        }
    }

    #[must_use]
    pub const fn options(&self) -> &MaterializeOptions {
        &self.options
    }

    /// Compute the name of the item to create inside the destination.
    ///
    /// A requested name without an extension inherits the extension of a
    /// file template. With `replace_in_filenames`, tokens in the name are
    /// resolved against `variables`.
    ///
    /// # Errors
    ///
    /// [`NewPlusError::InvalidTargetName`] if the final name is empty, `.`,
    /// `..`, or contains a path separator.
    pub fn target_name(
        &self,
        template: &Template,
        requested: Option<&str>,
        variables: &VariableMap,
    ) -> Result<String, NewPlusError> {
        let raw = match requested {
            Some(name) => {
                let name = name.trim();
                match (template.kind, Path::new(&template.name).extension()) {
                    (TemplateKind::File, Some(ext)) if Path::new(name).extension().is_none() => {
                        format!("{name}.{}", ext.to_string_lossy())
                    }
                    _ => name.to_string(),
                }
            }
            None => template.default_target_name(self.options.strip_starting_digits),
        };

        let name = if self.options.replace_in_filenames {
            resolve(&raw, variables)
        } else {
            raw
        };
        validate_component(&name)?;
        Ok(name)
    }

    /// Materialize `template` into `dest_dir`.
    ///
    /// `name` overrides the created item's name. `variables` is completed with
    /// `FILE_NAME` / `FILE_BASENAME` once the target name is known.
    ///
    /// # Errors
    ///
    /// - [`NewPlusError::TargetExists`] if the target exists and `overwrite` is off
    /// - [`NewPlusError::InvalidTargetName`] for unusable resolved names
    /// - I/O failures while reading the template or writing the result
    ///
    /// A target created by this call is removed again when writing fails.
    pub async fn materialize(
        &self,
        template: &Template,
        dest_dir: &Path,
        name: Option<&str>,
        variables: VariableSet,
    ) -> Result<MaterializeReport> {
        let target_name: OsString = match template.path.file_name() {
            // names that are not UTF-8 are kept byte for byte
            Some(raw) if name.is_none() && raw.to_str().is_none() => raw.to_os_string(),
            _ => self.target_name(template, name, &variables.build())?.into(),
        };
        let variables = variables.with_file_name(&target_name.to_string_lossy()).build();
        let target = dest_dir.join(&target_name);

        tracing::debug!(
            "Materializing {} template '{}' to {}",
            template.kind,
            template.name,
            target.display()
        );

        let existed = self.check_target(template, &target)?;

        let plan = self.plan(template, &target, &variables)?;

        let mut report = MaterializeReport {
            target: target.clone(),
            directories: plan.directories.clone(),
            files: plan.files.iter().map(|f| f.dst.clone()).collect(),
            substituted: 0,
            unresolved: Vec::new(),
            dry_run: self.options.dry_run,
        };

        let mut unresolved = plan.unresolved;

        if self.options.dry_run {
            report.unresolved = unresolved.into_iter().collect();
            return Ok(report);
        }

        let written = self
            .write_plan(dest_dir, &plan.directories, plan.files, variables)
            .await;
        let outcomes = match written {
            Ok(outcomes) => outcomes,
            Err(e) => {
                if !existed {
                    remove_partial(&target);
                }
                return Err(e);
            }
        };
        for outcome in outcomes {
            if outcome.substituted {
                report.substituted += 1;
            }
            unresolved.extend(outcome.unresolved);
        }
        report.unresolved = unresolved.into_iter().collect();

        if !report.unresolved.is_empty() {
            tracing::warn!(
                "Unresolved variables in {}: {}",
                target.display(),
                report.unresolved.join(", ")
            );
        }

        tracing::info!(
            "Created {} ({} files, {} substituted)",
            target.display(),
            report.files.len(),
            report.substituted
        );
        Ok(report)
    }

    /// Returns whether the target already existed.
    fn check_target(&self, template: &Template, target: &Path) -> Result<bool> {
        if !target.exists() {
            return Ok(false);
        }
        if !self.options.overwrite {
            return Err(NewPlusError::TargetExists {
                path: target.display().to_string(),
            }
            .into());
        }
        let kind_matches = match template.kind {
            TemplateKind::File => target.is_file(),
            TemplateKind::Folder => target.is_dir(),
        };
        if !kind_matches {
            return Err(NewPlusError::FileSystemError {
                operation: format!("cannot overwrite with a {} template", template.kind),
                path: target.display().to_string(),
            }
            .into());
        }
        tracing::debug!("Overwriting existing {}", target.display());
        Ok(true)
    }

    fn plan(&self, template: &Template, target: &Path, variables: &VariableMap) -> Result<Plan> {
        let mut plan = Plan::default();
        if self.options.replace_in_filenames {
            if let Some(name) = target.file_name().and_then(|n| n.to_str()) {
                plan.unresolved.extend(find_tokens(name));
            }
        }

        if template.kind == TemplateKind::File {
            plan.files.push(PlannedFile {
                src: template.path.clone(),
                dst: target.to_path_buf(),
            });
            return Ok(plan);
        }

        plan.directories.push(target.to_path_buf());

        let walker = WalkDir::new(&template.path)
            .min_depth(1)
            .follow_links(false)
            .sort_by_file_name();
        for entry in walker {
            let entry = entry.with_context(|| {
                format!("Failed to traverse template folder: {}", template.path.display())
            })?;
            let file_type = entry.file_type();
            if file_type.is_symlink() {
                tracing::debug!("Skipping symlink {}", entry.path().display());
                continue;
            }

            let relative = entry.path().strip_prefix(&template.path).with_context(|| {
                format!("Entry outside template folder: {}", entry.path().display())
            })?;

            let mut dst = target.to_path_buf();
            for component in relative.components() {
                let Component::Normal(part) = component else {
                    continue;
                };
                let name: OsString = match part.to_str() {
                    Some(text) if self.options.replace_in_filenames => {
                        let resolved = resolve(text, variables);
                        plan.unresolved.extend(find_tokens(&resolved));
                        resolved.into()
                    }
                    _ => part.to_os_string(),
                };
                validate_component(&name.to_string_lossy())?;
                dst.push(name);
            }

            if file_type.is_dir() {
                plan.directories.push(dst);
            } else if file_type.is_file() {
                plan.files.push(PlannedFile {
                    src: entry.path().to_path_buf(),
                    dst,
                });
            }
        }

        Ok(plan)
    }

    async fn write_plan(
        &self,
        dest_dir: &Path,
        directories: &[PathBuf],
        files: Vec<PlannedFile>,
        variables: VariableMap,
    ) -> Result<Vec<FileOutcome>> {
        ensure_dir(dest_dir)?;
        for dir in directories {
            ensure_dir(dir)?;
        }
        self.render_files(files, variables).await
    }

    async fn render_files(
        &self,
        files: Vec<PlannedFile>,
        variables: VariableMap,
    ) -> Result<Vec<FileOutcome>> {
        use futures::future::try_join_all;

        if files.is_empty() {
            return Ok(Vec::new());
        }

        let progress = ProgressBar::new(files.len() as u64, self.options.show_progress);
        progress.set_message("Creating files");
        let variables = Arc::new(variables);

        let mut tasks = Vec::with_capacity(files.len());
        for file in files {
            let variables = Arc::clone(&variables);
            let progress = progress.clone();
            tasks.push(tokio::task::spawn_blocking(move || {
                let outcome = render_file(&file.src, &file.dst, &variables);
                progress.inc(1);
                outcome
            }));
        }

        let results = try_join_all(tasks).await.context("Failed to join file rendering tasks")?;
        progress.finish_and_clear();

        let mut outcomes = Vec::with_capacity(results.len());
        let mut errors = Vec::new();
        for result in results {
            match result {
                Ok(outcome) => outcomes.push(outcome),
                Err(e) => errors.push(format!("  {e:#}")),
            }
        }

        if !errors.is_empty() {
            return Err(anyhow::anyhow!(
                "Failed to write {} files:\n{}",
                errors.len(),
                errors.join("\n")
            ));
        }
        Ok(outcomes)
    }
}

/// Render one template file to `dst`.
fn render_file(src: &Path, dst: &Path, variables: &VariableMap) -> Result<FileOutcome> {
    let bytes = std::fs::read(src)
        .with_context(|| format!("Failed to read template file: {}", src.display()))?;

    let outcome = match as_template_text(&bytes) {
        Some(text) => {
            let resolution = resolve_with_report(text, variables);
            atomic_write(dst, resolution.text.as_bytes())?;
            FileOutcome {
                substituted: resolution.text != text,
                unresolved: resolution.unresolved,
            }
        }
        None => {
            tracing::trace!("Copying binary file {} verbatim", src.display());
            atomic_write(dst, &bytes)?;
            FileOutcome::default()
        }
    };

    copy_permissions(src, dst)?;
    Ok(outcome)
}

/// Remove a target left half-written by a failed materialization.
fn remove_partial(target: &Path) {
    let result = if target.is_dir() {
        std::fs::remove_dir_all(target)
    } else {
        std::fs::remove_file(target)
    };
    match result {
        Ok(()) => tracing::debug!("Removed partially created {}", target.display()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => {
            tracing::warn!("Failed to remove partially created {}: {}", target.display(), e);
        }
    }
}

fn validate_component(name: &str) -> Result<(), NewPlusError> {
    let reason = if name.trim().is_empty() {
        Some("name is empty")
    } else if name == "." || name == ".." {
        Some("name refers to a directory, not an entry")
    } else if name.contains('/') || name.contains('\\') {
        Some("name contains a path separator")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(NewPlusError::InvalidTargetName {
            name: name.to_string(),
            reason: reason.to_string(),
        }),
        None => Ok(()),
    }
}
