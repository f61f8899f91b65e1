//! Test environment builder for simplified test setup

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::config::GlobalConfig;
use crate::variables::VariableSet;

/// Builder for an isolated templates directory, destination, and config file.
///
/// ```rust,ignore
/// let env = TestEnvironment::builder()?
///     .with_template("01. Readme.md", "# $FILE_BASENAME$")
///     .with_template("Crate/Cargo.toml", "name = \"$NAME$\"")
///     .with_variable("AUTHOR", "Jane")
///     .build()?;
/// ```
pub struct TestEnvironmentBuilder {
    temp_dir: TempDir,
    templates: Vec<(String, Vec<u8>)>,
    config: GlobalConfig,
}

impl TestEnvironmentBuilder {
    /// Create a new builder backed by a fresh temporary directory
    pub fn new() -> Result<Self> {
        Ok(Self {
            temp_dir: TempDir::new().context("Failed to create temp dir")?,
            templates: Vec::new(),
            config: GlobalConfig::default(),
        })
    }

    /// Add a template file; nested paths create folder templates
    pub fn with_template(mut self, path: impl Into<String>, content: impl AsRef<[u8]>) -> Self {
        self.templates.push((path.into(), content.as_ref().to_vec()));
        self
    }

    /// Add a `[variables]` entry to the config
    pub fn with_variable(mut self, name: &str, value: &str) -> Self {
        self.config.variables.insert(name.to_string(), value.to_string());
        self
    }

    /// Replace the whole config
    pub fn with_config(mut self, config: GlobalConfig) -> Self {
        self.config = config;
        self
    }

    /// Write everything to disk
    pub fn build(mut self) -> Result<TestEnvironment> {
        let root = self.temp_dir.path().to_path_buf();
        let templates_dir = root.join("templates");
        let dest_dir = root.join("dest");
        let config_path = root.join("config.toml");

        fs::create_dir_all(&templates_dir)?;
        fs::create_dir_all(&dest_dir)?;

        for (relative, content) in &self.templates {
            let path = templates_dir.join(relative);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&path, content)
                .with_context(|| format!("Failed to write template {}", path.display()))?;
        }

        self.config.templates_dir = templates_dir.to_string_lossy().into_owned();
        let content = toml::to_string_pretty(&self.config)?;
        fs::write(&config_path, content)?;

        Ok(TestEnvironment {
            temp_dir: self.temp_dir,
            templates_dir,
            dest_dir,
            config_path,
            config: self.config,
        })
    }
}

/// An isolated newplus setup inside a temporary directory.
pub struct TestEnvironment {
    temp_dir: TempDir,
    pub templates_dir: PathBuf,
    pub dest_dir: PathBuf,
    pub config_path: PathBuf,
    pub config: GlobalConfig,
}

impl TestEnvironment {
    /// Start building a new environment
    pub fn builder() -> Result<TestEnvironmentBuilder> {
        TestEnvironmentBuilder::new()
    }

    /// Environment with a file template and a folder template
    pub fn with_samples() -> Result<Self> {
        Self::builder()?
            .with_template("01. Readme.md", "# $FILE_BASENAME$\nby $AUTHOR$\n")
            .with_template("Crate/Cargo.toml", "[package]\nname = \"$FILE_NAME$\"\n")
            .with_template("Crate/src/main.rs", "fn main() {}\n")
            .with_variable("AUTHOR", "Test Author")
            .build()
    }

    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Variable set without built-ins, holding the config variables and `dest_dir` as target
    pub fn variables(&self) -> Result<VariableSet> {
        Ok(VariableSet::empty()
            .with_target_dir(&self.dest_dir)
            .with_user_variables(&self.config.variables)?)
    }

    /// Check whether a path relative to `dest_dir` exists
    pub fn dest_exists(&self, path: impl AsRef<Path>) -> bool {
        self.dest_dir.join(path).exists()
    }

    /// Read a file relative to `dest_dir`
    pub fn read_dest(&self, path: impl AsRef<Path>) -> Result<String> {
        let path = self.dest_dir.join(path);
        fs::read_to_string(&path).with_context(|| format!("Failed to read {}", path.display()))
    }
}
