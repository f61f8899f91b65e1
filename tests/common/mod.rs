//! Shared helpers for driving the `newplus` binary in tests.

#![allow(dead_code)]

use anyhow::{Context, Result};
use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// An isolated config file, templates directory, and working directory.
pub struct TestProject {
    _temp_dir: TempDir,
    root: PathBuf,
    templates_dir: PathBuf,
    work_dir: PathBuf,
    config_path: PathBuf,
}

impl TestProject {
    /// Create an empty project with no config file.
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new().context("Failed to create temp dir")?;
        let root = temp_dir.path().to_path_buf();
        let templates_dir = root.join("templates");
        let work_dir = root.join("work");
        fs::create_dir_all(&templates_dir)?;
        fs::create_dir_all(&work_dir)?;

        Ok(Self {
            config_path: root.join("config").join("config.toml"),
            _temp_dir: temp_dir,
            root,
            templates_dir,
            work_dir,
        })
    }

    /// Project with a file template, a folder template, and a hidden entry.
    pub fn with_samples() -> Result<Self> {
        let project = Self::new()?;
        project.add_template("01. Readme.md", "# $FILE_BASENAME$\n\nby $AUTHOR$\n")?;
        project.add_template("02. Notes.txt", "Notes for $TARGET_DIR$\n")?;
        project.add_template("Service/Cargo.toml", "[package]\nname = \"$FILE_NAME$\"\n")?;
        project.add_template("Service/src/$FILE_NAME$.rs", "// $FILE_NAME$ by $AUTHOR$\n")?;
        project.add_template(".hidden.txt", "secret\n")?;
        project.write_config("[variables]\nAUTHOR = \"Test Author\"\n")?;
        Ok(project)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn templates_dir(&self) -> &Path {
        &self.templates_dir
    }

    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Write a template at a path relative to the templates directory.
    pub fn add_template(&self, relative: &str, content: impl AsRef<[u8]>) -> Result<PathBuf> {
        let path = self.templates_dir.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, content)?;
        Ok(path)
    }

    pub fn write_config(&self, content: &str) -> Result<()> {
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.config_path, content)?;
        Ok(())
    }

    pub fn read_config(&self) -> Result<String> {
        fs::read_to_string(&self.config_path).context("Failed to read config")
    }

    /// Read a file relative to the working directory.
    pub fn read_output(&self, relative: impl AsRef<Path>) -> Result<String> {
        let path = self.work_dir.join(relative);
        fs::read_to_string(&path).with_context(|| format!("Failed to read {}", path.display()))
    }

    /// A `newplus` command isolated to this project.
    pub fn newplus_command(&self) -> Command {
        let mut cmd = Command::cargo_bin("newplus").unwrap();
        cmd.current_dir(&self.work_dir)
            .env("NEWPLUS_CONFIG", &self.config_path)
            .env("NEWPLUS_TEMPLATES_DIR", &self.templates_dir)
            .env("NEWPLUS_NO_PROGRESS", "true")
            .env("NO_COLOR", "1")
            .env_remove("RUST_LOG");
        cmd
    }
}
