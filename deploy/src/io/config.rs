//! Deploy configuration stored in `deploy.toml` at the project root.

use std::fs;
use std::path::{Component, Path};

use anyhow::{Context, Result, anyhow};
use serde::Deserialize;
use tracing::debug;

/// File name looked up under the project root when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "deploy.toml";

/// Deploy configuration (TOML).
///
/// Every field is optional in the file. Missing fields take the values the
/// Widget Sidebar release process has always used.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DeployConfig {
    /// Name of the output directory under `dist_dir` and the executable stem.
    pub app_name: String,

    /// Release version, used to name the versioned distribution copy.
    pub version: String,

    /// Extension of the produced executable, without the dot. Empty for none.
    pub executable_extension: String,

    /// Packaging tool build output directory, relative to the root.
    pub build_dir: String,

    /// Packaging tool staging directory, relative to the root.
    pub dist_dir: String,

    /// Documentation file copied next to the executable, relative to the root.
    pub doc_file: String,

    /// Wait for operator acknowledgment before exiting.
    pub pause: bool,

    pub packager: PackagerConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PackagerConfig {
    /// Program and leading arguments (e.g. `["python", "-m", "PyInstaller"]`).
    pub command: Vec<String>,

    /// Specification file handed to the tool.
    pub spec: String,

    /// Flag requesting a clean rebuild.
    pub clean_flag: String,

    /// Flag suppressing confirmation prompts.
    pub no_confirm_flag: String,
}

impl Default for PackagerConfig {
    fn default() -> Self {
        Self {
            command: vec!["pyinstaller".to_string()],
            spec: "widget_sidebar.spec".to_string(),
            clean_flag: "--clean".to_string(),
            no_confirm_flag: "--noconfirm".to_string(),
        }
    }
}

impl PackagerConfig {
    /// Full argv: command prefix, spec, then the two fixed flags.
    pub fn argv(&self) -> Vec<String> {
        let mut argv = self.command.clone();
        argv.push(self.spec.clone());
        for flag in [&self.clean_flag, &self.no_confirm_flag] {
            if !flag.is_empty() {
                argv.push(flag.clone());
            }
        }
        argv
    }
}

impl Default for DeployConfig {
    fn default() -> Self {
        Self {
            app_name: "WidgetSidebar".to_string(),
            version: "1.0.0".to_string(),
            executable_extension: "exe".to_string(),
            build_dir: "build".to_string(),
            dist_dir: "dist".to_string(),
            doc_file: "README.md".to_string(),
            pause: true,
            packager: PackagerConfig::default(),
        }
    }
}

impl DeployConfig {
    pub fn validate(&self) -> Result<()> {
        validate_name("app_name", &self.app_name)?;
        validate_name("version", &self.version)?;
        if self.executable_extension.contains(['/', '\\', '.']) {
            return Err(anyhow!(
                "executable_extension must not contain '.', '/' or '\\' (got '{}')",
                self.executable_extension
            ));
        }
        validate_relative("build_dir", &self.build_dir)?;
        validate_relative("dist_dir", &self.dist_dir)?;
        validate_relative("doc_file", &self.doc_file)?;
        if normalized(&self.build_dir) == normalized(&self.dist_dir) {
            return Err(anyhow!(
                "build_dir and dist_dir must differ (got '{}' and '{}')",
                self.build_dir,
                self.dist_dir
            ));
        }
        if self.packager.command.is_empty() || self.packager.command[0].trim().is_empty() {
            return Err(anyhow!("packager.command must be a non-empty array"));
        }
        if self.packager.spec.trim().is_empty() {
            return Err(anyhow!("packager.spec must not be empty"));
        }
        Ok(())
    }

    /// File name of the produced executable (`<app_name>[.<ext>]`).
    pub fn executable_name(&self) -> String {
        if self.executable_extension.is_empty() {
            self.app_name.clone()
        } else {
            format!("{}.{}", self.app_name, self.executable_extension)
        }
    }

    /// Directory name of the versioned distribution copy.
    pub fn snapshot_name(&self) -> String {
        format!("{}_v{}", self.app_name, self.version)
    }
}

/// Names end up as directory names, so keep them to a portable alphabet.
fn validate_name(field: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(anyhow!("{field} must not be empty"));
    }
    if value
        .chars()
        .any(|c| !(c.is_ascii_alphanumeric() || c == '.' || c == '_' || c == '-'))
    {
        return Err(anyhow!("{field} must be [A-Za-z0-9._-] only (got '{value}')"));
    }
    if value == "." || value == ".." {
        return Err(anyhow!("{field} must not be '{value}'"));
    }
    Ok(())
}

/// Configured paths must stay inside the project root.
fn validate_relative(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(anyhow!("{field} must not be empty"));
    }
    let path = Path::new(value);
    for component in path.components() {
        match component {
            Component::Normal(_) => {}
            Component::CurDir => {}
            _ => {
                return Err(anyhow!(
                    "{field} must be a relative path inside the project root (got '{value}')"
                ));
            }
        }
    }
    if !path.components().any(|c| matches!(c, Component::Normal(_))) {
        return Err(anyhow!("{field} must name a path below the project root"));
    }
    Ok(())
}

/// Components of a validated relative path with `.` segments dropped.
fn normalized(value: &str) -> Vec<Component<'_>> {
    Path::new(value)
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect()
}

/// Load config from a TOML file.
///
/// If the file is missing, returns `DeployConfig::default()`.
pub fn load_config(path: &Path) -> Result<DeployConfig> {
    if !path.exists() {
        debug!(path = %path.display(), "config file missing, using defaults");
        let cfg = DeployConfig::default();
        cfg.validate()?;
        return Ok(cfg);
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: DeployConfig =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    cfg.validate()
        .with_context(|| format!("invalid config {}", path.display()))?;
    debug!(path = %path.display(), app = %cfg.app_name, "loaded config");
    Ok(cfg)
}
