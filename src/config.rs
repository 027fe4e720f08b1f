//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/treelayout/treelayout.toml`
//! 3. Explicit config file (`--config <file>`)
//! 4. Environment variables: `TREELAYOUT_*` prefix

use std::path::{Path, PathBuf};

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File, FileFormat};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::application::ApplicationError;
use crate::domain::{LayoutParams, TextFormat};

/// Geometry settings, mapped onto [`LayoutParams`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LayoutConfig {
    pub node_radius: f64,
    pub horizontal_spacing: f64,
    pub vertical_spacing: f64,
    pub padding: f64,
    pub min_canvas_width: f64,
    pub min_canvas_height: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        let p = LayoutParams::default();
        Self {
            node_radius: p.node_radius,
            horizontal_spacing: p.horizontal_spacing,
            vertical_spacing: p.vertical_spacing,
            padding: p.padding,
            min_canvas_width: p.min_canvas_width,
            min_canvas_height: p.min_canvas_height,
        }
    }
}

impl LayoutConfig {
    pub fn params(&self) -> LayoutParams {
        LayoutParams {
            node_radius: self.node_radius,
            horizontal_spacing: self.horizontal_spacing,
            vertical_spacing: self.vertical_spacing,
            padding: self.padding,
            min_canvas_width: self.min_canvas_width,
            min_canvas_height: self.min_canvas_height,
        }
    }

    fn validate(&self) -> Result<(), ApplicationError> {
        let positive = [
            ("node_radius", self.node_radius),
            ("horizontal_spacing", self.horizontal_spacing),
            ("vertical_spacing", self.vertical_spacing),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(ApplicationError::Config {
                    message: format!("layout.{} must be a positive number, got {}", name, value),
                });
            }
        }
        let non_negative = [
            ("padding", self.padding),
            ("min_canvas_width", self.min_canvas_width),
            ("min_canvas_height", self.min_canvas_height),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(ApplicationError::Config {
                    message: format!("layout.{} must not be negative, got {}", name, value),
                });
            }
        }
        Ok(())
    }
}

/// Unified configuration for treelayout.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Settings {
    /// Default format of the `text` command
    pub text_format: TextFormat,
    /// Geometry constants
    pub layout: LayoutConfig,
}

/// Get the XDG config directory for treelayout.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "treelayout").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("treelayout.toml"))
}

/// Expand `~`, `$VAR` and `${VAR}` in a user supplied path.
pub fn expand_path(path: &Path) -> PathBuf {
    let raw = path.to_string_lossy();
    shellexpand::full(raw.as_ref())
        .map(|s| PathBuf::from(s.into_owned()))
        .unwrap_or_else(|_| path.to_path_buf())
}

impl Settings {
    pub fn params(&self) -> LayoutParams {
        self.layout.params()
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `explicit` - Optional config file given on the command line; must exist
    ///
    /// # Precedence (lowest to highest)
    /// 1. Compiled defaults
    /// 2. Global config: `$XDG_CONFIG_HOME/treelayout/treelayout.toml`
    /// 3. Explicit config file
    /// 4. Environment variables: `TREELAYOUT_*`, nested keys separated by `__`
    ///    (e.g. `TREELAYOUT_LAYOUT__NODE_RADIUS=20`)
    pub fn load(explicit: Option<&Path>) -> Result<Self, ApplicationError> {
        let mut builder = Self::defaults_builder()?;

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                debug!("loading global config: {}", global_path.display());
                builder = builder.add_source(
                    File::from(global_path.as_path())
                        .format(FileFormat::Toml)
                        .required(false),
                );
            }
        }

        if let Some(path) = explicit {
            let path = expand_path(path);
            if !path.exists() {
                return Err(ApplicationError::Config {
                    message: format!("config file not found: {}", path.display()),
                });
            }
            debug!("loading config: {}", path.display());
            builder = builder.add_source(
                File::from(path.as_path())
                    .format(FileFormat::Toml)
                    .required(true),
            );
        }

        builder = builder.add_source(
            Environment::with_prefix("TREELAYOUT")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build().map_err(config_err)?;
        let settings: Self = config.try_deserialize().map_err(config_err)?;
        settings.layout.validate()?;
        Ok(settings)
    }

    fn defaults_builder() -> Result<ConfigBuilder<DefaultState>, ApplicationError> {
        let defaults = LayoutConfig::default();
        Config::builder()
            .set_default("layout.node_radius", defaults.node_radius)
            .map_err(config_err)?
            .set_default("layout.horizontal_spacing", defaults.horizontal_spacing)
            .map_err(config_err)?
            .set_default("layout.vertical_spacing", defaults.vertical_spacing)
            .map_err(config_err)?
            .set_default("layout.padding", defaults.padding)
            .map_err(config_err)?
            .set_default("layout.min_canvas_width", defaults.min_canvas_width)
            .map_err(config_err)?
            .set_default("layout.min_canvas_height", defaults.min_canvas_height)
            .map_err(config_err)?
            .set_default("text_format", TextFormat::default().to_string())
            .map_err(config_err)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# treelayout configuration
#
# Locations (by precedence, lowest to highest):
#   Global:   ~/.config/treelayout/treelayout.toml
#   Explicit: --config <file>
#   Env:      TREELAYOUT_* environment variables, e.g. TREELAYOUT_LAYOUT__PADDING=20

# Default format of the text view: "bullets", "html" or "tree"
# text_format = "bullets"

[layout]
# Radius of a drawn node; connector lines stop at the node border
# node_radius = 30.0

# Distance between neighbouring leaves
# horizontal_spacing = 180.0

# Distance between levels
# vertical_spacing = 120.0

# Cursor start and margin around the content
# padding = 50.0

# Smallest canvas ever produced
# min_canvas_width = 800.0
# min_canvas_height = 600.0
"#
        .to_string()
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
