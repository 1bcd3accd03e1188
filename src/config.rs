//! Configuration file support
//!
//! Loads settings from ~/.tagspan.toml (or %USERPROFILE%\.tagspan.toml on Windows)
//!
//! Example:
//! ```toml
//! [colors]
//! tag = "#005082"
//! attribute = "grey"
//!
//! [style]
//! reduced-size = 75
//! attributes = true
//! comments = true
//! entities = true
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use toml::{Table, Value};
use tracing::{debug, warn};

use crate::error::Result;
use crate::style::Color;

/// Configuration settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Color of tags and entities
    pub tag_color: Color,
    /// Color of attribute values and comments
    pub attribute_color: Color,
    /// Relative size of comments and entities, in percent
    pub reduced_size: u16,
    /// Style quoted attribute values
    pub attributes: bool,
    /// Style `<!-- -->` comments
    pub comments: bool,
    /// Style entity references
    pub entities: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tag_color: Color::Rgb(0, 80, 130),
            attribute_color: Color::Rgb(158, 158, 158),
            reduced_size: 75,
            attributes: true,
            comments: true,
            entities: true,
        }
    }
}

impl Config {
    /// Get the config file path
    pub fn config_path() -> Option<PathBuf> {
        #[cfg(windows)]
        {
            std::env::var("USERPROFILE")
                .ok()
                .map(|home| PathBuf::from(home).join(".tagspan.toml"))
        }

        #[cfg(not(windows))]
        {
            std::env::var("HOME")
                .ok()
                .map(|home| PathBuf::from(home).join(".tagspan.toml"))
        }
    }

    /// Load configuration from the default location, falling back to
    /// defaults when the file is missing or invalid
    pub fn load() -> Self {
        let Some(path) = Self::config_path() else {
            return Config::default();
        };
        if !path.exists() {
            return Config::default();
        }

        match Self::load_from(&path) {
            Ok(config) => config,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "ignoring config file");
                Config::default()
            }
        }
    }

    /// Load configuration from a specific file
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config = Self::parse(&contents)?;
        debug!(path = %path.display(), ?config, "loaded config");
        Ok(config)
    }

    /// Parse config file contents. Unknown keys are ignored.
    pub fn parse(contents: &str) -> Result<Self> {
        let table: Table = contents.parse()?;
        let mut config = Config::default();
        config.apply(&table)?;
        Ok(config)
    }

    fn apply(&mut self, table: &Table) -> Result<()> {
        if let Some(colors) = table.get("colors").and_then(Value::as_table) {
            if let Some(value) = colors.get("tag").and_then(Value::as_str) {
                self.tag_color = Color::parse(value)?;
            }
            if let Some(value) = colors.get("attribute").and_then(Value::as_str) {
                self.attribute_color = Color::parse(value)?;
            }
        }

        if let Some(style) = table.get("style").and_then(Value::as_table) {
            if let Some(n) = style.get("reduced-size").and_then(Value::as_integer) {
                self.reduced_size = n.clamp(10, 100) as u16;
            }
            if let Some(b) = style.get("attributes").and_then(Value::as_bool) {
                self.attributes = b;
            }
            if let Some(b) = style.get("comments").and_then(Value::as_bool) {
                self.comments = b;
            }
            if let Some(b) = style.get("entities").and_then(Value::as_bool) {
                self.entities = b;
            }
        }

        Ok(())
    }
}
