//! Configuration loading.
//!
//! Settings come from a TOML file (explicit `--config` path, else
//! `<config dir>/ampview/config.toml` when it exists, else built-in defaults) and are then
//! overridden by command-line flags. Defaults reproduce the reference installation: a
//! 128x128 panel listening to `periodic-sample` events on `localhost:3001/periodic-samples`.
//!
//! ```toml
//! [stream]
//! host = "localhost"
//! port = 3001
//! namespace = "/periodic-samples"
//! event = "periodic-sample"
//! on_malformed = "skip"
//!
//! [display]
//! backend = "log"
//! font = "9x18"
//! color = "#00ff00"
//! ```

use crate::display::{parse_color, FontChoice, Point, Size, TextStyle};
use crate::error::{AmpviewError, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// What to do with a payload that does not decode to a finite number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MalformedPolicy {
    /// Stop with an error.
    #[default]
    Fail,
    /// Log a warning and wait for the next event.
    Skip,
}

/// How to treat samples that queue up while a frame is being drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackpressurePolicy {
    /// Render every sample in arrival order.
    #[default]
    Sequential,
    /// Render only the newest queued sample.
    Latest,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    #[default]
    Terminal,
    Log,
}

impl BackendKind {
    pub fn parse(name: &str) -> Result<Self> {
        match name {
            "terminal" => Ok(BackendKind::Terminal),
            "log" => Ok(BackendKind::Log),
            other => Err(AmpviewError::invalid_argument(format!(
                "unknown display backend '{other}'"
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StreamConfig {
    pub host: String,
    pub port: u16,
    pub namespace: String,
    pub event: String,
    /// Let the transport reconnect on its own and keep running across disconnects.
    pub reconnect: bool,
    /// Events buffered between the transport and the render loop.
    pub queue_depth: usize,
    pub on_malformed: MalformedPolicy,
    pub backpressure: BackpressurePolicy,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 3001,
            namespace: "/periodic-samples".to_string(),
            event: "periodic-sample".to_string(),
            reconnect: false,
            queue_depth: 16,
            on_malformed: MalformedPolicy::default(),
            backpressure: BackpressurePolicy::default(),
        }
    }
}

impl StreamConfig {
    /// Base URL of the Socket.IO server; the namespace is passed separately.
    pub fn url(&self) -> String {
        if self.host.starts_with("http://") || self.host.starts_with("https://") {
            format!("{}:{}", self.host.trim_end_matches('/'), self.port)
        } else {
            format!("http://{}:{}", self.host, self.port)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DisplayConfig {
    pub backend: BackendKind,
    pub width: u32,
    pub height: u32,
    /// Top-left corner of the readout, `[x, y]` in pixels.
    pub anchor: [i32; 2],
    pub font: String,
    pub color: String,
    pub background: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            backend: BackendKind::default(),
            width: 128,
            height: 128,
            anchor: [3, 3],
            font: FontChoice::default().name().to_string(),
            color: "white".to_string(),
            background: "black".to_string(),
        }
    }
}

impl DisplayConfig {
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn anchor_point(&self) -> Point {
        Point::new(self.anchor[0], self.anchor[1])
    }

    pub fn text_style(&self) -> Result<TextStyle> {
        Ok(TextStyle {
            font: FontChoice::parse(&self.font)?,
            color: parse_color(&self.color)?,
            background: parse_color(&self.background)?,
        })
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub stream: StreamConfig,
    pub display: DisplayConfig,
}

/// Values given on the command line; each one replaces the file setting when present.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Overrides {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub namespace: Option<String>,
    pub event: Option<String>,
    pub backend: Option<BackendKind>,
}

impl Config {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|err| AmpviewError::config(err.to_string()))
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|err| {
            AmpviewError::file_error(format!("cannot read {}", path.display()), err)
        })?;
        Self::from_toml_str(&text)
    }

    /// Per-user config file location, if the platform has a config directory.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("ampview").join("config.toml"))
    }

    /// Load the explicit file, else the per-user file if present, else defaults.
    pub fn discover(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        match Self::default_path() {
            Some(path) if path.is_file() => Self::load(&path),
            _ => Ok(Self::default()),
        }
    }

    pub fn apply_overrides(&mut self, overrides: Overrides) {
        if let Some(host) = overrides.host {
            self.stream.host = host;
        }
        if let Some(port) = overrides.port {
            self.stream.port = port;
        }
        if let Some(namespace) = overrides.namespace {
            self.stream.namespace = namespace;
        }
        if let Some(event) = overrides.event {
            self.stream.event = event;
        }
        if let Some(backend) = overrides.backend {
            self.display.backend = backend;
        }
    }

    /// Reject settings the pipeline cannot start with.
    pub fn validate(&self) -> Result<()> {
        if self.stream.host.trim().is_empty() {
            return Err(AmpviewError::config("stream.host must not be empty"));
        }
        if !self.stream.namespace.starts_with('/') {
            return Err(AmpviewError::config(format!(
                "stream.namespace must start with '/', got '{}'",
                self.stream.namespace
            )));
        }
        if self.stream.event.trim().is_empty() {
            return Err(AmpviewError::config("stream.event must not be empty"));
        }
        if self.stream.queue_depth == 0 {
            return Err(AmpviewError::config("stream.queue_depth must be at least 1"));
        }
        if self.display.width == 0 || self.display.height == 0 {
            return Err(AmpviewError::config(format!(
                "display size {}x{} is empty",
                self.display.width, self.display.height
            )));
        }
        self.display.text_style()?;
        Ok(())
    }
}
