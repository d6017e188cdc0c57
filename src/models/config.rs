use std::path::{Path, PathBuf};

use clap::ValueEnum;
use pnm_core::{DitherAlgorithm, Gamma, ScanStrategy};
use serde::Deserialize;

/// Environment variable naming a config file when `--config` is absent.
pub const CONFIG_ENV: &str = "PNMLAB_CONFIG";

/// Defaults for command-line options, loaded from a YAML file.
///
/// Every key is optional; flags given on the command line win.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// Gamma exponent; `0` selects sRGB.
    pub gamma: f64,

    /// Bits per sample kept by `dither`.
    pub bits: u8,

    /// Algorithm used by `dither`.
    pub dither: DitherKind,

    /// Defaults for `line`.
    pub line: LineConfig,

    /// Pixel enumeration used by `line`.
    pub scan: ScanKind,
}

/// Line drawing defaults.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct LineConfig {
    pub thickness: f64,
    pub color: u8,
}

impl Default for LineConfig {
    fn default() -> Self {
        Self {
            thickness: 1.0,
            color: 255,
        }
    }
}

/// Dithering algorithm names accepted in config files and on the command
/// line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum DitherKind {
    None,
    Ordered,
    Random,
    #[default]
    FloydSteinberg,
    JarvisJudiceNinke,
    Sierra,
    Atkinson,
    Halftone,
}

impl From<DitherKind> for DitherAlgorithm {
    fn from(kind: DitherKind) -> Self {
        match kind {
            DitherKind::None => DitherAlgorithm::None,
            DitherKind::Ordered => DitherAlgorithm::Ordered,
            DitherKind::Random => DitherAlgorithm::Random,
            DitherKind::FloydSteinberg => DitherAlgorithm::FloydSteinberg,
            DitherKind::JarvisJudiceNinke => DitherAlgorithm::JarvisJudiceNinke,
            DitherKind::Sierra => DitherAlgorithm::Sierra,
            DitherKind::Atkinson => DitherAlgorithm::Atkinson,
            DitherKind::Halftone => DitherAlgorithm::Halftone,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum ScanKind {
    #[default]
    BoundingBox,
    OctantWalk,
}

impl From<ScanKind> for ScanStrategy {
    fn from(kind: ScanKind) -> Self {
        match kind {
            ScanKind::BoundingBox => ScanStrategy::BoundingBox,
            ScanKind::OctantWalk => ScanStrategy::OctantWalk,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            gamma: 0.0,
            bits: 1,
            dither: DitherKind::default(),
            line: LineConfig::default(),
            scan: ScanKind::default(),
        }
    }
}

impl AppConfig {
    /// Parse a YAML document. An empty document yields the defaults.
    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content)
    }

    /// Load from `path`, falling back to defaults (with a warning) if the
    /// file cannot be read or parsed. No path means defaults.
    pub fn load(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self::default();
        };
        match std::fs::read_to_string(path) {
            Ok(content) => match Self::from_yaml(&content) {
                Ok(config) => {
                    tracing::info!(path = %path.display(), "Loaded configuration");
                    config
                }
                Err(e) => {
                    tracing::warn!(%e, path = %path.display(), "Failed to parse config, using defaults");
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!(%e, path = %path.display(), "Failed to read config, using defaults");
                Self::default()
            }
        }
    }

    /// The config file to use: the explicit path, else [`CONFIG_ENV`].
    pub fn resolve_path(explicit: Option<PathBuf>) -> Option<PathBuf> {
        explicit.or_else(|| std::env::var_os(CONFIG_ENV).map(PathBuf::from))
    }

    pub fn gamma(&self) -> Gamma {
        Gamma::from_param(self.gamma)
    }
}
