pub mod config;

pub use config::{AppConfig, DitherKind, LineConfig, ScanKind, CONFIG_ENV};
