//! ---
//! gg_section: "01-shared-runtime"
//! gg_subsection: "module"
//! gg_type: "source"
//! gg_scope: "code"
//! gg_description: "Shared configuration and logging primitives."
//! gg_version: "v0.1.0"
//! gg_owner: "tbd"
//! ---
//! Shared primitives for the GreenGrid workspace: configuration loading
//! and tracing initialisation consumed by the dashboard binary.

pub mod config;
pub mod logging;

pub use config::{AppConfig, BackendConfig, LoggingConfig, RefreshConfig};
pub use logging::init_tracing;
