//! Compressor app: a headless page hosting one compression session.
mod platform;

pub use platform::app::{Session, SessionSummary};
pub use platform::cli::Cli;
pub use platform::config::{load_config, AppConfig, ConfigError};
pub use platform::effects::EffectRunner;
pub use platform::input::{parse_command, Input};
pub use platform::locale::{load_catalog, LocaleError, PageRequest, DEFAULT_LOCALE, SUPPORTED_LOCALES};
pub use platform::logging::LogDestination;
pub use platform::picker::read_drop;
pub use platform::run_app;
pub use platform::ui::render::{render, Renderer};
