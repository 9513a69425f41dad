pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::storage::LocalStorage;
pub use app::{form::PersonForm, session::LoggingObserver, session::RosterSession};
pub use config::{toml_config::AppConfig, Settings};
pub use crate::core::csv_codec::{CsvCodec, CsvDialect, Decoded, ImportReport};
pub use domain::model::{parse_age, Person};
pub use domain::ports::{ImportSummary, RosterEvent, RosterObserver, Storage};
pub use domain::roster::{NameFilter, Roster};
pub use utils::error::{Result, RosterError};
