pub mod csv_codec;

pub use crate::domain::model::{parse_age, Person};
pub use crate::domain::ports::{ImportSummary, RosterEvent, RosterObserver, Storage};
pub use crate::domain::roster::{NameFilter, Roster};
pub use crate::utils::error::Result;
pub use csv_codec::{CsvCodec, CsvDialect, Decoded, ImportReport};
