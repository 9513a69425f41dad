use crate::domain::model::Person;
use crate::utils::error::Result;

/// Blocking file access. Each call opens, fully reads or writes, then closes.
pub trait Storage {
    fn read_to_string(&self, path: &str) -> Result<String>;
    fn write_string(&self, path: &str, contents: &str) -> Result<()>;
}

/// Counts from one import, carried in change notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ImportSummary {
    pub added_count: usize,
    pub skipped_count: usize,
    pub malformed_count: usize,
    pub aborted: bool,
}

/// Change notification emitted by the session after each successful mutation.
#[derive(Debug, Clone, PartialEq)]
pub enum RosterEvent {
    Added(Person),
    Updated {
        index: usize,
        before: Person,
        after: Person,
    },
    Removed(Person),
    Imported(ImportSummary),
    Exported { path: String, count: usize },
}

pub trait RosterObserver {
    fn on_event(&mut self, event: &RosterEvent);
}
