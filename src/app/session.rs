use crate::app::form::PersonForm;
use crate::core::csv_codec::{CsvCodec, ImportReport};
use crate::domain::model::Person;
use crate::domain::ports::{RosterEvent, RosterObserver, Storage};
use crate::domain::roster::{NameFilter, Roster};
use crate::utils::error::{Result, RosterError};

/// Application context: owns the single roster and notifies subscribers.
pub struct RosterSession<S: Storage> {
    roster: Roster,
    codec: CsvCodec,
    storage: S,
    observers: Vec<Box<dyn RosterObserver>>,
    // 載入時無法解析而被略過的行數，依檔案路徑記錄
    dropped_on_load: Option<(String, usize)>,
}

impl<S: Storage> RosterSession<S> {
    pub fn new(storage: S, codec: CsvCodec) -> Self {
        Self {
            roster: Roster::new(),
            codec,
            storage,
            observers: Vec::new(),
            dropped_on_load: None,
        }
    }

    pub fn subscribe(&mut self, observer: Box<dyn RosterObserver>) {
        self.observers.push(observer);
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn codec(&self) -> CsvCodec {
        self.codec
    }

    pub fn filter(&self, substring: Option<&str>) -> NameFilter<'_> {
        self.roster.filter_by_name(substring)
    }

    pub fn add_person(&mut self, form: &PersonForm) -> Result<()> {
        let person = form.to_person_for(self.codec.dialect())?;
        self.roster.add(person.clone())?;
        tracing::info!("✅ Persona agregada: {}", person);
        self.notify(RosterEvent::Added(person));
        Ok(())
    }

    pub fn edit_person(&mut self, index: usize, form: &PersonForm) -> Result<()> {
        let current = self
            .roster
            .get(index)
            .ok_or(RosterError::IndexOutOfRange {
                index,
                len: self.roster.len(),
            })?;
        let updated = form.apply_to(current, self.codec.dialect())?;
        let before = self.roster.replace(index, updated.clone())?;
        tracing::info!("✏️ Persona modificada: {} -> {}", before, updated);
        self.notify(RosterEvent::Updated {
            index,
            before,
            after: updated,
        });
        Ok(())
    }

    pub fn remove_at(&mut self, index: usize) -> Result<Person> {
        let removed = self
            .roster
            .remove_at(index)
            .ok_or(RosterError::IndexOutOfRange {
                index,
                len: self.roster.len(),
            })?;
        tracing::info!("🗑️ Persona eliminada: {}", removed);
        self.notify(RosterEvent::Removed(removed.clone()));
        Ok(removed)
    }

    /// Removes `person` if present. Absent is a silent no-op.
    pub fn remove(&mut self, person: &Person) -> Option<Person> {
        let removed = self.roster.remove(person)?;
        tracing::info!("🗑️ Persona eliminada: {}", removed);
        self.notify(RosterEvent::Removed(removed.clone()));
        Some(removed)
    }

    /// Reads `path` and merges its rows into the roster.
    ///
    /// An I/O failure is returned before anything is touched.
    pub fn import_file(&mut self, path: &str) -> Result<ImportReport> {
        tracing::debug!("Reading roster file: {}", path);
        let text = self.storage.read_to_string(path)?;
        let report = self.codec.import_into(&text, &mut self.roster);
        self.notify(RosterEvent::Imported(report.summary()));
        Ok(report)
    }

    /// Like [`import_file`](Self::import_file) but a missing file means an empty roster.
    pub fn load_or_empty(&mut self, path: &str) -> Result<Option<ImportReport>> {
        match self.import_file(path) {
            Ok(report) => {
                if !report.malformed_lines.is_empty() {
                    tracing::warn!(
                        "⚠️ {} line(s) of {} could not be loaded",
                        report.malformed_lines.len(),
                        path
                    );
                    self.dropped_on_load = Some((path.to_string(), report.malformed_lines.len()));
                }
                Ok(Some(report))
            }
            Err(RosterError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!("📄 {} not found, starting with an empty roster", path);
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    /// Writes the roster back to the file it was loaded from.
    ///
    /// Refuses with `UnsafeOverwrite` when lines of that file were dropped on
    /// load, unless `force` is set.
    pub fn save(&mut self, path: &str, force: bool) -> Result<usize> {
        if let Some((loaded, dropped)) = &self.dropped_on_load {
            if loaded == path && !force {
                return Err(RosterError::UnsafeOverwrite {
                    path: path.to_string(),
                    dropped: *dropped,
                });
            }
        }
        self.export_file(path)
    }

    pub fn export_file(&mut self, path: &str) -> Result<usize> {
        let text = self.codec.encode(&self.roster)?;
        self.storage.write_string(path, &text)?;
        let count = self.roster.len();
        tracing::info!("📤 Exported {} person(s) to {}", count, path);
        self.notify(RosterEvent::Exported {
            path: path.to_string(),
            count,
        });
        Ok(count)
    }

    fn notify(&mut self, event: RosterEvent) {
        for observer in &mut self.observers {
            observer.on_event(&event);
        }
    }
}

/// Observer that writes every roster event to the log.
#[derive(Debug, Default)]
pub struct LoggingObserver;

impl RosterObserver for LoggingObserver {
    fn on_event(&mut self, event: &RosterEvent) {
        match event {
            RosterEvent::Added(person) => tracing::debug!("event: added {}", person),
            RosterEvent::Updated { index, after, .. } => {
                tracing::debug!("event: updated #{} -> {}", index, after)
            }
            RosterEvent::Removed(person) => tracing::debug!("event: removed {}", person),
            RosterEvent::Imported(summary) => tracing::debug!(
                "event: imported added={} skipped={} malformed={} aborted={}",
                summary.added_count,
                summary.skipped_count,
                summary.malformed_count,
                summary.aborted
            ),
            RosterEvent::Exported { path, count } => {
                tracing::debug!("event: exported {} to {}", count, path)
            }
        }
    }
}
