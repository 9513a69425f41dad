use crate::domain::model::{parse_age, Person};
use crate::domain::ports::ImportSummary;
use crate::domain::roster::Roster;
use crate::utils::error::{Result, RosterError};
use serde::{Deserialize, Serialize};

pub const HEADER: [&str; 3] = ["Nombre", "Apellidos", "Edad"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CsvDialect {
    /// Unquoted `name,surname,age`, compatible with existing exports.
    #[default]
    Legacy,
    /// RFC 4180 quoting, allows commas and quotes inside fields.
    Quoted,
}

impl std::str::FromStr for CsvDialect {
    type Err = RosterError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "legacy" => Ok(CsvDialect::Legacy),
            "quoted" => Ok(CsvDialect::Quoted),
            other => Err(RosterError::InvalidConfigValue {
                field: "dialect".to_string(),
                value: other.to_string(),
                reason: "Valid dialects: legacy, quoted".to_string(),
            }),
        }
    }
}

impl CsvDialect {
    /// Rejects text the dialect cannot write back unchanged.
    ///
    /// The legacy format has no quoting, so commas and line breaks are refused.
    pub fn check_field(&self, field: &str, value: &str) -> Result<()> {
        match self {
            CsvDialect::Legacy if value.contains(&[',', '\n', '\r'][..]) => {
                Err(RosterError::UnencodableField {
                    field: field.to_string(),
                    value: value.to_string(),
                    dialect: "legacy".to_string(),
                })
            }
            _ => Ok(()),
        }
    }
}

/// Outcome of decoding rows into a roster.
#[derive(Debug, Default)]
pub struct ImportReport {
    pub added_count: usize,
    pub skipped_duplicates: Vec<Person>,
    pub malformed_lines: Vec<String>,
    pub fatal_error: Option<RosterError>,
}

impl ImportReport {
    /// No skipped, malformed or fatal rows.
    pub fn is_clean(&self) -> bool {
        self.skipped_duplicates.is_empty()
            && self.malformed_lines.is_empty()
            && self.fatal_error.is_none()
    }

    pub fn summary(&self) -> ImportSummary {
        ImportSummary {
            added_count: self.added_count,
            skipped_count: self.skipped_duplicates.len(),
            malformed_count: self.malformed_lines.len(),
            aborted: self.fatal_error.is_some(),
        }
    }

    pub fn describe(&self) -> String {
        let mut text = format!(
            "{} added, {} duplicate(s) skipped, {} malformed line(s)",
            self.added_count,
            self.skipped_duplicates.len(),
            self.malformed_lines.len()
        );
        if let Some(err) = &self.fatal_error {
            text.push_str(&format!("; aborted: {}", err));
        }
        text
    }
}

/// Result of [`CsvCodec::decode`]: a fresh roster plus the report.
#[derive(Debug)]
pub struct Decoded {
    pub roster: Roster,
    pub report: ImportReport,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CsvCodec {
    dialect: CsvDialect,
}

impl CsvCodec {
    pub fn new(dialect: CsvDialect) -> Self {
        Self { dialect }
    }

    pub fn dialect(&self) -> CsvDialect {
        self.dialect
    }

    /// Header line, then one LF-terminated row per person in roster order.
    pub fn encode(&self, roster: &Roster) -> Result<String> {
        match self.dialect {
            CsvDialect::Legacy => Ok(encode_legacy(roster)),
            CsvDialect::Quoted => encode_quoted(roster),
        }
    }

    pub fn decode(&self, text: &str) -> Decoded {
        let mut roster = Roster::new();
        let report = self.import_into(text, &mut roster);
        Decoded { roster, report }
    }

    /// Adds every valid, non-duplicate row of `text` to `roster`, one at a time.
    ///
    /// Rows already added stay in place when a later row aborts the import.
    pub fn import_into(&self, text: &str, roster: &mut Roster) -> ImportReport {
        let mut report = ImportReport::default();
        match self.dialect {
            CsvDialect::Legacy => import_legacy(text, roster, &mut report),
            CsvDialect::Quoted => import_quoted(text, roster, &mut report),
        }

        if let Some(err) = &report.fatal_error {
            tracing::error!("❌ Import aborted: {}", err);
        }
        tracing::info!("📥 Import finished: {}", report.describe());
        report
    }
}

fn encode_legacy(roster: &Roster) -> String {
    let mut out = HEADER.join(",");
    out.push('\n');
    for person in roster {
        if person.name().contains(',') || person.surname().contains(',') {
            tracing::warn!(
                "⚠️ '{}' contains a comma and will not round-trip in the legacy format",
                person
            );
        }
        out.push_str(&format!(
            "{},{},{}\n",
            person.name(),
            person.surname(),
            person.age()
        ));
    }
    out
}

fn encode_quoted(roster: &Roster) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(HEADER)?;
    for person in roster {
        let age = person.age().to_string();
        writer.write_record([person.name(), person.surname(), age.as_str()])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| RosterError::Io(e.into_error()))?;
    String::from_utf8(bytes)
        .map_err(|e| RosterError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
}

// 切割後捨棄結尾的空欄位，所以 "Ana,Lopez," 只算兩欄
fn split_legacy(line: &str) -> Vec<&str> {
    let mut fields: Vec<&str> = line.split(',').collect();
    while fields.len() > 1 && fields.last() == Some(&"") {
        fields.pop();
    }
    fields
}

fn import_legacy(text: &str, roster: &mut Roster, report: &mut ImportReport) {
    // 第一行是標題，不檢查內容直接略過
    for (index, line) in text.lines().enumerate().skip(1) {
        let fields = split_legacy(line);
        if fields.len() != 3 {
            tracing::warn!("⚠️ Skipping malformed line {}: {}", index + 1, line);
            report.malformed_lines.push(line.to_string());
            continue;
        }

        if let Err(err) = accept_row(&fields, line, index + 1, roster, report) {
            report.fatal_error = Some(err);
            break;
        }
    }
}

fn import_quoted(text: &str, roster: &mut Roster, report: &mut ImportReport) {
    // 與 legacy 相同：略過第一個實體行，而不是第一筆非空白記錄
    let body = text.split_once('\n').map(|(_, rest)| rest).unwrap_or_default();
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(body.as_bytes());

    for result in reader.records() {
        let record = match result {
            Ok(record) => record,
            Err(err) => {
                report.fatal_error = Some(err.into());
                break;
            }
        };

        let fields: Vec<&str> = record.iter().collect();
        let line = fields.join(",");
        let line_number = record
            .position()
            .map(|pos| pos.line() as usize + 1)
            .unwrap_or_default();

        if fields.len() != 3 {
            tracing::warn!("⚠️ Skipping malformed line {}: {}", line_number, line);
            report.malformed_lines.push(line);
            continue;
        }

        if let Err(err) = accept_row(&fields, &line, line_number, roster, report) {
            report.fatal_error = Some(err);
            break;
        }
    }
}

/// Parses one three-field row and adds it unless it is a duplicate.
/// An unparsable age is returned as `ImportAborted`.
fn accept_row(
    fields: &[&str],
    line: &str,
    line_number: usize,
    roster: &mut Roster,
    report: &mut ImportReport,
) -> Result<()> {
    let age = parse_age(fields[2]).map_err(|_| RosterError::ImportAborted {
        line_number,
        line: line.to_string(),
    })?;

    let person = Person::with_age(fields[0], fields[1], age);
    match roster.add(person.clone()) {
        Ok(()) => {
            tracing::debug!("Imported line {}: {}", line_number, person);
            report.added_count += 1;
        }
        Err(_) => {
            tracing::warn!("⚠️ La persona {} ya existe en la lista", person.name());
            report.skipped_duplicates.push(person);
        }
    }
    Ok(())
}
