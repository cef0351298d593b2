use std::fmt::{Display, Formatter};

use chrono::{DateTime, FixedOffset, SecondsFormat};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActiveRecord {
    pub id: u64,
    pub project: String,
    pub start: DateTime<FixedOffset>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompletedRecord {
    pub id: u64,
    pub project: String,
    pub start: DateTime<FixedOffset>,
    pub end: DateTime<FixedOffset>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Record {
    Active(ActiveRecord),
    Completed(CompletedRecord),
}

#[derive(Debug)]
pub enum MalformedLine {
    FieldCount(usize),
    Id(std::num::ParseIntError),
    Timestamp(chrono::ParseError),
}

impl Display for MalformedLine {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            MalformedLine::FieldCount(found) => {
                write!(f, "expected 4 comma-separated fields, found {found}")
            }
            MalformedLine::Id(err) => write!(f, "invalid record id: {err}"),
            MalformedLine::Timestamp(err) => write!(f, "invalid timestamp: {err}"),
        }
    }
}

impl std::error::Error for MalformedLine {}

pub fn decode_line(line: &str) -> Result<Record, MalformedLine> {
    let fields = line.split(',').collect::<Vec<_>>();
    let (id, project, start, end) = match fields.as_slice() {
        [id, project, start, end] => (*id, *project, *start, *end),
        other => return Err(MalformedLine::FieldCount(other.len())),
    };

    let id = id.parse::<u64>().map_err(MalformedLine::Id)?;
    let start = DateTime::parse_from_rfc3339(start).map_err(MalformedLine::Timestamp)?;

    if end.is_empty() {
        return Ok(Record::Active(ActiveRecord {
            id,
            project: project.to_string(),
            start,
        }));
    }

    let end = DateTime::parse_from_rfc3339(end).map_err(MalformedLine::Timestamp)?;
    Ok(Record::Completed(CompletedRecord {
        id,
        project: project.to_string(),
        start,
        end,
    }))
}

pub fn format_timestamp(timestamp: &DateTime<FixedOffset>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

impl ActiveRecord {
    pub fn encode(&self) -> String {
        format!(
            "{},{},{},",
            self.id,
            self.project,
            format_timestamp(&self.start)
        )
    }
}

impl CompletedRecord {
    pub fn encode(&self) -> String {
        format!(
            "{},{},{},{}",
            self.id,
            self.project,
            format_timestamp(&self.start),
            format_timestamp(&self.end)
        )
    }
}

impl Record {
    pub fn encode(&self) -> String {
        match self {
            Record::Active(record) => record.encode(),
            Record::Completed(record) => record.encode(),
        }
    }
}
