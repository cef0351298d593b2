use std::fmt::{Display, Formatter};

use chrono::{DateTime, FixedOffset};

use crate::record::{
    ActiveRecord, CompletedRecord, MalformedLine, Record, decode_line, format_timestamp,
};

#[derive(Debug)]
pub enum LedgerError {
    MalformedLine(MalformedLine),
    InvalidRetime {
        new_start: DateTime<FixedOffset>,
        previous_end: DateTime<FixedOffset>,
    },
    CannotChangeCompleted {
        id: u64,
    },
}

impl Display for LedgerError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            LedgerError::MalformedLine(err) => write!(f, "malformed ledger line: {err}"),
            LedgerError::InvalidRetime {
                new_start,
                previous_end,
            } => write!(
                f,
                "cannot move start to {}: the previous record ended at {}",
                format_timestamp(new_start),
                format_timestamp(previous_end)
            ),
            LedgerError::CannotChangeCompleted { id } => {
                write!(f, "cannot change completed record {id}")
            }
        }
    }
}

impl std::error::Error for LedgerError {}

impl From<MalformedLine> for LedgerError {
    fn from(err: MalformedLine) -> Self {
        LedgerError::MalformedLine(err)
    }
}

pub fn decode(text: &str) -> (Vec<CompletedRecord>, Option<ActiveRecord>) {
    if text.is_empty() {
        return (Vec::new(), None);
    }

    let mut completed = Vec::new();
    let mut active = None;

    for line in text.split('\n') {
        match decode_line(line) {
            Ok(Record::Completed(record)) => completed.push(record),
            Ok(Record::Active(record)) => active = Some(record),
            Err(_) => {}
        }
    }

    (completed, active)
}

pub fn insert(
    text: &str,
    project: &str,
    start: DateTime<FixedOffset>,
) -> Result<String, LedgerError> {
    // The newest record sits on the first line, so its id is the ledger maximum.
    let last_id = if text.is_empty() {
        0
    } else {
        let first_line = text.split('\n').next().unwrap_or(text);
        let leading = first_line.split(',').next().unwrap_or(first_line);
        leading
            .parse::<u64>()
            .map_err(|err| LedgerError::MalformedLine(MalformedLine::Id(err)))?
    };

    let record = ActiveRecord {
        id: last_id + 1,
        project: project.to_string(),
        start,
    };

    Ok(format!("{}\n{}", record.encode(), text))
}

pub fn stop(text: &str, end: DateTime<FixedOffset>) -> Result<String, LedgerError> {
    let (first, rest) = split_head(text);

    let stopped = match decode_line(first)? {
        Record::Active(active) => CompletedRecord {
            id: active.id,
            project: active.project,
            start: active.start,
            end,
        },
        Record::Completed(completed) => CompletedRecord { end, ..completed },
    };

    Ok(with_head(stopped.encode(), rest))
}

pub fn retime(text: &str, new_start: DateTime<FixedOffset>) -> Result<String, LedgerError> {
    let (first, rest) = split_head(text);

    let active = match decode_line(first)? {
        Record::Active(active) => active,
        Record::Completed(completed) => {
            return Err(LedgerError::CannotChangeCompleted { id: completed.id });
        }
    };

    // Only the record adjacent to the active slot constrains the new start;
    // older history is never re-validated.
    if let Some(rest) = rest {
        let second = rest.split('\n').next().unwrap_or(rest);
        if let Ok(Record::Completed(previous)) = decode_line(second) {
            if new_start < previous.end {
                return Err(LedgerError::InvalidRetime {
                    new_start,
                    previous_end: previous.end,
                });
            }
        }
    }

    let retimed = ActiveRecord {
        start: new_start,
        ..active
    };

    Ok(with_head(retimed.encode(), rest))
}

pub fn rename(text: &str, new_project: &str) -> Result<String, LedgerError> {
    let (first, rest) = split_head(text);

    match decode_line(first)? {
        Record::Active(active) => {
            let renamed = ActiveRecord {
                project: new_project.to_string(),
                ..active
            };
            Ok(with_head(renamed.encode(), rest))
        }
        Record::Completed(completed) => {
            Err(LedgerError::CannotChangeCompleted { id: completed.id })
        }
    }
}

pub fn discard(text: &str) -> Result<String, LedgerError> {
    if text.is_empty() {
        return Ok(String::new());
    }

    let (first, rest) = split_head(text);

    match decode_line(first)? {
        Record::Completed(_) => Ok(text.to_string()),
        Record::Active(_) => Ok(rest.unwrap_or("").to_string()),
    }
}

fn split_head(text: &str) -> (&str, Option<&str>) {
    match text.split_once('\n') {
        Some((head, rest)) => (head, Some(rest)),
        None => (text, None),
    }
}

fn with_head(head: String, rest: Option<&str>) -> String {
    match rest {
        Some(rest) => format!("{head}\n{rest}"),
        None => head,
    }
}
