mod ledger;
mod notes;
mod project;
mod record;
mod storage;
mod summary;

use std::error::Error;
use std::path::PathBuf;

use chrono::{DateTime, FixedOffset, Utc};
use clap::{Parser, Subcommand};
use serde::Serialize;

use crate::ledger::{decode, discard, insert, rename, retime, stop};
use crate::notes::{recent_notes, remember_note, resolve_note_path};
use crate::project::{aggregate, format_duration};
use crate::record::{format_timestamp, ActiveRecord, CompletedRecord};
use crate::storage::{load_note, save_note};
use crate::summary::summarize;

const STATUS_RECORD_LIMIT: usize = 10;

#[derive(Debug, Parser)]
#[command(name = "timenote", about = "Time tracker that lives inside a plain-text note")]
struct Cli {
	#[arg(long)]
	note: Option<PathBuf>,
	#[command(subcommand)]
	command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
	Start {
		#[arg(long)]
		project: String,
		#[arg(long)]
		at: Option<String>,
	},
	Stop {
		#[arg(long)]
		at: Option<String>,
	},
	Retime {
		#[arg(long)]
		start: String,
	},
	Rename {
		#[arg(long)]
		project: String,
	},
	Discard,
	Status {
		#[arg(long)]
		json: bool,
	},
	Projects {
		#[arg(long)]
		json: bool,
	},
	Export {
		#[arg(long)]
		out: Option<PathBuf>,
	},
	Notes {
		#[arg(long, default_value_t = 20)]
		limit: usize,
	},
}

#[derive(Debug, Serialize)]
struct StatusView<'a> {
	active: Option<&'a ActiveRecord>,
	completed: &'a [CompletedRecord],
}

#[derive(Debug, Serialize)]
struct ProjectView<'a> {
	name: &'a str,
	total_seconds: i64,
}

fn main() {
	if let Err(err) = run() {
		eprintln!("error: {err}");
		std::process::exit(1);
	}
}

fn run() -> Result<(), Box<dyn Error>> {
	let cli = Cli::parse();

	if let Command::Notes { limit } = &cli.command {
		print_recent_notes(*limit)?;
		return Ok(());
	}

	let note_path = resolve_note_path(cli.note)?;
	let text = load_note(&note_path)?;
	if let Err(err) = remember_note(&note_path) {
		eprintln!("warning: failed to store recent note: {err}");
	}

	match cli.command {
		Command::Start { project, at } => {
			if project.trim().is_empty() {
				return Err("a new record needs a non-empty project name".into());
			}
			if let (_, Some(active)) = decode(&text) {
				return Err(format!(
					"{} is already being tracked (record {}); stop or discard it first",
					active.project, active.id
				)
				.into());
			}
			let start = parse_instant(at.as_deref())?;
			let updated = insert(&text, &project, start)?;
			save_note(&note_path, &updated)?;
			println!("started {project} at {}", format_timestamp(&start));
		}
		Command::Stop { at } => {
			let active = match decode(&text) {
				(_, Some(active)) => active,
				(_, None) => return Err("no record is being tracked".into()),
			};
			let end = parse_instant(at.as_deref())?;
			let updated = stop(&text, end)?;
			save_note(&note_path, &updated)?;
			println!("stopped {} at {}", active.project, format_timestamp(&end));
		}
		Command::Retime { start } => {
			let start = parse_instant(Some(start.as_str()))?;
			let updated = retime(&text, start)?;
			save_note(&note_path, &updated)?;
			println!("moved start to {}", format_timestamp(&start));
		}
		Command::Rename { project } => {
			let updated = rename(&text, &project)?;
			save_note(&note_path, &updated)?;
			println!("renamed running record to {project}");
		}
		Command::Discard => match decode(&text) {
			(_, Some(active)) => {
				let updated = discard(&text)?;
				save_note(&note_path, &updated)?;
				println!("discarded {}", active.project);
			}
			(_, None) => println!("no running record to discard"),
		},
		Command::Status { json } => print_status(&text, json)?,
		Command::Projects { json } => print_projects(&text, json)?,
		Command::Export { out } => {
			let csv = summarize(&text);
			match out {
				Some(path) => {
					save_note(&path, &csv)?;
					println!("wrote summary to {}", path.display());
				}
				None => println!("{csv}"),
			}
		}
		Command::Notes { .. } => {}
	}

	Ok(())
}

fn print_status(text: &str, json: bool) -> Result<(), Box<dyn Error>> {
	let (completed, active) = decode(text);

	if json {
		let view = StatusView {
			active: active.as_ref(),
			completed: &completed,
		};
		println!("{}", serde_json::to_string_pretty(&view)?);
		return Ok(());
	}

	let now = Utc::now().fixed_offset();
	match &active {
		Some(record) => println!(
			"tracking {} since {} ({} so far)",
			record.project,
			format_timestamp(&record.start),
			format_duration(now - record.start)
		),
		None => println!("no record is being tracked"),
	}

	if completed.is_empty() {
		return Ok(());
	}

	println!("\nrecent records:");
	for record in completed.iter().take(STATUS_RECORD_LIMIT) {
		println!(
			"{} | {} | {}",
			format_duration(record.end - record.start),
			record.project,
			format_timestamp(&record.start)
		);
	}

	Ok(())
}

fn print_projects(text: &str, json: bool) -> Result<(), Box<dyn Error>> {
	let (completed, _) = decode(text);
	let projects = aggregate(&completed);

	if json {
		let views = projects
			.iter()
			.map(|project| ProjectView {
				name: &project.name,
				total_seconds: project.total_time.num_seconds(),
			})
			.collect::<Vec<_>>();
		println!("{}", serde_json::to_string_pretty(&views)?);
		return Ok(());
	}

	if projects.is_empty() {
		println!("no completed records yet");
		return Ok(());
	}

	for project in &projects {
		println!("{} | {}", format_duration(project.total_time), project.name);
	}

	Ok(())
}

fn print_recent_notes(limit: usize) -> Result<(), Box<dyn Error>> {
	let rows = recent_notes(limit)?;
	if rows.is_empty() {
		println!("no recent notes");
		return Ok(());
	}

	for (index, path) in rows.iter().enumerate() {
		println!("{:>2}. {}", index + 1, path.display());
	}

	Ok(())
}

fn parse_instant(input: Option<&str>) -> Result<DateTime<FixedOffset>, Box<dyn Error>> {
	match input {
		Some(raw) => Ok(DateTime::parse_from_rfc3339(raw)?),
		None => Ok(Utc::now().fixed_offset()),
	}
}
