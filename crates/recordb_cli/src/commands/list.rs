//! List command implementation.

use clap::ValueEnum;
use recordb_core::{Employee, Gender, Listing, RecordStore, Role};
use serde::Serialize;
use std::io::{self, Write};
use std::path::Path;

/// How to print a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Aligned label/value lines.
    Text,
    /// A pretty-printed JSON document.
    Json,
}

/// JSON view of a listing.
#[derive(Debug, Serialize)]
struct ListingView<'a> {
    path: &'a str,
    exists: bool,
    employees: Vec<EmployeeView<'a>>,
}

/// JSON view of one employee.
#[derive(Debug, Serialize)]
struct EmployeeView<'a> {
    id: u32,
    name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    birthday: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    gender: Option<Gender>,
    role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    email: Option<&'a str>,
    phones: Vec<PhoneView<'a>>,
    version: u16,
}

#[derive(Debug, Serialize)]
struct PhoneView<'a> {
    number: &'a str,
    #[serde(rename = "type")]
    kind: &'static str,
}

impl<'a> From<&'a Employee> for EmployeeView<'a> {
    fn from(e: &'a Employee) -> Self {
        Self {
            id: e.id().get(),
            name: e.name(),
            birthday: e.birthday().map(|d| d.format("%Y-%m-%d").to_string()),
            gender: e.gender(),
            role: e.role(),
            email: e.email(),
            phones: e
                .phones()
                .iter()
                .map(|p| PhoneView {
                    number: &p.number,
                    kind: p.kind.as_str(),
                })
                .collect(),
            version: e.version().tag(),
        }
    }
}

/// Runs the list command.
pub fn run(
    store: &RecordStore,
    path: &Path,
    output: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let listing = store.list_all(path)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match output {
        OutputFormat::Text => write_text(&listing, &mut out)?,
        OutputFormat::Json => write_json(&listing, &mut out)?,
    }

    Ok(())
}

/// Writes each employee as aligned `label : value` lines followed by a
/// blank line.
pub fn write_text<W: Write>(listing: &Listing, out: &mut W) -> io::Result<()> {
    if !listing.exists {
        writeln!(out, "{} : path does not exist", listing.path)?;
        return Ok(());
    }

    for e in &listing.records {
        writeln!(out, "{:<15} : {:<15}", "Person ID", e.id().get())?;
        writeln!(out, "{:<15} : {:<15}", "Name", e.name())?;
        if let Some(email) = e.email() {
            writeln!(out, "{:<15} : {:<15}", "Email", email)?;
        }
        for phone in e.phones() {
            writeln!(out, "#{:<14} : {:<15}", phone.kind.as_str(), phone.number)?;
        }
        writeln!(out)?;
    }

    Ok(())
}

/// Writes the listing as a JSON document.
pub fn write_json<W: Write>(listing: &Listing, out: &mut W) -> io::Result<()> {
    let view = ListingView {
        path: &listing.path,
        exists: listing.exists,
        employees: listing.records.iter().map(EmployeeView::from).collect(),
    };
    serde_json::to_writer_pretty(&mut *out, &view)?;
    writeln!(out)
}
