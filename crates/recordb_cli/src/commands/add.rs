//! Add command implementation.

use chrono::NaiveDate;
use recordb_core::{CoreError, Employee, PhoneNumber, PhoneType, RecordStore};
use std::io::{self, BufRead, Write};
use std::path::Path;
use thiserror::Error;
use tracing::{info, warn};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Errors while prompting for an employee.
#[derive(Debug, Error)]
pub enum PromptError {
    /// Reading input or writing a prompt failed.
    #[error("console I/O failed: {0}")]
    Io(#[from] io::Error),

    /// Input ended before a required answer.
    #[error("input ended before {field} was entered")]
    EndOfInput {
        /// The field being prompted for.
        field: &'static str,
    },

    /// An answer could not be parsed.
    #[error("invalid {field} \"{input}\"")]
    Invalid {
        /// The field being prompted for.
        field: &'static str,
        /// What was entered.
        input: String,
    },

    /// The answers do not form a valid employee.
    #[error(transparent)]
    Record(#[from] CoreError),
}

/// Runs the add command.
pub fn run(store: &RecordStore, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let employee = prompt_employee(&mut stdin.lock(), &mut stdout.lock())?;

    info!("Adding employee {} to {:?}", employee.id(), path);
    store.append(path, employee)?;
    Ok(())
}

/// Prompts for every field and builds an employee.
///
/// Blank answers leave optional fields absent. An unrecognised phone type
/// falls back to [`PhoneType::Unknown`] with a notice.
pub fn prompt_employee<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
) -> Result<Employee, PromptError> {
    let id_text = required(input, output, "Enter Person ID:", "id")?;
    let id: i64 = id_text.parse().map_err(|_| PromptError::Invalid {
        field: "id",
        input: id_text.clone(),
    })?;
    let name = required(input, output, "Enter Name:", "name")?;

    let mut builder = Employee::builder(id, name);

    if let Some(email) = optional(input, output, "Enter Email Address (blank for none):")? {
        builder = builder.email(email);
    }

    if let Some(text) = optional(input, output, "Enter Birthday as YYYY-MM-DD (blank for none):")? {
        let birthday =
            NaiveDate::parse_from_str(&text, DATE_FORMAT).map_err(|_| PromptError::Invalid {
                field: "birthday",
                input: text.clone(),
            })?;
        builder = builder.birthday(birthday);
    }

    if let Some(text) = optional(input, output, "Enter Gender, male or female (blank for none):")? {
        builder = builder.gender(text.parse()?);
    }

    if let Some(text) = optional(
        input,
        output,
        "Enter Role: architect, consultant, developer or manager (blank for unknown):",
    )? {
        builder = builder.role(text.parse()?);
    }

    while let Some(number) = optional(input, output, "Enter a Phone Number (or leave blank to finish):")? {
        let answer = optional(input, output, "Is this a mobile, home or work phone?")?;
        let (kind, recognised) = PhoneType::parse_lenient(answer.as_deref().unwrap_or_default());
        if !recognised {
            warn!("Unknown phone type {:?} for {}", answer, number);
            writeln!(output, "Unknown phone type. Using default.")?;
        }
        builder = builder.phone(PhoneNumber::new(number, kind));
    }

    Ok(builder.build()?)
}

/// Prints `prompt` and reads one trimmed line. `None` at end of input.
fn ask<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    prompt: &str,
) -> io::Result<Option<String>> {
    writeln!(output, "{prompt}")?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

fn optional<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    prompt: &str,
) -> io::Result<Option<String>> {
    Ok(ask(input, output, prompt)?.filter(|answer| !answer.is_empty()))
}

fn required<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    prompt: &str,
    field: &'static str,
) -> Result<String, PromptError> {
    ask(input, output, prompt)?.ok_or(PromptError::EndOfInput { field })
}
