//! Line-driven interactive session.
//!
//! Each accepted parameter change re-runs the whole pipeline against the
//! same base set and prints the fresh dashboard. A rejected line leaves the
//! previous parameters untouched.

use anyhow::Result;
use std::collections::BTreeSet;
use std::io::{BufRead, Write};
use tracing::{debug, warn};

use crate::dashboard::{BaseSet, TypeSelection, ViewParams, build_dashboard};
use crate::error::SessionError;
use crate::output::{Format, render};
use crate::region::Region;

pub const HELP: &str = "\
commands:
  region <name|code>     choose a region
  scheduled on|off       only airports with scheduled service
  min <feet>             minimum elevation (0-5000)
  types all|<a,b,...>    allowed airport types
  rows <n>               table rows to show (1-20)
  search [term]          search names; no term clears the search
  show                   print the current view again
  help                   this text
  quit                   leave";

/// What the caller should do after a line has been applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Rerun,
    Help,
    Quit,
    Nothing,
}

/// Applies one input line to `params`.
///
/// `params` is only replaced when the whole line is valid.
pub fn apply(params: &mut ViewParams, line: &str) -> Result<Action, SessionError> {
    let line = line.trim();
    let (command, arg) = match line.split_once(char::is_whitespace) {
        Some((c, a)) => (c, a.trim()),
        None => (line, ""),
    };

    let mut next = params.clone();
    match command.to_ascii_lowercase().as_str() {
        "" => return Ok(Action::Nothing),
        "help" | "?" => return Ok(Action::Help),
        "quit" | "exit" | "q" => return Ok(Action::Quit),
        "show" => return Ok(Action::Rerun),
        "region" => next.region = arg.parse::<Region>()?,
        "scheduled" => {
            next.scheduled_only = match arg.to_ascii_lowercase().as_str() {
                "on" | "yes" | "true" | "1" => true,
                "off" | "no" | "false" | "0" => false,
                _ => return Err(bad("scheduled", "on or off")),
            }
        }
        "min" => {
            next.min_elevation = arg
                .parse()
                .map_err(|_| bad("min", "a whole number of feet"))?
        }
        "rows" => next.rows = arg.parse().map_err(|_| bad("rows", "a whole number"))?,
        "types" => next.types = parse_types(arg)?,
        "search" => next.search = arg.to_string(),
        other => return Err(SessionError::UnknownCommand(other.to_string())),
    }

    next.validate()?;
    *params = next;
    Ok(Action::Rerun)
}

fn parse_types(arg: &str) -> Result<TypeSelection, SessionError> {
    if arg.eq_ignore_ascii_case("all") {
        return Ok(TypeSelection::All);
    }
    let types: BTreeSet<String> = arg
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect();
    if types.is_empty() && !arg.is_empty() {
        return Err(bad("types", "'all' or a comma-separated list"));
    }
    Ok(TypeSelection::Only(types))
}

fn bad(command: &'static str, expected: &'static str) -> SessionError {
    SessionError::BadArgument { command, expected }
}

/// Runs the session until `quit` or end of input.
///
/// The initial parameters are rendered once before any input is read.
pub fn run<R: BufRead, W: Write>(
    base: &BaseSet,
    mut params: ViewParams,
    input: R,
    mut out: W,
    format: Format,
) -> Result<ViewParams> {
    render(&mut out, &build_dashboard(base, &params), format)?;
    write!(out, "> ")?;
    out.flush()?;

    for line in input.lines() {
        let line = line?;
        let before = params.clone();
        let applied = apply(&mut params, &line).and_then(|action| {
            params.validate_for(base)?;
            Ok(action)
        });
        if applied.is_err() {
            params = before;
        }
        match applied {
            Ok(Action::Rerun) => {
                debug!(command = %line.trim(), "Parameters changed, re-running");
                render(&mut out, &build_dashboard(base, &params), format)?;
            }
            Ok(Action::Help) => writeln!(out, "{HELP}")?,
            Ok(Action::Quit) => break,
            Ok(Action::Nothing) => {}
            Err(e) => {
                warn!(error = %e, "Rejected session input");
                writeln!(out, "error: {e}")?;
            }
        }
        write!(out, "> ")?;
        out.flush()?;
    }

    writeln!(out)?;
    Ok(params)
}
