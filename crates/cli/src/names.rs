//! `dlink match|normalize|cores|generic`: single-name and pairwise checks.

use std::io::{self, Write};

use donorlink_matcher::{extract_cores, is_too_generic, match_entities, normalize};

use crate::exit_codes::EXIT_NO_MATCH;
use crate::CliError;

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, CliError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| CliError::io(format!("JSON serialization error: {e}")))
}

fn print_lines<I, S>(lines: I) -> Result<(), CliError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    for line in lines {
        writeln!(handle, "{}", line.as_ref()).map_err(|e| CliError::io(e.to_string()))?;
    }
    Ok(())
}

pub fn cmd_match(scraped: &str, existing: &str, json: bool) -> Result<(), CliError> {
    let verdict = match_entities(scraped, existing);

    if json {
        print_lines([to_json(&verdict)?])?;
    } else {
        let head = if verdict.matched { "match" } else { "no match" };
        print_lines([format!("{head} ({})", verdict.reason)])?;
        if let Some(ref evidence) = verdict.evidence {
            eprintln!("  scraped:  {}", evidence.scraped);
            eprintln!("  existing: {}", evidence.existing);
        }
    }

    if verdict.matched {
        Ok(())
    } else {
        Err(CliError::silent(EXIT_NO_MATCH))
    }
}

pub fn cmd_normalize(name: &str) -> Result<(), CliError> {
    print_lines([normalize(name)])
}

pub fn cmd_cores(name: &str, json: bool) -> Result<(), CliError> {
    let cores = extract_cores(name);
    if json {
        print_lines([to_json(&cores)?])
    } else {
        print_lines(&cores)
    }
}

pub fn cmd_generic(name: &str) -> Result<(), CliError> {
    print_lines([is_too_generic(name).to_string()])
}
