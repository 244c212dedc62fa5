//! Line-oriented interactive session.
//!
//! One engine lives for the whole session, so feedback applied on one line
//! affects every later decision, exactly like a single page visit.

use anyhow::Result;
use std::io::{BufRead, Write};

use oraculo_core::DecisionEngine;

use crate::render;

/// A parsed session command.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Decide(String),
    Feedback { principle: String, weight: f64 },
    Principles,
    Situations,
    Log,
    Help,
    Quit,
}

const HELP: &str = "\
Commands:
  decide <situation>            evaluate a situation
  feedback <principle> <weight> set a principle weight (0.0 - 1.0)
  principles                    show current principle weights
  situations                    list known situations
  log                           show the decision log
  help                          show this help
  quit                          end the session";

/// Parse one input line. Blank lines yield `Ok(None)`.
pub fn parse_command(line: &str) -> Result<Option<Command>, String> {
    let mut parts = line.split_whitespace();
    let Some(verb) = parts.next() else {
        return Ok(None);
    };
    let args: Vec<&str> = parts.collect();

    let command = match (verb, args.as_slice()) {
        ("decide", [situation]) => Command::Decide(situation.to_string()),
        ("decide", _) => return Err("usage: decide <situation>".to_string()),
        ("feedback", [principle, weight]) => Command::Feedback {
            principle: principle.to_string(),
            weight: parse_weight(weight)?,
        },
        ("feedback", _) => return Err("usage: feedback <principle> <weight>".to_string()),
        ("principles", []) => Command::Principles,
        ("situations", []) => Command::Situations,
        ("log", []) => Command::Log,
        ("help", []) => Command::Help,
        ("quit" | "exit", []) => Command::Quit,
        (other, _) => return Err(format!("unknown command '{}', try 'help'", other)),
    };
    Ok(Some(command))
}

/// Parse a feedback weight, constrained to [0.0, 1.0] at this layer.
pub fn parse_weight(s: &str) -> Result<f64, String> {
    let weight: f64 = s
        .parse()
        .map_err(|_| format!("invalid weight '{}': expected a number", s))?;
    if (0.0..=1.0).contains(&weight) {
        Ok(weight)
    } else {
        Err(format!("weight {} out of range: expected 0.0 - 1.0", weight))
    }
}

/// Run commands from `input` until EOF or `quit`, writing to `out`.
///
/// Bad input is reported and the session continues.
pub fn run_session<R: BufRead, W: Write>(
    engine: &mut DecisionEngine,
    input: R,
    out: &mut W,
) -> Result<()> {
    writeln!(out, "{}", HELP)?;

    for line in input.lines() {
        let line = line?;
        let command = match parse_command(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(message) => {
                writeln!(out, "Error: {}", message)?;
                continue;
            }
        };

        match command {
            Command::Decide(situation) => {
                let outcome = engine.decide(&situation);
                render::write_outcome(out, &outcome, None)?;
            }
            Command::Feedback { principle, weight } => {
                if engine.apply_feedback(&principle, weight) {
                    writeln!(out, "Adjusted '{}' to {}", principle, weight)?;
                } else {
                    writeln!(out, "Principle not found: {}", principle)?;
                }
            }
            Command::Principles => render::write_principles(out, engine.list_principles())?,
            Command::Situations => render::write_situations(out, engine.catalog())?,
            Command::Log => render::write_log(out, engine.log())?,
            Command::Help => writeln!(out, "{}", HELP)?,
            Command::Quit => break,
        }
    }

    Ok(())
}
