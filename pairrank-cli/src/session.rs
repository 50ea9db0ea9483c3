/// Interactive judging loop.
///
/// Reads one answer per line and writes prompts to `out`, so the loop can be
/// driven from a terminal or from a script.
use pairrank_core::{Phase, RankingEngine, Side};
use std::io::{self, BufRead, Write};

use crate::output::{format_status, write_result, write_table};

const HELP: &str = "\
  1  pick the first item
  2  pick the second item
  s  show status and current ranking
  e  print the exported state
  q  stop (progress is saved if a state file is set)";

/// How a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// No more pairs to show.
    Finished(Phase),
    /// The user quit, or input ran out.
    Quit,
}

enum Answer {
    Pick(Side),
    Status,
    Export,
    Quit,
    Help,
    Unknown,
}

fn parse_answer(line: &str) -> Answer {
    match line.trim().to_ascii_lowercase().as_str() {
        "1" => Answer::Pick(Side::First),
        "2" => Answer::Pick(Side::Second),
        "s" | "status" => Answer::Status,
        "e" | "export" => Answer::Export,
        "q" | "quit" => Answer::Quit,
        "?" | "h" | "help" => Answer::Help,
        _ => Answer::Unknown,
    }
}

pub fn run_session<R: BufRead, W: Write>(
    engine: &mut RankingEngine,
    mut input: R,
    out: &mut W,
) -> io::Result<SessionEnd> {
    let mut line = String::new();

    loop {
        let Some(pair) = engine.next_pair() else {
            return Ok(SessionEnd::Finished(engine.phase()));
        };
        let (first, second) = (pair.first.clone(), pair.second.clone());

        writeln!(out, "\nWhich is better?")?;
        writeln!(out, "  1) {first}")?;
        writeln!(out, "  2) {second}")?;
        write!(out, "> ")?;
        out.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            return Ok(SessionEnd::Quit);
        }

        match parse_answer(&line) {
            Answer::Pick(side) => match engine.choose(side) {
                Ok(progress) => {
                    tracing::debug!(comparisons = progress.comparison_count, phase = ?progress.phase, "answer recorded");
                }
                Err(e) => {
                    tracing::warn!(error = %e, "answer rejected");
                    writeln!(out, "Could not record that answer: {e}")?;
                }
            },
            Answer::Status => {
                writeln!(out, "{}", format_status(&engine.status()))?;
                write_table(out, &engine.ranking())?;
            }
            Answer::Export => writeln!(out, "{}", engine.export_json())?,
            Answer::Quit => return Ok(SessionEnd::Quit),
            Answer::Help => writeln!(out, "{HELP}")?,
            Answer::Unknown => writeln!(out, "Unrecognised answer \"{}\". Type ? for help.", line.trim())?,
        }
    }
}

/// Write what follows the last prompt: a blank line, then the result if
/// the session finished.
pub fn write_session_end<W: Write>(
    out: &mut W,
    engine: &RankingEngine,
    end: SessionEnd,
    json: bool,
) -> io::Result<()> {
    writeln!(out)?;
    match end {
        SessionEnd::Finished(phase) => write_result(out, &engine.ranking(), &engine.status(), phase, json),
        SessionEnd::Quit => Ok(()),
    }
}
