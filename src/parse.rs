use itertools::Itertools;
use log::debug;
use thiserror::Error;

use crate::builder::{Builder, BuilderInvalidReason, MachineBuilder};
use crate::indicator::Indicator;
use crate::machine::Machine;

/// Reasons a machine diagram may fail to parse.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum ParseError {
    /// The line has no `[...]` light pattern.
    #[error("no [...] light pattern found")]
    MissingPattern,
    /// The line has more than one `[...]` light pattern.
    #[error("more than one [...] light pattern")]
    DuplicatePattern,
    /// A light pattern contained something other than `.` or `#`.
    #[error("'{0}' is not an indicator light, expected '.' or '#'")]
    BadIndicator(char),
    /// A button listed something other than a light index.
    #[error("'{0}' is not a light index")]
    BadIndex(String),
    /// Something other than `[`, `(` or `{` started a group.
    #[error("unexpected '{0}'")]
    UnexpectedToken(char),
    /// A group was opened and never closed.
    #[error("'{0}' is never closed")]
    Unterminated(char),
    /// The diagram is well formed but describes an impossible machine.
    #[error("invalid machine: {}", .0.iter().join("; "))]
    Invalid(Vec<BuilderInvalidReason>),
    /// Wraps any of the above with the 1-based line it occurred on.
    #[error("line {line}: {source}")]
    Line {
        /// 1-based line number.
        line: usize,
        /// What went wrong on that line.
        source: Box<ParseError>,
    },
}

fn parse_pattern(body: &str) -> Result<Vec<Indicator>, ParseError> {
    body.chars()
        .map(|symbol| Indicator::from_symbol(symbol).ok_or(ParseError::BadIndicator(symbol)))
        .collect()
}

fn parse_button(body: &str) -> Result<Vec<usize>, ParseError> {
    body.split(',')
        .map(str::trim)
        .filter(|index| !index.is_empty())
        .map(|index| index.parse().map_err(|_| ParseError::BadIndex(index.to_string())))
        .collect()
}

/// Parse one machine diagram such as `[.##.] (3) (1,3) (2) (2,3) (0,2) (0,1) {3,5,4,7}`.
///
/// The `[...]` group gives the wanted lights and each `(...)` group the lights wired to one button; `()` is a button
/// wired to nothing. A `{...}` group of joltage requirements is accepted and ignored.
pub fn parse_machine(line: &str) -> Result<Machine, ParseError> {
    let mut pattern = None;
    let mut buttons = Vec::new();

    let mut rest = line.trim_start();
    while let Some(open) = rest.chars().next() {
        let close = match open {
            '[' => ']',
            '(' => ')',
            '{' => '}',
            other => return Err(ParseError::UnexpectedToken(other)),
        };
        let end = rest.find(close).ok_or(ParseError::Unterminated(open))?;
        let body = &rest[1..end];

        match open {
            '[' => {
                if pattern.is_some() {
                    return Err(ParseError::DuplicatePattern);
                }
                pattern = Some(parse_pattern(body)?);
            }
            '(' => buttons.push(parse_button(body)?),
            // joltage
            _ => {}
        }

        rest = rest[end + 1..].trim_start();
    }

    let pattern = pattern.ok_or(ParseError::MissingPattern)?;
    let mut builder = MachineBuilder::with_width(pattern.len());
    builder.target_pattern(&pattern);
    for button in &buttons {
        builder.add_button(button);
    }

    builder.build().map_err(|reasons| ParseError::Invalid(reasons.clone()))
}

/// Parse every machine in `text`, one diagram per line. Blank lines are skipped.
///
/// Errors are wrapped in [`ParseError::Line`].
pub fn parse_machines(text: &str) -> Result<Vec<Machine>, ParseError> {
    let machines: Vec<Machine> = text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(index, line)| parse_machine(line).map_err(|error| ParseError::Line { line: index + 1, source: Box::new(error) }))
        .collect::<Result<_, _>>()?;

    debug!("parsed {} machines", machines.len());
    Ok(machines)
}
