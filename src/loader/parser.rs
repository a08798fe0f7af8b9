//! Dataset line parsing.
//!
//! Line 0 of a dataset is a capacity header: a single non-negative integer
//! giving the expected number of routes. Every following line is
//! `<route_id> <stop_id> <stop_id> ...` separated by single spaces.

use crate::core::BusRoute;
use crate::error::ParseError;

/// Minimum number of tokens on a data line: a route id and two stops.
pub const MIN_ROUTE_TOKENS: usize = 3;

/// Separator between tokens on a data line.
const TOKEN_SEPARATOR: char = ' ';

/// The result of successfully parsing one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedLine {
    /// Advisory number of routes declared by the header.
    CapacityHint(usize),
    /// A complete route ready for insertion.
    Route(BusRoute),
}

/// Parses one dataset line given its zero-based position in the file.
///
/// # Errors
///
/// Returns a [`ParseError`] if the header is not a non-negative integer,
/// if a data line has fewer than [`MIN_ROUTE_TOKENS`] tokens, or if any
/// token of a data line is not an integer. A rejected data line never
/// yields a partial route.
///
/// # Examples
///
/// ```
/// use busroute::loader::{ParsedLine, parse_line};
///
/// assert_eq!(parse_line("3", 0), Ok(ParsedLine::CapacityHint(3)));
/// assert!(parse_line("1 10", 1).is_err());
/// ```
pub fn parse_line(line: &str, line_index: usize) -> Result<ParsedLine, ParseError> {
    if line_index == 0 {
        parse_capacity_hint(line, line_index).map(ParsedLine::CapacityHint)
    } else {
        parse_route(line, line_index).map(ParsedLine::Route)
    }
}

/// Parses the header line.
///
/// # Errors
///
/// Returns [`ParseError::InvalidCapacityHint`] unless the whole line is a
/// non-negative integer.
pub fn parse_capacity_hint(line: &str, line_index: usize) -> Result<usize, ParseError> {
    line.parse::<usize>()
        .map_err(|_| ParseError::InvalidCapacityHint {
            line: line_index,
            value: line.to_string(),
        })
}

/// Parses a data line into a route.
///
/// Trailing separators are ignored; a doubled separator inside the line
/// produces an empty token, which is not an integer.
///
/// # Errors
///
/// Returns [`ParseError::TooFewTokens`] or [`ParseError::NonIntegerToken`].
pub fn parse_route(line: &str, line_index: usize) -> Result<BusRoute, ParseError> {
    let tokens: Vec<&str> = line
        .trim_end_matches(TOKEN_SEPARATOR)
        .split(TOKEN_SEPARATOR)
        .collect();

    if tokens.len() < MIN_ROUTE_TOKENS {
        return Err(ParseError::TooFewTokens {
            line: line_index,
            found: tokens.iter().filter(|t| !t.is_empty()).count(),
        });
    }

    let Some((id_token, stop_tokens)) = tokens.split_first() else {
        return Err(ParseError::TooFewTokens {
            line: line_index,
            found: 0,
        });
    };

    let id = parse_token(id_token, line_index)?;
    let mut route = BusRoute::with_capacity(id, stop_tokens.len());
    for token in stop_tokens {
        route.stop_ids.push(parse_token(token, line_index)?);
    }

    Ok(route)
}

fn parse_token(token: &str, line_index: usize) -> Result<i32, ParseError> {
    token.parse().map_err(|_| ParseError::NonIntegerToken {
        line: line_index,
        token: token.to_string(),
    })
}
