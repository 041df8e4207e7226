mod expand;
mod fold;

pub use expand::count_elements;
pub use expand::expand_to_ints;
pub use expand::expand_to_numeral_strings;
pub use fold::compress;
pub use fold::join;

use std::num::ParseIntError;
use thiserror::Error;

/// Maximum number of digits supported when zero-padding expanded ids
pub const MAX_WIDTH: usize = 3;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NotationError {
    #[error("invalid integer '{literal}' in range notation '{notation}'")]
    Parse {
        literal: String,
        notation: String,
        #[source]
        source: ParseIntError,
    },
    #[error(
        "unsupported digit width {width} for '{literal}': at most {} digits are supported",
        MAX_WIDTH
    )]
    Configuration { literal: String, width: usize },
}

/// Splits a range notation into its comma separated tokens
///
/// ", " and "," are both accepted as delimiters but cannot be mixed: ", " is
/// used unless it leaves the notation in one piece. An empty notation has no
/// tokens.
fn tokens(notation: &str) -> Vec<&str> {
    if notation.is_empty() {
        return vec![];
    }

    let spaced: Vec<&str> = notation.split(", ").collect();
    if spaced.len() > 1 {
        log::trace!("splitting '{notation}' on ', '");
        return spaced;
    }

    log::trace!("splitting '{notation}' on ','");
    notation.split(',').collect()
}

/// Parses a literal id, keeping the notation around for error reporting
fn parse_id(literal: &str, notation: &str) -> Result<u32, NotationError> {
    literal.parse().map_err(|source| NotationError::Parse {
        literal: literal.to_string(),
        notation: notation.to_string(),
        source,
    })
}

/// Returns the bounds of a token if it is a `start-end` range
fn range_bounds(token: &str) -> Option<(&str, &str)> {
    let mut parts = token.split('-');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(start), Some(end), None) => Some((start, end)),
        _ => None,
    }
}
