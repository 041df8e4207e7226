use super::{parse_id, range_bounds, tokens, NotationError, MAX_WIDTH};
use auto_enums::auto_enum;

/// Returns the number of ids in a range notation without expanding it
///
/// Only range bounds are validated, other tokens count as a single id. A
/// descending range is not an error: it contributes `end - start + 1` to
/// the total which may be zero or negative.
pub fn count_elements(notation: &str) -> Result<i64, NotationError> {
    let mut count = 0;

    for token in tokens(notation) {
        if let Some((start, end)) = range_bounds(token) {
            let start = parse_id(start, notation)?;
            let end = parse_id(end, notation)?;
            count += i64::from(end) - i64::from(start) + 1;
        } else {
            count += 1;
        }
    }

    Ok(count)
}

/// Expands a range notation into the list of ids it contains
///
/// Ids are returned in the order of the tokens that contain them. Ranges are
/// expanded in ascending order and a descending range yields no id.
///
/// # Examples
///
/// ```
/// assert_eq!(rangenotation::expand_to_ints("32-35,40").unwrap(), vec![32, 33, 34, 35, 40]);
/// ```
#[auto_enum]
pub fn expand_to_ints(notation: &str) -> Result<Vec<u32>, NotationError> {
    let mut ids = Vec::new();

    for token in tokens(notation) {
        #[auto_enum(Iterator)]
        let token_ids = match range_bounds(token) {
            Some((start, end)) => {
                let start = parse_id(start, notation)?;
                let end = parse_id(end, notation)?;
                log::trace!("expanding range {start}-{end}");
                (start..=end).map(Ok::<_, NotationError>)
            }
            None => token.split('-').map(|id| parse_id(id, notation)),
        };

        for id in token_ids {
            ids.push(id?);
        }
    }

    Ok(ids)
}

/// Expands a range notation into a list of zero-padded ids
///
/// Ranges are padded to the number of digits of their lower bound as it is
/// written, so `008-010` expands to `008,009,010`. Other tokens are returned
/// unchanged.
#[auto_enum]
pub fn expand_to_numeral_strings(notation: &str) -> Result<Vec<String>, NotationError> {
    let mut ids = Vec::new();

    for token in tokens(notation) {
        #[auto_enum(Iterator)]
        let token_ids = match range_bounds(token) {
            Some((start_literal, end)) => {
                let start = parse_id(start_literal, notation)?;
                let end = parse_id(end, notation)?;

                let width = start_literal.len();
                if width > MAX_WIDTH {
                    return Err(NotationError::Configuration {
                        literal: start_literal.to_string(),
                        width,
                    });
                }
                log::trace!("expanding range {start}-{end} with {width} digits");

                (start..=end).map(move |id| format!("{id:0>width$}"))
            }
            None => token.split('-').map(str::to_string),
        };

        ids.extend(token_ids);
    }

    Ok(ids)
}
