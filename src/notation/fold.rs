use itertools::Itertools;

/// Returns whether `next` immediately follows `cur`
fn is_successor(cur: u32, next: Option<&u32>) -> bool {
    next.is_some_and(|&next| cur.checked_add(1) == Some(next))
}

/// Folds a list of ids into a comma-separated string of contiguous ranges
///
/// Ids must be sorted and deduplicated: they are only merged with their
/// immediate neighbours so unsorted input produces a valid but non-minimal
/// notation.
///
/// # Examples
///
/// ```
/// assert_eq!(rangenotation::compress(&[0, 1, 2, 3, 4, 5, 6, 8, 9, 10, 42]), "0-6,8-10,42");
/// ```
pub fn compress(ids: &[u32]) -> String {
    ids.iter()
        .zip(ids.iter().skip(1).map(Some).chain(std::iter::once(None)))
        .batching(|it| {
            let (&first, next) = it.next()?;
            if !is_successor(first, next) {
                return Some(first.to_string());
            }
            for (&cur, next) in it {
                if !is_successor(cur, next) {
                    return Some(format!("{first}-{cur}"));
                }
            }
            // Should never be reached: the last id has no successor
            None
        })
        .join(",")
}

/// Joins ids with commas, in order and without folding them into ranges
pub fn join(ids: &[u32]) -> String {
    ids.iter().join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compress() {
        assert_eq!(
            compress(&[0, 1, 2, 3, 4, 5, 6, 8, 9, 10, 42]),
            "0-6,8-10,42"
        );
        assert_eq!(compress(&[32]), "32");
        assert_eq!(compress(&[1, 2]), "1-2");
        assert_eq!(compress(&[1, 3, 5]), "1,3,5");
        assert_eq!(compress(&[7, 8, 9, 11, 12]), "7-9,11-12");
        assert_eq!(compress(&[]), "");
    }

    #[test]
    fn test_compress_bounds() {
        assert_eq!(compress(&[u32::MAX - 1, u32::MAX]), "4294967294-4294967295");
        assert_eq!(compress(&[u32::MAX, 0, 1]), "4294967295,0-1");
    }

    #[test]
    fn test_compress_unsorted() {
        // Ids are not reordered, only adjacent ones are merged
        assert_eq!(compress(&[3, 1, 2]), "3,1-2");
        assert_eq!(compress(&[1, 1, 2]), "1,1-2");
    }

    #[test]
    fn test_join() {
        assert_eq!(join(&[1, 2, 3, 4, 5, 6]), "1,2,3,4,5,6");
        assert_eq!(join(&[5, 1, 5]), "5,1,5");
        assert_eq!(join(&[]), "");
    }
}
