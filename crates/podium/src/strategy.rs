//! Tie-breaking strategies: how a tie-group maps to rank numbers.
//!
//! A strategy is a stateless function from `(start, length)` to the ranks of
//! one tie-group, where `start` is the rank offset handed down from the
//! previous group and `length` is the group size. The five standard
//! conventions are provided as free functions; anything implementing
//! `Fn(u64, usize) -> GroupRanks` works as a custom strategy.
//!
//! For the scores `5, 4, 4, 3` the built-ins produce:
//!
//! | strategy | ranks |
//! |---|---|
//! | [`competition`] | 0, 1, 1, 3 |
//! | [`modified_competition`] | 0, 2, 2, 3 |
//! | [`dense`] | 0, 1, 1, 2 |
//! | [`ordinal`] | 0, 1, 2, 3 |
//! | [`fractional`] | 0, 1.5, 1.5, 3 |

/// Ranks assigned to one tie-group, plus the offset handed to the next group.
///
/// `ranks` must contain exactly one entry per group member, in the members'
/// original relative order. A `None` entry opts that member out of numeric
/// ranking; the built-in strategies never produce one, but custom strategies
/// may (see the module docs of [`crate::ranking`] for an example).
///
/// `next_start` is what lets strategies advance the rank offset at their own
/// pace: most step by the group size, while [`dense`] steps by one per
/// distinct score.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupRanks {
    /// One rank per group member.
    pub ranks: Vec<Option<f64>>,
    /// The `start` value for the next tie-group.
    pub next_start: u64,
}

impl GroupRanks {
    /// A group whose members all share `rank`.
    #[must_use]
    pub fn uniform(rank: f64, len: usize, next_start: u64) -> Self {
        Self {
            ranks: vec![Some(rank); len],
            next_start,
        }
    }
}

/// Standard competition ranking ("1224"): every tied member gets the group's
/// first rank, and the ranks consumed by the group stay consumed.
///
/// # Examples
///
/// ```
/// use podium::competition;
///
/// let group = competition(1, 2);
/// assert_eq!(group.ranks, [Some(1.0), Some(1.0)]);
/// assert_eq!(group.next_start, 3);
/// ```
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn competition(start: u64, len: usize) -> GroupRanks {
    GroupRanks::uniform(start as f64, len, start + len as u64)
}

/// Modified competition ranking ("1334"): every tied member gets the group's
/// last rank.
///
/// # Examples
///
/// ```
/// use podium::modified_competition;
///
/// let group = modified_competition(1, 2);
/// assert_eq!(group.ranks, [Some(2.0), Some(2.0)]);
/// assert_eq!(group.next_start, 3);
/// ```
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn modified_competition(start: u64, len: usize) -> GroupRanks {
    let last = start + len as u64 - 1;
    GroupRanks::uniform(last as f64, len, start + len as u64)
}

/// Dense ranking ("1223"): ties collapse to a single rank step, so the next
/// distinct score always ranks one below the previous.
///
/// # Examples
///
/// ```
/// use podium::dense;
///
/// let group = dense(1, 2);
/// assert_eq!(group.ranks, [Some(1.0), Some(1.0)]);
/// assert_eq!(group.next_start, 2);
/// ```
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn dense(start: u64, len: usize) -> GroupRanks {
    GroupRanks::uniform(start as f64, len, start + 1)
}

/// Ordinal ranking ("1234"): every member gets a distinct, strictly
/// increasing rank, ties notwithstanding.
///
/// # Examples
///
/// ```
/// use podium::ordinal;
///
/// let group = ordinal(1, 2);
/// assert_eq!(group.ranks, [Some(1.0), Some(2.0)]);
/// assert_eq!(group.next_start, 3);
/// ```
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn ordinal(start: u64, len: usize) -> GroupRanks {
    let ranks = (start..start + len as u64).map(|rank| Some(rank as f64)).collect();
    GroupRanks {
        ranks,
        next_start: start + len as u64,
    }
}

/// Fractional ranking ("1 2.5 2.5 4"): every tied member gets the mean of the
/// ranks the group occupies, always a multiple of 0.5.
///
/// # Examples
///
/// ```
/// use podium::fractional;
///
/// let group = fractional(1, 2);
/// assert_eq!(group.ranks, [Some(1.5), Some(1.5)]);
/// assert_eq!(group.next_start, 3);
/// ```
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn fractional(start: u64, len: usize) -> GroupRanks {
    let mean = (2 * start + len as u64 - 1) as f64 / 2.0;
    GroupRanks::uniform(mean, len, start + len as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_singleton_groups_agree() {
        // Without ties, all five conventions coincide.
        for start in [0, 1, 7, 10] {
            let expected = competition(start, 1);
            assert_eq!(expected.ranks.len(), 1);
            assert_eq!(modified_competition(start, 1).ranks, expected.ranks);
            assert_eq!(dense(start, 1).ranks, expected.ranks);
            assert_eq!(ordinal(start, 1).ranks, expected.ranks);
            assert_eq!(fractional(start, 1).ranks, expected.ranks);
        }
    }

    #[test]
    fn test_competition_holds_first_rank() {
        let group = competition(3, 4);
        assert_eq!(group.ranks, vec![Some(3.0); 4]);
        assert_eq!(group.next_start, 7);
    }

    #[test]
    fn test_modified_competition_holds_last_rank() {
        // start + n - 1 for every member.
        let group = modified_competition(3, 4);
        assert_eq!(group.ranks, vec![Some(6.0); 4]);
        assert_eq!(group.next_start, 7);
    }

    #[test]
    fn test_dense_advances_by_one() {
        let group = dense(0, 2);
        assert_eq!(group.ranks, [Some(0.0), Some(0.0)]);
        assert_eq!(group.next_start, 1);
    }

    #[test]
    fn test_ordinal_is_strictly_increasing() {
        let group = ordinal(2, 3);
        assert_eq!(group.ranks, [Some(2.0), Some(3.0), Some(4.0)]);
        assert_eq!(group.next_start, 5);
    }

    #[test]
    fn test_fractional_is_the_mean_of_the_occupied_ranks() {
        let group = fractional(1, 2);
        assert_eq!(group.ranks, [Some(1.5), Some(1.5)]);
        assert_eq!(group.next_start, 3);

        // Mean of 5..=7, and always a multiple of 0.5.
        let group = fractional(5, 3);
        assert_eq!(group.ranks, vec![Some(6.0); 3]);
        for rank in group.ranks.iter().flatten() {
            assert_eq!(rank * 2.0, (rank * 2.0).round());
        }
    }

    #[test]
    fn test_group_length_is_respected() {
        for len in 1..6 {
            assert_eq!(competition(0, len).ranks.len(), len);
            assert_eq!(modified_competition(0, len).ranks.len(), len);
            assert_eq!(dense(0, len).ranks.len(), len);
            assert_eq!(ordinal(0, len).ranks.len(), len);
            assert_eq!(fractional(0, len).ranks.len(), len);
        }
    }
}
