//! The lazy ranking engine: tie-group detection and strategy dispatch.
//!
//! [`Ranking`] wraps an already-sorted collection of scored items and, on
//! iteration, yields `(rank, item)` pairs in the original input order. Equal
//! scores form a tie-group that is ranked as a unit by the active strategy;
//! unscored items rank `None` and never consume a rank.
//!
//! The engine never sorts for you. It validates while sweeping and reports
//! [`RankingError::OutOfOrder`] when two adjacent scored items violate the
//! required best-first order.
//!
//! # Custom strategies
//!
//! Any `Fn(u64, usize) -> GroupRanks` is a strategy. For example, a
//! tournament that refuses to award tied places can rank only contested
//! groups:
//!
//! ```
//! use podium::{GroupRanks, Ranking, competition};
//!
//! fn exclusive(start: u64, len: usize) -> GroupRanks {
//!     if len == 1 {
//!         competition(start, len)
//!     } else {
//!         GroupRanks {
//!             ranks: vec![None; len],
//!             next_start: start + len as u64,
//!         }
//!     }
//! }
//!
//! let ranks: Result<Vec<_>, _> = Ranking::new(vec![5, 4, 4, 3], exclusive).ranks().collect();
//! assert_eq!(ranks.unwrap(), [Some(0.0), None, None, Some(3.0)]);
//! ```

use std::{cmp::Ordering, collections::VecDeque, iter::Fuse};

use crate::{GroupRanks, Score, ScoreComparer};

/// Errors surfaced while consuming a [`Ranking`].
///
/// Both variants are usage errors: they mean the input sequence itself is
/// unusable, so the iterator fuses after reporting one. Every pair yielded
/// before the error remains valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum RankingError {
    /// Two adjacent scored items were not in the required rank order.
    /// The input must be pre-sorted best-first; the engine never sorts.
    #[display("item at position {position} is out of rank order")]
    OutOfOrder {
        /// Zero-based input position of the item that broke the order.
        position: usize,
    },
    /// The score type refused to order an item against its predecessor,
    /// e.g. a NaN among floats.
    #[display("score at position {position} cannot be ordered against its predecessor")]
    Incomparable {
        /// Zero-based input position of the item that could not be compared.
        position: usize,
    },
}

/// A lazy ranking over a pre-sorted collection of scored items.
///
/// Construction only captures parameters; all work happens on iteration,
/// which consumes the `Ranking` and pulls items one at a time. Anything
/// `IntoIterator` is accepted, including single-use sources such as iterator
/// adaptors; to rank the same data twice, build a new `Ranking` from a
/// repeatable source.
///
/// An empty collection is valid and ranks to an empty sequence.
///
/// # Examples
///
/// ```
/// use podium::{Ranking, fractional};
///
/// let ranks: Result<Vec<_>, _> = Ranking::new(vec![5, 4, 4, 3], fractional).ranks().collect();
/// assert_eq!(ranks.unwrap(), [Some(0.0), Some(1.5), Some(1.5), Some(3.0)]);
/// ```
///
/// Ranks can start anywhere:
///
/// ```
/// use podium::{Ranking, competition};
///
/// let ranking = Ranking::new(vec![5, 4, 4, 3], competition).start(10);
/// let ranks: Result<Vec<_>, _> = ranking.ranks().collect();
/// assert_eq!(ranks.unwrap(), [Some(10.0), Some(11.0), Some(11.0), Some(13.0)]);
/// ```
#[must_use = "rankings are lazy and do nothing unless iterated"]
pub struct Ranking<I, T, K, S> {
    items: I,
    key: K,
    strategy: S,
    comparer: ScoreComparer<T>,
    start: u64,
}

fn clone_score<T: Clone>(score: &T) -> Score<T> {
    Score::Value(score.clone())
}

fn option_score<T: Clone>(score: &Option<T>) -> Score<T> {
    score.clone().into()
}

impl<I, T, S> Ranking<I, T, fn(&T) -> Score<T>, S>
where
    I: IntoIterator<Item = T>,
    T: Clone,
    S: Fn(u64, usize) -> GroupRanks,
{
    /// Ranks a collection whose items are the scores themselves.
    pub fn new(scores: I, strategy: S) -> Self {
        Self::with_key(scores, clone_score, strategy)
    }
}

impl<I, T, S> Ranking<I, T, fn(&Option<T>) -> Score<T>, S>
where
    I: IntoIterator<Item = Option<T>>,
    T: Clone,
    S: Fn(u64, usize) -> GroupRanks,
{
    /// Ranks a collection of optional scores, `None` meaning unscored.
    ///
    /// # Examples
    ///
    /// ```
    /// use podium::{Ranking, competition};
    ///
    /// let scores = vec![Some(100), Some(50), Some(50), None, None];
    /// let ranks: Result<Vec<_>, _> = Ranking::from_options(scores, competition).ranks().collect();
    /// assert_eq!(ranks.unwrap(), [Some(0.0), Some(1.0), Some(1.0), None, None]);
    /// ```
    pub fn from_options(scores: I, strategy: S) -> Self {
        Self::with_key(scores, option_score, strategy)
    }
}

impl<I, T, K, S> Ranking<I, T, K, S>
where
    I: IntoIterator,
    K: Fn(&I::Item) -> Score<T>,
    S: Fn(u64, usize) -> GroupRanks,
{
    /// Ranks arbitrary records by a score extracted per item.
    ///
    /// The items themselves flow through to the output untouched; only the
    /// extracted score participates in ordering.
    pub fn with_key(items: I, key: K, strategy: S) -> Self {
        Self {
            items,
            key,
            strategy,
            comparer: ScoreComparer::new(),
            start: 0,
        }
    }

    /// When `reverse` is true, lower scores rank better ("less is more",
    /// as for race times). Unscored items still trail.
    #[must_use]
    pub fn reverse(mut self, reverse: bool) -> Self {
        self.comparer = self.comparer.reverse(reverse);
        self
    }

    /// Sets the rank of the best tie-group. Defaults to 0.
    #[must_use]
    pub fn start(mut self, start: u64) -> Self {
        self.start = start;
        self
    }

    /// Registers an in-band sentinel score to treat as unscored.
    ///
    /// # Examples
    ///
    /// ```
    /// use podium::{Ranking, competition};
    ///
    /// let ranking = Ranking::new(vec![100, 50, 50, -1, -1], competition).no_score(-1);
    /// let ranks: Result<Vec<_>, _> = ranking.ranks().collect();
    /// assert_eq!(ranks.unwrap(), [Some(0.0), Some(1.0), Some(1.0), None, None]);
    /// ```
    #[must_use]
    pub fn no_score(mut self, sentinel: T) -> Self {
        self.comparer = self.comparer.no_score(sentinel);
        self
    }

    /// Yields only the rank half of each `(rank, item)` pair, in the same
    /// order.
    pub fn ranks(self) -> impl Iterator<Item = Result<Option<f64>, RankingError>>
    where
        T: PartialOrd,
    {
        self.into_iter().map(|step| step.map(|(rank, _)| rank))
    }
}

impl<I, T, K, S> IntoIterator for Ranking<I, T, K, S>
where
    I: IntoIterator,
    T: PartialOrd,
    K: Fn(&I::Item) -> Score<T>,
    S: Fn(u64, usize) -> GroupRanks,
{
    type Item = Result<(Option<f64>, I::Item), RankingError>;
    type IntoIter = RankingIter<I::IntoIter, T, K, S>;

    fn into_iter(self) -> Self::IntoIter {
        RankingIter {
            items: self.items.into_iter().fuse(),
            key: self.key,
            strategy: self.strategy,
            comparer: self.comparer,
            held: None,
            group: Vec::new(),
            start: self.start,
            position: 0,
            ready: VecDeque::new(),
            done: false,
        }
    }
}

/// Single-pass iterator over `(rank, item)` pairs, created by
/// [`Ranking::into_iter`].
///
/// The sweep holds back each item until its successor's score is known:
/// equal scores accumulate into the current tie-group, and a strictly worse
/// score (or the end of input) flushes the group through the strategy.
pub struct RankingIter<It, T, K, S>
where
    It: Iterator,
{
    items: Fuse<It>,
    key: K,
    strategy: S,
    comparer: ScoreComparer<T>,
    /// The most recently pulled item, not yet assigned to a group.
    held: Option<(Score<T>, It::Item)>,
    /// Members of the currently open tie-group, in input order.
    group: Vec<It::Item>,
    start: u64,
    position: usize,
    /// Pairs ranked but not yet yielded.
    ready: VecDeque<(Option<f64>, It::Item)>,
    done: bool,
}

impl<It, T, K, S> RankingIter<It, T, K, S>
where
    It: Iterator,
    T: PartialOrd,
    K: Fn(&It::Item) -> Score<T>,
    S: Fn(u64, usize) -> GroupRanks,
{
    /// Files `left` into the output, comparing it against the score of the
    /// item that follows it (`None` at the end of input).
    fn advance(
        &mut self,
        left: (Score<T>, It::Item),
        right: Option<&Score<T>>,
    ) -> Result<(), RankingError> {
        let (score, item) = left;
        if score.is_missing() {
            // Unscored items rank None and never touch the offset. The open
            // group is always empty here: a scored predecessor compares
            // Greater against a missing score and flushes first.
            self.ready.push_back((None, item));
            return Ok(());
        }
        let ordering = match right {
            Some(right) => self
                .comparer
                .compare(&score, right)
                .map_err(|_| RankingError::Incomparable {
                    position: self.position,
                })?,
            None => Ordering::Greater,
        };
        match ordering {
            Ordering::Less => {
                return Err(RankingError::OutOfOrder {
                    position: self.position,
                });
            }
            Ordering::Equal => self.group.push(item),
            Ordering::Greater => {
                self.group.push(item);
                self.flush();
            }
        }
        Ok(())
    }

    /// Closes the current tie-group: asks the strategy for its ranks and
    /// chains the returned offset into the next group.
    fn flush(&mut self) {
        let GroupRanks { ranks, next_start } = (self.strategy)(self.start, self.group.len());
        debug_assert_eq!(
            ranks.len(),
            self.group.len(),
            "strategy must rank every tie-group member"
        );
        for (rank, item) in ranks.into_iter().zip(self.group.drain(..)) {
            self.ready.push_back((rank, item));
        }
        self.start = next_start;
    }
}

impl<It, T, K, S> Iterator for RankingIter<It, T, K, S>
where
    It: Iterator,
    T: PartialOrd,
    K: Fn(&It::Item) -> Score<T>,
    S: Fn(u64, usize) -> GroupRanks,
{
    type Item = Result<(Option<f64>, It::Item), RankingError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(pair) = self.ready.pop_front() {
                return Some(Ok(pair));
            }
            if self.done {
                return None;
            }
            match self.items.next() {
                Some(item) => {
                    let score = self.comparer.normalize((self.key)(&item));
                    if let Some(held) = self.held.take() {
                        if let Err(error) = self.advance(held, Some(&score)) {
                            self.done = true;
                            return Some(Err(error));
                        }
                    }
                    self.held = Some((score, item));
                    self.position += 1;
                }
                None => {
                    self.done = true;
                    if let Some(held) = self.held.take() {
                        // The final item has no successor, so this cannot
                        // report an ordering error; propagate for symmetry.
                        if let Err(error) = self.advance(held, None) {
                            return Some(Err(error));
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{competition, dense, fractional, modified_competition, ordinal};

    fn ranks<R>(ranking: R) -> Vec<Option<f64>>
    where
        R: IntoIterator<Item = Result<Option<f64>, RankingError>>,
    {
        ranking
            .into_iter()
            .collect::<Result<Vec<_>, _>>()
            .unwrap()
    }

    #[test]
    fn test_competition() {
        assert_eq!(
            ranks(Ranking::new(vec![5, 4, 4, 3], competition).ranks()),
            [Some(0.0), Some(1.0), Some(1.0), Some(3.0)]
        );
    }

    #[test]
    fn test_modified_competition() {
        assert_eq!(
            ranks(Ranking::new(vec![5, 4, 4, 3], modified_competition).ranks()),
            [Some(0.0), Some(2.0), Some(2.0), Some(3.0)]
        );
    }

    #[test]
    fn test_dense() {
        assert_eq!(
            ranks(Ranking::new(vec![5, 4, 4, 3], dense).ranks()),
            [Some(0.0), Some(1.0), Some(1.0), Some(2.0)]
        );
    }

    #[test]
    fn test_ordinal() {
        assert_eq!(
            ranks(Ranking::new(vec![5, 4, 4, 3], ordinal).ranks()),
            [Some(0.0), Some(1.0), Some(2.0), Some(3.0)]
        );
    }

    #[test]
    fn test_fractional() {
        assert_eq!(
            ranks(Ranking::new(vec![5, 4, 4, 3], fractional).ranks()),
            [Some(0.0), Some(1.5), Some(1.5), Some(3.0)]
        );
    }

    #[test]
    fn test_long_competition_sequence() {
        assert_eq!(
            ranks(Ranking::new(vec![5, 5, 5, 3, 3, 3, 2, 2, 1, 1, 1, 1], competition).ranks()),
            [
                Some(0.0),
                Some(0.0),
                Some(0.0),
                Some(3.0),
                Some(3.0),
                Some(3.0),
                Some(6.0),
                Some(6.0),
                Some(8.0),
                Some(8.0),
                Some(8.0),
                Some(8.0),
            ]
        );
    }

    #[test]
    fn test_unsorted_input_is_rejected() {
        let mut steps = Ranking::new(vec![5, 4, 4, 5], competition).into_iter();
        // The valid prefix is still yielded before the error.
        assert_eq!(steps.next(), Some(Ok((Some(0.0), 5))));
        assert_eq!(
            steps.last(),
            Some(Err(RankingError::OutOfOrder { position: 3 }))
        );
    }

    #[test]
    fn test_error_fuses_the_iterator() {
        let mut steps = Ranking::new(vec![3, 1, 2], competition).into_iter();
        assert_eq!(steps.next(), Some(Ok((Some(0.0), 3))));
        assert!(matches!(
            steps.next(),
            Some(Err(RankingError::OutOfOrder { .. }))
        ));
        assert_eq!(steps.next(), None);
    }

    #[test]
    fn test_incomparable_score() {
        let steps: Vec<_> = Ranking::new(vec![2.0, f64::NAN, 1.0], competition)
            .into_iter()
            .collect();
        assert_eq!(
            steps,
            [Err(RankingError::Incomparable { position: 1 })]
        );
    }

    #[test]
    fn test_no_score_no_rank() {
        assert_eq!(
            ranks(Ranking::from_options(vec![Some(100), Some(50), Some(50), None, None], competition).ranks()),
            [Some(0.0), Some(1.0), Some(1.0), None, None]
        );
        assert_eq!(
            ranks(Ranking::from_options(vec![None::<i32>], competition).ranks()),
            [None]
        );
        assert_eq!(
            ranks(Ranking::from_options(vec![None::<i32>, None], competition).ranks()),
            [None, None]
        );
        assert_eq!(
            ranks(Ranking::from_options(vec![Some(3), Some(1), Some(1), None], competition).ranks()),
            [Some(0.0), Some(1.0), Some(1.0), None]
        );
    }

    #[test]
    fn test_custom_no_score() {
        assert_eq!(
            ranks(
                Ranking::new(vec![100, 50, 50, -1, -1], competition)
                    .no_score(-1)
                    .ranks()
            ),
            [Some(0.0), Some(1.0), Some(1.0), None, None]
        );
        assert_eq!(
            ranks(Ranking::new(vec![-1], competition).no_score(-1).ranks()),
            [None]
        );
        assert_eq!(
            ranks(
                Ranking::new(vec![1, 1, 3, -1], competition)
                    .reverse(true)
                    .no_score(-1)
                    .ranks()
            ),
            [Some(0.0), Some(0.0), Some(2.0), None]
        );
    }

    #[test]
    fn test_less_is_more() {
        let records = vec![Some(1), Some(121), Some(121), Some(432), None, None];
        // Ascending input is rejected without reversal...
        let outcome: Result<Vec<_>, _> = Ranking::from_options(records.clone(), competition)
            .ranks()
            .collect();
        assert!(matches!(outcome, Err(RankingError::OutOfOrder { .. })));
        // ...and ranks the smallest value 0 with it.
        assert_eq!(
            ranks(
                Ranking::from_options(records, competition)
                    .reverse(true)
                    .ranks()
            ),
            [Some(0.0), Some(1.0), Some(1.0), Some(3.0), None, None]
        );
    }

    #[test]
    fn test_start_from_not_zero() {
        assert_eq!(
            ranks(Ranking::new(vec![5, 4, 4, 3], competition).start(10).ranks()),
            [Some(10.0), Some(11.0), Some(11.0), Some(13.0)]
        );
    }

    #[test]
    fn test_empty_input() {
        let steps: Vec<_> = Ranking::new(Vec::<i32>::new(), competition)
            .into_iter()
            .collect();
        assert!(steps.is_empty());
    }

    #[test]
    fn test_single_use_iterator_input() {
        let scores = (0..5).map(|n| 100 - 10 * n);
        assert_eq!(
            ranks(Ranking::new(scores, competition).ranks()),
            [Some(0.0), Some(1.0), Some(2.0), Some(3.0), Some(4.0)]
        );
    }

    #[test]
    fn test_records_with_key_keep_their_identity() {
        #[derive(Debug, PartialEq)]
        struct User {
            name: &'static str,
            score: u32,
        }
        let users = vec![
            User {
                name: "a",
                score: 100,
            },
            User {
                name: "b",
                score: 80,
            },
            User {
                name: "c",
                score: 80,
            },
            User {
                name: "d",
                score: 79,
            },
        ];
        let pairs: Vec<_> = Ranking::with_key(users, |user: &User| Score::Value(user.score), competition)
            .into_iter()
            .collect::<Result<_, _>>()
            .unwrap();
        let got_ranks: Vec<_> = pairs.iter().map(|(rank, _)| *rank).collect();
        assert_eq!(got_ranks, [Some(0.0), Some(1.0), Some(1.0), Some(3.0)]);
        // Original items come back out, in input order.
        let names: Vec<_> = pairs.iter().map(|(_, user)| user.name).collect();
        assert_eq!(names, ["a", "b", "c", "d"]);
    }

    #[test]
    fn test_custom_strategy_can_skip_members() {
        fn exclusive(start: u64, len: usize) -> GroupRanks {
            if len == 1 {
                competition(start, len)
            } else {
                GroupRanks {
                    ranks: vec![None; len],
                    next_start: start + len as u64,
                }
            }
        }
        assert_eq!(
            ranks(Ranking::new(vec![5, 4, 4, 3], exclusive).ranks()),
            [Some(0.0), None, None, Some(3.0)]
        );
    }

    #[test]
    fn test_ranks_length_matches_input_length() {
        let scores = vec![Some(9), Some(7), Some(7), Some(7), Some(2), None];
        let len = scores.len();
        assert_eq!(
            ranks(Ranking::from_options(scores, fractional).ranks()).len(),
            len
        );
    }

    #[test]
    fn test_unscored_items_do_not_perturb_offsets() {
        // The trailing unscored run leaves the competition offsets exactly
        // where a sentinel-free input would put them.
        let with = ranks(
            Ranking::from_options(vec![Some(9), Some(7), Some(7), None, None], competition).ranks(),
        );
        let without =
            ranks(Ranking::from_options(vec![Some(9), Some(7), Some(7)], competition).ranks());
        assert_eq!(&with[..3], &without[..]);
        assert_eq!(&with[3..], [None, None]);
    }
}
