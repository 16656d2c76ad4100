//! Scores that may be absent, and rank-order comparison over them.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// A score that may be absent.
///
/// `Missing` orders strictly below every `Value`, so a best-first sort always
/// places unscored entries at the tail. This replaces sentinel values like
/// `None` or `-1` at the API boundary; callers that must keep such a sentinel
/// in their data can register it via [`ScoreComparer::no_score`] or
/// [`crate::Ranking::no_score`] instead.
///
/// In serialized form `Missing` is `null`, matching the usual wire
/// representation of a missing score.
///
/// # Examples
///
/// ```
/// use podium::Score;
///
/// assert!(Score::Value(3) > Score::Missing);
/// assert!(Score::Value(3) < Score::Value(5));
/// assert_eq!(Score::from(None::<u32>), Score::Missing);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::IsVariant, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Score<T> {
    /// A real, comparable score.
    Value(T),
    /// No score at all.
    Missing,
}

impl<T> Score<T> {
    /// Returns the contained score, if any.
    #[must_use]
    pub fn value(&self) -> Option<&T> {
        match self {
            Score::Value(value) => Some(value),
            Score::Missing => None,
        }
    }
}

impl<T> From<Option<T>> for Score<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Score::Missing, Score::Value)
    }
}

#[allow(clippy::non_canonical_partial_ord_impl)]
impl<T: PartialOrd> PartialOrd for Score<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Score::Missing, Score::Missing) => Some(Ordering::Equal),
            (Score::Missing, Score::Value(_)) => Some(Ordering::Less),
            (Score::Value(_), Score::Missing) => Some(Ordering::Greater),
            (Score::Value(left), Score::Value(right)) => left.partial_cmp(right),
        }
    }
}

impl<T: Ord> Ord for Score<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Score::Missing, Score::Missing) => Ordering::Equal,
            (Score::Missing, Score::Value(_)) => Ordering::Less,
            (Score::Value(_), Score::Missing) => Ordering::Greater,
            (Score::Value(left), Score::Value(right)) => left.cmp(right),
        }
    }
}

/// Two scores whose underlying type refused to order them (e.g. NaN).
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("scores cannot be ordered by the underlying type")]
pub struct IncomparableError;

/// Rank-order comparison with missing-score tolerance.
///
/// `Greater` means the left-hand score ranks strictly better. By default
/// higher values rank better; with [`reverse`](Self::reverse) lower values
/// rank better ("less is more", as for race times). A [`Score::Missing`]
/// always ranks below every real score, regardless of reversal, and two
/// missing scores compare equal.
///
/// The comparer is usable on its own with any sorting facility that accepts
/// a comparison function, and is what [`crate::Ranking`] uses internally for
/// tie detection and order validation.
///
/// # Examples
///
/// Sorting best-first (the order [`crate::Ranking`] expects):
///
/// ```
/// use podium::{Score, ScoreComparer};
///
/// let comparer = ScoreComparer::new();
/// let mut scores = vec![Score::Value(3), Score::Missing, Score::Value(5)];
/// scores.sort_by(|a, b| comparer.total_cmp(b, a));
/// assert_eq!(scores, [Score::Value(5), Score::Value(3), Score::Missing]);
/// ```
#[derive(Debug, Clone)]
pub struct ScoreComparer<T> {
    reverse: bool,
    no_score: Option<T>,
}

impl<T> Default for ScoreComparer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ScoreComparer<T> {
    /// Creates a comparer where higher scores rank better and only
    /// [`Score::Missing`] counts as unscored.
    #[must_use]
    pub fn new() -> Self {
        Self {
            reverse: false,
            no_score: None,
        }
    }

    /// When `reverse` is true, lower scores rank better. Missing scores
    /// still rank last.
    #[must_use]
    pub fn reverse(mut self, reverse: bool) -> Self {
        self.reverse = reverse;
        self
    }

    /// Registers a sentinel value to treat as [`Score::Missing`].
    ///
    /// Useful for data that encodes "no score" in-band, e.g. as `-1`.
    #[must_use]
    pub fn no_score(mut self, sentinel: T) -> Self {
        self.no_score = Some(sentinel);
        self
    }
}

impl<T: PartialEq> ScoreComparer<T> {
    /// Demotes the configured sentinel value to [`Score::Missing`].
    pub(crate) fn normalize(&self, score: Score<T>) -> Score<T> {
        match (&self.no_score, &score) {
            (Some(sentinel), Score::Value(value)) if value == sentinel => Score::Missing,
            _ => score,
        }
    }

    fn strip<'a>(&self, score: &'a Score<T>) -> Score<&'a T> {
        match score {
            Score::Value(value) => match &self.no_score {
                Some(sentinel) if value == sentinel => Score::Missing,
                _ => Score::Value(value),
            },
            Score::Missing => Score::Missing,
        }
    }
}

impl<T: PartialOrd> ScoreComparer<T> {
    /// Compares two scores in rank order.
    ///
    /// Returns `Greater` when `left` ranks strictly better than `right`.
    /// Fails with [`IncomparableError`] when the underlying partial order
    /// refuses the comparison, e.g. for NaN; the error is surfaced rather
    /// than swallowed.
    pub fn compare(&self, left: &Score<T>, right: &Score<T>) -> Result<Ordering, IncomparableError> {
        match (self.strip(left), self.strip(right)) {
            (Score::Missing, Score::Missing) => Ok(Ordering::Equal),
            (Score::Missing, Score::Value(_)) => Ok(Ordering::Less),
            (Score::Value(_), Score::Missing) => Ok(Ordering::Greater),
            (Score::Value(left), Score::Value(right)) => {
                let ordering = left.partial_cmp(right).ok_or(IncomparableError)?;
                Ok(if self.reverse {
                    ordering.reverse()
                } else {
                    ordering
                })
            }
        }
    }
}

impl<T: Ord> ScoreComparer<T> {
    /// Infallible form of [`compare`](Self::compare) for totally ordered
    /// score types, suitable for `sort_by`.
    #[must_use]
    pub fn total_cmp(&self, left: &Score<T>, right: &Score<T>) -> Ordering {
        match (self.strip(left), self.strip(right)) {
            (Score::Missing, Score::Missing) => Ordering::Equal,
            (Score::Missing, Score::Value(_)) => Ordering::Less,
            (Score::Value(_), Score::Missing) => Ordering::Greater,
            (Score::Value(left), Score::Value(right)) => {
                let ordering = left.cmp(right);
                if self.reverse {
                    ordering.reverse()
                } else {
                    ordering
                }
            }
        }
    }

    /// Builds a record comparison function from a score extractor, for
    /// sorting collections that carry their score in a field.
    ///
    /// # Examples
    ///
    /// ```
    /// use podium::{Score, ScoreComparer};
    ///
    /// let mut times = vec![("ada", 121), ("kay", 98), ("ritchie", 154)];
    /// let by_time = ScoreComparer::new()
    ///     .reverse(true)
    ///     .by_key(|&(_, time): &(&str, u32)| Score::Value(time));
    /// // Best (fastest) first.
    /// times.sort_by(|a, b| by_time(b, a));
    /// assert_eq!(times[0].0, "kay");
    /// ```
    pub fn by_key<I, K>(self, key: K) -> impl Fn(&I, &I) -> Ordering
    where
        K: Fn(&I) -> Score<T>,
    {
        move |left, right| self.total_cmp(&key(left), &key(right))
    }
}
