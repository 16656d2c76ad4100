//! Tie-aware rank assignment for scored collections.
//!
//! This crate computes ranks for leaderboards, competition results, and
//! statistical orderings. Items with equal scores form a *tie-group* and are
//! ranked as a unit by a pluggable strategy; items without a score are kept
//! in place but receive no rank.
//!
//! # Modules
//!
//! - [`score`]: The [`Score`] sum type and [`ScoreComparer`], a rank-order
//!   comparison with missing-score tolerance
//! - [`strategy`]: The five standard tie-breaking strategies and the
//!   [`GroupRanks`] contract for custom ones
//! - [`ranking`]: The lazy [`Ranking`] engine that sweeps a pre-sorted
//!   sequence and assigns ranks group by group
//!
//! # Examples
//!
//! ## Standard competition ranking
//!
//! ```
//! use podium::{Ranking, competition};
//!
//! let ranks: Result<Vec<_>, _> = Ranking::new(vec![5, 4, 4, 3], competition).ranks().collect();
//! assert_eq!(ranks.unwrap(), [Some(0.0), Some(1.0), Some(1.0), Some(3.0)]);
//! ```
//!
//! ## Ranking records by an extracted score
//!
//! ```
//! use podium::{Ranking, Score, dense};
//!
//! struct Player {
//!     name: &'static str,
//!     wins: u32,
//! }
//!
//! let players = vec![
//!     Player { name: "ada", wins: 9 },
//!     Player { name: "kay", wins: 7 },
//!     Player { name: "ritchie", wins: 7 },
//! ];
//! let ranking = Ranking::with_key(players, |p: &Player| Score::Value(p.wins), dense);
//! for step in ranking {
//!     let (rank, player) = step.unwrap();
//!     println!("{:?} {}", rank, player.name);
//! }
//! ```
//!
//! ## Race times: lower is better, unscored entries trail
//!
//! ```
//! use podium::{Ranking, competition};
//!
//! // Two runners did not finish.
//! let times = vec![Some(121), Some(154), Some(154), None, None];
//! let ranks: Result<Vec<_>, _> = Ranking::from_options(times, competition)
//!     .reverse(true)
//!     .ranks()
//!     .collect();
//! assert_eq!(ranks.unwrap(), [Some(0.0), Some(1.0), Some(1.0), None, None]);
//! ```
//!
//! Input must already be sorted best-first; the engine validates order while
//! iterating and reports a [`RankingError::OutOfOrder`] instead of sorting
//! for you.

pub use self::{ranking::*, score::*, strategy::*};

pub mod ranking;
pub mod score;
pub mod strategy;
