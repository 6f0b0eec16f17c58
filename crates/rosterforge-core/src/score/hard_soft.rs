//! HardSoftScore - Two-level score with hard and soft constraints

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};
use std::str::FromStr;

use super::{ScoreLevel, ScoreParseError};

/// A score with separate hard and soft constraint levels.
///
/// Hard constraints must be satisfied for a roster to be feasible.
/// Soft constraints are optimization objectives.
///
/// When comparing scores:
/// 1. Hard scores are compared first
/// 2. Soft scores are only compared when hard scores are equal
///
/// # Examples
///
/// ```
/// use rosterforge_core::HardSoftScore;
///
/// let score1 = HardSoftScore::of(-1, -100);  // 1 hard constraint broken
/// let score2 = HardSoftScore::of(0, -200);   // Feasible but poor soft score
///
/// // Feasible rosters are always better than infeasible ones
/// assert!(score2 > score1);
///
/// let score3 = HardSoftScore::of(0, -50);    // Better soft score
/// assert!(score3 > score2);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HardSoftScore {
    hard: i64,
    soft: i64,
}

impl HardSoftScore {
    /// The zero score.
    pub const ZERO: HardSoftScore = HardSoftScore { hard: 0, soft: 0 };

    /// One hard constraint penalty.
    pub const ONE_HARD: HardSoftScore = HardSoftScore { hard: 1, soft: 0 };

    /// One soft constraint penalty.
    pub const ONE_SOFT: HardSoftScore = HardSoftScore { hard: 0, soft: 1 };

    /// Creates a new HardSoftScore.
    #[inline]
    pub const fn of(hard: i64, soft: i64) -> Self {
        HardSoftScore { hard, soft }
    }

    /// Creates a score with only a hard component.
    #[inline]
    pub const fn of_hard(hard: i64) -> Self {
        HardSoftScore { hard, soft: 0 }
    }

    /// Creates a score with only a soft component.
    #[inline]
    pub const fn of_soft(soft: i64) -> Self {
        HardSoftScore { hard: 0, soft }
    }

    /// Returns the hard score component.
    #[inline]
    pub const fn hard(&self) -> i64 {
        self.hard
    }

    /// Returns the soft score component.
    #[inline]
    pub const fn soft(&self) -> i64 {
        self.soft
    }

    /// Returns true if no hard constraint is broken.
    #[inline]
    pub const fn is_feasible(&self) -> bool {
        self.hard >= 0
    }

    /// Returns the value at the given level.
    pub const fn level(&self, level: ScoreLevel) -> i64 {
        match level {
            ScoreLevel::Hard => self.hard,
            ScoreLevel::Soft => self.soft,
        }
    }

    /// Multiplies both levels by a whole-number weight.
    #[inline]
    pub const fn multiply(&self, weight: i64) -> Self {
        HardSoftScore::of(self.hard * weight, self.soft * weight)
    }

    /// Collapses the score into a single number where one hard point outweighs
    /// any realistic soft total.
    #[inline]
    pub fn to_scalar(&self) -> f64 {
        self.hard as f64 * 1_000_000.0 + self.soft as f64
    }
}

impl Ord for HardSoftScore {
    fn cmp(&self, other: &Self) -> Ordering {
        match self.hard.cmp(&other.hard) {
            Ordering::Equal => self.soft.cmp(&other.soft),
            other => other,
        }
    }
}

impl PartialOrd for HardSoftScore {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Add for HardSoftScore {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        HardSoftScore::of(self.hard + rhs.hard, self.soft + rhs.soft)
    }
}

impl AddAssign for HardSoftScore {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        self.hard += rhs.hard;
        self.soft += rhs.soft;
    }
}

impl Sub for HardSoftScore {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        HardSoftScore::of(self.hard - rhs.hard, self.soft - rhs.soft)
    }
}

impl SubAssign for HardSoftScore {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        self.hard -= rhs.hard;
        self.soft -= rhs.soft;
    }
}

impl Neg for HardSoftScore {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        HardSoftScore::of(-self.hard, -self.soft)
    }
}

impl std::iter::Sum for HardSoftScore {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(HardSoftScore::ZERO, Add::add)
    }
}

impl fmt::Debug for HardSoftScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HardSoftScore({}, {})", self.hard, self.soft)
    }
}

impl fmt::Display for HardSoftScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}hard/{}soft", self.hard, self.soft)
    }
}

impl FromStr for HardSoftScore {
    type Err = ScoreParseError;

    /// Parses `"-1hard/-20soft"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let (hard_part, soft_part) = trimmed.split_once('/').ok_or_else(|| ScoreParseError {
            message: format!("expected <hard>hard/<soft>soft, got '{}'", trimmed),
        })?;
        let hard = parse_level(hard_part, "hard")?;
        let soft = parse_level(soft_part, "soft")?;
        Ok(HardSoftScore::of(hard, soft))
    }
}

fn parse_level(part: &str, suffix: &str) -> Result<i64, ScoreParseError> {
    let number = part
        .trim()
        .strip_suffix(suffix)
        .ok_or_else(|| ScoreParseError {
            message: format!("level '{}' is missing the '{}' suffix", part, suffix),
        })?;
    number.parse::<i64>().map_err(|e| ScoreParseError {
        message: format!("invalid {} level '{}': {}", suffix, number, e),
    })
}
