use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// How well the learner recalled an item, on the SM-2 0–5 scale.
///
/// Anything at or above [`Quality::PASSING`] counts as a successful review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Quality {
    /// Complete blackout (0)
    Blackout,
    /// Incorrect response (1)
    Incorrect,
    /// Incorrect, but the answer was recognized once shown (2)
    IncorrectButRecognized,
    /// Correct, with serious difficulty (3)
    CorrectWithDifficulty,
    /// Correct, after some hesitation (4)
    CorrectWithHesitation,
    /// Perfect recall (5)
    Perfect,
}

/// Returned when an integer outside `0..=5` is converted into a [`Quality`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("review quality must be between 0 and 5, got {0}")]
pub struct InvalidQuality(pub i64);

impl Quality {
    /// Lowest quality that counts as a successful recall.
    pub const PASSING: Self = Self::CorrectWithDifficulty;

    /// All qualities in ascending order.
    pub const ALL: [Self; 6] = [
        Self::Blackout,
        Self::Incorrect,
        Self::IncorrectButRecognized,
        Self::CorrectWithDifficulty,
        Self::CorrectWithHesitation,
        Self::Perfect,
    ];

    /// Map a plain correct/incorrect signal onto the scale.
    ///
    /// Clients that only know whether the answer was right get quality 4 for a
    /// correct answer and quality 1 for a wrong one.
    pub const fn from_correct(is_correct: bool) -> Self {
        if is_correct {
            Self::CorrectWithHesitation
        } else {
            Self::Incorrect
        }
    }

    /// Numeric value on the 0–5 scale.
    pub const fn value(self) -> u8 {
        match self {
            Self::Blackout => 0,
            Self::Incorrect => 1,
            Self::IncorrectButRecognized => 2,
            Self::CorrectWithDifficulty => 3,
            Self::CorrectWithHesitation => 4,
            Self::Perfect => 5,
        }
    }

    /// Whether this quality counts as a successful review.
    pub fn is_success(self) -> bool {
        self >= Self::PASSING
    }
}

impl TryFrom<u8> for Quality {
    type Error = InvalidQuality;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::try_from(i64::from(value))
    }
}

impl TryFrom<i64> for Quality {
    type Error = InvalidQuality;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Blackout),
            1 => Ok(Self::Incorrect),
            2 => Ok(Self::IncorrectButRecognized),
            3 => Ok(Self::CorrectWithDifficulty),
            4 => Ok(Self::CorrectWithHesitation),
            5 => Ok(Self::Perfect),
            other => Err(InvalidQuality(other)),
        }
    }
}

impl From<Quality> for u8 {
    fn from(quality: Quality) -> Self {
        quality.value()
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}
