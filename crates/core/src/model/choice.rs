use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

//
// ─── ERRORS ───────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseChoiceError {
    #[error("answer choice must be one of A, B, C, D (got {0:?})")]
    InvalidChoice(String),

    #[error("difficulty must be one of easy, medium, hard (got {0:?})")]
    InvalidDifficulty(String),
}

//
// ─── ANSWER CHOICE ────────────────────────────────────────────────────────────
//

/// One of the four option slots of a multiple-choice question.
///
/// Serialized as the bare uppercase letter (`"A"` … `"D"`), which is also how
/// stored questions record their correct answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AnswerChoice {
    A,
    B,
    C,
    D,
}

impl AnswerChoice {
    pub const ALL: [AnswerChoice; 4] = [Self::A, Self::B, Self::C, Self::D];

    #[must_use]
    pub fn letter(self) -> char {
        match self {
            Self::A => 'A',
            Self::B => 'B',
            Self::C => 'C',
            Self::D => 'D',
        }
    }

    /// Parses a single letter, accepting lowercase input from players.
    ///
    /// # Errors
    ///
    /// Returns `ParseChoiceError::InvalidChoice` for anything but a-d / A-D.
    pub fn from_letter(letter: char) -> Result<Self, ParseChoiceError> {
        match letter.to_ascii_uppercase() {
            'A' => Ok(Self::A),
            'B' => Ok(Self::B),
            'C' => Ok(Self::C),
            'D' => Ok(Self::D),
            other => Err(ParseChoiceError::InvalidChoice(other.to_string())),
        }
    }
}

impl fmt::Display for AnswerChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

impl FromStr for AnswerChoice {
    type Err = ParseChoiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let mut chars = trimmed.chars();
        match (chars.next(), chars.next()) {
            (Some(letter), None) => Self::from_letter(letter),
            _ => Err(ParseChoiceError::InvalidChoice(trimmed.to_string())),
        }
    }
}

//
// ─── DIFFICULTY ───────────────────────────────────────────────────────────────
//

/// Editorial difficulty label. Does not affect scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = ParseChoiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Self::Easy),
            "medium" => Ok(Self::Medium),
            "hard" => Ok(Self::Hard),
            _ => Err(ParseChoiceError::InvalidDifficulty(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn choice_parses_case_insensitively() {
        assert_eq!("b".parse::<AnswerChoice>().unwrap(), AnswerChoice::B);
        assert_eq!(" D ".parse::<AnswerChoice>().unwrap(), AnswerChoice::D);
    }

    #[test]
    fn choice_rejects_out_of_range() {
        assert!("E".parse::<AnswerChoice>().is_err());
        assert!("AB".parse::<AnswerChoice>().is_err());
        assert!("".parse::<AnswerChoice>().is_err());
    }

    #[test]
    fn choice_serializes_as_letter() {
        let json = serde_json::to_string(&AnswerChoice::C).unwrap();
        assert_eq!(json, "\"C\"");
        let back: AnswerChoice = serde_json::from_str("\"A\"").unwrap();
        assert_eq!(back, AnswerChoice::A);
    }

    #[test]
    fn difficulty_defaults_to_medium() {
        assert_eq!(Difficulty::default(), Difficulty::Medium);
        assert_eq!("HARD".parse::<Difficulty>().unwrap(), Difficulty::Hard);
        assert_eq!(
            serde_json::to_string(&Difficulty::Easy).unwrap(),
            "\"easy\""
        );
    }
}
