use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::session::LastResult;

pub const CORRECT_TITLE: &str = "Waah! Bilkul sahi! 🎉";
pub const CORRECT_DETAIL: &str = "+100 points milte hai!";

/// Lines shown after a wrong, skipped, or timed-out answer.
pub const ROASTS: [&str; 7] = [
    "Arre yaar, galti ho gayi—par tension nahi, try again! 😜",
    "Bhai, thoda dhoka ho gaya—dusri baar phir se dekh! 😂",
    "Oops! Thoda focus dhyaan se, ek aur chance! 😉",
    "Arey chutki bajao, ye answer toh goli se bhi tez chala! 🤣",
    "Galat jawab, par fikar not—inspo milega next time! 😁",
    "Haww! Ye toh complete miss ho gaya—next wale mein dhamaal karna! 🙈",
    "Arrey boss, thoda sa off-track ho gaye—wapas aa jaao! 🎯",
];

/// Transient notice shown while a result is on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feedback {
    pub title: String,
    pub detail: String,
    pub is_correct: bool,
}

/// Chooses the feedback line for a scored answer.
///
/// Wrong answers get a uniformly random roast; the RNG is owned so tests can
/// seed it.
#[derive(Debug, Clone)]
pub struct FeedbackPicker {
    rng: StdRng,
}

impl FeedbackPicker {
    #[must_use]
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_rng(&mut rand::rng()),
        }
    }

    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn pick(&mut self, result: &LastResult) -> Feedback {
        if result.is_correct {
            return Feedback {
                title: CORRECT_TITLE.to_owned(),
                detail: CORRECT_DETAIL.to_owned(),
                is_correct: true,
            };
        }

        let roast = ROASTS[self.rng.random_range(0..ROASTS.len())];
        Feedback {
            title: roast.to_owned(),
            detail: format!("Sahi jawab tha: {}", result.correct_answer_text),
            is_correct: false,
        }
    }
}

impl Default for FeedbackPicker {
    fn default() -> Self {
        Self::new()
    }
}
