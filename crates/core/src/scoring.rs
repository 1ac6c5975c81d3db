//! Scoring policy for a single answer submission.
//!
//! Fixed points per correct answer; no partial credit, no time bonus, no
//! negative scores. A blank submission (skip or timeout) scores like a miss.

use crate::model::{AnswerChoice, Question};

/// Points awarded for a correct answer.
pub const POINTS_PER_CORRECT: u32 = 100;

/// Outcome of scoring one submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreOutcome {
    pub is_correct: bool,
    pub points: u32,
}

/// Score `selected` against the question's correct answer.
#[must_use]
pub fn score(question: &Question, selected: Option<AnswerChoice>) -> ScoreOutcome {
    let is_correct = selected == Some(question.correct_answer());
    ScoreOutcome {
        is_correct,
        points: if is_correct { POINTS_PER_CORRECT } else { 0 },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{QuestionDraft, QuestionId};
    use crate::time::fixed_now;

    fn question(correct: AnswerChoice) -> Question {
        let draft = QuestionDraft {
            category: "Fun Facts".into(),
            text: "Pick one".into(),
            option_a: "a".into(),
            option_b: "b".into(),
            option_c: "c".into(),
            option_d: "d".into(),
            correct_answer: correct,
            difficulty: None,
        };
        Question::from_draft(QuestionId::generate(), draft, fixed_now()).unwrap()
    }

    #[test]
    fn correct_answer_earns_fixed_points() {
        let q = question(AnswerChoice::B);
        assert_eq!(
            score(&q, Some(AnswerChoice::B)),
            ScoreOutcome { is_correct: true, points: 100 }
        );
    }

    #[test]
    fn wrong_and_blank_score_the_same() {
        let q = question(AnswerChoice::B);
        let wrong = score(&q, Some(AnswerChoice::C));
        let blank = score(&q, None);
        assert_eq!(wrong, blank);
        assert_eq!(blank, ScoreOutcome { is_correct: false, points: 0 });
    }

    #[test]
    fn scoring_is_idempotent() {
        let q = question(AnswerChoice::D);
        for choice in AnswerChoice::ALL {
            assert_eq!(score(&q, Some(choice)), score(&q, Some(choice)));
        }
    }
}
