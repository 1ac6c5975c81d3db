//! Stock question bank loaded into a fresh store.

use tracing::info;
use trivia_core::Clock;
use trivia_core::model::{AnswerChoice, Difficulty, Question, QuestionDraft, QuestionId};

use crate::repository::{QuestionRepository, StorageError};

struct SeedQuestion {
    category: &'static str,
    text: &'static str,
    options: [&'static str; 4],
    correct: AnswerChoice,
    difficulty: Difficulty,
}

const fn seed(
    category: &'static str,
    text: &'static str,
    options: [&'static str; 4],
    correct: AnswerChoice,
    difficulty: Difficulty,
) -> SeedQuestion {
    SeedQuestion {
        category,
        text,
        options,
        correct,
        difficulty,
    }
}

const DEFAULT_QUESTIONS: &[SeedQuestion] = &[
    seed(
        "Education",
        "Which fancy international school did Trisha attend from 2013–2019?",
        [
            "Dhirubhai Ambani International School",
            "Campion School",
            "Oberoi International School",
            "Bombay International Academy",
        ],
        AnswerChoice::A,
        Difficulty::Easy,
    ),
    seed(
        "Education",
        "What degree did Trisha earn from Union College in 2023?",
        ["Political Science", "Economics", "Psychology", "Data Science"],
        AnswerChoice::D,
        Difficulty::Medium,
    ),
    seed(
        "Achievements",
        "Which Latin honor did Trisha graduate with?",
        ["cum laude", "summa cum laude", "magna cum laude", "ultra cum laude"],
        AnswerChoice::C,
        Difficulty::Medium,
    ),
    seed(
        "Education",
        "Which cool role did Trisha hold on Union's campus?",
        [
            "Residential Advisor",
            "Campus DJ",
            "Cafeteria Critic",
            "Mascot Trainer",
        ],
        AnswerChoice::A,
        Difficulty::Medium,
    ),
    seed(
        "Career",
        "Which research internship did Trisha do in Mumbai, Summer 2018?",
        [
            "Schbang Research",
            "McKinsey & Company",
            "Bain & Company",
            "NEXTGEN Labs",
        ],
        AnswerChoice::A,
        Difficulty::Hard,
    ),
    seed(
        "Personal",
        "Which mentoring program did Trisha support in June–July 2020?",
        [
            "Teach for India",
            "Next Genius Foundation",
            "Junior Achievement",
            "STEM Sisters",
        ],
        AnswerChoice::B,
        Difficulty::Hard,
    ),
    seed(
        "Career",
        "Which private equity firm did Trisha intern with in late 2020?",
        [
            "Carlyle Group",
            "Paragon Partners Asia",
            "Blackstone Asia",
            "TPG Capital",
        ],
        AnswerChoice::B,
        Difficulty::Hard,
    ),
    seed(
        "Career",
        "When did Trisha start her full-time role at Goldman Sachs?",
        ["January 2023", "July 2023", "September 2022", "June 2024"],
        AnswerChoice::B,
        Difficulty::Medium,
    ),
    seed(
        "Achievements",
        "On which honor roll did Trisha remain for three straight years at Union?",
        [
            "President's List",
            "Dean's List",
            "Chancellor's Roll",
            "Scholar's League",
        ],
        AnswerChoice::B,
        Difficulty::Medium,
    ),
    seed(
        "Career",
        "What is Trisha's current job title at Goldman Sachs?",
        [
            "Investment Banker",
            "Portfolio Manager",
            "Financial Analyst",
            "Equity Research Associate",
        ],
        AnswerChoice::C,
        Difficulty::Medium,
    ),
    seed(
        "Education",
        "How many years did Trisha study at Union College?",
        ["3", "4", "5", "2"],
        AnswerChoice::B,
        Difficulty::Easy,
    ),
    seed(
        "Personal",
        "What creative title does she proudly wear in her bio?",
        [
            "Dream Weaver",
            "Vision Crafters",
            "Dreams Architect",
            "Idea Alchemist",
        ],
        AnswerChoice::C,
        Difficulty::Hard,
    ),
    seed(
        "Personal",
        "Which cheeky line shows her generous nature?",
        [
            "Always Giving 😉",
            "Pretty Generous",
            "Still generous.",
            "Generosity Goals",
        ],
        AnswerChoice::C,
        Difficulty::Hard,
    ),
    seed(
        "Personal",
        "Which loyal motto is she rocking?",
        [
            "Forever by your side…",
            "I follow your lead…",
            "Where you lead, I will follow…",
            "Together, always…",
        ],
        AnswerChoice::C,
        Difficulty::Hard,
    ),
    seed(
        "Fun Facts",
        "What's her time-management mantra?",
        [
            "Better Early Than Late…",
            "Always On Time!",
            "On My Own Clock…",
            "Late but Always Great…",
        ],
        AnswerChoice::A,
        Difficulty::Medium,
    ),
    seed(
        "Achievements",
        "What major role did Trisha play in the DAIMUN Press Corps?",
        [
            "Head of Logistics",
            "Head of Illustration",
            "Chief Delegate",
            "Press Secretary",
        ],
        AnswerChoice::B,
        Difficulty::Hard,
    ),
    seed(
        "Personal",
        "Before starting work after graduation, which city did Trisha return to?",
        ["Mumbai, India", "Delhi, India", "London, UK", "Dubai, UAE"],
        AnswerChoice::A,
        Difficulty::Medium,
    ),
    seed(
        "Career",
        "On which Mumbai public health initiative did Trisha conduct research in Summer 2020?",
        [
            "Swachh Bharat Mission",
            "Mumbai Health Trust",
            "Myna Mahila",
            "HealthBridge India",
        ],
        AnswerChoice::C,
        Difficulty::Hard,
    ),
];

/// Insert shapes for the stock question bank, in play order.
#[must_use]
pub fn default_drafts() -> Vec<QuestionDraft> {
    DEFAULT_QUESTIONS
        .iter()
        .map(|q| {
            let [a, b, c, d] = q.options;
            QuestionDraft {
                category: q.category.to_owned(),
                text: q.text.to_owned(),
                option_a: a.to_owned(),
                option_b: b.to_owned(),
                option_c: c.to_owned(),
                option_d: d.to_owned(),
                correct_answer: q.correct,
                difficulty: Some(q.difficulty),
            }
        })
        .collect()
}

/// Load the stock questions into an empty repository.
///
/// Returns how many questions were inserted; a repository that already holds
/// questions is left untouched and `0` is returned.
///
/// # Errors
///
/// Returns `StorageError` if the repository cannot be read or written.
pub async fn seed_default_questions(
    repo: &dyn QuestionRepository,
    clock: &Clock,
) -> Result<usize, StorageError> {
    if repo.count_questions().await? > 0 {
        info!("question bank already populated, skipping seed");
        return Ok(0);
    }

    let now = clock.now();
    let mut inserted = 0;
    for draft in default_drafts() {
        let question = Question::from_draft(QuestionId::generate(), draft, now)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        repo.insert_question(&question).await?;
        inserted += 1;
    }

    info!(inserted, "seeded default questions");
    Ok(inserted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::InMemoryRepository;
    use trivia_core::time::fixed_clock;

    #[test]
    fn stock_drafts_are_valid() {
        let drafts = default_drafts();
        assert!(!drafts.is_empty());
        for draft in &drafts {
            draft.validate().unwrap();
        }
    }

    #[tokio::test]
    async fn seeding_is_skipped_when_populated() {
        let repo = InMemoryRepository::new();
        let first = seed_default_questions(&repo, &fixed_clock()).await.unwrap();
        assert_eq!(first, default_drafts().len());

        let second = seed_default_questions(&repo, &fixed_clock()).await.unwrap();
        assert_eq!(second, 0);
        assert_eq!(repo.count_questions().await.unwrap(), first as u64);
    }
}
