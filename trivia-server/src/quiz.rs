//! Quiz question selection
//!
//! The pool for a round is every question in the chosen category (or all
//! questions) minus those the player has already seen. One question is drawn
//! uniformly at random; an empty pool means the quiz is complete.

use std::collections::HashSet;
use std::sync::Mutex;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::models::Question;

/// Category id that stands for "all categories"
pub const ALL_CATEGORIES: i64 = 0;

/// Which questions a quiz draws from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizCategory {
    All,
    Only(i64),
}

impl From<i64> for QuizCategory {
    fn from(id: i64) -> Self {
        if id == ALL_CATEGORIES {
            Self::All
        } else {
            Self::Only(id)
        }
    }
}

/// Remove every question the player has already seen.
pub fn quiz_pool(candidates: Vec<Question>, previous: &[i64]) -> Vec<Question> {
    let seen: HashSet<i64> = previous.iter().copied().collect();
    candidates
        .into_iter()
        .filter(|q| !seen.contains(&q.id))
        .collect()
}

/// Draw one question uniformly at random.
pub fn pick<'a, R>(pool: &'a [Question], rng: &mut R) -> Option<&'a Question>
where
    R: Rng + ?Sized,
{
    pool.choose(rng)
}

/// Random source for quiz selection, shared across requests
pub struct QuizSelector {
    rng: Mutex<StdRng>,
}

impl QuizSelector {
    /// Selector seeded from OS entropy.
    pub fn from_entropy() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Deterministic selector (for tests).
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    pub fn with_rng(rng: StdRng) -> Self {
        Self {
            rng: Mutex::new(rng),
        }
    }

    /// Next question for a player who has seen `previous`, or `None` when
    /// the pool is exhausted.
    pub fn next_question(&self, candidates: Vec<Question>, previous: &[i64]) -> Option<Question> {
        let pool = quiz_pool(candidates, previous);
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        pick(&pool, &mut *rng).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn questions(ids: std::ops::RangeInclusive<i64>) -> Vec<Question> {
        ids.map(|id| Question {
            id,
            question: format!("question {}", id),
            answer: format!("answer {}", id),
            category: 1 + id % 3,
            difficulty: 1,
        })
        .collect()
    }

    #[test]
    fn zero_means_all_categories() {
        assert_eq!(QuizCategory::from(0), QuizCategory::All);
        assert_eq!(QuizCategory::from(4), QuizCategory::Only(4));
    }

    #[test]
    fn pool_excludes_previous_questions() {
        let pool = quiz_pool(questions(1..=5), &[2, 4, 99]);
        let ids: Vec<i64> = pool.iter().map(|q| q.id).collect();
        assert_eq!(ids, vec![1, 3, 5]);
    }

    #[test]
    fn never_returns_a_seen_question() {
        let selector = QuizSelector::seeded(7);
        let previous = [1, 2, 3, 5, 8];
        for _ in 0..200 {
            let q = selector
                .next_question(questions(1..=10), &previous)
                .expect("pool is not empty");
            assert!(!previous.contains(&q.id));
        }
    }

    #[test]
    fn accumulating_history_exhausts_the_quiz() {
        let selector = QuizSelector::seeded(42);
        let mut previous = Vec::new();
        while let Some(q) = selector.next_question(questions(1..=8), &previous) {
            assert!(!previous.contains(&q.id));
            previous.push(q.id);
        }
        previous.sort_unstable();
        assert_eq!(previous, (1..=8).collect::<Vec<_>>());
    }

    #[test]
    fn same_seed_same_sequence() {
        let a = QuizSelector::seeded(3);
        let b = QuizSelector::seeded(3);
        for _ in 0..20 {
            assert_eq!(
                a.next_question(questions(1..=30), &[]),
                b.next_question(questions(1..=30), &[])
            );
        }
    }

    #[test]
    fn every_question_can_be_drawn() {
        let selector = QuizSelector::seeded(11);
        let mut drawn = HashSet::new();
        for _ in 0..500 {
            if let Some(q) = selector.next_question(questions(1..=5), &[]) {
                drawn.insert(q.id);
            }
        }
        assert_eq!(drawn.len(), 5);
    }

    #[test]
    fn empty_pool_yields_none() {
        let selector = QuizSelector::seeded(1);
        assert!(selector.next_question(Vec::new(), &[]).is_none());
        assert!(selector.next_question(questions(1..=2), &[1, 2]).is_none());
    }
}
