//! Trivia questions

use serde::{de, Deserialize, Deserializer, Serialize};
use sqlx::FromRow;

use super::ValidationError;

/// Question record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Question {
    pub id: i64,
    pub question: String,
    pub answer: String,
    pub category: i64,
    pub difficulty: i64,
}

impl Question {
    /// Case-insensitive substring match against the question text.
    pub fn matches(&self, term: &str) -> bool {
        self.question
            .to_lowercase()
            .contains(&term.to_lowercase())
    }
}

/// Validated input for a question that has not been stored yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewQuestion {
    question: String,
    answer: String,
    category: i64,
    difficulty: i64,
}

impl NewQuestion {
    /// Build a new question, validating its fields.
    ///
    /// # Rules
    /// - `question` and `answer` must contain non-whitespace text
    /// - `category` must be a positive id (0 is the "all categories" marker
    ///   used by quizzes, never a stored category)
    ///
    /// Whether the category actually exists is left to the store.
    pub fn new(
        question: &str,
        answer: &str,
        category: i64,
        difficulty: i64,
    ) -> Result<Self, ValidationError> {
        if question.trim().is_empty() {
            return Err(ValidationError::Empty { field: "question" });
        }
        if answer.trim().is_empty() {
            return Err(ValidationError::Empty { field: "answer" });
        }
        if category < 1 {
            return Err(ValidationError::OutOfRange {
                field: "category",
                value: category,
            });
        }

        Ok(Self {
            question: question.to_owned(),
            answer: answer.to_owned(),
            category,
            difficulty,
        })
    }

    pub fn question(&self) -> &str {
        &self.question
    }

    pub fn answer(&self) -> &str {
        &self.answer
    }

    pub fn category(&self) -> i64 {
        self.category
    }

    pub fn difficulty(&self) -> i64 {
        self.difficulty
    }

    /// Attach the id assigned by the store.
    pub fn with_id(self, id: i64) -> Question {
        Question {
            id,
            question: self.question,
            answer: self.answer,
            category: self.category,
            difficulty: self.difficulty,
        }
    }
}

/// Deserialize an integer that may also arrive as a numeric string.
///
/// The front-end sends ids from form fields, so `"1"` and `1` are equivalent.
pub fn lenient_i64<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum IntOrString {
        Int(i64),
        Str(String),
    }

    match IntOrString::deserialize(deserializer)? {
        IntOrString::Int(n) => Ok(n),
        IntOrString::Str(s) => s
            .trim()
            .parse()
            .map_err(|_| de::Error::custom(format!("expected an integer, got '{}'", s))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Question {
        Question {
            id: 2,
            question: "What boxer's original name is Cassius Clay?".into(),
            answer: "Muhammad Ali".into(),
            category: 4,
            difficulty: 1,
        }
    }

    #[test]
    fn matches_is_case_insensitive() {
        let q = sample();
        assert!(q.matches("cassius"));
        assert!(q.matches("BOXER"));
        assert!(q.matches(""));
        assert!(!q.matches("title"));
    }

    #[test]
    fn serializes_with_flat_shape() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["id"], 2);
        assert_eq!(json["answer"], "Muhammad Ali");
        assert_eq!(json["category"], 4);
        assert_eq!(json["difficulty"], 1);
    }

    #[test]
    fn new_question_rejects_blank_text() {
        let err = NewQuestion::new("  ", "answer", 1, 1).unwrap_err();
        assert_eq!(err, ValidationError::Empty { field: "question" });

        let err = NewQuestion::new("question", "", 1, 1).unwrap_err();
        assert_eq!(err, ValidationError::Empty { field: "answer" });
    }

    #[test]
    fn new_question_rejects_non_positive_category() {
        let err = NewQuestion::new("q", "a", 0, 1).unwrap_err();
        assert!(matches!(err, ValidationError::OutOfRange { field: "category", .. }));
    }

    #[test]
    fn with_id_keeps_fields() {
        let q = NewQuestion::new("Who created 5:40 Train?", "Adel Shakal", 1, 5)
            .unwrap()
            .with_id(42);
        assert_eq!(q.id, 42);
        assert_eq!(q.category, 1);
        assert_eq!(q.difficulty, 5);
    }

    #[derive(Deserialize)]
    struct Holder {
        #[serde(deserialize_with = "lenient_i64")]
        value: i64,
    }

    #[test]
    fn lenient_i64_accepts_numbers_and_numeric_strings() {
        let h: Holder = serde_json::from_str(r#"{"value": 7}"#).unwrap();
        assert_eq!(h.value, 7);

        let h: Holder = serde_json::from_str(r#"{"value": "12"}"#).unwrap();
        assert_eq!(h.value, 12);

        assert!(serde_json::from_str::<Holder>(r#"{"value": "twelve"}"#).is_err());
        assert!(serde_json::from_str::<Holder>(r#"{"value": null}"#).is_err());
        assert!(serde_json::from_str::<Holder>(r#"{}"#).is_err());
    }
}
