use serde::{Deserialize, Serialize};

/// Every end-of-section quiz question has exactly this many options.
pub const NUM_QUIZ_OPTIONS: usize = 4;

/// A multiple-choice question from an end-of-section quiz.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub id: u32,
    #[serde(alias = "question")]
    pub text: String,
    pub options: [String; NUM_QUIZ_OPTIONS],
    #[serde(alias = "correctAnswer")]
    pub correct_answer: usize,
    #[serde(default)]
    pub explanation: String,
}

impl QuizQuestion {
    pub fn is_correct(&self, answer: usize) -> bool {
        answer == self.correct_answer
    }

    pub fn correct_option(&self) -> Option<&str> {
        self.options.get(self.correct_answer).map(String::as_str)
    }
}

/// A single question embedded in the prose of a section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InlineCheckQuestion {
    pub id: String,
    #[serde(alias = "question")]
    pub text: String,
    pub options: Vec<String>,
    #[serde(alias = "correctIndex")]
    pub correct_index: usize,
    #[serde(default)]
    pub explanation: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Basic,
    Intermediate,
    Advanced,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [
        Difficulty::Basic,
        Difficulty::Intermediate,
        Difficulty::Advanced,
    ];
}

/// A mock exam bank entry: a quiz question plus the metadata used for
/// balanced selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BankQuestion {
    #[serde(flatten)]
    pub question: QuizQuestion,
    pub category: String,
    pub difficulty: Difficulty,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_camel_case_content() {
        let json = r#"{
            "id": 3,
            "question": "Minimum fresh air per person in an office?",
            "options": ["5 L/s", "8 L/s", "10 L/s", "15 L/s"],
            "correctAnswer": 2,
            "explanation": "Approved Document F specifies 10 L/s per person."
        }"#;
        let q: QuizQuestion = serde_json::from_str(json).unwrap();
        assert_eq!(q.correct_answer, 2);
        assert_eq!(q.correct_option(), Some("10 L/s"));
        assert!(q.is_correct(2));
        assert!(!q.is_correct(1));
    }

    #[test]
    fn rejects_wrong_option_count() {
        let json = r#"{"id": 1, "text": "?", "options": ["a", "b", "c"], "correct_answer": 0}"#;
        assert!(serde_json::from_str::<QuizQuestion>(json).is_err());
    }

    #[test]
    fn bank_question_flattens_quiz_fields() {
        let json = r#"{
            "id": 1,
            "question": "Main purpose of HASAWA 1974?",
            "options": ["a", "b", "c", "d"],
            "correctAnswer": 1,
            "explanation": "",
            "category": "Health & Safety",
            "difficulty": "basic",
            "topic": "Purpose of HASAWA"
        }"#;
        let q: BankQuestion = serde_json::from_str(json).unwrap();
        assert_eq!(q.question.id, 1);
        assert_eq!(q.difficulty, Difficulty::Basic);
        assert_eq!(q.topic.as_deref(), Some("Purpose of HASAWA"));
    }

    #[test]
    fn inline_check_accepts_correct_index_alias() {
        let json = r#"{
            "id": "co2-level",
            "question": "CO2 level indicating poor ventilation?",
            "options": ["450 ppm", "800 ppm", "1000 ppm"],
            "correctIndex": 2
        }"#;
        let q: InlineCheckQuestion = serde_json::from_str(json).unwrap();
        assert_eq!(q.correct_index, 2);
        assert!(q.explanation.is_empty());
    }
}
