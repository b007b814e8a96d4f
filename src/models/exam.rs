use serde::{Deserialize, Serialize};

use super::question::{BankQuestion, Difficulty};

/// Share of each difficulty in a category's quota.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifficultyWeights {
    pub basic: f64,
    pub intermediate: f64,
    pub advanced: f64,
}

impl DifficultyWeights {
    pub fn weight(&self, difficulty: Difficulty) -> f64 {
        match difficulty {
            Difficulty::Basic => self.basic,
            Difficulty::Intermediate => self.intermediate,
            Difficulty::Advanced => self.advanced,
        }
    }
}

impl Default for DifficultyWeights {
    fn default() -> Self {
        Self {
            basic: 0.3,
            intermediate: 0.5,
            advanced: 0.2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct MockExamConfig {
    #[serde(alias = "examId")]
    pub id: String,
    #[serde(alias = "examTitle")]
    pub title: String,
    #[serde(default = "default_total_questions", alias = "totalQuestions")]
    pub total_questions: usize,
    /// Seconds.
    #[serde(default = "default_time_limit", alias = "timeLimit")]
    pub time_limit_secs: u64,
    /// Percentage required to pass.
    #[serde(default = "default_pass_threshold", alias = "passThreshold")]
    pub pass_threshold: u32,
    pub categories: Vec<String>,
    #[serde(default)]
    pub weights: DifficultyWeights,
}

fn default_total_questions() -> usize {
    20
}

fn default_time_limit() -> u64 {
    1800
}

fn default_pass_threshold() -> u32 {
    80
}

/// A mock exam: its configuration and the bank it draws from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MockExam {
    pub config: MockExamConfig,
    pub questions: Vec<BankQuestion>,
}
