mod course;
mod exam;
mod question;

pub use course::{Block, Catalog, Course, Faq, Module, NavLink, Section};
pub use exam::{DifficultyWeights, MockExam, MockExamConfig};
pub use question::{BankQuestion, Difficulty, InlineCheckQuestion, QuizQuestion, NUM_QUIZ_OPTIONS};

/// Which screen the terminal app is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    /// Course, module and section listing.
    Catalog,
    /// A section page with its inline checks.
    Reading,
    /// The end-of-section quiz.
    Quiz,
    /// Score and breakdown after the section quiz.
    QuizResult,
    /// A timed mock exam.
    Exam,
    /// Mock exam outcome.
    ExamResult,
}
