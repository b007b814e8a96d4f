//! Quiz scoring: end-of-section quizzes, inline checks and mock exams.

pub mod exam;
mod inline_check;
mod session;

pub use exam::{select_balanced, CategoryScore, ExamResult, ExamSession};
pub use inline_check::{InlineCheckState, OptionMark};
pub use session::{percentage, Outcome, QuizPhase, QuizSession};
