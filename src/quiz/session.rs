use crate::models::{QuizQuestion, NUM_QUIZ_OPTIONS};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizPhase {
    /// Choosing an option for the current question.
    Answering,
    /// The answer is in and the explanation is showing.
    Revealed,
    Finished,
}

/// How one question went, for the results breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outcome {
    pub answer: Option<usize>,
    pub correct: bool,
}

/// Progress through an end-of-section quiz.
#[derive(Debug, Clone)]
pub struct QuizSession {
    questions: Vec<QuizQuestion>,
    current_question_index: usize,
    selected_option: usize,
    answers: Vec<Option<usize>>,
    phase: QuizPhase,
}

impl QuizSession {
    pub fn new(questions: Vec<QuizQuestion>) -> Self {
        let num_questions = questions.len();
        Self {
            phase: initial_phase(num_questions),
            questions,
            current_question_index: 0,
            selected_option: 0,
            answers: vec![None; num_questions],
        }
    }

    pub fn phase(&self) -> QuizPhase {
        self.phase
    }

    pub fn current_question(&self) -> Option<&QuizQuestion> {
        self.questions.get(self.current_question_index)
    }

    pub fn current_question_number(&self) -> usize {
        self.current_question_index + 1
    }

    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    pub fn selected_option(&self) -> usize {
        self.selected_option
    }

    pub fn questions(&self) -> &[QuizQuestion] {
        &self.questions
    }

    pub fn answers(&self) -> &[Option<usize>] {
        &self.answers
    }

    /// The answer given to the current question, once revealed.
    pub fn current_answer(&self) -> Option<usize> {
        self.answers.get(self.current_question_index).copied().flatten()
    }

    pub fn select_next_option(&mut self) {
        if self.phase == QuizPhase::Answering {
            self.selected_option = (self.selected_option + 1) % NUM_QUIZ_OPTIONS;
        }
    }

    pub fn select_previous_option(&mut self) {
        if self.phase == QuizPhase::Answering {
            self.selected_option =
                (self.selected_option + NUM_QUIZ_OPTIONS - 1) % NUM_QUIZ_OPTIONS;
        }
    }

    /// Lock in the highlighted option and reveal the explanation.
    pub fn submit_answer(&mut self) {
        if self.phase != QuizPhase::Answering {
            return;
        }
        self.answers[self.current_question_index] = Some(self.selected_option);
        self.phase = QuizPhase::Revealed;
    }

    /// Move on from a revealed answer.
    pub fn advance(&mut self) {
        if self.phase != QuizPhase::Revealed {
            return;
        }
        self.current_question_index += 1;
        self.selected_option = 0;
        self.phase = if self.current_question_index >= self.questions.len() {
            QuizPhase::Finished
        } else {
            QuizPhase::Answering
        };
    }

    pub fn is_finished(&self) -> bool {
        self.phase == QuizPhase::Finished
    }

    pub fn calculate_score(&self) -> usize {
        self.answers
            .iter()
            .zip(self.questions.iter())
            .filter(|(answer, question)| answer.is_some_and(|a| question.is_correct(a)))
            .count()
    }

    pub fn percentage(&self) -> f64 {
        percentage(self.calculate_score(), self.total_questions())
    }

    pub fn outcomes(&self) -> Vec<Outcome> {
        self.answers
            .iter()
            .zip(self.questions.iter())
            .map(|(&answer, question)| Outcome {
                answer,
                correct: answer.is_some_and(|a| question.is_correct(a)),
            })
            .collect()
    }

    pub fn restart(&mut self) {
        self.current_question_index = 0;
        self.selected_option = 0;
        self.answers = vec![None; self.questions.len()];
        self.phase = initial_phase(self.questions.len());
    }
}

fn initial_phase(num_questions: usize) -> QuizPhase {
    if num_questions == 0 {
        QuizPhase::Finished
    } else {
        QuizPhase::Answering
    }
}

/// `score` out of `total` as a percentage; 0 when there is nothing to score.
pub fn percentage(score: usize, total: usize) -> f64 {
    if total > 0 {
        (score as f64 / total as f64) * 100.0
    } else {
        0.0
    }
}
