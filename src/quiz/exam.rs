//! Mock examinations: category-balanced question draws and timed attempts.

use std::collections::HashSet;
use std::time::{Duration, Instant};

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::info;
use uuid::Uuid;

use super::session::percentage;
use crate::models::{
    BankQuestion, Difficulty, DifficultyWeights, MockExam, MockExamConfig, NUM_QUIZ_OPTIONS,
};

/// Draw `count` questions from `bank`, spread evenly over `categories`
/// and, within each category, over difficulties according to `weights`.
///
/// Short categories are topped up from the rest of the bank. The result
/// never repeats a question and never holds more than the bank does.
pub fn select_balanced<R: Rng + ?Sized>(
    bank: &[BankQuestion],
    categories: &[String],
    count: usize,
    weights: &DifficultyWeights,
    rng: &mut R,
) -> Vec<BankQuestion> {
    let count = count.min(bank.len());
    let mut chosen: Vec<usize> = Vec::with_capacity(count);
    let mut taken: HashSet<usize> = HashSet::with_capacity(count);

    if count > 0 && !categories.is_empty() {
        let base = count / categories.len();
        let remainder = count % categories.len();

        for (position, category) in categories.iter().enumerate() {
            let target = base + usize::from(position < remainder);
            let basic = quota(target, weights.weight(Difficulty::Basic));
            let intermediate = quota(target, weights.weight(Difficulty::Intermediate));
            let advanced = target.saturating_sub(basic + intermediate);

            for (difficulty, wanted) in [
                (Difficulty::Basic, basic),
                (Difficulty::Intermediate, intermediate),
                (Difficulty::Advanced, advanced),
            ] {
                let mut pool: Vec<usize> = bank
                    .iter()
                    .enumerate()
                    .filter(|(i, q)| {
                        !taken.contains(i) && q.category == *category && q.difficulty == difficulty
                    })
                    .map(|(i, _)| i)
                    .collect();
                pool.shuffle(rng);
                for index in pool.into_iter().take(wanted) {
                    taken.insert(index);
                    chosen.push(index);
                }
            }
        }
    }

    if chosen.len() < count {
        let mut rest: Vec<usize> = (0..bank.len()).filter(|i| !taken.contains(i)).collect();
        rest.shuffle(rng);
        chosen.extend(rest.into_iter().take(count - chosen.len()));
    }

    chosen.shuffle(rng);
    chosen.truncate(count);
    chosen.into_iter().map(|i| bank[i].clone()).collect()
}

fn quota(target: usize, weight: f64) -> usize {
    (target as f64 * weight).round().max(0.0) as usize
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryScore {
    pub category: String,
    pub correct: usize,
    pub total: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExamResult {
    pub attempt: Uuid,
    pub score: usize,
    pub total: usize,
    pub percentage: f64,
    pub passed: bool,
    pub elapsed: Duration,
    pub timed_out: bool,
    pub by_category: Vec<CategoryScore>,
}

/// One timed attempt at a mock exam.
#[derive(Debug, Clone)]
pub struct ExamSession {
    attempt: Uuid,
    config: MockExamConfig,
    questions: Vec<BankQuestion>,
    answers: Vec<Option<usize>>,
    current: usize,
    cursor: usize,
    started_at: Instant,
    result: Option<ExamResult>,
}

impl ExamSession {
    /// Start an attempt drawing `count` questions (the exam's configured
    /// number when `None`).
    pub fn start<R: Rng + ?Sized>(
        exam: &MockExam,
        count: Option<usize>,
        rng: &mut R,
        now: Instant,
    ) -> Self {
        let config = exam.config.clone();
        let count = count.unwrap_or(config.total_questions);
        let questions = select_balanced(
            &exam.questions,
            &config.categories,
            count,
            &config.weights,
            rng,
        );
        Self::with_questions(config, questions, now)
    }

    /// Start an attempt over an already chosen set of questions.
    pub fn with_questions(config: MockExamConfig, questions: Vec<BankQuestion>, now: Instant) -> Self {
        let attempt = Uuid::new_v4();
        info!(
            attempt = %attempt,
            exam = %config.id,
            questions = questions.len(),
            "mock exam started"
        );

        Self {
            attempt,
            answers: vec![None; questions.len()],
            config,
            questions,
            current: 0,
            cursor: 0,
            started_at: now,
            result: None,
        }
    }

    pub fn attempt(&self) -> Uuid {
        self.attempt
    }

    pub fn config(&self) -> &MockExamConfig {
        &self.config
    }

    pub fn questions(&self) -> &[BankQuestion] {
        &self.questions
    }

    pub fn answers(&self) -> &[Option<usize>] {
        &self.answers
    }

    pub fn current_question(&self) -> Option<&BankQuestion> {
        self.questions.get(self.current)
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn answered_count(&self) -> usize {
        self.answers.iter().filter(|a| a.is_some()).count()
    }

    pub fn is_submitted(&self) -> bool {
        self.result.is_some()
    }

    pub fn result(&self) -> Option<&ExamResult> {
        self.result.as_ref()
    }

    pub fn select_next_option(&mut self) {
        self.cursor = (self.cursor + 1) % NUM_QUIZ_OPTIONS;
    }

    pub fn select_previous_option(&mut self) {
        self.cursor = (self.cursor + NUM_QUIZ_OPTIONS - 1) % NUM_QUIZ_OPTIONS;
    }

    /// Record the highlighted option for the current question. Answers can
    /// be changed until the exam is submitted.
    pub fn choose(&mut self) {
        if self.is_submitted() {
            return;
        }
        if let Some(answer) = self.answers.get_mut(self.current) {
            *answer = Some(self.cursor);
        }
    }

    pub fn next_question(&mut self) {
        if self.current + 1 < self.questions.len() {
            self.go_to(self.current + 1);
        }
    }

    pub fn previous_question(&mut self) {
        if self.current > 0 {
            self.go_to(self.current - 1);
        }
    }

    fn go_to(&mut self, index: usize) {
        self.current = index;
        self.cursor = self.answers[index].unwrap_or(0);
    }

    /// `None` for an untimed exam.
    pub fn time_limit(&self) -> Option<Duration> {
        (self.config.time_limit_secs > 0).then(|| Duration::from_secs(self.config.time_limit_secs))
    }

    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        let limit = self.time_limit()?;
        Some(limit.saturating_sub(now.saturating_duration_since(self.started_at)))
    }

    /// Submit automatically once time runs out. Returns true on the tick
    /// that ended the exam.
    pub fn tick(&mut self, now: Instant) -> bool {
        if self.is_submitted() || self.remaining(now) != Some(Duration::ZERO) {
            return false;
        }
        self.result = Some(self.finish(now));
        true
    }

    /// End the attempt. Submitting again returns the first result.
    pub fn submit(&mut self, now: Instant) -> &ExamResult {
        let result = match self.result.take() {
            Some(result) => result,
            None => self.finish(now),
        };
        self.result.insert(result)
    }

    /// Score the attempt. A submit that lands after the limit counts as
    /// timed out, whether or not a tick got there first.
    fn finish(&self, now: Instant) -> ExamResult {
        let timed_out = self.remaining(now) == Some(Duration::ZERO);
        let elapsed = now.saturating_duration_since(self.started_at);
        let elapsed = match self.time_limit() {
            Some(limit) => elapsed.min(limit),
            None => elapsed,
        };

        let correct: Vec<bool> = self
            .answers
            .iter()
            .zip(&self.questions)
            .map(|(answer, bank)| answer.is_some_and(|a| bank.question.is_correct(a)))
            .collect();
        let score = correct.iter().filter(|&&c| c).count();
        let total = self.questions.len();
        let percentage = percentage(score, total);
        let passed = total > 0 && percentage >= f64::from(self.config.pass_threshold);

        let by_category = self
            .config
            .categories
            .iter()
            .filter_map(|category| {
                let (right, asked) = self
                    .questions
                    .iter()
                    .zip(&correct)
                    .filter(|(bank, _)| bank.category == *category)
                    .fold((0, 0), |(right, asked), (_, &c)| (right + usize::from(c), asked + 1));
                (asked > 0).then(|| CategoryScore {
                    category: category.clone(),
                    correct: right,
                    total: asked,
                })
            })
            .collect();

        info!(
            attempt = %self.attempt,
            exam = %self.config.id,
            score,
            total,
            passed,
            timed_out,
            "mock exam submitted"
        );

        ExamResult {
            attempt: self.attempt,
            score,
            total,
            percentage,
            passed,
            elapsed,
            timed_out,
            by_category,
        }
    }
}
