use crate::models::InlineCheckQuestion;

/// Answer state for one inline check. The first choice sticks until reset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InlineCheckState {
    selected: Option<usize>,
}

impl InlineCheckState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `index` as the answer. Ignored when already answered or when
    /// `index` is not one of the options.
    pub fn choose(&mut self, question: &InlineCheckQuestion, index: usize) -> bool {
        if self.selected.is_some() || index >= question.options.len() {
            return false;
        }
        self.selected = Some(index);
        true
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn is_answered(&self) -> bool {
        self.selected.is_some()
    }

    pub fn is_correct(&self, question: &InlineCheckQuestion) -> Option<bool> {
        self.selected.map(|index| index == question.correct_index)
    }

    /// The explanation, once there is an answer to explain.
    pub fn explanation<'q>(&self, question: &'q InlineCheckQuestion) -> Option<&'q str> {
        self.selected.map(|_| question.explanation.as_str())
    }

    /// How option `index` should be highlighted.
    pub fn mark(&self, question: &InlineCheckQuestion, index: usize) -> OptionMark {
        match self.selected {
            None => OptionMark::Plain,
            Some(_) if index == question.correct_index => OptionMark::Correct,
            Some(chosen) if chosen == index => OptionMark::Wrong,
            Some(_) => OptionMark::Plain,
        }
    }

    pub fn reset(&mut self) {
        self.selected = None;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionMark {
    Plain,
    Correct,
    Wrong,
}
