use serde::{Deserialize, Serialize};

use super::exam::MockExam;
use super::question::{InlineCheckQuestion, QuizQuestion};

/// One piece of a section's body, in reading order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    Heading {
        text: String,
    },
    Paragraph {
        text: String,
    },
    List {
        items: Vec<String>,
    },
    Table {
        headers: Vec<String>,
        rows: Vec<Vec<String>>,
    },
    /// A calculation written out step by step.
    WorkedExample {
        title: String,
        steps: Vec<String>,
        answer: String,
    },
    Callout {
        title: String,
        body: String,
    },
    /// Places the inline check with this id at this point in the prose.
    Check {
        id: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Faq {
    pub question: String,
    pub answer: String,
}

/// A link to another page, absolute (`/hnc/module-8/section-2-1`) or
/// relative to the current page (`../section-1`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavLink {
    pub label: String,
    pub to: String,
}

/// One lesson page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub slug: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub blocks: Vec<Block>,
    #[serde(default, alias = "quickCheckQuestions")]
    pub inline_checks: Vec<InlineCheckQuestion>,
    #[serde(default, alias = "quizQuestions")]
    pub quiz: Vec<QuizQuestion>,
    #[serde(default)]
    pub faqs: Vec<Faq>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous: Option<NavLink>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<NavLink>,
}

impl Section {
    pub fn inline_check(&self, id: &str) -> Option<&InlineCheckQuestion> {
        self.inline_checks.iter().find(|check| check.id == id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Module {
    pub slug: String,
    pub title: String,
    #[serde(default)]
    pub sections: Vec<Section>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    pub slug: String,
    pub title: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub modules: Vec<Module>,
}

impl Course {
    pub fn section_count(&self) -> usize {
        self.modules.iter().map(|m| m.sections.len()).sum()
    }
}

/// Everything loaded from a content file or directory.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub courses: Vec<Course>,
    #[serde(default)]
    pub exams: Vec<MockExam>,
}

impl Catalog {
    pub fn exam(&self, id: &str) -> Option<&MockExam> {
        self.exams.iter().find(|exam| exam.config.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.courses.is_empty() && self.exams.is_empty()
    }
}
