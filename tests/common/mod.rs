//! Shared fixtures for the integration tests.
#![allow(dead_code)]

use std::path::PathBuf;

use study_centre::models::{
    BankQuestion, Block, Catalog, Course, Difficulty, DifficultyWeights, Faq, InlineCheckQuestion,
    MockExam, MockExamConfig, Module, NavLink, QuizQuestion, Section,
};

/// The content shipped in the repository.
pub fn bundled_content() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("content")
}

pub fn quiz_question(id: u32, correct_answer: usize) -> QuizQuestion {
    QuizQuestion {
        id,
        text: format!("Quiz question {id}"),
        options: [
            "Option A".to_string(),
            "Option B".to_string(),
            "Option C".to_string(),
            "Option D".to_string(),
        ],
        correct_answer,
        explanation: format!("Explanation {id}"),
    }
}

pub fn inline_check(id: &str, correct_index: usize) -> InlineCheckQuestion {
    InlineCheckQuestion {
        id: id.to_string(),
        text: format!("Check {id}?"),
        options: vec!["Yes".to_string(), "No".to_string(), "Maybe".to_string()],
        correct_index,
        explanation: format!("Because of {id}."),
    }
}

pub fn section(slug: &str, title: &str) -> Section {
    Section {
        slug: slug.to_string(),
        title: title.to_string(),
        description: format!("{title} for apprentices."),
        blocks: vec![
            Block::Heading {
                text: "Overview".to_string(),
            },
            Block::Paragraph {
                text: format!("About {title}."),
            },
        ],
        inline_checks: Vec::new(),
        quiz: Vec::new(),
        faqs: Vec::new(),
        previous: None,
        next: None,
    }
}

/// One course, two modules: `module-1` has sections 1 and 2, `module-2` has
/// section 1. Section 1 of module 1 carries two placed checks, a quiz and
/// FAQs, and links to its sibling with a relative path.
pub fn catalog() -> Catalog {
    let mut intro = section("section-1", "Ventilation Principles");
    intro.blocks.push(Block::Check {
        id: "air-changes".to_string(),
    });
    intro.blocks.push(Block::WorkedExample {
        title: "Air change rate".to_string(),
        steps: vec!["Volume 60 m³".to_string(), "Flow 120 m³/h".to_string()],
        answer: "2 air changes per hour".to_string(),
    });
    intro.blocks.push(Block::Check {
        id: "fresh-air".to_string(),
    });
    intro.inline_checks = vec![inline_check("air-changes", 1), inline_check("fresh-air", 0)];
    intro.quiz = vec![quiz_question(1, 0), quiz_question(2, 3), quiz_question(3, 1)];
    intro.faqs = vec![Faq {
        question: "Why ventilate?".to_string(),
        answer: "To dilute pollutants.".to_string(),
    }];
    intro.next = Some(NavLink {
        label: "Next: Natural Ventilation".to_string(),
        to: "../section-2".to_string(),
    });

    let natural = section("section-2", "Natural Ventilation");
    let mechanical = section("section-1", "Mechanical Ventilation");

    Catalog {
        courses: vec![Course {
            slug: "hnc".to_string(),
            title: "HNC Building Services".to_string(),
            summary: "Level 4 building services engineering.".to_string(),
            modules: vec![
                Module {
                    slug: "module-1".to_string(),
                    title: "Module 1: Ventilation".to_string(),
                    sections: vec![intro, natural],
                },
                Module {
                    slug: "module-2".to_string(),
                    title: "Module 2: Air Handling".to_string(),
                    sections: vec![mechanical],
                },
            ],
        }],
        exams: vec![exam("am2", 6, 3)],
    }
}

/// An exam over two categories with `per_difficulty` questions of each
/// difficulty per category.
pub fn exam(id: &str, total_questions: usize, per_difficulty: u32) -> MockExam {
    let categories = vec!["Safe Isolation".to_string(), "Inspection".to_string()];
    let mut questions = Vec::new();
    let mut next_id = 1;
    for category in &categories {
        for difficulty in Difficulty::ALL {
            for _ in 0..per_difficulty {
                questions.push(BankQuestion {
                    question: quiz_question(next_id, 0),
                    category: category.clone(),
                    difficulty,
                    topic: None,
                });
                next_id += 1;
            }
        }
    }

    MockExam {
        config: MockExamConfig {
            id: id.to_string(),
            title: "AM2 Mock Exam".to_string(),
            total_questions,
            time_limit_secs: 600,
            pass_threshold: 80,
            categories,
            weights: DifficultyWeights::default(),
        },
        questions,
    }
}
