//! Static curriculum: subjects, chapters and practice questions.
//!
//! A small catalogue ships with the crate. A larger one can be loaded from a
//! JSON file with the same shape as [`Catalog`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::error::{ConfigError, CoreError, Result};

pub const DEFAULT_SUBJECTS: [&str; 5] = [
    "Mathematics",
    "English",
    "Science",
    "Computer Science",
    "Social Studies",
];

pub const GRADES: std::ops::RangeInclusive<u8> = 6..=12;
pub const DEFAULT_GRADE: u8 = 8;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Board {
    #[default]
    Cbse,
    Igcse,
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Board::Cbse => f.write_str("CBSE"),
            Board::Igcse => f.write_str("IGCSE"),
        }
    }
}

impl FromStr for Board {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "CBSE" => Ok(Board::Cbse),
            "IGCSE" => Ok(Board::Igcse),
            other => Err(format!("unknown board: {other} (use CBSE or IGCSE)")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chapter {
    pub id: String,
    pub subject: String,
    pub board: Board,
    pub grade: u8,
    pub chapter_number: u32,
    pub title: String,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub key_points: Vec<String>,
}

impl Chapter {
    /// Summary split into sentences, for one-section-at-a-time reading.
    pub fn summary_sections(&self) -> Vec<String> {
        self.summary
            .as_deref()
            .unwrap_or_default()
            .split(". ")
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PracticeQuestion {
    pub id: String,
    pub chapter_id: String,
    pub question_text: String,
    #[serde(default)]
    pub options: Vec<String>,
    pub correct_answer: String,
    #[serde(default)]
    pub is_math: bool,
    #[serde(default)]
    pub math_steps: Vec<String>,
}

impl PracticeQuestion {
    /// Step-by-step presentation applies only to math questions with steps.
    pub fn uses_step_mode(&self, math_step_mode: bool) -> bool {
        math_step_mode && self.is_math && !self.math_steps.is_empty()
    }

    pub fn is_correct(&self, answer: &str) -> bool {
        answer.trim() == self.correct_answer
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub chapters: Vec<Chapter>,
    #[serde(default)]
    pub questions: Vec<PracticeQuestion>,
}

impl Catalog {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::LoadFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        serde_json::from_str(&content).map_err(CoreError::from)
    }

    pub fn chapter(&self, id: &str) -> Option<&Chapter> {
        self.chapters.iter().find(|c| c.id == id)
    }

    /// Chapters for a board and grade, restricted to the given subjects.
    pub fn chapters_for<'a>(&'a self, board: Board, grade: u8, subjects: &[String]) -> Vec<&'a Chapter> {
        self.chapters
            .iter()
            .filter(|c| c.board == board && c.grade == grade)
            .filter(|c| subjects.iter().any(|s| s == &c.subject))
            .collect()
    }

    pub fn questions_for(&self, chapter_id: &str) -> Vec<&PracticeQuestion> {
        self.questions.iter().filter(|q| q.chapter_id == chapter_id).collect()
    }

    /// Built-in grade 8 CBSE sample catalogue.
    pub fn builtin() -> Self {
        let chapter = |id: &str, subject: &str, number: u32, title: &str, summary: &str, points: &[&str]| Chapter {
            id: id.into(),
            subject: subject.into(),
            board: Board::Cbse,
            grade: DEFAULT_GRADE,
            chapter_number: number,
            title: title.into(),
            summary: Some(summary.into()),
            key_points: points.iter().map(|p| p.to_string()).collect(),
        };

        let chapters = vec![
            chapter(
                "math-8-1",
                "Mathematics",
                1,
                "Rational Numbers",
                "A rational number can be written as p/q where q is not zero. Rational numbers are closed under addition, subtraction and multiplication. Between any two rational numbers there are infinitely many others.",
                &["p/q form with q not zero", "Closure properties", "Additive and multiplicative inverses"],
            ),
            chapter(
                "math-8-2",
                "Mathematics",
                2,
                "Linear Equations in One Variable",
                "A linear equation has one variable with highest power one. Solve it by doing the same operation on both sides. Check the answer by putting it back into the equation.",
                &["Balance both sides", "Transpose terms", "Verify the solution"],
            ),
            chapter(
                "eng-8-1",
                "English",
                1,
                "The Tsunami",
                "A tsunami is a series of huge waves caused by an undersea earthquake. The chapter follows people who survived the 2004 tsunami. Animals sensed the danger before people did.",
                &["Causes of a tsunami", "Stories of survival", "Animal instincts"],
            ),
            chapter(
                "sci-8-1",
                "Science",
                1,
                "Microorganisms",
                "Microorganisms are living things too small to see without a microscope. Some are useful, like those in curd and bread. Others cause diseases in people, animals and plants.",
                &["Types of microorganisms", "Useful microorganisms", "Harmful microorganisms"],
            ),
            chapter(
                "sci-8-2",
                "Science",
                2,
                "Crop Production and Management",
                "Crops are plants grown on a large scale. Farmers prepare soil, sow seeds, add manure, irrigate and protect crops. Harvested grain must be stored safely.",
                &["Kharif and rabi crops", "Agricultural practices", "Storage of grain"],
            ),
            chapter(
                "cs-8-1",
                "Computer Science",
                1,
                "Algorithms and Flowcharts",
                "An algorithm is a list of steps to solve a problem. A flowchart draws those steps with standard shapes. Good algorithms are clear and finish in a finite number of steps.",
                &["Step-by-step thinking", "Flowchart symbols", "Finite and unambiguous steps"],
            ),
            chapter(
                "ss-8-1",
                "Social Studies",
                1,
                "Resources",
                "Anything that meets a human need is a resource. Resources can be natural, human-made or human. Using them carefully keeps them available for the future.",
                &["Types of resources", "Sustainable development", "Conserving resources"],
            ),
        ];

        let questions = vec![
            PracticeQuestion {
                id: "q-math-8-1-1".into(),
                chapter_id: "math-8-1".into(),
                question_text: "What is 1/2 + 1/3?".into(),
                options: vec!["2/5".into(), "5/6".into(), "1/6".into(), "2/6".into()],
                correct_answer: "5/6".into(),
                is_math: true,
                math_steps: vec![
                    "Find a common denominator: 6".into(),
                    "Rewrite: 1/2 = 3/6 and 1/3 = 2/6".into(),
                    "Add the numerators: 3 + 2 = 5".into(),
                    "Answer: 5/6".into(),
                ],
            },
            PracticeQuestion {
                id: "q-sci-8-1-1".into(),
                chapter_id: "sci-8-1".into(),
                question_text: "Which microorganism helps turn milk into curd?".into(),
                options: vec!["Virus".into(), "Lactobacillus".into(), "Algae".into(), "Protozoa".into()],
                correct_answer: "Lactobacillus".into(),
                is_math: false,
                math_steps: Vec::new(),
            },
        ];

        Self { chapters, questions }
    }
}
