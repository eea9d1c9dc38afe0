use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub type Questions = Vec<Question>;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    #[default]
    MultipleChoice,
    TrueFalse,
    ImageBased,
}

impl QuestionType {
    pub const ALL: [QuestionType; 3] = [
        QuestionType::MultipleChoice,
        QuestionType::TrueFalse,
        QuestionType::ImageBased,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionType::MultipleChoice => "multiple_choice",
            QuestionType::TrueFalse => "true_false",
            QuestionType::ImageBased => "image_based",
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown question type: {0}")]
pub struct UnknownQuestionType(pub String);

impl FromStr for QuestionType {
    type Err = UnknownQuestionType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        QuestionType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| UnknownQuestionType(s.to_string()))
    }
}

/// A single quiz item. Wire names are `question`, `correct`, `question_type`
/// and `image_url`; the camelCase names are accepted as aliases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    #[serde(rename = "question", alias = "text")]
    pub text: String,
    pub options: Vec<String>,
    #[serde(rename = "correct", alias = "correctIndex")]
    pub correct_index: i64,
    #[serde(default, alias = "questionType")]
    pub question_type: QuestionType,
    #[serde(default, alias = "imageUrl")]
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quiz {
    pub id: String,
    pub title: String,
    pub description: String,
    pub created: DateTime<Utc>,
    pub questions: Questions,
}

/// Incoming quiz payload, before the store assigns an id and timestamp.
#[derive(Debug, Clone, Deserialize)]
pub struct NewQuiz {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub questions: Questions,
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("title must not be empty")]
    EmptyTitle,
    #[error("question {0}: text must not be empty")]
    EmptyQuestion(usize),
    #[error("question {0}: at least 2 options are required")]
    TooFewOptions(usize),
    #[error("question {0}: option {1} must not be empty")]
    EmptyOption(usize, usize),
    #[error("question {0}: correct index {1} is out of range for {2} options")]
    CorrectOutOfRange(usize, i64, usize),
    #[error("question {0}: true/false questions need exactly 2 options")]
    TrueFalseOptions(usize),
    #[error("question {0}: image based questions need an image_url")]
    MissingImage(usize),
}

impl NewQuiz {
    pub fn description(&self) -> &str {
        self.description.as_deref().unwrap_or_default()
    }

    /// Checks the payload shape. Question numbers in errors are 1-based.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::EmptyTitle);
        }
        for (idx, question) in self.questions.iter().enumerate() {
            question.validate(idx + 1)?;
        }
        Ok(())
    }
}

impl Question {
    fn validate(&self, number: usize) -> Result<(), ValidationError> {
        if self.text.trim().is_empty() {
            return Err(ValidationError::EmptyQuestion(number));
        }
        if self.options.len() < 2 {
            return Err(ValidationError::TooFewOptions(number));
        }
        if let Some(pos) = self.options.iter().position(|o| o.trim().is_empty()) {
            return Err(ValidationError::EmptyOption(number, pos + 1));
        }
        let in_range = usize::try_from(self.correct_index).is_ok_and(|i| i < self.options.len());
        if !in_range {
            return Err(ValidationError::CorrectOutOfRange(
                number,
                self.correct_index,
                self.options.len(),
            ));
        }
        match self.question_type {
            QuestionType::TrueFalse if self.options.len() != 2 => {
                Err(ValidationError::TrueFalseOptions(number))
            }
            QuestionType::ImageBased
                if self.image_url.as_deref().map_or(true, |u| u.trim().is_empty()) =>
            {
                Err(ValidationError::MissingImage(number))
            }
            _ => Ok(()),
        }
    }
}
