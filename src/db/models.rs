// Flat row types and their assembly into nested quizzes

use std::collections::HashMap;

use chrono::{DateTime, SecondsFormat, Utc};
use libsql::{Row, Value};

use super::{Error, Result};
use crate::models::{Question, Quiz};

/// Fixed-width RFC 3339 so that text ordering matches time ordering.
pub fn format_created(created: DateTime<Utc>) -> String {
    created.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub fn parse_created(created: &str) -> Result<DateTime<Utc>> {
    Ok(DateTime::parse_from_rfc3339(created)?.with_timezone(&Utc))
}

fn optional_text(row: &Row, idx: i32) -> Result<Option<String>> {
    match row.get_value(idx)? {
        Value::Null => Ok(None),
        Value::Text(text) => Ok(Some(text)),
        other => Err(Error::storage(format!(
            "expected text in column {idx}, found {other:?}"
        ))),
    }
}

pub struct QuizRow {
    pub id: String,
    pub title: String,
    pub description: String,
    pub created: String,
}

impl QuizRow {
    pub const COLUMNS: &'static str = "id, title, description, created";

    pub fn from_row(row: &Row) -> Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            title: row.get(1)?,
            description: optional_text(row, 2)?.unwrap_or_default(),
            created: row.get(3)?,
        })
    }

    pub fn into_quiz(self, questions: Vec<Question>) -> Result<Quiz> {
        Ok(Quiz {
            created: parse_created(&self.created)?,
            id: self.id,
            title: self.title,
            description: self.description,
            questions,
        })
    }
}

pub struct QuestionRow {
    pub quiz_id: String,
    pub question_text: String,
    pub options: String,
    pub correct_index: i64,
    pub question_type: String,
    pub image_url: Option<String>,
}

impl QuestionRow {
    pub const COLUMNS: &'static str =
        "quiz_id, question_text, options, correct_index, question_type, image_url";

    pub fn from_row(row: &Row) -> Result<Self> {
        Ok(Self {
            quiz_id: row.get(0)?,
            question_text: row.get(1)?,
            options: row.get(2)?,
            correct_index: row.get(3)?,
            question_type: row.get(4)?,
            image_url: optional_text(row, 5)?,
        })
    }

    pub fn into_question(self) -> Result<Question> {
        Ok(Question {
            text: self.question_text,
            options: serde_json::from_str(&self.options)?,
            correct_index: self.correct_index,
            question_type: self.question_type.parse().map_err(Error::storage)?,
            image_url: self.image_url,
        })
    }
}

/// Groups question rows by quiz id. Rows must already be in position order;
/// that order is kept within each group.
pub fn group_questions(rows: Vec<QuestionRow>) -> Result<HashMap<String, Vec<Question>>> {
    let mut grouped: HashMap<String, Vec<Question>> = HashMap::new();
    for row in rows {
        let quiz_id = row.quiz_id.clone();
        grouped.entry(quiz_id).or_default().push(row.into_question()?);
    }
    Ok(grouped)
}

/// Joins quiz rows with their grouped questions, keeping the quiz row order.
pub fn assemble(
    quizzes: Vec<QuizRow>,
    mut questions: HashMap<String, Vec<Question>>,
) -> Result<Vec<Quiz>> {
    quizzes
        .into_iter()
        .map(|quiz| {
            let own = questions.remove(&quiz.id).unwrap_or_default();
            quiz.into_quiz(own)
        })
        .collect()
}
