use chrono::Utc;
use libsql::{params, Connection, TransactionBehavior, Value};
use ulid::Ulid;

use super::models::{assemble, format_created, group_questions, QuestionRow, QuizRow};
use super::{Db, Error, Result};
use crate::models::{Question, Quiz};

impl Db {
    /// Insert a quiz with all its questions atomically in a transaction.
    /// Returns the id of the newly created quiz.
    pub async fn create_quiz(
        &self,
        title: &str,
        description: &str,
        questions: &[Question],
    ) -> Result<String> {
        let quiz_id = Ulid::new().to_string();
        let created = format_created(Utc::now());

        let conn = self.connect().await?;
        let tx = conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .await?;

        match insert_quiz(&tx, &quiz_id, title, description, &created, questions).await {
            Ok(()) => tx.commit().await?,
            Err(err) => {
                if let Err(rollback_err) = tx.rollback().await {
                    tracing::error!("rollback after failed quiz insert failed: {rollback_err}");
                }
                return Err(err);
            }
        }

        tracing::info!(
            "new quiz created with id: {quiz_id} ({} questions)",
            questions.len()
        );
        Ok(quiz_id)
    }

    /// All quizzes with their questions, newest first.
    pub async fn quizzes(&self) -> Result<Vec<Quiz>> {
        let conn = self.connect().await?;
        let tx = conn.transaction().await?;

        let quiz_rows = {
            let sql = format!(
                "SELECT {} FROM quizzes ORDER BY created DESC, rowid DESC",
                QuizRow::COLUMNS
            );
            let mut rows = tx.query(&sql, ()).await?;
            let mut quiz_rows = Vec::new();
            while let Some(row) = rows.next().await? {
                quiz_rows.push(QuizRow::from_row(&row)?);
            }
            quiz_rows
        };

        let question_rows = {
            let sql = format!(
                "SELECT {} FROM questions ORDER BY quiz_id, position",
                QuestionRow::COLUMNS
            );
            fetch_question_rows(&tx, &sql, ()).await?
        };

        tx.commit().await?;

        assemble(quiz_rows, group_questions(question_rows)?)
    }

    pub async fn quiz(&self, quiz_id: &str) -> Result<Quiz> {
        let conn = self.connect().await?;
        let tx = conn.transaction().await?;

        let sql = format!("SELECT {} FROM quizzes WHERE id = ?", QuizRow::COLUMNS);
        let row = tx.query(&sql, params![quiz_id]).await?.next().await?;
        let Some(row) = row else {
            tx.rollback().await?;
            return Err(Error::NotFound);
        };
        let quiz_row = QuizRow::from_row(&row)?;

        let sql = format!(
            "SELECT {} FROM questions WHERE quiz_id = ? ORDER BY position",
            QuestionRow::COLUMNS
        );
        let question_rows = fetch_question_rows(&tx, &sql, params![quiz_id]).await?;

        tx.commit().await?;

        let questions = question_rows
            .into_iter()
            .map(QuestionRow::into_question)
            .collect::<Result<Vec<_>>>()?;
        quiz_row.into_quiz(questions)
    }

    /// Remove a quiz together with its questions.
    pub async fn delete_quiz(&self, quiz_id: &str) -> Result<()> {
        let conn = self.connect().await?;
        let tx = conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .await?;

        match delete_rows(&tx, quiz_id).await {
            Ok(1) => tx.commit().await?,
            Ok(_) => {
                tx.rollback().await?;
                return Err(Error::NotFound);
            }
            Err(err) => {
                if let Err(rollback_err) = tx.rollback().await {
                    tracing::error!("rollback after failed quiz delete failed: {rollback_err}");
                }
                return Err(err);
            }
        }

        tracing::info!("quiz deleted with id: {quiz_id}");
        Ok(())
    }

    /// Number of question records stored for a quiz id.
    pub async fn questions_count(&self, quiz_id: &str) -> Result<i64> {
        let conn = self.connect().await?;
        let count = conn
            .query(
                "SELECT COUNT(*) FROM questions WHERE quiz_id = ?",
                params![quiz_id],
            )
            .await?
            .next()
            .await?
            .ok_or_else(|| Error::storage("count returned no rows"))?
            .get::<i64>(0)?;

        Ok(count)
    }

    pub async fn ping(&self) -> Result<()> {
        let conn = self.connect().await?;
        conn.query("SELECT 1", ()).await?.next().await?;
        Ok(())
    }
}

async fn insert_quiz(
    conn: &Connection,
    quiz_id: &str,
    title: &str,
    description: &str,
    created: &str,
    questions: &[Question],
) -> Result<()> {
    conn.execute(
        "INSERT INTO quizzes (id, title, description, created) VALUES (?, ?, ?, ?)",
        params![quiz_id, title, description, created],
    )
    .await?;

    for (position, question) in questions.iter().enumerate() {
        let position = position as i64;
        let options = serde_json::to_string(&question.options)?;
        let image_url = match &question.image_url {
            Some(url) => Value::Text(url.clone()),
            None => Value::Null,
        };
        conn.execute(
            r#"
            INSERT INTO questions
                (quiz_id, position, question_text, options, correct_index, question_type, image_url)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
            params![
                quiz_id,
                position,
                question.text.as_str(),
                options,
                question.correct_index,
                question.question_type.as_str(),
                image_url
            ],
        )
        .await?;
    }

    Ok(())
}

/// Returns the number of quiz rows removed.
async fn delete_rows(conn: &Connection, quiz_id: &str) -> Result<u64> {
    conn.execute("DELETE FROM questions WHERE quiz_id = ?", params![quiz_id])
        .await?;
    let removed = conn
        .execute("DELETE FROM quizzes WHERE id = ?", params![quiz_id])
        .await?;
    Ok(removed)
}

async fn fetch_question_rows(
    conn: &Connection,
    sql: &str,
    params: impl libsql::params::IntoParams,
) -> Result<Vec<QuestionRow>> {
    let mut rows = conn.query(sql, params).await?;
    let mut results = Vec::new();
    while let Some(row) = rows.next().await? {
        results.push(QuestionRow::from_row(&row)?);
    }
    Ok(results)
}
