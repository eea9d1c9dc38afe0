// Database schema initialization

use libsql::Connection;

use super::Result;

pub async fn create_schema(conn: &Connection, local: bool) -> Result<()> {
    if local {
        // journal_mode reports the active mode as a row
        conn.query("PRAGMA journal_mode = WAL", ()).await?.next().await?;
    }

    conn.execute(
        r#"
        CREATE TABLE IF NOT EXISTS quizzes (
            id TEXT PRIMARY KEY,
            title TEXT NOT NULL CHECK (length(title) > 0),
            description TEXT NOT NULL DEFAULT '',
            created TEXT NOT NULL
        )
        "#,
        (),
    )
    .await?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_quizzes_created ON quizzes(created)",
        (),
    )
    .await?;

    // options holds a JSON array of strings
    conn.execute(
        r#"
        CREATE TABLE IF NOT EXISTS questions (
            id INTEGER PRIMARY KEY,
            quiz_id TEXT NOT NULL,
            position INTEGER NOT NULL,
            question_text TEXT NOT NULL CHECK (length(question_text) > 0),
            options TEXT NOT NULL,
            correct_index INTEGER NOT NULL,
            question_type TEXT NOT NULL DEFAULT 'multiple_choice'
                CHECK (question_type IN ('multiple_choice', 'true_false', 'image_based')),
            image_url TEXT,
            FOREIGN KEY(quiz_id) REFERENCES quizzes(id) ON DELETE CASCADE,
            UNIQUE(quiz_id, position)
        )
        "#,
        (),
    )
    .await?;

    Ok(())
}
