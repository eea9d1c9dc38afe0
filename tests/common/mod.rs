#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::atomic::{AtomicU32, Ordering};

use quizdesk::db::Db;
use quizdesk::documents::DocumentStore;
use quizdesk::models::{Question, QuestionType};
use quizdesk::{router, AppState};

static COUNTER: AtomicU32 = AtomicU32::new(0);

fn unique_path(kind: &str) -> PathBuf {
    let id = COUNTER.fetch_add(1, Ordering::SeqCst);
    std::env::temp_dir().join(format!("quizdesk_test_{kind}_{}_{}", std::process::id(), id))
}

pub async fn create_test_db() -> Db {
    create_test_db_file().await.0
}

/// Like `create_test_db`, but also returns the database file path.
pub async fn create_test_db_file() -> (Db, PathBuf) {
    let path = unique_path("db").with_extension("db");
    // Clean up leftover file from previous runs
    let _ = std::fs::remove_file(&path);
    let url = format!("file:{}", path.display());
    let db = Db::new(url, None)
        .await
        .expect("failed to create test database");
    (db, path)
}

pub async fn create_test_state() -> AppState {
    state_with_db(create_test_db().await).await
}

pub async fn state_with_db(db: Db) -> AppState {
    let documents = DocumentStore::new(unique_path("uploads"));
    documents
        .prepare()
        .await
        .expect("failed to create upload directory");

    AppState {
        db,
        documents,
        cors_origins: vec!["http://localhost:8000".to_string()],
    }
}

pub async fn app() -> axum::Router {
    router(create_test_state().await)
}

pub fn question(text: &str, options: &[&str], correct: i64) -> Question {
    Question {
        text: text.to_string(),
        options: options.iter().map(|o| o.to_string()).collect(),
        correct_index: correct,
        question_type: QuestionType::MultipleChoice,
        image_url: None,
    }
}

pub fn mixed_questions() -> Vec<Question> {
    vec![
        question("2+2?", &["3", "4", "5"], 1),
        Question {
            text: "The sky is blue.".to_string(),
            options: vec!["True".to_string(), "False".to_string()],
            correct_index: 0,
            question_type: QuestionType::TrueFalse,
            image_url: None,
        },
        Question {
            text: "Which animal is shown?".to_string(),
            options: vec!["Cat".to_string(), "Dog".to_string(), "Owl".to_string()],
            correct_index: 2,
            question_type: QuestionType::ImageBased,
            image_url: Some("https://example.com/owl.png".to_string()),
        },
    ]
}

pub fn make_questions(n: usize) -> Vec<Question> {
    (0..n)
        .map(|i| {
            question(
                &format!("Question {}", i + 1),
                &["first", "second", "third"],
                (i % 3) as i64,
            )
        })
        .collect()
}
