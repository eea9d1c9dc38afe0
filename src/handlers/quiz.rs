use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Serialize;

use crate::{
    models::{NewQuiz, Quiz},
    names,
    rejections::AppError,
    AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(names::QUIZZES_URL, get(list_quizzes).post(create_quiz))
        .route(names::QUIZ_URL, get(get_quiz).delete(delete_quiz))
}

async fn list_quizzes(State(state): State<AppState>) -> Result<Json<Vec<Quiz>>, AppError> {
    let quizzes = state.db.quizzes().await?;
    Ok(Json(quizzes))
}

async fn get_quiz(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Quiz>, AppError> {
    let quiz = state.db.quiz(&id).await?;
    Ok(Json(quiz))
}

#[derive(Serialize)]
struct QuizCreated {
    message: &'static str,
    id: String,
    question_count: usize,
}

async fn create_quiz(
    State(state): State<AppState>,
    payload: Result<Json<NewQuiz>, JsonRejection>,
) -> Result<(StatusCode, Json<QuizCreated>), AppError> {
    let Json(quiz) = payload?;
    quiz.validate()?;

    let id = state
        .db
        .create_quiz(&quiz.title, quiz.description(), &quiz.questions)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(QuizCreated {
            message: "Quiz saved to database!",
            id,
            question_count: quiz.questions.len(),
        }),
    ))
}

#[derive(Serialize)]
struct QuizDeleted {
    message: &'static str,
}

async fn delete_quiz(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<QuizDeleted>, AppError> {
    state.db.delete_quiz(&id).await?;
    Ok(Json(QuizDeleted {
        message: "Quiz deleted successfully",
    }))
}
