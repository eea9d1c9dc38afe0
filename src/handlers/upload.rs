use axum::{
    extract::{DefaultBodyLimit, Multipart, State},
    routing::post,
    Json, Router,
};

use crate::{
    documents::StoredDocument,
    names,
    rejections::{AppError, ResultExt},
    utils, AppState,
};

// Room for multipart framing on top of the file itself.
const BODY_LIMIT: usize = names::MAX_UPLOAD_BYTES + 64 * 1024;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(names::UPLOAD_URL, post(upload_document))
        .layer(DefaultBodyLimit::max(BODY_LIMIT))
}

async fn upload_document(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<StoredDocument>, AppError> {
    while let Some(mut field) = multipart.next_field().await? {
        if field.name() != Some(names::UPLOAD_FIELD_NAME) {
            continue;
        }

        let file_name = field
            .file_name()
            .map(str::to_owned)
            .ok_or(AppError::Input("missing file name"))?;
        let extension = utils::document_extension(&file_name)
            .ok_or(AppError::Input("only .doc and .docx files are accepted"))?;

        let mut content = Vec::new();
        while let Some(chunk) = field.chunk().await? {
            if content.len() + chunk.len() > names::MAX_UPLOAD_BYTES {
                return Err(AppError::PayloadTooLarge("file too large"));
            }
            content.extend_from_slice(&chunk);
        }
        if content.is_empty() {
            return Err(AppError::Input("uploaded file is empty"));
        }

        let stored = state
            .documents
            .save(&file_name, &extension, &content)
            .await
            .reject("failed to store document")?;
        return Ok(Json(stored));
    }

    Err(AppError::Input("missing file field"))
}
