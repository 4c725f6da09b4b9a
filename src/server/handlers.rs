use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};

use crate::assistant::{ChatRequest, ChatResponse, TextGenerator};
use crate::server::state::AppState;
use crate::Error;

/// Health check endpoint
pub async fn health() -> impl IntoResponse {
    "signal lab is running"
}

/// POST /api/chat
///
/// Always answers with `{answer}`; the status carries the failure class.
pub async fn chat<G: TextGenerator + 'static>(
    State(state): State<AppState<G>>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> (StatusCode, Json<ChatResponse>) {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            tracing::warn!(error = %rejection.body_text(), "unreadable chat request");
            return failure(&Error::Json(rejection.body_text()));
        }
    };

    match state
        .assistant()
        .answer_question(&request.question, &request.context)
        .await
    {
        Ok(answer) => (StatusCode::OK, Json(ChatResponse { answer })),
        Err(err) => failure(&err),
    }
}

fn failure(err: &Error) -> (StatusCode, Json<ChatResponse>) {
    (
        StatusCode::from(err),
        Json(ChatResponse {
            answer: err.user_message().to_string(),
        }),
    )
}
