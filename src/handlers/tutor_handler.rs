use actix_web::{get, post, web, HttpResponse};
use validator::Validate;

use crate::{
    app_state::AppState,
    errors::AppError,
    models::dto::{AskRequest, HistoryQuery, MessageDto},
};

const DEFAULT_HISTORY_LIMIT: i64 = 20;

/// Answers one learner question. The response envelope always comes back
/// with HTTP 200; a failed exchange is reported through its `success` flag.
#[post("/api/tutor/ask")]
async fn ask_tutor(
    state: web::Data<AppState>,
    body: web::Json<AskRequest>,
) -> Result<HttpResponse, AppError> {
    let request = body.into_inner();
    request.validate()?;

    let response = state.tutor_service.ask(request).await;
    Ok(HttpResponse::Ok().json(response))
}

/// Returns the most recent turns of a session, oldest first.
#[get("/api/tutor/sessions/{session_id}/history")]
async fn session_history(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<HistoryQuery>,
) -> Result<HttpResponse, AppError> {
    let session_id = path.into_inner();
    let limit = query.limit.unwrap_or(DEFAULT_HISTORY_LIMIT).clamp(1, 100);

    let messages = state
        .tutor_service
        .session_history(&session_id, limit)
        .await?;
    let history: Vec<MessageDto> = messages.into_iter().map(MessageDto::from).collect();

    Ok(HttpResponse::Ok().json(history))
}

#[get("/health")]
async fn health_check(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    state.db.health_check().await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "status": "ok" })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, App};

    use crate::test_utils::test_helpers::assert_error_status;

    #[actix_web::test]
    async fn test_ask_endpoint_structure() {
        let app = test::init_service(App::new().service(ask_tutor)).await;

        let req = test::TestRequest::post()
            .uri("/api/tutor/ask")
            .set_json(serde_json::json!({
                "sessionId": "sess-1",
                "question": "How do I center a div?"
            }))
            .to_request();

        let resp = test::call_service(&app, req).await;
        // Without app state this cannot succeed; we're testing the route exists
        assert_error_status(resp.status());
    }

    #[actix_web::test]
    async fn test_history_endpoint_structure() {
        let app = test::init_service(App::new().service(session_history)).await;

        let req = test::TestRequest::get()
            .uri("/api/tutor/sessions/sess-1/history?limit=5")
            .to_request();

        let resp = test::call_service(&app, req).await;
        assert_error_status(resp.status());
    }
}
