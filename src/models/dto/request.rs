use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AskRequest {
    #[validate(length(min = 1, max = 128))]
    pub session_id: String,

    #[validate(length(min = 1, max = 4000))]
    pub question: String,

    #[validate(length(max = 100000))]
    pub html_context: Option<String>,

    #[validate(length(max = 20000))]
    pub instructions_context: Option<String>,

    #[validate(length(max = 20000))]
    pub feedback_context: Option<String>,

    pub user_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HistoryQuery {
    pub limit: Option<i64>,
}
