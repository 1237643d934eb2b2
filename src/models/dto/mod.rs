pub mod request;
pub mod response;

pub use request::{AskRequest, HistoryQuery};
pub use response::{AskResponse, MessageDto, SessionInfo, UNLIMITED_ATTEMPTS};
