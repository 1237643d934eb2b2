pub mod message_repository;
pub mod session_repository;

pub use message_repository::{MessageRepository, MongoMessageRepository};
pub use session_repository::{MongoSessionRepository, SessionRepository};

#[cfg(test)]
pub use message_repository::MockMessageRepository;
#[cfg(test)]
pub use session_repository::MockSessionRepository;
