pub mod message;
pub mod retrieval;
pub mod session;

pub use message::{ConversationTurn, MessageRole, StoredMessage};
pub use retrieval::RetrievedDocument;
pub use session::{LearningProgress, TutorSession};
