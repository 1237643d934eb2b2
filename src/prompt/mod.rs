pub mod composer;
pub mod context;

pub use composer::{compose_prompt, PromptBundle};
pub use context::{
    format_conversation_history, format_editor_context, format_retrieved_documents,
};
