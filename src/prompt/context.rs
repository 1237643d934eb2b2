use crate::models::domain::{ConversationTurn, RetrievedDocument};

pub const NO_RELEVANT_CONTENT: &str =
    "No specific relevant content was found in the course material for this question.";
pub const CONVERSATION_START: &str = "This is the start of the conversation.";
pub const NO_EDITOR_CONTEXT: &str = "No editor context is available for this question.";

/// Longest slice of a prior turn that gets rendered into a prompt.
pub const HISTORY_TURN_MAX_CHARS: usize = 500;

/// Render retrieved reference chunks as a plain-text block: source, trimmed
/// chunk text, and the similarity score as a percentage when one is present.
pub fn format_retrieved_documents(documents: &[RetrievedDocument]) -> String {
    if documents.is_empty() {
        return NO_RELEVANT_CONTENT.to_string();
    }

    documents
        .iter()
        .enumerate()
        .map(|(i, document)| {
            let mut block = format!(
                "[{}] Source: {}\n{}",
                i + 1,
                document.source,
                document.chunk_text.trim()
            );
            if let Some(score) = document.similarity_score {
                block.push_str(&format!("\nRelevance: {:.1}%", score * 100.0));
            }
            block
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Render prior turns with role display names, each truncated to
/// [`HISTORY_TURN_MAX_CHARS`] characters.
pub fn format_conversation_history(turns: &[ConversationTurn]) -> String {
    if turns.is_empty() {
        return CONVERSATION_START.to_string();
    }

    turns
        .iter()
        .map(|turn| format!("{}: {}", turn.role.display_name(), truncate(&turn.content)))
        .collect::<Vec<_>>()
        .join("\n")
}

fn truncate(content: &str) -> String {
    if content.chars().count() <= HISTORY_TURN_MAX_CHARS {
        return content.to_string();
    }
    let truncated: String = content.chars().take(HISTORY_TURN_MAX_CHARS).collect();
    format!("{}...", truncated)
}

/// Render whatever editor state is present: current code (fenced as html),
/// activity instructions, and previous feedback. Blank sections are
/// omitted; when nothing is present the block is a fixed sentence.
pub fn format_editor_context(
    html: Option<&str>,
    instructions: Option<&str>,
    feedback: Option<&str>,
) -> String {
    let mut sections = Vec::new();

    if let Some(code) = present(html) {
        sections.push(format!("Current code in the editor:\n```html\n{}\n```", code));
    }
    if let Some(text) = present(instructions) {
        sections.push(format!("Activity instructions:\n{}", text));
    }
    if let Some(text) = present(feedback) {
        sections.push(format!("Previous feedback:\n{}", text));
    }

    if sections.is_empty() {
        return NO_EDITOR_CONTEXT.to_string();
    }

    sections.join("\n\n")
}

fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
