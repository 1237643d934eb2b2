use crate::analysis::review_editor_context;
use crate::constants::prompts::{
    TONE_EARLY_ATTEMPTS, TONE_LATER_ATTEMPTS, TONE_MIDDLE_ATTEMPTS, TUTOR_PERSONA_PROMPT_V1,
};

/// The two text blocks sent to the model: a persona/instruction block and
/// the composed user turn. Built fresh per request, never mutated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PromptBundle {
    pub system: String,
    pub user: String,
}

/// Assemble the final prompt pair from the question and the three built
/// context blocks. The attempt number only selects the tone note appended
/// to the persona; it never changes what goes into the user turn. The
/// structural review of the editor-context block is rendered at the end so
/// the model sees the learner's code and its checklist side by side.
pub fn compose_prompt(
    question: &str,
    attempt_number: i32,
    editor_block: &str,
    history_block: &str,
    documents_block: &str,
) -> PromptBundle {
    let system = format!("{}\n\n{}", TUTOR_PERSONA_PROMPT_V1, attempt_tone(attempt_number));

    let review = review_editor_context(editor_block)
        .iter()
        .map(|finding| finding.to_string())
        .collect::<Vec<_>>()
        .join("\n");

    let user = format!(
        "The student asks:\n{}\n\n\
         Conversation so far:\n{}\n\n\
         Reference material:\n{}\n\n\
         {}\n\n\
         Automated review of the current code:\n{}",
        question, history_block, documents_block, editor_block, review
    );

    PromptBundle { system, user }
}

fn attempt_tone(attempt_number: i32) -> &'static str {
    match attempt_number {
        i32::MIN..=2 => TONE_EARLY_ATTEMPTS,
        3..=5 => TONE_MIDDLE_ATTEMPTS,
        _ => TONE_LATER_ATTEMPTS,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::html_review::NO_CODE_FOUND_FINDING;
    use crate::prompt::context::{
        format_conversation_history, format_editor_context, format_retrieved_documents,
        CONVERSATION_START, NO_EDITOR_CONTEXT, NO_RELEVANT_CONTENT,
    };

    #[test]
    fn test_empty_states_round_trip() {
        let question = "How do I fix this flexbox bug?";
        let editor_block = format_editor_context(None, None, None);
        let history_block = format_conversation_history(&[]);
        let documents_block = format_retrieved_documents(&[]);

        let bundle = compose_prompt(question, 1, &editor_block, &history_block, &documents_block);

        assert!(bundle.user.contains(question));
        assert!(bundle.user.contains(NO_RELEVANT_CONTENT));
        assert!(bundle.user.contains(CONVERSATION_START));
        assert!(bundle.user.contains(NO_EDITOR_CONTEXT));
        assert!(bundle.user.contains(NO_CODE_FOUND_FINDING));
    }

    #[test]
    fn test_system_block_is_persona_plus_tone() {
        let bundle = compose_prompt("q", 1, "", "", "");
        assert!(bundle.system.starts_with(TUTOR_PERSONA_PROMPT_V1));
        assert!(bundle.system.ends_with(TONE_EARLY_ATTEMPTS));
    }

    #[test]
    fn test_attempt_number_only_changes_tone() {
        let early = compose_prompt("q", 1, "ctx", "hist", "docs");
        let later = compose_prompt("q", 9, "ctx", "hist", "docs");

        assert_eq!(early.user, later.user);
        assert_ne!(early.system, later.system);
        assert!(later.system.ends_with(TONE_LATER_ATTEMPTS));
    }

    #[test]
    fn test_editor_code_reaches_the_review() {
        let editor_block = format_editor_context(Some("<body><h1>Hi</h1></body>"), None, None);
        let bundle = compose_prompt("q", 4, &editor_block, "", "");

        assert!(bundle.user.contains("Automated review of the current code:"));
        assert!(bundle.user.contains("Heading elements are used"));
        assert!(bundle.system.ends_with(TONE_MIDDLE_ATTEMPTS));
    }

    #[test]
    fn test_composition_is_deterministic() {
        let a = compose_prompt("q", 2, "e", "h", "d");
        let b = compose_prompt("q", 2, "e", "h", "d");
        assert_eq!(a, b);
    }
}
