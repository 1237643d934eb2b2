use mentor_server::models::domain::{MessageRole, StoredMessage};

#[actix_web::test]
async fn test_stored_message_serialization_round_trip() {
    let message = StoredMessage::from_assistant(
        "m-1",
        "sess-1",
        "Try margin: 0 auto.",
        Some("user-1".to_string()),
        vec!["css-basics.md".to_string()],
        120,
    );

    let json_str = serde_json::to_string(&message).unwrap();
    let deserialized: StoredMessage = serde_json::from_str(&json_str).unwrap();

    assert_eq!(message, deserialized);
    assert_eq!(deserialized.role, MessageRole::Assistant);
}

#[cfg(test)]
mod sync_tests {
    use mentor_server::{
        analysis::extract_topics,
        prompt::{
            compose_prompt, format_conversation_history, format_editor_context,
            format_retrieved_documents,
        },
    };

    #[test]
    fn test_pure_pipeline_end_to_end() {
        let question = "Why is my image not accessible?";
        let editor_block = format_editor_context(
            Some(r#"<body><img src="cat.png"></body>"#),
            Some("Add a photo of your pet."),
            None,
        );
        let history_block = format_conversation_history(&[]);
        let documents_block = format_retrieved_documents(&[]);

        let bundle = compose_prompt(question, 1, &editor_block, &history_block, &documents_block);

        assert!(bundle.user.contains(question));
        assert!(bundle.user.contains("Add a photo of your pet."));
        assert!(bundle.user.contains("Image missing alt attribute"));

        let topics = extract_topics(question);
        assert!(topics.contains("best_practices"));
    }
}
