use std::collections::BTreeSet;

/// Topic labels mapped to the keyword variants that signal them. Matching
/// stops at the first variant that hits, but every topic is checked
/// independently, so one question can carry several labels.
const TOPIC_KEYWORDS: &[(&str, &[&str])] = &[
    ("html", &["html", "tag", "element", "markup"]),
    ("css", &["css", "style", "styling", "stylesheet"]),
    ("flexbox", &["flexbox", "flex", "justify-content", "align-items"]),
    ("grid", &["grid-template", "grid"]),
    (
        "responsive",
        &["responsive", "media query", "viewport", "breakpoint"],
    ),
    (
        "semantic",
        &["semantic", "header", "nav", "footer", "article", "section"],
    ),
    ("forms", &["form", "input", "button", "label", "submit"]),
    ("javascript", &["javascript", "script", "function", " js "]),
    (
        "debugging",
        &["debug", "fix", "error", "broken", "bug", "not working", "doesn't work"],
    ),
    (
        "best_practices",
        &["best practice", "accessibility", "accessible", "alt text", "aria", "seo"],
    ),
];

/// Extract the set of topic labels whose keyword list matches the question.
///
/// Matching is a case-insensitive substring check. Empty input yields an
/// empty set.
pub fn extract_topics(question: &str) -> BTreeSet<String> {
    let lowered = question.to_lowercase();

    TOPIC_KEYWORDS
        .iter()
        .filter(|(_, keywords)| keywords.iter().any(|keyword| lowered.contains(keyword)))
        .map(|(topic, _)| (*topic).to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn topics(question: &str) -> Vec<String> {
        extract_topics(question).into_iter().collect()
    }

    #[test]
    fn test_flexbox_bug_question() {
        assert_eq!(topics("How do I fix this flexbox bug?"), vec!["debugging", "flexbox"]);
    }

    #[test]
    fn test_empty_question_yields_empty_set() {
        assert!(extract_topics("").is_empty());
        assert!(extract_topics("   ").is_empty());
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        assert_eq!(topics("What does CSS GRID do?"), vec!["css", "grid"]);
    }

    #[test]
    fn test_multiple_independent_topics() {
        let found = extract_topics("Is my form accessible on a small viewport?");
        assert!(found.contains("forms"));
        assert!(found.contains("responsive"));
        assert!(found.contains("best_practices"));
    }

    #[test]
    fn test_unrelated_question_matches_nothing() {
        assert!(extract_topics("What time is lunch?").is_empty());
    }

    #[test]
    fn test_same_input_same_output() {
        let question = "Why is my grid layout broken?";
        assert_eq!(extract_topics(question), extract_topics(question));
    }
}
