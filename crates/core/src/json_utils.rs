//! JSON utility functions shared across crates.

use std::sync::LazyLock;

use regex::Regex;

static FENCED_JSON_REGEX: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?s)```json\s*(.*?)\s*(?:```|\z)").ok());

/// Strip markdown code block wrappers from JSON content.
///
/// Handles `` ```json ... ``` ``, `` ``` ... ``` ``, and other language identifiers.
#[must_use]
pub fn strip_markdown_json(content: &str) -> &str {
    let trimmed = content.trim();
    if trimmed.starts_with("```") && trimmed.ends_with("```") && trimmed.len() >= 6 {
        let without_prefix = trimmed.strip_prefix("```").unwrap_or(trimmed);
        let without_suffix = without_prefix.strip_suffix("```").unwrap_or(without_prefix);
        return without_suffix
            .split_once('\n')
            .map_or_else(|| without_suffix.trim(), |(_, rest)| rest.trim());
    }
    trimmed
}

/// Locate the JSON object inside free-form model output.
///
/// Tried in order: a `` ```json `` fence (an unterminated fence runs to the end
/// of the text), the whole text when it already looks like an object, and
/// finally the span from the first `{` to the last `}`.
#[must_use]
pub fn extract_json_object(content: &str) -> Option<&str> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Some(caps) = FENCED_JSON_REGEX.as_ref().and_then(|re| re.captures(trimmed)) {
        let body = caps.get(1).map_or("", |m| m.as_str()).trim();
        return (!body.is_empty()).then_some(body);
    }

    let unfenced = strip_markdown_json(trimmed);
    if unfenced.starts_with('{') && unfenced.ends_with('}') {
        return Some(unfenced);
    }

    let start = unfenced.find('{')?;
    let end = unfenced.rfind('}')?;
    (end > start).then(|| &unfenced[start..=end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_json_block() {
        let input = "```json\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_markdown_json(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_plain_block() {
        let input = "```\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_markdown_json(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_no_block() {
        let input = "{\"key\": \"value\"}";
        assert_eq!(strip_markdown_json(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_extract_direct_object() {
        assert_eq!(extract_json_object("  {\"a\": 1}  "), Some("{\"a\": 1}"));
    }

    #[test]
    fn test_extract_fenced_object() {
        let input = "Here you go:\n```json\n{\"a\": 1}\n```\nThanks";
        assert_eq!(extract_json_object(input), Some("{\"a\": 1}"));
    }

    #[test]
    fn test_extract_unterminated_fence() {
        let input = "```json\n{\"a\": 1}";
        assert_eq!(extract_json_object(input), Some("{\"a\": 1}"));
    }

    #[test]
    fn test_extract_embedded_object() {
        let input = "Sure! The analysis is {\"a\": {\"b\": 2}} as requested.";
        assert_eq!(extract_json_object(input), Some("{\"a\": {\"b\": 2}}"));
    }

    #[test]
    fn test_extract_generic_fence() {
        let input = "```\n{\"a\": 1}\n```";
        assert_eq!(extract_json_object(input), Some("{\"a\": 1}"));
    }

    #[test]
    fn test_extract_nothing() {
        assert_eq!(extract_json_object(""), None);
        assert_eq!(extract_json_object("   "), None);
        assert_eq!(extract_json_object("no json here"), None);
    }
}
