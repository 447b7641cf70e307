use serde::Deserialize;
use serde_json::Value;
use tracing::debug;
use trendseed_core::KeywordError;

const FENCE: &str = "```";

#[derive(Deserialize)]
struct KeywordPayload {
    keywords: Option<Vec<String>>,
}

/// Removes a surrounding Markdown code fence, if any.
///
/// Whatever follows the opening fence up to the first newline, `{` or `[`
/// is treated as the language tag. The closing fence may be missing. Text
/// without a leading fence is only trimmed.
pub fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix(FENCE) else {
        return trimmed;
    };

    let tag_len = rest
        .find(|c: char| matches!(c, '\n' | '{' | '['))
        .unwrap_or(rest.len());
    let body = rest[tag_len..].trim();
    body.strip_suffix(FENCE).unwrap_or(body).trim()
}

/// Parses the model's answer into its keyword list.
pub fn extract_keywords(raw: &str) -> Result<Vec<String>, KeywordError> {
    let text = strip_code_fence(raw);
    if text.len() != raw.trim().len() {
        debug!("Stripped code fence from AI response");
    }

    let value: Value = serde_json::from_str(text).map_err(KeywordError::InvalidJson)?;
    if !value.is_object() {
        return Err(KeywordError::UnexpectedShape {
            details: "expected a JSON object".to_string(),
        });
    }

    let payload: KeywordPayload =
        serde_json::from_value(value).map_err(|e| KeywordError::UnexpectedShape {
            details: e.to_string(),
        })?;

    let keywords = payload.keywords.unwrap_or_default();
    if keywords.is_empty() {
        return Err(KeywordError::NoKeywords);
    }
    Ok(keywords)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_json_passes_through() {
        assert_eq!(
            extract_keywords(r#"{"keywords":["a","b"]}"#).unwrap(),
            vec!["a", "b"]
        );
    }

    #[test]
    fn test_json_code_fence_is_stripped() {
        let raw = "```json\n{\"keywords\":[\"x\"]}\n```";
        assert_eq!(strip_code_fence(raw), "{\"keywords\":[\"x\"]}");
        assert_eq!(extract_keywords(raw).unwrap(), vec!["x"]);
    }

    #[test]
    fn test_fence_variants() {
        // untagged fence
        assert_eq!(strip_code_fence("```\n{}\n```"), "{}");
        // trailing whitespace after the closing fence
        assert_eq!(strip_code_fence("  ```json\n{}\n```\n\n"), "{}");
        // single line
        assert_eq!(strip_code_fence("```json {\"a\":1}```"), "{\"a\":1}");
        // missing closing fence
        assert_eq!(strip_code_fence("```json\n{}\n"), "{}");
        // CRLF line endings
        assert_eq!(strip_code_fence("```json\r\n{}\r\n```"), "{}");
        // no tag, body starts on the fence line
        assert_eq!(strip_code_fence("```{\"a\":1}\n```"), "{\"a\":1}");
    }

    #[test]
    fn test_any_language_tag_is_dropped() {
        assert_eq!(strip_code_fence("```제이슨\n{}\n```"), "{}");
        assert_eq!(strip_code_fence("```json5 (strict)\n{}\n```"), "{}");
        assert_eq!(strip_code_fence("```text [\"a\"]```"), "[\"a\"]");
        assert_eq!(
            extract_keywords("```제이슨\n{\"keywords\":[\"x\"]}\n```").unwrap(),
            vec!["x"]
        );
    }

    #[test]
    fn test_unfenced_text_is_only_trimmed() {
        assert_eq!(strip_code_fence("  {\"keywords\":[]}\n"), "{\"keywords\":[]}");
    }

    #[test]
    fn test_invalid_json_is_a_parse_error() {
        assert!(matches!(
            extract_keywords("not json"),
            Err(KeywordError::InvalidJson(_))
        ));
    }

    #[test]
    fn test_missing_or_null_keywords_is_empty() {
        assert!(matches!(
            extract_keywords(r#"{"topics":["a"]}"#),
            Err(KeywordError::NoKeywords)
        ));
        assert!(matches!(
            extract_keywords(r#"{"keywords":null}"#),
            Err(KeywordError::NoKeywords)
        ));
        assert!(matches!(
            extract_keywords(r#"{"keywords":[]}"#),
            Err(KeywordError::NoKeywords)
        ));
    }

    #[test]
    fn test_wrong_shapes_are_rejected() {
        assert!(matches!(
            extract_keywords(r#"["a","b"]"#),
            Err(KeywordError::UnexpectedShape { .. })
        ));
        assert!(matches!(
            extract_keywords(r#"{"keywords":"a, b"}"#),
            Err(KeywordError::UnexpectedShape { .. })
        ));
        assert!(matches!(
            extract_keywords(r#"{"keywords":[1,2]}"#),
            Err(KeywordError::UnexpectedShape { .. })
        ));
    }
}
