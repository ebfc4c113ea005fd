//! Member response parsing
//!
//! Members are asked for a bare JSON object
//! `{"vote": ..., "confidence": ..., "reasoning": ...}`, but models often
//! wrap it in prose or code fences. Parsing tries the whole text first,
//! then the first balanced `{...}` block.
//!
//! | Field | Missing | Invalid |
//! |-------|---------|---------|
//! | `vote` | `abstain` | error opinion |
//! | `confidence` | `0.5` | clamped to `[0, 1]` |
//! | `reasoning` | `"No reasoning provided"` | stringified |

use super::member::CouncilMember;
use super::opinion::{Opinion, Vote};
use crate::core::error::DomainError;
use crate::core::string::truncate;
use serde_json::{Map, Value};

/// Confidence assumed when the member omits it.
pub const DEFAULT_CONFIDENCE: f64 = 0.5;

/// Reasoning assumed when the member omits it.
pub const DEFAULT_REASONING: &str = "No reasoning provided";

/// Parse one member's raw response into an [`Opinion`].
///
/// Returns an error when no JSON object can be found or the vote word is
/// not one of approve/reject/abstain. Callers turn the error into an
/// error-vote opinion.
pub fn parse_opinion(member: &CouncilMember, response: &str) -> Result<Opinion, DomainError> {
    let object = extract_object(response.trim()).ok_or_else(|| {
        DomainError::MalformedResponse(format!(
            "No valid JSON found in response: {}",
            truncate(response.trim(), 200)
        ))
    })?;

    let vote = match object.get("vote") {
        None | Some(Value::Null) => Vote::Abstain,
        Some(Value::String(s)) => s.parse::<Vote>()?,
        Some(other) => return Err(DomainError::UnknownVote(other.to_string())),
    };

    let confidence = match object.get("confidence") {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(DEFAULT_CONFIDENCE),
        Some(Value::String(s)) => s.trim().parse::<f64>().unwrap_or(DEFAULT_CONFIDENCE),
        _ => DEFAULT_CONFIDENCE,
    };

    let reasoning = match object.get("reasoning") {
        None | Some(Value::Null) => DEFAULT_REASONING.to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    };

    Ok(Opinion::new(member.clone(), vote, confidence, reasoning))
}

fn extract_object(text: &str) -> Option<Map<String, Value>> {
    if let Ok(Value::Object(map)) = serde_json::from_str::<Value>(text) {
        return Some(map);
    }
    let candidate = first_balanced_object(text)?;
    match serde_json::from_str::<Value>(candidate) {
        Ok(Value::Object(map)) => Some(map),
        _ => None,
    }
}

/// First `{...}` block with balanced braces, ignoring braces inside strings
fn first_balanced_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, c) in text[start..].char_indices() {
        if in_string {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match c {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..start + offset + c.len_utf8()]);
                }
            }
            _ => {}
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member() -> CouncilMember {
        CouncilMember::new("test/model", "Risk Analyst")
    }

    #[test]
    fn test_parse_plain_json() {
        let opinion = parse_opinion(
            &member(),
            r#"{"vote": "approve", "confidence": 0.8, "reasoning": "Low risk"}"#,
        )
        .unwrap();
        assert_eq!(opinion.vote, Vote::Approve);
        assert_eq!(opinion.confidence, 0.8);
        assert_eq!(opinion.reasoning, "Low risk");
        assert_eq!(opinion.member.role(), "Risk Analyst");
    }

    #[test]
    fn test_parse_json_inside_prose() {
        let response = r#"Here is my assessment:
```json
{"vote": "REJECT", "confidence": 0.9, "reasoning": "Budget {overrun} likely"}
```
Thanks."#;
        let opinion = parse_opinion(&member(), response).unwrap();
        assert_eq!(opinion.vote, Vote::Reject);
        assert_eq!(opinion.reasoning, "Budget {overrun} likely");
    }

    #[test]
    fn test_parse_nested_object() {
        let response = r#"Answer: {"vote": "approve", "meta": {"k": 1}, "confidence": 0.7}"#;
        let opinion = parse_opinion(&member(), response).unwrap();
        assert_eq!(opinion.vote, Vote::Approve);
        assert_eq!(opinion.confidence, 0.7);
    }

    #[test]
    fn test_defaults_for_missing_fields() {
        let opinion = parse_opinion(&member(), "{}").unwrap();
        assert_eq!(opinion.vote, Vote::Abstain);
        assert_eq!(opinion.confidence, DEFAULT_CONFIDENCE);
        assert_eq!(opinion.reasoning, DEFAULT_REASONING);
    }

    #[test]
    fn test_confidence_is_clamped() {
        let opinion = parse_opinion(&member(), r#"{"vote": "approve", "confidence": 7}"#).unwrap();
        assert_eq!(opinion.confidence, 1.0);
    }

    #[test]
    fn test_confidence_as_string() {
        let opinion =
            parse_opinion(&member(), r#"{"vote": "approve", "confidence": "0.25"}"#).unwrap();
        assert_eq!(opinion.confidence, 0.25);
    }

    #[test]
    fn test_unknown_vote_is_error() {
        let err = parse_opinion(&member(), r#"{"vote": "maybe"}"#).unwrap_err();
        assert_eq!(err, DomainError::UnknownVote("maybe".to_string()));
    }

    #[test]
    fn test_no_json_is_error() {
        let err = parse_opinion(&member(), "I approve wholeheartedly").unwrap_err();
        assert!(matches!(err, DomainError::MalformedResponse(_)));
    }

    #[test]
    fn test_unbalanced_json_is_error() {
        assert!(parse_opinion(&member(), r#"{"vote": "approve""#).is_err());
    }
}
