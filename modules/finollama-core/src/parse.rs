use std::sync::LazyLock;

use finollama_common::FactCheckPayload;
use regex::Regex;

use crate::error::ParseError;

static FENCED_JSON_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)```json(.*?)```").expect("valid regex"));

/// Find the first ```json fenced block in `raw` and parse its contents.
///
/// The value is returned as-is; see [`parse_fact_check`] for the typed form.
pub fn parse_fenced_json(raw: &str) -> Result<serde_json::Value, ParseError> {
    let captures = FENCED_JSON_RE
        .captures(raw)
        .ok_or(ParseError::NoJsonFound)?;
    let body = captures[1].trim();
    serde_json::from_str(body).map_err(|e| ParseError::JsonDecode(e.to_string()))
}

/// Parse the fenced block and require the fact-check shape.
pub fn parse_fact_check(raw: &str) -> Result<FactCheckPayload, ParseError> {
    let value = parse_fenced_json(raw)?;
    FactCheckPayload::from_value(value).map_err(|e| ParseError::Schema(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use finollama_common::Accuracy;
    use serde_json::json;

    #[test]
    fn no_block_is_no_json_found() {
        assert_eq!(
            parse_fenced_json("I could not read that article, sorry."),
            Err(ParseError::NoJsonFound)
        );
        // Bare JSON without a fence is not accepted either.
        assert_eq!(
            parse_fenced_json(r#"{"50_words_summary": "x", "list_of_facts": []}"#),
            Err(ParseError::NoJsonFound)
        );
    }

    #[test]
    fn unclosed_block_is_no_json_found() {
        assert_eq!(
            parse_fenced_json("```json\n{\"a\": 1}\n"),
            Err(ParseError::NoJsonFound)
        );
    }

    #[test]
    fn malformed_block_is_decode_error() {
        let raw = "```json\n{\"50_words_summary\": \"x\", \"list_of_facts\": [}\n```";
        assert!(matches!(
            parse_fenced_json(raw),
            Err(ParseError::JsonDecode(_))
        ));
    }

    #[test]
    fn valid_block_parses_to_equal_value() {
        let expected = json!({
            "50_words_summary": "A short note.",
            "list_of_facts": [
                {"fact": "Sky is blue.", "accurate": "accurate", "explanation": ""}
            ]
        });
        let raw = format!(
            "Here is the analysis you asked for:\n```json\n{}\n```\nLet me know if you need more.",
            serde_json::to_string_pretty(&expected).unwrap()
        );
        assert_eq!(parse_fenced_json(&raw).unwrap(), expected);
    }

    #[test]
    fn first_block_wins() {
        let raw = "```json\n{\"n\": 1}\n```\n```json\n{\"n\": 2}\n```";
        assert_eq!(parse_fenced_json(raw).unwrap(), json!({"n": 1}));
    }

    #[test]
    fn block_without_newlines() {
        assert_eq!(parse_fenced_json("```json[1, 2]```").unwrap(), json!([1, 2]));
    }

    #[test]
    fn fact_check_typed() {
        let raw = "```json\n{\"50_words_summary\": \"s\", \"list_of_facts\": [\
                   {\"fact\": \"f\", \"accurate\": \"misleading\", \"explanation\": \"e\"}]}\n```";
        let payload = parse_fact_check(raw).unwrap();
        assert_eq!(payload.summary, "s");
        assert_eq!(payload.facts[0].accuracy, Accuracy::Misleading);
    }

    #[test]
    fn fact_check_missing_keys_is_schema_error() {
        let raw = "```json\n{\"summary\": \"s\", \"facts\": []}\n```";
        assert!(matches!(parse_fact_check(raw), Err(ParseError::Schema(_))));
    }

    #[test]
    fn fact_check_unknown_label_is_schema_error() {
        let raw = "```json\n{\"50_words_summary\": \"s\", \"list_of_facts\": [\
                   {\"fact\": \"f\", \"accurate\": \"probably\"}]}\n```";
        assert!(matches!(parse_fact_check(raw), Err(ParseError::Schema(_))));
    }
}
