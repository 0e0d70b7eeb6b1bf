//! 内嵌 JSON 元数据提取
//!
//! 依次尝试:
//! 1. 标记为 json 的代码块
//! 2. 同时包含 `chapter_map` 与 `actions` 键的裸 JSON 对象
//!
//! 任一步解析失败只记录告警，继续下一步；全部失败返回空元数据

use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

use crate::domain::outline::{ChapterMapEntry, JsonMetadata, PaywallInfo};

static FENCED_JSON: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)```[ \t]*json[ \t]*\r?\n(.*?)```").expect("valid regex")
});

/// 裸对象回溯时最多尝试的 `{` 个数
const MAX_BRACE_CANDIDATES: usize = 64;

/// 提取文档内嵌的 JSON 元数据
pub fn extract_metadata(document: &str) -> JsonMetadata {
    if let Some(metadata) = from_fenced_blocks(document) {
        return metadata;
    }
    if let Some(metadata) = from_bare_object(document) {
        return metadata;
    }

    tracing::debug!("No JSON metadata found in document");
    JsonMetadata::default()
}

fn from_fenced_blocks(document: &str) -> Option<JsonMetadata> {
    for captures in FENCED_JSON.captures_iter(document) {
        let Some(block) = captures.get(1) else {
            continue;
        };
        match serde_json::from_str::<Value>(block.as_str()) {
            Ok(value) if is_metadata_object(&value) => return Some(to_metadata(value)),
            Ok(_) => {
                tracing::debug!("Fenced JSON block without chapter_map/paywall_info, skipped");
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to parse fenced JSON block");
            }
        }
    }
    None
}

/// 从 `"chapter_map"` 键向前回溯 `{`，用流式解析取出第一个完整对象
fn from_bare_object(document: &str) -> Option<JsonMetadata> {
    for (key_offset, _) in document.match_indices("\"chapter_map\"") {
        let candidates = document[..key_offset]
            .rmatch_indices('{')
            .take(MAX_BRACE_CANDIDATES);

        for (brace, _) in candidates {
            let mut stream = serde_json::Deserializer::from_str(&document[brace..]).into_iter::<Value>();
            match stream.next() {
                Some(Ok(value)) if has_key(&value, "chapter_map") && has_key(&value, "actions") => {
                    return Some(to_metadata(value));
                }
                Some(Ok(_)) => continue,
                Some(Err(e)) => {
                    tracing::debug!(offset = brace, error = %e, "Bare JSON candidate rejected");
                }
                None => {}
            }
        }
    }

    if document.contains("\"chapter_map\"") {
        tracing::warn!("Document mentions chapter_map but no parsable JSON object was found");
    }
    None
}

fn has_key(value: &Value, key: &str) -> bool {
    value.as_object().is_some_and(|o| o.contains_key(key))
}

fn is_metadata_object(value: &Value) -> bool {
    has_key(value, "chapter_map") || has_key(value, "paywall_info")
}

/// 逐条转换，单条无效只跳过该条
fn to_metadata(value: Value) -> JsonMetadata {
    let Value::Object(mut object) = value else {
        return JsonMetadata::default();
    };

    let chapter_map = match object.remove("chapter_map") {
        Some(Value::Array(entries)) => entries
            .into_iter()
            .filter_map(|entry| match serde_json::from_value::<ChapterMapEntry>(entry) {
                Ok(entry) => Some(entry),
                Err(e) => {
                    tracing::warn!(error = %e, "Invalid chapter_map entry skipped");
                    None
                }
            })
            .collect(),
        Some(other) => {
            tracing::warn!(kind = %value_kind(&other), "chapter_map is not an array");
            Vec::new()
        }
        None => Vec::new(),
    };

    let paywall_info = match object.remove("paywall_info") {
        Some(Value::Null) | None => None,
        Some(info) => match serde_json::from_value::<PaywallInfo>(info) {
            Ok(info) => Some(info),
            Err(e) => {
                tracing::warn!(error = %e, "Invalid paywall_info ignored");
                None
            }
        },
    };

    JsonMetadata {
        chapter_map,
        paywall_info,
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fenced_block() {
        let doc = "前文\n```json\n{\"chapter_map\": [{\"chapter\": 1, \"episodes\": \"1-3\"}], \"paywall_info\": {\"chapter\": 2}}\n```\n后文";
        let metadata = extract_metadata(doc);

        assert_eq!(metadata.chapter_map.len(), 1);
        assert_eq!(metadata.chapter_map[0].episodes, "1-3");
        assert_eq!(metadata.paywall_chapter(), Some(2));
    }

    #[test]
    fn test_fenced_block_tag_is_case_insensitive() {
        let doc = "```JSON\n{\"chapter_map\": [{\"chapter\": 3, \"episodes\": \"7\"}]}\n```";
        assert_eq!(extract_metadata(doc).chapter_map[0].chapter, 3);
    }

    #[test]
    fn test_skips_unrelated_fenced_block() {
        let doc = "```json\n{\"foo\": 1}\n```\n```json\n{\"chapter_map\": [{\"chapter\": 1, \"episodes\": \"1\"}]}\n```";
        assert_eq!(extract_metadata(doc).chapter_map.len(), 1);
    }

    #[test]
    fn test_bare_object_with_actions() {
        let doc = "说明文字 {\"actions\": [{\"type\": \"save\"}], \"chapter_map\": [{\"chapter\": 1, \"episodes\": \"1-2\"}], \"paywall_info\": {\"chapter\": 1}} 结尾";
        let metadata = extract_metadata(doc);

        assert_eq!(metadata.chapter_map.len(), 1);
        assert_eq!(metadata.paywall_chapter(), Some(1));
    }

    #[test]
    fn test_bare_object_requires_actions_key() {
        let doc = "{\"chapter_map\": [{\"chapter\": 1, \"episodes\": \"1-2\"}]}";
        assert!(extract_metadata(doc).is_empty());
    }

    #[test]
    fn test_unterminated_block_returns_empty() {
        let doc = "```json\n{\"chapter_map\": [{\"chapter\": 1, \"episodes\": \"1-3\"},\n";
        let metadata = extract_metadata(doc);

        assert!(metadata.is_empty());
        assert_eq!(serde_json::to_string(&metadata).unwrap(), "{}");
    }

    #[test]
    fn test_invalid_json_falls_through_to_empty() {
        let doc = "```json\n{chapter_map: [oops]}\n```";
        assert!(extract_metadata(doc).is_empty());
    }

    #[test]
    fn test_invalid_entry_skipped() {
        let doc = "```json\n{\"chapter_map\": [{\"chapter\": \"x\", \"episodes\": \"1\"}, {\"chapter\": 2, \"episodes\": \"2-3\"}]}\n```";
        let metadata = extract_metadata(doc);

        assert_eq!(metadata.chapter_map.len(), 1);
        assert_eq!(metadata.chapter_map[0].chapter, 2);
    }

    #[test]
    fn test_no_json_at_all() {
        assert!(extract_metadata("").is_empty());
        assert!(extract_metadata("## 一、元数据\n剧名：无").is_empty());
    }
}
