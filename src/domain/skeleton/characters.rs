//! 人物列表提取
//!
//! 在人物系统分区内按标题模式定位角色，标题之间的文本即角色描述

use regex::Regex;
use std::sync::LazyLock;

use super::sections::{locate, SectionIndex, SectionKind};
use crate::domain::outline::Character;

/// 角色标题: `#` + 粗体 / `#` + 纯文本 / 独占一行的粗体
static CHARACTER_HEADING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?m)^[ \t]*(?:#{1,6}[ \t]*\*\*(?P<bold_heading>[^*\n]+)\*\*[^\n]*?|#{1,6}[ \t]+(?P<heading>[^\n]+?)|\*\*(?P<bold>[^*\n]+)\*\*[ \t]*[:：]?)[ \t]*\r?$",
    )
    .expect("valid regex")
});

/// 名称前的编号: "1. " "一、" "角色1："
static NAME_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:\d+[.、．]|[一二三四五六七八九十]+[、.．])\s*").expect("valid regex")
});

/// 人物提取限制
#[derive(Debug, Clone)]
pub struct CharacterLimits {
    /// 每份大纲最多角色数
    pub max_characters: usize,
    /// 名称超过该字符数视为误识别
    pub max_name_chars: usize,
    /// 描述截断字符数
    pub max_description_chars: usize,
}

impl Default for CharacterLimits {
    fn default() -> Self {
        Self {
            max_characters: 15,
            max_name_chars: 50,
            max_description_chars: 1000,
        }
    }
}

/// 角色标题候选
struct HeadingMatch {
    start: usize,
    end: usize,
    name: String,
}

/// 从完整文档提取角色（先定位人物系统分区）
pub fn extract_characters(document: &str, limits: &CharacterLimits) -> Vec<Character> {
    let index = SectionIndex::scan(document);
    match locate(document, &index, SectionKind::CharacterSystem) {
        Some(section) => characters_in_section(&section.body, limits),
        None => {
            tracing::warn!("Character section not found");
            Vec::new()
        }
    }
}

/// 从人物系统分区正文（不含分区标题）提取角色
///
/// 每个角色的描述从其标题结束处开始，到下一个角色标题的起始偏移为止
pub fn characters_in_section(body: &str, limits: &CharacterLimits) -> Vec<Character> {
    let headings: Vec<HeadingMatch> = CHARACTER_HEADING
        .captures_iter(body)
        .filter_map(|captures| {
            let whole = captures.get(0)?;
            let raw = captures
                .name("bold_heading")
                .or_else(|| captures.name("heading"))
                .or_else(|| captures.name("bold"))?
                .as_str();
            let name = clean_name(raw);

            if name.is_empty() {
                return None;
            }
            if name.chars().count() > limits.max_name_chars {
                tracing::debug!(name = %name, "Character heading too long, discarded");
                return None;
            }
            Some(HeadingMatch {
                start: whole.start(),
                end: whole.end(),
                name,
            })
        })
        .collect();

    if headings.len() > limits.max_characters {
        tracing::warn!(
            found = headings.len(),
            max = limits.max_characters,
            "Too many characters, truncated"
        );
    }

    headings
        .iter()
        .enumerate()
        .take(limits.max_characters)
        .map(|(i, heading)| {
            let next_start = headings.get(i + 1).map_or(body.len(), |next| next.start);
            let description = body[heading.end..next_start].trim();

            Character {
                name: heading.name.clone(),
                description: truncate_chars(description, limits.max_description_chars),
                markdown: body[heading.start..next_start].trim().to_string(),
            }
        })
        .collect()
}

fn clean_name(raw: &str) -> String {
    let name = raw.trim().trim_end_matches([':', '：']).trim();
    let name = NAME_PREFIX.replace(name, "");
    name.trim_matches('*').trim().to_string()
}

fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => text[..byte_index].to_string(),
        None => text.to_string(),
    }
}
