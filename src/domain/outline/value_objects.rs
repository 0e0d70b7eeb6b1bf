//! Outline Context - Value Objects

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

use super::{Character, TensionCurvePoint};

/// 审核状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

/// 设定分区: 原始 markdown 片段 + 尽力而为的键值解析
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingSection {
    pub markdown: String,
    pub parsed: BTreeMap<String, String>,
}

impl SettingSection {
    pub fn is_empty(&self) -> bool {
        self.markdown.is_empty() && self.parsed.is_empty()
    }
}

/// 人物系统分区
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterSection {
    pub markdown: String,
    pub parsed: BTreeMap<String, String>,
    pub characters: Vec<Character>,
}

/// 张力曲线分区
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TensionCurveSection {
    pub markdown: String,
    pub parsed: BTreeMap<String, String>,
    pub points: Vec<TensionCurvePoint>,
}

/// 故事设定
///
/// `None` 表示文档中缺少该分区；`Some` 但内容为空表示分区存在但无可解析内容
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorySettings {
    pub metadata: Option<SettingSection>,
    pub core_setting: Option<SettingSection>,
    pub characters: Option<CharacterSection>,
    pub plot_architecture: Option<SettingSection>,
    pub adaptation_mapping: Option<SettingSection>,
    pub writing_guidelines: Option<SettingSection>,
    pub paywall_design: Option<SettingSection>,
    pub tension_curve: Option<TensionCurveSection>,
}

impl StorySettings {
    /// 角色列表（分区缺失时为空）
    pub fn character_list(&self) -> &[Character] {
        self.characters
            .as_ref()
            .map(|c| c.characters.as_slice())
            .unwrap_or(&[])
    }

    pub fn tension_points(&self) -> &[TensionCurvePoint] {
        self.tension_curve
            .as_ref()
            .map(|t| t.points.as_slice())
            .unwrap_or(&[])
    }
}

/// 章节 → 剧集映射条目
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChapterMapEntry {
    #[serde(deserialize_with = "flexible_u32")]
    pub chapter: u32,
    /// `"10-12"` 或 `"7"`
    #[serde(deserialize_with = "flexible_string")]
    pub episodes: String,
}

/// 付费卡点信息
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PaywallInfo {
    #[serde(default, deserialize_with = "flexible_opt_u32")]
    pub chapter: Option<u32>,
    /// 模型附带的其他字段（原样保留）
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

/// 文档内嵌 JSON 元数据
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JsonMetadata {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub chapter_map: Vec<ChapterMapEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paywall_info: Option<PaywallInfo>,
}

impl JsonMetadata {
    pub fn is_empty(&self) -> bool {
        self.chapter_map.is_empty() && self.paywall_info.is_none()
    }

    pub fn paywall_chapter(&self) -> Option<u32> {
        self.paywall_info.as_ref().and_then(|p| p.chapter)
    }
}

// ============================================================================
// 宽松反序列化: 模型输出中数字与字符串经常混用
// ============================================================================

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    String(String),
    Number(u64),
}

fn flexible_u32<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    match StringOrNumber::deserialize(deserializer)? {
        StringOrNumber::Number(n) => u32::try_from(n).map_err(serde::de::Error::custom),
        StringOrNumber::String(s) => s
            .trim()
            .trim_start_matches('第')
            .trim_end_matches('章')
            .trim()
            .parse()
            .map_err(serde::de::Error::custom),
    }
}

fn flexible_opt_u32<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<serde_json::Value>::deserialize(deserializer).map(|value| match value {
        Some(serde_json::Value::Number(n)) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        Some(serde_json::Value::String(s)) => s
            .trim()
            .trim_start_matches('第')
            .trim_end_matches('章')
            .trim()
            .parse()
            .ok(),
        _ => None,
    })
}

fn flexible_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match StringOrNumber::deserialize(deserializer)? {
        StringOrNumber::String(s) => s,
        StringOrNumber::Number(n) => n.to_string(),
    })
}
