//! Plan Context - Value Objects

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;

/// 付费卡点缺省集数（输入缺失或无法解析时使用）
pub const DEFAULT_PAYWALL_EPISODE: u32 = 12;

/// 叙事阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// 开篇
    Opening,
    /// 发展
    Development,
    /// 付费卡点
    Paywall,
    /// 高潮
    Climax,
    /// 结局
    Ending,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Opening => "opening",
            Stage::Development => "development",
            Stage::Paywall => "paywall",
            Stage::Climax => "climax",
            Stage::Ending => "ending",
        }
    }

    /// 中文阶段名（渲染提示词表格用）
    pub fn label(&self) -> &'static str {
        match self {
            Stage::Opening => "开篇",
            Stage::Development => "发展",
            Stage::Paywall => "付费卡点",
            Stage::Climax => "高潮",
            Stage::Ending => "结局",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// 剧集区间（闭区间，集数从 1 开始）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EpisodeSpan {
    #[serde(rename = "episode_start")]
    start: u32,
    #[serde(rename = "episode_end")]
    end: u32,
}

impl EpisodeSpan {
    pub fn new(start: u32, end: u32) -> Result<Self, &'static str> {
        if start == 0 {
            return Err("集数必须从1开始");
        }
        if end < start {
            return Err("结束集数不能小于起始集数");
        }
        Ok(Self { start, end })
    }

    pub fn single(episode: u32) -> Result<Self, &'static str> {
        Self::new(episode, episode)
    }

    /// 解析剧集区间文本
    ///
    /// 支持格式: `"10-12"`、`"7"`、`"第10-12集"`、`"10～12"`、`"第10集-第12集"`
    pub fn parse(raw: &str) -> Option<Self> {
        let text = raw.trim();
        if text.is_empty() {
            return None;
        }

        match text.split_once(is_range_separator) {
            Some((start, end)) => {
                Self::new(parse_episode_number(start)?, parse_episode_number(end)?).ok()
            }
            None => Self::single(parse_episode_number(text)?).ok(),
        }
    }

    pub fn start(&self) -> u32 {
        self.start
    }

    pub fn end(&self) -> u32 {
        self.end
    }

    pub fn len(&self) -> u32 {
        self.end - self.start + 1
    }

    pub fn episodes(&self) -> RangeInclusive<u32> {
        self.start..=self.end
    }
}

impl fmt::Display for EpisodeSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start == self.end {
            write!(f, "{}", self.start)
        } else {
            write!(f, "{}-{}", self.start, self.end)
        }
    }
}

#[inline]
fn is_range_separator(ch: char) -> bool {
    matches!(ch, '-' | '~' | '～' | '–' | '—' | '至')
}

/// 解析单个集数（容忍 "第" / "集" 包裹）
fn parse_episode_number(raw: &str) -> Option<u32> {
    raw.trim()
        .trim_start_matches('第')
        .trim_end_matches('集')
        .trim()
        .parse()
        .ok()
}

/// 付费卡点集数（有序、去重、非空）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaywallEpisodes(Vec<u32>);

impl PaywallEpisodes {
    /// 从数字列表构建，空列表或全为 0 时回退到 `fallback`
    pub fn new(episodes: &[u32], fallback: u32) -> Self {
        let mut list: Vec<u32> = episodes.iter().copied().filter(|&e| e > 0).collect();
        list.sort_unstable();
        list.dedup();

        if list.is_empty() {
            tracing::warn!(fallback = fallback, "Paywall episodes empty, using default");
            return Self(vec![fallback.max(1)]);
        }
        Self(list)
    }

    /// 从原始文本解析，例如 `"10-12"`、`"10,11,12"`、`"10、11"`
    ///
    /// 任一片段无法解析即视为整体格式错误，回退到 `fallback`
    pub fn parse(raw: &str, fallback: u32) -> Self {
        let mut episodes = Vec::new();
        for token in raw
            .split(|c: char| matches!(c, ',' | '，' | '、' | ';' | '；') || c.is_whitespace())
            .filter(|t| !t.trim().is_empty())
        {
            match EpisodeSpan::parse(token) {
                Some(span) => episodes.extend(span.episodes()),
                None => {
                    tracing::warn!(
                        raw = %raw,
                        token = %token,
                        fallback = fallback,
                        "Malformed paywall episodes, using default"
                    );
                    return Self(vec![fallback.max(1)]);
                }
            }
        }
        Self::new(&episodes, fallback)
    }

    /// 裁剪到 `[1, total_episodes]`，裁剪后为空则回退到 `min(fallback, total_episodes)`
    pub fn within(&self, total_episodes: u32, fallback: u32) -> Self {
        let list: Vec<u32> = self
            .0
            .iter()
            .copied()
            .filter(|&e| e <= total_episodes)
            .collect();

        if list.is_empty() {
            let episode = fallback.clamp(1, total_episodes.max(1));
            tracing::warn!(
                requested = ?self.0,
                total_episodes = total_episodes,
                episode = episode,
                "Paywall episodes out of range, using default"
            );
            return Self(vec![episode]);
        }
        Self(list)
    }

    pub fn first(&self) -> u32 {
        self.0[0]
    }

    pub fn last(&self) -> u32 {
        self.0[self.0.len() - 1]
    }

    pub fn as_slice(&self) -> &[u32] {
        &self.0
    }
}

impl Default for PaywallEpisodes {
    fn default() -> Self {
        Self(vec![DEFAULT_PAYWALL_EPISODE])
    }
}
