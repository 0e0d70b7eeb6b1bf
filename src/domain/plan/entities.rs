//! Plan Context - Entities

use serde::{Deserialize, Serialize};

use super::{EpisodeSpan, Stage};

/// 章节规划条目
///
/// 不变量:
/// - chapter_number 从 1 开始连续
/// - episode_start <= episode_end
/// - is_paywall 为 true 时 stage 必为 Paywall
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChapterPlanEntry {
    chapter_number: u32,
    #[serde(flatten)]
    span: EpisodeSpan,
    word_budget: u32,
    stage: Stage,
    is_paywall: bool,
}

impl ChapterPlanEntry {
    pub fn new(
        chapter_number: u32,
        span: EpisodeSpan,
        word_budget: u32,
        stage: Stage,
    ) -> Result<Self, &'static str> {
        if chapter_number == 0 {
            return Err("章节编号必须从1开始");
        }
        if word_budget == 0 {
            return Err("字数预算必须大于0");
        }
        Ok(Self {
            chapter_number,
            span,
            word_budget,
            stage,
            is_paywall: stage == Stage::Paywall,
        })
    }

    pub fn chapter_number(&self) -> u32 {
        self.chapter_number
    }

    pub fn episode_start(&self) -> u32 {
        self.span.start()
    }

    pub fn episode_end(&self) -> u32 {
        self.span.end()
    }

    pub fn span(&self) -> EpisodeSpan {
        self.span
    }

    pub fn episode_count(&self) -> u32 {
        self.span.len()
    }

    pub fn word_budget(&self) -> u32 {
        self.word_budget
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn is_paywall(&self) -> bool {
        self.is_paywall
    }
}
