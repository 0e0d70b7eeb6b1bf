//! Plan Context - Aggregate Root

use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

use super::{ChapterPlanEntry, PlanError, Stage};

/// 章节规划聚合根
///
/// 不变量:
/// - 每次规划请求计算一次，之后不可变
/// - 各章剧集区间恰好划分 `[1, total_episodes]`
/// - 恰好一章 `is_paywall = true`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChapterPlan {
    entries: Vec<ChapterPlanEntry>,
    paywall_chapter_number: u32,
    estimated_total_words: u64,
    total_episodes: u32,
    episode_duration_minutes: u32,
}

/// 提示词模板引用的规划变量
///
/// 字段名被外部提示词模板按字面引用，不可改名
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptVariables {
    pub total_chapters: u32,
    pub paywall_chapter: u32,
    pub total_words: u64,
    /// 最后一个开篇章（开篇被付费卡点挤占为空时为 0）
    pub opening_end: u32,
    pub midpoint_chapter: u32,
    /// 第一个高潮章；无高潮章时依次回退到第一个结局章、最后一章
    pub climax_chapter: u32,
    /// 付费章在全部章节中的位置百分比（0-100）
    pub paywall_position: u32,
}

impl ChapterPlan {
    pub(super) fn new(
        entries: Vec<ChapterPlanEntry>,
        paywall_chapter_number: u32,
        estimated_total_words: u64,
        total_episodes: u32,
        episode_duration_minutes: u32,
    ) -> Self {
        Self {
            entries,
            paywall_chapter_number,
            estimated_total_words,
            total_episodes,
            episode_duration_minutes,
        }
    }

    // Getters
    pub fn entries(&self) -> &[ChapterPlanEntry] {
        &self.entries
    }

    pub fn paywall_chapter_number(&self) -> u32 {
        self.paywall_chapter_number
    }

    pub fn estimated_total_words(&self) -> u64 {
        self.estimated_total_words
    }

    pub fn total_episodes(&self) -> u32 {
        self.total_episodes
    }

    pub fn total_chapters(&self) -> u32 {
        self.entries.len() as u32
    }

    pub fn chapter(&self, chapter_number: u32) -> Option<&ChapterPlanEntry> {
        self.entries
            .iter()
            .find(|e| e.chapter_number() == chapter_number)
    }

    pub fn paywall_entry(&self) -> Option<&ChapterPlanEntry> {
        self.chapter(self.paywall_chapter_number)
    }

    /// 各章字数预算之和（与 `estimated_total_words` 独立，两者可以不同）
    pub fn budgeted_total_words(&self) -> u64 {
        self.entries.iter().map(|e| u64::from(e.word_budget())).sum()
    }

    /// 校验章节编号连续、剧集区间无缝覆盖 `[1, total_episodes]`、付费章唯一
    pub fn check_coverage(&self) -> Result<(), PlanError> {
        let mut expected_episode = 1;
        for (index, entry) in self.entries.iter().enumerate() {
            let expected_chapter = index as u32 + 1;
            if entry.chapter_number() != expected_chapter {
                return Err(PlanError::ChapterNumberGap {
                    expected: expected_chapter,
                    actual: entry.chapter_number(),
                });
            }
            if entry.episode_start() != expected_episode {
                return Err(PlanError::CoverageGap {
                    chapter: entry.chapter_number(),
                    expected: expected_episode,
                    actual: entry.episode_start(),
                });
            }
            expected_episode = entry.episode_end() + 1;
        }

        let covered = expected_episode - 1;
        if covered != self.total_episodes {
            return Err(PlanError::IncompleteCoverage {
                covered,
                total: self.total_episodes,
            });
        }

        let paywall_count = self.entries.iter().filter(|e| e.is_paywall()).count();
        if paywall_count != 1 {
            return Err(PlanError::PaywallCount(paywall_count));
        }

        Ok(())
    }

    /// 计算提示词变量
    pub fn prompt_variables(&self) -> PromptVariables {
        let total_chapters = self.total_chapters();
        let first_of = |stage: Stage| {
            self.entries
                .iter()
                .find(|e| e.stage() == stage)
                .map(|e| e.chapter_number())
        };

        let opening_end = self
            .entries
            .iter()
            .filter(|e| e.stage() == Stage::Opening)
            .map(|e| e.chapter_number())
            .max()
            .unwrap_or(0);
        let climax_chapter = first_of(Stage::Climax)
            .or_else(|| first_of(Stage::Ending))
            .unwrap_or(total_chapters);
        let paywall_position = if total_chapters == 0 {
            0
        } else {
            (self.paywall_chapter_number * 100 + total_chapters / 2) / total_chapters
        };

        PromptVariables {
            total_chapters,
            paywall_chapter: self.paywall_chapter_number,
            total_words: self.estimated_total_words,
            opening_end,
            midpoint_chapter: (total_chapters + 1) / 2,
            climax_chapter,
            paywall_position,
        }
    }

    /// 渲染为提示词中嵌入的章节映射表
    pub fn to_markdown_table(&self) -> String {
        let mut table = String::from("| 章节 | 集数 | 阶段 | 字数 |\n|------|------|------|------|\n");
        for entry in &self.entries {
            let _ = writeln!(
                table,
                "| 第{}章 | {} | {} | {} |",
                entry.chapter_number(),
                entry.span(),
                entry.stage().label(),
                entry.word_budget()
            );
        }
        table
    }
}
