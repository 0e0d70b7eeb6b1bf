//! 章节规划器
//!
//! 按总集数将剧集分配到五个叙事阶段，每个阶段消费同一个集数游标（从第 1 集开始）:
//! 1. 开篇: `max(3, round(0.15 × 总集数))` 章，前三章各 1.5 集（9000 字），其余每章 1 集（8000 字）
//! 2. 付费前发展: 游标 < 首个付费集 − 2 时，每章 2 集（10000 字）
//! 3. 付费卡点: 恰好一章，覆盖游标到最后一个付费集（12000 字）
//! 4. 付费后发展: 游标 < round(0.75 × 总集数) 时，每章 2 集（10000 字）
//! 5. 高潮: 游标 < round(0.90 × 总集数) 时，每章 1 集（8000 字）
//! 6. 结局: 剩余剧集每章最多 2 集（1 集 8000 字，2 集 10000 字）

use super::{
    ChapterPlan, ChapterPlanEntry, EpisodeSpan, PaywallEpisodes, PlanError, Stage,
    DEFAULT_PAYWALL_EPISODE,
};

/// 每分钟成片对应的文字量
pub const WORDS_PER_MINUTE: u64 = 4000;

/// 开篇前三章（每章 1.5 集）
const OPENING_LEAD_CHAPTERS: u32 = 3;
const OPENING_LEAD_WORDS: u32 = 9000;
const SINGLE_EPISODE_WORDS: u32 = 8000;
const DOUBLE_EPISODE_WORDS: u32 = 10000;
const PAYWALL_WORDS: u32 = 12000;

const OPENING_SHARE: f64 = 0.15;
const DEVELOPMENT_SHARE: f64 = 0.75;
const CLIMAX_SHARE: f64 = 0.90;

/// 规划器配置
#[derive(Debug, Clone)]
pub struct PlannerConfig {
    /// 付费卡点输入无效时使用的集数
    pub default_paywall_episode: u32,
    /// 每分钟成片对应的文字量
    pub words_per_minute: u64,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            default_paywall_episode: DEFAULT_PAYWALL_EPISODE,
            words_per_minute: WORDS_PER_MINUTE,
        }
    }
}

/// 使用默认配置生成章节规划
pub fn plan(
    total_episodes: u32,
    episode_duration_minutes: u32,
    paywall_episodes: &[u32],
) -> Result<ChapterPlan, PlanError> {
    plan_with_config(
        total_episodes,
        episode_duration_minutes,
        paywall_episodes,
        &PlannerConfig::default(),
    )
}

/// 生成章节规划
///
/// # 错误
/// - `total_episodes == 0` 或 `episode_duration_minutes == 0` 时返回 `PlanError`
///
/// 付费集数为空、为 0 或超出总集数时不报错，回退到 `config.default_paywall_episode`
pub fn plan_with_config(
    total_episodes: u32,
    episode_duration_minutes: u32,
    paywall_episodes: &[u32],
    config: &PlannerConfig,
) -> Result<ChapterPlan, PlanError> {
    if total_episodes == 0 {
        return Err(PlanError::InvalidTotalEpisodes(total_episodes));
    }
    if episode_duration_minutes == 0 {
        return Err(PlanError::InvalidEpisodeDuration(episode_duration_minutes));
    }

    let paywall = PaywallEpisodes::new(paywall_episodes, config.default_paywall_episode)
        .within(total_episodes, config.default_paywall_episode);

    let mut allocation = Allocation::new(total_episodes);

    let opening_chapters = share(total_episodes, OPENING_SHARE).max(OPENING_LEAD_CHAPTERS);
    allocation.opening(opening_chapters, paywall.first());
    allocation.fill_until(paywall.first().saturating_sub(2), 2, Stage::Development);
    allocation.paywall(paywall.last());
    allocation.fill_until(share(total_episodes, DEVELOPMENT_SHARE), 2, Stage::Development);
    allocation.fill_until(share(total_episodes, CLIMAX_SHARE), 1, Stage::Climax);
    allocation.ending();

    let entries = allocation.entries;
    let paywall_chapter_number = entries
        .iter()
        .find(|e| e.is_paywall())
        .map(|e| e.chapter_number())
        .unwrap_or_default();
    let estimated_total_words =
        u64::from(total_episodes) * u64::from(episode_duration_minutes) * config.words_per_minute;

    let plan = ChapterPlan::new(
        entries,
        paywall_chapter_number,
        estimated_total_words,
        total_episodes,
        episode_duration_minutes,
    );
    debug_assert_eq!(plan.check_coverage(), Ok(()));

    tracing::debug!(
        total_episodes = total_episodes,
        paywall = ?paywall.as_slice(),
        total_chapters = plan.total_chapters(),
        paywall_chapter = paywall_chapter_number,
        estimated_total_words = estimated_total_words,
        "Chapter plan generated"
    );

    Ok(plan)
}

/// `round(total × ratio)`，四舍五入
fn share(total: u32, ratio: f64) -> u32 {
    (f64::from(total) * ratio).round() as u32
}

/// 分配游标
struct Allocation {
    total: u32,
    cursor: u32,
    entries: Vec<ChapterPlanEntry>,
}

impl Allocation {
    fn new(total: u32) -> Self {
        Self {
            total,
            cursor: 1,
            entries: Vec::new(),
        }
    }

    /// 追加一章，覆盖从游标开始的 `episodes` 集（不超过总集数）
    fn push(&mut self, episodes: u32, word_budget: u32, stage: Stage) {
        let start = self.cursor;
        let end = (start + episodes.max(1) - 1).min(self.total);
        let chapter_number = self.entries.len() as u32 + 1;

        let entry = EpisodeSpan::new(start, end)
            .and_then(|span| ChapterPlanEntry::new(chapter_number, span, word_budget, stage));
        match entry {
            Ok(entry) => self.entries.push(entry),
            Err(reason) => {
                tracing::error!(chapter = chapter_number, start, end, reason, "Invalid plan entry");
            }
        }
        self.cursor = end + 1;
    }

    /// 开篇阶段
    ///
    /// 名义覆盖: 前三章共 5 集（2 / 1 / 2，即 ceil(1.5k)），其余每章 1 集。
    /// 名义覆盖会触及首个付费集时，压缩为单集章节，章数不超过付费集之前的剩余集数。
    fn opening(&mut self, chapters: u32, first_paywall: u32) {
        let room = first_paywall.saturating_sub(self.cursor);
        let nominal = chapters + 2;

        if nominal <= room {
            for k in 1..=chapters {
                if k <= OPENING_LEAD_CHAPTERS {
                    let end = (3 * k + 1) / 2;
                    self.push(end + 1 - self.cursor, OPENING_LEAD_WORDS, Stage::Opening);
                } else {
                    self.push(1, SINGLE_EPISODE_WORDS, Stage::Opening);
                }
            }
            return;
        }

        let compressed = chapters.min(room);
        tracing::debug!(
            chapters = chapters,
            room = room,
            compressed = compressed,
            "Opening compressed before paywall"
        );
        for k in 1..=compressed {
            let words = if k <= OPENING_LEAD_CHAPTERS {
                OPENING_LEAD_WORDS
            } else {
                SINGLE_EPISODE_WORDS
            };
            self.push(1, words, Stage::Opening);
        }
    }

    /// 游标 < `boundary` 时持续追加 `episodes` 集一章的章节
    fn fill_until(&mut self, boundary: u32, episodes: u32, stage: Stage) {
        let words = if episodes >= 2 {
            DOUBLE_EPISODE_WORDS
        } else {
            SINGLE_EPISODE_WORDS
        };
        while self.cursor < boundary && self.cursor <= self.total {
            self.push(episodes, words, stage);
        }
    }

    /// 付费卡点章: 从游标覆盖到最后一个付费集
    fn paywall(&mut self, last_paywall: u32) {
        let end = last_paywall.max(self.cursor).min(self.total);
        self.push(end + 1 - self.cursor, PAYWALL_WORDS, Stage::Paywall);
    }

    /// 结局阶段: 剩余剧集每章最多 2 集
    fn ending(&mut self) {
        while self.cursor <= self.total {
            let remaining = self.total - self.cursor + 1;
            if remaining >= 2 {
                self.push(2, DOUBLE_EPISODE_WORDS, Stage::Ending);
            } else {
                self.push(1, SINGLE_EPISODE_WORDS, Stage::Ending);
            }
        }
    }
}
