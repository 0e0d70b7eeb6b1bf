//! 章节详情提取
//!
//! 章节正文由 `### Chapter N: 标题` 标题标记，正文内包含摘要和场景清单

use regex::Regex;
use std::sync::LazyLock;

use crate::domain::outline::Scene;

static CHAPTER_HEADING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?im)^[ \t]*###[ \t]*chapter[ \t]*(?P<number>\d+)[ \t]*[:：]?[ \t]*(?P<title>[^\n]*?)[ \t]*\r?$")
        .expect("valid regex")
});

/// `**摘要**: ...` / `**本章摘要：**...` 标签
static SUMMARY_LABEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^[ \t]*(?:[-*][ \t]*)?\*\*(?:本章)?摘要[ \t]*[:：]?[ \t]*\*\*[ \t]*[:：]?")
        .expect("valid regex")
});

/// `1. **标题**: 描述`
static SCENE_ITEM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(?P<number>\d+)[.、．]\s*\*\*(?P<title>[^*\n]+)\*\*\s*[:：]?\s*(?P<content>.*)$")
        .expect("valid regex")
});

const SCENE_LIST_LABEL: &str = "场景清单";

/// 单个章节的提取结果
#[derive(Debug, Clone, PartialEq)]
pub struct ChapterDetail {
    pub chapter_number: u32,
    pub title: String,
    /// 未找到摘要标签时为 None
    pub summary: Option<String>,
    pub content: String,
    pub scenes: Vec<Scene>,
    /// 文档中是否存在该章节标题
    pub found: bool,
}

impl ChapterDetail {
    fn missing(chapter_number: u32) -> Self {
        Self {
            chapter_number,
            title: format!("第{}章", chapter_number),
            summary: None,
            content: String::new(),
            scenes: Vec::new(),
            found: false,
        }
    }
}

/// 章节标题位置
#[derive(Debug, Clone)]
struct ChapterHeading {
    number: u32,
    title: String,
    start: usize,
    body_start: usize,
}

/// 章节标题索引（单次扫描，多次查询）
#[derive(Debug, Clone, Default)]
pub struct ChapterIndex {
    headings: Vec<ChapterHeading>,
}

impl ChapterIndex {
    pub fn scan(document: &str) -> Self {
        let headings = CHAPTER_HEADING
            .captures_iter(document)
            .filter_map(|captures| {
                let whole = captures.get(0)?;
                let number = captures.name("number")?.as_str().parse().ok()?;
                let title = captures.name("title").map_or("", |m| m.as_str());
                Some(ChapterHeading {
                    number,
                    title: title.trim().to_string(),
                    start: whole.start(),
                    body_start: whole.end(),
                })
            })
            .collect();

        Self { headings }
    }

    pub fn len(&self) -> usize {
        self.headings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.headings.is_empty()
    }

    /// 提取指定章节
    ///
    /// 正文从标题之后开始，到 `### Chapter N+1` 之前结束；
    /// 没有 N+1 时到下一个章节标题，再没有则到文末
    pub fn extract(&self, document: &str, chapter_number: u32) -> ChapterDetail {
        let Some(position) = self.headings.iter().position(|h| h.number == chapter_number) else {
            tracing::warn!(chapter = chapter_number, "Chapter heading not found");
            return ChapterDetail::missing(chapter_number);
        };
        let heading = &self.headings[position];
        let following = &self.headings[position + 1..];

        let end = following
            .iter()
            .find(|h| h.number == chapter_number + 1)
            .or_else(|| following.first())
            .map_or(document.len(), |h| h.start);
        let body = document[heading.body_start..end].trim();

        let title = if heading.title.is_empty() {
            format!("第{}章", chapter_number)
        } else {
            heading.title.clone()
        };

        ChapterDetail {
            chapter_number,
            title,
            summary: extract_summary(body),
            content: body.to_string(),
            scenes: extract_scenes(body, chapter_number),
            found: true,
        }
    }
}

/// 在完整文档中提取单个章节
pub fn extract_chapter(document: &str, chapter_number: u32) -> ChapterDetail {
    ChapterIndex::scan(document).extract(document, chapter_number)
}

/// 摘要从标签之后开始（标签行为空时跳过空行），到下一个粗体标签行、标题、空行、代码块或文末为止
fn extract_summary(body: &str) -> Option<String> {
    let label = SUMMARY_LABEL.find(body)?;
    let text = &body[label.end()..];
    let text = match text.split_once('\n') {
        Some((rest_of_label, following)) if rest_of_label.trim().is_empty() => following.trim_start(),
        _ => text,
    };

    let summary = text
        .lines()
        .map(str::trim)
        .take_while(|line| !ends_summary(line))
        .collect::<Vec<_>>()
        .join("\n");
    (!summary.is_empty()).then_some(summary)
}

fn ends_summary(line: &str) -> bool {
    line.is_empty()
        || line.starts_with('#')
        || line.starts_with("```")
        || line.starts_with("**")
        || line
            .strip_prefix(['-', '*'])
            .is_some_and(|rest| rest.trim_start().starts_with("**"))
}

/// 场景清单: 标签行之后的编号列表，遇到标题或其他粗体标签结束
fn extract_scenes(body: &str, chapter_number: u32) -> Vec<Scene> {
    let Some(label) = body.find(SCENE_LIST_LABEL) else {
        return Vec::new();
    };
    let list_start = body[label..].find('\n').map_or(body.len(), |i| label + i + 1);

    let mut scenes: Vec<Scene> = Vec::new();
    for line in body[list_start..].lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if let Some(captures) = SCENE_ITEM.captures(line) {
            let Ok(number) = captures["number"].parse::<u32>() else {
                tracing::warn!(chapter = chapter_number, line = %trimmed, "Scene number out of range");
                continue;
            };
            scenes.push(Scene::new(
                chapter_number,
                number,
                captures["title"].trim().to_string(),
                captures["content"].trim().to_string(),
            ));
            continue;
        }
        if is_list_terminator(trimmed) {
            break;
        }
        // 续行归入上一场景
        if let Some(last) = scenes.last_mut() {
            if !last.content.is_empty() {
                last.content.push('\n');
            }
            last.content.push_str(trimmed);
        }
    }

    scenes
}

fn is_list_terminator(line: &str) -> bool {
    line.starts_with('#')
        || line.starts_with("**")
        || line.starts_with("- **")
        || line.starts_with("* **")
}
