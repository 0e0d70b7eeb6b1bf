//! 分区切分
//!
//! 两层策略:
//! 1. `SectionIndex::scan` 单次线性扫描，把每个标题行分类一次，得到有序的
//!    `(SectionKind, start, end)` 区间，下游提取器直接按区间切片
//! 2. `segment` 按起止标记做大小写不敏感的查找，作为标题结构不规范时的回退

use regex::Regex;
use std::collections::BTreeMap;
use std::sync::LazyLock;

use crate::domain::outline::SettingSection;

/// 中文序号 / 阿拉伯序号前缀: "一、" "1." "1、" "1．"
static NUMBERED_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:(?P<cn>[一二三四五六七八九十]+)[、.．]|(?P<arabic>\d+)[.、．])\s*")
        .expect("valid regex")
});

static FIRST_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+").expect("valid regex"));

/// 无 `#` 前缀的标题行最大字符数
const MAX_BARE_HEADING_CHARS: usize = 24;

const CHINESE_ORDINALS: [&str; 10] = ["一", "二", "三", "四", "五", "六", "七", "八", "九", "十"];

/// 已知分区类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionKind {
    Metadata,
    CoreSetting,
    CharacterSystem,
    PlotArchitecture,
    AdaptationMapping,
    WritingGuidelines,
    PaywallDesign,
    TensionCurve,
    /// 无法识别的顶层标题（只作为上一分区的结束边界）
    Other,
}

impl SectionKind {
    /// 所有已知分区（按文档约定顺序）
    pub const KNOWN: [SectionKind; 8] = [
        SectionKind::Metadata,
        SectionKind::CoreSetting,
        SectionKind::CharacterSystem,
        SectionKind::PlotArchitecture,
        SectionKind::AdaptationMapping,
        SectionKind::WritingGuidelines,
        SectionKind::PaywallDesign,
        SectionKind::TensionCurve,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SectionKind::Metadata => "metadata",
            SectionKind::CoreSetting => "core_setting",
            SectionKind::CharacterSystem => "character_system",
            SectionKind::PlotArchitecture => "plot_architecture",
            SectionKind::AdaptationMapping => "adaptation_mapping",
            SectionKind::WritingGuidelines => "writing_guidelines",
            SectionKind::PaywallDesign => "paywall_design",
            SectionKind::TensionCurve => "tension_curve",
            SectionKind::Other => "other",
        }
    }

    /// 标题关键词
    pub fn keywords(&self) -> &'static [&'static str] {
        match self {
            SectionKind::Metadata => &["元数据", "基本信息", "metadata"],
            SectionKind::CoreSetting => &["核心设定", "世界观设定", "core setting"],
            SectionKind::CharacterSystem => &[
                "人物系统", "角色系统", "人物体系", "角色体系", "人物设定", "角色设定", "人物小传",
            ],
            SectionKind::PlotArchitecture => &["剧情架构", "情节架构", "故事架构", "剧情结构"],
            SectionKind::AdaptationMapping => &[
                "章节映射", "剧集映射", "分集映射", "改编映射", "章集映射", "章节-剧集",
            ],
            SectionKind::WritingGuidelines => &["写作指导", "写作指南", "创作指导", "写作要求"],
            SectionKind::PaywallDesign => &["付费卡点", "付费设计", "卡点设计"],
            SectionKind::TensionCurve => &["张力曲线", "情绪曲线", "节奏曲线"],
            SectionKind::Other => &[],
        }
    }

    /// 文档约定中的序号（1 起）
    fn ordinal(&self) -> Option<usize> {
        Self::KNOWN.iter().position(|k| k == self).map(|i| i + 1)
    }

    /// 缺失时是否需要告警（张力曲线 / 付费设计为可选分区）
    pub fn is_required(&self) -> bool {
        !matches!(
            self,
            SectionKind::PaywallDesign | SectionKind::TensionCurve | SectionKind::Other
        )
    }

    /// 按标题文本分类
    pub fn classify(title: &str) -> SectionKind {
        let lowered = title.to_lowercase();
        Self::KNOWN
            .into_iter()
            .find(|kind| kind.keywords().iter().any(|kw| lowered.contains(kw)))
            .unwrap_or(SectionKind::Other)
    }

    /// 回退切分用的起始标记，覆盖两种编号风格: "一、元数据" / "1. 元数据" / "1.元数据"
    pub fn start_markers(&self) -> Vec<String> {
        let Some(ordinal) = self.ordinal() else {
            return Vec::new();
        };
        let chinese = CHINESE_ORDINALS[ordinal - 1];
        self.keywords()
            .iter()
            .flat_map(|kw| {
                [
                    format!("{}、{}", chinese, kw),
                    format!("{}. {}", ordinal, kw),
                    format!("{}.{}", ordinal, kw),
                ]
            })
            .collect()
    }

    /// 回退切分用的结束标记: 其他所有已知分区的起始标记
    pub fn end_markers(&self) -> Vec<String> {
        Self::KNOWN
            .iter()
            .filter(|k| *k != self)
            .flat_map(|k| k.start_markers())
            .collect()
    }
}

/// 文档分区
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentSection {
    pub kind: SectionKind,
    pub title: String,
    /// 标题行起始偏移
    pub start: usize,
    /// 标题行之后的正文起始偏移
    pub body_start: usize,
    /// 分区结束偏移（不含）
    pub end: usize,
}

impl DocumentSection {
    /// 含标题行的完整片段
    pub fn markdown<'a>(&self, document: &'a str) -> &'a str {
        document[self.start..self.end].trim()
    }

    /// 不含标题行的正文
    pub fn body<'a>(&self, document: &'a str) -> &'a str {
        &document[self.body_start..self.end]
    }
}

/// 分区索引
#[derive(Debug, Clone, Default)]
pub struct SectionIndex {
    sections: Vec<DocumentSection>,
}

impl SectionIndex {
    /// 单次扫描文档，识别分区标题
    ///
    /// 边界规则:
    /// - 已知分区: 标题带编号，或为一/二级 markdown 标题
    /// - 其他标题: 一级标题、带编号的二级标题、中文编号的裸行、或 `Chapter N` 标题
    /// - 裸行与三级以下标题: 编号必须大于已出现的分区编号，且标题后不能带正文
    ///
    /// 代码块内的行不参与识别
    pub fn scan(document: &str) -> Self {
        let mut sections: Vec<DocumentSection> = Vec::new();
        let mut offset = 0;
        let mut in_fence = false;
        let mut last_ordinal = 0;

        for line in document.split_inclusive('\n') {
            let line_start = offset;
            offset += line.len();

            if line.trim_start().starts_with("```") {
                in_fence = !in_fence;
                continue;
            }
            if in_fence {
                continue;
            }

            let Some(heading) = classify_heading(line) else {
                continue;
            };
            // 编号回退的裸行是分区内部的小节或列表项
            if !heading.is_top_level() && heading.ordinal.is_some_and(|o| o <= last_ordinal) {
                continue;
            }
            if let Some(ordinal) = heading.ordinal {
                last_ordinal = last_ordinal.max(ordinal);
            }

            if let Some(previous) = sections.last_mut() {
                previous.end = line_start;
            }
            sections.push(DocumentSection {
                kind: heading.kind,
                title: heading.title,
                start: line_start,
                body_start: offset,
                end: document.len(),
            });
        }

        Self { sections }
    }

    pub fn sections(&self) -> &[DocumentSection] {
        &self.sections
    }

    /// 第一个指定类型的分区
    pub fn find(&self, kind: SectionKind) -> Option<&DocumentSection> {
        self.sections.iter().find(|s| s.kind == kind)
    }
}

/// 定位到的分区片段
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocatedSection {
    /// 含标题行
    pub markdown: String,
    /// 不含标题行
    pub body: String,
}

/// 定位分区: 先查索引，找不到再按起止标记回退
pub fn locate(document: &str, index: &SectionIndex, kind: SectionKind) -> Option<LocatedSection> {
    if let Some(section) = index.find(kind) {
        return Some(LocatedSection {
            markdown: section.markdown(document).to_string(),
            body: section.body(document).trim().to_string(),
        });
    }

    let fallback = segment(document, &kind.start_markers(), &kind.end_markers());
    if fallback.markdown.is_empty() {
        return None;
    }
    tracing::debug!(section = kind.as_str(), "Section located by marker fallback");
    // 回退片段以分区标题开头，去掉首行
    let body = fallback
        .markdown
        .split_once('\n')
        .map_or("", |(_, rest)| rest)
        .trim()
        .to_string();
    Some(LocatedSection {
        markdown: fallback.markdown,
        body,
    })
}

/// 识别出的标题行
struct Heading {
    kind: SectionKind,
    title: String,
    /// `#` 个数，裸行为 0
    level: usize,
    /// 标题编号: "三、" → 3, "2." → 2
    ordinal: Option<u32>,
}

impl Heading {
    fn is_top_level(&self) -> bool {
        (1..=2).contains(&self.level)
    }
}

/// 判断一行是否为分区标题
fn classify_heading(line: &str) -> Option<Heading> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return None;
    }

    let level = trimmed.chars().take_while(|c| *c == '#').count();
    let rest = trimmed[level..].trim();
    let rest = strip_bold(rest);

    let captures = NUMBERED_PREFIX.captures(rest);
    let chinese_numbered = captures
        .as_ref()
        .is_some_and(|c| c.name("cn").is_some());
    let numbered = captures.is_some();
    let ordinal = captures.as_ref().and_then(|c| {
        c.name("cn")
            .and_then(|m| chinese_ordinal(m.as_str()))
            .or_else(|| c.name("arabic").and_then(|m| m.as_str().parse().ok()))
    });
    let title = match &captures {
        Some(c) => rest[c.get(0).map_or(0, |m| m.end())..].trim(),
        None => rest,
    };
    let title = strip_bold(title).to_string();

    if !(1..=2).contains(&level) && !is_chapter_title(&title) {
        // 裸行标题必须足够短，避免把编号列表中的长句当成标题
        if level == 0 && title.chars().count() > MAX_BARE_HEADING_CHARS {
            return None;
        }
        // `2. **付费卡点**：第10集` 是列表项，不是标题
        if title.contains([':', '：']) || title.contains("**") {
            return None;
        }
    }

    let kind = SectionKind::classify(&title);
    let is_boundary = match kind {
        SectionKind::Other => {
            level == 1
                || (level == 2 && numbered)
                || (level == 0 && chinese_numbered)
                || (level > 0 && is_chapter_title(&title))
        }
        _ => numbered || (1..=2).contains(&level),
    };

    is_boundary.then_some(Heading {
        kind,
        title,
        level,
        ordinal,
    })
}

/// 中文序号转数字: "三" → 3, "十二" → 12, "二十" → 20
fn chinese_ordinal(text: &str) -> Option<u32> {
    let digit = |c: char| {
        CHINESE_ORDINALS[..9]
            .iter()
            .position(|d| d.starts_with(c))
            .map(|i| i as u32 + 1)
    };
    let chars: Vec<char> = text.chars().collect();
    match chars.as_slice() {
        ['十'] => Some(10),
        ['十', ones] => Some(10 + digit(*ones)?),
        [tens, '十'] => Some(digit(*tens)? * 10),
        [tens, '十', ones] => Some(digit(*tens)? * 10 + digit(*ones)?),
        [single] => digit(*single),
        _ => None,
    }
}

/// `Chapter N` 标题（分章细纲开始，结束之前的分区）
fn is_chapter_title(title: &str) -> bool {
    let lowered = title.to_ascii_lowercase();
    lowered
        .strip_prefix("chapter")
        .is_some_and(|rest| rest.trim_start().starts_with(|c: char| c.is_ascii_digit()))
}

fn strip_bold(text: &str) -> &str {
    text.trim_start_matches("**").trim_end_matches("**").trim()
}

/// 按起止标记切分分区
///
/// - 起始标记互为候选，取文档中最早出现者（大小写不敏感）
/// - 截取到起始标记之后最早出现的结束标记之前（不含该行的标题修饰）；无结束标记则截到文档末尾
/// - 未匹配返回空分区，从不报错
pub fn segment(document: &str, start_markers: &[String], end_markers: &[String]) -> SettingSection {
    let Some(start_pattern) = alternatives(start_markers) else {
        return SettingSection::default();
    };
    let Some(start) = start_pattern.find(document) else {
        return SettingSection::default();
    };

    let tail = &document[start.end()..];
    let end = alternatives(end_markers)
        .and_then(|pattern| pattern.find(tail))
        .map_or(document.len(), |m| {
            heading_line_start(document, start.end(), start.end() + m.start())
        });

    let markdown = document[start.start()..end].trim().to_string();
    let parsed = parse_key_values(&markdown);
    SettingSection { markdown, parsed }
}

/// 结束标记前若只有标题修饰（`#` `*` 空白），回退到该行行首
fn heading_line_start(document: &str, floor: usize, end: usize) -> usize {
    let line_start = document[..end].rfind('\n').map_or(0, |i| i + 1);
    let decoration_only = document[line_start..end]
        .trim_matches(|c: char| c == '#' || c == '*' || c.is_whitespace())
        .is_empty();
    if line_start >= floor && decoration_only {
        line_start
    } else {
        end
    }
}

/// 由标记列表构建大小写不敏感的候选正则
fn alternatives(markers: &[String]) -> Option<Regex> {
    let escaped: Vec<String> = markers
        .iter()
        .filter(|m| !m.is_empty())
        .map(|m| regex::escape(m))
        .collect();
    if escaped.is_empty() {
        return None;
    }

    match Regex::new(&format!("(?i){}", escaped.join("|"))) {
        Ok(pattern) => Some(pattern),
        Err(e) => {
            tracing::warn!(error = %e, "Invalid section markers");
            None
        }
    }
}

/// 将片段拆为扁平的键值表
///
/// 每行按第一个中文或英文冒号拆分，键去掉前导列表 / 强调标记（`-` `*`）；
/// 无冒号的行、标题行、表格行不进入键值表
pub fn parse_key_values(markdown: &str) -> BTreeMap<String, String> {
    let mut parsed = BTreeMap::new();

    for line in markdown.lines() {
        let line = line.trim();
        if line.starts_with('#') || line.starts_with('|') {
            continue;
        }
        let Some(index) = line.find([':', '：']) else {
            continue;
        };
        let separator_len = line[index..].chars().next().map_or(1, char::len_utf8);

        let key = line[..index]
            .trim_start_matches(|c: char| c == '-' || c == '*' || c.is_whitespace())
            .trim_end_matches(|c: char| c == '*' || c.is_whitespace());
        if key.is_empty() {
            continue;
        }
        let value = line[index + separator_len..]
            .trim()
            .trim_start_matches('*')
            .trim();

        parsed.insert(key.to_string(), value.to_string());
    }

    parsed
}

/// 构建含键值解析的分区
pub fn setting_section(markdown: &str) -> SettingSection {
    let markdown = markdown.trim();
    SettingSection {
        markdown: markdown.to_string(),
        parsed: parse_key_values(markdown),
    }
}

/// 拆分 markdown 表格行（含表头，不含 `|---|` 分隔行）
pub fn table_rows(markdown: &str) -> Vec<Vec<String>> {
    markdown
        .lines()
        .map(str::trim)
        .filter(|line| line.starts_with('|'))
        .map(|line| {
            line.trim_matches('|')
                .split('|')
                .map(|cell| strip_bold(cell.trim()).to_string())
                .collect::<Vec<_>>()
        })
        .filter(|cells| {
            !cells.iter().all(|cell| {
                cell.chars()
                    .all(|c| c == '-' || c == ':' || c.is_whitespace())
            })
        })
        .collect()
}

/// 单元格中的第一个整数: "第3章" → 3, "8/10" → 8
pub fn cell_number(cell: &str) -> Option<u32> {
    FIRST_NUMBER.find(cell)?.as_str().parse().ok()
}

/// 表头中第一个包含任一关键词的列
pub fn header_column(header: &[String], keywords: &[&str]) -> Option<usize> {
    header.iter().position(|cell| {
        let lowered = cell.to_lowercase();
        keywords.iter().any(|kw| lowered.contains(kw))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = "# 《逆袭》大纲\n\n## 一、元数据\n- **剧名**：逆袭人生\n- 类型: 都市\n\n## 二、核心设定\n世界观：现代都市\n\n## 3. 人物系统\n### **林凡**\n男主角\n\n## 七、分章细纲\n### Chapter 1: 开端\n";

    fn markers(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_scan_classifies_headings_once() {
        let index = SectionIndex::scan(DOC);
        let kinds: Vec<SectionKind> = index.sections().iter().map(|s| s.kind).collect();

        assert_eq!(
            kinds,
            vec![
                SectionKind::Other,
                SectionKind::Metadata,
                SectionKind::CoreSetting,
                SectionKind::CharacterSystem,
                SectionKind::Other,
                SectionKind::Other,
            ]
        );
    }

    #[test]
    fn test_scan_section_spans() {
        let index = SectionIndex::scan(DOC);
        let metadata = index.find(SectionKind::Metadata).unwrap();

        assert_eq!(metadata.title, "元数据");
        assert!(metadata.markdown(DOC).starts_with("## 一、元数据"));
        assert!(metadata.body(DOC).contains("逆袭人生"));
        assert!(!metadata.body(DOC).contains("核心设定"));

        let characters = index.find(SectionKind::CharacterSystem).unwrap();
        assert!(characters.body(DOC).contains("### **林凡**"));
        assert!(!characters.body(DOC).contains("Chapter 1"));
    }

    #[test]
    fn test_scan_accepts_bare_chinese_numbered_lines() {
        let doc = "一、元数据\n剧名：测试\n二、核心设定\n主题：复仇\n";
        let index = SectionIndex::scan(doc);

        assert_eq!(index.sections().len(), 2);
        assert_eq!(index.find(SectionKind::CoreSetting).unwrap().body(doc), "主题：复仇\n");
    }

    #[test]
    fn test_chapter_heading_closes_previous_section() {
        let doc = "## 三、人物系统\n### 林凡\n外卖员\n### Chapter 1: 开端\n正文\n";
        let index = SectionIndex::scan(doc);
        let characters = index.find(SectionKind::CharacterSystem).unwrap();

        assert_eq!(characters.body(doc), "### 林凡\n外卖员\n");
        assert_eq!(index.sections().len(), 2);
    }

    #[test]
    fn test_scan_ignores_numbered_list_items_and_code_blocks() {
        let doc = "## 一、元数据\n1. **开场**：车祸\n2. 付费卡点设置在第十集，女主身份当众揭晓，观众情绪被彻底拉满\n```json\n# 一、核心设定\n```\n";
        let index = SectionIndex::scan(doc);

        assert_eq!(index.sections().len(), 1);
        assert_eq!(index.sections()[0].end, doc.len());
    }

    #[test]
    fn test_scan_ignores_labelled_list_items() {
        let doc = "## 四、剧情架构\n1. **开篇钩子**：雨夜羞辱\n2. **付费卡点**：第10-12集身份揭晓\n3. **高潮**：商战对决\n\n## 六、写作指导\n节奏：快\n";
        let index = SectionIndex::scan(doc);

        let plot = locate(doc, &index, SectionKind::PlotArchitecture).unwrap();
        assert!(plot.body.contains("付费卡点"));
        assert!(plot.body.ends_with("3. **高潮**：商战对决"));
        assert!(locate(doc, &index, SectionKind::PaywallDesign).is_none());
        assert_eq!(index.sections().len(), 2);
    }

    #[test]
    fn test_scan_ignores_subgroup_numbering_inside_section() {
        let doc = "## 三、人物系统\n一、主要人物\n### 林凡\n二、配角\n### 王浩\n### 1. 人物设定\n\n## 四、剧情架构\n三幕式\n五、附录\n";
        let index = SectionIndex::scan(doc);
        let kinds: Vec<SectionKind> = index.sections().iter().map(|s| s.kind).collect();

        assert_eq!(
            kinds,
            vec![
                SectionKind::CharacterSystem,
                SectionKind::PlotArchitecture,
                SectionKind::Other,
            ]
        );
        let characters = index.find(SectionKind::CharacterSystem).unwrap();
        assert!(characters.body(doc).contains("### 王浩"));
    }

    #[test]
    fn test_chinese_ordinal() {
        assert_eq!(chinese_ordinal("三"), Some(3));
        assert_eq!(chinese_ordinal("十"), Some(10));
        assert_eq!(chinese_ordinal("十二"), Some(12));
        assert_eq!(chinese_ordinal("二十一"), Some(21));
        assert_eq!(chinese_ordinal("十十"), None);
    }

    #[test]
    fn test_segment_to_end_without_end_marker() {
        let result = segment(DOC, &markers(&["二、核心设定"]), &[]);
        let start = DOC.find("二、核心设定").unwrap();

        assert_eq!(result.markdown, DOC[start..].trim());
    }

    #[test]
    fn test_segment_stops_before_end_marker() {
        let result = segment(DOC, &markers(&["一、元数据"]), &markers(&["二、核心设定"]));

        assert!(result.markdown.starts_with("一、元数据"));
        assert!(result.markdown.ends_with("类型: 都市"));
        assert_eq!(result.parsed.get("剧名").map(String::as_str), Some("逆袭人生"));
        assert_eq!(result.parsed.get("类型").map(String::as_str), Some("都市"));
    }

    #[test]
    fn test_segment_missing_markers_returns_empty() {
        let result = segment(DOC, &markers(&["九、不存在"]), &markers(&["二、核心设定"]));

        assert_eq!(result.markdown, "");
        assert!(result.parsed.is_empty());

        let result = segment(DOC, &[], &[]);
        assert!(result.is_empty());
    }

    #[test]
    fn test_segment_is_case_insensitive() {
        let doc = "intro\nMETADATA\nname: demo\nCore Setting\ntheme: x";
        let result = segment(doc, &markers(&["metadata"]), &markers(&["core setting"]));

        assert_eq!(result.markdown, "METADATA\nname: demo");
        assert_eq!(result.parsed.get("name").map(String::as_str), Some("demo"));
    }

    #[test]
    fn test_segment_alternative_start_markers() {
        let doc = "前言\n1. 元数据\n剧名：甲\n";
        let kind = SectionKind::Metadata;
        let result = segment(doc, &kind.start_markers(), &kind.end_markers());

        assert_eq!(result.parsed.get("剧名").map(String::as_str), Some("甲"));
    }

    #[test]
    fn test_parse_key_values() {
        let parsed = parse_key_values(
            "## 一、元数据\n- **剧名**：逆袭\n* 集数: 80\n**时长：** 2分钟\n没有冒号的行\n| a: b |\n：空键\n",
        );

        assert_eq!(parsed.len(), 3);
        assert_eq!(parsed["剧名"], "逆袭");
        assert_eq!(parsed["集数"], "80");
        assert_eq!(parsed["时长"], "2分钟");
    }

    #[test]
    fn test_parse_key_values_splits_on_first_colon() {
        let parsed = parse_key_values("链接: http://example.com");
        assert_eq!(parsed["链接"], "http://example.com");
    }

    #[test]
    fn test_locate_prefers_index() {
        let index = SectionIndex::scan(DOC);
        let located = locate(DOC, &index, SectionKind::CoreSetting).unwrap();

        assert_eq!(located.markdown, "## 二、核心设定\n世界观：现代都市");
        assert_eq!(located.body, "世界观：现代都市");
        assert!(locate(DOC, &index, SectionKind::TensionCurve).is_none());
    }

    #[test]
    fn test_locate_falls_back_to_markers() {
        // 行内标记不构成标题，只能靠回退切分
        let doc = "见下文 一、元数据 剧名：甲\n类型：乙\n";
        let index = SectionIndex::scan(doc);
        let located = locate(doc, &index, SectionKind::Metadata).unwrap();

        assert!(index.sections().is_empty());
        assert_eq!(located.markdown, "一、元数据 剧名：甲\n类型：乙");
        assert_eq!(located.body, "类型：乙");
    }

    #[test]
    fn test_table_rows() {
        let rows = table_rows("说明\n| 章节 | 集数 |\n|:---|---:|\n| **第1章** | 1-3 |\n不是表格");

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], vec!["章节", "集数"]);
        assert_eq!(rows[1], vec!["第1章", "1-3"]);
    }

    #[test]
    fn test_cell_number() {
        assert_eq!(cell_number("第3章"), Some(3));
        assert_eq!(cell_number("8/10"), Some(8));
        assert_eq!(cell_number("无"), None);
    }

    #[test]
    fn test_classify() {
        assert_eq!(SectionKind::classify("人物系统"), SectionKind::CharacterSystem);
        assert_eq!(SectionKind::classify("章节-剧集映射表"), SectionKind::AdaptationMapping);
        assert_eq!(SectionKind::classify("Metadata"), SectionKind::Metadata);
        assert_eq!(SectionKind::classify("分章细纲"), SectionKind::Other);
    }

    #[test]
    fn test_start_markers_cover_both_numbering_styles() {
        let markers = SectionKind::CharacterSystem.start_markers();

        assert!(markers.contains(&"三、人物系统".to_string()));
        assert!(markers.contains(&"3. 人物系统".to_string()));
        assert!(SectionKind::Other.start_markers().is_empty());
    }
}
