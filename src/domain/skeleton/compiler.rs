//! OutlineCompiler - 骨架文档编译门面
//!
//! 分区切分 + JSON 元数据 + 人物 + 剧集组装，输出 OutlineData。
//! 任何输入都返回结构合法的 OutlineData，提取质量由调用方通过空值检查判断

use chrono::{DateTime, Utc};

use super::assembler::assemble;
use super::characters::{characters_in_section, CharacterLimits};
use super::json_metadata::extract_metadata;
use super::mapping_table::parse_chapter_map;
use super::sections::{locate, parse_key_values, setting_section, LocatedSection, SectionIndex, SectionKind};
use super::tension_curve::parse_tension_curve;
use crate::domain::outline::{
    CharacterSection, OutlineBuilder, OutlineData, SettingSection, StorySettings,
    TensionCurveSection,
};

/// 大纲编译器（无状态，可跨请求共享）
#[derive(Debug, Clone, Default)]
pub struct OutlineCompiler {
    limits: CharacterLimits,
}

impl OutlineCompiler {
    pub fn new(limits: CharacterLimits) -> Self {
        Self { limits }
    }

    pub fn compile(&self, document: &str, project_id: &str) -> OutlineData {
        self.compile_at(document, project_id, Utc::now())
    }

    /// 以指定时间戳编译（便于得到确定性输出）
    pub fn compile_at(&self, document: &str, project_id: &str, now: DateTime<Utc>) -> OutlineData {
        let index = SectionIndex::scan(document);
        let story_settings = self.story_settings(document, &index);

        let mut metadata = extract_metadata(document);
        if metadata.chapter_map.is_empty() {
            if let Some(mapping) = &story_settings.adaptation_mapping {
                metadata.chapter_map = parse_chapter_map(&mapping.markdown);
                if !metadata.chapter_map.is_empty() {
                    tracing::info!(
                        entries = metadata.chapter_map.len(),
                        "Chapter map recovered from mapping table"
                    );
                }
            }
        }
        if metadata.chapter_map.is_empty() {
            tracing::warn!(project_id = %project_id, "No chapter map found, outline has no episodes");
        }

        let episodes = assemble(
            &metadata.chapter_map,
            document,
            project_id,
            metadata.paywall_info.as_ref(),
        );

        let outline = OutlineBuilder::new(project_id)
            .content(document)
            .story_settings(story_settings)
            .metadata(metadata)
            .episodes(episodes)
            .created_at(now)
            .build();

        tracing::info!(
            project_id = %project_id,
            episodes = outline.total_episodes(),
            characters = outline.story_settings().character_list().len(),
            "Outline compiled"
        );

        outline
    }

    fn story_settings(&self, document: &str, index: &SectionIndex) -> StorySettings {
        let find = |kind: SectionKind| -> Option<LocatedSection> {
            let located = locate(document, index, kind);
            if located.is_none() {
                if kind.is_required() {
                    tracing::warn!(section = kind.as_str(), "Section not found");
                } else {
                    tracing::debug!(section = kind.as_str(), "Optional section not found");
                }
            }
            located
        };
        let setting = |kind: SectionKind| -> Option<SettingSection> {
            find(kind).map(|s| setting_section(&s.markdown))
        };

        StorySettings {
            metadata: setting(SectionKind::Metadata),
            core_setting: setting(SectionKind::CoreSetting),
            characters: find(SectionKind::CharacterSystem).map(|s| CharacterSection {
                parsed: parse_key_values(&s.markdown),
                characters: characters_in_section(&s.body, &self.limits),
                markdown: s.markdown,
            }),
            plot_architecture: setting(SectionKind::PlotArchitecture),
            adaptation_mapping: setting(SectionKind::AdaptationMapping),
            writing_guidelines: setting(SectionKind::WritingGuidelines),
            paywall_design: setting(SectionKind::PaywallDesign),
            tension_curve: find(SectionKind::TensionCurve).map(|s| TensionCurveSection {
                parsed: parse_key_values(&s.markdown),
                points: parse_tension_curve(&s.body),
                markdown: s.markdown,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SKELETON: &str = r#"# 《外卖逆袭》剧本骨架

## 一、元数据
- **剧名**：外卖逆袭
- **总集数**：4
- **单集时长**：2分钟

## 二、核心设定
- 世界观：现代都市
- 核心冲突：身份反转

## 三、人物系统
### **林凡**（男主角）
外卖员，隐藏身份是财阀继承人。

### **苏晴**
女主角，公司总裁。

## 四、剧情架构
第一幕：落魄
第二幕：反击

## 五、章节-剧集映射
| 章节 | 剧集 |
|---|---|
| 第1章 | 1-3 |
| 第2章 | 4 |

## 六、写作指导
- 风格：快节奏

## 七、张力曲线
| 章节 | 张力 |
|---|---|
| 第1章 | 5 |
| 第2章 | 9 |

## 八、分章细纲

### Chapter 1: 雨夜送餐
**摘要**：林凡被羞辱。
**场景清单**：
1. **街头**：暴雨
2. **豪宅**：泼水

### Chapter 2: 身份揭晓
**摘要**：律师登门。

```json
{"chapter_map": [{"chapter": 1, "episodes": "1-3"}, {"chapter": 2, "episodes": "4"}], "paywall_info": {"chapter": 2}}
```
"#;

    #[test]
    fn test_compile_full_document() {
        let outline = OutlineCompiler::default().compile(SKELETON, "p1");

        assert_eq!(outline.project_id(), "p1");
        assert_eq!(outline.total_episodes(), 4);
        assert_eq!(outline.check_invariants(), Ok(()));

        let episode = outline.episode(2).unwrap();
        assert_eq!(episode.title, "雨夜送餐");
        assert_eq!(episode.summary, "林凡被羞辱。");
        assert_eq!(episode.scenes.len(), 2);
        assert!(!episode.is_paid_wall);
        assert!(outline.episode(4).unwrap().is_paid_wall);

        let settings = outline.story_settings();
        let metadata = settings.metadata.as_ref().unwrap();
        assert_eq!(metadata.parsed["剧名"], "外卖逆袭");
        assert_eq!(settings.core_setting.as_ref().unwrap().parsed["核心冲突"], "身份反转");

        let names: Vec<&str> = settings.character_list().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["林凡", "苏晴"]);
        assert_eq!(settings.character_list()[1].description, "女主角，公司总裁。");

        assert!(settings.plot_architecture.is_some());
        assert!(settings.writing_guidelines.is_some());
        assert!(settings.paywall_design.is_none());
        assert_eq!(settings.tension_points().len(), 2);
        assert_eq!(settings.tension_points()[1].tension, 9);

        assert_eq!(outline.metadata().paywall_info.as_ref().unwrap().chapter, Some(2));
        assert_eq!(outline.metadata().raw_markdown, SKELETON);
        assert_eq!(outline.content(), SKELETON);
    }

    #[test]
    fn test_chapter_map_recovered_from_table() {
        let document = SKELETON.split("```json").next().unwrap();
        let outline = OutlineCompiler::default().compile(document, "p1");

        assert_eq!(outline.metadata().chapter_map.len(), 2);
        assert_eq!(outline.total_episodes(), 4);
        // 没有 paywall_info 时不标记付费集
        assert!(outline.episodes().iter().all(|e| !e.is_paid_wall));
    }

    #[test]
    fn test_empty_document_yields_valid_outline() {
        let now = Utc::now();
        let outline = OutlineCompiler::default().compile_at("", "p1", now);

        assert_eq!(outline.total_episodes(), 0);
        assert!(outline.episodes().is_empty());
        assert_eq!(outline.story_settings(), &StorySettings::default());
        assert!(outline.metadata().chapter_map.is_empty());
        assert_eq!(outline.created_at(), now);
        assert_eq!(outline.check_invariants(), Ok(()));
    }

    #[test]
    fn test_garbage_document_never_fails() {
        let garbage = "```json\n{{{ \"chapter_map\": \n### Chapter x\n**摘要**\n|||\n三、人物系统";
        let outline = OutlineCompiler::default().compile(garbage, "p1");

        assert!(outline.episodes().is_empty());
        assert!(outline.story_settings().character_list().is_empty());
    }

    #[test]
    fn test_character_limits_applied() {
        let body: String = (1..=5).map(|i| format!("### 角色{}\n描述\n", i)).collect();
        let document = format!("## 三、人物系统\n{}", body);
        let compiler = OutlineCompiler::new(CharacterLimits {
            max_characters: 2,
            ..Default::default()
        });

        let outline = compiler.compile(&document, "p1");
        assert_eq!(outline.story_settings().character_list().len(), 2);
    }
}
