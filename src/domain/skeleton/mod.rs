//! Skeleton Context - 骨架文档解析
//!
//! 职责:
//! - 把模型输出的半结构化 markdown 骨架编译为 OutlineData
//! - 分区切分、内嵌 JSON、人物列表、章节详情、映射表与张力曲线
//!
//! 所有解析组件对输入完全容错: 异常输入记录告警并返回默认值，从不报错

mod assembler;
mod chapter_detail;
mod characters;
mod compiler;
mod json_metadata;
mod mapping_table;
mod sections;
mod tension_curve;

pub use assembler::assemble;
pub use chapter_detail::{extract_chapter, ChapterDetail, ChapterIndex};
pub use characters::{characters_in_section, extract_characters, CharacterLimits};
pub use compiler::OutlineCompiler;
pub use json_metadata::extract_metadata;
pub use mapping_table::parse_chapter_map;
pub use sections::{
    locate, parse_key_values, segment, setting_section, DocumentSection, LocatedSection,
    SectionIndex, SectionKind,
};
pub use tension_curve::parse_tension_curve;
