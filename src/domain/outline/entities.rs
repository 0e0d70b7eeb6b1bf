//! Outline Context - Entities

use serde::{Deserialize, Serialize};

use super::ReviewStatus;

/// 场景
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub scene_id: String,
    pub scene_number: u32,
    pub title: String,
    pub content: String,
    /// 分镜（大纲阶段为空）
    #[serde(default)]
    pub shots: Vec<serde_json::Value>,
}

impl Scene {
    pub fn new(chapter_number: u32, scene_number: u32, title: String, content: String) -> Self {
        Self {
            scene_id: format!("scene_ch{}_{}", chapter_number, scene_number),
            scene_number,
            title,
            content,
            shots: Vec::new(),
        }
    }
}

/// 角色
///
/// 不变量（由提取器保证）:
/// - name 不超过 50 字符
/// - description 不超过 1000 字符
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    pub name: String,
    pub description: String,
    pub markdown: String,
}

/// 剧集 - 对外发布的最小单位
///
/// 不变量:
/// - episode_number 在 OutlineData 内唯一
/// - 同一章节映射出的多集共享章节详情
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Episode {
    pub episode_id: String,
    pub episode_number: u32,
    pub title: String,
    pub summary: String,
    pub content: String,
    pub scenes: Vec<Scene>,
    pub review_status: ReviewStatus,
    pub is_paid_wall: bool,
    pub chapter_number: u32,
}

impl Episode {
    pub fn episode_id(project_id: &str, episode_number: u32) -> String {
        format!("ep_{}_{}", project_id, episode_number)
    }
}

/// 张力曲线点
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TensionCurvePoint {
    pub chapter: u32,
    pub tension: u32,
}
