//! Outline Commands

/// 章节规划命令
#[derive(Debug, Clone)]
pub struct PlanChapters {
    pub total_episodes: u32,
    pub episode_duration_minutes: u32,
    /// 付费集数（为空时回退到默认付费集）
    pub paywall_episodes: Vec<u32>,
}

/// 编译骨架文档命令
#[derive(Debug, Clone)]
pub struct CompileOutline {
    pub project_id: String,
    /// 存储键，缺省使用 project_id
    pub thread_id: Option<String>,
    pub markdown: String,
}

/// 删除大纲命令
#[derive(Debug, Clone)]
pub struct DeleteOutline {
    pub thread_id: String,
}
