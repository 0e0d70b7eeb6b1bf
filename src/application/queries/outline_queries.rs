//! Outline Queries

/// 获取完整大纲
#[derive(Debug, Clone)]
pub struct GetOutline {
    pub thread_id: String,
}

/// 获取单集
#[derive(Debug, Clone)]
pub struct GetEpisode {
    pub thread_id: String,
    pub episode_number: u32,
}

/// 列出所有已保存的大纲
#[derive(Debug, Clone)]
pub struct ListOutlines;
