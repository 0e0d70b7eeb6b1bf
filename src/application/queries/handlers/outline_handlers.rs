//! Outline Query Handlers

use serde::Serialize;
use std::sync::Arc;

use crate::application::error::ApplicationError;
use crate::application::ports::OutlineStorePort;
use crate::application::queries::{GetEpisode, GetOutline, ListOutlines};
use crate::domain::outline::{Episode, OutlineData};

// ============================================================================
// Response DTOs
// ============================================================================

/// 大纲摘要
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutlineSummary {
    pub thread_id: String,
    pub project_id: String,
    pub total_episodes: u32,
    pub total_characters: usize,
    pub updated_at: String,
}

impl OutlineSummary {
    fn new(thread_id: String, outline: &OutlineData) -> Self {
        Self {
            thread_id,
            project_id: outline.project_id().to_string(),
            total_episodes: outline.total_episodes(),
            total_characters: outline.story_settings().character_list().len(),
            updated_at: outline.updated_at().to_rfc3339(),
        }
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// GetOutline Handler
pub struct GetOutlineHandler {
    store: Arc<dyn OutlineStorePort>,
}

impl GetOutlineHandler {
    pub fn new(store: Arc<dyn OutlineStorePort>) -> Self {
        Self { store }
    }

    pub async fn handle(&self, query: GetOutline) -> Result<OutlineData, ApplicationError> {
        self.store
            .find(&query.thread_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Outline", query.thread_id))
    }
}

/// GetEpisode Handler
pub struct GetEpisodeHandler {
    store: Arc<dyn OutlineStorePort>,
}

impl GetEpisodeHandler {
    pub fn new(store: Arc<dyn OutlineStorePort>) -> Self {
        Self { store }
    }

    pub async fn handle(&self, query: GetEpisode) -> Result<Episode, ApplicationError> {
        let outline = self
            .store
            .find(&query.thread_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Outline", query.thread_id.as_str()))?;

        outline
            .episode(query.episode_number)
            .cloned()
            .ok_or_else(|| {
                ApplicationError::not_found(
                    "Episode",
                    format!("{}#{}", query.thread_id, query.episode_number),
                )
            })
    }
}

/// ListOutlines Handler
pub struct ListOutlinesHandler {
    store: Arc<dyn OutlineStorePort>,
}

impl ListOutlinesHandler {
    pub fn new(store: Arc<dyn OutlineStorePort>) -> Self {
        Self { store }
    }

    pub async fn handle(&self, _query: ListOutlines) -> Result<Vec<OutlineSummary>, ApplicationError> {
        let mut summaries = Vec::new();
        for thread_id in self.store.list_keys().await? {
            // 列举与读取之间可能被删除
            if let Some(outline) = self.store.find(&thread_id).await? {
                summaries.push(OutlineSummary::new(thread_id, &outline));
            }
        }
        Ok(summaries)
    }
}
