//! Outline Command Handlers

use std::sync::Arc;

use crate::application::commands::{CompileOutline, DeleteOutline, PlanChapters};
use crate::application::error::ApplicationError;
use crate::application::ports::OutlineStorePort;
use crate::domain::outline::OutlineData;
use crate::domain::plan::{plan_with_config, ChapterPlan, PlannerConfig, PromptVariables};
use crate::domain::skeleton::OutlineCompiler;

// ============================================================================
// PlanChapters
// ============================================================================

/// 规划响应
#[derive(Debug, Clone)]
pub struct PlanChaptersResponse {
    pub plan: ChapterPlan,
    pub variables: PromptVariables,
    /// 提示词中嵌入的规划表格
    pub table: String,
}

/// PlanChapters Handler - 纯计算，不访问存储
pub struct PlanChaptersHandler {
    config: PlannerConfig,
}

impl PlanChaptersHandler {
    pub fn new(config: PlannerConfig) -> Self {
        Self { config }
    }

    pub fn handle(&self, command: PlanChapters) -> Result<PlanChaptersResponse, ApplicationError> {
        let plan = plan_with_config(
            command.total_episodes,
            command.episode_duration_minutes,
            &command.paywall_episodes,
            &self.config,
        )?;
        let variables = plan.prompt_variables();
        let table = plan.to_markdown_table();

        tracing::info!(
            total_episodes = command.total_episodes,
            total_chapters = variables.total_chapters,
            paywall_chapter = variables.paywall_chapter,
            total_words = variables.total_words,
            "Chapter plan computed"
        );

        Ok(PlanChaptersResponse {
            plan,
            variables,
            table,
        })
    }
}

// ============================================================================
// CompileOutline
// ============================================================================

/// 编译响应
#[derive(Debug, Clone)]
pub struct CompileOutlineResponse {
    pub thread_id: String,
    pub outline: OutlineData,
}

/// CompileOutline Handler - 编译并保存
pub struct CompileOutlineHandler {
    compiler: OutlineCompiler,
    store: Arc<dyn OutlineStorePort>,
}

impl CompileOutlineHandler {
    pub fn new(compiler: OutlineCompiler, store: Arc<dyn OutlineStorePort>) -> Self {
        Self { compiler, store }
    }

    pub async fn handle(
        &self,
        command: CompileOutline,
    ) -> Result<CompileOutlineResponse, ApplicationError> {
        let project_id = command.project_id.trim();
        if project_id.is_empty() {
            return Err(ApplicationError::validation("project_id 不能为空"));
        }
        let thread_id = match command.thread_id.as_deref().map(str::trim) {
            Some("") => return Err(ApplicationError::validation("thread_id 不能为空")),
            Some(thread_id) => thread_id.to_string(),
            None => project_id.to_string(),
        };

        let outline = self.compiler.compile(&command.markdown, project_id);
        self.store.save(&thread_id, &outline).await?;

        tracing::info!(
            thread_id = %thread_id,
            project_id = %project_id,
            total_episodes = outline.total_episodes(),
            "Outline saved"
        );

        Ok(CompileOutlineResponse { thread_id, outline })
    }
}

// ============================================================================
// DeleteOutline
// ============================================================================

/// DeleteOutline Handler
pub struct DeleteOutlineHandler {
    store: Arc<dyn OutlineStorePort>,
}

impl DeleteOutlineHandler {
    pub fn new(store: Arc<dyn OutlineStorePort>) -> Self {
        Self { store }
    }

    pub async fn handle(&self, command: DeleteOutline) -> Result<(), ApplicationError> {
        if !self.store.delete(&command.thread_id).await? {
            return Err(ApplicationError::not_found("Outline", command.thread_id));
        }

        tracing::info!(thread_id = %command.thread_id, "Outline deleted");
        Ok(())
    }
}
