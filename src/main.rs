//! Juben - 短剧大纲编译工具
//!
//! 组装配置、日志、存储与命令/查询处理器

use clap::Parser;
use std::sync::Arc;
use uuid::Uuid;

use juben::application::ports::OutlineStorePort;
use juben::application::{
    CompileOutline, CompileOutlineHandler, DeleteOutline, DeleteOutlineHandler, GetEpisode,
    GetEpisodeHandler, GetOutline, GetOutlineHandler, ListOutlines, ListOutlinesHandler,
    PlanChapters, PlanChaptersHandler,
};
use juben::cli::{Cli, Commands};
use juben::config::{load_config_from_path, print_config, AppConfig, StoreBackend};
use juben::domain::plan::PaywallEpisodes;
use juben::domain::skeleton::OutlineCompiler;
use juben::infrastructure::memory::InMemoryOutlineStore;
use juben::infrastructure::persistence::sled::{SledOutlineStore, SledStoreConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let config = load_config_from_path(cli.config.as_deref())
        .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    init_tracing(&config);
    print_config(&config);

    match cli.command {
        Commands::Plan {
            episodes,
            duration,
            paywall,
            table,
        } => {
            let handler = PlanChaptersHandler::new(config.planner.planner_config());
            let paywall = PaywallEpisodes::parse(&paywall, config.planner.default_paywall_episode);
            let response = handler.handle(PlanChapters {
                total_episodes: episodes,
                episode_duration_minutes: duration,
                paywall_episodes: paywall.as_slice().to_vec(),
            })?;

            if table {
                print!("{}", response.table);
            } else {
                let output = serde_json::json!({
                    "variables": response.variables,
                    "plan": response.plan,
                });
                println!("{}", serde_json::to_string_pretty(&output)?);
            }
        }
        Commands::Compile {
            project_id,
            input,
            thread_id,
        } => {
            let markdown = tokio::fs::read_to_string(&input).await?;
            let project_id = project_id.unwrap_or_else(|| Uuid::new_v4().to_string());

            let compiler = OutlineCompiler::new(config.parser.character_limits());
            let handler = CompileOutlineHandler::new(compiler, open_store(&config).await?);
            let response = handler
                .handle(CompileOutline {
                    project_id,
                    thread_id,
                    markdown,
                })
                .await?;

            let output = serde_json::json!({
                "thread_id": response.thread_id,
                "project_id": response.outline.project_id(),
                "total_episodes": response.outline.total_episodes(),
                "characters": response.outline.story_settings().character_list().len(),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        Commands::Show { thread_id, episode } => {
            let store = open_store(&config).await?;
            let output = match episode {
                Some(episode_number) => serde_json::to_value(
                    GetEpisodeHandler::new(store)
                        .handle(GetEpisode {
                            thread_id,
                            episode_number,
                        })
                        .await?,
                )?,
                None => serde_json::to_value(
                    GetOutlineHandler::new(store)
                        .handle(GetOutline { thread_id })
                        .await?,
                )?,
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        Commands::List => {
            let summaries = ListOutlinesHandler::new(open_store(&config).await?)
                .handle(ListOutlines)
                .await?;
            println!("{}", serde_json::to_string_pretty(&summaries)?);
        }
        Commands::Delete { thread_id } => {
            DeleteOutlineHandler::new(open_store(&config).await?)
                .handle(DeleteOutline { thread_id })
                .await?;
        }
    }

    Ok(())
}

/// 初始化日志（输出到 stderr，stdout 只留给命令结果）
fn init_tracing(config: &AppConfig) {
    let log_filter = format!("{},juben={}", config.log.level, config.log.level);
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter));

    if config.log.json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }
}

async fn open_store(config: &AppConfig) -> anyhow::Result<Arc<dyn OutlineStorePort>> {
    match config.store.backend {
        StoreBackend::Memory => {
            tracing::warn!("Memory store selected, outlines are discarded on exit");
            Ok(InMemoryOutlineStore::new().arc())
        }
        StoreBackend::Sled => {
            // 确保数据目录存在
            if let Some(parent) = std::path::Path::new(&config.store.path).parent() {
                if !parent.as_os_str().is_empty() {
                    tokio::fs::create_dir_all(parent).await?;
                }
            }
            let store_config = SledStoreConfig {
                db_path: config.store.path.clone(),
            };
            Ok(SledOutlineStore::new(&store_config)?.arc())
        }
    }
}
