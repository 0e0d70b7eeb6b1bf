//! 命令行接口
//!
//! - `plan`: 计算章节规划，输出规划变量与章节表
//! - `compile`: 编译骨架文档并保存
//! - `show` / `list` / `delete`: 读取与管理已保存的大纲

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// 短剧大纲编译工具
#[derive(Debug, Parser)]
#[command(name = "juben", version)]
pub struct Cli {
    /// 配置文件路径（缺省搜索 config.toml / config.local.toml）
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// 计算章节规划
    Plan {
        /// 总集数
        #[arg(long)]
        episodes: u32,

        /// 单集时长（分钟）
        #[arg(long, default_value_t = 2)]
        duration: u32,

        /// 付费集数: "10-12" / "10,11,12"，缺省使用配置中的默认付费集
        #[arg(long, default_value = "")]
        paywall: String,

        /// 只输出 markdown 章节表
        #[arg(long)]
        table: bool,
    },

    /// 编译骨架文档并保存
    Compile {
        /// 项目 ID（缺省生成新的 UUID）
        #[arg(long)]
        project_id: Option<String>,

        /// 骨架 markdown 文件
        #[arg(long, short)]
        input: PathBuf,

        /// 存储键（缺省使用项目 ID）
        #[arg(long)]
        thread_id: Option<String>,
    },

    /// 输出已保存的大纲（JSON）
    Show {
        #[arg(long)]
        thread_id: String,

        /// 只输出指定集
        #[arg(long)]
        episode: Option<u32>,
    },

    /// 列出已保存的大纲
    List,

    /// 删除已保存的大纲
    Delete {
        #[arg(long)]
        thread_id: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plan() {
        let cli = Cli::try_parse_from(["juben", "plan", "--episodes", "80", "--paywall", "10-12"]).unwrap();

        match cli.command {
            Commands::Plan {
                episodes,
                duration,
                paywall,
                table,
            } => {
                assert_eq!(episodes, 80);
                assert_eq!(duration, 2);
                assert_eq!(paywall, "10-12");
                assert!(!table);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_compile_with_global_config() {
        let cli = Cli::try_parse_from([
            "juben",
            "compile",
            "--input",
            "skeleton.md",
            "--thread-id",
            "t1",
            "--config",
            "custom.toml",
        ])
        .unwrap();

        assert_eq!(cli.config, Some(PathBuf::from("custom.toml")));
        match cli.command {
            Commands::Compile {
                project_id,
                input,
                thread_id,
            } => {
                assert_eq!(project_id, None);
                assert_eq!(input, PathBuf::from("skeleton.md"));
                assert_eq!(thread_id.as_deref(), Some("t1"));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_plan_requires_episodes() {
        assert!(Cli::try_parse_from(["juben", "plan"]).is_err());
    }
}
