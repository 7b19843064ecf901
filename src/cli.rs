//! elysius 的命令行接口
//!
//! 本模块提供了命令行参数解析和验证功能，
//! 并负责把参数转换为库的查找/遍历选项。

use std::path::PathBuf;

use clap::builder::NonEmptyStringValueParser;
use clap::{Args, Parser, Subcommand};

use crate::errors::{FindError, FindResult};
use crate::find::{FindOptions, Predicate};
use crate::walker::{ExcludeSet, WalkEntry, WalkOptions};

/// 通过遍历文件系统查找文件和目录
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// 启用调试日志
    #[arg(short, long, global = true)]
    pub debug: bool,

    /// 使用异步（tokio）实现
    #[arg(long = "async", global = true)]
    pub use_async: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// 在起始目录及其祖先目录中查找文件
    Find(FindArgs),
    /// 递归遍历目录树
    Walk(WalkArgs),
}

#[derive(Args, Debug)]
pub struct FindArgs {
    /// 候选文件名（按顺序在每一级目录中尝试）
    #[arg(required = true, value_parser = NonEmptyStringValueParser::new())]
    pub names: Vec<String>,

    /// 起始目录（默认：当前目录）
    #[arg(long, value_name = "DIR")]
    pub cwd: Option<PathBuf>,

    /// 停止目录（不包含该目录本身）
    #[arg(long, value_name = "DIR")]
    pub stop: Option<PathBuf>,

    /// 仅匹配内容包含该文本的文件
    #[arg(long, value_name = "TEXT")]
    pub contains: Option<String>,
}

#[derive(Args, Debug)]
pub struct WalkArgs {
    /// 遍历的根目录
    #[arg(default_value = ".")]
    pub root: PathBuf,

    /// 最大遍历深度（负数表示不产生任何条目）
    #[arg(long, value_name = "NUM", allow_negative_numbers = true)]
    pub max_depth: Option<i64>,

    /// 不输出文件
    #[arg(long)]
    pub no_files: bool,

    /// 不输出目录（仍然会进入目录）
    #[arg(long)]
    pub no_dirs: bool,

    /// 不输出未跟随的符号链接
    #[arg(long)]
    pub no_symlinks: bool,

    /// 跟随符号链接
    #[arg(short = 'L', long)]
    pub follow_symlinks: bool,

    /// 按完整路径排除（支持通配符，可多次指定）
    #[arg(short = 'e', long, value_name = "GLOB")]
    pub exclude: Vec<String>,

    /// 不区分大小写的排除模式（可多次指定）
    #[arg(long, value_name = "GLOB")]
    pub iexclude: Vec<String>,

    /// 在路径前输出条目类型 (d/f/l/?)
    #[arg(short, long)]
    pub long: bool,
}

impl Cli {
    /// 验证命令行参数
    pub fn validate(&self) -> Result<(), FindError> {
        if let Command::Walk(args) = &self.command {
            args.exclude_set()?;
        }
        Ok(())
    }
}

impl FindArgs {
    /// 构建查找选项
    pub fn build_options(&self, use_async: bool) -> FindOptions {
        let mut options = FindOptions::new();
        if let Some(cwd) = &self.cwd {
            options = options.with_cwd(cwd);
        }
        if let Some(stop) = &self.stop {
            options = options.with_stop(stop);
        }
        if let Some(text) = &self.contains {
            options = options.with_test(contains_predicate(text.clone(), use_async));
        }
        options
    }
}

impl WalkArgs {
    /// 构建遍历选项
    pub fn build_options(&self) -> FindResult<WalkOptions> {
        Ok(WalkOptions::new()
            .with_max_depth(self.max_depth)
            .with_include_files(!self.no_files)
            .with_include_dirs(!self.no_dirs)
            .with_include_symlinks(!self.no_symlinks)
            .with_follow_symlinks(self.follow_symlinks)
            .with_exclude_set(self.exclude_set()?))
    }

    fn exclude_set(&self) -> FindResult<ExcludeSet> {
        let mut set = ExcludeSet::from_patterns(&self.exclude, false)?;
        set.extend(ExcludeSet::from_patterns(&self.iexclude, true)?);
        Ok(set)
    }

    /// 格式化单个条目
    pub fn format_entry(&self, entry: &WalkEntry) -> String {
        if self.long {
            format!("{} {}", entry.type_marker(), entry.path.display())
        } else {
            entry.path.display().to_string()
        }
    }
}

/// 文件内容包含 `text` 时通过
fn contains_predicate(text: String, use_async: bool) -> Predicate {
    if use_async {
        Predicate::from_async(move |file: PathBuf| {
            let text = text.clone();
            async move {
                tokio::fs::read(&file)
                    .await
                    .map(|bytes| String::from_utf8_lossy(&bytes).contains(&text))
                    .unwrap_or(false)
            }
        })
    } else {
        Predicate::sync(move |file| {
            std::fs::read(file)
                .map(|bytes| String::from_utf8_lossy(&bytes).contains(&text))
                .unwrap_or(false)
        })
    }
}
