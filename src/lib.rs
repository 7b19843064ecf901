//! 通过遍历文件系统查找文件和目录的库
//!
//! 本库提供两种遍历方式：
//! - 向上查找：从起始目录逐级向上，在祖先目录中查找指定名称的文件
//! - 向下遍历：递归遍历目录树，惰性地产生每个条目
//!
//! 两者都同时提供阻塞版本和基于 tokio 的异步版本。
//!
//! # 示例
//!
//! 向上查找：
//! ```no_run
//! use elysius::{find_sync, FindOptions, Predicate};
//!
//! // 查找带有 version 字段的 package.json
//! let options = FindOptions::new().with_test(Predicate::sync(|file| {
//!     std::fs::read_to_string(file)
//!         .map(|content| content.contains("\"version\""))
//!         .unwrap_or(false)
//! }));
//! let found = find_sync(["package.json", "Cargo.toml"], &options)?;
//! # Ok::<(), elysius::FindError>(())
//! ```
//!
//! 向下遍历：
//! ```no_run
//! use elysius::{walk_sync, WalkOptions};
//!
//! let options = WalkOptions::new()
//!     .with_max_depth(Some(3))
//!     .with_exclude("*/target")?;
//!
//! for entry in walk_sync(".", options) {
//!     let entry = entry?;
//!     println!("{} {}", entry.type_marker(), entry.path.display());
//! }
//! # Ok::<(), elysius::FindError>(())
//! ```

pub mod cli;
pub mod errors;
pub mod find;
pub mod fs;
pub mod walker;

// Re-export main types for convenience
pub use errors::{FindError, FindResult};
pub use find::{find, find_sync, FindOptions, Names, Predicate};
pub use walker::{walk, walk_sync, ExcludeSet, WalkEntry, WalkOptions, WalkSync};
