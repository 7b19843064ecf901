use std::process::ExitCode;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use futures::StreamExt;
use log::{debug, info};

use elysius::cli::{Cli, Command, FindArgs, WalkArgs};
use elysius::{find, find_sync, walk, walk_sync};

fn main() -> Result<ExitCode> {
    // 解析命令行参数
    let cli = Cli::parse();

    // 初始化日志
    env_logger::Builder::new()
        .filter_level(if cli.debug {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        })
        .init();

    cli.validate().context("参数无效")?;

    info!("开始运行 elysius");
    let start_time = Instant::now();

    let found = match &cli.command {
        Command::Find(args) => run_find(args, cli.use_async)?,
        Command::Walk(args) => run_walk(args, cli.use_async)?,
    };

    let elapsed = start_time.elapsed();
    info!("完成，耗时 {:.2?}", elapsed);

    Ok(if found { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}

fn runtime() -> Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("创建 tokio 运行时失败")
}

/// 向上查找；未找到时返回 false
fn run_find(args: &FindArgs, use_async: bool) -> Result<bool> {
    let options = args.build_options(use_async);
    debug!("查找 {:?}，选项 {:?}", args.names, options);

    let result = if use_async {
        runtime()?.block_on(find(args.names.clone(), &options))
    } else {
        find_sync(args.names.clone(), &options)
    };
    let result = result.with_context(|| format!("查找 {} 失败", args.names.join(", ")))?;

    match result {
        Some(path) => {
            println!("{}", path.display());
            Ok(true)
        }
        None => {
            info!("未找到 {}", args.names.join(", "));
            Ok(false)
        }
    }
}

fn run_walk(args: &WalkArgs, use_async: bool) -> Result<bool> {
    let options = args.build_options().context("创建遍历选项失败")?;
    debug!("遍历 {}，选项 {:?}", args.root.display(), options);

    let mut count = 0usize;
    if use_async {
        runtime()?.block_on(async {
            let entries = walk(&args.root, options);
            futures::pin_mut!(entries);
            while let Some(entry) = entries.next().await {
                let entry = entry.with_context(|| format!("遍历 {} 失败", args.root.display()))?;
                println!("{}", args.format_entry(&entry));
                count += 1;
            }
            Ok::<_, anyhow::Error>(())
        })?;
    } else {
        for entry in walk_sync(&args.root, options) {
            let entry = entry.with_context(|| format!("遍历 {} 失败", args.root.display()))?;
            println!("{}", args.format_entry(&entry));
            count += 1;
        }
    }

    debug!("共输出 {} 个条目", count);
    Ok(true)
}
