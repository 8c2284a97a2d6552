// src/cli/route.rs
//! Route 命令 - 读取一个 payload 并转发到 Slack / PagerDuty

use anyhow::{Context, Result};
use clap::Args;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{error, info};

use crate::config::RouterConfig;
use crate::notification::{DryRunChannel, PagerdutyChannel, SlackChannel};
use crate::router::{classify, Router};

/// Route 命令参数
#[derive(Args)]
pub struct RouteArgs {
    /// Payload 文件路径（省略或 `-` 时从 stdin 读取）
    pub payload: Option<PathBuf>,

    /// 只记录将要发送的内容，不实际发送（不需要凭据）
    #[arg(long)]
    pub dry_run: bool,
}

/// Classify 命令参数
#[derive(Args)]
pub struct ClassifyArgs {
    /// Payload 文件路径（省略或 `-` 时从 stdin 读取）
    pub payload: Option<PathBuf>,
}

/// Read the whole payload from a file, or stdin for `None` / `-`.
pub fn read_payload(path: Option<&Path>) -> Result<Vec<u8>> {
    match path {
        Some(p) if p != Path::new("-") => {
            std::fs::read(p).with_context(|| format!("failed to read payload from {}", p.display()))
        }
        _ => {
            let mut buf = Vec::new();
            std::io::stdin()
                .read_to_end(&mut buf)
                .context("failed to read payload from stdin")?;
            Ok(buf)
        }
    }
}

/// 处理 route 命令
pub fn handle_route(args: RouteArgs) -> Result<()> {
    // 凭据必须在读取 payload 之前校验
    let config = if args.dry_run {
        None
    } else {
        Some(RouterConfig::from_env()?)
    };

    let raw = read_payload(args.payload.as_deref())?;

    let result = match config {
        Some(config) => {
            let slack = SlackChannel::new(&config.slack_webhook)?;
            let pagerduty = PagerdutyChannel::new(&config.pagerduty_key, &config.pagerduty_url)?;
            Router::new(&slack, &pagerduty).route(&raw)
        }
        None => {
            let dry_run = DryRunChannel::new();
            Router::new(&dry_run, &dry_run).route(&raw)
        }
    };

    match result {
        Ok(()) => {
            info!("Event processed");
            Ok(())
        }
        Err(e) => {
            error!(error = %e, "Event processing failed");
            Err(e.into())
        }
    }
}

/// 处理 classify 命令
pub fn handle_classify(args: ClassifyArgs) -> Result<()> {
    let raw = read_payload(args.payload.as_deref())?;
    let kind = classify(&raw)?;
    println!("{:?}", kind);
    Ok(())
}
