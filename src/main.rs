//! Event Router CLI
//!
//! 将 AWS SNS 告警与 CloudWatch 事件转发到 Slack 和 PagerDuty

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

use event_router::cli::{handle_classify, handle_route, ClassifyArgs, RouteArgs};

#[derive(Parser)]
#[command(name = "event-router")]
#[command(about = "Event Router - 将 AWS 事件转发到 Slack 和 PagerDuty")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 处理一个事件 payload 并发送通知
    Route(RouteArgs),
    /// 只判断 payload 类型，不发送
    Classify(ClassifyArgs),
}

fn main() -> Result<()> {
    // 日志写到 stderr，可通过 RUST_LOG 调整
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("event_router=info"));

    fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Route(args) => handle_route(args),
        Commands::Classify(args) => handle_classify(args),
    }
}
