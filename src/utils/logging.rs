/// 日志工具模块
///
/// 提供日志初始化、格式化和输出的辅助函数
use std::fs;

use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::models::ResultSummary;

/// 初始化 tracing，`RUST_LOG` 优先于 `verbose`
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// 初始化日志文件
///
/// # 参数
/// - `log_file_path`: 日志文件路径
pub fn init_log_file(log_file_path: &str) -> AppResult<()> {
    let log_header = format!(
        "{}\n认知检查日志 - {}\n{}\n\n",
        "=".repeat(60),
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        "=".repeat(60)
    );
    fs::write(log_file_path, log_header).map_err(|e| AppError::file_write_failed(log_file_path, e))
}

/// 记录程序启动信息
pub fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 认知能力检查");
    info!("🌐 服务端: {}", config.api_base_url);
    info!(
        "📋 题目数: {} | 每题时间: {}秒",
        config.question_count, config.question_time_budget_secs
    );
    info!("{}", "=".repeat(60));
}

/// 打印检查结果
///
/// # 参数
/// - `session_id`: 会话ID
/// - `summary`: 检查结果
/// - `log_file_path`: 日志文件路径
pub fn print_result(session_id: i64, summary: &ResultSummary, log_file_path: &str) {
    info!("\n{}", "=".repeat(60));
    info!("📊 检查结果 (会话 {})", session_id);
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("✅ 总分: {:.1} | 等级: {}", summary.total_score, summary.grade);

    for (category, average) in &summary.category_average {
        info!("  {}: {:.1}", category, average);
    }
    if let Some((category, average)) = summary.weakest_category() {
        info!("💡 需要加强: {} ({:.1})", category, average);
    }

    if !summary.recent_sessions.is_empty() {
        info!("{}", "─".repeat(60));
        info!("最近检查（从旧到新）:");
        for recent in &summary.recent_sessions {
            info!(
                "  #{} {} → {:.1}",
                recent.session_id,
                recent.finished_at.format("%Y-%m-%d %H:%M"),
                recent.total_score
            );
        }
    }

    info!("{}", "=".repeat(60));
    info!("{}", truncate_text(&summary.summary, 200));
    info!("\n日志已保存至: {}", log_file_path);
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度
///
/// # 返回
/// 返回截断后的文本
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
