//! # restarts 命令实现
//!
//! 以表格列出所有 EPW 重启模式。
//!
//! ## 依赖关系
//! - 使用 `models/restart.rs`

use crate::error::Result;
use crate::models::RestartType;
use crate::utils::output;

use tabled::{Table, Tabled};

#[derive(Debug, Clone, Tabled)]
struct RestartRow {
    #[tabled(rename = "Mode")]
    mode: &'static str,
    #[tabled(rename = "Description")]
    description: &'static str,
}

/// 执行 restarts 命令
pub fn execute() -> Result<()> {
    let rows: Vec<RestartRow> = RestartType::ALL
        .iter()
        .map(|r| RestartRow {
            mode: r.as_str(),
            description: r.description(),
        })
        .collect();

    output::print_header("EPW Restart Modes");
    println!("{}", Table::new(&rows));
    Ok(())
}
