//! # 终端输出工具
//!
//! 统一的状态前缀：`[OK]` `[ERR]` `[WARN]` `[*]` `[SKIP]`，
//! 以及物理量的对齐输出。
//!
//! ## 依赖关系
//! - 被所有 `commands/` 模块使用
//! - 使用 `colored` crate

use colored::Colorize;

/// 物理量名称列宽
const QUANTITY_WIDTH: usize = 12;

/// 打印成功消息
pub fn print_success(msg: &str) {
    println!("{} {}", "[OK]".green().bold(), msg);
}

/// 打印错误消息
pub fn print_error(msg: &str) {
    eprintln!("{} {}", "[ERR]".red().bold(), msg);
}

/// 打印警告消息
pub fn print_warning(msg: &str) {
    println!("{} {}", "[WARN]".yellow().bold(), msg);
}

/// 逐条打印警告
pub fn print_warnings(warnings: &[String]) {
    for warning in warnings {
        print_warning(warning);
    }
}

/// 打印信息消息
pub fn print_info(msg: &str) {
    println!("{} {}", "[*]".blue().bold(), msg);
}

/// 打印跳过消息
pub fn print_skip(msg: &str) {
    println!("{} {}", "[SKIP]".dimmed(), msg);
}

/// 打印一个物理量：`名称 = 数值 单位`
pub fn print_quantity(name: &str, value: f64, unit: &str) {
    println!("    {}", format_quantity(name, value, unit));
}

fn format_quantity(name: &str, value: f64, unit: &str) -> String {
    let line = format!("{:<width$} = {:>10.4}", name, value, width = QUANTITY_WIDTH);
    if unit.is_empty() {
        line
    } else {
        format!("{} {}", line, unit)
    }
}

/// 打印标题栏
pub fn print_header(title: &str) {
    let line = "─".repeat(60);
    println!("\n{}", line.dimmed());
    println!("  {}", title.bold());
    println!("{}\n", line.dimmed());
}

/// 打印分隔线
pub fn print_separator() {
    println!("{}", "─".repeat(60).dimmed());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_quantity() {
        assert_eq!(format_quantity("lambda", 0.5, ""), "lambda       =     0.5000");
        assert_eq!(
            format_quantity("E_F (QE)", -1.25, "eV"),
            "E_F (QE)     =    -1.2500 eV"
        );
    }
}
