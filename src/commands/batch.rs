//! # batch 命令实现
//!
//! 遍历目录并行生成图表。
//!
//! ## 功能
//! - `a2f`: 每个匹配文件生成 `<stem>_a2f.<ext>`
//! - `aniso`: 按所在目录对能隙文件分组，每个目录生成 `<dir>_aniso.<ext>`
//! - 已存在的输出默认跳过（`--overwrite` 覆盖）
//!
//! ## 依赖关系
//! - 使用 `cli/batch.rs` 定义的参数
//! - 使用 `batch/` 模块进行收集与并行处理
//! - 使用 `plot/a2f.rs`, `plot/aniso.rs`

use crate::analysis::{aggregate, ANISO_GAP_PREFIX};
use crate::batch::{BatchRunner, FileCollector, ProcessResult};
use crate::cli::batch::{BatchArgs, BatchKind};
use crate::cli::plot::ImageFormat;
use crate::error::{Result, SuperconError};
use crate::models::FolderStore;
use crate::parsers::a2f::parse_a2f_file;
use crate::plot::a2f::{render_a2f, A2fPlotOptions};
use crate::plot::aniso::{render_aniso, AnisoPlotOptions};
use crate::plot::FigureFormat;
use crate::utils::output;

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

/// 默认 a2F 文件模式
const DEFAULT_A2F_PATTERN: &str = "*.a2f";

/// 批量处理配置
struct BatchPlotConfig {
    output_dir: PathBuf,
    size: (u32, u32),
    format: FigureFormat,
    annotate: bool,
    overwrite: bool,
}

impl BatchPlotConfig {
    fn extension(&self) -> &'static str {
        match self.format {
            FigureFormat::Png => "png",
            FigureFormat::Svg => "svg",
        }
    }

    fn output_for(&self, name: &str, suffix: &str) -> PathBuf {
        self.output_dir
            .join(format!("{}_{}.{}", name, suffix, self.extension()))
    }
}

/// 执行批量绘图
pub fn execute(args: BatchArgs) -> Result<()> {
    output::print_header(&format!("Batch Plotting ({})", args.kind));

    if !args.input.is_dir() {
        return Err(SuperconError::DirectoryNotFound {
            path: args.input.display().to_string(),
        });
    }

    let pattern = args.pattern.clone().unwrap_or_else(|| match args.kind {
        BatchKind::A2f => DEFAULT_A2F_PATTERN.to_string(),
        BatchKind::Aniso => format!("{}*", ANISO_GAP_PREFIX),
    });

    let files = FileCollector::new(args.input.clone())
        .with_pattern(&pattern)?
        .recursive(args.recursive)
        .collect();

    if files.is_empty() {
        output::print_warning(&format!("No matching files found with pattern '{}'", pattern));
        return Ok(());
    }
    output::print_info(&format!("Found {} matching files", files.len()));

    // 确保输出目录存在
    fs::create_dir_all(&args.output).map_err(|e| SuperconError::FileWriteError {
        path: args.output.display().to_string(),
        source: e,
    })?;

    let config = BatchPlotConfig {
        output_dir: args.output.clone(),
        size: (args.figure.width, args.figure.height),
        format: match args.figure.format {
            Some(ImageFormat::Svg) => FigureFormat::Svg,
            _ => FigureFormat::Png,
        },
        annotate: args.annotate,
        overwrite: args.overwrite,
    };

    let runner = BatchRunner::new(args.jobs);
    output::print_info(&format!("Using {} parallel jobs", runner.jobs()));

    let result = match args.kind {
        BatchKind::A2f => runner.run(files, |file| process_a2f(file, &config))?,
        BatchKind::Aniso => {
            let dirs = group_by_directory(&files);
            output::print_info(&format!("Grouped into {} directories", dirs.len()));
            runner.run(dirs, |dir| process_aniso(dir, &config))?
        }
    };

    // 打印统计
    output::print_separator();
    output::print_success(&format!(
        "Batch complete: {} success, {} skipped, {} failed",
        result.success, result.skipped, result.failed
    ));

    if result.skipped > 0 {
        output::print_skip(&format!(
            "{} outputs already existed (use --overwrite to regenerate)",
            result.skipped
        ));
    }

    if !result.failures.is_empty() {
        output::print_warning("Failed jobs:");
        for (path, err) in result.failures.iter().take(10) {
            output::print_error(&format!("  {}: {}", path, err));
        }
        if result.failures.len() > 10 {
            output::print_warning(&format!("  ... and {} more", result.failures.len() - 10));
        }
    }

    Ok(())
}

/// 按父目录去重分组
fn group_by_directory(files: &[PathBuf]) -> Vec<PathBuf> {
    files
        .iter()
        .filter_map(|f| f.parent().map(Path::to_path_buf))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// 计算节点名：`<node>/retrieved` 取 `<node>`
fn node_name(dir: &Path) -> String {
    let name = |p: &Path| {
        p.file_name()
            .and_then(|s| s.to_str())
            .map(|s| s.to_string())
    };

    let node = match name(dir).as_deref() {
        Some("retrieved") => dir.parent().and_then(name),
        other => other.map(|s| s.to_string()),
    };
    node.unwrap_or_else(|| "output".to_string())
}

fn process_a2f(input: &PathBuf, config: &BatchPlotConfig) -> ProcessResult {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output");
    let output_file = config.output_for(stem, "a2f");

    if output_file.exists() && !config.overwrite {
        return ProcessResult::Skipped(format!(
            "Output exists, skipping: {}",
            output_file.display()
        ));
    }

    let options = A2fPlotOptions {
        show_data: config.annotate,
        ..A2fPlotOptions::default()
    };
    let rendered = parse_a2f_file(input, 1).and_then(|spectrum| {
        render_a2f(&spectrum, &options, &output_file, config.size, config.format)
    });

    match rendered {
        Ok(()) => ProcessResult::Success(format!("{} -> {}", input.display(), output_file.display())),
        Err(e) => ProcessResult::Failed(input.display().to_string(), e.to_string()),
    }
}

fn process_aniso(dir: &PathBuf, config: &BatchPlotConfig) -> ProcessResult {
    let output_file = config.output_for(&node_name(dir), "aniso");

    if output_file.exists() && !config.overwrite {
        return ProcessResult::Skipped(format!(
            "Output exists, skipping: {}",
            output_file.display()
        ));
    }

    let options = AnisoPlotOptions {
        add_fit: config.annotate,
        ignore_temps: 0,
    };
    let rendered = FolderStore::open(dir)
        .and_then(|store| aggregate(&store))
        .and_then(|summary| {
            if summary.is_empty() {
                return Err(SuperconError::InvalidInput(
                    "no readable gap files".to_string(),
                ));
            }
            render_aniso(&summary, &options, &output_file, config.size, config.format)
        });

    match rendered {
        Ok(_) => ProcessResult::Success(format!("{} -> {}", dir.display(), output_file.display())),
        Err(e) => ProcessResult::Failed(dir.display().to_string(), e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_by_directory() {
        let files = vec![
            PathBuf::from("b/retrieved/aiida.imag_aniso_gap0_010.00"),
            PathBuf::from("a/aiida.imag_aniso_gap0_005.00"),
            PathBuf::from("b/retrieved/aiida.imag_aniso_gap0_020.00"),
        ];
        assert_eq!(
            group_by_directory(&files),
            vec![PathBuf::from("a"), PathBuf::from("b/retrieved")]
        );
    }

    #[test]
    fn test_node_name() {
        assert_eq!(node_name(Path::new("runs/MgB2/retrieved")), "MgB2");
        assert_eq!(node_name(Path::new("runs/NbSe2")), "NbSe2");
    }

    #[test]
    fn test_output_naming() {
        let config = BatchPlotConfig {
            output_dir: PathBuf::from("figs"),
            size: (800, 600),
            format: FigureFormat::Svg,
            annotate: false,
            overwrite: false,
        };
        assert_eq!(config.output_for("aiida", "a2f"), PathBuf::from("figs/aiida_a2f.svg"));
    }
}
