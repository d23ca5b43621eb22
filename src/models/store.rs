//! # 计算结果存储抽象
//!
//! 工作流引擎把每个计算的输出文件放在一个 "retrieved" 仓库中。
//! 这里用 `ObjectStore` trait 抽象 "列出对象名 / 读取对象内容" 两个操作，
//! 默认实现 `FolderStore` 直接对应磁盘上的目录。
//!
//! `CalcNode` 对应一个计算节点目录：
//! - `retrieved/` 子目录（不存在时使用目录本身）作为对象仓库
//! - `output_parameters.json` / `band_parameters.json` 作为参数字典
//!
//! ## 依赖关系
//! - 被 `analysis/aniso.rs`, `commands/`, `parsers/params.rs` 使用
//! - 使用 `serde_json` 读取参数字典

use crate::error::{Result, SuperconError};

use std::fs;
use std::path::{Path, PathBuf};

/// 计算输出仓库
pub trait ObjectStore {
    /// 按名称排序的对象列表
    fn list_object_names(&self) -> Result<Vec<String>>;

    /// 读取对象文本内容
    fn get_object_content(&self, name: &str) -> Result<String>;
}

/// 基于目录的对象仓库
#[derive(Debug, Clone)]
pub struct FolderStore {
    root: PathBuf,
}

impl FolderStore {
    /// 打开目录
    pub fn open(path: &Path) -> Result<Self> {
        if !path.is_dir() {
            return Err(SuperconError::DirectoryNotFound {
                path: path.display().to_string(),
            });
        }
        Ok(FolderStore {
            root: path.to_path_buf(),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl ObjectStore for FolderStore {
    fn list_object_names(&self) -> Result<Vec<String>> {
        let entries = fs::read_dir(&self.root).map_err(|e| SuperconError::FileReadError {
            path: self.root.display().to_string(),
            source: e,
        })?;

        let mut names: Vec<String> = entries
            .filter_map(|e| e.ok())
            .filter(|e| e.path().is_file())
            .map(|e| e.file_name().to_string_lossy().to_string())
            .collect();
        names.sort();

        Ok(names)
    }

    fn get_object_content(&self, name: &str) -> Result<String> {
        let path = self.root.join(name);
        fs::read_to_string(&path).map_err(|e| SuperconError::FileReadError {
            path: path.display().to_string(),
            source: e,
        })
    }
}

/// 参数字典文件名，按优先级排列
const PARAMETER_FILES: [&str; 2] = ["output_parameters.json", "band_parameters.json"];

/// 计算节点目录
#[derive(Debug, Clone)]
pub struct CalcNode {
    root: PathBuf,
    retrieved: FolderStore,
}

impl CalcNode {
    pub fn open(path: &Path) -> Result<Self> {
        if !path.is_dir() {
            return Err(SuperconError::DirectoryNotFound {
                path: path.display().to_string(),
            });
        }

        let retrieved_dir = path.join("retrieved");
        let retrieved = if retrieved_dir.is_dir() {
            FolderStore::open(&retrieved_dir)?
        } else {
            FolderStore::open(path)?
        };

        Ok(CalcNode {
            root: path.to_path_buf(),
            retrieved,
        })
    }

    /// 输出文件仓库
    pub fn retrieved(&self) -> &FolderStore {
        &self.retrieved
    }

    /// 读取参数字典
    pub fn output_parameters(&self) -> Result<serde_json::Value> {
        let path = PARAMETER_FILES
            .iter()
            .map(|name| self.root.join(name))
            .find(|p| p.is_file())
            .ok_or_else(|| SuperconError::FileNotFound {
                path: self.root.join(PARAMETER_FILES[0]).display().to_string(),
            })?;

        let content = fs::read_to_string(&path).map_err(|e| SuperconError::FileReadError {
            path: path.display().to_string(),
            source: e,
        })?;
        Ok(serde_json::from_str(&content)?)
    }

    /// 读取数值参数
    pub fn parameter_f64(&self, key: &str) -> Result<f64> {
        let parameters = self.output_parameters()?;
        number_parameter(&parameters, key, &self.root.display().to_string())
    }
}

/// 从参数字典取数值
pub fn number_parameter(parameters: &serde_json::Value, key: &str, source_name: &str) -> Result<f64> {
    parameters
        .get(key)
        .and_then(|v| v.as_f64())
        .ok_or_else(|| SuperconError::MissingParameter {
            key: key.to_string(),
            source_name: source_name.to_string(),
        })
}

/// 内存仓库（测试用）
#[cfg(test)]
pub struct MemoryStore {
    pub objects: Vec<(String, String)>,
    /// 列出但无法读取的对象
    pub unreadable: Vec<String>,
}

#[cfg(test)]
impl MemoryStore {
    pub fn new(objects: &[(&str, &str)]) -> Self {
        MemoryStore {
            objects: objects
                .iter()
                .map(|(n, c)| (n.to_string(), c.to_string()))
                .collect(),
            unreadable: Vec::new(),
        }
    }

    pub fn with_unreadable(mut self, name: &str) -> Self {
        self.unreadable.push(name.to_string());
        self
    }
}

#[cfg(test)]
impl ObjectStore for MemoryStore {
    fn list_object_names(&self) -> Result<Vec<String>> {
        let mut names: Vec<String> = self
            .objects
            .iter()
            .map(|(n, _)| n.clone())
            .chain(self.unreadable.iter().cloned())
            .collect();
        names.sort();
        Ok(names)
    }

    fn get_object_content(&self, name: &str) -> Result<String> {
        if self.unreadable.iter().any(|n| n == name) {
            return Err(SuperconError::FileReadError {
                path: name.to_string(),
                source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "unreadable"),
            });
        }
        self.objects
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, c)| c.clone())
            .ok_or_else(|| SuperconError::FileNotFound {
                path: name.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_parameter() {
        let params: serde_json::Value =
            serde_json::from_str(r#"{"fermi_energy": 6.5, "fermi_energy_units": "eV"}"#).unwrap();
        assert_eq!(number_parameter(&params, "fermi_energy", "node").unwrap(), 6.5);

        let err = number_parameter(&params, "fermi_energy_units", "node").unwrap_err();
        assert!(matches!(err, SuperconError::MissingParameter { .. }));
    }

    #[test]
    fn test_memory_store_listing_is_sorted() {
        let store = MemoryStore::new(&[("b", "2"), ("a", "1")]);
        assert_eq!(store.list_object_names().unwrap(), vec!["a", "b"]);
        assert_eq!(store.get_object_content("b").unwrap(), "2");
        assert!(store.get_object_content("c").is_err());

        let store = store.with_unreadable("c");
        assert_eq!(store.list_object_names().unwrap(), vec!["a", "b", "c"]);
        assert!(matches!(
            store.get_object_content("c"),
            Err(SuperconError::FileReadError { .. })
        ));
    }

    #[test]
    fn test_missing_directories() {
        let missing = Path::new("definitely/not/a/node");
        assert!(FolderStore::open(missing).is_err());
        assert!(CalcNode::open(missing).is_err());
    }
}
