//! 扫描选项与统计信息（模块）
use std::path::PathBuf;

/// 默认纳入扫描的文件扩展名
pub const DEFAULT_EXTENSIONS: &[&str] = &["md", "markdown", "txt"];

/// 扫描选项
#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// 风格配置文件路径（TOML）；为空则使用默认配置（全部内置类别）
    pub config_path: Option<PathBuf>,
    /// 最大文件大小（字节）；超过则跳过
    pub max_file_size: Option<u64>,
    /// 线程数：None 表示自动（等于 CPU 核数）；Some(1) 走串行
    pub threads: Option<usize>,
    /// 目录遍历时保留的扩展名（不区分大小写）；显式给出的文件不受限制
    pub extensions: Vec<String>,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            config_path: None,
            max_file_size: None,
            threads: None,
            extensions: DEFAULT_EXTENSIONS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// 扫描统计信息（便于 CLI 打印）
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ScanStats {
    pub files_scanned: usize,
    pub files_skipped: usize,
    pub matches_written: usize,
}
