//! 库级错误类型
use std::path::PathBuf;

/// 核心库错误
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// 读取配置/词典文件失败
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// TOML 解析失败
    #[error("invalid style config: {0}")]
    Toml(#[from] toml::de::Error),

    /// 自动机构建失败（通常为容量超限）
    #[error("failed to compile pattern automaton: {0}")]
    Build(#[from] aho_corasick::BuildError),
}

pub type Result<T> = std::result::Result<T, Error>;
