//! 写作风格扫描核心库
//!
//! 设计要点：
//! - 匹配器（`Matcher`）是 `(模式集, 文本)` 的纯函数：构建时编译，扫描时只读。
//! - 大小写折叠逐码点进行，偏移始终以原文字符（码点）计。
//! - 词边界按 Unicode 字母/数字/下划线判定，多词短语内部逐字符精确匹配。
//! - 不同条目互不抑制：重叠、嵌套、重复条目各自报告。
//! - 内置词典与用户配置均为外部数据，在构建时传入，引擎本身不持有全局状态。

mod error;
mod findings;
mod fold;
mod matcher;
mod options;
mod position;
mod rules;
mod scan;
mod shared;
mod types;

pub use error::{Error, Result};
pub use matcher::Matcher;
pub use options::{ScanOptions, ScanStats, DEFAULT_EXTENSIONS};
pub use position::LineIndex;
pub use rules::{builtin_patterns, parse_dictionary, resolve_patterns, CategoryToggles, CustomPattern, StyleConfig};
pub use scan::{collect_files, load_matcher, scan_and_write};
pub use shared::SharedMatcher;
pub use types::{Match, OutputItem, PatternCategory, PatternDescriptor, UnknownCategory};
