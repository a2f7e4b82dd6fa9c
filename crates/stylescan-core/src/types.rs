//! 公共类型（对外暴露）
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// 模式类别：仅用于展示/分组，不影响匹配语义
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum PatternCategory {
    Filler,
    Redundancy,
    Cliche,
}

impl PatternCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Filler => "filler",
            Self::Redundancy => "redundancy",
            Self::Cliche => "cliche",
        }
    }
}

impl fmt::Display for PatternCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 未知类别名
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown pattern category `{0}`")]
pub struct UnknownCategory(pub String);

impl FromStr for PatternCategory {
    type Err = UnknownCategory;

    /// 去除首尾空白后按小写比较
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "filler" => Ok(Self::Filler),
            "redundancy" => Ok(Self::Redundancy),
            "cliche" => Ok(Self::Cliche),
            _ => Err(UnknownCategory(s.to_string())),
        }
    }
}

/// 单条模式描述：字面短语 + 类别 + 可选替换建议
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternDescriptor {
    pub text: String,
    pub category: PatternCategory,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replacement: Option<String>,
}

impl PatternDescriptor {
    pub fn new(text: impl Into<String>, category: PatternCategory) -> Self {
        Self { text: text.into(), category, replacement: None }
    }

    pub fn with_replacement(mut self, replacement: impl Into<String>) -> Self {
        self.replacement = Some(replacement.into());
        self
    }
}

/// 一次命中
///
/// `start`/`end` 为原文中的字符（码点）偏移，`end` 不含。
/// `pattern` 携带配置中的规范文本，而非原文中的实际大小写。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    pub pattern: Arc<PatternDescriptor>,
    /// 模式在构建时列表中的下标（同位置命中的排序依据）
    pub pattern_index: usize,
    pub start: usize,
    pub end: usize,
}

impl Match {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// 输出项结构（对应 JSON 输出数组的单个元素）
#[derive(Debug, Clone, Serialize)]
pub struct OutputItem<'a> {
    pub file: &'a str,
    pub start: usize,
    pub end: usize,
    pub line: usize,
    pub column: usize,
    pub text: &'a str,
    pub category: PatternCategory,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub replacement: Option<&'a str>,
}
