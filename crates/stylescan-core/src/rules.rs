//! 模式配置加载（TOML）：内置词典 + 用户风格配置
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::warn;

use crate::error::{Error, Result};
use crate::types::{PatternCategory, PatternDescriptor};

/// 内置词典（编译期嵌入）
const BUILTIN_DICTIONARY: &str = include_str!("../rules/builtin.toml");

/// 词典文件结构
#[derive(Debug, Clone, Deserialize)]
struct DictionaryFile {
    #[serde(default)]
    patterns: Vec<PatternDescriptor>,
}

/// 解析词典文本
pub fn parse_dictionary(txt: &str) -> Result<Vec<PatternDescriptor>> {
    let parsed: DictionaryFile = toml::from_str(txt)?;
    Ok(parsed.patterns)
}

/// 内置模式表（每次调用返回新副本，匹配器不持有全局状态）
pub fn builtin_patterns() -> Vec<PatternDescriptor> {
    match parse_dictionary(BUILTIN_DICTIONARY) {
        Ok(patterns) => patterns,
        Err(e) => {
            warn!(error = %e, "builtin dictionary is malformed");
            Vec::new()
        }
    }
}

fn default_true() -> bool {
    true
}

/// 内置类别开关（默认全部启用）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryToggles {
    #[serde(default = "default_true")]
    pub filler: bool,
    #[serde(default = "default_true")]
    pub redundancy: bool,
    #[serde(default = "default_true")]
    pub cliche: bool,
}

impl Default for CategoryToggles {
    fn default() -> Self {
        Self { filler: true, redundancy: true, cliche: true }
    }
}

impl CategoryToggles {
    pub fn allows(&self, category: PatternCategory) -> bool {
        match category {
            PatternCategory::Filler => self.filler,
            PatternCategory::Redundancy => self.redundancy,
            PatternCategory::Cliche => self.cliche,
        }
    }
}

/// 用户自定义模式（类别为原始字符串，加载时校验）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomPattern {
    pub text: String,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replacement: Option<String>,
}

/// 用户风格配置文件
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleConfig {
    #[serde(default)]
    pub categories: CategoryToggles,
    #[serde(default)]
    pub custom_patterns: Vec<CustomPattern>,
}

impl StyleConfig {
    pub fn from_toml(txt: &str) -> Result<Self> {
        Ok(toml::from_str(txt)?)
    }

    /// 从 TOML 文件加载
    pub fn load(path: &Path) -> Result<Self> {
        let txt = std::fs::read_to_string(path)
            .map_err(|source| Error::Io { path: path.to_path_buf(), source })?;
        Self::from_toml(&txt)
    }
}

/// 生成最终模式列表：
/// - 内置模式按类别开关过滤；
/// - 自定义模式始终生效（不受开关影响），文本去首尾空白；
/// - 类别未知或文本为空的自定义条目跳过。
pub fn resolve_patterns(config: &StyleConfig) -> Vec<PatternDescriptor> {
    let mut out: Vec<PatternDescriptor> = builtin_patterns()
        .into_iter()
        .filter(|p| config.categories.allows(p.category))
        .collect();

    for custom in &config.custom_patterns {
        let text = custom.text.trim();
        if text.is_empty() {
            warn!("skipping custom pattern with empty text");
            continue;
        }
        let category = match custom.category.parse::<PatternCategory>() {
            Ok(c) => c,
            Err(e) => {
                warn!(text, error = %e, "skipping custom pattern");
                continue;
            }
        };
        out.push(PatternDescriptor { text: text.to_string(), category, replacement: custom.replacement.clone() });
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::Matcher;

    #[test]
    fn builtin_dictionary_covers_every_category() {
        let patterns = builtin_patterns();
        for cat in [PatternCategory::Filler, PatternCategory::Redundancy, PatternCategory::Cliche] {
            assert!(patterns.iter().any(|p| p.category == cat), "missing {cat}");
        }
        assert!(patterns.iter().all(|p| !p.text.trim().is_empty()));
        assert!(patterns.iter().any(|p| p.text == "in order to" && p.replacement.as_deref() == Some("to")));
    }

    #[test]
    fn builtins_and_custom_patterns_are_combined() {
        let patterns = resolve_patterns(&StyleConfig::default());
        let matcher = Matcher::new(patterns).unwrap();
        let found = matcher.scan("Basically we act in order to ship, and we may beat around the bush.");

        assert!(found.iter().any(|m| m.pattern.category == PatternCategory::Filler));
        assert!(found.iter().any(|m| m.pattern.category == PatternCategory::Redundancy));
        assert!(found.iter().any(|m| m.pattern.category == PatternCategory::Cliche));
    }

    #[test]
    fn ignores_invalid_custom_categories() {
        let config = StyleConfig {
            categories: CategoryToggles { filler: false, redundancy: false, cliche: false },
            custom_patterns: vec![CustomPattern {
                text: "unique phrase".to_string(),
                category: "unknown".to_string(),
                replacement: None,
            }],
        };
        assert!(resolve_patterns(&config).is_empty());
    }

    #[test]
    fn custom_patterns_apply_when_builtin_categories_disabled() {
        let config = StyleConfig {
            categories: CategoryToggles { filler: false, redundancy: false, cliche: false },
            custom_patterns: vec![
                CustomPattern { text: "  actually ".to_string(), category: "Filler".to_string(), replacement: Some(String::new()) },
                CustomPattern { text: "   ".to_string(), category: "filler".to_string(), replacement: None },
            ],
        };
        let patterns = resolve_patterns(&config);
        assert_eq!(patterns.len(), 1);
        assert_eq!(patterns[0].text, "actually");

        let found = Matcher::new(patterns).unwrap().scan("Actually we can proceed.");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].pattern.category, PatternCategory::Filler);
    }

    #[test]
    fn parses_style_config_with_defaults() {
        let config = StyleConfig::from_toml(
            r#"
            [categories]
            cliche = false

            [[custom_patterns]]
            text = "synergy"
            category = "cliche"
            replacement = "cooperation"
            "#,
        )
        .unwrap();

        assert!(config.categories.filler);
        assert!(config.categories.redundancy);
        assert!(!config.categories.cliche);
        assert_eq!(config.custom_patterns.len(), 1);

        let patterns = resolve_patterns(&config);
        let cliches: Vec<_> = patterns.iter().filter(|p| p.category == PatternCategory::Cliche).collect();
        assert_eq!(cliches.len(), 1);
        assert_eq!(cliches[0].text, "synergy");
    }

    #[test]
    fn empty_config_is_valid() {
        assert_eq!(StyleConfig::from_toml("").unwrap(), StyleConfig::default());
    }

    #[test]
    fn rejects_malformed_config() {
        assert!(matches!(StyleConfig::from_toml("categories = 3"), Err(Error::Toml(_))));
    }

    #[test]
    fn dictionary_rejects_unknown_category() {
        assert!(parse_dictionary("[[patterns]]\ntext = \"x\"\ncategory = \"slang\"\n").is_err());
    }
}
