//! 多模式短语匹配器（Aho-Corasick + 词边界过滤）
//!
//! 两个阶段：
//! - 编译：逐码点折叠所有模式文本，去重后构建一个 AC 自动机；
//!   每个自动机模式 id 映射回配置列表中的一个或多个条目（重复条目不去重）。
//! - 扫描：折叠正文，以重叠方式跑一遍自动机，按词边界过滤后映射回原文字符偏移。
//!
//! 编译结果只读；`scan` 只需 `&self`，可在多线程间共享。
use std::collections::HashMap;
use std::sync::Arc;

use aho_corasick::{AhoCorasick, AhoCorasickBuilder, MatchKind};
use tracing::debug;

use crate::error::Result;
use crate::findings::sort_matches_stable;
use crate::fold::{fold_str, FoldedText};
use crate::types::{Match, PatternDescriptor};

/// 编译后的扫描结构（构建后不可变）
struct Compiled {
    /// 无可匹配模式时为 None
    automaton: Option<AhoCorasick>,
    /// 配置顺序的模式列表
    patterns: Vec<Arc<PatternDescriptor>>,
    /// 自动机模式 id -> 配置下标列表
    targets: Vec<Vec<usize>>,
}

impl Compiled {
    fn build(patterns: Vec<PatternDescriptor>) -> Result<Self> {
        let patterns: Vec<Arc<PatternDescriptor>> = patterns.into_iter().map(Arc::new).collect();

        // 折叠文本去重：相同文本共享一个自动机模式
        let mut needles: Vec<String> = Vec::new();
        let mut targets: Vec<Vec<usize>> = Vec::new();
        let mut needle_index: HashMap<String, usize> = HashMap::new();

        for (idx, p) in patterns.iter().enumerate() {
            let folded = fold_str(&p.text);
            // 空文本属于调用方违例：忽略，永不命中
            if folded.is_empty() { continue; }
            let id = match needle_index.get(&folded) {
                Some(id) => *id,
                None => {
                    let id = needles.len();
                    needle_index.insert(folded.clone(), id);
                    needles.push(folded);
                    targets.push(Vec::new());
                    id
                }
            };
            targets[id].push(idx);
        }

        let automaton = if needles.is_empty() {
            None
        } else {
            // Standard 语义才能做重叠查找
            Some(AhoCorasickBuilder::new().match_kind(MatchKind::Standard).build(&needles)?)
        };

        debug!(patterns = patterns.len(), needles = needles.len(), "compiled style matcher");
        Ok(Self { automaton, patterns, targets })
    }
}

/// 短语匹配器
pub struct Matcher {
    compiled: Compiled,
}

impl Matcher {
    /// 立即编译给定模式列表；空列表合法，得到永不命中的匹配器
    pub fn new(patterns: Vec<PatternDescriptor>) -> Result<Self> {
        Ok(Self { compiled: Compiled::build(patterns)? })
    }

    /// 以新列表整体替换编译结构，效果等同于重新构造。
    /// 编译失败时返回错误并保留原结构不变。
    pub fn rebuild(&mut self, patterns: Vec<PatternDescriptor>) -> Result<()> {
        self.compiled = Compiled::build(patterns)?;
        Ok(())
    }

    /// 当前配置的模式（构建顺序）
    pub fn patterns(&self) -> impl Iterator<Item = &PatternDescriptor> + '_ {
        self.compiled.patterns.iter().map(|p| p.as_ref())
    }

    pub fn pattern_count(&self) -> usize {
        self.compiled.patterns.len()
    }

    /// 扫描文本，返回按 (start, end, 模式下标) 排序的全部命中
    pub fn scan(&self, text: &str) -> Vec<Match> {
        let Some(automaton) = &self.compiled.automaton else { return Vec::new() };
        if text.is_empty() { return Vec::new(); }

        let folded = FoldedText::new(text);
        let mut matches: Vec<Match> = Vec::new();

        for found in automaton.find_overlapping_iter(&folded.folded) {
            // 折叠后的模式与正文均为合法 UTF-8，命中必落在字符边界上
            let start = folded.char_index(found.start());
            let end = folded.char_index(found.end());
            if !folded.is_word_bounded(start, end) { continue; }

            for &pattern_index in &self.compiled.targets[found.pattern().as_usize()] {
                matches.push(Match {
                    pattern: Arc::clone(&self.compiled.patterns[pattern_index]),
                    pattern_index,
                    start,
                    end,
                });
            }
        }

        sort_matches_stable(&mut matches);
        matches
    }
}

impl std::fmt::Debug for Matcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Matcher")
            .field("patterns", &self.compiled.patterns.len())
            .field("needles", &self.compiled.targets.len())
            .finish()
    }
}
