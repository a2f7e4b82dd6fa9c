//! 命中项与排序（内部使用）
use std::sync::Arc;

use crate::position::LineIndex;
use crate::types::{Match, OutputItem, PatternDescriptor};

/// 文件内单次命中（已附带行列号，可跨线程传递）
#[derive(Debug, Clone)]
pub(crate) struct Finding {
    pub(crate) file: Arc<str>,
    pub(crate) start: usize,
    pub(crate) end: usize,
    pub(crate) line: usize,
    pub(crate) column: usize,
    pub(crate) pattern: Arc<PatternDescriptor>,
}

impl Finding {
    pub(crate) fn output(&self) -> OutputItem<'_> {
        OutputItem {
            file: &self.file,
            start: self.start,
            end: self.end,
            line: self.line,
            column: self.column,
            text: &self.pattern.text,
            category: self.pattern.category,
            replacement: self.pattern.replacement.as_deref(),
        }
    }
}

/// 将（已排序的）匹配结果转换为文件级命中
pub(crate) fn findings_for_file(file: &str, text: &str, matches: Vec<Match>) -> Vec<Finding> {
    if matches.is_empty() { return Vec::new(); }
    let file: Arc<str> = Arc::from(file);
    let index = LineIndex::new(text);
    matches
        .into_iter()
        .map(|m| {
            let (line, column) = index.line_col(m.start);
            Finding { file: Arc::clone(&file), start: m.start, end: m.end, line, column, pattern: m.pattern }
        })
        .collect()
}

/// 对命中进行稳定排序：起始偏移升序 → 结束偏移升序 → 模式下标升序
pub(crate) fn sort_matches_stable(matches: &mut [Match]) {
    matches.sort_by(|a, b| {
        a.start
            .cmp(&b.start)
            .then(a.end.cmp(&b.end))
            .then(a.pattern_index.cmp(&b.pattern_index))
    });
}
