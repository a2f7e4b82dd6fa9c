//! 字符偏移 -> 行/列、UTF-16 偏移（供高亮/导航使用）

/// 行索引：一次构建，多次查询
#[derive(Debug, Clone)]
pub struct LineIndex {
    /// 每行首字符的字符偏移
    line_starts: Vec<usize>,
    /// 字符偏移 -> UTF-16 码元偏移（长度 = 字符数 + 1）
    utf16: Vec<usize>,
}

impl LineIndex {
    pub fn new(text: &str) -> Self {
        let mut line_starts = vec![0];
        let mut utf16 = Vec::with_capacity(text.len() + 1);
        let mut units = 0usize;

        for (i, ch) in text.chars().enumerate() {
            utf16.push(units);
            units += ch.len_utf16();
            if ch == '\n' { line_starts.push(i + 1); }
        }
        utf16.push(units);

        Self { line_starts, utf16 }
    }

    /// 字符数
    pub fn len(&self) -> usize {
        self.utf16.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 1 起始的 (行, 列)，列按字符计；越界偏移钳制到末尾
    pub fn line_col(&self, offset: usize) -> (usize, usize) {
        let offset = offset.min(self.len());
        let line = self.line_starts.partition_point(|&s| s <= offset) - 1;
        (line + 1, offset - self.line_starts[line] + 1)
    }

    /// 字符偏移转 UTF-16 码元偏移
    pub fn utf16_offset(&self, offset: usize) -> usize {
        self.utf16[offset.min(self.len())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_offsets_to_lines_and_columns() {
        let idx = LineIndex::new("one\ntwo just\n\nthree");
        assert_eq!(idx.line_col(0), (1, 1));
        assert_eq!(idx.line_col(3), (1, 4));
        assert_eq!(idx.line_col(4), (2, 1));
        assert_eq!(idx.line_col(8), (2, 5));
        assert_eq!(idx.line_col(13), (3, 1));
        assert_eq!(idx.line_col(14), (4, 1));
        assert_eq!(idx.line_col(1000), (4, 6));
    }

    #[test]
    fn converts_to_utf16_units() {
        let idx = LineIndex::new("a🙂 just");
        assert_eq!(idx.utf16_offset(3), 4);
        assert_eq!(idx.utf16_offset(7), 8);
        assert_eq!(idx.utf16_offset(99), 8);
    }

    #[test]
    fn empty_text_has_single_line() {
        let idx = LineIndex::new("");
        assert!(idx.is_empty());
        assert_eq!(idx.line_col(0), (1, 1));
        assert_eq!(idx.utf16_offset(0), 0);
    }
}
