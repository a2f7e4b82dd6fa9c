//! 逐码点大小写折叠与原文偏移映射
//!
//! 折叠规则逐字符进行，保证折叠前后码点数一致：
//! - `to_lowercase` 只产生一个字符时取该字符；
//! - 产生多个字符时（如 'İ'）保留原字符，避免偏移错位。

/// 折叠单个字符
pub(crate) fn fold_char(ch: char) -> char {
    let mut lower = ch.to_lowercase();
    match (lower.next(), lower.next()) {
        (Some(c), None) => c,
        _ => ch,
    }
}

/// 折叠整段文本（模式与正文使用同一规则）
pub(crate) fn fold_str(text: &str) -> String {
    text.chars().map(fold_char).collect()
}

/// 词字符：Unicode 字母、数字或下划线
pub(crate) fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_'
}

/// 折叠后的正文 + 回映原文所需的索引
pub(crate) struct FoldedText {
    /// 折叠后的文本（供自动机扫描）
    pub(crate) folded: String,
    /// 原文字符序列（边界判定使用原字符）
    chars: Vec<char>,
    /// 折叠文本字节偏移 -> 字符下标（长度 = folded.len() + 1）
    char_at_byte: Vec<usize>,
}

impl FoldedText {
    pub(crate) fn new(text: &str) -> Self {
        let mut folded = String::with_capacity(text.len());
        let mut chars = Vec::with_capacity(text.len());
        let mut char_at_byte = Vec::with_capacity(text.len() + 1);

        for ch in text.chars() {
            let before = folded.len();
            folded.push(fold_char(ch));
            // 同一字符的每个字节都指向该字符下标
            char_at_byte.extend(std::iter::repeat(chars.len()).take(folded.len() - before));
            chars.push(ch);
        }
        char_at_byte.push(chars.len());

        Self { folded, chars, char_at_byte }
    }

    /// 字节偏移（必须位于字符边界）转字符下标
    pub(crate) fn char_index(&self, byte_offset: usize) -> usize {
        self.char_at_byte[byte_offset]
    }

    /// 字符区间 [start, end) 两侧是否均为词边界
    pub(crate) fn is_word_bounded(&self, start: usize, end: usize) -> bool {
        let before_ok = start == 0 || !is_word_char(self.chars[start - 1]);
        let after_ok = self.chars.get(end).map_or(true, |&ch| !is_word_char(ch));
        before_ok && after_ok
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn folding_preserves_codepoint_count() {
        let text = "İstanbul ÀÉÎ Straße";
        assert_eq!(fold_str(text).chars().count(), text.chars().count());
        assert_eq!(fold_str("ÀÉÎ"), "àéî");
    }

    #[test]
    fn maps_folded_bytes_back_to_chars() {
        // 'K'（开尔文符号，3 字节）折叠为 'k'（1 字节）
        let ft = FoldedText::new("\u{212A}é just");
        assert_eq!(ft.folded, "ké just");
        let at = ft.folded.find("just").unwrap();
        assert_eq!(ft.char_index(at), 3);
        assert_eq!(ft.char_index(ft.folded.len()), 7);
    }

    #[test]
    fn word_chars_are_unicode_aware() {
        assert!(is_word_char('é'));
        assert!(is_word_char('_'));
        assert!(is_word_char('7'));
        assert!(is_word_char('字'));
        assert!(!is_word_char(' '));
        assert!(!is_word_char(','));
        assert!(!is_word_char('\''));
    }

    #[test]
    fn boundary_checks_both_sides() {
        let ft = FoldedText::new("éjust just");
        assert!(!ft.is_word_bounded(1, 5));
        assert!(ft.is_word_bounded(6, 10));
        assert!(ft.is_word_bounded(0, 10));
    }
}
