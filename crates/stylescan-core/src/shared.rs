//! 多线程宿主使用的可替换匹配器句柄
//!
//! 扫描方取快照（`Arc<Matcher>`）后在锁外执行；替换时先在锁外编译新结构，
//! 再短暂持写锁交换引用，进行中的扫描继续使用旧结构。
use std::sync::{Arc, RwLock};

use crate::error::Result;
use crate::matcher::Matcher;
use crate::types::PatternDescriptor;

/// 线程安全的匹配器句柄
#[derive(Debug)]
pub struct SharedMatcher {
    current: RwLock<Arc<Matcher>>,
}

impl SharedMatcher {
    pub fn new(patterns: Vec<PatternDescriptor>) -> Result<Self> {
        Ok(Self::from_matcher(Matcher::new(patterns)?))
    }

    pub fn from_matcher(matcher: Matcher) -> Self {
        Self { current: RwLock::new(Arc::new(matcher)) }
    }

    /// 当前匹配器的快照
    pub fn snapshot(&self) -> Arc<Matcher> {
        match self.current.read() {
            Ok(guard) => Arc::clone(&guard),
            Err(poisoned) => Arc::clone(&poisoned.into_inner()),
        }
    }

    /// 编译新模式集并替换；编译失败时保留原匹配器
    pub fn replace(&self, patterns: Vec<PatternDescriptor>) -> Result<()> {
        let fresh = Arc::new(Matcher::new(patterns)?);
        match self.current.write() {
            Ok(mut guard) => *guard = fresh,
            Err(poisoned) => *poisoned.into_inner() = fresh,
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PatternCategory;

    #[test]
    fn snapshots_survive_replacement() {
        let shared = SharedMatcher::new(vec![PatternDescriptor::new("basically", PatternCategory::Filler)]).unwrap();
        let old = shared.snapshot();

        shared.replace(vec![PatternDescriptor::new("just", PatternCategory::Filler)]).unwrap();
        let new = shared.snapshot();

        let text = "basically just";
        assert_eq!(old.scan(text)[0].pattern.text, "basically");
        let found = new.scan(text);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].pattern.text, "just");
    }

    #[test]
    fn concurrent_scans_share_one_matcher() {
        let shared = Arc::new(SharedMatcher::new(vec![PatternDescriptor::new("very", PatternCategory::Filler)]).unwrap());
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let shared = Arc::clone(&shared);
                std::thread::spawn(move || {
                    let text = "very ".repeat(i + 1);
                    shared.snapshot().scan(&text).len()
                })
            })
            .collect();
        let counts: Vec<usize> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert_eq!(counts, vec![1, 2, 3, 4]);
    }
}
