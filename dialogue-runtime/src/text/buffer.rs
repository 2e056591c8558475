//! # Buffer 模块
//!
//! 逐字消费的追加缓冲。
//!
//! 缓冲维护待显示文本与一个消费游标；紧凑化只丢弃已消费的前缀，
//! 保证反复小段追加时内存不会无界增长。

/// 默认紧凑化阈值（字节）
const DEFAULT_COMPACTION_THRESHOLD: usize = 20;

/// 文本追加缓冲
///
/// `cursor` 是 `pending` 的字节索引，始终落在字符边界上，
/// 满足 `0 <= cursor <= pending.len()`。已消费前缀在游标达到
/// 阈值或缓冲被完全消费时丢弃，未消费内容从不丢弃。
#[derive(Debug, Clone)]
pub(crate) struct TextAppendingBuffer {
    /// 待显示文本（含已消费前缀，待紧凑化）
    pending: String,
    /// 消费游标（字节索引）
    cursor: usize,
    /// 紧凑化阈值
    compaction_threshold: usize,
}

impl TextAppendingBuffer {
    /// 创建新的追加缓冲
    ///
    /// # 参数
    /// - `compaction_threshold`: 已消费前缀超过该字节数时触发紧凑化
    pub(crate) fn new(compaction_threshold: usize) -> Self {
        Self {
            pending: String::new(),
            cursor: 0,
            compaction_threshold,
        }
    }

    /// 消费并返回游标处的一个字符
    ///
    /// 缓冲为空时返回 `None`。消费后若游标达到阈值或缓冲已被
    /// 完全消费，则触发紧凑化。
    pub(crate) fn next(&mut self) -> Option<char> {
        let ch = self.pending[self.cursor..].chars().next()?;
        self.cursor += ch.len_utf8();
        self.try_compact();
        Some(ch)
    }

    /// 未消费的剩余文本
    pub(crate) fn remaining(&self) -> &str {
        &self.pending[self.cursor..]
    }

    /// 是否已无未消费内容
    pub(crate) fn is_empty(&self) -> bool {
        self.cursor == self.pending.len()
    }

    /// 清空缓冲与游标
    pub(crate) fn clear(&mut self) {
        self.pending.clear();
        self.cursor = 0;
    }

    /// 追加文本到尾部
    ///
    /// 追加前先尝试紧凑化，避免已消费前缀随追加持续累积。
    pub(crate) fn append(&mut self, text: &str) {
        self.try_compact();
        self.pending.push_str(text);
    }

    /// 丢弃已消费前缀
    ///
    /// 触发条件：
    /// - 已消费字节数达到阈值
    /// - 缓冲已被完全消费
    fn try_compact(&mut self) {
        if self.cursor == 0 {
            return;
        }
        if self.cursor >= self.compaction_threshold || self.is_empty() {
            self.pending.drain(..self.cursor);
            self.cursor = 0;
        }
    }
}

impl Default for TextAppendingBuffer {
    fn default() -> Self {
        Self::new(DEFAULT_COMPACTION_THRESHOLD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_consumes_in_order() {
        let mut buf = TextAppendingBuffer::default();
        buf.append("abc");

        assert_eq!(buf.next(), Some('a'));
        assert_eq!(buf.next(), Some('b'));
        assert_eq!(buf.remaining(), "c");
        assert_eq!(buf.next(), Some('c'));
        assert_eq!(buf.next(), None);
        assert!(buf.is_empty());
    }

    #[test]
    fn test_append_after_partial_consume() {
        let mut buf = TextAppendingBuffer::default();
        buf.append("He");
        assert_eq!(buf.next(), Some('H'));
        buf.append("llo");
        assert_eq!(buf.remaining(), "ello");
    }

    #[test]
    fn test_compaction_never_drops_unconsumed() {
        // 小阈值触发频繁紧凑化，校验消费历史 + 剩余 == 追加历史
        let mut buf = TextAppendingBuffer::new(4);
        let mut consumed = String::new();
        let mut appended = String::new();

        for chunk in ["Hello, ", "world", "！你好", "再见"] {
            buf.append(chunk);
            appended.push_str(chunk);
            for _ in 0..3 {
                if let Some(ch) = buf.next() {
                    consumed.push(ch);
                }
            }
        }

        let mut full = consumed.clone();
        full.push_str(buf.remaining());
        assert_eq!(full, appended);
    }

    #[test]
    fn test_full_drain_compacts() {
        let mut buf = TextAppendingBuffer::new(1000);
        buf.append("ab");
        buf.next();
        buf.next();
        // 完全消费后即使未达阈值也会紧凑化
        assert_eq!(buf.pending.len(), 0);
        assert_eq!(buf.cursor, 0);
    }

    #[test]
    fn test_multibyte_characters() {
        let mut buf = TextAppendingBuffer::new(2);
        buf.append("你好a");
        assert_eq!(buf.next(), Some('你'));
        assert_eq!(buf.next(), Some('好'));
        assert_eq!(buf.next(), Some('a'));
        assert_eq!(buf.next(), None);
    }

    #[test]
    fn test_clear() {
        let mut buf = TextAppendingBuffer::default();
        buf.append("abc");
        buf.next();
        buf.clear();
        assert!(buf.is_empty());
        assert_eq!(buf.remaining(), "");
    }
}
