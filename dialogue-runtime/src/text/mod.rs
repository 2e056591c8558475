//! # Text 模块
//!
//! 逐字显示的文本缓冲。
//!
//! [`TextRevealBuffer`] 把文本拆成「已显示」与「待显示」两部分：
//! 新文本先进入追加缓冲，再按固定的每字符间隔逐个转移到已显示
//! 文本；关闭动画时每帧整体冲刷。渲染层只读取
//! [`displayed`](TextRevealBuffer::displayed)。

mod buffer;

use buffer::TextAppendingBuffer;

/// 默认每字符显示间隔（秒）
const DEFAULT_CHARACTER_DISPLAY_DURATION: f32 = 0.05;

/// 逐字显示缓冲
///
/// # 使用示例
///
/// ```ignore
/// let mut reveal = TextRevealBuffer::new();
/// reveal.set("第一句。");
///
/// // 主循环
/// reveal.tick(dt);
/// draw_text(reveal.displayed());
/// ```
#[derive(Debug, Clone)]
pub struct TextRevealBuffer {
    /// 已显示文本
    displayed: String,
    /// 待显示缓冲
    buffer: TextAppendingBuffer,
    /// 每字符显示间隔（秒）
    character_display_duration: f32,
    /// 是否需要逐字动画；为 false 时每帧整体冲刷
    needs_animation: bool,
    /// 距上次出字累积的时间
    time_since_last_char: f32,
}

impl TextRevealBuffer {
    /// 创建新的逐字显示缓冲
    pub fn new() -> Self {
        Self {
            displayed: String::new(),
            buffer: TextAppendingBuffer::default(),
            character_display_duration: DEFAULT_CHARACTER_DISPLAY_DURATION,
            needs_animation: true,
            time_since_last_char: 0.0,
        }
    }

    /// 设置每字符显示间隔
    pub fn with_character_display_duration(mut self, duration: f32) -> Self {
        self.character_display_duration = duration;
        self
    }

    /// 覆盖式更新
    ///
    /// 清空已显示文本与追加缓冲，再把新文本追加进缓冲。
    /// 显示内容立即刷新（变为空），新文本随后按当前动画设置出字。
    pub fn set(&mut self, text: &str) {
        self.displayed.clear();
        self.buffer.clear();
        self.append(text);
    }

    /// 追加文本到待显示尾部
    pub fn append(&mut self, text: &str) {
        self.buffer.append(text);
    }

    /// 冲刷：把所有未消费文本原子地转移到已显示文本
    ///
    /// 缓冲为空时是无操作。
    pub fn flush(&mut self) {
        if self.buffer.is_empty() {
            return;
        }
        self.displayed.push_str(self.buffer.remaining());
        self.buffer.clear();
    }

    /// 是否还有待显示文本
    pub fn is_animating(&self) -> bool {
        !self.buffer.is_empty()
    }

    /// 已显示文本
    pub fn displayed(&self) -> &str {
        &self.displayed
    }

    /// 是否开启逐字动画
    pub fn needs_animation(&self) -> bool {
        self.needs_animation
    }

    /// 开关逐字动画
    pub fn set_needs_animation(&mut self, needs_animation: bool) {
        self.needs_animation = needs_animation;
    }

    /// 推进一帧
    ///
    /// - 缓冲为空：蓄满出字计时，等待下一次输入（新文本的第一个
    ///   字符无需再等一个间隔）
    /// - 关闭动画：立即整体冲刷
    /// - 开启动画：按累积时间出字，时间跳变时一帧内可补出多个字符
    pub fn tick(&mut self, dt: f32) {
        if self.buffer.is_empty() {
            self.time_since_last_char = self.character_display_duration;
            return;
        }

        if !self.needs_animation {
            self.flush();
            return;
        }

        self.time_since_last_char += dt;
        if self.time_since_last_char < self.character_display_duration {
            return;
        }
        loop {
            if let Some(ch) = self.buffer.next() {
                self.displayed.push(ch);
            }
            self.time_since_last_char -= self.character_display_duration;
            if self.time_since_last_char < self.character_display_duration
                || self.buffer.is_empty()
            {
                break;
            }
        }
    }
}

impl Default for TextRevealBuffer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_append_flush_round_trip() {
        let mut reveal = TextRevealBuffer::new();
        reveal.set("");
        reveal.append("He");
        reveal.append("llo");
        reveal.flush();
        assert_eq!(reveal.displayed(), "Hello");
        assert!(!reveal.is_animating());
    }

    #[test]
    fn test_flush_on_empty_is_noop() {
        let mut reveal = TextRevealBuffer::new();
        reveal.set("abc");
        reveal.flush();
        assert_eq!(reveal.displayed(), "abc");
        reveal.flush();
        assert_eq!(reveal.displayed(), "abc");
    }

    #[test]
    fn test_paced_reveal_one_char_per_interval() {
        let mut reveal = TextRevealBuffer::new().with_character_display_duration(0.1);
        reveal.set("Hello");
        assert!(reveal.is_animating());

        // 每累积满一个 0.1s 间隔出一个字符
        let mut shown = Vec::new();
        shown.push(reveal.displayed().chars().count());
        for _ in 0..5 {
            reveal.tick(0.1);
            shown.push(reveal.displayed().chars().count());
        }

        assert_eq!(shown, vec![0, 1, 2, 3, 4, 5]);
        assert_eq!(reveal.displayed(), "Hello");
        assert!(!reveal.is_animating());
    }

    #[test]
    fn test_paced_reveal_catches_up_on_time_jump() {
        let mut reveal = TextRevealBuffer::new().with_character_display_duration(0.1);
        reveal.set("Hello");

        // 单帧时间跳变 0.35s -> 一帧内补出多个字符
        reveal.tick(0.35);
        let count = reveal.displayed().chars().count();
        assert_eq!(count, 3);
        assert_eq!(&"Hello"[..count], reveal.displayed());
    }

    #[test]
    fn test_no_animation_flushes_each_tick() {
        let mut reveal = TextRevealBuffer::new().with_character_display_duration(10.0);
        reveal.set_needs_animation(false);
        reveal.set("你好，世界");

        reveal.tick(0.001);
        assert_eq!(reveal.displayed(), "你好，世界");
    }

    #[test]
    fn test_set_overwrites_displayed() {
        let mut reveal = TextRevealBuffer::new();
        reveal.set("第一句");
        reveal.flush();
        assert_eq!(reveal.displayed(), "第一句");

        reveal.set("第二句");
        // 覆盖后已显示内容立即清空，新文本进入待显示缓冲
        assert_eq!(reveal.displayed(), "");
        assert!(reveal.is_animating());
        reveal.flush();
        assert_eq!(reveal.displayed(), "第二句");
    }

    #[test]
    fn test_set_mid_reveal_discards_pending() {
        let mut reveal = TextRevealBuffer::new().with_character_display_duration(0.1);
        reveal.set("aaaa");
        reveal.tick(0.1);
        assert_eq!(reveal.displayed(), "a");

        reveal.set("bb");
        reveal.flush();
        // 旧文本的未显示部分被整体丢弃
        assert_eq!(reveal.displayed(), "bb");
    }

    #[test]
    fn test_idle_keeps_timer_primed() {
        let mut reveal = TextRevealBuffer::new().with_character_display_duration(0.5);
        // 空转若干帧
        for _ in 0..10 {
            reveal.tick(0.1);
        }
        reveal.append("ab");
        // 新文本到达后第一个字符无需重新等待整个间隔
        reveal.tick(0.5);
        assert_eq!(reveal.displayed(), "ab");
    }
}
