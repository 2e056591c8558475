//! # Controller 模块
//!
//! 对话推进控制器：Normal / Auto / Skip 三态状态机。
//!
//! ## 转换契约
//!
//! 1. `next == current` 时整体无操作
//! 2. 先执行当前状态的退出动作（Auto/Skip 退回 Normal 并取消调度）
//! 3. 再执行新状态的进入动作（Auto/Skip 只能从 Normal 进入，
//!    违反即断言失败）
//!
//! 控制器不直接持有故事图，只通过 [`StoryFlow`] 推进；故事事件
//! 由宿主（或注册表）转发到 [`on_story_event`]。
//!
//! [`on_story_event`]: DialogueProgressionController::on_story_event

use regex::Regex;
use tracing::debug;

use super::events::{DialogueChangedData, StoryEvent, StoryFlow};
use super::schedule::{ScheduledStep, StepPoll};
use super::state::{DialogueState, ModeEvent};
use crate::config::{DialogueConfig, DialogueUpdateMode};
use crate::error::ConfigError;
use crate::text::TextRevealBuffer;

/// 对话推进控制器
///
/// 持有逐字显示缓冲与至多一个计划推进任务，按配置响应故事事件
/// 与用户点击。
pub struct DialogueProgressionController {
    /// 对话框类型标识
    box_type: String,
    /// 对话内容更新方式
    update_mode: DialogueUpdateMode,
    /// 说话者名匹配（编译后的正则）
    name_regex: Option<Regex>,
    /// 说话者名所在捕获组
    name_group: usize,
    /// Auto 模式每字符等待时长（秒）
    auto_wait_time_per_character: f32,
    /// Skip 模式固定延迟（秒）
    skip_delay: f32,
    /// 分支后是否恢复 Auto
    continue_auto_after_branch: bool,
    /// 分支后是否恢复 Skip
    continue_skip_after_branch: bool,

    /// 逐字显示缓冲
    reveal: TextRevealBuffer,
    /// 当前说话者名（Overwrite 模式下由正则拆出）
    speaker_name: Option<String>,

    /// 当前状态
    state: DialogueState,
    /// 分支出现时快照的状态
    state_before_branch: DialogueState,
    /// 进入 Skip 时保存的逐字动画开关
    should_need_animation: bool,

    /// 当前对话文本（用于计算 Auto 延迟）
    current_dialogue_text: String,
    /// 距上次对话变化累积的时间
    time_after_dialogue_change: f32,
    /// 当前是否有可用对话（无对话时不调度）
    dialogue_available: bool,
    /// 计划中的推进任务（至多一个）
    scheduled: Option<ScheduledStep>,

    /// 待取走的模式切换事件
    events: Vec<ModeEvent>,
}

impl std::fmt::Debug for DialogueProgressionController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DialogueProgressionController")
            .field("box_type", &self.box_type)
            .field("state", &self.state)
            .field("dialogue_available", &self.dialogue_available)
            .field("scheduled", &self.scheduled.is_some())
            .finish()
    }
}

impl DialogueProgressionController {
    /// 按配置创建控制器
    ///
    /// # 返回
    /// 说话者名正则无效时返回 [`ConfigError::InvalidNamePattern`]。
    pub fn new(config: DialogueConfig) -> Result<Self, ConfigError> {
        let name_regex = match &config.name_pattern {
            Some(pattern) => {
                Some(
                    Regex::new(pattern).map_err(|source| ConfigError::InvalidNamePattern {
                        pattern: pattern.clone(),
                        source,
                    })?,
                )
            }
            None => None,
        };

        Ok(Self {
            box_type: config.box_type,
            update_mode: config.update_mode,
            name_regex,
            name_group: config.name_group,
            auto_wait_time_per_character: config.auto_wait_time_per_character,
            skip_delay: config.skip_delay,
            continue_auto_after_branch: config.continue_auto_after_branch,
            continue_skip_after_branch: config.continue_skip_after_branch,
            reveal: TextRevealBuffer::new()
                .with_character_display_duration(config.character_display_duration),
            speaker_name: None,
            state: DialogueState::Normal,
            state_before_branch: DialogueState::Normal,
            should_need_animation: true,
            current_dialogue_text: String::new(),
            time_after_dialogue_change: 0.0,
            dialogue_available: false,
            scheduled: None,
            events: Vec::new(),
        })
    }

    // ========== 查询 ==========

    /// 对话框类型标识
    pub fn box_type(&self) -> &str {
        &self.box_type
    }

    /// 当前状态
    pub fn state(&self) -> DialogueState {
        self.state
    }

    /// 已显示文本
    pub fn displayed(&self) -> &str {
        self.reveal.displayed()
    }

    /// 当前说话者名
    pub fn speaker_name(&self) -> Option<&str> {
        self.speaker_name.as_deref()
    }

    /// 逐字动画是否仍在进行
    pub fn is_animating(&self) -> bool {
        self.reveal.is_animating()
    }

    /// 开关逐字动画
    pub fn set_needs_animation(&mut self, needs_animation: bool) {
        self.reveal.set_needs_animation(needs_animation);
    }

    /// 取走排队的模式切换事件
    pub fn take_events(&mut self) -> Vec<ModeEvent> {
        std::mem::take(&mut self.events)
    }

    // ========== 状态机 ==========

    /// 状态转换
    ///
    /// 见模块文档的转换契约。`next == current` 时无操作。
    pub fn set_state(&mut self, next: DialogueState) {
        if self.state == next {
            return;
        }

        // 退出动作
        match self.state {
            DialogueState::Normal => {}
            DialogueState::Auto => {
                self.stop_auto();
                self.events.push(ModeEvent::AutoModeStops);
            }
            DialogueState::Skip => {
                self.stop_skip();
                self.events.push(ModeEvent::SkipModeStops);
            }
        }

        // 进入动作
        match next {
            DialogueState::Normal => {
                self.state = DialogueState::Normal;
            }
            DialogueState::Auto => {
                self.begin_auto();
                self.events.push(ModeEvent::AutoModeStarts);
            }
            DialogueState::Skip => {
                self.begin_skip();
                self.events.push(ModeEvent::SkipModeStarts);
            }
        }
    }

    /// 进入 Auto 模式
    ///
    /// 调用时状态必须为 Normal（退出动作已先行）。
    fn begin_auto(&mut self) {
        assert_eq!(
            self.state,
            DialogueState::Normal,
            "进入 Auto 前状态必须为 Normal"
        );
        debug!(box_type = %self.box_type, "进入 Auto 模式");
        self.state = DialogueState::Auto;
        self.try_schedule(self.auto_scheduled_time());
    }

    /// 退出 Auto 模式
    fn stop_auto(&mut self) {
        assert_eq!(
            self.state,
            DialogueState::Auto,
            "退出 Auto 前状态必须为 Auto"
        );
        debug!(box_type = %self.box_type, "退出 Auto 模式");
        self.state = DialogueState::Normal;
        self.try_remove_schedule();
    }

    /// 进入 Skip 模式
    ///
    /// 先把半途的逐字动画整体冲刷，保存动画开关后关闭它。
    fn begin_skip(&mut self) {
        assert_eq!(
            self.state,
            DialogueState::Normal,
            "进入 Skip 前状态必须为 Normal"
        );
        debug!(box_type = %self.box_type, "进入 Skip 模式");
        self.reveal.flush();
        self.should_need_animation = self.reveal.needs_animation();
        self.reveal.set_needs_animation(false);
        self.state = DialogueState::Skip;
        self.try_schedule(self.skip_delay);
    }

    /// 退出 Skip 模式，恢复进入时保存的动画开关
    fn stop_skip(&mut self) {
        assert_eq!(
            self.state,
            DialogueState::Skip,
            "退出 Skip 前状态必须为 Skip"
        );
        debug!(box_type = %self.box_type, "退出 Skip 模式");
        self.reveal.set_needs_animation(self.should_need_animation);
        self.state = DialogueState::Normal;
        self.try_remove_schedule();
    }

    // ========== 调度 ==========

    /// Auto 模式下当前句的推进延迟
    fn auto_scheduled_time(&self) -> f32 {
        self.auto_wait_time_per_character * self.current_dialogue_text.chars().count() as f32
    }

    /// 尝试创建计划推进
    ///
    /// 无可用对话时是受保护的无操作。
    fn try_schedule(&mut self, delay: f32) {
        if self.dialogue_available {
            self.scheduled = Some(ScheduledStep::new(delay));
        }
    }

    /// 取消计划推进
    fn try_remove_schedule(&mut self) {
        self.scheduled = None;
    }

    /// 按当前状态重建调度
    ///
    /// 对话变化后旧调度作废，针对新句重新计算。
    fn set_schedule(&mut self) {
        self.try_remove_schedule();
        match self.state {
            DialogueState::Normal => {}
            DialogueState::Auto => self.try_schedule(self.auto_scheduled_time()),
            DialogueState::Skip => self.try_schedule(self.skip_delay),
        }
    }

    // ========== 故事事件 ==========

    /// 处理故事事件
    ///
    /// 宿主（或注册表）把故事侧事件转发到此处；只有激活中的
    /// 控制器应当收到事件。
    pub fn on_story_event(&mut self, event: &StoryEvent) {
        match event {
            StoryEvent::DialogueWillChange => self.on_dialogue_will_change(),
            StoryEvent::DialogueChanged(data) => self.on_dialogue_changed(data),
            StoryEvent::BranchOccurs => self.on_branch_occurs(),
            StoryEvent::BranchSelected => self.on_branch_selected(),
            StoryEvent::CurrentRouteEnded => {
                self.set_state(DialogueState::Normal);
            }
            StoryEvent::BookmarkWillLoad => {}
        }
    }

    /// 对话即将变化：停止计时，旧调度不再允许触发
    fn on_dialogue_will_change(&mut self) {
        self.time_after_dialogue_change = 0.0;
        self.dialogue_available = false;
    }

    /// 对话已变化：重启计时、渲染新句、按当前状态重建调度
    fn on_dialogue_changed(&mut self, data: &DialogueChangedData) {
        self.time_after_dialogue_change = 0.0;
        self.dialogue_available = true;
        self.current_dialogue_text = data.text.clone();
        debug!(box_type = %self.box_type, text = %data.text, "对话变化");

        match self.update_mode {
            DialogueUpdateMode::Overwrite => self.overwrite_dialogue_display(&data.text),
            DialogueUpdateMode::Append => {
                self.reveal.append(&format!("{}\n\n", data.text));
            }
        }

        self.set_schedule();
    }

    /// 分支出现：快照当前状态并强制回 Normal
    fn on_branch_occurs(&mut self) {
        self.state_before_branch = self.state;
        self.set_state(DialogueState::Normal);
    }

    /// 分支选择完成：按配置决定是否恢复分支前的状态
    ///
    /// 此时状态必须为 Normal，否则说明上游协作者的事件顺序有误。
    fn on_branch_selected(&mut self) {
        assert_eq!(
            self.state,
            DialogueState::Normal,
            "分支恢复时状态必须为 Normal"
        );
        match self.state_before_branch {
            DialogueState::Normal => {}
            DialogueState::Auto => {
                let next = if self.continue_auto_after_branch {
                    DialogueState::Auto
                } else {
                    DialogueState::Normal
                };
                self.set_state(next);
            }
            DialogueState::Skip => {
                let next = if self.continue_skip_after_branch {
                    DialogueState::Skip
                } else {
                    DialogueState::Normal
                };
                self.set_state(next);
            }
        }
    }

    // ========== 显示 ==========

    /// 覆盖式更新显示内容，必要时拆出说话者名
    fn overwrite_dialogue_display(&mut self, text: &str) {
        let (name, content) = self.parse_dialogue_text(text);
        self.speaker_name = if name.is_empty() { None } else { Some(name) };
        self.reveal.set(&content);
    }

    /// 按配置的正则拆分 "名字: 内容" 形式的对话文本
    ///
    /// 正则需从文本开头匹配；未匹配时名字为空、全文作为内容。
    fn parse_dialogue_text(&self, text: &str) -> (String, String) {
        if let Some(re) = &self.name_regex
            && let Some(caps) = re.captures(text)
            && let Some(whole) = caps.get(0)
            && whole.start() == 0
        {
            let name = caps
                .get(self.name_group)
                .map(|g| g.as_str().to_string())
                .unwrap_or_default();
            let content = text[whole.end()..].trim().to_string();
            return (name, content);
        }
        (String::new(), text.trim().to_string())
    }

    /// 清空当前页的显示内容
    pub fn new_page(&mut self) {
        self.overwrite_dialogue_display("");
    }

    // ========== 输入与推进 ==========

    /// 处理点击
    ///
    /// - Normal 且动画已结束：推进故事
    /// - 动画进行中（任意状态）：冲刷动画，然后强制回 Normal
    /// - Auto/Skip 且动画已结束：只强制回 Normal，本次点击不推进
    pub fn on_click(&mut self, story: &mut dyn StoryFlow) {
        if self.state == DialogueState::Normal && !self.reveal.is_animating() {
            story.step();
            return;
        }

        if self.reveal.is_animating() {
            self.reveal.flush();
        }

        self.set_state(DialogueState::Normal);
    }

    /// 推进一帧
    ///
    /// 帧内顺序：先累积对话变化计时，再推进逐字显示，最后轮询
    /// 计划推进。推进执行时若故事无法前进，强制回 Normal。
    pub fn tick(&mut self, dt: f32, story: &mut dyn StoryFlow) {
        if self.dialogue_available {
            self.time_after_dialogue_change += dt;
        }

        self.reveal.tick(dt);

        if let Some(step) = self.scheduled.as_mut()
            && step.poll(self.time_after_dialogue_change) == StepPoll::Ready
        {
            self.scheduled = None;
            if story.can_step_forward() {
                story.step();
            } else {
                self.set_state(DialogueState::Normal);
            }
        }
    }

    /// 停用控制器
    ///
    /// 注册表切换对话框模式时调用：取消计划推进，保证停用的
    /// 控制器不会再驱动故事。
    pub fn deactivate(&mut self) {
        debug!(box_type = %self.box_type, "对话框停用");
        self.try_remove_schedule();
    }
}
