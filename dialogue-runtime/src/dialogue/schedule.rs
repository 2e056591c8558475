//! # Schedule 模块
//!
//! 计划推进：一个可取消的协作式任务。
//!
//! 任务每帧被控制器轮询一次。延迟以「距上次对话变化的时间」为
//! 基准而非绝对截止时刻：对话再次变化时旧任务整体作废，由控制器
//! 针对新的变化时间重建。延迟满足后还要再停一帧才执行，给最后
//! 一刻的取消和渲染留出窗口。

/// 轮询结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum StepPoll {
    /// 条件未满足，下一帧继续
    Pending,
    /// 本帧应执行推进
    Ready,
}

/// 计划中的推进任务
///
/// 每个控制器至多持有一个；取消即丢弃整个任务。
#[derive(Debug, Clone)]
pub(crate) struct ScheduledStep {
    /// 推进延迟（秒），与「距上次对话变化的时间」比较
    delay: f32,
    /// 延迟满足后是否已停过一帧
    grace_tick_done: bool,
}

impl ScheduledStep {
    pub(crate) fn new(delay: f32) -> Self {
        Self {
            delay,
            grace_tick_done: false,
        }
    }

    /// 轮询一次
    ///
    /// # 参数
    /// - `time_after_dialogue_change`: 距上次对话变化累积的时间
    pub(crate) fn poll(&mut self, time_after_dialogue_change: f32) -> StepPoll {
        if time_after_dialogue_change < self.delay {
            return StepPoll::Pending;
        }

        // 延迟满足后额外停一帧再推进
        if !self.grace_tick_done {
            self.grace_tick_done = true;
            return StepPoll::Pending;
        }

        StepPoll::Ready
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_waits_for_delay() {
        let mut step = ScheduledStep::new(0.5);
        assert_eq!(step.poll(0.0), StepPoll::Pending);
        assert_eq!(step.poll(0.3), StepPoll::Pending);
        assert_eq!(step.poll(0.49), StepPoll::Pending);
    }

    #[test]
    fn test_one_tick_grace_after_delay() {
        let mut step = ScheduledStep::new(0.5);
        // 延迟刚满足的那一帧不执行
        assert_eq!(step.poll(0.5), StepPoll::Pending);
        // 再下一帧才执行
        assert_eq!(step.poll(0.5), StepPoll::Ready);
    }

    #[test]
    fn test_zero_delay_still_has_grace_tick() {
        let mut step = ScheduledStep::new(0.0);
        assert_eq!(step.poll(0.0), StepPoll::Pending);
        assert_eq!(step.poll(0.0), StepPoll::Ready);
    }
}
