//! 逐题作答记录（调用方的计时规则）
//!
//! 状态机本身不持有时钟。调用方按题号 1..N 逐题推进，每题有固定的作答时间，
//! 超时后用已有的部分答案进入下一题，耗时记为整个时间预算。

use std::time::Duration;

use tracing::debug;

/// 记录一题之后的下一步
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureStep {
    /// 进入下一题（1-based 题号）
    Next(u32),
    /// 所有题目已记录，可以提交
    Completed,
}

/// 一次检查的逐题作答记录
///
/// 耗时统一记为已用时间（毫秒），不超过每题的时间预算。
#[derive(Debug, Clone)]
pub struct AnswerCapture {
    budget: Duration,
    total: usize,
    stt_list: Vec<String>,
    latency_ms: Vec<u64>,
}

impl AnswerCapture {
    pub fn new(total: usize, budget: Duration) -> Self {
        Self {
            budget,
            total,
            stt_list: Vec::with_capacity(total),
            latency_ms: Vec::with_capacity(total),
        }
    }

    pub fn budget(&self) -> Duration {
        self.budget
    }

    /// 当前题号（1-based），全部记录完后为 None
    pub fn current_question_no(&self) -> Option<u32> {
        (!self.is_complete()).then(|| self.stt_list.len() as u32 + 1)
    }

    pub fn is_complete(&self) -> bool {
        self.stt_list.len() >= self.total
    }

    /// 已用时间对应的剩余时间
    pub fn remaining(&self, elapsed: Duration) -> Duration {
        self.budget.saturating_sub(elapsed)
    }

    /// 记录当前题的答案
    pub fn record(&mut self, transcript: impl Into<String>, elapsed: Duration) -> CaptureStep {
        if self.is_complete() {
            return CaptureStep::Completed;
        }

        let latency = elapsed.min(self.budget).as_millis() as u64;
        let transcript = transcript.into();

        debug!(
            "题目 {} 记录: {}, 耗时 {}ms",
            self.stt_list.len() + 1,
            transcript,
            latency
        );

        self.stt_list.push(transcript);
        self.latency_ms.push(latency);

        match self.current_question_no() {
            Some(next) => CaptureStep::Next(next),
            None => CaptureStep::Completed,
        }
    }

    /// 时间用完，用部分答案进入下一题
    pub fn record_timeout(&mut self, partial: impl Into<String>) -> CaptureStep {
        self.record(partial, self.budget)
    }

    /// 结束记录，返回 `(stt_list, latency_ms)`
    ///
    /// 中途停止时，未作答的题目补空字符串和 0，长度始终等于题目数量。
    pub fn finish(mut self) -> (Vec<String>, Vec<u64>) {
        self.stt_list.resize(self.total, String::new());
        self.latency_ms.resize(self.total, 0);
        (self.stt_list, self.latency_ms)
    }
}
