//! 答案缓冲区
//!
//! 会话开始时按题目数量预先分配，按位置（0-based）与题目一一对应

use crate::models::{AnswerItem, Question};

#[derive(Debug, Clone, PartialEq, Eq)]
struct AnswerSlot {
    question_no: u32,
    question_id: i64,
    stt_text: String,
    typed_text: String,
    latency_ms: u64,
}

/// 一个会话的答案缓冲区
///
/// 每道题有一个槽位，包含语音识别文本、手动输入文本和耗时（毫秒）。
/// 长度始终等于题目数量；未作答的槽位保持空字符串和 0。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnswerBuffer {
    slots: Vec<AnswerSlot>,
}

impl AnswerBuffer {
    pub fn for_questions(questions: &[Question]) -> Self {
        Self {
            slots: questions
                .iter()
                .map(|q| AnswerSlot {
                    question_no: q.question_no,
                    question_id: q.question_id,
                    stt_text: String::new(),
                    typed_text: String::new(),
                    latency_ms: 0,
                })
                .collect(),
        }
    }

    /// 写入（或覆盖）某题的手动输入答案，题号不存在时返回 false
    pub fn set_typed(&mut self, question_no: u32, text: impl Into<String>) -> bool {
        match self.slots.iter_mut().find(|s| s.question_no == question_no) {
            Some(slot) => {
                slot.typed_text = text.into();
                true
            }
            None => false,
        }
    }

    pub fn typed_text(&self, question_no: u32) -> Option<&str> {
        self.slots
            .iter()
            .find(|s| s.question_no == question_no)
            .map(|s| s.typed_text.as_str())
    }

    /// 按位置写入语音识别结果和耗时
    ///
    /// 列表比题目短时，缺少的位置使用空字符串和 0；多余的元素被忽略。
    pub fn fill_capture(&mut self, stt_list: &[String], latency_ms: &[u64]) {
        for (i, slot) in self.slots.iter_mut().enumerate() {
            slot.stt_text = stt_list.get(i).cloned().unwrap_or_default();
            slot.latency_ms = latency_ms.get(i).copied().unwrap_or(0);
        }
    }

    /// 生成提交用的答案列表，顺序与题目一致
    pub fn to_items(&self) -> Vec<AnswerItem> {
        self.slots
            .iter()
            .map(|s| AnswerItem {
                question_no: s.question_no,
                question_id: s.question_id,
                stt_text: Some(s.stt_text.clone()),
                typed_text: Some(s.typed_text.clone()),
                latency_ms: Some(s.latency_ms),
            })
            .collect()
    }
}
