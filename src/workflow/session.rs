//! 认知检查会话 - 流程层
//!
//! 核心职责：管理一次检查的完整生命周期
//!
//! 状态流转：
//! 1. Idle → Loading → Ready（获取题目）
//! 2. Ready → Submitting → Result（提交答案）
//! 3. 任意失败 → Error，reset() 回到 Idle

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, error, info, warn};

use crate::clients::CognitiveApi;
use crate::config::Config;
use crate::error::{ApiError, SessionError};
use crate::models::{Question, ResultSummary};
use crate::workflow::answer_buffer::AnswerBuffer;

/// 界面可观察的会话状态，同一时刻只有一个
#[derive(Debug, Clone, PartialEq)]
pub enum SessionUiState {
    Idle,
    Loading,
    Ready(Vec<Question>),
    Submitting,
    Result(ResultSummary),
    Error(String),
}

#[derive(Debug)]
struct ActiveSession {
    session_id: i64,
    questions: Vec<Question>,
    answers: AnswerBuffer,
}

/// 认知检查会话状态机
///
/// - 唯一持有会话数据（sessionId / 题目 / 答案缓冲区）
/// - 不持有时钟：每题的耗时由调用方在 `submit` 时传入
/// - 不自动重试：失败后由调用方重新调用 `start_test` 或 `submit`
pub struct CognitiveSession {
    api: Arc<dyn CognitiveApi>,
    request_timeout: Duration,
    active: Option<ActiveSession>,
    state: SessionUiState,
}

impl CognitiveSession {
    pub fn new(api: Arc<dyn CognitiveApi>, request_timeout: Duration) -> Self {
        Self {
            api,
            request_timeout,
            active: None,
            state: SessionUiState::Idle,
        }
    }

    pub fn from_config(api: Arc<dyn CognitiveApi>, config: &Config) -> Self {
        Self::new(api, config.request_timeout())
    }

    pub fn state(&self) -> &SessionUiState {
        &self.state
    }

    pub fn session_id(&self) -> Option<i64> {
        self.active.as_ref().map(|a| a.session_id)
    }

    pub fn questions(&self) -> &[Question] {
        self.active
            .as_ref()
            .map(|a| a.questions.as_slice())
            .unwrap_or_default()
    }

    pub fn typed_answer(&self, question_no: u32) -> Option<&str> {
        self.active
            .as_ref()
            .and_then(|a| a.answers.typed_text(question_no))
    }

    /// `Loading` / `Submitting` 期间不允许再次发起请求
    pub fn is_busy(&self) -> bool {
        matches!(
            self.state,
            SessionUiState::Loading | SessionUiState::Submitting
        )
    }

    /// 开始检查：创建会话并获取题目
    ///
    /// 会丢弃之前的会话和结果。题目数量以服务端返回为准。
    pub async fn start_test(
        &mut self,
        user_id: u32,
        count: u32,
        category: Option<&str>,
    ) -> Result<(), SessionError> {
        if self.is_busy() {
            return Err(SessionError::Busy("start_test"));
        }

        self.active = None;
        self.state = SessionUiState::Loading;

        info!(
            "🧠 开始检查 userId: {}, 题目数: {}, 分类: {:?}",
            user_id, count, category
        );

        if user_id == 0 || count == 0 {
            return Err(self.fail_fetch("userId 和 count 必须为正数".to_string()));
        }

        let api = Arc::clone(&self.api);
        let fetched = self
            .with_timeout(api.fetch_questions(user_id, count, category))
            .await
            .and_then(|res| res.validated().map_err(|e| e.to_string()));

        let start = match fetched {
            Ok(start) => start,
            Err(msg) => return Err(self.fail_fetch(msg)),
        };

        if start.questions.len() != count as usize {
            warn!(
                "[会话 {}] 服务端返回 {} 道题（请求 {} 道）",
                start.session_id,
                start.questions.len(),
                count
            );
        }

        info!(
            "[会话 {}] ✓ 检查开始，题目数: {}",
            start.session_id,
            start.questions.len()
        );

        self.state = SessionUiState::Ready(start.questions.clone());
        self.active = Some(ActiveSession {
            session_id: start.session_id,
            answers: AnswerBuffer::for_questions(&start.questions),
            questions: start.questions,
        });

        Ok(())
    }

    /// 记录某题的手动输入答案（与语音通道相互独立）
    ///
    /// 没有会话、或会话已出结果时不做任何事
    pub fn update_answer(&mut self, question_no: u32, text: impl Into<String>) {
        if matches!(
            self.state,
            SessionUiState::Result(_) | SessionUiState::Submitting | SessionUiState::Loading
        ) {
            debug!("当前状态不接受答案更新: {:?}", self.state);
            return;
        }

        let Some(active) = self.active.as_mut() else {
            debug!("没有进行中的会话，忽略题目 {} 的答案", question_no);
            return;
        };

        if !active.answers.set_typed(question_no, text) {
            warn!(
                "[会话 {}] ⚠️ 题号 {} 不存在，忽略输入",
                active.session_id, question_no
            );
        }
    }

    /// 提交整个会话的答案
    ///
    /// `stt_list[i]` 与 `latency_ms[i]` 对应第 i 道题（0-based）。
    /// 失败后会话数据保留，可以直接再次调用 `submit`。
    pub async fn submit(
        &mut self,
        stt_list: &[String],
        latency_ms: &[u64],
    ) -> Result<ResultSummary, SessionError> {
        if self.is_busy() {
            return Err(SessionError::Busy("submit"));
        }

        let Some(active) = self.active.as_mut() else {
            error!("没有 sessionId，无法提交");
            return Err(SessionError::InvalidSession);
        };

        if matches!(self.state, SessionUiState::Result(_)) {
            return Err(SessionError::Finished);
        }

        if stt_list.len() != active.questions.len() || latency_ms.len() != active.questions.len() {
            warn!(
                "[会话 {}] 答案数量与题目不一致: stt {}, latency {}, 题目 {}",
                active.session_id,
                stt_list.len(),
                latency_ms.len(),
                active.questions.len()
            );
        }

        active.answers.fill_capture(stt_list, latency_ms);
        let session_id = active.session_id;
        let items = active.answers.to_items();

        debug!("[会话 {}] 提交数据: {:?}", session_id, items);

        self.state = SessionUiState::Submitting;

        let api = Arc::clone(&self.api);
        match self.with_timeout(api.submit_answers(session_id, &items)).await {
            Ok(summary) => {
                info!(
                    "[会话 {}] ✓ 提交成功 总分: {}, 等级: {}",
                    session_id, summary.total_score, summary.grade
                );
                self.state = SessionUiState::Result(summary.clone());
                Ok(summary)
            }
            Err(msg) => {
                let err = SessionError::Submit(msg);
                error!("[会话 {}] ❌ {}", session_id, err);
                self.state = SessionUiState::Error(err.to_string());
                Err(err)
            }
        }
    }

    /// 丢弃会话、答案、结果和错误，回到 Idle
    pub fn reset(&mut self) {
        self.active = None;
        self.state = SessionUiState::Idle;
        info!("状态初始化完成");
    }

    fn fail_fetch(&mut self, msg: String) -> SessionError {
        let err = SessionError::Fetch(msg);
        error!("❌ {}", err);
        self.active = None;
        self.state = SessionUiState::Error(err.to_string());
        err
    }

    async fn with_timeout<T>(
        &self,
        call: impl Future<Output = Result<T, ApiError>>,
    ) -> Result<T, String> {
        match tokio::time::timeout(self.request_timeout, call).await {
            Ok(result) => result.map_err(|e| e.to_string()),
            Err(_) => Err(format!(
                "请求超时 ({}s)",
                self.request_timeout.as_secs_f32()
            )),
        }
    }
}
