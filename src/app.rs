use std::sync::Arc;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines};
use tokio::time::Instant;
use tracing::{info, warn};

use crate::clients::{AuthClient, HttpCognitiveClient};
use crate::config::Config;
use crate::error::{AppError, AppResult, SessionError};
use crate::models::Question;
use crate::services::{initial_route, MemoryTokenStore, ResultWriter, Route, TokenStore};
use crate::utils::logging::{init_log_file, log_startup, print_result};
use crate::workflow::{AnswerCapture, CaptureStep, CognitiveSession};

/// 应用主结构
///
/// 控制台版本的检查流程：题目打印到标准输出，标准输入代替语音识别。
/// 以 `#` 开头的输入行写入手动输入通道。
pub struct App {
    config: Config,
    tokens: Arc<MemoryTokenStore>,
    writer: ResultWriter,
}

impl App {
    /// 初始化应用
    pub async fn initialize(config: Config) -> AppResult<Self> {
        // 初始化日志文件
        init_log_file(&config.output_log_file)?;

        log_startup(&config);

        let tokens = Arc::new(MemoryTokenStore::with_token(config.auth_token.clone()));

        if initial_route(tokens.as_ref()) == Route::Login {
            match (&config.username, &config.password) {
                (Some(username), Some(password)) => {
                    AuthClient::new(&config)?
                        .login(tokens.as_ref(), username, password)
                        .await?;
                }
                _ => warn!("⚠️ 没有登录令牌，也没有配置账号，以未登录状态继续"),
            }
        }

        Ok(Self {
            writer: ResultWriter::with_path(&config.output_log_file),
            config,
            tokens,
        })
    }

    /// 运行一次完整的检查
    pub async fn run(&self) -> AppResult<()> {
        let client = HttpCognitiveClient::new(&self.config)?.with_token(self.tokens.load());
        let mut session = CognitiveSession::from_config(Arc::new(client), &self.config);

        if let Err(e) = session
            .start_test(
                self.config.user_id,
                self.config.question_count,
                self.config.category.as_deref(),
            )
            .await
        {
            self.writer.record_failure(None, &e.to_string());
            return Err(e.into());
        }

        let questions = session.questions().to_vec();
        let mut capture = AnswerCapture::new(questions.len(), self.config.question_time_budget());
        let mut lines = BufReader::new(tokio::io::stdin()).lines();

        for question in &questions {
            let step =
                answer_question(&mut session, &mut capture, &mut lines, question, questions.len())
                    .await?;
            if step == CaptureStep::Completed {
                info!("所有答案收集完成");
            }
        }

        let (stt_list, latency_ms) = capture.finish();
        let session_id = session.session_id().unwrap_or_default();

        loop {
            match session.submit(&stt_list, &latency_ms).await {
                Ok(summary) => {
                    self.writer.write_result(session_id, &summary)?;
                    print_result(session_id, &summary, &self.config.output_log_file);
                    return Ok(());
                }
                Err(SessionError::Submit(reason)) => {
                    self.writer.record_failure(Some(session_id), &reason);
                    println!("提交失败: {}。输入 r 重试，其他任意内容退出", reason);
                    match lines.next_line().await {
                        Ok(Some(line)) if line.trim() == "r" => continue,
                        _ => return Err(SessionError::Submit(reason).into()),
                    }
                }
                Err(e) => return Err(e.into()),
            }
        }
    }
}

/// 处理一道题：等待输入直到时间用完
async fn answer_question<R>(
    session: &mut CognitiveSession,
    capture: &mut AnswerCapture,
    lines: &mut Lines<R>,
    question: &Question,
    total: usize,
) -> AppResult<CaptureStep>
where
    R: AsyncBufRead + Unpin,
{
    println!(
        "\n问题 {} / {}: {}",
        question.question_no, total, question.text
    );
    println!(
        "（{}秒内作答，直接输入为语音答案，以 # 开头为手动输入）",
        capture.budget().as_secs()
    );

    let started = Instant::now();
    let deadline = started + capture.budget();

    loop {
        match tokio::time::timeout_at(deadline, lines.next_line()).await {
            Err(_) => {
                warn!("⏰ 题目 {} 时间用完", question.question_no);
                return Ok(capture.record_timeout(""));
            }
            Ok(Ok(Some(line))) => {
                if let Some(typed) = line.strip_prefix('#') {
                    session.update_answer(question.question_no, typed.trim());
                    continue;
                }
                return Ok(capture.record(line.trim(), started.elapsed()));
            }
            Ok(Ok(None)) => {
                return Ok(capture.record("", started.elapsed()));
            }
            Ok(Err(e)) => return Err(AppError::file_read_failed("stdin", e)),
        }
    }
}
