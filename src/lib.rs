//! # Haru Cognitive
//!
//! 认知能力检查的客户端核心：会话状态机 + 答案提交协议
//!
//! ## 架构设计
//!
//! ### ① 数据层（Models）
//! - `models/` - 与服务端约定的请求/响应结构，统一在这里完成解码
//!
//! ### ② 接口层（Clients）
//! - `clients/` - `CognitiveApi` 协议与基于 reqwest 的实现，以及登录、日记接口
//!
//! ### ③ 业务能力层（Services）
//! - `TokenStore` - 登录令牌存储能力
//! - `ResultWriter` - 检查记录写入能力
//!
//! ### ④ 流程层（Workflow）
//! - `CognitiveSession` - 会话状态机（Idle → Loading → Ready → Submitting → Result / Error）
//! - `AnswerBuffer` - 每题一个槽位的答案缓冲区
//! - `AnswerCapture` - 调用方的逐题计时与作答记录
//!
//! ## 模块结构

pub mod app;
pub mod clients;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use app::App;
pub use clients::{AuthClient, CognitiveApi, DiaryClient, HttpCognitiveClient};
pub use config::Config;
pub use error::{ApiError, AppError, AppResult, SessionError};
pub use models::{
    AnswerItem, DiaryEntry, DiaryResponse, Question, RecentSession, ResultDiary, ResultSummary,
    StartResponse,
};
pub use workflow::{AnswerBuffer, AnswerCapture, CaptureStep, CognitiveSession, SessionUiState};
