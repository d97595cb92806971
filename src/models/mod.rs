pub mod answer;
pub mod auth;
pub mod diary;
pub mod question;
pub mod result;

pub use answer::{AnswerItem, SubmitRequest};
pub use auth::{LoginRequest, LoginResponse};
pub use diary::{entries_by_date, DiaryEntry, DiaryResponse, ResultDiary};
pub use question::{Question, StartResponse};
pub use result::{RecentSession, ResultSummary};
