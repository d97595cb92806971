pub mod auth_client;
pub mod cognitive_client;
pub mod diary_client;
pub(crate) mod http;

pub use auth_client::AuthClient;
pub use cognitive_client::{CognitiveApi, HttpCognitiveClient};
pub use diary_client::DiaryClient;
