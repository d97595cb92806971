pub mod answer_buffer;
pub mod answer_capture;
pub mod session;

pub use answer_buffer::AnswerBuffer;
pub use answer_capture::{AnswerCapture, CaptureStep};
pub use session::{CognitiveSession, SessionUiState};
