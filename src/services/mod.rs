pub mod result_writer;
pub mod token_store;

pub use result_writer::ResultWriter;
pub use token_store::{initial_route, MemoryTokenStore, Route, TokenStore};
