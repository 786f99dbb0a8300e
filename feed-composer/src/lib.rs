pub mod config;
pub mod models;
pub mod services;

pub use config::FeedConfig;
pub use models::{ContentBlock, FeedView};
pub use services::composer::FeedComposer;
pub use services::session::SessionState;
