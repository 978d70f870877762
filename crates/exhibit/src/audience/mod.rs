pub mod model;
pub mod service;

pub use model::CommentOutcome;
pub use service::Audience;
