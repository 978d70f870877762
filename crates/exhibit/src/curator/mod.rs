pub mod model;
pub mod service;

pub use model::{Exhibit, Statement};
pub use service::Curator;
