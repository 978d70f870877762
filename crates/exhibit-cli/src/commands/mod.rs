//! CLI command handlers

pub mod audience;
pub mod curator;
pub mod feedback;
pub mod init;
pub mod status;

pub use audience::run_audience;
pub use curator::run_curator;
pub use feedback::run_feedback;
pub use init::run_init;
pub use status::run_status;
