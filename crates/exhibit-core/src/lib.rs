//! # AI Exhibition Core
//!
//! Content model and generative model abstraction shared by the curator,
//! the audience and the hosted model backends.

pub mod caption;
pub mod error;
pub mod model;
pub mod request;
pub mod testing;

pub use caption::extract_captions;
pub use error::{CoreError, Result};
pub use model::{GenerativeModel, GenerativeModelExt, ModelMetadata, SharedModel};
pub use request::{
    Blob, GenerateRequest, GenerateResponse, GenerationConfig, Modality, Part, RequestId,
    ResponseMetadata,
};
