mod error;
mod model;
mod service;

pub use error::*;
pub use model::*;
pub use service::*;
