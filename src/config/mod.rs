mod error;
mod model;
mod splice;
mod store;

pub use error::*;
pub use model::*;
pub use store::*;
