mod api;
mod error;
mod filter;
mod model;

pub use api::*;
pub use error::*;
pub use filter::*;
pub use model::*;

use crate::config::ServerContext;

/// Where candidate projects come from. One call is one round trip.
pub trait ProjectSource {
    fn list(&self, server: &ServerContext) -> DirectoryResult<Projects>;
}
