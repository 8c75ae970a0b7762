pub mod cors;
pub mod error;
pub mod handlers;
pub mod routes;

pub use error::*;
pub use handlers::*;
pub use routes::*;
