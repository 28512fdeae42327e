//! HTTP front end for shelf-blob: one flat file namespace served over
//! GET / POST / DELETE, plus a static index page at the root.

mod config;
mod error;
mod routes;
mod state;

pub use config::ServerConfig;
pub use error::ApiError;
pub use routes::build;
pub use state::AppState;
