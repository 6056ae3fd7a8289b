mod auth;
mod results;

pub use auth::TokenManager;
pub use results::{ResultError, ResultManager};
