pub mod auth;
pub mod email;
pub mod inquiry;
pub mod types;

pub use types::AppState;
