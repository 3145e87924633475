pub mod attrs;
pub mod blog;
pub mod http;
pub mod model;
pub mod service;
