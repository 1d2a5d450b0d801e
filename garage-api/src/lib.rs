pub mod models;
pub mod restful;

pub use models::*;
