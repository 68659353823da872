pub mod ai_service;
pub mod parser;

pub use ai_service::*;
pub use parser::*;
