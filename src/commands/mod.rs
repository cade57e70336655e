pub mod engine;
pub mod summarize;

pub use engine::*;
pub use summarize::*;
