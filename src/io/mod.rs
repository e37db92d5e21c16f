pub mod input;
pub mod jsonl;
pub mod output;

pub use input::*;
pub use jsonl::*;
pub use output::*;
