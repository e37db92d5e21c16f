pub mod episode;
pub mod records;

pub use episode::*;
pub use records::*;
