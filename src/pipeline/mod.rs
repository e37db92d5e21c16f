pub mod batch;
pub mod collect;
pub mod convert;
pub mod extract;
pub mod extract_ai;
pub mod finetune;
pub mod split;

pub use batch::*;
pub use collect::*;
pub use convert::*;
pub use extract::*;
pub use extract_ai::*;
pub use finetune::*;
pub use split::*;
