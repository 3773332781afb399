pub mod emit;
pub mod error;
pub mod expect;
pub mod list;
pub mod logging;
pub mod macros;
pub mod program;
pub mod project;
pub mod solution;
pub mod target;

pub use error::{Error, Result};
pub use program::{Config, Program};
pub use target::{Target, TargetKind};
