pub mod implementations;
pub mod traits;

pub use implementations::{RngVariates, ScriptedVariates};
pub use traits::VariateSource;
