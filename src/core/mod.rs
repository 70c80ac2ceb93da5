pub mod instrument;
pub mod music;

pub use instrument::*;
pub use music::*;
