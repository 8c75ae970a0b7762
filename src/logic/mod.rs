pub mod validate;

pub use validate::*;
