pub mod calc;
pub mod common;
pub mod completions;
pub mod custom;
pub mod customize;
pub mod methods;
pub mod timer;
