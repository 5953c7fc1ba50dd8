pub mod chart;
pub mod product;

pub use chart::*;
pub use product::*;
