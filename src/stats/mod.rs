//! Incrementally updatable statistical models of the lateral axe variable.
//!
//! * [Distribution] - strategy trait (`fit`, `std`, `mean`, `replace`)
//! * [Normal] over [NormalStats] - count, sum and sum of squares, the
//!   default strategy of lateral axe models

pub mod distribution;
pub mod normal;

pub use distribution::Distribution;
pub use normal::{Normal, NormalStats};
