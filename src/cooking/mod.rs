pub mod nutrition;
pub mod scaling;
pub mod units;
