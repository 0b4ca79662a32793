pub mod analysis;
pub mod billing;
pub mod collector;
pub mod comparison;
pub mod consumption;
pub mod pv;
pub mod units;
