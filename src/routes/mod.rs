pub mod payments;
pub mod status;
