pub mod datetime;
pub mod payment;
pub mod status;
