pub mod checkout;
pub mod factory;
pub mod persist;
pub mod seed;
