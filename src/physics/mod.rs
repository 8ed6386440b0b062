pub mod contacts;
pub mod filter;
pub mod rapier;
