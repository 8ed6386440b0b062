pub mod arena;
pub mod bullets;
pub mod damage;
pub mod factory;
pub mod firing;
