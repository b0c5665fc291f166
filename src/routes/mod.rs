pub mod character;
pub mod common;

pub use character::character_routes;
pub use common::common_routes;
