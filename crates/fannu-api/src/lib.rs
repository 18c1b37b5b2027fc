pub mod auth;
pub mod broadcasts;
pub mod creators;
pub mod drops;
pub mod earnings;
pub mod error;
pub mod middleware;
pub mod validation;
pub mod vip;
