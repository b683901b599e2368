pub mod entities;
pub mod gateway;
pub mod steam;
