pub mod database;
pub mod detector;
pub mod entities;
pub mod error;
