pub mod gateway;
pub mod service;
