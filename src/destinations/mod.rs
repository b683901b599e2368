pub mod entities;
pub mod parser;
