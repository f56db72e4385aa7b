pub mod domain;
pub mod strategies;
