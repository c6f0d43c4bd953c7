pub mod cli;
pub mod cloud;
pub mod config;
pub mod crypto;
pub mod errors;
pub mod organization;
pub mod project;
