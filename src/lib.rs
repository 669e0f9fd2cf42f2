pub mod banner;
pub mod config;
pub mod consts;
pub mod error;
pub mod generator;
pub mod intent;
pub mod prompts;
pub mod server;
pub mod service;
pub mod store;
pub mod todo;
