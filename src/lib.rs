pub mod analysis;
pub mod backend;
pub mod config;
pub mod keygate;
pub mod output;
pub mod server;
pub mod view;
