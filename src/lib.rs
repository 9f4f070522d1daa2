pub mod buffer;
pub mod clock;
pub mod config;
pub mod device;
pub mod engine;
pub mod error;
pub mod events;
pub mod models;
pub mod output;
pub mod request;
pub mod source;
pub mod state;
