pub mod beat;
pub mod connection;
pub mod error;
pub mod hub;
pub mod message;
pub mod metrics;
pub mod participant;
pub mod prompt;
pub mod registry;
pub mod response;
pub mod session;
pub mod utils;
