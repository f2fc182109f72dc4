pub mod aggregate;
pub mod airport;
pub mod coerce;
pub mod config;
pub mod dashboard;
pub mod derive;
pub mod error;
pub mod filter;
pub mod loader;
pub mod output;
pub mod presentation;
pub mod region;
pub mod session;
pub mod source;
