//! Library crate for port-sweep-rs exposing the scanning engine.
pub mod collector;
pub mod config;
pub mod error;
pub mod pool;
pub mod ports;
pub mod probe;
pub mod report;
pub mod scanner;
pub mod types;
