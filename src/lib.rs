pub mod accumulator;
pub mod categories;
pub mod classify;
pub mod config;
pub mod error;
pub mod session;
// cmd and reports are binary modules (see main.rs).
