//! Two buttons, two endpoints.
//!
//! [`binder`] turns clicks on `#hello` and `#wait` into HTTP GETs and logs
//! the outcome to a [`console`]. [`server`] is the service those requests
//! hit.

pub mod banner;
pub mod binder;
pub mod commands;
pub mod config;
pub mod console;
pub mod consts;
pub mod server;
pub mod transport;
