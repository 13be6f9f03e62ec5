//! Client for an asynchronous video asset generation service.
//!
//! A job is submitted once, then its status is polled until the service
//! reports a terminal result. The lifecycle is reduced into a
//! [`ui::result::ResultState`] that the terminal front-ends render.

pub mod cli;
pub mod client;
pub mod config;
pub mod logging;
pub mod model;
pub mod session;
pub mod task;
pub mod ui;
