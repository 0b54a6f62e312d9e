//! hostswap - switch the system hosts file between saved profiles.

pub mod app;
pub mod backend;
pub mod cli;
pub mod config;
pub mod dialog;
pub mod editor;
pub mod hosts;
pub mod list;
pub mod logging;
pub mod platform;
pub mod profile;
pub mod state;
pub mod store;
