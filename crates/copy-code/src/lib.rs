pub mod config;
pub mod error;
pub mod host;
pub mod injector;
mod style;

#[cfg(test)]
mod testing;

#[cfg(feature = "hydrate")]
pub mod web;

// Demo site, rendered by the server binary
#[cfg(feature = "ssr")]
pub mod app;
#[cfg(feature = "ssr")]
pub mod components;
#[cfg(feature = "ssr")]
pub mod pages;

pub use config::CopyButtonConfig;
pub use error::{CopyCodeError, Result};
pub use host::{DomEvent, Host};
pub use injector::{ButtonState, CopyButton, Injector};
