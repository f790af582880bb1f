//! HTTP adapter implementing the Connect API ports with `reqwest`.

mod client;
mod resources;

pub use client::{ClientBuildError, ConnectHttpClient};
