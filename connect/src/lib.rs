//! Client library for the Connect community platform.
//!
//! Layers, innermost first:
//!
//! - [`domain`]: wire records, ports and the platform setting and
//!   application services
//! - [`state`]: per-resource slices, their reducer and async stores
//! - [`outbound`]: the `reqwest` API client and the Diesel and in-memory
//!   repositories
//! - [`seeding`]: startup seeding of default platform settings
//!
//! [`config`] and [`telemetry`] carry the ambient settings and logging setup
//! shared by the library and the `seed-settings` binary.

pub mod config;
pub mod domain;
pub mod outbound;
pub mod seeding;
pub mod state;
pub mod telemetry;
