//! Core abstractions for the application cache host.
//!
//! This crate provides the fundamental types and traits:
//! - `CacheStatus` - Script-visible cache status
//! - `CacheEventId` - Cache lifecycle events
//! - `HostId` / `CacheId` - Newtype identifiers
//! - `CacheBackend` trait - Backend service contract
//! - `CacheHostClient` trait - Scripting bridge contract
//! - `ResourceRequest` / `ResourceResponse` - Navigation descriptors

mod backend;
mod client;
mod config;
mod event;
mod ids;
mod log;
mod resource;
mod status;
mod urlutil;

pub use backend::*;
pub use client::*;
pub use config::*;
pub use event::*;
pub use ids::*;
pub use log::*;
pub use resource::*;
pub use status::*;
pub use urlutil::*;
