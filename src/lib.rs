//! # RightScale API client
//!
//! A hypermedia client for the RightScale 1.5 API. Nothing about the API's
//! shape is hard-coded beyond a small capability table: the client logs in,
//! reads the links of the session resource, and every resource it returns
//! exposes exactly the associations and actions its envelope declares.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use right_api::prelude::*;
//!
//! fn main() -> Result<(), right_api::Error> {
//!     let client = Client::builder()
//!         .credentials(Credentials::password("ops@example.com", "s3cret", "1234"))
//!         .build()?;
//!
//!     let cloud = client.follow("clouds", Params::new().id("1"))?.into_resource()?;
//!     let images = cloud.follow("images", Params::new().filter("name==base"))?;
//!
//!     let deployment = client
//!         .follow("deployments", Params::new())?
//!         .into_collection()?
//!         .create(Params::new().set("deployment", serde_json::json!({"name": "web"})))?
//!         .into_resource()?;
//!     deployment.destroy()?;
//!     Ok(())
//! }
//! ```
//!
//! ## Key Concepts
//!
//! - **Sessions**: a 403 renews the session once and replays the request;
//!   a second 403 is an [`ErrorKind::Authentication`] error
//! - **Navigation**: [`Resource::follow`] for links, [`Resource::perform`]
//!   for server-declared actions, [`Resource::call`] for either by name
//! - **Results**: every navigation step returns a [`Node`]
//!
//! ## Features
//!
//! - `rest` (default): blocking REST transport via reqwest
//! - `rustls` (default): use rustls for TLS
//! - `native-tls`: use the platform TLS stack

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

// Core modules
pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod resource;
pub mod types;

// Transport layer
pub mod transport;

// Prelude for convenient imports
pub mod prelude;

mod user_agent;

// Re-export main types at crate root for convenience
pub use client::{Client, ClientBuilder, Fetched};
pub use error::{Error, ErrorKind};

pub use auth::{Credentials, InstanceTokenCredentials, PasswordCredentials, SessionToken};

pub use config::{ClientConfig, TlsConfig};

pub use resource::{
    Accessor, CapabilityTable, CollectionMethod, DEFAULT_CAPABILITIES, DummyMethod,
    DummyResource, Node, Resource, ResourceCollection, ResourceKind, RestrictedRoot, bind_links,
};

pub use types::{Action, Link, Params};
