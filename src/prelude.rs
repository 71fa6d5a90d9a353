//! Prelude module for convenient imports.
//!
//! ```rust
//! use right_api::prelude::*;
//! ```
//!
//! This provides access to:
//! - Client and builder
//! - Error types
//! - Credentials
//! - Resources and parameters

pub use crate::{
    auth::{Credentials, SessionToken},
    client::{Client, ClientBuilder},
    config::ClientConfig,
    error::{Error, ErrorKind, Result},
    resource::{DummyResource, Node, Resource, ResourceCollection, ResourceKind},
    types::Params,
};
