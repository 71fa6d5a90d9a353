//! Wire-level types shared by the dispatcher and the resource layer.
//!
//! - [`Link`] / [`Action`]: hypermedia descriptors from an envelope
//! - [`Params`]: call parameters with `id` and `filters` handling
//! - [`resource_type_from_content_type`]: media type sniffing

mod content_type;
mod link;
mod params;

pub use content_type::{DEFAULT_VENDOR, resource_type_from_content_type};
pub use link::{Action, Link, SELF_REL};
pub use params::Params;
