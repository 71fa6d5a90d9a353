//! Navigable resources built from API responses.
//!
//! - [`Resource`]: one envelope with attributes, associations and actions
//! - [`ResourceCollection`]: an index response
//! - [`DummyResource`]: a stand-in for roots that cannot be indexed
//! - [`Node`]: whichever of these an operation returns
//!
//! What a resource can do is decided by its envelope (links and actions)
//! and by the [`CapabilityTable`] (create, update, destroy).

mod accessor;
mod binder;
mod capability;
mod collection;
mod dummy;
mod factory;
mod item;
mod kind;
mod node;

pub use accessor::Accessor;
pub use binder::bind_links;
pub use capability::{CapabilityTable, DEFAULT_CAPABILITIES, RestrictedRoot};
pub use collection::{CollectionMethod, ResourceCollection};
pub use dummy::{DummyMethod, DummyResource};
pub use item::Resource;
pub use kind::ResourceKind;
pub use node::Node;

pub(crate) use factory::ResourceFactory;
