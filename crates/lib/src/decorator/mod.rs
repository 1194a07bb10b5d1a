//! Stackable [`Configuration`](crate::backend::Configuration) decorators.
//!
//! Each decorator wraps an inner store and implements the same trait, adding
//! one concern. They compose in any order; the usual stack is
//!
//! ```text
//! OptimisticLockingConfiguration
//!   -> ReferenceIndexingConfiguration
//!     -> CachingConfiguration
//!       -> InMemory (or any storage engine)
//! ```
//!
//! ```
//! use std::sync::Arc;
//!
//! use confstore::backend::{Configuration, InMemory};
//! use confstore::decorator::{
//!     CachingConfiguration, OptimisticLockingConfiguration, ReferenceIndex,
//!     ReferenceIndexingConfiguration,
//! };
//! use confstore::settings::StoreSettings;
//! use confstore::tree::ConfigNode;
//! use confstore::path;
//!
//! let settings = StoreSettings::default();
//! let index = Arc::new(ReferenceIndex::new());
//! let store = OptimisticLockingConfiguration::new(
//!     ReferenceIndexingConfiguration::new(
//!         CachingConfiguration::new(InMemory::new()),
//!         Arc::clone(&index),
//!         &settings,
//!     ),
//!     &settings,
//! );
//!
//! let id = "3f0e1b7c-8a4d-4c1e-9f5a-2b6d7e8f9a0b";
//! store.persist_node(
//!     &path!("devices", "dev1"),
//!     ConfigNode::map([("_uuid", ConfigNode::from(id))]),
//!     None,
//! )?;
//! assert_eq!(store.inner().get_path_by_identifier(id)?, path!("devices", "dev1"));
//! # Ok::<(), confstore::Error>(())
//! ```
//!
//! Decorators only do their bookkeeping after the delegated call succeeded,
//! and never swallow errors from the store they wrap.

pub mod caching;
pub mod olock;
pub mod reference_index;

pub use caching::CachingConfiguration;
pub use olock::{OLockMerger, OptimisticLockingConfiguration};
pub use reference_index::{ReconcileStats, ReferenceIndex, ReferenceIndexingConfiguration};
