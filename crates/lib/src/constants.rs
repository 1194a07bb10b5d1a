//! Constants used throughout the confstore library.
//!
//! Default names of the reserved fields. A deployment may choose other names
//! through [`StoreSettings`](crate::settings::StoreSettings) as long as every
//! participant uses the same ones.

/// Reserved field holding the UUID of a referable node.
pub const IDENTIFIER_FIELD: &str = "_uuid";

/// Reserved field carrying the optimistic-lock fingerprint of a node.
pub const FINGERPRINT_FIELD: &str = "_olockHash";

/// Reserved monotonic version counter, excluded from fingerprints.
pub const VERSION_FIELD: &str = "_version";
