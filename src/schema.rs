//! # Site Schema Module
//!
//! Defines which eligibility dimensions participate in uniqueness checks for
//! a site, and the directory used to resolve a site by name. A dimension the
//! schema does not declare is excluded from comparison entirely; a declared
//! dimension with no values on a method projects to the empty token.

use crate::model::SiteKey;
use hashbrown::HashMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// An eligibility dimension that can participate in uniqueness
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum Dimension {
    Channels,
    ProductTypes,
    CarrierStringRecords,
    CarrierService,
    AvailabilityStatus,
}

impl Dimension {
    /// All dimensions a schema may declare
    pub const ALL: [Dimension; 5] = [
        Dimension::Channels,
        Dimension::ProductTypes,
        Dimension::CarrierStringRecords,
        Dimension::CarrierService,
        Dimension::AvailabilityStatus,
    ];
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Dimension::Channels => "channels",
            Dimension::ProductTypes => "product-types",
            Dimension::CarrierStringRecords => "carrier-string-records",
            Dimension::CarrierService => "carrier-service",
            Dimension::AvailabilityStatus => "availability-status",
        };
        write!(f, "{}", label)
    }
}

/// Per-site declaration of the dimensions that participate in uniqueness.
///
/// Configured administratively; read-only to the engine. A schema with zero
/// declared dimensions cannot accept enabled methods, and the engine rejects
/// requests against it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteSchema {
    /// Surrogate key of the site
    pub key: SiteKey,
    /// Site name, the lookup key for inbound requests
    pub name: String,
    /// Declared uniqueness dimensions
    pub dimensions: BTreeSet<Dimension>,
}

impl SiteSchema {
    /// Create a schema with no declared dimensions
    pub fn new(key: SiteKey, name: impl Into<String>) -> Self {
        Self {
            key,
            name: name.into(),
            dimensions: BTreeSet::new(),
        }
    }

    /// Declare a dimension
    pub fn add_dimension(&mut self, dimension: Dimension) {
        self.dimensions.insert(dimension);
    }

    /// Builder-style variant of [`SiteSchema::add_dimension`]
    pub fn with_dimension(mut self, dimension: Dimension) -> Self {
        self.dimensions.insert(dimension);
        self
    }

    /// Whether the given dimension participates in uniqueness for this site
    pub fn declares(&self, dimension: Dimension) -> bool {
        self.dimensions.contains(&dimension)
    }

    /// Whether the schema declares any dimension at all
    pub fn has_dimensions(&self) -> bool {
        !self.dimensions.is_empty()
    }
}

/// Lookup of site schemas by site name.
///
/// Schemas are resolved per request; the engine keeps no schema cache.
pub trait SiteDirectory {
    /// Find the schema for a site, or `None` if the site is unknown
    fn find_by_name(&self, name: &str) -> Option<SiteSchema>;

    /// Whether a site with the given name exists
    fn exists(&self, name: &str) -> bool {
        self.find_by_name(name).is_some()
    }
}

/// In-memory site directory
#[derive(Debug, Clone, Default)]
pub struct InMemorySiteDirectory {
    sites: HashMap<String, SiteSchema>,
}

impl InMemorySiteDirectory {
    /// Create an empty directory
    pub fn new() -> Self {
        Self {
            sites: HashMap::new(),
        }
    }

    /// Register a site schema, replacing any previous registration
    pub fn register(&mut self, schema: SiteSchema) {
        self.sites.insert(schema.name.clone(), schema);
    }

    /// Number of registered sites
    pub fn len(&self) -> usize {
        self.sites.len()
    }

    /// Whether the directory is empty
    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }
}

impl SiteDirectory for InMemorySiteDirectory {
    fn find_by_name(&self, name: &str) -> Option<SiteSchema> {
        self.sites.get(name).cloned()
    }
}
