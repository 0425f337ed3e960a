//! # Store Module
//!
//! Storage seam for shipping method configurations, plus an in-memory
//! reference implementation. The uniqueness query runs against the store so
//! a persistent backend can push the tuple comparison into its own query
//! layer; a backend that enforces its own uniqueness constraint should map
//! the violation to [`EngineError::DuplicateConfiguration`]. The in-memory
//! store carries no such backstop, so cross-request isolation is the
//! caller's concern.

use crate::error::EngineError;
use crate::model::{MethodId, MethodKey, ShippingMethod, SiteKey};
use crate::projection::Projection;
use hashbrown::HashMap;

/// Storage operations the engine requires
pub trait MethodStore {
    /// Persist a method, assigning a surrogate key if it has none.
    /// Returns the stored representation.
    fn save(&mut self, method: ShippingMethod) -> Result<ShippingMethod, EngineError>;

    /// Find a method by its externally-visible identifier
    fn find_by_method_id(&self, id: MethodId) -> Option<ShippingMethod>;

    /// All methods of a site, ordered by position
    fn methods_for_site(&self, site: &str) -> Vec<ShippingMethod>;

    /// Delete by identifier, returning the number of rows removed
    fn delete_by_method_id(&mut self, id: MethodId) -> usize;

    /// Whether any *enabled* method of the site, other than `exclude`,
    /// occupies the candidate's eligibility tuple
    fn has_conflicting(
        &self,
        site: SiteKey,
        projection: &Projection,
        exclude: Option<MethodKey>,
    ) -> bool;

    /// Demote every enabled default method of the site, returning how many
    /// rows changed
    fn clear_default_for_site(&mut self, site: SiteKey) -> usize;

    /// Number of stored methods
    fn len(&self) -> usize;

    /// Whether the store holds no methods
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// In-memory method store
#[derive(Debug, Clone)]
pub struct InMemoryMethodStore {
    methods: HashMap<MethodKey, ShippingMethod>,
    next_key: i32,
}

impl InMemoryMethodStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            methods: HashMap::new(),
            // Key 0 is the unsaved sentinel and must never be handed out
            next_key: 1,
        }
    }
}

impl Default for InMemoryMethodStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MethodStore for InMemoryMethodStore {
    fn save(&mut self, mut method: ShippingMethod) -> Result<ShippingMethod, EngineError> {
        if !method.key.is_persisted() {
            method.key = MethodKey(self.next_key);
            self.next_key += 1;
        }
        self.methods.insert(method.key, method.clone());
        Ok(method)
    }

    fn find_by_method_id(&self, id: MethodId) -> Option<ShippingMethod> {
        self.methods
            .values()
            .find(|method| method.method_id == id)
            .cloned()
    }

    fn methods_for_site(&self, site: &str) -> Vec<ShippingMethod> {
        let mut methods: Vec<ShippingMethod> = self
            .methods
            .values()
            .filter(|method| method.site == site)
            .cloned()
            .collect();
        methods.sort_by_key(|method| (method.position, method.key));
        methods
    }

    fn delete_by_method_id(&mut self, id: MethodId) -> usize {
        let key = self
            .methods
            .values()
            .find(|method| method.method_id == id)
            .map(|method| method.key);
        match key {
            Some(key) => {
                self.methods.remove(&key);
                1
            }
            None => 0,
        }
    }

    fn has_conflicting(
        &self,
        site: SiteKey,
        projection: &Projection,
        exclude: Option<MethodKey>,
    ) -> bool {
        self.methods.values().any(|method| {
            method.site_key == site
                && method.enabled
                && Some(method.key) != exclude
                && projection.conflicts_with(method)
        })
    }

    fn clear_default_for_site(&mut self, site: SiteKey) -> usize {
        let mut changed = 0;
        for method in self.methods.values_mut() {
            if method.site_key == site && method.enabled && method.is_default {
                method.is_default = false;
                changed += 1;
            }
        }
        changed
    }

    fn len(&self) -> usize {
        self.methods.len()
    }
}
