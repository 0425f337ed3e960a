//! # Shipway
//!
//! A site-scoped shipping method configuration engine with schema-driven
//! uniqueness checking and patch-merge semantics.
//!
//! Each site declares which eligibility dimensions (channels, product types,
//! carrier strings, carrier service, availability status) participate in
//! conflict detection. The engine projects candidate configurations onto
//! that schema, rejects collisions with existing enabled methods, merges
//! partial updates with per-field and per-list semantics, and keeps at most
//! one enabled default method per site.

pub mod collab;
pub mod error;
pub mod merge;
pub mod model;
pub mod projection;
pub mod reconcile;
pub mod request;
pub mod schema;
pub mod store;

// Re-export main types for convenience
pub use collab::{
    BasicCarrierStringPolicy, CarrierStringPolicy, NoopSync, PassthroughResolver,
    ReferenceResolver, SyncTarget,
};
pub use error::EngineError;
pub use model::{
    AvailabilityStatus, CarrierStringEntry, Channel, FulfillmentType, MemberFixedPrices,
    MethodId, MethodKey, PriceTiers, ProductType, ShippingMethod, SiteKey,
};
pub use projection::{DimensionProjection, Projection, ServiceProjection};
pub use request::{CarrierStringInput, CreateRequest, MethodResponse, PatchRequest};
pub use schema::{Dimension, InMemorySiteDirectory, SiteDirectory, SiteSchema};
pub use store::{InMemoryMethodStore, MethodStore};

use crate::merge::{build_method, merge_patch};
use crate::projection::{project_create, project_update};
use time::OffsetDateTime;
use tracing::debug;

/// Main API for shipping method configuration.
///
/// Sequences validation, projection, uniqueness checking, merging, default
/// exclusivity, persistence, and the downstream sync decision for create,
/// update, and delete flows. All collaborators sit behind trait seams.
pub struct Shipway {
    sites: Box<dyn SiteDirectory>,
    store: Box<dyn MethodStore>,
    resolver: Box<dyn ReferenceResolver>,
    carrier_policy: Box<dyn CarrierStringPolicy>,
    sync: Box<dyn SyncTarget>,
}

impl Shipway {
    /// Create an engine with default collaborators: passthrough reference
    /// resolution, blank-rejecting carrier-string validation, and no sync.
    pub fn new<D, S>(sites: D, store: S) -> Self
    where
        D: SiteDirectory + 'static,
        S: MethodStore + 'static,
    {
        Self {
            sites: Box::new(sites),
            store: Box::new(store),
            resolver: Box::new(PassthroughResolver),
            carrier_policy: Box::new(BasicCarrierStringPolicy),
            sync: Box::new(NoopSync),
        }
    }

    /// Replace the reference resolver
    pub fn with_resolver<R: ReferenceResolver + 'static>(mut self, resolver: R) -> Self {
        self.resolver = Box::new(resolver);
        self
    }

    /// Replace the carrier-string validation policy
    pub fn with_carrier_policy<P: CarrierStringPolicy + 'static>(mut self, policy: P) -> Self {
        self.carrier_policy = Box::new(policy);
        self
    }

    /// Replace the downstream sync target
    pub fn with_sync<T: SyncTarget + 'static>(mut self, sync: T) -> Self {
        self.sync = Box::new(sync);
        self
    }

    /// The underlying method store
    pub fn store(&self) -> &dyn MethodStore {
        self.store.as_ref()
    }

    /// All methods of a site, ordered by position
    pub fn methods_for_site(&self, site: &str) -> Result<Vec<MethodResponse>, EngineError> {
        if !self.sites.exists(site) {
            return Err(EngineError::SiteNotFound(site.to_string()));
        }
        Ok(self
            .store
            .methods_for_site(site)
            .iter()
            .map(MethodResponse::from)
            .collect())
    }

    /// A single method by its externally-visible identifier
    pub fn get_method(&self, id: MethodId) -> Result<MethodResponse, EngineError> {
        self.store
            .find_by_method_id(id)
            .map(|method| MethodResponse::from(&method))
            .ok_or(EngineError::MethodNotFound(id))
    }

    /// Create a shipping method from a full creation request.
    ///
    /// Fails before any write on malformed carrier strings, unknown site,
    /// missing schema, or a uniqueness conflict. A sync failure surfaces
    /// after the local write committed.
    pub fn create_method(&mut self, request: CreateRequest) -> Result<MethodResponse, EngineError> {
        debug!(site = %request.site, "creating shipping method");

        self.carrier_policy
            .validate_new(&request.carrier_string_records)?;
        let schema = self
            .sites
            .find_by_name(&request.site)
            .ok_or_else(|| EngineError::SiteNotFound(request.site.clone()))?;
        if !schema.has_dimensions() {
            return Err(EngineError::SchemaMissing(schema.name.clone()));
        }

        if Self::create_needs_uniqueness_check(&schema, &request) {
            let projection = project_create(&schema, &request);
            if self.store.has_conflicting(schema.key, &projection, None) {
                return Err(EngineError::DuplicateConfiguration);
            }
        }

        let method = build_method(
            &request,
            &schema,
            self.resolver.as_ref(),
            OffsetDateTime::now_utc(),
        );
        if method.enabled && method.is_default {
            self.store.clear_default_for_site(schema.key);
        }
        let saved = self.store.save(method)?;
        self.finish_write(&saved)
    }

    /// Apply a partial update to an existing method.
    ///
    /// The uniqueness check runs against the merge preview, excludes the
    /// method itself, and only when the effective enabled flag is true.
    pub fn update_method(
        &mut self,
        id: MethodId,
        request: PatchRequest,
    ) -> Result<MethodResponse, EngineError> {
        debug!(method = %id, "updating shipping method");

        let existing = self
            .store
            .find_by_method_id(id)
            .ok_or(EngineError::MethodNotFound(id))?;
        self.carrier_policy.validate_patch(
            request.carrier_string_records.as_deref().unwrap_or_default(),
            &existing,
        )?;
        let schema = self
            .sites
            .find_by_name(&existing.site)
            .ok_or_else(|| EngineError::SiteNotFound(existing.site.clone()))?;
        if !schema.has_dimensions() {
            return Err(EngineError::SchemaMissing(schema.name.clone()));
        }

        let effective_enabled = request.enabled.unwrap_or(existing.enabled);
        if effective_enabled {
            let projection = project_update(&schema, &request, &existing);
            if self
                .store
                .has_conflicting(schema.key, &projection, Some(existing.key))
            {
                return Err(EngineError::DuplicateConfiguration);
            }
        }

        let merged = merge_patch(
            &existing,
            &request,
            self.resolver.as_ref(),
            OffsetDateTime::now_utc(),
        );
        if merged.enabled && merged.is_default {
            self.store.clear_default_for_site(schema.key);
        }
        let saved = self.store.save(merged)?;
        self.finish_write(&saved)
    }

    /// Delete a method by identifier. Deleting an unknown identifier is an
    /// error, not a no-op.
    pub fn delete_method(&mut self, id: MethodId) -> Result<(), EngineError> {
        debug!(method = %id, "deleting shipping method");
        if self.store.delete_by_method_id(id) == 0 {
            return Err(EngineError::MethodNotFound(id));
        }
        Ok(())
    }

    /// The create-mode uniqueness check runs only for an enabled candidate,
    /// and not when the schema declares carrier-string-records while the
    /// request supplies none.
    fn create_needs_uniqueness_check(schema: &SiteSchema, request: &CreateRequest) -> bool {
        request.enabled
            && !(schema.declares(Dimension::CarrierStringRecords)
                && request.carrier_string_records.is_empty())
    }

    fn finish_write(&self, saved: &ShippingMethod) -> Result<MethodResponse, EngineError> {
        debug!(key = %saved.key, site = %saved.site_key, "persisted shipping method");
        let response = MethodResponse::from(saved);
        if self.sync.should_sync(saved) {
            // Local write already committed; a sync failure does not roll it back.
            self.sync.sync(saved)?;
        }
        Ok(response)
    }
}
