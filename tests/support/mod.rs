//! Shared fixtures for integration tests: request builders, counting
//! collaborators, and an instrumented store that records operation order.

use shipway_rs::store::MethodStore;
use shipway_rs::{
    CarrierStringInput, Channel, CreateRequest, Dimension, EngineError, FulfillmentType,
    InMemoryMethodStore, MethodId, MethodKey, PatchRequest, ProductType, Projection,
    ReferenceResolver, ShippingMethod, SiteKey, SiteSchema, SyncTarget,
};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

#[allow(dead_code)]
pub fn schema_with(key: SiteKey, name: &str, dimensions: &[Dimension]) -> SiteSchema {
    let mut schema = SiteSchema::new(key, name);
    for dimension in dimensions {
        schema.add_dimension(*dimension);
    }
    schema
}

#[allow(dead_code)]
pub fn create_request(site: &str, enabled: bool, is_default: bool) -> CreateRequest {
    CreateRequest {
        site: site.to_string(),
        enabled,
        is_default,
        name: [("de-AT".to_string(), "Standardlieferung".to_string())].into(),
        description: [("de-AT".to_string(), "Standard".to_string())].into(),
        custom_id: Some("customId".to_string()),
        carrier_name: Some("carrierName".to_string()),
        carrier_string: Some("carrierString".to_string()),
        carrier_service: Some("Express".to_string()),
        tax_class_id: Some("taxId".to_string()),
        position: 0,
        min_days_to_deliver: Some(2),
        max_days_to_deliver: Some(4),
        prices: None,
        channels: vec![Channel::Web, Channel::App],
        product_types: vec![ProductType::Inline, ProductType::Backorder],
        carrier_string_records: vec!["carrier1".to_string(), "carrier2".to_string()],
        availability_statuses: None,
        fulfillment_types: vec![FulfillmentType::HomeDelivery],
        created_by: Some("someone".to_string()),
    }
}

#[allow(dead_code)]
pub fn patch_with_carrier_strings(records: Vec<CarrierStringInput>) -> PatchRequest {
    PatchRequest {
        carrier_string_records: Some(records),
        ..PatchRequest::default()
    }
}

/// Reference resolver that counts invocations of each resolution call
#[derive(Debug, Clone, Default)]
pub struct CountingResolver {
    pub channel_calls: Arc<AtomicUsize>,
    pub product_type_calls: Arc<AtomicUsize>,
}

impl ReferenceResolver for CountingResolver {
    fn resolve_channels(&self, codes: &[Channel]) -> Vec<Channel> {
        self.channel_calls.fetch_add(1, Ordering::SeqCst);
        codes.to_vec()
    }

    fn resolve_product_types(&self, codes: &[ProductType]) -> Vec<ProductType> {
        self.product_type_calls.fetch_add(1, Ordering::SeqCst);
        codes.to_vec()
    }
}

/// Sync target that counts pushes and optionally fails them
#[derive(Debug, Clone, Default)]
pub struct RecordingSync {
    pub accept: bool,
    pub fail: bool,
    pub sync_calls: Arc<AtomicUsize>,
}

impl SyncTarget for RecordingSync {
    fn should_sync(&self, _method: &ShippingMethod) -> bool {
        self.accept
    }

    fn sync(&self, _method: &ShippingMethod) -> Result<(), EngineError> {
        self.sync_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(EngineError::Sync("downstream rejected".to_string()));
        }
        Ok(())
    }
}

/// Store wrapper that records the order of mutating and checking operations
#[derive(Default)]
pub struct InstrumentedStore {
    pub inner: InMemoryMethodStore,
    pub ops: Arc<Mutex<Vec<String>>>,
    pub uniqueness_calls: Arc<AtomicUsize>,
    pub clear_default_calls: Arc<AtomicUsize>,
}

impl InstrumentedStore {
    pub fn new() -> Self {
        Self {
            inner: InMemoryMethodStore::new(),
            ops: Arc::new(Mutex::new(Vec::new())),
            uniqueness_calls: Arc::new(AtomicUsize::new(0)),
            clear_default_calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    fn record(&self, op: &str) {
        self.ops.lock().unwrap().push(op.to_string());
    }
}

impl MethodStore for InstrumentedStore {
    fn save(&mut self, method: ShippingMethod) -> Result<ShippingMethod, EngineError> {
        self.record("save");
        self.inner.save(method)
    }

    fn find_by_method_id(&self, id: MethodId) -> Option<ShippingMethod> {
        self.inner.find_by_method_id(id)
    }

    fn methods_for_site(&self, site: &str) -> Vec<ShippingMethod> {
        self.inner.methods_for_site(site)
    }

    fn delete_by_method_id(&mut self, id: MethodId) -> usize {
        self.record("delete");
        self.inner.delete_by_method_id(id)
    }

    fn has_conflicting(
        &self,
        site: SiteKey,
        projection: &Projection,
        exclude: Option<MethodKey>,
    ) -> bool {
        self.record("uniqueness_check");
        self.uniqueness_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.has_conflicting(site, projection, exclude)
    }

    fn clear_default_for_site(&mut self, site: SiteKey) -> usize {
        self.record("clear_default");
        self.clear_default_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.clear_default_for_site(site)
    }

    fn len(&self) -> usize {
        self.inner.len()
    }
}

/// Store whose saves can be switched to fail, for persistence-failure paths
#[derive(Default)]
pub struct FailingStore {
    inner: InMemoryMethodStore,
    pub fail_saves: Arc<AtomicBool>,
}

impl MethodStore for FailingStore {
    fn save(&mut self, method: ShippingMethod) -> Result<ShippingMethod, EngineError> {
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(EngineError::Storage("write rejected".to_string()));
        }
        self.inner.save(method)
    }

    fn find_by_method_id(&self, id: MethodId) -> Option<ShippingMethod> {
        self.inner.find_by_method_id(id)
    }

    fn methods_for_site(&self, site: &str) -> Vec<ShippingMethod> {
        self.inner.methods_for_site(site)
    }

    fn delete_by_method_id(&mut self, id: MethodId) -> usize {
        self.inner.delete_by_method_id(id)
    }

    fn has_conflicting(
        &self,
        site: SiteKey,
        projection: &Projection,
        exclude: Option<MethodKey>,
    ) -> bool {
        self.inner.has_conflicting(site, projection, exclude)
    }

    fn clear_default_for_site(&mut self, site: SiteKey) -> usize {
        self.inner.clear_default_for_site(site)
    }

    fn len(&self) -> usize {
        self.inner.len()
    }
}
