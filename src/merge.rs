//! # Patch Merge
//!
//! Builds the persisted representation for create, and merges a partial
//! update onto an existing method for update. Scalar fields follow "present
//! overwrites, absent keeps"; channels and product types are wholesale
//! replacements resolved through the reference collaborator; carrier-string
//! records always go through the reconciler.

use crate::collab::ReferenceResolver;
use crate::model::{CarrierStringEntry, MethodId, MethodKey, ShippingMethod};
use crate::reconcile::reconcile_carrier_strings;
use crate::request::{CreateRequest, PatchRequest};
use crate::schema::SiteSchema;
use time::OffsetDateTime;

/// Build a new method from a full creation request.
///
/// Every field is taken from the request, defaulting to empty where
/// unspecified. Channels and product types are resolved through the
/// reference collaborator; carrier-string values become identity-less
/// records awaiting persistence.
pub fn build_method(
    request: &CreateRequest,
    schema: &SiteSchema,
    resolver: &dyn ReferenceResolver,
    now: OffsetDateTime,
) -> ShippingMethod {
    ShippingMethod {
        key: MethodKey::UNSAVED,
        method_id: MethodId::generate(),
        site_key: schema.key,
        site: schema.name.clone(),
        enabled: request.enabled,
        is_default: request.is_default,
        name: request.name.clone(),
        description: request.description.clone(),
        custom_id: request.custom_id.clone(),
        carrier_name: request.carrier_name.clone(),
        carrier_string: request.carrier_string.clone(),
        carrier_strings: request
            .carrier_string_records
            .iter()
            .map(CarrierStringEntry::new)
            .collect(),
        carrier_service: request.carrier_service.clone(),
        tax_class_id: request.tax_class_id.clone(),
        position: request.position,
        min_days_to_deliver: request.min_days_to_deliver,
        max_days_to_deliver: request.max_days_to_deliver,
        prices: request.prices,
        channels: resolver.resolve_channels(&request.channels),
        product_types: resolver.resolve_product_types(&request.product_types),
        availability_statuses: request.availability_statuses.clone().unwrap_or_default(),
        fulfillment_types: request.fulfillment_types.clone(),
        created_by: request.created_by.clone(),
        created_at: now,
        modified_by: request.created_by.clone(),
        modified_at: now,
        rules: Vec::new(),
    }
}

/// Merge a patch onto an existing method, returning the updated copy.
///
/// The reference resolver is consulted only for fields the patch actually
/// supplies; an all-absent patch returns a method equal to the original in
/// every field.
pub fn merge_patch(
    existing: &ShippingMethod,
    request: &PatchRequest,
    resolver: &dyn ReferenceResolver,
    now: OffsetDateTime,
) -> ShippingMethod {
    let mut merged = existing.clone();

    if let Some(name) = &request.name {
        merged.name = name.clone();
    }
    if let Some(description) = &request.description {
        merged.description = description.clone();
    }
    if let Some(enabled) = request.enabled {
        merged.enabled = enabled;
    }
    if let Some(is_default) = request.is_default {
        merged.is_default = is_default;
    }
    if let Some(custom_id) = &request.custom_id {
        merged.custom_id = Some(custom_id.clone());
    }
    if let Some(carrier_name) = &request.carrier_name {
        merged.carrier_name = Some(carrier_name.clone());
    }
    if let Some(carrier_string) = &request.carrier_string {
        merged.carrier_string = Some(carrier_string.clone());
    }
    if let Some(carrier_service) = &request.carrier_service {
        merged.carrier_service = Some(carrier_service.clone());
    }
    if let Some(tax_class_id) = &request.tax_class_id {
        merged.tax_class_id = Some(tax_class_id.clone());
    }
    if let Some(position) = request.position {
        merged.position = position;
    }
    if let Some(min_days) = request.min_days_to_deliver {
        merged.min_days_to_deliver = Some(min_days);
    }
    if let Some(max_days) = request.max_days_to_deliver {
        merged.max_days_to_deliver = Some(max_days);
    }
    if let Some(prices) = request.prices {
        merged.prices = Some(prices);
    }
    if let Some(channels) = &request.channels {
        merged.channels = resolver.resolve_channels(channels);
    }
    if let Some(product_types) = &request.product_types {
        merged.product_types = resolver.resolve_product_types(product_types);
    }
    if let Some(records) = &request.carrier_string_records {
        merged.carrier_strings = reconcile_carrier_strings(&existing.carrier_strings, records);
    }
    if let Some(statuses) = &request.availability_statuses {
        merged.availability_statuses = statuses.clone();
    }
    if let Some(fulfillment_types) = &request.fulfillment_types {
        merged.fulfillment_types = fulfillment_types.clone();
    }
    if let Some(modified_by) = &request.modified_by {
        merged.modified_by = Some(modified_by.clone());
    }
    if !request.is_empty() {
        merged.modified_at = now;
    }

    merged
}
