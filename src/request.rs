//! # Request and Response Types
//!
//! Inbound create/patch representations and the read-only response
//! projection. Patch fields are individually optional: an absent field keeps
//! the current value, while a present field overwrites it, so `Some(vec![])`
//! and `None` mean different things for list fields.

use crate::model::{
    AvailabilityStatus, Channel, FulfillmentType, MethodId, PriceTiers, ProductType,
    ShippingMethod,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use time::OffsetDateTime;
use uuid::Uuid;

/// A requested carrier-string record: optional persisted identity plus value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarrierStringInput {
    /// Identity of an already-persisted record, if the request targets one
    pub id: Option<Uuid>,
    /// The carrier string value
    pub value: String,
}

impl CarrierStringInput {
    /// A record without identity, merged by value
    pub fn value_only(value: impl Into<String>) -> Self {
        Self {
            id: None,
            value: value.into(),
        }
    }

    /// A record targeting a persisted identity
    pub fn with_id(id: Uuid, value: impl Into<String>) -> Self {
        Self {
            id: Some(id),
            value: value.into(),
        }
    }
}

/// Full creation request for a shipping method
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateRequest {
    /// Name of the owning site
    pub site: String,
    pub enabled: bool,
    pub is_default: bool,
    #[serde(default)]
    pub name: BTreeMap<String, String>,
    #[serde(default)]
    pub description: BTreeMap<String, String>,
    pub custom_id: Option<String>,
    pub carrier_name: Option<String>,
    /// Legacy single carrier string field
    pub carrier_string: Option<String>,
    pub carrier_service: Option<String>,
    pub tax_class_id: Option<String>,
    #[serde(default)]
    pub position: i16,
    pub min_days_to_deliver: Option<i16>,
    pub max_days_to_deliver: Option<i16>,
    pub prices: Option<PriceTiers>,
    #[serde(default)]
    pub channels: Vec<Channel>,
    #[serde(default)]
    pub product_types: Vec<ProductType>,
    /// Carrier string values; records gain identities at persistence time
    #[serde(default)]
    pub carrier_string_records: Vec<String>,
    pub availability_statuses: Option<Vec<AvailabilityStatus>>,
    #[serde(default)]
    pub fulfillment_types: Vec<FulfillmentType>,
    pub created_by: Option<String>,
}

/// Partial update request; every field is optional.
///
/// For `enabled` and `is_default`, a supplied `false` is distinct from an
/// absent field: only absence preserves the stored value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PatchRequest {
    pub name: Option<BTreeMap<String, String>>,
    pub description: Option<BTreeMap<String, String>>,
    pub enabled: Option<bool>,
    pub is_default: Option<bool>,
    pub custom_id: Option<String>,
    pub carrier_name: Option<String>,
    pub carrier_string: Option<String>,
    pub carrier_service: Option<String>,
    pub tax_class_id: Option<String>,
    pub position: Option<i16>,
    pub min_days_to_deliver: Option<i16>,
    pub max_days_to_deliver: Option<i16>,
    pub prices: Option<PriceTiers>,
    /// Wholesale replacement when present
    pub channels: Option<Vec<Channel>>,
    /// Wholesale replacement when present
    pub product_types: Option<Vec<ProductType>>,
    /// Merged against the persisted list, never wholesale-replaced
    pub carrier_string_records: Option<Vec<CarrierStringInput>>,
    /// Wholesale replacement when present; an explicit empty list clears
    pub availability_statuses: Option<Vec<AvailabilityStatus>>,
    pub fulfillment_types: Option<Vec<FulfillmentType>>,
    pub modified_by: Option<String>,
}

impl PatchRequest {
    /// Whether every field is absent, making the patch a no-op merge
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.enabled.is_none()
            && self.is_default.is_none()
            && self.custom_id.is_none()
            && self.carrier_name.is_none()
            && self.carrier_string.is_none()
            && self.carrier_service.is_none()
            && self.tax_class_id.is_none()
            && self.position.is_none()
            && self.min_days_to_deliver.is_none()
            && self.max_days_to_deliver.is_none()
            && self.prices.is_none()
            && self.channels.is_none()
            && self.product_types.is_none()
            && self.carrier_string_records.is_none()
            && self.availability_statuses.is_none()
            && self.fulfillment_types.is_none()
            && self.modified_by.is_none()
    }

    /// Values of requested carrier-string records, in request order
    pub fn carrier_string_values(&self) -> Vec<String> {
        self.carrier_string_records
            .as_deref()
            .unwrap_or_default()
            .iter()
            .map(|record| record.value.clone())
            .collect()
    }
}

/// Read-only projection of a persisted method's public fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodResponse {
    pub method_id: MethodId,
    pub site: String,
    pub enabled: bool,
    pub is_default: bool,
    pub name: BTreeMap<String, String>,
    pub description: BTreeMap<String, String>,
    pub custom_id: Option<String>,
    pub carrier_name: Option<String>,
    pub carrier_string: Option<String>,
    pub carrier_string_records: Vec<String>,
    pub carrier_service: Option<String>,
    pub tax_class_id: Option<String>,
    pub position: i16,
    pub min_days_to_deliver: Option<i16>,
    pub max_days_to_deliver: Option<i16>,
    pub prices: Option<PriceTiers>,
    pub channels: Vec<Channel>,
    pub product_types: Vec<ProductType>,
    pub availability_statuses: Vec<AvailabilityStatus>,
    pub fulfillment_types: Vec<FulfillmentType>,
    pub created_by: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    pub modified_by: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub modified_at: OffsetDateTime,
}

impl From<&ShippingMethod> for MethodResponse {
    fn from(method: &ShippingMethod) -> Self {
        Self {
            method_id: method.method_id,
            site: method.site.clone(),
            enabled: method.enabled,
            is_default: method.is_default,
            name: method.name.clone(),
            description: method.description.clone(),
            custom_id: method.custom_id.clone(),
            carrier_name: method.carrier_name.clone(),
            carrier_string: method.carrier_string.clone(),
            carrier_string_records: method.carrier_string_values(),
            carrier_service: method.carrier_service.clone(),
            tax_class_id: method.tax_class_id.clone(),
            position: method.position,
            min_days_to_deliver: method.min_days_to_deliver,
            max_days_to_deliver: method.max_days_to_deliver,
            prices: method.prices,
            channels: method.channels.clone(),
            product_types: method.product_types.clone(),
            availability_statuses: method.availability_statuses.clone(),
            fulfillment_types: method.fulfillment_types.clone(),
            created_by: method.created_by.clone(),
            created_at: method.created_at,
            modified_by: method.modified_by.clone(),
            modified_at: method.modified_at,
        }
    }
}
