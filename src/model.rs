//! # Data Model
//!
//! Core data structures for shipping method configuration: identifiers,
//! the persisted method record, carrier-string entries, and the fixed
//! eligibility code sets (channels, product types, availability, fulfillment).

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use time::OffsetDateTime;
use uuid::Uuid;

/// Surrogate key for a site
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SiteKey(pub i32);

impl fmt::Display for SiteKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "S{}", self.0)
    }
}

/// Surrogate key for a shipping method row. Zero means "not yet persisted";
/// the store assigns a real key on save.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MethodKey(pub i32);

impl MethodKey {
    /// Key used for methods that have not been saved yet
    pub const UNSAVED: MethodKey = MethodKey(0);

    /// Whether this key has been assigned by a store
    pub fn is_persisted(&self) -> bool {
        self.0 != 0
    }
}

impl fmt::Display for MethodKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "M{}", self.0)
    }
}

/// Externally-visible unique identifier of a shipping method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MethodId(pub Uuid);

impl MethodId {
    /// Generate a fresh identifier
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for MethodId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Sales channel a method can be offered on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Channel {
    Web,
    App,
    Marketplace,
    Retail,
}

impl Channel {
    /// Canonical code for this channel
    pub fn code(&self) -> &'static str {
        match self {
            Channel::Web => "WEB",
            Channel::App => "APP",
            Channel::Marketplace => "MARKETPLACE",
            Channel::Retail => "RETAIL",
        }
    }
}

/// Product type a method can ship
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProductType {
    Inline,
    Backorder,
    Preorder,
    Personalized,
}

impl ProductType {
    /// Canonical code for this product type
    pub fn code(&self) -> &'static str {
        match self {
            ProductType::Inline => "INLINE",
            ProductType::Backorder => "BACKORDER",
            ProductType::Preorder => "PREORDER",
            ProductType::Personalized => "PERSONALIZED",
        }
    }
}

/// Stock availability status a method applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AvailabilityStatus {
    InStock,
    OutOfStock,
    Preorder,
    Backorder,
}

impl AvailabilityStatus {
    /// Canonical code for this status
    pub fn code(&self) -> &'static str {
        match self {
            AvailabilityStatus::InStock => "IN_STOCK",
            AvailabilityStatus::OutOfStock => "OUT_OF_STOCK",
            AvailabilityStatus::Preorder => "PREORDER",
            AvailabilityStatus::Backorder => "BACKORDER",
        }
    }
}

/// How the shipment reaches the customer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FulfillmentType {
    HomeDelivery,
    Pudo,
    ClickAndCollect,
}

impl FulfillmentType {
    /// Canonical code for this fulfillment type
    pub fn code(&self) -> &'static str {
        match self {
            FulfillmentType::HomeDelivery => "HOME_DELIVERY",
            FulfillmentType::Pudo => "PUDO",
            FulfillmentType::ClickAndCollect => "CLICK_AND_COLLECT",
        }
    }
}

/// A carrier-string record attached to a method.
///
/// The identity, when present, is the authoritative merge key; the value is
/// the fallback merge key. Records created from a request carry no identity
/// until persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarrierStringEntry {
    /// Identity assigned at persistence time, if any
    pub id: Option<Uuid>,
    /// The carrier string value
    pub value: String,
}

impl CarrierStringEntry {
    /// Create a new, not-yet-persisted entry
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            id: None,
            value: value.into(),
        }
    }

    /// Create an entry with a persisted identity
    pub fn persisted(id: Uuid, value: impl Into<String>) -> Self {
        Self {
            id: Some(id),
            value: value.into(),
        }
    }
}

/// Member pricing tiers
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MemberFixedPrices {
    pub tier1: Option<f64>,
    pub tier2: Option<f64>,
    pub tier3: Option<f64>,
    pub tier4: Option<f64>,
}

/// Price tiers for a shipping method
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PriceTiers {
    /// Order value above which shipping is free
    pub threshold: Option<f64>,
    pub base_fixed_price: Option<f64>,
    pub shipment_upsell: Option<f64>,
    pub member_fixed_prices: Option<MemberFixedPrices>,
}

/// A persisted shipping method configuration.
///
/// A method belongs to exactly one site for its lifetime. Localized name and
/// description maps are ordered by locale key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShippingMethod {
    /// Surrogate key, assigned by the store
    pub key: MethodKey,
    /// Externally-visible unique identifier
    pub method_id: MethodId,
    /// Surrogate key of the owning site
    pub site_key: SiteKey,
    /// Name of the owning site
    pub site: String,
    pub enabled: bool,
    pub is_default: bool,
    /// Localized display name, keyed by locale
    pub name: BTreeMap<String, String>,
    /// Localized description, keyed by locale
    pub description: BTreeMap<String, String>,
    pub custom_id: Option<String>,
    pub carrier_name: Option<String>,
    /// Legacy single carrier string field
    pub carrier_string: Option<String>,
    /// Carrier-string records, merge-not-replace on patch
    pub carrier_strings: Vec<CarrierStringEntry>,
    pub carrier_service: Option<String>,
    pub tax_class_id: Option<String>,
    /// Display ordering within the site
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
    /// Rule list, defaulted empty at creation time
    pub rules: Vec<String>,
}

impl ShippingMethod {
    /// Lower-cased channel codes, the form used for uniqueness comparison
    pub fn channel_codes_lower(&self) -> Vec<String> {
        self.channels
            .iter()
            .map(|channel| channel.code().to_lowercase())
            .collect()
    }

    /// Product type codes
    pub fn product_type_codes(&self) -> Vec<String> {
        self.product_types
            .iter()
            .map(|product_type| product_type.code().to_string())
            .collect()
    }

    /// Values of all attached carrier-string records
    pub fn carrier_string_values(&self) -> Vec<String> {
        self.carrier_strings
            .iter()
            .map(|entry| entry.value.clone())
            .collect()
    }

    /// Availability status codes
    pub fn availability_codes(&self) -> Vec<String> {
        self.availability_statuses
            .iter()
            .map(|status| status.code().to_string())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_key_persistence_flag() {
        assert!(!MethodKey::UNSAVED.is_persisted());
        assert!(MethodKey(7).is_persisted());
    }

    #[test]
    fn test_key_display_formats() {
        assert_eq!(SiteKey(4).to_string(), "S4");
        assert_eq!(MethodKey(7).to_string(), "M7");

        let id = MethodId::generate();
        assert_eq!(id.to_string(), id.0.to_string());
    }

    #[test]
    fn test_channel_codes_lowercased() {
        let method = sample_method();
        assert_eq!(method.channel_codes_lower(), vec!["web", "app"]);
        assert_eq!(method.product_type_codes(), vec!["INLINE"]);
    }

    #[test]
    fn test_carrier_string_values_preserve_order() {
        let method = sample_method();
        assert_eq!(method.carrier_string_values(), vec!["carrier1", "carrier2"]);
    }

    #[test]
    fn test_enum_serde_codes() {
        let json = serde_json::to_string(&Channel::Marketplace).unwrap();
        assert_eq!(json, "\"MARKETPLACE\"");

        let status: AvailabilityStatus = serde_json::from_str("\"IN_STOCK\"").unwrap();
        assert_eq!(status, AvailabilityStatus::InStock);
    }

    fn sample_method() -> ShippingMethod {
        let now = time::macros::datetime!(2024-01-15 08:00 UTC);
        ShippingMethod {
            key: MethodKey(1),
            method_id: MethodId::generate(),
            site_key: SiteKey(1),
            site: "site-AT".to_string(),
            enabled: true,
            is_default: false,
            name: BTreeMap::from([("de-AT".to_string(), "Standard".to_string())]),
            description: BTreeMap::new(),
            custom_id: None,
            carrier_name: None,
            carrier_string: None,
            carrier_strings: vec![
                CarrierStringEntry::new("carrier1"),
                CarrierStringEntry::new("carrier2"),
            ],
            carrier_service: Some("Express".to_string()),
            tax_class_id: None,
            position: 0,
            min_days_to_deliver: Some(2),
            max_days_to_deliver: Some(4),
            prices: None,
            channels: vec![Channel::Web, Channel::App],
            product_types: vec![ProductType::Inline],
            availability_statuses: vec![],
            fulfillment_types: vec![FulfillmentType::HomeDelivery],
            created_by: Some("someone".to_string()),
            created_at: now,
            modified_by: None,
            modified_at: now,
            rules: vec![],
        }
    }
}
