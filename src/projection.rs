//! # Eligibility Projection
//!
//! Extracts, from a candidate or persisted method, the tuple of dimension
//! values relevant to a site schema. A dimension the schema does not declare
//! projects to a wildcard and is excluded from comparison. A declared
//! dimension with no values projects to a single empty token: the token
//! matches any non-empty value set, but two empty sets on a declared
//! dimension do not collide with each other. Callers must not treat the
//! empty token as a universal wildcard.

use crate::model::ShippingMethod;
use crate::request::{CreateRequest, PatchRequest};
use crate::schema::{Dimension, SiteSchema};
use serde::{Deserialize, Serialize};

/// Token a declared-but-empty dimension projects to
pub const EMPTY_TOKEN: &str = "";

/// Projection of one multi-valued dimension
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DimensionProjection {
    /// Dimension not declared by the site schema; excluded from comparison
    Wildcard,
    /// Declared dimension values. An empty candidate set is encoded as a
    /// single empty token, never as an empty vector.
    Values(Vec<String>),
}

impl DimensionProjection {
    /// Projection for a declared dimension, encoding emptiness as the token
    pub fn declared(values: Vec<String>) -> Self {
        if values.is_empty() {
            Self::Values(vec![EMPTY_TOKEN.to_string()])
        } else {
            Self::Values(values)
        }
    }

    /// Whether this projection is the empty token of a declared dimension
    pub fn is_empty_token(&self) -> bool {
        matches!(self, Self::Values(values) if values.len() == 1 && values[0].is_empty())
    }

    /// Whether the candidate projection occupies the same slot as an
    /// existing method's value set on this dimension.
    ///
    /// The empty token matches any non-empty set; two empties do not match;
    /// a non-empty candidate never matches an empty set.
    pub fn matches(&self, existing: &[String]) -> bool {
        match self {
            Self::Wildcard => true,
            Self::Values(_) if self.is_empty_token() => !existing.is_empty(),
            Self::Values(values) => values
                .iter()
                .any(|value| existing.iter().any(|other| other == value)),
        }
    }
}

/// Projection of the single-valued carrier-service dimension.
///
/// A declared dimension with no value on the candidate matches everything,
/// mirroring the storage convention for an absent service string. This is
/// the one dimension where absence widens rather than narrows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ServiceProjection {
    Wildcard,
    Exact(String),
}

impl ServiceProjection {
    /// Whether the candidate service occupies the same slot as an existing
    /// method's service value
    pub fn matches(&self, existing: Option<&str>) -> bool {
        match self {
            Self::Wildcard => true,
            Self::Exact(value) => existing == Some(value.as_str()),
        }
    }
}

/// The full eligibility tuple of a candidate method under a site schema
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Projection {
    pub channels: DimensionProjection,
    pub product_types: DimensionProjection,
    pub carrier_strings: DimensionProjection,
    pub carrier_service: ServiceProjection,
    pub availability: DimensionProjection,
}

impl Projection {
    /// Whether this candidate tuple collides with an existing method across
    /// every declared dimension
    pub fn conflicts_with(&self, existing: &ShippingMethod) -> bool {
        self.channels.matches(&existing.channel_codes_lower())
            && self.product_types.matches(&existing.product_type_codes())
            && self
                .carrier_strings
                .matches(&existing.carrier_string_values())
            && self
                .carrier_service
                .matches(existing.carrier_service.as_deref())
            && self.availability.matches(&existing.availability_codes())
    }
}

/// Project a creation request under a site schema
pub fn project_create(schema: &SiteSchema, request: &CreateRequest) -> Projection {
    Projection {
        channels: if schema.declares(Dimension::Channels) {
            DimensionProjection::declared(
                request
                    .channels
                    .iter()
                    .map(|channel| channel.code().to_lowercase())
                    .collect(),
            )
        } else {
            DimensionProjection::Wildcard
        },
        product_types: if schema.declares(Dimension::ProductTypes) {
            DimensionProjection::declared(
                request
                    .product_types
                    .iter()
                    .map(|product_type| product_type.code().to_string())
                    .collect(),
            )
        } else {
            DimensionProjection::Wildcard
        },
        carrier_strings: if schema.declares(Dimension::CarrierStringRecords) {
            DimensionProjection::declared(request.carrier_string_records.clone())
        } else {
            DimensionProjection::Wildcard
        },
        carrier_service: if schema.declares(Dimension::CarrierService) {
            match &request.carrier_service {
                Some(service) => ServiceProjection::Exact(service.clone()),
                None => ServiceProjection::Wildcard,
            }
        } else {
            ServiceProjection::Wildcard
        },
        availability: if schema.declares(Dimension::AvailabilityStatus) {
            DimensionProjection::declared(
                request
                    .availability_statuses
                    .as_deref()
                    .unwrap_or_default()
                    .iter()
                    .map(|status| status.code().to_string())
                    .collect(),
            )
        } else {
            DimensionProjection::Wildcard
        },
    }
}

/// Project the merge-preview of a patch against an existing method.
///
/// Patch values override; omitted fields fall back to the existing method.
/// Carrier strings are the union of requested values and the persisted
/// values, since the reconciler appends rather than replaces.
pub fn project_update(
    schema: &SiteSchema,
    request: &PatchRequest,
    existing: &ShippingMethod,
) -> Projection {
    Projection {
        channels: if schema.declares(Dimension::Channels) {
            let codes = match &request.channels {
                Some(channels) => channels
                    .iter()
                    .map(|channel| channel.code().to_lowercase())
                    .collect(),
                None => existing.channel_codes_lower(),
            };
            DimensionProjection::declared(codes)
        } else {
            DimensionProjection::Wildcard
        },
        product_types: if schema.declares(Dimension::ProductTypes) {
            let codes = match &request.product_types {
                Some(product_types) => product_types
                    .iter()
                    .map(|product_type| product_type.code().to_string())
                    .collect(),
                None => existing.product_type_codes(),
            };
            DimensionProjection::declared(codes)
        } else {
            DimensionProjection::Wildcard
        },
        carrier_strings: if schema.declares(Dimension::CarrierStringRecords) {
            let mut values = request.carrier_string_values();
            for value in existing.carrier_string_values() {
                if !values.contains(&value) {
                    values.push(value);
                }
            }
            DimensionProjection::declared(values)
        } else {
            DimensionProjection::Wildcard
        },
        carrier_service: if schema.declares(Dimension::CarrierService) {
            let service = request
                .carrier_service
                .clone()
                .or_else(|| existing.carrier_service.clone());
            match service {
                Some(service) => ServiceProjection::Exact(service),
                None => ServiceProjection::Wildcard,
            }
        } else {
            ServiceProjection::Wildcard
        },
        availability: if schema.declares(Dimension::AvailabilityStatus) {
            let codes = match &request.availability_statuses {
                Some(statuses) => statuses
                    .iter()
                    .map(|status| status.code().to_string())
                    .collect(),
                None => existing.availability_codes(),
            };
            DimensionProjection::declared(codes)
        } else {
            DimensionProjection::Wildcard
        },
    }
}
