//! # External Collaborators
//!
//! Trait seams for the services the engine consumes but does not own:
//! reference-code resolution, carrier-string input validation, and the
//! downstream sync decision. Default implementations cover the common case;
//! tests substitute counting or failing variants.

use crate::error::EngineError;
use crate::model::{Channel, ProductType, ShippingMethod};
use crate::request::CarrierStringInput;

/// Resolves requested channel and product-type codes against reference data.
///
/// Invoked only when the corresponding request field is present; a patch
/// that omits channels must trigger zero channel resolutions.
pub trait ReferenceResolver {
    fn resolve_channels(&self, codes: &[Channel]) -> Vec<Channel>;
    fn resolve_product_types(&self, codes: &[ProductType]) -> Vec<ProductType>;
}

/// Resolver that accepts every code as-is
#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughResolver;

impl ReferenceResolver for PassthroughResolver {
    fn resolve_channels(&self, codes: &[Channel]) -> Vec<Channel> {
        codes.to_vec()
    }

    fn resolve_product_types(&self, codes: &[ProductType]) -> Vec<ProductType> {
        codes.to_vec()
    }
}

/// Syntactic validation of carrier-string input, run before any other step
pub trait CarrierStringPolicy {
    /// Validate the plain values of a creation request
    fn validate_new(&self, values: &[String]) -> Result<(), EngineError>;

    /// Validate patch records against the method they target
    fn validate_patch(
        &self,
        records: &[CarrierStringInput],
        existing: &ShippingMethod,
    ) -> Result<(), EngineError>;
}

/// Policy that rejects blank values and nothing else.
///
/// Format and pattern checks belong to the transport layer.
#[derive(Debug, Clone, Copy, Default)]
pub struct BasicCarrierStringPolicy;

impl CarrierStringPolicy for BasicCarrierStringPolicy {
    fn validate_new(&self, values: &[String]) -> Result<(), EngineError> {
        for value in values {
            if value.trim().is_empty() {
                return Err(EngineError::InvalidCarrierString(
                    "blank carrier string value".to_string(),
                ));
            }
        }
        Ok(())
    }

    fn validate_patch(
        &self,
        records: &[CarrierStringInput],
        _existing: &ShippingMethod,
    ) -> Result<(), EngineError> {
        for record in records {
            if record.value.trim().is_empty() {
                return Err(EngineError::InvalidCarrierString(
                    "blank carrier string value".to_string(),
                ));
            }
        }
        Ok(())
    }
}

/// Decides whether a persisted method is pushed to the downstream commerce
/// platform, and performs the push.
///
/// Sync runs after the local write commits; a sync failure never rolls the
/// local write back.
pub trait SyncTarget {
    fn should_sync(&self, method: &ShippingMethod) -> bool;
    fn sync(&self, method: &ShippingMethod) -> Result<(), EngineError>;
}

/// Sync target that never syncs
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSync;

impl SyncTarget for NoopSync {
    fn should_sync(&self, _method: &ShippingMethod) -> bool {
        false
    }

    fn sync(&self, _method: &ShippingMethod) -> Result<(), EngineError> {
        Ok(())
    }
}
