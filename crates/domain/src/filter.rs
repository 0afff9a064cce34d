//! Search filter — a composable conjunction of equality predicates.

use crate::device::{Device, DeviceState};

/// Optional filter terms for device search.
///
/// Both terms are independent and conjoined: a device matches when its brand
/// equals the brand term (if present) **and** its state equals the state term
/// (if present). An empty filter matches every record, making search with no
/// terms equivalent to a plain list.
///
/// The filter carries no mutable state and is freely shareable across
/// concurrent searches.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeviceFilter {
    brand: Option<String>,
    state: Option<DeviceState>,
}

impl DeviceFilter {
    /// Build a filter from optional terms. A blank (empty or whitespace-only)
    /// brand is treated as absent.
    #[must_use]
    pub fn new(brand: Option<String>, state: Option<DeviceState>) -> Self {
        let brand = brand.filter(|brand| !brand.trim().is_empty());
        Self { brand, state }
    }

    /// The brand term, if present.
    #[must_use]
    pub fn brand(&self) -> Option<&str> {
        self.brand.as_deref()
    }

    /// The state term, if present.
    #[must_use]
    pub fn state(&self) -> Option<DeviceState> {
        self.state
    }

    /// Whether the filter has no terms at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.brand.is_none() && self.state.is_none()
    }

    /// Evaluate the filter against a single record.
    #[must_use]
    pub fn matches(&self, device: &Device) -> bool {
        self.brand.as_deref().is_none_or(|brand| device.brand == brand)
            && self.state.is_none_or(|state| device.state == state)
    }
}
