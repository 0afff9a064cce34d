//! Device — the managed inventory record and its lifecycle rules.

use serde::{Deserialize, Serialize};

use crate::error::{DepotError, UpdateRejectedError, ValidationError};
use crate::id::DeviceId;
use crate::time::Timestamp;

/// Maximum length of the `name` and `brand` fields.
pub const MAX_FIELD_LEN: usize = 100;

/// Lifecycle state of a device, constraining which mutations are allowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DeviceState {
    #[default]
    Available,
    InUse,
    Inactive,
}

impl DeviceState {
    /// Whether the device is currently in use. While in use, name and brand
    /// are frozen and the device cannot be deleted.
    #[must_use]
    pub fn is_in_use(self) -> bool {
        matches!(self, Self::InUse)
    }
}

impl std::fmt::Display for DeviceState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Available => f.write_str("AVAILABLE"),
            Self::InUse => f.write_str("IN_USE"),
            Self::Inactive => f.write_str("INACTIVE"),
        }
    }
}

/// The supplied text does not name a member of [`DeviceState`].
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown device state: {0}")]
pub struct UnknownStateError(pub String);

impl std::str::FromStr for DeviceState {
    type Err = UnknownStateError;

    /// Parse a canonical state name, ignoring ASCII case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("AVAILABLE") {
            Ok(Self::Available)
        } else if s.eq_ignore_ascii_case("IN_USE") {
            Ok(Self::InUse)
        } else if s.eq_ignore_ascii_case("INACTIVE") {
            Ok(Self::Inactive)
        } else {
            Err(UnknownStateError(s.to_string()))
        }
    }
}

/// A managed inventory record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    pub id: DeviceId,
    pub name: String,
    pub brand: String,
    pub state: DeviceState,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Device {
    /// Create a builder for constructing a [`Device`].
    #[must_use]
    pub fn builder() -> DeviceBuilder {
        DeviceBuilder::default()
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`DepotError::Validation`] when `name` or `brand` is empty or
    /// longer than [`MAX_FIELD_LEN`], or when the timestamps are out of order.
    pub fn validate(&self) -> Result<(), DepotError> {
        if self.name.is_empty() {
            return Err(ValidationError::EmptyName.into());
        }
        if self.name.chars().count() > MAX_FIELD_LEN {
            return Err(ValidationError::NameTooLong(MAX_FIELD_LEN).into());
        }
        if self.brand.is_empty() {
            return Err(ValidationError::EmptyBrand.into());
        }
        if self.brand.chars().count() > MAX_FIELD_LEN {
            return Err(ValidationError::BrandTooLong(MAX_FIELD_LEN).into());
        }
        if self.updated_at < self.created_at {
            return Err(ValidationError::TimestampOrder.into());
        }
        Ok(())
    }

    /// Apply a partial update, enforcing the in-use guard.
    ///
    /// The guard rejects the *whole* request when the device is in use and
    /// the patch supplies a `name` or `brand` that differs from the stored
    /// value; supplying the identical value is permitted. State changes are
    /// always permitted. On any rejection the record is left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`DepotError::UpdateRejected`] when the in-use guard fires or
    /// when the supplied state is not a member of the enumeration, and
    /// [`DepotError::Validation`] when an applied field violates an
    /// invariant.
    pub fn apply_patch(&mut self, patch: DevicePatch, now: Timestamp) -> Result<(), DepotError> {
        if self.state.is_in_use() {
            let name_differs = patch.name.as_deref().is_some_and(|name| name != self.name);
            let brand_differs = patch
                .brand
                .as_deref()
                .is_some_and(|brand| brand != self.brand);
            if name_differs || brand_differs {
                return Err(UpdateRejectedError::FieldsLockedWhileInUse.into());
            }
        }

        let state = patch
            .state
            .as_deref()
            .map(str::parse::<DeviceState>)
            .transpose()
            .map_err(|err| UpdateRejectedError::InvalidState(err.0))?;

        let mut updated = self.clone();
        if let Some(name) = patch.name {
            updated.name = name;
        }
        if let Some(brand) = patch.brand {
            updated.brand = brand;
        }
        if let Some(state) = state {
            updated.state = state;
        }
        updated.updated_at = now;
        updated.validate()?;

        *self = updated;
        Ok(())
    }
}

/// Partial update input: only supplied fields are applied.
///
/// The state is carried as the raw requested text so that an unknown value
/// is rejected by [`Device::apply_patch`] rather than at the transport edge.
#[derive(Debug, Clone, Default)]
pub struct DevicePatch {
    pub name: Option<String>,
    pub brand: Option<String>,
    pub state: Option<String>,
}

/// Step-by-step builder for [`Device`].
#[derive(Debug, Default)]
pub struct DeviceBuilder {
    id: Option<DeviceId>,
    name: Option<String>,
    brand: Option<String>,
    state: Option<DeviceState>,
}

impl DeviceBuilder {
    #[must_use]
    pub fn id(mut self, id: DeviceId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = Some(brand.into());
        self
    }

    #[must_use]
    pub fn state(mut self, state: DeviceState) -> Self {
        self.state = Some(state);
        self
    }

    /// Consume the builder, validate, and return a [`Device`].
    ///
    /// Fresh records get `created_at == updated_at`.
    ///
    /// # Errors
    ///
    /// Returns [`DepotError::Validation`] if `name` or `brand` is missing,
    /// empty, or too long.
    pub fn build(self) -> Result<Device, DepotError> {
        let now = crate::time::now();
        let device = Device {
            id: self.id.unwrap_or_default(),
            name: self.name.unwrap_or_default(),
            brand: self.brand.unwrap_or_default(),
            state: self.state.unwrap_or_default(),
            created_at: now,
            updated_at: now,
        };
        device.validate()?;
        Ok(device)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn in_use_device() -> Device {
        Device::builder()
            .name("ThinkPad X1")
            .brand("Lenovo")
            .state(DeviceState::InUse)
            .build()
            .unwrap()
    }

    #[test]
    fn should_build_valid_device_when_name_and_brand_provided() {
        let device = Device::builder()
            .name("MacBook Pro")
            .brand("Apple")
            .build()
            .unwrap();
        assert_eq!(device.name, "MacBook Pro");
        assert_eq!(device.brand, "Apple");
        assert_eq!(device.state, DeviceState::Available);
        assert_eq!(device.created_at, device.updated_at);
    }

    #[test]
    fn should_return_validation_error_when_name_is_empty() {
        let result = Device::builder().brand("Apple").build();
        assert!(matches!(
            result,
            Err(DepotError::Validation(ValidationError::EmptyName))
        ));
    }

    #[test]
    fn should_return_validation_error_when_brand_is_empty() {
        let result = Device::builder().name("MacBook Pro").build();
        assert!(matches!(
            result,
            Err(DepotError::Validation(ValidationError::EmptyBrand))
        ));
    }

    #[test]
    fn should_return_validation_error_when_name_exceeds_limit() {
        let result = Device::builder()
            .name("x".repeat(MAX_FIELD_LEN + 1))
            .brand("Apple")
            .build();
        assert!(matches!(
            result,
            Err(DepotError::Validation(ValidationError::NameTooLong(_)))
        ));
    }

    #[test]
    fn should_accept_name_at_exactly_the_limit() {
        let device = Device::builder()
            .name("x".repeat(MAX_FIELD_LEN))
            .brand("Apple")
            .build()
            .unwrap();
        assert_eq!(device.name.len(), MAX_FIELD_LEN);
    }

    #[test]
    fn should_parse_canonical_state_names_case_insensitively() {
        assert_eq!(
            DeviceState::from_str("AVAILABLE").unwrap(),
            DeviceState::Available
        );
        assert_eq!(DeviceState::from_str("in_use").unwrap(), DeviceState::InUse);
        assert_eq!(
            DeviceState::from_str("Inactive").unwrap(),
            DeviceState::Inactive
        );
    }

    #[test]
    fn should_return_error_when_parsing_unknown_state() {
        let err = DeviceState::from_str("BROKEN").unwrap_err();
        assert_eq!(err.0, "BROKEN");
    }

    #[test]
    fn should_serialize_state_with_canonical_name() {
        let json = serde_json::to_string(&DeviceState::InUse).unwrap();
        assert_eq!(json, "\"IN_USE\"");
        let parsed: DeviceState = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, DeviceState::InUse);
    }

    #[test]
    fn should_display_canonical_state_name() {
        assert_eq!(DeviceState::Available.to_string(), "AVAILABLE");
        assert_eq!(DeviceState::InUse.to_string(), "IN_USE");
        assert_eq!(DeviceState::Inactive.to_string(), "INACTIVE");
    }

    #[test]
    fn should_apply_all_supplied_fields_when_not_in_use() {
        let mut device = Device::builder()
            .name("Latitude")
            .brand("Dell")
            .build()
            .unwrap();
        let created_at = device.created_at;

        device
            .apply_patch(
                DevicePatch {
                    name: Some("Latitude 7440".to_string()),
                    brand: Some("Dell Inc".to_string()),
                    state: Some("INACTIVE".to_string()),
                },
                crate::time::now(),
            )
            .unwrap();

        assert_eq!(device.name, "Latitude 7440");
        assert_eq!(device.brand, "Dell Inc");
        assert_eq!(device.state, DeviceState::Inactive);
        assert_eq!(device.created_at, created_at);
        assert!(device.updated_at >= created_at);
    }

    #[test]
    fn should_leave_absent_fields_untouched() {
        let mut device = Device::builder()
            .name("Latitude")
            .brand("Dell")
            .build()
            .unwrap();

        device
            .apply_patch(
                DevicePatch {
                    name: Some("Latitude 7440".to_string()),
                    ..DevicePatch::default()
                },
                crate::time::now(),
            )
            .unwrap();

        assert_eq!(device.name, "Latitude 7440");
        assert_eq!(device.brand, "Dell");
        assert_eq!(device.state, DeviceState::Available);
    }

    #[test]
    fn should_reject_name_change_when_in_use_and_leave_record_unmodified() {
        let mut device = in_use_device();
        let before = device.clone();

        let result = device.apply_patch(
            DevicePatch {
                name: Some("ThinkPad X2".to_string()),
                ..DevicePatch::default()
            },
            crate::time::now(),
        );

        assert!(matches!(
            result,
            Err(DepotError::UpdateRejected(
                UpdateRejectedError::FieldsLockedWhileInUse
            ))
        ));
        assert_eq!(device, before);
    }

    #[test]
    fn should_reject_brand_change_when_in_use() {
        let mut device = in_use_device();

        let result = device.apply_patch(
            DevicePatch {
                brand: Some("IBM".to_string()),
                ..DevicePatch::default()
            },
            crate::time::now(),
        );

        assert!(matches!(result, Err(DepotError::UpdateRejected(_))));
    }

    #[test]
    fn should_reject_whole_request_when_in_use_even_if_state_also_supplied() {
        let mut device = in_use_device();
        let before = device.clone();

        let result = device.apply_patch(
            DevicePatch {
                name: Some("ThinkPad X2".to_string()),
                state: Some("AVAILABLE".to_string()),
                ..DevicePatch::default()
            },
            crate::time::now(),
        );

        assert!(matches!(result, Err(DepotError::UpdateRejected(_))));
        // The state part of the request must not be applied selectively.
        assert_eq!(device, before);
    }

    #[test]
    fn should_permit_identical_name_and_brand_when_in_use() {
        let mut device = in_use_device();

        device
            .apply_patch(
                DevicePatch {
                    name: Some("ThinkPad X1".to_string()),
                    brand: Some("Lenovo".to_string()),
                    state: Some("AVAILABLE".to_string()),
                },
                crate::time::now(),
            )
            .unwrap();

        assert_eq!(device.state, DeviceState::Available);
    }

    #[test]
    fn should_permit_state_only_change_when_in_use() {
        let mut device = in_use_device();
        let before_updated = device.updated_at;

        device
            .apply_patch(
                DevicePatch {
                    state: Some("INACTIVE".to_string()),
                    ..DevicePatch::default()
                },
                crate::time::now(),
            )
            .unwrap();

        assert_eq!(device.state, DeviceState::Inactive);
        assert!(device.updated_at >= before_updated);
    }

    #[test]
    fn should_reject_unknown_state_value_and_leave_record_unmodified() {
        let mut device = Device::builder()
            .name("Latitude")
            .brand("Dell")
            .build()
            .unwrap();
        let before = device.clone();

        let result = device.apply_patch(
            DevicePatch {
                state: Some("BROKEN".to_string()),
                ..DevicePatch::default()
            },
            crate::time::now(),
        );

        assert!(matches!(
            result,
            Err(DepotError::UpdateRejected(
                UpdateRejectedError::InvalidState(value)
            )) if value == "BROKEN"
        ));
        assert_eq!(device, before);
    }

    #[test]
    fn should_reject_empty_name_in_patch() {
        let mut device = Device::builder()
            .name("Latitude")
            .brand("Dell")
            .build()
            .unwrap();
        let before = device.clone();

        let result = device.apply_patch(
            DevicePatch {
                name: Some(String::new()),
                ..DevicePatch::default()
            },
            crate::time::now(),
        );

        assert!(matches!(result, Err(DepotError::Validation(_))));
        assert_eq!(device, before);
    }

    #[test]
    fn should_roundtrip_device_through_serde_json_with_camel_case_keys() {
        let device = Device::builder()
            .name("MacBook Pro")
            .brand("Apple")
            .state(DeviceState::InUse)
            .build()
            .unwrap();

        let json = serde_json::to_value(&device).unwrap();
        assert!(json.get("createdAt").is_some());
        assert!(json.get("updatedAt").is_some());
        assert_eq!(json["state"], "IN_USE");

        let parsed: Device = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, device);
    }
}
