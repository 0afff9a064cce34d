//! Device service — use-cases for managing the device inventory.

use devdepot_domain::device::{Device, DevicePatch};
use devdepot_domain::error::{DepotError, NotFoundError, OperationRejectedError};
use devdepot_domain::filter::DeviceFilter;
use devdepot_domain::id::DeviceId;
use devdepot_domain::page::{Page, PageRequest};
use devdepot_domain::time;

use crate::ports::DeviceRepository;

/// Application service for device lifecycle operations.
pub struct DeviceService<R> {
    repo: R,
}

impl<R: DeviceRepository> DeviceService<R> {
    /// Create a new service backed by the given repository.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Persist a new device record.
    ///
    /// # Errors
    ///
    /// Returns [`DepotError::Validation`] if invariants fail, or a storage
    /// error propagated from the repository.
    #[tracing::instrument(skip(self, device), fields(device_name = %device.name))]
    pub async fn create_device(&self, device: Device) -> Result<Device, DepotError> {
        device.validate()?;
        let created = self.repo.insert(device).await?;
        tracing::info!(device_id = %created.id, "device created");
        Ok(created)
    }

    /// Look up a device by id.
    ///
    /// Absence is an empty result, not an error; the request layer decides
    /// how to report it.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn get_device(&self, id: DeviceId) -> Result<Option<Device>, DepotError> {
        self.repo.find_by_id(id).await
    }

    /// Fetch one page of all devices, unfiltered.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn list_devices(&self, request: PageRequest) -> Result<Page<Device>, DepotError> {
        self.repo.find_page(request).await
    }

    /// Apply a partial update, subject to the in-use guard.
    ///
    /// Fetches the record, lets the domain apply the patch (which rejects the
    /// whole request when the guard fires), and writes back conditionally on
    /// the fetched snapshot so a concurrent mutation cannot slip between the
    /// guard check and the write.
    ///
    /// # Errors
    ///
    /// Returns [`DepotError::NotFound`] when no device with `id` exists,
    /// [`DepotError::UpdateRejected`] when a guard fires,
    /// [`DepotError::Validation`] when an applied field is invalid, or a
    /// storage error from the repository.
    #[tracing::instrument(skip(self, patch))]
    pub async fn update_device(
        &self,
        id: DeviceId,
        patch: DevicePatch,
    ) -> Result<Device, DepotError> {
        let mut device = self.repo.find_by_id(id).await?.ok_or_else(|| NotFoundError {
            entity: "Device",
            id: id.to_string(),
        })?;

        let snapshot = device.updated_at;
        device.apply_patch(patch, time::now())?;

        let updated = self.repo.update(device, snapshot).await?;
        tracing::info!(device_id = %id, "device updated");
        Ok(updated)
    }

    /// Remove a device permanently, unless it is in use.
    ///
    /// # Errors
    ///
    /// Returns [`DepotError::NotFound`] when no device with `id` exists,
    /// [`DepotError::OperationRejected`] when the device is in use, or a
    /// storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn delete_device(&self, id: DeviceId) -> Result<(), DepotError> {
        let device = self.repo.find_by_id(id).await?.ok_or_else(|| NotFoundError {
            entity: "Device",
            id: id.to_string(),
        })?;

        if device.state.is_in_use() {
            tracing::warn!(device_id = %id, "refusing to delete device in use");
            return Err(OperationRejectedError::DeleteWhileInUse.into());
        }

        self.repo.delete(id).await?;
        tracing::info!(device_id = %id, "device deleted");
        Ok(())
    }

    /// Fetch one page of the devices matching `filter`.
    ///
    /// An empty filter matches every record, so this degenerates to
    /// [`list_devices`](Self::list_devices).
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    #[tracing::instrument(skip(self, request), fields(brand = ?filter.brand(), state = ?filter.state()))]
    pub async fn search_devices(
        &self,
        filter: DeviceFilter,
        request: PageRequest,
    ) -> Result<Page<Device>, DepotError> {
        self.repo.find_page_filtered(filter, request).await
    }
}
