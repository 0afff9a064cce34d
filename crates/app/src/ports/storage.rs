//! Storage port — the repository trait for device persistence.

use std::future::Future;

use devdepot_domain::device::Device;
use devdepot_domain::error::DepotError;
use devdepot_domain::filter::DeviceFilter;
use devdepot_domain::id::DeviceId;
use devdepot_domain::page::{Page, PageRequest};
use devdepot_domain::time::Timestamp;

/// Persistence operations over the device record set.
///
/// The `update` method is a conditional write: the row is only written when
/// its stored `updated_at` still equals `expected_updated_at`, the snapshot
/// the caller checked its guards against. A write lost to a concurrent
/// mutation surfaces as a storage error, so two racing updates can never
/// both pass a lifecycle guard against a stale snapshot.
pub trait DeviceRepository {
    /// Insert a new record.
    fn insert(&self, device: Device) -> impl Future<Output = Result<Device, DepotError>> + Send;

    /// Fetch a record by id, `None` when absent.
    fn find_by_id(
        &self,
        id: DeviceId,
    ) -> impl Future<Output = Result<Option<Device>, DepotError>> + Send;

    /// Fetch one page of the full record set.
    fn find_page(
        &self,
        request: PageRequest,
    ) -> impl Future<Output = Result<Page<Device>, DepotError>> + Send;

    /// Fetch one page of the records matching `filter`.
    fn find_page_filtered(
        &self,
        filter: DeviceFilter,
        request: PageRequest,
    ) -> impl Future<Output = Result<Page<Device>, DepotError>> + Send;

    /// Write back a mutated record, conditional on `expected_updated_at`.
    fn update(
        &self,
        device: Device,
        expected_updated_at: Timestamp,
    ) -> impl Future<Output = Result<Device, DepotError>> + Send;

    /// Remove a record permanently.
    fn delete(&self, id: DeviceId) -> impl Future<Output = Result<(), DepotError>> + Send;
}
