//! JSON REST handlers for devices.

use std::str::FromStr;

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use devdepot_app::ports::DeviceRepository;
use devdepot_domain::device::{Device, DevicePatch, DeviceState};
use devdepot_domain::error::{DepotError, NotFoundError};
use devdepot_domain::filter::DeviceFilter;
use devdepot_domain::id::DeviceId;
use devdepot_domain::page::{Page, PageRequest, Sort, SortDirection, SortField};

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for creating a device.
#[derive(Deserialize)]
pub struct CreateDeviceRequest {
    pub name: String,
    pub brand: String,
    pub state: DeviceState,
}

/// Request body for partially updating a device. Absent fields are left
/// untouched; the state is carried as text so the core can reject unknown
/// values as part of the update operation.
#[derive(Deserialize)]
pub struct UpdateDeviceRequest {
    pub name: Option<String>,
    pub brand: Option<String>,
    pub state: Option<String>,
}

impl From<UpdateDeviceRequest> for DevicePatch {
    fn from(req: UpdateDeviceRequest) -> Self {
        Self {
            name: req.name,
            brand: req.brand,
            state: req.state,
        }
    }
}

/// Paging query parameters: `page`, `size`, and `sort=field[,direction]`.
#[derive(Deserialize)]
pub struct PageParams {
    pub page: Option<u32>,
    pub size: Option<u32>,
    pub sort: Option<String>,
}

impl PageParams {
    fn into_request(self) -> Result<PageRequest, ApiError> {
        let mut request = PageRequest::new(self.page.unwrap_or(0), self.size.unwrap_or(0));
        if let Some(sort) = self.sort {
            let (field, direction) = match sort.split_once(',') {
                Some((field, direction)) => (field, Some(direction)),
                None => (sort.as_str(), None),
            };
            let field = SortField::from_str(field)
                .map_err(|err| ApiError::BadRequest(err.to_string()))?;
            let direction = match direction {
                Some(direction) => SortDirection::from_str(direction)
                    .map_err(|err| ApiError::BadRequest(err.to_string()))?,
                None => SortDirection::default(),
            };
            request = request.with_sort(Sort { field, direction });
        }
        Ok(request)
    }
}

/// Filter query parameters for the search endpoint, alongside the same
/// paging parameters the list endpoint takes.
#[derive(Deserialize)]
pub struct SearchParams {
    pub brand: Option<String>,
    pub state: Option<String>,
    pub page: Option<u32>,
    pub size: Option<u32>,
    pub sort: Option<String>,
}

impl SearchParams {
    fn page_params(&self) -> PageParams {
        PageParams {
            page: self.page,
            size: self.size,
            sort: self.sort.clone(),
        }
    }
}

fn parse_device_id(id: &str) -> Result<DeviceId, ApiError> {
    DeviceId::from_str(id).map_err(|_| ApiError::BadRequest(format!("invalid device id: {id}")))
}

/// Possible responses from the list and search endpoints.
pub enum PageResponse {
    Ok(Json<Page<Device>>),
}

impl IntoResponse for PageResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the get and update endpoints.
pub enum DeviceResponse {
    Ok(Json<Device>),
}

impl IntoResponse for DeviceResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the create endpoint.
pub enum CreateResponse {
    Created(Json<Device>),
}

impl IntoResponse for CreateResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Created(json) => (StatusCode::CREATED, json).into_response(),
        }
    }
}

/// Possible responses from the delete endpoint.
pub enum DeleteResponse {
    NoContent,
}

impl IntoResponse for DeleteResponse {
    fn into_response(self) -> Response {
        match self {
            Self::NoContent => StatusCode::NO_CONTENT.into_response(),
        }
    }
}

/// `GET /api/devices`
pub async fn list<DR>(
    State(state): State<AppState<DR>>,
    Query(params): Query<PageParams>,
) -> Result<PageResponse, ApiError>
where
    DR: DeviceRepository + Send + Sync + 'static,
{
    let request = params.into_request()?;
    let page = state.device_service.list_devices(request).await?;
    Ok(PageResponse::Ok(Json(page)))
}

/// `GET /api/devices/search`
pub async fn search<DR>(
    State(state): State<AppState<DR>>,
    Query(params): Query<SearchParams>,
) -> Result<PageResponse, ApiError>
where
    DR: DeviceRepository + Send + Sync + 'static,
{
    let state_filter = params
        .state
        .as_deref()
        .map(DeviceState::from_str)
        .transpose()
        .map_err(|err| ApiError::BadRequest(err.to_string()))?;
    let request = params.page_params().into_request()?;
    let filter = DeviceFilter::new(params.brand, state_filter);

    let page = state.device_service.search_devices(filter, request).await?;
    Ok(PageResponse::Ok(Json(page)))
}

/// `GET /api/devices/{id}`
pub async fn get<DR>(
    State(state): State<AppState<DR>>,
    Path(id): Path<String>,
) -> Result<DeviceResponse, ApiError>
where
    DR: DeviceRepository + Send + Sync + 'static,
{
    let device_id = parse_device_id(&id)?;
    let device = state
        .device_service
        .get_device(device_id)
        .await?
        .ok_or_else(|| {
            ApiError::from(DepotError::NotFound(NotFoundError {
                entity: "Device",
                id,
            }))
        })?;
    Ok(DeviceResponse::Ok(Json(device)))
}

/// `POST /api/devices`
pub async fn create<DR>(
    State(state): State<AppState<DR>>,
    Json(req): Json<CreateDeviceRequest>,
) -> Result<CreateResponse, ApiError>
where
    DR: DeviceRepository + Send + Sync + 'static,
{
    let device = Device::builder()
        .name(req.name)
        .brand(req.brand)
        .state(req.state)
        .build()?;
    let created = state.device_service.create_device(device).await?;
    Ok(CreateResponse::Created(Json(created)))
}

/// `PUT /api/devices/{id}`
pub async fn update<DR>(
    State(state): State<AppState<DR>>,
    Path(id): Path<String>,
    Json(req): Json<UpdateDeviceRequest>,
) -> Result<DeviceResponse, ApiError>
where
    DR: DeviceRepository + Send + Sync + 'static,
{
    let device_id = parse_device_id(&id)?;
    let updated = state
        .device_service
        .update_device(device_id, req.into())
        .await?;
    Ok(DeviceResponse::Ok(Json(updated)))
}

/// `DELETE /api/devices/{id}`
pub async fn delete<DR>(
    State(state): State<AppState<DR>>,
    Path(id): Path<String>,
) -> Result<DeleteResponse, ApiError>
where
    DR: DeviceRepository + Send + Sync + 'static,
{
    let device_id = parse_device_id(&id)?;
    state.device_service.delete_device(device_id).await?;
    Ok(DeleteResponse::NoContent)
}
