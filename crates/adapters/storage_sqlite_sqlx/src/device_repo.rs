//! `SQLite` implementation of [`DeviceRepository`].

use std::str::FromStr;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use devdepot_app::ports::DeviceRepository;
use devdepot_domain::device::{Device, DeviceState};
use devdepot_domain::error::DepotError;
use devdepot_domain::filter::DeviceFilter;
use devdepot_domain::id::DeviceId;
use devdepot_domain::page::{Page, PageRequest, Sort, SortDirection, SortField};
use devdepot_domain::time::Timestamp;

use crate::error::StorageError;

/// Wrapper for converting database rows into domain [`Device`] values
/// without polluting domain structs with database concerns.
struct Wrapper(Device);

impl Wrapper {
    fn maybe(value: Option<Self>) -> Option<Device> {
        value.map(|w| w.0)
    }
}

fn parse_timestamp(value: &str) -> Result<Timestamp, sqlx::Error> {
    chrono::DateTime::parse_from_rfc3339(value)
        .map(|ts| ts.to_utc())
        .map_err(|err| sqlx::Error::Decode(Box::new(err)))
}

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: String = row.try_get("id")?;
        let name: String = row.try_get("name")?;
        let brand: String = row.try_get("brand")?;
        let state: String = row.try_get("state")?;
        let created_at: String = row.try_get("created_at")?;
        let updated_at: String = row.try_get("updated_at")?;

        let id = DeviceId::from_str(&id).map_err(|err| sqlx::Error::Decode(Box::new(err)))?;
        let state =
            DeviceState::from_str(&state).map_err(|err| sqlx::Error::Decode(Box::new(err)))?;
        let created_at = parse_timestamp(&created_at)?;
        let updated_at = parse_timestamp(&updated_at)?;

        Ok(Self(Device {
            id,
            name,
            brand,
            state,
            created_at,
            updated_at,
        }))
    }
}

const INSERT: &str = r"
    INSERT INTO devices (id, name, brand, state, created_at, updated_at)
    VALUES (?, ?, ?, ?, ?, ?)
";
const SELECT_BY_ID: &str = "SELECT * FROM devices WHERE id = ?";
const UPDATE_IF_UNCHANGED: &str = r"
    UPDATE devices SET name = ?, brand = ?, state = ?, updated_at = ?
    WHERE id = ? AND updated_at = ?
";
const DELETE_BY_ID: &str = "DELETE FROM devices WHERE id = ?";

/// Compose the `WHERE` clause for a filter as a list of equality conditions.
/// Values are always bound, never interpolated.
fn where_clause(filter: &DeviceFilter) -> String {
    let mut conditions = Vec::new();
    if filter.brand().is_some() {
        conditions.push("brand = ?");
    }
    if filter.state().is_some() {
        conditions.push("state = ?");
    }
    if conditions.is_empty() {
        String::new()
    } else {
        format!(" WHERE {}", conditions.join(" AND "))
    }
}

/// Map the sort request onto a whitelisted column and direction.
fn order_clause(sort: Sort) -> String {
    let column = match sort.field {
        SortField::Name => "name",
        SortField::Brand => "brand",
        SortField::State => "state",
        SortField::CreatedAt => "created_at",
        SortField::UpdatedAt => "updated_at",
    };
    let direction = match sort.direction {
        SortDirection::Asc => "ASC",
        SortDirection::Desc => "DESC",
    };
    format!(" ORDER BY {column} {direction}")
}

/// `SQLite`-backed device repository.
pub struct SqliteDeviceRepository {
    pool: SqlitePool,
}

impl SqliteDeviceRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    async fn fetch_page(
        &self,
        filter: &DeviceFilter,
        request: PageRequest,
    ) -> Result<Page<Device>, DepotError> {
        let where_sql = where_clause(filter);
        let count_sql = format!("SELECT COUNT(*) FROM devices{where_sql}");
        let select_sql = format!(
            "SELECT * FROM devices{where_sql}{} LIMIT ? OFFSET ?",
            order_clause(request.sort)
        );

        let mut count_query = sqlx::query_scalar::<_, i64>(&count_sql);
        if let Some(brand) = filter.brand() {
            count_query = count_query.bind(brand.to_string());
        }
        if let Some(state) = filter.state() {
            count_query = count_query.bind(state.to_string());
        }
        let total = count_query
            .fetch_one(&self.pool)
            .await
            .map_err(StorageError::from)?;

        let mut select_query = sqlx::query_as::<_, Wrapper>(&select_sql);
        if let Some(brand) = filter.brand() {
            select_query = select_query.bind(brand.to_string());
        }
        if let Some(state) = filter.state() {
            select_query = select_query.bind(state.to_string());
        }
        let rows: Vec<Wrapper> = select_query
            .bind(i64::from(request.size))
            .bind(i64::try_from(request.offset()).unwrap_or(i64::MAX))
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(Page::new(
            rows.into_iter().map(|w| w.0).collect(),
            request,
            u64::try_from(total).unwrap_or(0),
        ))
    }
}

impl DeviceRepository for SqliteDeviceRepository {
    async fn insert(&self, device: Device) -> Result<Device, DepotError> {
        sqlx::query(INSERT)
            .bind(device.id.to_string())
            .bind(&device.name)
            .bind(&device.brand)
            .bind(device.state.to_string())
            .bind(device.created_at.to_rfc3339())
            .bind(device.updated_at.to_rfc3339())
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(device)
    }

    async fn find_by_id(&self, id: DeviceId) -> Result<Option<Device>, DepotError> {
        let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_ID)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(Wrapper::maybe(row))
    }

    async fn find_page(&self, request: PageRequest) -> Result<Page<Device>, DepotError> {
        self.fetch_page(&DeviceFilter::default(), request).await
    }

    async fn find_page_filtered(
        &self,
        filter: DeviceFilter,
        request: PageRequest,
    ) -> Result<Page<Device>, DepotError> {
        self.fetch_page(&filter, request).await
    }

    async fn update(
        &self,
        device: Device,
        expected_updated_at: Timestamp,
    ) -> Result<Device, DepotError> {
        let result = sqlx::query(UPDATE_IF_UNCHANGED)
            .bind(&device.name)
            .bind(&device.brand)
            .bind(device.state.to_string())
            .bind(device.updated_at.to_rfc3339())
            .bind(device.id.to_string())
            .bind(expected_updated_at.to_rfc3339())
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;

        if result.rows_affected() == 0 {
            return Err(StorageError::StaleWrite.into());
        }

        Ok(device)
    }

    async fn delete(&self, id: DeviceId) -> Result<(), DepotError> {
        sqlx::query(DELETE_BY_ID)
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(())
    }
}
