use chrono::Utc;
use sqlx::SqlitePool;

use crate::error::StoreError;
use crate::models::{Booking, BookingFilter, BookingPatch, BookingStatus, NewBooking};

const COLUMNS: &str =
    "id, barber_id, customer_id, service_name, date, time, location, status, created_at";

pub async fn create(pool: &SqlitePool, booking: NewBooking) -> Result<Booking, StoreError> {
    booking.validate()?;
    let status = booking.status.unwrap_or(BookingStatus::Pending);
    let created_at = booking.created_at.unwrap_or_else(Utc::now);

    let id: i64 = sqlx::query_scalar(
        r#"INSERT INTO bookings
           (barber_id, customer_id, service_name, date, time, location, status, created_at)
           VALUES (?, ?, ?, ?, ?, ?, ?, ?)
           RETURNING id"#,
    )
    .bind(booking.barber_id)
    .bind(booking.customer_id)
    .bind(booking.service_name)
    .bind(booking.date)
    .bind(booking.time)
    .bind(booking.location)
    .bind(status)
    .bind(created_at)
    .fetch_one(pool)
    .await?;

    get(pool, id).await
}

pub async fn get(pool: &SqlitePool, id: i64) -> Result<Booking, StoreError> {
    sqlx::query_as::<_, Booking>(&format!("SELECT {COLUMNS} FROM bookings WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or(StoreError::NotFound {
            entity: "booking",
            id,
        })
}

fn filter_clauses(filter: &BookingFilter, sql: &mut String) {
    if filter.barber_id.is_some() {
        sql.push_str(" AND barber_id = ?");
    }
    if filter.customer_id.is_some() {
        sql.push_str(" AND customer_id = ?");
    }
    if filter.status.is_some() {
        sql.push_str(" AND status = ?");
    }
    if filter.date.is_some() {
        sql.push_str(" AND date = ?");
    }
    if filter.service_name.is_some() {
        sql.push_str(" AND service_name = ?");
    }
}

pub async fn list(pool: &SqlitePool, filter: &BookingFilter) -> Result<Vec<Booking>, StoreError> {
    let mut sql = format!("SELECT {COLUMNS} FROM bookings WHERE 1=1");
    filter_clauses(filter, &mut sql);
    sql.push_str(" ORDER BY created_at DESC, id DESC");

    let mut query = sqlx::query_as::<_, Booking>(&sql);
    if let Some(barber_id) = filter.barber_id {
        query = query.bind(barber_id);
    }
    if let Some(customer_id) = filter.customer_id {
        query = query.bind(customer_id);
    }
    if let Some(status) = filter.status {
        query = query.bind(status);
    }
    if let Some(date) = filter.date {
        query = query.bind(date);
    }
    if let Some(service_name) = &filter.service_name {
        query = query.bind(service_name);
    }

    Ok(query.fetch_all(pool).await?)
}

pub async fn count(pool: &SqlitePool, filter: &BookingFilter) -> Result<i64, StoreError> {
    let mut sql = String::from("SELECT COUNT(*) FROM bookings WHERE 1=1");
    filter_clauses(filter, &mut sql);

    let mut query = sqlx::query_scalar::<_, i64>(&sql);
    if let Some(barber_id) = filter.barber_id {
        query = query.bind(barber_id);
    }
    if let Some(customer_id) = filter.customer_id {
        query = query.bind(customer_id);
    }
    if let Some(status) = filter.status {
        query = query.bind(status);
    }
    if let Some(date) = filter.date {
        query = query.bind(date);
    }
    if let Some(service_name) = &filter.service_name {
        query = query.bind(service_name);
    }

    Ok(query.fetch_one(pool).await?)
}

pub async fn update(pool: &SqlitePool, id: i64, patch: BookingPatch) -> Result<Booking, StoreError> {
    patch.validate()?;

    let mut sets = Vec::new();
    if patch.barber_id.is_some() {
        sets.push("barber_id = ?");
    }
    if patch.customer_id.is_some() {
        sets.push("customer_id = ?");
    }
    if patch.service_name.is_some() {
        sets.push("service_name = ?");
    }
    if patch.date.is_some() {
        sets.push("date = ?");
    }
    if patch.time.is_some() {
        sets.push("time = ?");
    }
    if patch.location.is_some() {
        sets.push("location = ?");
    }
    if patch.status.is_some() {
        sets.push("status = ?");
    }
    if sets.is_empty() {
        return get(pool, id).await;
    }

    let sql = format!("UPDATE bookings SET {} WHERE id = ?", sets.join(", "));
    let mut query = sqlx::query(&sql);
    if let Some(barber_id) = patch.barber_id {
        query = query.bind(barber_id);
    }
    if let Some(customer_id) = patch.customer_id {
        query = query.bind(customer_id);
    }
    if let Some(service_name) = &patch.service_name {
        query = query.bind(service_name);
    }
    if let Some(date) = patch.date {
        query = query.bind(date);
    }
    if let Some(time) = patch.time {
        query = query.bind(time);
    }
    if let Some(location) = &patch.location {
        query = query.bind(location);
    }
    if let Some(status) = patch.status {
        query = query.bind(status);
    }

    let result = query.bind(id).execute(pool).await?;
    if result.rows_affected() == 0 {
        return Err(StoreError::NotFound {
            entity: "booking",
            id,
        });
    }

    get(pool, id).await
}

pub async fn delete(pool: &SqlitePool, id: i64) -> Result<(), StoreError> {
    let result = sqlx::query("DELETE FROM bookings WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(StoreError::NotFound {
            entity: "booking",
            id,
        });
    }
    Ok(())
}
