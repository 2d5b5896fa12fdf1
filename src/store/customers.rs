use sqlx::SqlitePool;

use crate::error::StoreError;
use crate::models::{Customer, CustomerFilter, CustomerPatch, NewCustomer};

const COLUMNS: &str = "id, name, phone, email, password";

pub async fn create(pool: &SqlitePool, customer: NewCustomer) -> Result<Customer, StoreError> {
    customer.validate()?;

    let id: i64 = sqlx::query_scalar(
        r#"INSERT INTO customers (name, phone, email, password)
           VALUES (?, ?, ?, ?)
           RETURNING id"#,
    )
    .bind(customer.name)
    .bind(customer.phone)
    .bind(customer.email)
    .bind(customer.password)
    .fetch_one(pool)
    .await?;

    get(pool, id).await
}

pub async fn get(pool: &SqlitePool, id: i64) -> Result<Customer, StoreError> {
    sqlx::query_as::<_, Customer>(&format!("SELECT {COLUMNS} FROM customers WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or(StoreError::NotFound {
            entity: "customer",
            id,
        })
}

pub async fn list(pool: &SqlitePool, filter: &CustomerFilter) -> Result<Vec<Customer>, StoreError> {
    let mut sql = format!("SELECT {COLUMNS} FROM customers WHERE 1=1");
    if filter.name.is_some() {
        sql.push_str(" AND name = ?");
    }
    if filter.phone.is_some() {
        sql.push_str(" AND phone = ?");
    }
    if filter.email.is_some() {
        sql.push_str(" AND email = ?");
    }
    sql.push_str(" ORDER BY id");

    let mut query = sqlx::query_as::<_, Customer>(&sql);
    if let Some(name) = &filter.name {
        query = query.bind(name);
    }
    if let Some(phone) = &filter.phone {
        query = query.bind(phone);
    }
    if let Some(email) = &filter.email {
        query = query.bind(email);
    }

    Ok(query.fetch_all(pool).await?)
}

pub async fn update(
    pool: &SqlitePool,
    id: i64,
    patch: CustomerPatch,
) -> Result<Customer, StoreError> {
    patch.validate()?;

    let mut sets = Vec::new();
    if patch.name.is_some() {
        sets.push("name = ?");
    }
    if patch.phone.is_some() {
        sets.push("phone = ?");
    }
    if patch.email.is_some() {
        sets.push("email = ?");
    }
    if patch.password.is_some() {
        sets.push("password = ?");
    }
    if sets.is_empty() {
        return get(pool, id).await;
    }

    let sql = format!("UPDATE customers SET {} WHERE id = ?", sets.join(", "));
    let mut query = sqlx::query(&sql);
    if let Some(name) = &patch.name {
        query = query.bind(name);
    }
    if let Some(phone) = &patch.phone {
        query = query.bind(phone);
    }
    if let Some(email) = &patch.email {
        query = query.bind(email);
    }
    if let Some(password) = &patch.password {
        query = query.bind(password);
    }

    let result = query.bind(id).execute(pool).await?;
    if result.rows_affected() == 0 {
        return Err(StoreError::NotFound {
            entity: "customer",
            id,
        });
    }

    get(pool, id).await
}

pub async fn delete(pool: &SqlitePool, id: i64) -> Result<(), StoreError> {
    let result = sqlx::query("DELETE FROM customers WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(StoreError::NotFound {
            entity: "customer",
            id,
        });
    }
    Ok(())
}
