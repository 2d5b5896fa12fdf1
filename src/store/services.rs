use sqlx::SqlitePool;

use crate::error::StoreError;
use crate::models::{NewService, Service, ServiceFilter, ServicePatch};

const COLUMNS: &str = "id, barber_id, name, price";

pub async fn create(pool: &SqlitePool, service: NewService) -> Result<Service, StoreError> {
    service.validate()?;

    let id: i64 = sqlx::query_scalar(
        r#"INSERT INTO services (barber_id, name, price)
           VALUES (?, ?, ?)
           RETURNING id"#,
    )
    .bind(service.barber_id)
    .bind(service.name)
    .bind(service.price)
    .fetch_one(pool)
    .await?;

    get(pool, id).await
}

pub async fn get(pool: &SqlitePool, id: i64) -> Result<Service, StoreError> {
    sqlx::query_as::<_, Service>(&format!("SELECT {COLUMNS} FROM services WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or(StoreError::NotFound {
            entity: "service",
            id,
        })
}

pub async fn list(pool: &SqlitePool, filter: &ServiceFilter) -> Result<Vec<Service>, StoreError> {
    let mut sql = format!("SELECT {COLUMNS} FROM services WHERE 1=1");
    if filter.barber_id.is_some() {
        sql.push_str(" AND barber_id = ?");
    }
    if filter.name.is_some() {
        sql.push_str(" AND name = ?");
    }
    sql.push_str(" ORDER BY id");

    let mut query = sqlx::query_as::<_, Service>(&sql);
    if let Some(barber_id) = filter.barber_id {
        query = query.bind(barber_id);
    }
    if let Some(name) = &filter.name {
        query = query.bind(name);
    }

    Ok(query.fetch_all(pool).await?)
}

pub async fn update(pool: &SqlitePool, id: i64, patch: ServicePatch) -> Result<Service, StoreError> {
    patch.validate()?;

    let mut sets = Vec::new();
    if patch.barber_id.is_some() {
        sets.push("barber_id = ?");
    }
    if patch.name.is_some() {
        sets.push("name = ?");
    }
    if patch.price.is_some() {
        sets.push("price = ?");
    }
    if sets.is_empty() {
        return get(pool, id).await;
    }

    let sql = format!("UPDATE services SET {} WHERE id = ?", sets.join(", "));
    let mut query = sqlx::query(&sql);
    if let Some(barber_id) = patch.barber_id {
        query = query.bind(barber_id);
    }
    if let Some(name) = &patch.name {
        query = query.bind(name);
    }
    if let Some(price) = patch.price {
        query = query.bind(price);
    }

    let result = query.bind(id).execute(pool).await?;
    if result.rows_affected() == 0 {
        return Err(StoreError::NotFound {
            entity: "service",
            id,
        });
    }

    get(pool, id).await
}

pub async fn delete(pool: &SqlitePool, id: i64) -> Result<(), StoreError> {
    let result = sqlx::query("DELETE FROM services WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(StoreError::NotFound {
            entity: "service",
            id,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewBarber;
    use crate::store::barbers;

    async fn seeded_barber(pool: &SqlitePool) -> i64 {
        barbers::create(
            pool,
            NewBarber {
                name: "Tony Fade".into(),
                phone: "555-0100".into(),
                email: "tony@clipjoint.test".into(),
                shop_name: "Clip Joint".into(),
                address: "12 Main St".into(),
                password: "argon2-hash".into(),
                profile_pic: None,
                shop_front_pic: None,
                status: None,
            },
        )
        .await
        .unwrap()
        .id
    }

    #[sqlx::test]
    async fn create_for_existing_barber(pool: SqlitePool) {
        let barber_id = seeded_barber(&pool).await;

        let service = create(
            &pool,
            NewService {
                barber_id,
                name: "Haircut".into(),
                price: 25.0,
            },
        )
        .await
        .unwrap();

        assert!(service.id > 0);
        assert_eq!(service.barber_id, barber_id);
        assert_eq!(service.price, 25.0);
    }

    #[sqlx::test]
    async fn unknown_barber_is_rejected(pool: SqlitePool) {
        let err = create(
            &pool,
            NewService {
                barber_id: 999,
                name: "Haircut".into(),
                price: 25.0,
            },
        )
        .await
        .unwrap_err();

        assert!(matches!(err, StoreError::ForeignKeyViolation(_)));
    }

    #[sqlx::test]
    async fn list_filters_by_barber(pool: SqlitePool) {
        let barber_id = seeded_barber(&pool).await;
        let other_id = barbers::create(
            &pool,
            NewBarber {
                name: "Marco Trim".into(),
                phone: "555-0101".into(),
                email: "marco@fadehouse.test".into(),
                shop_name: "Fade House".into(),
                address: "8 Side St".into(),
                password: "argon2-hash".into(),
                profile_pic: None,
                shop_front_pic: None,
                status: None,
            },
        )
        .await
        .unwrap()
        .id;

        for (owner, name, price) in [
            (barber_id, "Haircut", 25.0),
            (barber_id, "Beard Trim", 12.5),
            (other_id, "Haircut", 30.0),
        ] {
            create(
                &pool,
                NewService {
                    barber_id: owner,
                    name: name.into(),
                    price,
                },
            )
            .await
            .unwrap();
        }

        let owned = list(
            &pool,
            &ServiceFilter {
                barber_id: Some(barber_id),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(owned.len(), 2);
        assert!(owned.iter().all(|s| s.barber_id == barber_id));
    }

    #[sqlx::test]
    async fn update_price(pool: SqlitePool) {
        let barber_id = seeded_barber(&pool).await;
        let service = create(
            &pool,
            NewService {
                barber_id,
                name: "Haircut".into(),
                price: 25.0,
            },
        )
        .await
        .unwrap();

        let updated = update(
            &pool,
            service.id,
            ServicePatch {
                price: Some(27.5),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        assert_eq!(updated.price, 27.5);
        assert_eq!(updated.name, "Haircut");
    }

    #[sqlx::test]
    async fn reassigning_to_unknown_barber_is_rejected(pool: SqlitePool) {
        let barber_id = seeded_barber(&pool).await;
        let service = create(
            &pool,
            NewService {
                barber_id,
                name: "Haircut".into(),
                price: 25.0,
            },
        )
        .await
        .unwrap();

        let err = update(
            &pool,
            service.id,
            ServicePatch {
                barber_id: Some(999),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();

        assert!(matches!(err, StoreError::ForeignKeyViolation(_)));
    }
}
