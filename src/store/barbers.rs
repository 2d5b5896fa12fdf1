use sqlx::SqlitePool;

use crate::error::StoreError;
use crate::models::{Barber, BarberFilter, BarberPatch, BarberStatus, NewBarber};

const COLUMNS: &str =
    "id, name, phone, email, shop_name, address, password, profile_pic, shop_front_pic, status";

pub async fn create(pool: &SqlitePool, barber: NewBarber) -> Result<Barber, StoreError> {
    barber.validate()?;
    let status = barber.status.unwrap_or(BarberStatus::Pending);

    let id: i64 = sqlx::query_scalar(
        r#"INSERT INTO barbers
           (name, phone, email, shop_name, address, password, profile_pic, shop_front_pic, status)
           VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
           RETURNING id"#,
    )
    .bind(barber.name)
    .bind(barber.phone)
    .bind(barber.email)
    .bind(barber.shop_name)
    .bind(barber.address)
    .bind(barber.password)
    .bind(barber.profile_pic)
    .bind(barber.shop_front_pic)
    .bind(status)
    .fetch_one(pool)
    .await?;

    get(pool, id).await
}

pub async fn get(pool: &SqlitePool, id: i64) -> Result<Barber, StoreError> {
    sqlx::query_as::<_, Barber>(&format!("SELECT {COLUMNS} FROM barbers WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or(StoreError::NotFound {
            entity: "barber",
            id,
        })
}

pub async fn list(pool: &SqlitePool, filter: &BarberFilter) -> Result<Vec<Barber>, StoreError> {
    let mut sql = format!("SELECT {COLUMNS} FROM barbers WHERE 1=1");
    if filter.status.is_some() {
        sql.push_str(" AND status = ?");
    }
    if filter.phone.is_some() {
        sql.push_str(" AND phone = ?");
    }
    if filter.email.is_some() {
        sql.push_str(" AND email = ?");
    }
    if filter.shop_name.is_some() {
        sql.push_str(" AND shop_name = ?");
    }
    sql.push_str(" ORDER BY id");

    let mut query = sqlx::query_as::<_, Barber>(&sql);
    if let Some(status) = filter.status {
        query = query.bind(status);
    }
    if let Some(phone) = &filter.phone {
        query = query.bind(phone);
    }
    if let Some(email) = &filter.email {
        query = query.bind(email);
    }
    if let Some(shop_name) = &filter.shop_name {
        query = query.bind(shop_name);
    }

    Ok(query.fetch_all(pool).await?)
}

pub async fn update(pool: &SqlitePool, id: i64, patch: BarberPatch) -> Result<Barber, StoreError> {
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
    if patch.shop_name.is_some() {
        sets.push("shop_name = ?");
    }
    if patch.address.is_some() {
        sets.push("address = ?");
    }
    if patch.password.is_some() {
        sets.push("password = ?");
    }
    if patch.profile_pic.is_some() {
        sets.push("profile_pic = ?");
    }
    if patch.shop_front_pic.is_some() {
        sets.push("shop_front_pic = ?");
    }
    if patch.status.is_some() {
        sets.push("status = ?");
    }
    if sets.is_empty() {
        return get(pool, id).await;
    }

    let sql = format!("UPDATE barbers SET {} WHERE id = ?", sets.join(", "));
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
    if let Some(shop_name) = &patch.shop_name {
        query = query.bind(shop_name);
    }
    if let Some(address) = &patch.address {
        query = query.bind(address);
    }
    if let Some(password) = &patch.password {
        query = query.bind(password);
    }
    if let Some(pic) = &patch.profile_pic {
        query = query.bind(pic);
    }
    if let Some(pic) = &patch.shop_front_pic {
        query = query.bind(pic);
    }
    if let Some(status) = patch.status {
        query = query.bind(status);
    }

    let result = query.bind(id).execute(pool).await?;
    if result.rows_affected() == 0 {
        return Err(StoreError::NotFound {
            entity: "barber",
            id,
        });
    }

    get(pool, id).await
}

pub async fn delete(pool: &SqlitePool, id: i64) -> Result<(), StoreError> {
    let result = sqlx::query("DELETE FROM barbers WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(StoreError::NotFound {
            entity: "barber",
            id,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NewService, ServiceFilter};
    use crate::store::services;

    fn sample_barber() -> NewBarber {
        NewBarber {
            name: "Tony Fade".into(),
            phone: "555-0100".into(),
            email: "a@x.com".into(),
            shop_name: "Clip Joint".into(),
            address: "12 Main St".into(),
            password: "argon2-hash".into(),
            profile_pic: None,
            shop_front_pic: None,
            status: None,
        }
    }

    #[sqlx::test]
    async fn create_assigns_id_and_defaults_to_pending(pool: SqlitePool) {
        let barber = create(&pool, sample_barber()).await.unwrap();

        assert!(barber.id > 0);
        assert_eq!(barber.status, BarberStatus::Pending);
        assert_eq!(barber.phone, "555-0100");
        assert_eq!(barber.email, "a@x.com");
    }

    #[sqlx::test]
    async fn duplicate_phone_is_rejected(pool: SqlitePool) {
        create(&pool, sample_barber()).await.unwrap();

        let mut second = sample_barber();
        second.email = "b@x.com".into();
        let err = create(&pool, second).await.unwrap_err();

        assert!(matches!(err, StoreError::UniquenessViolation(ref field) if field.contains("phone")));
    }

    #[sqlx::test]
    async fn duplicate_email_is_rejected(pool: SqlitePool) {
        create(&pool, sample_barber()).await.unwrap();

        let mut second = sample_barber();
        second.phone = "555-0101".into();
        let err = create(&pool, second).await.unwrap_err();

        assert!(matches!(err, StoreError::UniquenessViolation(ref field) if field.contains("email")));
    }

    #[sqlx::test]
    async fn approval_update_only_changes_status(pool: SqlitePool) {
        let barber = create(&pool, sample_barber()).await.unwrap();

        let updated = update(
            &pool,
            barber.id,
            BarberPatch {
                status: Some(BarberStatus::Approved),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        assert_eq!(updated.status, BarberStatus::Approved);
        assert_eq!(
            Barber {
                status: BarberStatus::Pending,
                ..updated
            },
            barber
        );
    }

    #[sqlx::test]
    async fn update_to_taken_email_is_rejected(pool: SqlitePool) {
        let first = create(&pool, sample_barber()).await.unwrap();

        let mut other = sample_barber();
        other.phone = "555-0101".into();
        other.email = "b@x.com".into();
        let second = create(&pool, other).await.unwrap();

        let err = update(
            &pool,
            second.id,
            BarberPatch {
                email: Some(first.email.clone()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, StoreError::UniquenessViolation(_)));

        let unchanged = get(&pool, second.id).await.unwrap();
        assert_eq!(unchanged.email, "b@x.com");
    }

    #[sqlx::test]
    async fn missing_ids_are_not_found(pool: SqlitePool) {
        assert!(matches!(
            get(&pool, 42).await.unwrap_err(),
            StoreError::NotFound {
                entity: "barber",
                id: 42
            }
        ));
        assert!(matches!(
            update(
                &pool,
                42,
                BarberPatch {
                    name: Some("Nobody".into()),
                    ..Default::default()
                }
            )
            .await
            .unwrap_err(),
            StoreError::NotFound { .. }
        ));
        assert!(matches!(
            delete(&pool, 42).await.unwrap_err(),
            StoreError::NotFound { .. }
        ));
    }

    #[sqlx::test]
    async fn over_length_phone_inserts_nothing(pool: SqlitePool) {
        let mut barber = sample_barber();
        barber.phone = "5".repeat(21);

        let err = create(&pool, barber).await.unwrap_err();
        assert!(matches!(err, StoreError::Validation(_)));

        let all = list(&pool, &BarberFilter::default()).await.unwrap();
        assert!(all.is_empty());
    }

    #[sqlx::test]
    async fn delete_cascades_services(pool: SqlitePool) {
        let barber = create(&pool, sample_barber()).await.unwrap();
        services::create(
            &pool,
            NewService {
                barber_id: barber.id,
                name: "Haircut".into(),
                price: 25.0,
            },
        )
        .await
        .unwrap();

        delete(&pool, barber.id).await.unwrap();

        let orphaned = services::list(
            &pool,
            &ServiceFilter {
                barber_id: Some(barber.id),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert!(orphaned.is_empty());
    }

    #[sqlx::test]
    async fn list_filters_by_status(pool: SqlitePool) {
        let first = create(&pool, sample_barber()).await.unwrap();

        let mut other = sample_barber();
        other.phone = "555-0101".into();
        other.email = "b@x.com".into();
        create(&pool, other).await.unwrap();

        update(
            &pool,
            first.id,
            BarberPatch {
                status: Some(BarberStatus::Approved),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        let approved = list(
            &pool,
            &BarberFilter {
                status: Some(BarberStatus::Approved),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(approved.len(), 1);
        assert_eq!(approved[0].id, first.id);
    }
}
