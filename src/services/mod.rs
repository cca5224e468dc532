pub mod categories;
pub mod importing_requests;
pub mod products;
pub mod suppliers;
pub mod users;
pub mod work_assignments;
pub mod work_schedules;
pub mod work_shifts;

use crate::errors::ServiceError;
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter};
use std::collections::HashSet;
use uuid::Uuid;

/// Keeps each `IN (...)` list well under the bind-parameter limits of
/// SQLite (32766) and Postgres (65535).
pub(crate) const ID_CHUNK_SIZE: usize = 500;

/// Loads the records whose `column` matches any of `ids`. Ids are
/// de-duplicated and queried in chunks of [`ID_CHUNK_SIZE`].
pub(crate) async fn find_in_chunks<E, C, I>(
    conn: &C,
    column: E::Column,
    ids: I,
) -> Result<Vec<E::Model>, ServiceError>
where
    E: EntityTrait,
    C: ConnectionTrait,
    I: IntoIterator<Item = Uuid>,
{
    let unique: Vec<Uuid> = ids.into_iter().collect::<HashSet<_>>().into_iter().collect();

    let mut models = Vec::with_capacity(unique.len());
    for chunk in unique.chunks(ID_CHUNK_SIZE) {
        let batch = E::find()
            .filter(column.is_in(chunk.iter().copied()))
            .all(conn)
            .await?;
        models.extend(batch);
    }
    Ok(models)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        db::{establish_connection_with_config, run_migrations, DbConfig},
        entities::{category, empty_ids},
    };
    use chrono::Utc;
    use sea_orm::{EntityTrait, Set};

    #[tokio::test]
    async fn chunked_lookup_spans_many_batches_and_collapses_repeats() {
        let pool = establish_connection_with_config(&DbConfig {
            url: "sqlite::memory:".into(),
            max_connections: 1,
            min_connections: 1,
            sqlx_logging: false,
            ..Default::default()
        })
        .await
        .expect("connect");
        run_migrations(&pool).await.expect("migrations");

        let now = Utc::now();
        let ids: Vec<Uuid> = (0..ID_CHUNK_SIZE * 2 + 7).map(|_| Uuid::new_v4()).collect();
        let rows = ids.iter().enumerate().map(|(i, id)| category::ActiveModel {
            id: Set(*id),
            name: Set(format!("category-{}", i)),
            product_ids: Set(empty_ids()),
            created_at: Set(now),
            updated_at: Set(now),
        });
        category::Entity::insert_many(rows)
            .exec(&pool)
            .await
            .expect("insert categories");

        // Every id requested three times, plus one that does not exist.
        let requested = ids
            .iter()
            .chain(ids.iter())
            .chain(ids.iter())
            .copied()
            .chain(std::iter::once(Uuid::new_v4()));
        let found = find_in_chunks::<category::Entity, _, _>(&pool, category::Column::Id, requested)
            .await
            .expect("lookup");

        assert_eq!(found.len(), ids.len());
        let found_ids: HashSet<Uuid> = found.into_iter().map(|c| c.id).collect();
        assert_eq!(found_ids, ids.into_iter().collect());
    }
}
