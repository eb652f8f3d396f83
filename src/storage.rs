use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryOrder, QuerySelect, Set,
};

use crate::{entities::request, error::AppResult};

const TOP_LIMIT: u64 = 5;

/// Append-only log of lookup requests backing the /stats command.
#[derive(Clone)]
pub struct RequestLog {
    db: DatabaseConnection,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RequestStats {
    pub total: u64,
    pub top_movies: Vec<(String, i64)>,
}

impl RequestLog {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn append(
        &self,
        user_id: i64,
        username: Option<&str>,
        movie_id: &str,
        rating: Option<f64>,
    ) -> AppResult<()> {
        let entry = request::ActiveModel {
            id: Default::default(),
            user_id: Set(user_id),
            username: Set(username.map(|s| s.to_string())),
            movie_id: Set(movie_id.to_string()),
            rating: Set(rating),
            created_at: Set(now_sec()),
        };

        request::Entity::insert(entry).exec(&self.db).await?;
        Ok(())
    }

    pub async fn stats(&self) -> AppResult<RequestStats> {
        let total = request::Entity::find().count(&self.db).await?;

        // Equal counts fall back to ascending movie id so the ordering
        // stays deterministic across runs.
        let rows: Vec<(String, i64)> = request::Entity::find()
            .select_only()
            .column(request::Column::MovieId)
            .column_as(request::Column::Id.count(), "request_count")
            .group_by(request::Column::MovieId)
            .order_by_desc(request::Column::Id.count())
            .order_by_asc(request::Column::MovieId)
            .limit(TOP_LIMIT)
            .into_tuple()
            .all(&self.db)
            .await?;

        // No title lookup is kept for past requests; the label is derived
        // from the id alone.
        let top_movies =
            rows.into_iter().map(|(movie_id, count)| (format!("ID {movie_id}"), count)).collect();

        Ok(RequestStats { total, top_movies })
    }
}

fn now_sec() -> i64 {
    jiff::Timestamp::now().as_second()
}

#[cfg(test)]
mod tests {
    use sea_orm::{ConnectOptions, Database, DatabaseConnection};

    use super::*;
    use crate::db;

    async fn memory_db() -> DatabaseConnection {
        // A single pooled connection keeps every query on the same
        // in-memory database.
        let mut opt = ConnectOptions::new("sqlite::memory:".to_string());
        opt.max_connections(1).min_connections(1);
        let db = Database::connect(opt).await.unwrap();
        db::migrate(&db).await.unwrap();
        db
    }

    #[tokio::test]
    async fn migrate_twice_is_idempotent() {
        let db = memory_db().await;
        db::migrate(&db).await.unwrap();

        let store = RequestLog::new(db);
        store.append(1, Some("alice"), "326", Some(9.1)).await.unwrap();
        assert_eq!(store.stats().await.unwrap().total, 1);
    }

    #[tokio::test]
    async fn append_then_stats_reflects_entry() {
        let store = RequestLog::new(memory_db().await);

        let before = store.stats().await.unwrap();
        assert_eq!(before.total, 0);
        assert!(before.top_movies.is_empty());

        store.append(42, Some("bob"), "535341", Some(7.2)).await.unwrap();

        let after = store.stats().await.unwrap();
        assert_eq!(after.total, 1);
        assert_eq!(after.top_movies, vec![("ID 535341".to_string(), 1)]);
    }

    #[tokio::test]
    async fn append_accepts_missing_rating_and_username() {
        let store = RequestLog::new(memory_db().await);

        store.append(7, None, "100", None).await.unwrap();

        let stats = store.stats().await.unwrap();
        assert_eq!(stats.total, 1);
        assert_eq!(stats.top_movies, vec![("ID 100".to_string(), 1)]);
    }

    #[tokio::test]
    async fn top_movies_orders_by_count_then_movie_id() {
        let store = RequestLog::new(memory_db().await);

        for _ in 0..2 {
            store.append(1, None, "300", Some(8.0)).await.unwrap();
        }
        store.append(2, None, "200", Some(6.5)).await.unwrap();
        store.append(3, None, "100", Some(5.0)).await.unwrap();

        let stats = store.stats().await.unwrap();
        assert_eq!(stats.total, 4);
        assert_eq!(
            stats.top_movies,
            vec![
                ("ID 300".to_string(), 2),
                ("ID 100".to_string(), 1),
                ("ID 200".to_string(), 1),
            ]
        );
    }

    #[tokio::test]
    async fn top_movies_keeps_at_most_five() {
        let store = RequestLog::new(memory_db().await);

        for id in ["1", "2", "3", "4", "5", "6"] {
            store.append(1, None, id, None).await.unwrap();
        }
        store.append(1, None, "6", None).await.unwrap();

        let stats = store.stats().await.unwrap();
        assert_eq!(stats.total, 7);
        assert_eq!(stats.top_movies.len(), 5);
        assert_eq!(stats.top_movies[0], ("ID 6".to_string(), 2));
    }
}
