//! Per-user activity counts

use sea_orm::{
    ColumnTrait, EntityTrait, FromQueryResult, QueryFilter, QueryOrder, QuerySelect,
    sea_query::Expr,
};

use super::SeaOrmStorage;
use crate::errors::Result;

use migration::entities::{face, image, user};

#[derive(Debug, FromQueryResult)]
struct ActivityRow {
    user_id: i32,
    count: i64,
}

/// A user and how many images they sorted or tags they added
#[derive(Debug, Clone)]
pub struct LeaderboardEntry {
    pub user: user::Model,
    pub count: u64,
}

impl SeaOrmStorage {
    /// Users ranked by number of images sorted
    pub async fn top_sorters(&self, limit: u64) -> Result<Vec<LeaderboardEntry>> {
        let rows = image::Entity::find()
            .select_only()
            .column(image::Column::UserId)
            .column_as(image::Column::Id.count(), "count")
            .filter(image::Column::UserId.is_not_null())
            .filter(image::Column::ContainsCops.is_not_null())
            .group_by(image::Column::UserId)
            .order_by_desc(Expr::cust("count"))
            .order_by_asc(image::Column::UserId)
            .limit(limit)
            .into_model::<ActivityRow>()
            .all(&self.db)
            .await?;

        self.attach_users(rows).await
    }

    /// Users ranked by number of face tags added
    pub async fn top_taggers(&self, limit: u64) -> Result<Vec<LeaderboardEntry>> {
        let rows = face::Entity::find()
            .select_only()
            .column(face::Column::UserId)
            .column_as(face::Column::Id.count(), "count")
            .filter(face::Column::UserId.is_not_null())
            .group_by(face::Column::UserId)
            .order_by_desc(Expr::cust("count"))
            .order_by_asc(face::Column::UserId)
            .limit(limit)
            .into_model::<ActivityRow>()
            .all(&self.db)
            .await?;

        self.attach_users(rows).await
    }

    async fn attach_users(&self, rows: Vec<ActivityRow>) -> Result<Vec<LeaderboardEntry>> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let users = user::Entity::find()
            .filter(user::Column::Id.is_in(rows.iter().map(|r| r.user_id)))
            .all(&self.db)
            .await?;

        // 保持计数排序
        Ok(rows
            .into_iter()
            .filter_map(|row| {
                users
                    .iter()
                    .find(|u| u.id == row.user_id)
                    .map(|u| LeaderboardEntry {
                        user: u.clone(),
                        count: row.count.max(0) as u64,
                    })
            })
            .collect())
    }
}
