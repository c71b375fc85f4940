//! Officers and their assignment history

use chrono::{Datelike, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, ExprTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, TransactionTrait,
    sea_query::{Expr, Func, LikeExpr},
};
use tracing::info;

use super::SeaOrmStorage;
use crate::errors::{OversightError, Result};
use crate::storage::models::{
    AssignmentUpdate, NewAssignment, NewOfficer, OfficerFilter, OfficerUpdate,
};

use migration::entities::{assignment, officer};

/// `%term%` with LIKE wildcards in the term matched literally
fn substring_pattern(term: &str) -> LikeExpr {
    let mut escaped = String::with_capacity(term.len() + 2);
    escaped.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    LikeExpr::new(escaped).escape('\\')
}

impl SeaOrmStorage {
    pub async fn get_officer(&self, id: i32) -> Result<Option<officer::Model>> {
        Ok(officer::Entity::find_by_id(id).one(&self.db).await?)
    }

    /// 过滤并分页，返回 (当前页, 总数)
    ///
    /// `page` starts at 1.
    pub async fn list_officers(
        &self,
        filter: &OfficerFilter,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<officer::Model>, u64)> {
        let mut condition = Condition::all();

        if let Some(dept) = filter.department_id {
            condition = condition.add(officer::Column::DepartmentId.eq(dept));
        }

        if let Some(ref name) = filter.name {
            condition = condition.add(
                Expr::expr(Func::lower(Expr::col((
                    officer::Entity,
                    officer::Column::LastName,
                ))))
                .like(substring_pattern(&name.to_lowercase())),
            );
        }

        if let Some(ref race) = filter.race {
            condition = condition.add(officer::Column::Race.eq(race.as_str()));
        }

        if let Some(ref gender) = filter.gender {
            condition = condition.add(officer::Column::Gender.eq(gender.as_str()));
        }

        // 年龄换算成出生年份区间，溢出的年龄直接忽略
        let this_year = Utc::now().year();
        if let Some(latest) = filter.min_age.and_then(|age| this_year.checked_sub(age)) {
            condition = condition.add(officer::Column::BirthYear.lte(latest));
        }
        if let Some(earliest) = filter.max_age.and_then(|age| this_year.checked_sub(age)) {
            condition = condition.add(officer::Column::BirthYear.gte(earliest));
        }

        if filter.has_assignment_filter() {
            let officer_ids = self.officer_ids_matching_assignments(filter).await?;
            if officer_ids.is_empty() {
                return Ok((Vec::new(), 0));
            }
            condition = condition.add(officer::Column::Id.is_in(officer_ids));
        }

        let total = officer::Entity::find()
            .filter(condition.clone())
            .count(&self.db)
            .await?;

        // 超出最后一页时不查询，offset 溢出也算超出
        let per_page = std::cmp::Ord::max(per_page, 1);
        let offset = page.saturating_sub(1).checked_mul(per_page);
        if !offset.is_some_and(|offset| offset < total) {
            return Ok((Vec::new(), total));
        }

        let officers = officer::Entity::find()
            .filter(condition)
            .order_by_asc(officer::Column::LastName)
            .order_by_asc(officer::Column::Id)
            .paginate(&self.db, per_page)
            .fetch_page(page.saturating_sub(1))
            .await?;

        Ok((officers, total))
    }

    async fn officer_ids_matching_assignments(&self, filter: &OfficerFilter) -> Result<Vec<i32>> {
        let mut condition = Condition::all();
        if let Some(ref badge) = filter.badge {
            condition = condition.add(
                Expr::col((assignment::Entity, assignment::Column::StarNo))
                    .like(substring_pattern(badge)),
            );
        }
        if let Some(ref rank) = filter.rank {
            condition = condition.add(assignment::Column::Rank.eq(rank.as_str()));
        }
        if let Some(unit_id) = filter.unit_id {
            condition = condition.add(assignment::Column::UnitId.eq(unit_id));
        }

        Ok(assignment::Entity::find()
            .select_only()
            .column(assignment::Column::OfficerId)
            .distinct()
            .filter(condition)
            .into_tuple::<i32>()
            .all(&self.db)
            .await?)
    }

    /// 在一个事务中创建警员及其第一条任职记录
    pub async fn create_officer(&self, new: NewOfficer) -> Result<officer::Model> {
        let txn = self.db.begin().await?;

        let officer = officer::ActiveModel {
            last_name: Set(new.last_name),
            first_name: Set(new.first_name),
            middle_initial: Set(new.middle_initial),
            race: Set(new.race),
            gender: Set(new.gender),
            employment_date: Set(new.employment_date),
            birth_year: Set(new.birth_year),
            department_id: Set(new.department_id),
            unique_internal_identifier: Set(new.unique_internal_identifier),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        assignment::ActiveModel {
            officer_id: Set(officer.id),
            star_no: Set(new.star_no),
            rank: Set(new.rank),
            unit_id: Set(new.unit_id),
            star_date: Set(None),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;

        info!(
            "Officer created: {} ({}), department {}",
            officer.last_name, officer.id, officer.department_id
        );
        Ok(officer)
    }

    pub async fn update_officer(&self, id: i32, update: OfficerUpdate) -> Result<officer::Model> {
        let existing = self
            .get_officer(id)
            .await?
            .ok_or_else(|| OversightError::not_found(format!("Officer {} not found", id)))?;

        let mut active: officer::ActiveModel = existing.clone().into();
        if let Some(v) = update.first_name {
            active.first_name = Set(v);
        }
        if let Some(v) = update.last_name {
            active.last_name = Set(v);
        }
        if let Some(v) = update.middle_initial {
            active.middle_initial = Set(v);
        }
        if let Some(v) = update.race {
            active.race = Set(Some(v));
        }
        if let Some(v) = update.gender {
            active.gender = Set(Some(v));
        }
        if let Some(v) = update.employment_date {
            active.employment_date = Set(Some(v));
        }
        if let Some(v) = update.birth_year {
            active.birth_year = Set(Some(v));
        }
        if let Some(v) = update.department_id {
            active.department_id = Set(v);
        }
        if let Some(v) = update.unique_internal_identifier {
            active.unique_internal_identifier = Set(Some(v));
        }

        if !active.is_changed() {
            return Ok(existing);
        }

        let model = active.update(&self.db).await?;
        info!("Officer updated: {} ({})", model.last_name, model.id);
        Ok(model)
    }

    /// 按 id 排序，最早的任职记录在前
    pub async fn assignments_for_officer(&self, officer_id: i32) -> Result<Vec<assignment::Model>> {
        Ok(assignment::Entity::find()
            .filter(assignment::Column::OfficerId.eq(officer_id))
            .order_by_asc(assignment::Column::Id)
            .all(&self.db)
            .await?)
    }

    pub async fn get_assignment(&self, id: i32) -> Result<Option<assignment::Model>> {
        Ok(assignment::Entity::find_by_id(id).one(&self.db).await?)
    }

    pub async fn create_assignment(&self, new: NewAssignment) -> Result<assignment::Model> {
        let model = assignment::ActiveModel {
            officer_id: Set(new.officer_id),
            star_no: Set(new.star_no),
            rank: Set(new.rank),
            unit_id: Set(new.unit_id),
            star_date: Set(new.star_date),
            ..Default::default()
        }
        .insert(&self.db)
        .await?;

        info!(
            "Assignment {} added to officer {}",
            model.id, model.officer_id
        );
        Ok(model)
    }

    pub async fn update_assignment(
        &self,
        id: i32,
        update: AssignmentUpdate,
    ) -> Result<assignment::Model> {
        let existing = self
            .get_assignment(id)
            .await?
            .ok_or_else(|| OversightError::not_found(format!("Assignment {} not found", id)))?;

        let mut active: assignment::ActiveModel = existing.clone().into();
        if let Some(v) = update.star_no {
            active.star_no = Set(Some(v));
        }
        if let Some(v) = update.rank {
            active.rank = Set(Some(v));
        }
        if let Some(v) = update.unit_id {
            active.unit_id = Set(Some(v));
        }
        if let Some(v) = update.star_date {
            active.star_date = Set(Some(v));
        }

        if !active.is_changed() {
            return Ok(existing);
        }

        Ok(active.update(&self.db).await?)
    }
}
