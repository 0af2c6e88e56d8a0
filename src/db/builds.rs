//! Database queries for builds.

use sea_orm::sea_query::Expr;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set, Value};
use tracing::debug;

use crate::entity::build::{self, ActiveModel, Entity as Build};
use crate::error::{ReportError, ReportResult};
use crate::models::{BuildDocument, BuildField, RunStatus};

use super::DbPool;

impl From<&BuildDocument> for ActiveModel {
    fn from(doc: &BuildDocument) -> Self {
        ActiveModel {
            id: Set(doc.id),
            name: Set(doc.name.clone()),
            test_count: Set(doc.test_count),
            total_test_count: Set(doc.total_test_count),
            status: Set(doc.status.as_str().to_string()),
            duration_ms: Set(doc.duration_ms),
            created_at: Set(doc.created_at),
            updated_at: Set(doc.updated_at),
        }
    }
}

impl From<build::Model> for BuildDocument {
    fn from(model: build::Model) -> Self {
        BuildDocument {
            id: model.id,
            name: model.name,
            created_at: model.created_at,
            updated_at: model.updated_at,
            duration_ms: model.duration_ms,
            status: RunStatus::parse(&model.status),
            test_count: model.test_count,
            total_test_count: model.total_test_count,
        }
    }
}

fn column_value(field: BuildField) -> (build::Column, Value) {
    match field {
        BuildField::TestCount(n) => (build::Column::TestCount, n.into()),
        BuildField::TotalTestCount(n) => (build::Column::TotalTestCount, n.into()),
        BuildField::UpdatedAt(at) => (build::Column::UpdatedAt, at.into()),
        BuildField::DurationMs(ms) => (build::Column::DurationMs, ms.into()),
        BuildField::Status(status) => (build::Column::Status, status.as_str().into()),
    }
}

impl DbPool {
    /// Insert a new build document.
    pub async fn create_build(&self, doc: &BuildDocument) -> ReportResult<()> {
        Build::insert(ActiveModel::from(doc))
            .exec(self.connection())
            .await
            .map_err(|e| {
                ReportError::BackendUnavailable(format!(
                    "Failed to insert build {}: {}",
                    doc.id, e
                ))
            })?;

        Ok(())
    }

    /// Id of the most recent build (highest id first).
    pub async fn latest_build_id(&self) -> ReportResult<Option<i32>> {
        let latest = Build::find()
            .order_by_desc(build::Column::Id)
            .one(self.connection())
            .await
            .map_err(|e| {
                ReportError::BackendUnavailable(format!("Failed to find latest build: {}", e))
            })?;

        Ok(latest.map(|m| m.id))
    }

    /// Overwrite one field of a build. Missing ids are ignored.
    pub async fn set_build_field(&self, id: i32, field: BuildField) -> ReportResult<()> {
        let name = field.name();
        let (column, value) = column_value(field);

        let result = Build::update_many()
            .col_expr(column, Expr::value(value))
            .filter(build::Column::Id.eq(id))
            .exec(self.connection())
            .await
            .map_err(|e| {
                ReportError::BackendUnavailable(format!(
                    "Failed to update build {} {}: {}",
                    id, name, e
                ))
            })?;

        debug!(
            build_id = id,
            field = name,
            rows = result.rows_affected,
            "Build field updated"
        );
        Ok(())
    }

    /// Get a build by ID.
    pub async fn get_build(&self, id: i32) -> ReportResult<Option<BuildDocument>> {
        let result = Build::find_by_id(id)
            .one(self.connection())
            .await
            .map_err(|e| {
                ReportError::BackendUnavailable(format!("Failed to get build: {}", e))
            })?;

        Ok(result.map(BuildDocument::from))
    }
}
