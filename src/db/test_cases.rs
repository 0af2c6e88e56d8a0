//! Database queries for tests.

use sea_orm::sea_query::Expr;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set, Value};
use tracing::debug;

use crate::entity::test_case::{self, ActiveModel, Entity as TestCase};
use crate::error::{ReportError, ReportResult};
use crate::models::{RunStatus, Severity, TestDocument, TestField};

use super::DbPool;

impl From<&TestDocument> for ActiveModel {
    fn from(doc: &TestDocument) -> Self {
        ActiveModel {
            id: Set(doc.id),
            name: Set(doc.name.clone()),
            build_id: Set(doc.build_id),
            status: Set(doc.status.as_str().to_string()),
            tag: Set(doc.tag.as_str().to_string()),
            log: Set(doc.log.clone()),
            duration_ms: Set(doc.duration_ms),
            created_at: Set(doc.created_at),
            updated_at: Set(doc.updated_at),
        }
    }
}

impl From<test_case::Model> for TestDocument {
    fn from(model: test_case::Model) -> Self {
        TestDocument {
            id: model.id,
            name: model.name,
            build_id: model.build_id,
            created_at: model.created_at,
            updated_at: model.updated_at,
            duration_ms: model.duration_ms,
            status: RunStatus::parse(&model.status),
            tag: Severity::parse(&model.tag),
            log: model.log,
        }
    }
}

fn column_value(field: TestField) -> (test_case::Column, Value) {
    match field {
        TestField::Log(log) => (test_case::Column::Log, log.into()),
        TestField::UpdatedAt(at) => (test_case::Column::UpdatedAt, at.into()),
        TestField::DurationMs(ms) => (test_case::Column::DurationMs, ms.into()),
        TestField::Status(status) => (test_case::Column::Status, status.as_str().into()),
    }
}

impl DbPool {
    /// Insert a new test document.
    pub async fn create_test(&self, doc: &TestDocument) -> ReportResult<()> {
        TestCase::insert(ActiveModel::from(doc))
            .exec(self.connection())
            .await
            .map_err(|e| {
                ReportError::BackendUnavailable(format!(
                    "Failed to insert test {}: {}",
                    doc.id, e
                ))
            })?;

        Ok(())
    }

    /// Id of the most recent test (highest id first).
    pub async fn latest_test_id(&self) -> ReportResult<Option<i32>> {
        let latest = TestCase::find()
            .order_by_desc(test_case::Column::Id)
            .one(self.connection())
            .await
            .map_err(|e| {
                ReportError::BackendUnavailable(format!("Failed to find latest test: {}", e))
            })?;

        Ok(latest.map(|m| m.id))
    }

    /// Overwrite one field of a test. Missing ids are ignored.
    pub async fn set_test_field(&self, id: i32, field: TestField) -> ReportResult<()> {
        let name = field.name();
        let (column, value) = column_value(field);

        let result = TestCase::update_many()
            .col_expr(column, Expr::value(value))
            .filter(test_case::Column::Id.eq(id))
            .exec(self.connection())
            .await
            .map_err(|e| {
                ReportError::BackendUnavailable(format!(
                    "Failed to update test {} {}: {}",
                    id, name, e
                ))
            })?;

        debug!(
            test_id = id,
            field = name,
            rows = result.rows_affected,
            "Test field updated"
        );
        Ok(())
    }

    /// Get a test by ID.
    pub async fn get_test(&self, id: i32) -> ReportResult<Option<TestDocument>> {
        let result = TestCase::find_by_id(id)
            .one(self.connection())
            .await
            .map_err(|e| {
                ReportError::BackendUnavailable(format!("Failed to get test: {}", e))
            })?;

        Ok(result.map(TestDocument::from))
    }
}
