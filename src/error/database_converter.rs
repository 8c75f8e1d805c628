use crate::error::AppError;
use diesel::result::{DatabaseErrorInformation, DatabaseErrorKind, Error as DieselError};

/// Utility for converting database errors to structured AppError variants.
///
/// Constraint violations are reported against the column encoded in the
/// constraint name (`<table>_<column>_<suffix>`), so the client sees a
/// field-level error instead of an opaque database failure.
pub struct DatabaseErrorConverter;

impl DatabaseErrorConverter {
    /// Converts a Diesel error to an appropriate AppError variant.
    pub fn convert_diesel_error(error: DieselError, operation: &str) -> AppError {
        match error {
            DieselError::DatabaseError(kind, info) => {
                Self::convert_database_error(kind, info.as_ref(), operation)
            }
            DieselError::NotFound => AppError::not_found("resource", "id", "unknown"),
            other => AppError::Database {
                operation: operation.to_string(),
                source: anyhow::Error::from(other),
            },
        }
    }

    fn convert_database_error(
        kind: DatabaseErrorKind,
        info: &(dyn DatabaseErrorInformation + Send + Sync),
        operation: &str,
    ) -> AppError {
        let message = info.message();
        let field = Self::field_from_constraint(info.constraint_name(), info.table_name())
            .or_else(|| info.column_name().map(str::to_string));

        match (kind, field) {
            (DatabaseErrorKind::UniqueViolation, Some(field)) => AppError::Conflict {
                message: format!("{} already exists", field),
            },
            (DatabaseErrorKind::NotNullViolation, Some(field)) => {
                AppError::validation(&field, "is required")
            }
            (DatabaseErrorKind::ForeignKeyViolation, Some(field)) => {
                AppError::validation(&field, "references a missing record")
            }
            (DatabaseErrorKind::CheckViolation, Some(field)) => {
                AppError::validation(&field, "is out of the allowed range")
            }
            (kind, _) => AppError::Database {
                operation: operation.to_string(),
                source: anyhow::Error::msg(format!("{:?}: {}", kind, message)),
            },
        }
    }

    /// Extracts the column part of a Postgres constraint name.
    ///
    /// `hotels_owner_id_fkey` with table `hotels` yields `owner_id`. Without a
    /// table name the first segment is taken as the table.
    pub fn field_from_constraint(constraint: Option<&str>, table: Option<&str>) -> Option<String> {
        let constraint = constraint?;
        let trimmed = ["_fkey", "_check", "_key", "_pkey"]
            .iter()
            .find_map(|suffix| constraint.strip_suffix(suffix))?;
        let column = match table.and_then(|t| trimmed.strip_prefix(t)) {
            Some(rest) => rest.strip_prefix('_')?,
            None => trimmed.split_once('_')?.1,
        };
        (!column.is_empty()).then(|| column.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct MockDatabaseErrorInfo {
        message: String,
        table_name: Option<String>,
        constraint_name: Option<String>,
    }

    impl DatabaseErrorInformation for MockDatabaseErrorInfo {
        fn message(&self) -> &str {
            &self.message
        }

        fn details(&self) -> Option<&str> {
            None
        }

        fn hint(&self) -> Option<&str> {
            None
        }

        fn table_name(&self) -> Option<&str> {
            self.table_name.as_deref()
        }

        fn column_name(&self) -> Option<&str> {
            None
        }

        fn constraint_name(&self) -> Option<&str> {
            self.constraint_name.as_deref()
        }

        fn statement_position(&self) -> Option<i32> {
            None
        }
    }

    fn db_error(kind: DatabaseErrorKind, table: Option<&str>, constraint: Option<&str>) -> DieselError {
        DieselError::DatabaseError(
            kind,
            Box::new(MockDatabaseErrorInfo {
                message: "constraint violated".to_string(),
                table_name: table.map(str::to_string),
                constraint_name: constraint.map(str::to_string),
            }),
        )
    }

    #[test]
    fn test_convert_not_found_error() {
        let result = DatabaseErrorConverter::convert_diesel_error(DieselError::NotFound, "find hotel");
        assert!(matches!(result, AppError::NotFound { .. }));
    }

    #[test]
    fn test_convert_foreign_key_violation() {
        let error = db_error(
            DatabaseErrorKind::ForeignKeyViolation,
            Some("hotels"),
            Some("hotels_owner_id_fkey"),
        );
        match DatabaseErrorConverter::convert_diesel_error(error, "insert hotel") {
            AppError::Validation { field, reason } => {
                assert_eq!(field, "owner_id");
                assert!(reason.contains("missing"));
            }
            other => panic!("Expected Validation error, got: {:?}", other),
        }
    }

    #[test]
    fn test_convert_check_violation_without_table() {
        let error = db_error(DatabaseErrorKind::CheckViolation, None, Some("hotels_rating_check"));
        match DatabaseErrorConverter::convert_diesel_error(error, "update hotel") {
            AppError::Validation { field, .. } => assert_eq!(field, "rating"),
            other => panic!("Expected Validation error, got: {:?}", other),
        }
    }

    #[test]
    fn test_convert_unique_violation() {
        let error = db_error(
            DatabaseErrorKind::UniqueViolation,
            Some("users"),
            Some("users_email_key"),
        );
        assert!(matches!(
            DatabaseErrorConverter::convert_diesel_error(error, "insert user"),
            AppError::Conflict { .. }
        ));
    }

    #[test]
    fn test_unknown_constraint_falls_back_to_database_error() {
        let error = db_error(DatabaseErrorKind::CheckViolation, None, None);
        assert!(matches!(
            DatabaseErrorConverter::convert_diesel_error(error, "update hotel"),
            AppError::Database { .. }
        ));
    }

    #[test]
    fn test_field_from_constraint() {
        assert_eq!(
            DatabaseErrorConverter::field_from_constraint(Some("rooms_hotel_id_fkey"), Some("rooms")),
            Some("hotel_id".to_string())
        );
        assert_eq!(
            DatabaseErrorConverter::field_from_constraint(Some("rooms_price_check"), None),
            Some("price".to_string())
        );
        assert_eq!(DatabaseErrorConverter::field_from_constraint(Some("weird"), None), None);
    }
}
