//! Canonical identifier types.
//!
//! Hotels and users are keyed by UUIDs. Wrapping them in distinct types keeps
//! ownership checks a value comparison and stops a hotel id from being passed
//! where an owner id is expected.

use std::fmt;
use std::str::FromStr;

use diesel::deserialize::{self, FromSql};
use diesel::pg::Pg;
use diesel::serialize::{self, Output, ToSql};
use diesel::sql_types::Uuid as SqlUuid;
use diesel::{AsExpression, FromSqlRow};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

macro_rules! uuid_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            Serialize,
            Deserialize,
            AsExpression,
            FromSqlRow,
            utoipa::ToSchema,
        )]
        #[diesel(sql_type = SqlUuid)]
        #[serde(transparent)]
        #[schema(value_type = String, format = "uuid")]
        pub struct $name(Uuid);

        impl $name {
            /// Generates a fresh random identifier.
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl From<Uuid> for $name {
            fn from(value: Uuid) -> Self {
                Self(value)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Uuid::parse_str(s.trim()).map(Self)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }

        impl ToSql<SqlUuid, Pg> for $name {
            fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
                <Uuid as ToSql<SqlUuid, Pg>>::to_sql(&self.0, out)
            }
        }

        impl FromSql<SqlUuid, Pg> for $name {
            fn from_sql(
                bytes: <Pg as diesel::backend::Backend>::RawValue<'_>,
            ) -> deserialize::Result<Self> {
                <Uuid as FromSql<SqlUuid, Pg>>::from_sql(bytes).map(Self)
            }
        }
    };
}

uuid_id!(
    /// Identifier of a hotel record.
    HotelId
);

uuid_id!(
    /// Identifier of a user (owner, admin or customer).
    UserId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ignores_surrounding_whitespace() {
        let raw = "6f1c2a9e-8f43-4c1b-9d7e-2b8f0c1a3d55";
        let a: UserId = raw.parse().unwrap();
        let b: UserId = format!("  {raw}\n").parse().unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_case_differences_compare_equal() {
        let lower: HotelId = "6f1c2a9e-8f43-4c1b-9d7e-2b8f0c1a3d55".parse().unwrap();
        let upper: HotelId = "6F1C2A9E-8F43-4C1B-9D7E-2B8F0C1A3D55".parse().unwrap();
        assert_eq!(lower, upper);
        assert_eq!(upper.to_string(), "6f1c2a9e-8f43-4c1b-9d7e-2b8f0c1a3d55");
    }

    #[test]
    fn test_invalid_id_is_rejected() {
        assert!("not-a-uuid".parse::<HotelId>().is_err());
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let id: HotelId = "6f1c2a9e-8f43-4c1b-9d7e-2b8f0c1a3d55".parse().unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"6f1c2a9e-8f43-4c1b-9d7e-2b8f0c1a3d55\"");
    }
}
