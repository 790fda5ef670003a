//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. Conversions into domain entities validate
//! the text-encoded enumerations and fail with a message on corrupt rows.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::{
    City, Email, PickupPoint, Product, ProductType, Reception, ReceptionStatus, Role, User, UserId,
};

use super::schema::{products, pvz, receptions, users};

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub role: String,
}

/// Insertable struct for creating user records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub email: &'a str,
    pub password_hash: &'a str,
    pub role: &'a str,
}

impl TryFrom<UserRow> for User {
    type Error = String;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let email = Email::new(&row.email).map_err(|err| err.to_string())?;
        let role = row.role.parse::<Role>().map_err(|err| err.to_string())?;
        Ok(Self::new(
            UserId::from_uuid(row.id),
            email,
            row.password_hash,
            role,
        ))
    }
}

/// Row struct for the pvz table.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = pvz)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct PickupPointRow {
    pub id: Uuid,
    pub city: String,
    pub registration_date: DateTime<Utc>,
}

impl From<&PickupPoint> for PickupPointRow {
    fn from(value: &PickupPoint) -> Self {
        Self {
            id: value.id,
            city: value.city.as_str().to_owned(),
            registration_date: value.registration_date,
        }
    }
}

impl TryFrom<PickupPointRow> for PickupPoint {
    type Error = String;

    fn try_from(row: PickupPointRow) -> Result<Self, Self::Error> {
        let city = row.city.parse::<City>().map_err(|err| err.to_string())?;
        Ok(Self {
            id: row.id,
            city,
            registration_date: row.registration_date,
        })
    }
}

/// Row struct for the receptions table.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = receptions)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ReceptionRow {
    pub id: Uuid,
    pub date_time: DateTime<Utc>,
    pub pvz_id: Uuid,
    pub status: String,
}

impl From<&Reception> for ReceptionRow {
    fn from(value: &Reception) -> Self {
        Self {
            id: value.id,
            date_time: value.date_time,
            pvz_id: value.pvz_id,
            status: value.status.as_str().to_owned(),
        }
    }
}

impl TryFrom<ReceptionRow> for Reception {
    type Error = String;

    fn try_from(row: ReceptionRow) -> Result<Self, Self::Error> {
        let status = row
            .status
            .parse::<ReceptionStatus>()
            .map_err(|err| err.to_string())?;
        Ok(Self {
            id: row.id,
            date_time: row.date_time,
            pvz_id: row.pvz_id,
            status,
        })
    }
}

/// Row struct for the products table.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = products)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ProductRow {
    pub id: Uuid,
    pub date_time: DateTime<Utc>,
    pub product_type: String,
    pub reception_id: Uuid,
}

impl From<&Product> for ProductRow {
    fn from(value: &Product) -> Self {
        Self {
            id: value.id,
            date_time: value.date_time,
            product_type: value.product_type.as_str().to_owned(),
            reception_id: value.reception_id,
        }
    }
}

impl TryFrom<ProductRow> for Product {
    type Error = String;

    fn try_from(row: ProductRow) -> Result<Self, Self::Error> {
        let product_type = row
            .product_type
            .parse::<ProductType>()
            .map_err(|err| err.to_string())?;
        Ok(Self {
            id: row.id,
            date_time: row.date_time,
            product_type,
            reception_id: row.reception_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn corrupt_status_is_reported() {
        let row = ReceptionRow {
            id: Uuid::new_v4(),
            date_time: Utc::now(),
            pvz_id: Uuid::new_v4(),
            status: "reopened".to_owned(),
        };
        let err = Reception::try_from(row).expect_err("unknown status");
        assert!(err.contains("reopened"));
    }

    #[rstest]
    fn pickup_point_row_keeps_cyrillic_city() {
        let pvz = PickupPoint {
            id: Uuid::new_v4(),
            city: City::SaintPetersburg,
            registration_date: Utc::now(),
        };
        let row = PickupPointRow::from(&pvz);
        assert_eq!(row.city, "Санкт-Петербург");
        assert_eq!(PickupPoint::try_from(row), Ok(pvz));
    }

    #[rstest]
    fn user_row_with_unknown_role_is_rejected() {
        let row = UserRow {
            id: Uuid::new_v4(),
            email: "staff@pvz.example".to_owned(),
            password_hash: "hash".to_owned(),
            role: "admin".to_owned(),
        };
        assert!(User::try_from(row).is_err());
    }
}
