use diesel::prelude::*;
use diesel_derive_enum::DbEnum;
use jiff_diesel::DateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, DbEnum, ToSchema)]
#[db_enum(existing_type_path = "crate::schema::sql_types::UserGender")]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    X,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, DbEnum, ToSchema)]
#[db_enum(existing_type_path = "crate::schema::sql_types::UserSeniority")]
#[serde(rename_all = "lowercase")]
pub enum Seniority {
    Trainee,
    Jr,
    Ssr,
    Senior,
}

/// User model for reading from database
#[derive(Debug, Queryable, Selectable, Clone, PartialEq)]
#[diesel(table_name = crate::schema::users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct User {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub gender: Gender,
    pub seniority: Seniority,
    pub experience: Option<String>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

/// NewUser model for inserting new records.
/// Timestamps are filled in by the store.
#[derive(Debug, Insertable, Clone)]
#[diesel(table_name = crate::schema::users)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub gender: Gender,
    pub seniority: Seniority,
    pub experience: Option<String>,
}

/// Partial update; `None` leaves the stored value untouched.
///
/// `experience` is nullable, so `Some(None)` clears it.
#[derive(Debug, Clone, Default)]
pub struct UpdateUser {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub gender: Option<Gender>,
    pub seniority: Option<Seniority>,
    pub experience: Option<Option<String>>,
}

/// Full-row changeset written back by `save`.
///
/// `experience` is written as-is so a stored NULL stays NULL.
#[derive(Debug, AsChangeset)]
#[diesel(table_name = crate::schema::users)]
#[diesel(treat_none_as_null = true)]
pub struct UserChangeset<'a> {
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub email: &'a str,
    pub gender: Gender,
    pub seniority: Seniority,
    pub experience: Option<&'a str>,
}

impl User {
    /// Overwrites every field present in `changes` and keeps the rest.
    pub fn merge(mut self, changes: UpdateUser) -> Self {
        if let Some(first_name) = changes.first_name {
            self.first_name = first_name;
        }
        if let Some(last_name) = changes.last_name {
            self.last_name = last_name;
        }
        if let Some(email) = changes.email {
            self.email = email;
        }
        if let Some(gender) = changes.gender {
            self.gender = gender;
        }
        if let Some(seniority) = changes.seniority {
            self.seniority = seniority;
        }
        if let Some(experience) = changes.experience {
            self.experience = experience;
        }
        self
    }

    pub fn as_changeset(&self) -> UserChangeset<'_> {
        UserChangeset {
            first_name: &self.first_name,
            last_name: &self.last_name,
            email: &self.email,
            gender: self.gender,
            seniority: self.seniority,
            experience: self.experience.as_deref(),
        }
    }
}
