use chrono::NaiveDate;
use diesel::{AsChangeset, Insertable, Queryable, QueryableByName};
use serde::{Deserialize, Serialize};
use std::time::SystemTime;
use uuid::Uuid;

use crate::schema::profiles;

#[derive(Clone, Debug, Serialize, Deserialize, Identifiable, Queryable, QueryableByName)]
#[diesel(table_name = profiles)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Profile {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub height: Option<f64>,
    pub weight: Option<f64>,
    pub address: Option<String>,
    pub avatar_url: Option<String>,

    pub created_at: SystemTime,
    pub updated_at: SystemTime,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = profiles)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewProfile<'a> {
    pub id: Uuid,
    pub full_name: &'a str,
    pub email: &'a str,
    pub phone: Option<&'a str>,
    pub birth_date: Option<NaiveDate>,
    pub height: Option<f64>,
    pub weight: Option<f64>,
    pub address: Option<&'a str>,
    pub avatar_url: Option<&'a str>,

    pub created_at: SystemTime,
    pub updated_at: SystemTime,
}

/// Full-row update applied by `db::profile::Dao::update_profile`. Optional
/// columns are overwritten rather than merged; the caller sends the complete
/// profile.
#[derive(Debug, AsChangeset)]
#[diesel(table_name = profiles)]
#[diesel(check_for_backend(diesel::pg::Pg))]
#[diesel(treat_none_as_null = true)]
pub struct ProfileChangeset<'a> {
    pub full_name: &'a str,
    pub email: &'a str,
    pub phone: Option<&'a str>,
    pub birth_date: Option<NaiveDate>,
    pub height: Option<f64>,
    pub weight: Option<f64>,
    pub address: Option<&'a str>,
    pub avatar_url: Option<&'a str>,

    pub updated_at: SystemTime,
}
