use chrono::NaiveDate;
use diesel::{dsl, BoolExpressionMethods, ExpressionMethods, PgTextExpressionMethods, QueryDsl};
use diesel_async::RunQueryDsl;
use std::time::SystemTime;
use uuid::Uuid;

use crate::db::{DaoError, DbAsyncPool};
use crate::models::profile::{NewProfile, Profile, ProfileChangeset};

use crate::schema::profiles as profile_fields;
use crate::schema::profiles::dsl::profiles;

pub struct Dao {
    db_async_pool: DbAsyncPool,
}

impl Dao {
    pub fn new(db_async_pool: &DbAsyncPool) -> Self {
        Self {
            db_async_pool: db_async_pool.clone(),
        }
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn create_profile(
        &self,
        full_name: &str,
        email: &str,
        phone: Option<&str>,
        birth_date: Option<NaiveDate>,
        height: Option<f64>,
        weight: Option<f64>,
        address: Option<&str>,
        avatar_url: Option<&str>,
    ) -> Result<Uuid, DaoError> {
        let current_time = SystemTime::now();
        let profile_id = Uuid::now_v7();

        let email_lowercase = email.to_lowercase();

        let new_profile = NewProfile {
            id: profile_id,
            full_name,
            email: &email_lowercase,
            phone,
            birth_date,
            height,
            weight,
            address,
            avatar_url,

            created_at: current_time,
            updated_at: current_time,
        };

        let mut conn = self.db_async_pool.get().await?;
        dsl::insert_into(profiles)
            .values(&new_profile)
            .execute(&mut conn)
            .await?;

        Ok(profile_id)
    }

    pub async fn get_profile(&self, profile_id: Uuid) -> Result<Profile, DaoError> {
        let mut conn = self.db_async_pool.get().await?;
        Ok(profiles.find(profile_id).first(&mut conn).await?)
    }

    pub async fn get_all_profiles(&self) -> Result<Vec<Profile>, DaoError> {
        let mut conn = self.db_async_pool.get().await?;
        Ok(profiles
            .order(profile_fields::full_name.asc())
            .load(&mut conn)
            .await?)
    }

    /// Case-insensitive substring search over display name and email. LIKE
    /// metacharacters in the query are matched literally.
    pub async fn search_profiles(&self, query: &str) -> Result<Vec<Profile>, DaoError> {
        let escaped_query = query
            .replace('\\', "\\\\")
            .replace('%', "\\%")
            .replace('_', "\\_");
        let pattern = format!("%{}%", escaped_query);

        let mut conn = self.db_async_pool.get().await?;
        Ok(profiles
            .filter(
                profile_fields::full_name
                    .ilike(pattern.clone())
                    .or(profile_fields::email.ilike(pattern)),
            )
            .order(profile_fields::full_name.asc())
            .load(&mut conn)
            .await?)
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn update_profile(
        &self,
        profile_id: Uuid,
        full_name: &str,
        email: &str,
        phone: Option<&str>,
        birth_date: Option<NaiveDate>,
        height: Option<f64>,
        weight: Option<f64>,
        address: Option<&str>,
        avatar_url: Option<&str>,
    ) -> Result<(), DaoError> {
        let email_lowercase = email.to_lowercase();

        let changeset = ProfileChangeset {
            full_name,
            email: &email_lowercase,
            phone,
            birth_date,
            height,
            weight,
            address,
            avatar_url,

            updated_at: SystemTime::now(),
        };

        let mut conn = self.db_async_pool.get().await?;
        let affected_row_count = dsl::update(profiles.find(profile_id))
            .set(&changeset)
            .execute(&mut conn)
            .await?;

        if affected_row_count == 0 {
            return Err(DaoError::QueryFailure(diesel::result::Error::NotFound));
        }

        Ok(())
    }

    pub async fn delete_profile(&self, profile_id: Uuid) -> Result<(), DaoError> {
        let mut conn = self.db_async_pool.get().await?;
        let affected_row_count = diesel::delete(profiles.find(profile_id))
            .execute(&mut conn)
            .await?;

        if affected_row_count == 0 {
            return Err(DaoError::QueryFailure(diesel::result::Error::NotFound));
        }

        Ok(())
    }
}
