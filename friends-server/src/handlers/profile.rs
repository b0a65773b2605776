use friends_common::db::{self, DaoError, DbAsyncPool};
use friends_common::request_io::{
    InputProfile, InputProfileId, InputProfileSearch, OutputProfileId, OutputProfileList,
};
use friends_common::validators::{self, Validity};

use actix_web::{web, HttpResponse};

use crate::handlers::error::HttpErrorResponse;

pub async fn create(
    db_async_pool: web::Data<DbAsyncPool>,
    profile_data: web::Json<InputProfile>,
) -> Result<HttpResponse, HttpErrorResponse> {
    validate_required_fields(&profile_data)?;

    let profile_dao = db::profile::Dao::new(&db_async_pool);
    let profile_id = match profile_dao
        .create_profile(
            &profile_data.full_name,
            &profile_data.email,
            profile_data.phone.as_deref(),
            profile_data.birth_date,
            profile_data.height,
            profile_data.weight,
            profile_data.address.as_deref(),
            profile_data.avatar_url.as_deref(),
        )
        .await
    {
        Ok(id) => id,
        Err(e) => match e {
            DaoError::QueryFailure(diesel::result::Error::DatabaseError(
                diesel::result::DatabaseErrorKind::UniqueViolation,
                _,
            )) => {
                return Err(HttpErrorResponse::ConflictWithExisting(String::from(
                    "A profile with the given email address already exists",
                )));
            }
            _ => {
                log::error!("{e}");
                return Err(HttpErrorResponse::InternalError(String::from(
                    "Failed to create profile",
                )));
            }
        },
    };

    Ok(HttpResponse::Created().json(OutputProfileId { profile_id }))
}

pub async fn get(
    db_async_pool: web::Data<DbAsyncPool>,
    query: web::Query<InputProfileId>,
) -> Result<HttpResponse, HttpErrorResponse> {
    let profile_dao = db::profile::Dao::new(&db_async_pool);
    let profile = match profile_dao.get_profile(query.profile_id).await {
        Ok(p) => p,
        Err(e) => match e {
            DaoError::QueryFailure(diesel::result::Error::NotFound) => {
                return Err(HttpErrorResponse::DoesNotExist(String::from(
                    "No profile with given ID",
                )));
            }
            _ => {
                log::error!("{e}");
                return Err(HttpErrorResponse::InternalError(String::from(
                    "Failed to get profile",
                )));
            }
        },
    };

    Ok(HttpResponse::Ok().json(profile))
}

pub async fn list(
    db_async_pool: web::Data<DbAsyncPool>,
    query: web::Query<InputProfileSearch>,
) -> Result<HttpResponse, HttpErrorResponse> {
    let profile_dao = db::profile::Dao::new(&db_async_pool);

    let search = query.search.as_deref().map(str::trim).unwrap_or("");
    let result = if search.is_empty() {
        profile_dao.get_all_profiles().await
    } else {
        profile_dao.search_profiles(search).await
    };

    let profiles = match result {
        Ok(p) => p,
        Err(e) => {
            log::error!("{e}");
            return Err(HttpErrorResponse::InternalError(String::from(
                "Failed to list profiles",
            )));
        }
    };

    Ok(HttpResponse::Ok().json(OutputProfileList { profiles }))
}

pub async fn update(
    db_async_pool: web::Data<DbAsyncPool>,
    query: web::Query<InputProfileId>,
    profile_data: web::Json<InputProfile>,
) -> Result<HttpResponse, HttpErrorResponse> {
    validate_required_fields(&profile_data)?;

    let profile_dao = db::profile::Dao::new(&db_async_pool);
    match profile_dao
        .update_profile(
            query.profile_id,
            &profile_data.full_name,
            &profile_data.email,
            profile_data.phone.as_deref(),
            profile_data.birth_date,
            profile_data.height,
            profile_data.weight,
            profile_data.address.as_deref(),
            profile_data.avatar_url.as_deref(),
        )
        .await
    {
        Ok(()) => (),
        Err(e) => match e {
            DaoError::QueryFailure(diesel::result::Error::NotFound) => {
                return Err(HttpErrorResponse::DoesNotExist(String::from(
                    "No profile with given ID",
                )));
            }
            DaoError::QueryFailure(diesel::result::Error::DatabaseError(
                diesel::result::DatabaseErrorKind::UniqueViolation,
                _,
            )) => {
                return Err(HttpErrorResponse::ConflictWithExisting(String::from(
                    "A profile with the given email address already exists",
                )));
            }
            _ => {
                log::error!("{e}");
                return Err(HttpErrorResponse::InternalError(String::from(
                    "Failed to update profile",
                )));
            }
        },
    };

    Ok(HttpResponse::Ok().finish())
}

pub async fn delete(
    db_async_pool: web::Data<DbAsyncPool>,
    query: web::Query<InputProfileId>,
) -> Result<HttpResponse, HttpErrorResponse> {
    let profile_dao = db::profile::Dao::new(&db_async_pool);
    match profile_dao.delete_profile(query.profile_id).await {
        Ok(()) => (),
        Err(e) => match e {
            DaoError::QueryFailure(diesel::result::Error::NotFound) => {
                return Err(HttpErrorResponse::DoesNotExist(String::from(
                    "No profile with given ID",
                )));
            }
            DaoError::QueryFailure(diesel::result::Error::DatabaseError(
                diesel::result::DatabaseErrorKind::ForeignKeyViolation,
                _,
            )) => {
                // Friendship rows and audit entries reference the profile
                // without cascade
                return Err(HttpErrorResponse::ConflictWithExisting(String::from(
                    "Profile still has relationship history",
                )));
            }
            _ => {
                log::error!("{e}");
                return Err(HttpErrorResponse::InternalError(String::from(
                    "Failed to delete profile",
                )));
            }
        },
    };

    Ok(HttpResponse::Ok().finish())
}

fn validate_required_fields(profile_data: &InputProfile) -> Result<(), HttpErrorResponse> {
    if let Validity::Invalid(msg) = validators::validate_display_name(&profile_data.full_name) {
        return Err(HttpErrorResponse::IncorrectlyFormed(msg));
    }

    if let Validity::Invalid(msg) = validators::validate_email_address(&profile_data.email) {
        return Err(HttpErrorResponse::IncorrectlyFormed(msg));
    }

    Ok(())
}
