use friends_common::db::friendship::{ConnectOutcome, DisconnectOutcome};
use friends_common::db::{self, DaoError, DbAsyncPool};
use friends_common::request_io::{
    InputFriendshipPair, InputUserId, OutputFriendList, OutputFriendshipLogList,
    OutputFriendshipStatus,
};

use actix_web::{web, HttpResponse};

use crate::handlers::error::HttpErrorResponse;

pub async fn connect(
    db_async_pool: web::Data<DbAsyncPool>,
    pair: web::Json<InputFriendshipPair>,
) -> Result<HttpResponse, HttpErrorResponse> {
    let friendship_dao = db::friendship::Dao::new(&db_async_pool);
    let outcome = match friendship_dao.connect(pair.actor_id, pair.other_id).await {
        Ok(o) => o,
        Err(e) => return Err(map_lifecycle_error(e, "Failed to connect friendship")),
    };

    let status = match outcome {
        ConnectOutcome::Created => "connected",
        ConnectOutcome::Reactivated => "reconnected",
        ConnectOutcome::AlreadyActive => "already_friends",
    };

    Ok(HttpResponse::Ok().json(OutputFriendshipStatus { status }))
}

pub async fn disconnect(
    db_async_pool: web::Data<DbAsyncPool>,
    pair: web::Json<InputFriendshipPair>,
) -> Result<HttpResponse, HttpErrorResponse> {
    let friendship_dao = db::friendship::Dao::new(&db_async_pool);
    let outcome = match friendship_dao
        .disconnect(pair.actor_id, pair.other_id)
        .await
    {
        Ok(o) => o,
        Err(e) => return Err(map_lifecycle_error(e, "Failed to disconnect friendship")),
    };

    let status = match outcome {
        DisconnectOutcome::Ended => "disconnected",
        DisconnectOutcome::NotFriends => "not_friends",
    };

    Ok(HttpResponse::Ok().json(OutputFriendshipStatus { status }))
}

pub async fn active_friends(
    db_async_pool: web::Data<DbAsyncPool>,
    query: web::Query<InputUserId>,
) -> Result<HttpResponse, HttpErrorResponse> {
    let friendship_dao = db::friendship::Dao::new(&db_async_pool);
    let friends = match friendship_dao.get_active_friends_of(query.user_id).await {
        Ok(f) => f,
        Err(e) => {
            log::error!("{e}");
            return Err(HttpErrorResponse::InternalError(String::from(
                "Failed to get active friends",
            )));
        }
    };

    Ok(HttpResponse::Ok().json(OutputFriendList { friends }))
}

pub async fn logs(
    db_async_pool: web::Data<DbAsyncPool>,
    query: web::Query<InputUserId>,
) -> Result<HttpResponse, HttpErrorResponse> {
    let friendship_dao = db::friendship::Dao::new(&db_async_pool);
    let logs = match friendship_dao.get_logs_for(query.user_id).await {
        Ok(l) => l,
        Err(e) => {
            log::error!("{e}");
            return Err(HttpErrorResponse::InternalError(String::from(
                "Failed to get friendship logs",
            )));
        }
    };

    Ok(HttpResponse::Ok().json(OutputFriendshipLogList { logs }))
}

fn map_lifecycle_error(error: DaoError, generic_msg: &str) -> HttpErrorResponse {
    match error {
        DaoError::InvalidPair(msg) => HttpErrorResponse::IncorrectlyFormed(String::from(msg)),
        DaoError::QueryFailure(diesel::result::Error::DatabaseError(
            diesel::result::DatabaseErrorKind::ForeignKeyViolation,
            _,
        )) => HttpErrorResponse::ForeignKeyDoesNotExist(String::from("No profile with given ID")),
        e => {
            log::error!("{e}");
            HttpErrorResponse::InternalError(String::from(generic_msg))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use actix_web::http::StatusCode;
    use actix_web::test::{self, TestRequest};
    use actix_web::web::Data;
    use actix_web::App;
    use diesel::{BoolExpressionMethods, ExpressionMethods, QueryDsl};
    use diesel_async::RunQueryDsl;
    use serde_json::Value;
    use uuid::Uuid;

    use friends_common::request_io::{InputProfile, OutputProfileId};
    use friends_common::schema::friendship_logs as friendship_log_fields;
    use friends_common::schema::friendship_logs::dsl::friendship_logs;
    use friends_common::schema::friendships as friendship_fields;
    use friends_common::schema::friendships::dsl::friendships;
    use friends_common::schema::profiles::dsl::profiles;

    use crate::env;
    use crate::services;

    async fn create_profile_via_api(
        app: &impl actix_web::dev::Service<
            actix_http::Request,
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
        >,
    ) -> Uuid {
        let input = InputProfile {
            full_name: String::from("Friendship Test Person"),
            email: format!("friendship-test-{}@friends.test", Uuid::now_v7().simple()),
            phone: None,
            birth_date: None,
            height: None,
            weight: None,
            address: None,
            avatar_url: None,
        };

        let req = TestRequest::post()
            .uri("/api/profile")
            .set_json(input)
            .to_request();
        let resp = test::call_service(app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);

        let created: OutputProfileId = test::read_body_json(resp).await;
        created.profile_id
    }

    async fn cleanup_pair(first: Uuid, second: Uuid) {
        let mut conn = env::testing::DB_ASYNC_POOL.get().await.unwrap();
        let ids = vec![first, second];

        let _ = diesel::delete(
            friendship_logs.filter(
                friendship_log_fields::user_a_id
                    .eq_any(ids.clone())
                    .or(friendship_log_fields::user_b_id.eq_any(ids.clone())),
            ),
        )
        .execute(&mut conn)
        .await;

        let _ = diesel::delete(
            friendships.filter(
                friendship_fields::user_a_id
                    .eq_any(ids.clone())
                    .or(friendship_fields::user_b_id.eq_any(ids)),
            ),
        )
        .execute(&mut conn)
        .await;

        let _ = diesel::delete(profiles.find(first)).execute(&mut conn).await;
        let _ = diesel::delete(profiles.find(second))
            .execute(&mut conn)
            .await;
    }

    async fn post_pair(
        app: &impl actix_web::dev::Service<
            actix_http::Request,
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
        >,
        uri: &str,
        actor_id: Uuid,
        other_id: Uuid,
    ) -> actix_web::dev::ServiceResponse {
        let req = TestRequest::post()
            .uri(uri)
            .set_json(InputFriendshipPair { actor_id, other_id })
            .to_request();
        test::call_service(app, req).await
    }

    #[actix_web::test]
    async fn connect_disconnect_lifecycle_over_http() {
        let app = test::init_service(
            App::new()
                .app_data(Data::new(env::testing::DB_ASYNC_POOL.clone()))
                .configure(services::api::configure),
        )
        .await;

        let alice = create_profile_via_api(&app).await;
        let bob = create_profile_via_api(&app).await;

        let resp = post_pair(&app, "/api/friendship/connect", alice, bob).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["status"], "connected");

        // Same request again is a no-op
        let resp = post_pair(&app, "/api/friendship/connect", bob, alice).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["status"], "already_friends");

        let req = TestRequest::get()
            .uri(&format!("/api/friendship/active?user_id={alice}"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        let friends = body["friends"].as_array().unwrap();
        assert_eq!(friends.len(), 1);
        assert_eq!(friends[0]["id"], bob.to_string());

        let resp = post_pair(&app, "/api/friendship/disconnect", alice, bob).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["status"], "disconnected");

        let resp = post_pair(&app, "/api/friendship/connect", alice, bob).await;
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["status"], "reconnected");

        let req = TestRequest::get()
            .uri(&format!("/api/friendship/logs?user_id={alice}"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        let logs = body["logs"].as_array().unwrap();
        let actions = logs
            .iter()
            .map(|l| l["action"].as_str().unwrap())
            .collect::<Vec<_>>();
        assert_eq!(actions, vec!["started", "ended", "started"]);

        cleanup_pair(alice, bob).await;
    }

    #[actix_web::test]
    async fn connect_rejects_self_pairing() {
        let app = test::init_service(
            App::new()
                .app_data(Data::new(env::testing::DB_ASYNC_POOL.clone()))
                .configure(services::api::configure),
        )
        .await;

        let alice = create_profile_via_api(&app).await;

        let resp = post_pair(&app, "/api/friendship/connect", alice, alice).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        cleanup_pair(alice, alice).await;
    }

    #[actix_web::test]
    async fn connect_with_unknown_profile_returns_not_found() {
        let app = test::init_service(
            App::new()
                .app_data(Data::new(env::testing::DB_ASYNC_POOL.clone()))
                .configure(services::api::configure),
        )
        .await;

        let resp = post_pair(
            &app,
            "/api/friendship/connect",
            Uuid::now_v7(),
            Uuid::now_v7(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn disconnect_when_never_friends_reports_not_friends() {
        let app = test::init_service(
            App::new()
                .app_data(Data::new(env::testing::DB_ASYNC_POOL.clone()))
                .configure(services::api::configure),
        )
        .await;

        let alice = create_profile_via_api(&app).await;
        let bob = create_profile_via_api(&app).await;

        let resp = post_pair(&app, "/api/friendship/disconnect", alice, bob).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["status"], "not_friends");

        cleanup_pair(alice, bob).await;
    }
}
