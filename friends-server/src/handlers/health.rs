use actix_web::{web, HttpResponse, Responder};
use friends_common::db::DbAsyncPool;
use serde_json::json;

pub async fn heartbeat() -> impl Responder {
    HttpResponse::Ok()
}

pub async fn health(db_async_pool: web::Data<DbAsyncPool>) -> impl Responder {
    let async_pool_state = db_async_pool.state();
    let resp_body = json!({
        "db_async_pool_state": {
            "connections": async_pool_state.connections,
            "idle_connections": async_pool_state.idle_connections
        }
    });

    HttpResponse::Ok().json(resp_body)
}
