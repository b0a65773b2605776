use actix_web::web::*;

use crate::handlers::profile;

pub fn configure(cfg: &mut ServiceConfig) {
    cfg.service(
        resource("/profile")
            .route(post().to(profile::create))
            .route(get().to(profile::get))
            .route(put().to(profile::update))
            .route(delete().to(profile::delete)),
    )
    .service(resource("/profiles").route(get().to(profile::list)));
}
