use actix_web::web::*;

use crate::handlers::friendship;

pub fn configure(cfg: &mut ServiceConfig) {
    cfg.service(
        scope("/friendship")
            .service(resource("/connect").route(post().to(friendship::connect)))
            .service(resource("/disconnect").route(post().to(friendship::disconnect)))
            .service(resource("/active").route(get().to(friendship::active_friends)))
            .service(resource("/logs").route(get().to(friendship::logs))),
    );
}
