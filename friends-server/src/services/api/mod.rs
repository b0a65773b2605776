use actix_web::web::*;

mod friendship;
mod health;
mod profile;

pub fn configure(cfg: &mut ServiceConfig) {
    cfg.service(
        scope("/api")
            .configure(friendship::configure)
            .configure(profile::configure)
            .configure(health::configure),
    );
}
