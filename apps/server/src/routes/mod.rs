mod check;
mod health;
mod sites;

use actix_web::web;

/// Register every route on the application.
pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.service(health::index)
        .service(sites::list_sites)
        .service(sites::create_site)
        .service(sites::delete_site)
        .service(check::check_one)
        .service(check::check_all_sites);
}
