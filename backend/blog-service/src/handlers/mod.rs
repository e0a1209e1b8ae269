//! HTTP surface of the blog service.
//!
//! Every handler follows the same pipeline: well-formed path ids (404
//! otherwise), body validation (422), identity where the route needs one
//! (401), then load / policy check / act through the service layer.
//! Successes are wrapped in a `{message, data?}` envelope; failures are
//! rendered by `AppError`.

pub mod comments;
pub mod posts;
pub mod users;

use actix_web::web;

/// Wire every route onto the application. Shared between the binary and
/// the integration tests.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/user")
            .service(web::resource("").route(web::post().to(users::sign_up)))
            .service(web::resource("/login").route(web::post().to(users::login))),
    )
    .service(
        web::scope("/post")
            .service(web::resource("").route(web::post().to(posts::create_post)))
            .service(
                web::resource("/{id}")
                    .route(web::get().to(posts::get_post))
                    .route(web::put().to(posts::update_post))
                    .route(web::delete().to(posts::delete_post)),
            )
            .service(
                web::resource("/{id}/comment")
                    .route(web::post().to(comments::create_comment)),
            )
            .service(
                web::resource("/{id}/comments").route(web::get().to(comments::list_comments)),
            )
            .service(
                web::resource("/{id}/comment/{commentid}")
                    .route(web::get().to(comments::get_comment))
                    .route(web::put().to(comments::update_comment))
                    .route(web::delete().to(comments::delete_comment)),
            ),
    )
    .service(web::resource("/posts").route(web::get().to(posts::list_posts)));
}
