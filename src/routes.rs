//! Route configuration
//!
//! Centralized route setup: each domain manages its own routes. Secured
//! endpoints wrap the session middleware built from the shared token
//! service; parametric catch-all paths are registered last so literal
//! action paths keep precedence.

use std::sync::Arc;

use actix_web::web;

use crate::handlers;
use crate::services::token_service::TokenService;

pub fn configure_routes(cfg: &mut web::ServiceConfig, tokens: Arc<TokenService>) {
    cfg.service(
        web::scope("/api/v1")
            .route(
                "/healthcheck",
                web::get().to(handlers::health::health_check),
            )
            .route(
                "/healthcheck/system",
                web::get().to(handlers::health::system_metrics),
            )
            .configure(|c| routes::users::configure(c, tokens.clone()))
            .configure(|c| routes::videos::configure(c, tokens.clone()))
            .configure(|c| routes::comments::configure(c, tokens.clone()))
            .configure(|c| routes::tweets::configure(c, tokens.clone()))
            .configure(|c| routes::likes::configure(c, tokens.clone()))
            .configure(|c| routes::subscriptions::configure(c, tokens.clone()))
            .configure(|c| routes::playlists::configure(c, tokens.clone()))
            .configure(|c| routes::dashboard::configure(c, tokens.clone())),
    );
}

// Sub-modules for each domain
mod routes {
    use super::*;
    use crate::middleware::SessionAuth;

    pub mod users {
        use super::*;

        pub fn configure(cfg: &mut web::ServiceConfig, tokens: Arc<TokenService>) {
            cfg.service(
                web::scope("/users")
                    .route("/register", web::post().to(handlers::users::register))
                    .route("/login", web::post().to(handlers::users::login))
                    .route(
                        "/refresh-token",
                        web::post().to(handlers::users::refresh_token),
                    )
                    .route(
                        "/channel/{username}",
                        web::get().to(handlers::users::channel_profile),
                    )
                    .service(
                        web::resource("/logout")
                            .wrap(SessionAuth::new(tokens.clone()))
                            .route(web::post().to(handlers::users::logout)),
                    )
                    .service(
                        web::resource("/change-password")
                            .wrap(SessionAuth::new(tokens.clone()))
                            .route(web::post().to(handlers::users::change_password)),
                    )
                    .service(
                        web::resource("/me")
                            .wrap(SessionAuth::new(tokens.clone()))
                            .route(web::get().to(handlers::users::current_user)),
                    )
                    .service(
                        web::resource("/update-account")
                            .wrap(SessionAuth::new(tokens.clone()))
                            .route(web::patch().to(handlers::users::update_account)),
                    )
                    .service(
                        web::resource("/watch-history")
                            .wrap(SessionAuth::new(tokens))
                            .route(web::get().to(handlers::users::watch_history)),
                    ),
            );
        }
    }

    pub mod videos {
        use super::*;

        pub fn configure(cfg: &mut web::ServiceConfig, tokens: Arc<TokenService>) {
            cfg.service(
                web::scope("/videos")
                    .route("", web::get().to(handlers::videos::list_videos))
                    .service(
                        web::resource("/upload-video")
                            .wrap(SessionAuth::new(tokens.clone()))
                            .route(web::post().to(handlers::videos::create_video)),
                    )
                    .service(
                        web::resource("/update-video-details/{id}")
                            .wrap(SessionAuth::new(tokens.clone()))
                            .route(web::put().to(handlers::videos::update_video)),
                    )
                    .service(
                        web::resource("/delete-video/{id}")
                            .wrap(SessionAuth::new(tokens.clone()))
                            .route(web::delete().to(handlers::videos::delete_video)),
                    )
                    .service(
                        web::resource("/toggle-publish-video/{id}")
                            .wrap(SessionAuth::new(tokens.clone()))
                            .route(web::put().to(handlers::videos::toggle_publish)),
                    )
                    .service(
                        web::resource("/view-video/{id}")
                            .wrap(SessionAuth::new(tokens))
                            .route(web::post().to(handlers::videos::record_view)),
                    )
                    // catch-all path goes last
                    .route("/{id}", web::get().to(handlers::videos::get_video)),
            );
        }
    }

    pub mod comments {
        use super::*;

        pub fn configure(cfg: &mut web::ServiceConfig, tokens: Arc<TokenService>) {
            cfg.service(
                web::scope("/comments")
                    .service(
                        web::resource("/create-comment/{videoId}")
                            .wrap(SessionAuth::new(tokens.clone()))
                            .route(web::post().to(handlers::comments::create_comment)),
                    )
                    .service(
                        web::resource("/update-comment/{commentId}")
                            .wrap(SessionAuth::new(tokens.clone()))
                            .route(web::patch().to(handlers::comments::update_comment)),
                    )
                    .service(
                        web::resource("/delete-comment/{commentId}")
                            .wrap(SessionAuth::new(tokens))
                            .route(web::delete().to(handlers::comments::delete_comment)),
                    )
                    // catch-all path goes last
                    .route(
                        "/{videoId}",
                        web::get().to(handlers::comments::list_comments),
                    ),
            );
        }
    }

    pub mod tweets {
        use super::*;

        pub fn configure(cfg: &mut web::ServiceConfig, tokens: Arc<TokenService>) {
            cfg.service(
                web::scope("/tweets")
                    .route("", web::get().to(handlers::tweets::list_tweets))
                    .service(
                        web::resource("/create-tweet")
                            .wrap(SessionAuth::new(tokens.clone()))
                            .route(web::post().to(handlers::tweets::create_tweet)),
                    )
                    .service(
                        web::resource("/update-tweet/{tweetId}")
                            .wrap(SessionAuth::new(tokens.clone()))
                            .route(web::patch().to(handlers::tweets::update_tweet)),
                    )
                    .service(
                        web::resource("/delete-tweet/{tweetId}")
                            .wrap(SessionAuth::new(tokens))
                            .route(web::delete().to(handlers::tweets::delete_tweet)),
                    ),
            );
        }
    }

    pub mod likes {
        use super::*;

        pub fn configure(cfg: &mut web::ServiceConfig, tokens: Arc<TokenService>) {
            cfg.service(
                web::scope("/likes")
                    .route("", web::post().to(handlers::likes::like_count))
                    .service(
                        web::resource("/like")
                            .wrap(SessionAuth::new(tokens.clone()))
                            .route(web::post().to(handlers::likes::like)),
                    )
                    .service(
                        web::resource("/remove-like")
                            .wrap(SessionAuth::new(tokens))
                            .route(web::delete().to(handlers::likes::remove_like)),
                    ),
            );
        }
    }

    pub mod subscriptions {
        use super::*;

        pub fn configure(cfg: &mut web::ServiceConfig, tokens: Arc<TokenService>) {
            cfg.service(
                web::scope("/subscriptions")
                    .wrap(SessionAuth::new(tokens))
                    .route(
                        "/checkSubscription/{channelId}",
                        web::get().to(handlers::subscriptions::check_subscription),
                    )
                    .route(
                        "/unsubscribe/{channelId}",
                        web::delete().to(handlers::subscriptions::unsubscribe),
                    )
                    .route(
                        "/{channelId}",
                        web::post().to(handlers::subscriptions::subscribe),
                    ),
            );
        }
    }

    pub mod playlists {
        use super::*;

        pub fn configure(cfg: &mut web::ServiceConfig, tokens: Arc<TokenService>) {
            cfg.service(
                web::scope("/playlists")
                    .service(
                        web::resource("")
                            .wrap(SessionAuth::new(tokens.clone()))
                            .route(web::post().to(handlers::playlists::create_playlist))
                            .route(web::get().to(handlers::playlists::list_playlists)),
                    )
                    .route(
                        "/get-playlist/{playlistId}",
                        web::get().to(handlers::playlists::get_playlist),
                    )
                    .service(
                        web::resource("/add-videos/{playlistId}")
                            .wrap(SessionAuth::new(tokens.clone()))
                            .route(web::patch().to(handlers::playlists::add_video)),
                    )
                    .service(
                        web::resource("/delete-videos/{playlistId}")
                            .wrap(SessionAuth::new(tokens.clone()))
                            .route(web::delete().to(handlers::playlists::remove_video)),
                    )
                    .service(
                        web::resource("/delete-playlist/{playlistId}")
                            .wrap(SessionAuth::new(tokens))
                            .route(web::delete().to(handlers::playlists::delete_playlist)),
                    ),
            );
        }
    }

    pub mod dashboard {
        use super::*;

        pub fn configure(cfg: &mut web::ServiceConfig, tokens: Arc<TokenService>) {
            cfg.service(
                web::scope("/dashboard")
                    .route(
                        "/overview",
                        web::get().to(handlers::dashboard::user_overview),
                    )
                    .service(
                        web::resource("/videos")
                            .wrap(SessionAuth::new(tokens.clone()))
                            .route(web::get().to(handlers::dashboard::video_overview)),
                    )
                    .service(
                        web::resource("/playlists")
                            .wrap(SessionAuth::new(tokens.clone()))
                            .route(web::get().to(handlers::dashboard::playlist_overview)),
                    )
                    .service(
                        web::resource("/engagement")
                            .wrap(SessionAuth::new(tokens))
                            .route(web::get().to(handlers::dashboard::engagement_metrics)),
                    ),
            );
        }
    }
}
