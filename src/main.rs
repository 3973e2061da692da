use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::{App, HttpServer, cookie::Key, middleware, web};

use onsite::auth::credentials::AdminCredentials;
use onsite::auth::rate_limit::RateLimiter;
use onsite::{audit, auth, db, handlers};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();

    // Ensure the database directory exists
    let database_path =
        std::env::var("DATABASE_PATH").unwrap_or_else(|_| "data/attendance.db".to_string());
    if let Some(parent) = std::path::Path::new(&database_path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).expect("Failed to create data directory");
        }
    }

    let pool = db::init_pool(&database_path);
    db::run_migrations(&pool);

    // Prune audit entries past the retention window
    {
        let conn = pool.get().expect("Failed to get audit cleanup connection");
        match audit::cleanup_old_entries(&conn) {
            Ok(0) => {}
            Ok(n) => log::info!("Pruned {n} old audit entries"),
            Err(e) => log::warn!("Audit cleanup failed: {e}"),
        }
    }

    // Admin account from the environment, hashed once
    let credentials = web::Data::new(AdminCredentials::from_env());
    let limiter = web::Data::new(RateLimiter::new());

    // Cookie signing key. A stable SESSION_KEY keeps sessions valid across restarts.
    let secret_key = match std::env::var("SESSION_KEY") {
        Ok(val) if val.len() >= 64 => {
            log::info!("Session key loaded from environment");
            Key::from(val.as_bytes())
        }
        Ok(val) => {
            log::warn!(
                "SESSION_KEY too short ({} bytes, need 64+), generating a random key",
                val.len()
            );
            Key::generate()
        }
        Err(_) => {
            log::warn!("No SESSION_KEY set, generating a random key; sessions reset on restart");
            Key::generate()
        }
    };

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());
    log::info!("Starting server at http://{bind_addr}");

    HttpServer::new(move || {
        let session_mw =
            SessionMiddleware::builder(CookieSessionStore::default(), secret_key.clone())
                .cookie_secure(false)
                .cookie_http_only(true)
                .build();

        App::new()
            .wrap(session_mw)
            .wrap(middleware::Logger::default())
            .app_data(web::Data::new(pool.clone()))
            .app_data(credentials.clone())
            .app_data(limiter.clone())
            .service(actix_files::Files::new("/static", "./static"))
            // Public check-in pages
            .route("/", web::get().to(handlers::public_handlers::index))
            .route(
                "/attendance",
                web::get().to(handlers::public_handlers::attendance_form),
            )
            .route(
                "/attendance",
                web::post().to(handlers::public_handlers::attendance_submit),
            )
            .route(
                "/success",
                web::get().to(handlers::public_handlers::success_page),
            )
            // Login lives outside the guarded scope
            .route(
                "/admin/login",
                web::get().to(handlers::auth_handlers::login_page),
            )
            .route(
                "/admin/login",
                web::post().to(handlers::auth_handlers::login_submit),
            )
            .service(
                web::scope("/admin")
                    .wrap(actix_web::middleware::from_fn(
                        auth::middleware::require_admin,
                    ))
                    .route("", web::get().to(handlers::dashboard::index))
                    .route("/logout", web::post().to(handlers::auth_handlers::logout))
                    .route(
                        "/location",
                        web::get().to(handlers::location_handlers::location_page),
                    )
                    .route(
                        "/location",
                        web::post().to(handlers::location_handlers::location_save),
                    )
                    .route(
                        "/meetings/start",
                        web::get().to(handlers::session_handlers::start_meeting_page),
                    )
                    .route(
                        "/meetings/start",
                        web::post().to(handlers::session_handlers::start_meeting),
                    )
                    .route(
                        "/meetings/end",
                        web::post().to(handlers::session_handlers::end_meeting),
                    )
                    .route(
                        "/records/purge",
                        web::post().to(handlers::session_handlers::purge_records),
                    )
                    .route(
                        "/sessions/{id}/delete",
                        web::post().to(handlers::session_handlers::delete_session),
                    )
                    .route(
                        "/sessions/{id}/export.csv",
                        web::get().to(handlers::export_handlers::export_session_csv),
                    )
                    .route(
                        "/export.csv",
                        web::get().to(handlers::export_handlers::export_all_csv),
                    ),
            )
            // Catch-all 404, registered last
            .default_service(web::to(|| async {
                let html = include_str!("../templates/errors/404.html");
                actix_web::HttpResponse::NotFound()
                    .content_type("text/html; charset=utf-8")
                    .body(html)
            }))
    })
    .bind(&bind_addr)?
    .run()
    .await
}
