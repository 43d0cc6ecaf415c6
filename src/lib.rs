#[macro_use]
extern crate diesel;

use actix_cors::Cors;
use actix_web::{middleware::Logger, App, HttpServer};
pub mod db;
pub mod extractors;
pub mod models;
pub mod routes;
pub mod schema;
pub mod tags;

pub async fn run() -> std::io::Result<()> {
    std::env::set_var("RUST_LOG", "blogist=debug,actix_web=info");
    std::env::set_var("RUST_BACKTRACE", "1");
    env_logger::init();
    let pool = db::create_connection_pool();
    {
        let conn = pool.get().expect("Failed to get connection from pool.");
        db::initialize_schema(&conn).expect("Failed to initialize schema.");
    }
    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(
                Cors::new() // <- Construct CORS middleware builder
                    .max_age(3600)
                    .finish(),
            )
            .data(pool.clone())
            .service(routes::index)
            .service(routes::articles::list_articles)
            .service(routes::articles::get_article)
            .service(routes::articles::create_article)
            .service(routes::articles::update_article)
            .service(routes::articles::patch_article)
            .service(routes::articles::delete_article)
            .service(routes::comments::list_comments)
            .service(routes::comments::get_comment)
            .service(routes::comments::create_comment)
            .service(routes::comments::update_comment)
            .service(routes::comments::patch_comment)
            .service(routes::comments::delete_comment)
            .service(routes::tags::get_popular_tags)
            .service(routes::images::upload_image)
            .service(routes::images::get_image)
    })
    .bind("127.0.0.1:8088")?
    .run()
    .await
}
