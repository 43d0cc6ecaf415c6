use crate::extractors::DbConnection;
use crate::models::Article;
use actix_web::{get, Error, HttpResponse};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug)]
pub struct PopularTagsResponse {
    pub popular_tags: Vec<String>,
}

/// Recomputed on every call; the full ranked list, no pagination.
#[get("/api/tags/popular")]
pub async fn get_popular_tags(conn: DbConnection) -> Result<HttpResponse, Error> {
    match Article::popular_tags(&conn) {
        Ok(popular_tags) => Ok(HttpResponse::Ok().json(PopularTagsResponse { popular_tags })),
        Err(e) => {
            eprintln!("{}", e);
            Ok(HttpResponse::InternalServerError().finish())
        }
    }
}
