use actix_web::{get, HttpRequest, HttpResponse};
pub mod articles;
pub mod comments;
pub mod images;
pub mod tags;

#[get("/")]
pub async fn index(_req: HttpRequest) -> HttpResponse {
    HttpResponse::Ok().body("Hello!")
}
