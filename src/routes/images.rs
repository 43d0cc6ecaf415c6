use crate::extractors::DbConnection;
use crate::models::Image;
use actix_web::{get, post, web, Error, HttpMessage, HttpRequest, HttpResponse};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug)]
pub struct ImageUploadResponse {
    pub image_url: String,
}

/// Stores the raw request body as a blob and returns its URL. Attaching
/// the image to an article is the client's next request, via the
/// article's `image` field.
#[post("/api/upload_image")]
pub async fn upload_image(
    req: HttpRequest,
    payload: web::Bytes,
    conn: DbConnection,
) -> Result<HttpResponse, Error> {
    let content_type = match req.content_type() {
        "" => "application/octet-stream",
        other => other,
    };
    let image = match Image::put(&conn, content_type, &payload) {
        Ok(image) => image,
        Err(e) => {
            eprintln!("{}", e);
            return Ok(HttpResponse::InternalServerError().finish());
        }
    };
    Ok(HttpResponse::Ok().json(ImageUploadResponse {
        image_url: image.url(),
    }))
}

#[get("/api/images/{id}")]
pub async fn get_image(path: web::Path<(i32,)>, conn: DbConnection) -> Result<HttpResponse, Error> {
    let image_id = path.into_inner().0;
    let image = match Image::get(&conn, image_id) {
        Ok(Some(image)) => image,
        Ok(None) => {
            return Ok(
                HttpResponse::NotFound().body(format!("No image found with id: {}", image_id))
            )
        }
        Err(_) => return Ok(HttpResponse::InternalServerError().finish()),
    };
    Ok(HttpResponse::Ok()
        .content_type(image.content_type.as_str())
        .body(image.data))
}
