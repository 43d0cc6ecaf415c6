use crate::extractors::DbConnection;
use crate::models::{Article, Comment, CommentChanges};
use actix_web::{delete, get, patch, post, put, web, Error, HttpResponse};
use diesel::SqliteConnection;
use serde::{Deserialize, Serialize};
use serde_json::json;
use validator::Validate;

/// The fields a client may set on a comment.
#[derive(Serialize, Deserialize, Validate, Debug, Default)]
pub struct CommentParams {
    #[validate(length(min = 1, message = "can't be blank"))]
    pub content: Option<String>,
    pub author_name: Option<String>,
}

/// Parent resolution, shared by every comment handler. The parent 404s
/// before any comment-level lookup happens.
fn find_parent_article(conn: &SqliteConnection, article_id: i32) -> Result<Article, HttpResponse> {
    match Article::find(conn, article_id) {
        Ok(Some(article)) => Ok(article),
        Ok(None) => Err(HttpResponse::NotFound()
            .body(format!("No article found with id: {}", article_id))),
        Err(_) => Err(HttpResponse::InternalServerError().finish()),
    }
}

#[get("/api/articles/{article_id}/comments")]
pub async fn list_comments(
    path: web::Path<(i32,)>,
    conn: DbConnection,
) -> Result<HttpResponse, Error> {
    let article = match find_parent_article(&conn, path.into_inner().0) {
        Ok(article) => article,
        Err(resp) => return Ok(resp),
    };
    match Comment::list(&conn, &article) {
        Ok(comments) => Ok(HttpResponse::Ok().json(comments)),
        Err(e) => {
            eprintln!("{}", e);
            Ok(HttpResponse::InternalServerError().finish())
        }
    }
}

#[get("/api/articles/{article_id}/comments/{id}")]
pub async fn get_comment(
    path: web::Path<(i32, i32)>,
    conn: DbConnection,
) -> Result<HttpResponse, Error> {
    let (article_id, comment_id) = path.into_inner();
    let article = match find_parent_article(&conn, article_id) {
        Ok(article) => article,
        Err(resp) => return Ok(resp),
    };
    let comment = match Comment::find_scoped(&conn, &article, comment_id) {
        Ok(Some(comment)) => comment,
        Ok(None) => {
            return Ok(
                HttpResponse::NotFound().body(format!("No comment found with id: {}", comment_id))
            )
        }
        Err(_) => return Ok(HttpResponse::InternalServerError().finish()),
    };
    Ok(HttpResponse::Ok().json(comment))
}

#[post("/api/articles/{article_id}/comments")]
pub async fn create_comment(
    path: web::Path<(i32,)>,
    conn: DbConnection,
    data: web::Json<CommentParams>,
) -> Result<HttpResponse, Error> {
    let article = match find_parent_article(&conn, path.into_inner().0) {
        Ok(article) => article,
        Err(resp) => return Ok(resp),
    };
    if let Err(errors) = data.validate() {
        return Ok(HttpResponse::UnprocessableEntity().json(errors));
    }
    let content = match data.content.as_deref() {
        Some(content) => content,
        None => {
            return Ok(HttpResponse::UnprocessableEntity()
                .json(json!({ "content": ["can't be blank"] })))
        }
    };
    match Comment::create(&conn, &article, content, data.author_name.as_deref()) {
        Ok(comment) => Ok(HttpResponse::Created().json(comment)),
        Err(e) => {
            eprintln!("{}", e);
            Ok(HttpResponse::InternalServerError().finish())
        }
    }
}

async fn handle_update(
    conn: DbConnection,
    article_id: i32,
    comment_id: i32,
    data: CommentParams,
) -> Result<HttpResponse, Error> {
    let article = match find_parent_article(&conn, article_id) {
        Ok(article) => article,
        Err(resp) => return Ok(resp),
    };
    let comment = match Comment::find_scoped(&conn, &article, comment_id) {
        Ok(Some(comment)) => comment,
        Ok(None) => {
            return Ok(
                HttpResponse::NotFound().body(format!("No comment found with id: {}", comment_id))
            )
        }
        Err(_) => return Ok(HttpResponse::InternalServerError().finish()),
    };
    if let Err(errors) = data.validate() {
        return Ok(HttpResponse::UnprocessableEntity().json(errors));
    }
    let changes = CommentChanges::new(data.content, data.author_name);
    match Comment::update(&conn, comment.id, &changes) {
        Ok(comment) => Ok(HttpResponse::Ok().json(comment)),
        Err(e) => {
            eprintln!("{}", e);
            Ok(HttpResponse::InternalServerError().finish())
        }
    }
}

#[put("/api/articles/{article_id}/comments/{id}")]
pub async fn update_comment(
    path: web::Path<(i32, i32)>,
    conn: DbConnection,
    data: web::Json<CommentParams>,
) -> Result<HttpResponse, Error> {
    let (article_id, comment_id) = path.into_inner();
    handle_update(conn, article_id, comment_id, data.into_inner()).await
}

#[patch("/api/articles/{article_id}/comments/{id}")]
pub async fn patch_comment(
    path: web::Path<(i32, i32)>,
    conn: DbConnection,
    data: web::Json<CommentParams>,
) -> Result<HttpResponse, Error> {
    let (article_id, comment_id) = path.into_inner();
    handle_update(conn, article_id, comment_id, data.into_inner()).await
}

#[delete("/api/articles/{article_id}/comments/{id}")]
pub async fn delete_comment(
    path: web::Path<(i32, i32)>,
    conn: DbConnection,
) -> Result<HttpResponse, Error> {
    let (article_id, comment_id) = path.into_inner();
    let article = match find_parent_article(&conn, article_id) {
        Ok(article) => article,
        Err(resp) => return Ok(resp),
    };
    match Comment::find_scoped(&conn, &article, comment_id) {
        Ok(Some(_)) => {}
        Ok(None) => {
            return Ok(
                HttpResponse::NotFound().body(format!("No comment found with id: {}", comment_id))
            )
        }
        Err(_) => return Ok(HttpResponse::InternalServerError().finish()),
    }
    match Comment::delete(&conn, comment_id) {
        Ok(_) => Ok(HttpResponse::NoContent().finish()),
        Err(e) => {
            eprintln!("{}", e);
            Ok(HttpResponse::InternalServerError().finish())
        }
    }
}
