use crate::extractors::DbConnection;
use crate::models::{Article, ArticleChanges};
use actix_web::{delete, get, patch, post, put, web, Error, HttpResponse};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Debug)]
pub struct ArticleListQuery {
    pub page: Option<i64>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct ArticleJson {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub body: String,
    pub tag_list: Vec<String>,
    pub image: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<Article> for ArticleJson {
    fn from(article: Article) -> ArticleJson {
        let tag_list = article.tags();
        ArticleJson {
            id: article.id,
            title: article.title,
            description: article.description,
            body: article.body,
            tag_list,
            image: article.image,
            created_at: article.created_at,
            updated_at: article.updated_at,
        }
    }
}

/// The fields a client may set on an article. Anything else in the
/// request body is ignored.
#[derive(Serialize, Deserialize, Debug, Default)]
pub struct ArticleParams {
    pub title: Option<String>,
    pub description: Option<String>,
    pub body: Option<String>,
    pub image: Option<String>,
    pub tag_list: Option<Vec<String>>,
}

#[get("/api/articles")]
pub async fn list_articles(
    query: web::Query<ArticleListQuery>,
    conn: DbConnection,
) -> Result<HttpResponse, Error> {
    let page = query.page.unwrap_or(1);
    let articles = match Article::list(&conn, page) {
        Ok(articles) => articles,
        Err(e) => {
            eprintln!("{}", e);
            return Ok(HttpResponse::InternalServerError().finish());
        }
    };
    let articles: Vec<ArticleJson> = articles.into_iter().map(ArticleJson::from).collect();
    Ok(HttpResponse::Ok().json(articles))
}

#[get("/api/articles/{id}")]
pub async fn get_article(
    path: web::Path<(i32,)>,
    conn: DbConnection,
) -> Result<HttpResponse, Error> {
    let article_id = path.into_inner().0;
    let article = match Article::find(&conn, article_id) {
        Ok(Some(article)) => article,
        Ok(None) => {
            return Ok(
                HttpResponse::NotFound().body(format!("No article found with id: {}", article_id))
            )
        }
        Err(_) => return Ok(HttpResponse::InternalServerError().finish()),
    };
    Ok(HttpResponse::Ok().json(ArticleJson::from(article)))
}

#[post("/api/articles")]
pub async fn create_article(
    conn: DbConnection,
    data: web::Json<ArticleParams>,
) -> Result<HttpResponse, Error> {
    let tags = data.tag_list.clone().unwrap_or_default();
    let article = match Article::create(
        &conn,
        data.title.as_deref().unwrap_or(""),
        data.description.as_deref().unwrap_or(""),
        data.body.as_deref().unwrap_or(""),
        &tags,
        data.image.as_deref(),
    ) {
        Ok(article) => article,
        Err(e) => {
            eprintln!("{}", e);
            return Ok(HttpResponse::InternalServerError().finish());
        }
    };
    Ok(HttpResponse::Created().json(ArticleJson::from(article)))
}

async fn handle_update(
    conn: DbConnection,
    article_id: i32,
    data: ArticleParams,
) -> Result<HttpResponse, Error> {
    match Article::find(&conn, article_id) {
        Ok(Some(_)) => {}
        Ok(None) => {
            return Ok(
                HttpResponse::NotFound().body(format!("No article found with id: {}", article_id))
            )
        }
        Err(_) => return Ok(HttpResponse::InternalServerError().finish()),
    }
    let changes = ArticleChanges::new(
        data.title,
        data.description,
        data.body,
        data.tag_list.as_deref(),
        data.image.clone(),
    );
    let article = match Article::update(&conn, article_id, &changes) {
        Ok(article) => article,
        Err(e) => {
            eprintln!("{}", e);
            return Ok(HttpResponse::InternalServerError().finish());
        }
    };
    Ok(HttpResponse::Ok().json(ArticleJson::from(article)))
}

#[put("/api/articles/{id}")]
pub async fn update_article(
    path: web::Path<(i32,)>,
    conn: DbConnection,
    data: web::Json<ArticleParams>,
) -> Result<HttpResponse, Error> {
    handle_update(conn, path.into_inner().0, data.into_inner()).await
}

#[patch("/api/articles/{id}")]
pub async fn patch_article(
    path: web::Path<(i32,)>,
    conn: DbConnection,
    data: web::Json<ArticleParams>,
) -> Result<HttpResponse, Error> {
    handle_update(conn, path.into_inner().0, data.into_inner()).await
}

#[delete("/api/articles/{id}")]
pub async fn delete_article(
    path: web::Path<(i32,)>,
    conn: DbConnection,
) -> Result<HttpResponse, Error> {
    let article_id = path.into_inner().0;
    let article = match Article::find(&conn, article_id) {
        Ok(Some(article)) => article,
        Ok(None) => {
            return Ok(
                HttpResponse::NotFound().body(format!("No article found with id: {}", article_id))
            )
        }
        Err(_) => return Ok(HttpResponse::InternalServerError().finish()),
    };
    match Article::delete(&conn, &article) {
        Ok(()) => Ok(HttpResponse::Ok().finish()),
        Err(e) => {
            eprintln!("{}", e);
            Ok(HttpResponse::InternalServerError().finish())
        }
    }
}
