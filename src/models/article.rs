use crate::schema::{articles, comments};
use crate::tags;
use anyhow::Result;
use chrono::prelude::*;
use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::Serialize;

pub const PER_PAGE: i64 = 10;

#[derive(Serialize, Queryable, Identifiable, Debug)]
pub struct Article {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub body: String,
    pub tag_list: String,
    pub image: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[table_name = "articles"]
struct NewArticle<'a> {
    title: &'a str,
    description: &'a str,
    body: &'a str,
    tag_list: String,
    image: Option<&'a str>,
    created_at: NaiveDateTime,
    updated_at: NaiveDateTime,
}

/// Partial update: `None` fields keep their stored value.
#[derive(AsChangeset)]
#[table_name = "articles"]
pub struct ArticleChanges {
    title: Option<String>,
    description: Option<String>,
    body: Option<String>,
    tag_list: Option<String>,
    image: Option<String>,
    updated_at: NaiveDateTime,
}

impl ArticleChanges {
    pub fn new(
        title: Option<String>,
        description: Option<String>,
        body: Option<String>,
        tags: Option<&[String]>,
        image: Option<String>,
    ) -> ArticleChanges {
        ArticleChanges {
            title,
            description,
            body,
            tag_list: tags.map(encode_tag_list),
            image,
            updated_at: Utc::now().naive_utc(),
        }
    }
}

/// tag_list is stored as a JSON-encoded array of strings. A row holding
/// anything else decodes to an empty list instead of failing the
/// surrounding query.
pub fn decode_tag_list(raw: &str) -> Vec<String> {
    serde_json::from_str(raw).unwrap_or_default()
}

pub fn encode_tag_list(tags: &[String]) -> String {
    serde_json::to_string(tags).unwrap_or_else(|_| "[]".to_owned())
}

/// Pages below 1 clamp to the first page.
pub fn page_offset(page: i64, per_page: i64) -> i64 {
    let page = if page < 1 { 1 } else { page };
    (page - 1) * per_page
}

impl Article {
    pub fn find(
        conn: &SqliteConnection,
        article_id: i32,
    ) -> Result<Option<Article>, diesel::result::Error> {
        let article = articles::table
            .find(article_id)
            .first::<Article>(conn)
            .optional()?;

        Ok(article)
    }

    /// Newest first; id breaks ties between equal timestamps. An
    /// out-of-range page loads an empty vec.
    pub fn list(conn: &SqliteConnection, page: i64) -> Result<Vec<Article>, diesel::result::Error> {
        articles::table
            .order((articles::created_at.desc(), articles::id.desc()))
            .limit(PER_PAGE)
            .offset(page_offset(page, PER_PAGE))
            .load::<Article>(conn)
    }

    pub fn create(
        conn: &SqliteConnection,
        title: &str,
        description: &str,
        body: &str,
        tags: &[String],
        image: Option<&str>,
    ) -> Result<Article> {
        let now = Utc::now().naive_utc();
        let new_article = NewArticle {
            title,
            description,
            body,
            tag_list: encode_tag_list(tags),
            image,
            created_at: now,
            updated_at: now,
        };
        diesel::insert_into(articles::table)
            .values(new_article)
            .execute(conn)?;
        let article = articles::table
            .order(articles::id.desc())
            .first::<Article>(conn)?;
        Ok(article)
    }

    pub fn update(
        conn: &SqliteConnection,
        article_id: i32,
        changes: &ArticleChanges,
    ) -> Result<Article> {
        diesel::update(articles::table.find(article_id))
            .set(changes)
            .execute(conn)?;
        let article = articles::table.find(article_id).first::<Article>(conn)?;
        Ok(article)
    }

    /// Removes the article and every comment it owns in one transaction.
    pub fn delete(conn: &SqliteConnection, article: &Article) -> Result<(), diesel::result::Error> {
        conn.transaction(|| {
            diesel::delete(comments::table.filter(comments::article_id.eq(article.id)))
                .execute(conn)?;
            diesel::delete(articles::table.find(article.id)).execute(conn)?;
            Ok(())
        })
    }

    pub fn tags(&self) -> Vec<String> {
        decode_tag_list(&self.tag_list)
    }

    /// Reads every article's tag_list (the whole table, unpaginated) and
    /// ranks the distinct tags by occurrence count.
    pub fn popular_tags(conn: &SqliteConnection) -> Result<Vec<String>, diesel::result::Error> {
        let raw: Vec<String> = articles::table.select(articles::tag_list).load(conn)?;
        Ok(tags::popular_tags(
            raw.iter().map(|row| decode_tag_list(row)).collect(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::create_test_connection;
    use crate::models::Comment;

    #[actix_rt::test]
    async fn test_create_and_find_article() {
        let conn = create_test_connection();
        conn.test_transaction::<_, diesel::result::Error, _>(|| {
            let tags = vec!["rust".to_string(), "web".to_string()];
            let article =
                Article::create(&conn, "test", "about testing", "body", &tags, None)
                    .expect("must succeed");
            let found = Article::find(&conn, article.id)
                .expect("must succeed")
                .expect("must exist");
            assert_eq!(found.title, "test");
            assert_eq!(found.tags(), tags);

            Ok(())
        });
    }

    #[actix_rt::test]
    async fn test_update_keeps_unset_fields() {
        let conn = create_test_connection();
        conn.test_transaction::<_, diesel::result::Error, _>(|| {
            let article =
                Article::create(&conn, "before", "desc", "body", &[], None).expect("must succeed");
            let changes = ArticleChanges::new(Some("after".to_string()), None, None, None, None);
            let updated = Article::update(&conn, article.id, &changes).expect("must succeed");
            assert_eq!(updated.title, "after");
            assert_eq!(updated.description, "desc");

            Ok(())
        });
    }

    #[actix_rt::test]
    async fn test_delete_cascades_to_comments() {
        let conn = create_test_connection();
        conn.test_transaction::<_, diesel::result::Error, _>(|| {
            let article =
                Article::create(&conn, "test", "", "", &[], None).expect("must succeed");
            Comment::create(&conn, &article, "first", None).expect("must succeed");
            Comment::create(&conn, &article, "second", Some("ann")).expect("must succeed");

            Article::delete(&conn, &article).expect("must succeed");
            assert!(Article::find(&conn, article.id)
                .expect("must succeed")
                .is_none());
            let orphans: i64 = comments::table
                .filter(comments::article_id.eq(article.id))
                .count()
                .get_result(&conn)
                .expect("must succeed");
            assert_eq!(orphans, 0);

            Ok(())
        });
    }

    #[actix_rt::test]
    async fn test_list_pages_of_ten() {
        let conn = create_test_connection();
        conn.test_transaction::<_, diesel::result::Error, _>(|| {
            for n in 0..12 {
                Article::create(&conn, &format!("article {}", n), "", "", &[], None)
                    .expect("must succeed");
            }
            let first = Article::list(&conn, 1).expect("must succeed");
            assert_eq!(first.len(), 10);
            assert_eq!(first[0].title, "article 11");
            let second = Article::list(&conn, 2).expect("must succeed");
            assert_eq!(second.len(), 2);
            let third = Article::list(&conn, 3).expect("must succeed");
            assert!(third.is_empty());

            Ok(())
        });
    }

    #[actix_rt::test]
    async fn test_popular_tags_ranks_across_articles() {
        let conn = create_test_connection();
        conn.test_transaction::<_, diesel::result::Error, _>(|| {
            let a = vec!["a".to_string(), "b".to_string()];
            let b = vec!["a".to_string()];
            Article::create(&conn, "one", "", "", &a, None).expect("must succeed");
            Article::create(&conn, "two", "", "", &b, None).expect("must succeed");
            let popular = Article::popular_tags(&conn).expect("must succeed");
            assert_eq!(popular, vec!["a".to_string(), "b".to_string()]);

            Ok(())
        });
    }

    #[test]
    fn test_decode_tag_list_skips_malformed_rows() {
        assert_eq!(decode_tag_list("[\"a\",\"b\"]"), vec!["a", "b"]);
        assert!(decode_tag_list("not json").is_empty());
        assert!(decode_tag_list("{\"a\":1}").is_empty());
        assert!(decode_tag_list("").is_empty());
    }

    #[test]
    fn test_page_offset() {
        assert_eq!(page_offset(1, 10), 0);
        assert_eq!(page_offset(3, 10), 20);
        assert_eq!(page_offset(0, 10), 0);
        assert_eq!(page_offset(-2, 10), 0);
    }
}
