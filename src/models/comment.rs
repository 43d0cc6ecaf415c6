use crate::models::Article;
use crate::schema::comments;
use anyhow::Result;
use chrono::prelude::*;
use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::Serialize;

#[derive(Serialize, Queryable, Identifiable, Associations, Debug)]
#[belongs_to(Article)]
pub struct Comment {
    pub id: i32,
    pub article_id: i32,
    pub content: String,
    pub author_name: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[table_name = "comments"]
struct NewComment<'a> {
    article_id: i32,
    content: &'a str,
    author_name: Option<&'a str>,
    created_at: NaiveDateTime,
    updated_at: NaiveDateTime,
}

#[derive(AsChangeset)]
#[table_name = "comments"]
pub struct CommentChanges {
    content: Option<String>,
    author_name: Option<String>,
    updated_at: NaiveDateTime,
}

impl CommentChanges {
    pub fn new(content: Option<String>, author_name: Option<String>) -> CommentChanges {
        CommentChanges {
            content,
            author_name,
            updated_at: Utc::now().naive_utc(),
        }
    }
}

impl Comment {
    pub fn list(
        conn: &SqliteConnection,
        article: &Article,
    ) -> Result<Vec<Comment>, diesel::result::Error> {
        Comment::belonging_to(article)
            .order(comments::id.asc())
            .load::<Comment>(conn)
    }

    /// Scoped lookup: a comment owned by a different article is not found.
    pub fn find_scoped(
        conn: &SqliteConnection,
        article: &Article,
        comment_id: i32,
    ) -> Result<Option<Comment>, diesel::result::Error> {
        let comment = Comment::belonging_to(article)
            .filter(comments::id.eq(comment_id))
            .first::<Comment>(conn)
            .optional()?;

        Ok(comment)
    }

    pub fn create(
        conn: &SqliteConnection,
        article: &Article,
        content: &str,
        author_name: Option<&str>,
    ) -> Result<Comment> {
        let now = Utc::now().naive_utc();
        let new_comment = NewComment {
            article_id: article.id,
            content,
            author_name,
            created_at: now,
            updated_at: now,
        };
        diesel::insert_into(comments::table)
            .values(new_comment)
            .execute(conn)?;
        let comment = comments::table
            .order(comments::id.desc())
            .first::<Comment>(conn)?;
        Ok(comment)
    }

    pub fn update(
        conn: &SqliteConnection,
        comment_id: i32,
        changes: &CommentChanges,
    ) -> Result<Comment> {
        diesel::update(comments::table.find(comment_id))
            .set(changes)
            .execute(conn)?;
        let comment = comments::table.find(comment_id).first::<Comment>(conn)?;
        Ok(comment)
    }

    pub fn delete(
        conn: &SqliteConnection,
        comment_id: i32,
    ) -> Result<usize, diesel::result::Error> {
        diesel::delete(comments::table.find(comment_id)).execute(conn)
    }
}
