use crate::schema::images;
use anyhow::Result;
use chrono::prelude::*;
use chrono::NaiveDateTime;
use diesel::prelude::*;

#[derive(Queryable, Identifiable, Debug)]
pub struct Image {
    pub id: i32,
    pub content_type: String,
    pub data: Vec<u8>,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[table_name = "images"]
struct NewImage<'a> {
    content_type: &'a str,
    data: &'a [u8],
    created_at: NaiveDateTime,
}

impl Image {
    /// Stores a blob; the returned row's `url()` is the retrievable
    /// reference handed back to the client.
    pub fn put(conn: &SqliteConnection, content_type: &str, data: &[u8]) -> Result<Image> {
        let new_image = NewImage {
            content_type,
            data,
            created_at: Utc::now().naive_utc(),
        };
        diesel::insert_into(images::table)
            .values(new_image)
            .execute(conn)?;
        let image = images::table.order(images::id.desc()).first::<Image>(conn)?;
        Ok(image)
    }

    pub fn get(
        conn: &SqliteConnection,
        image_id: i32,
    ) -> Result<Option<Image>, diesel::result::Error> {
        let image = images::table
            .find(image_id)
            .first::<Image>(conn)
            .optional()?;

        Ok(image)
    }

    pub fn url(&self) -> String {
        format!("/api/images/{}", self.id)
    }
}
