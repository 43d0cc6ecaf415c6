use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel::r2d2::{self, ConnectionManager};
use dotenv::dotenv;
use std::env;

pub type DbPool = r2d2::Pool<ConnectionManager<SqliteConnection>>;

/// Executed at startup. `IF NOT EXISTS` keeps it safe to run against an
/// already-initialized database file.
pub const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS articles (
        id INTEGER PRIMARY KEY AUTOINCREMENT NOT NULL,
        title TEXT NOT NULL DEFAULT '',
        description TEXT NOT NULL DEFAULT '',
        body TEXT NOT NULL DEFAULT '',
        tag_list TEXT NOT NULL DEFAULT '[]',
        image TEXT,
        created_at TIMESTAMP NOT NULL,
        updated_at TIMESTAMP NOT NULL
    );

    CREATE TABLE IF NOT EXISTS comments (
        id INTEGER PRIMARY KEY AUTOINCREMENT NOT NULL,
        article_id INTEGER NOT NULL REFERENCES articles (id),
        content TEXT NOT NULL,
        author_name TEXT,
        created_at TIMESTAMP NOT NULL,
        updated_at TIMESTAMP NOT NULL
    );

    CREATE INDEX IF NOT EXISTS idx_comments_article_id ON comments (article_id);

    CREATE TABLE IF NOT EXISTS images (
        id INTEGER PRIMARY KEY AUTOINCREMENT NOT NULL,
        content_type TEXT NOT NULL,
        data BLOB NOT NULL,
        created_at TIMESTAMP NOT NULL
    );
";

pub fn create_connection_pool() -> DbPool {
    dotenv().ok();

    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let manager = ConnectionManager::<SqliteConnection>::new(database_url);
    r2d2::Pool::builder()
        .build(manager)
        .expect("Failed to create pool.")
}

pub fn initialize_schema(conn: &SqliteConnection) -> Result<(), diesel::result::Error> {
    conn.batch_execute(SCHEMA)?;
    Ok(())
}

/// In-memory database for route tests. A single pooled connection, so
/// every request in a test sees the same database.
#[cfg(test)]
pub fn create_test_pool() -> DbPool {
    let manager = ConnectionManager::<SqliteConnection>::new(":memory:");
    let pool = r2d2::Pool::builder()
        .max_size(1)
        .build(manager)
        .expect("Failed to create pool.");
    initialize_schema(&pool.get().expect("Failed to get connection from pool."))
        .expect("Failed to initialize schema.");
    pool
}

#[cfg(test)]
pub fn create_test_connection() -> SqliteConnection {
    let conn =
        SqliteConnection::establish(":memory:").expect("Failed to open in-memory database.");
    initialize_schema(&conn).expect("Failed to initialize schema.");
    conn
}
