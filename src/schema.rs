table! {
    articles (id) {
        id -> Integer,
        title -> Text,
        description -> Text,
        body -> Text,
        tag_list -> Text,
        image -> Nullable<Text>,
        created_at -> Timestamp,
        updated_at -> Timestamp,
    }
}

table! {
    comments (id) {
        id -> Integer,
        article_id -> Integer,
        content -> Text,
        author_name -> Nullable<Text>,
        created_at -> Timestamp,
        updated_at -> Timestamp,
    }
}

table! {
    images (id) {
        id -> Integer,
        content_type -> Text,
        data -> Binary,
        created_at -> Timestamp,
    }
}

joinable!(comments -> articles (article_id));

allow_tables_to_appear_in_same_query!(articles, comments, images);
