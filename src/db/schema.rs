//! Database schema and migrations.
//!
//! Migrations are applied in order when the database is first opened or
//! upgraded. The schema_version table tracks which have been applied.

/// Database migrations.
pub const MIGRATIONS: &[&str] = &[
    // v1: users (the identity directory)
    r#"
CREATE TABLE users (
    id              INTEGER PRIMARY KEY AUTOINCREMENT,
    email           TEXT NOT NULL UNIQUE,    -- normalized: trimmed, lowercase
    password_hash   TEXT NOT NULL,           -- Argon2 PHC string
    display_name    TEXT NOT NULL,
    role            TEXT NOT NULL DEFAULT 'user',  -- 'user', 'admin'
    created_at      TEXT NOT NULL
);

CREATE INDEX idx_users_role ON users(role);
"#,
    // v2: boards
    r#"
CREATE TABLE boards (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    name        TEXT NOT NULL UNIQUE,
    description TEXT NOT NULL DEFAULT '',
    created_at  TEXT NOT NULL
);
"#,
    // v3: posts
    r#"
CREATE TABLE posts (
    id              INTEGER PRIMARY KEY AUTOINCREMENT,
    board_id        INTEGER NOT NULL REFERENCES boards(id),
    author_id       INTEGER NOT NULL REFERENCES users(id),
    title           TEXT NOT NULL,
    body            TEXT NOT NULL,
    like_count      INTEGER NOT NULL DEFAULT 0,
    comment_count   INTEGER NOT NULL DEFAULT 0,
    hot_score       REAL NOT NULL DEFAULT 0,
    status          TEXT NOT NULL DEFAULT 'active' CHECK (status IN ('active', 'deleted')),
    created_at      TEXT NOT NULL,
    updated_at      TEXT NOT NULL
);

CREATE INDEX idx_posts_board_created ON posts(board_id, created_at);
CREATE INDEX idx_posts_board_hot ON posts(board_id, hot_score);
"#,
    // v4: comments
    r#"
CREATE TABLE comments (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    post_id     INTEGER NOT NULL REFERENCES posts(id),
    author_id   INTEGER NOT NULL REFERENCES users(id),
    body        TEXT NOT NULL,
    created_at  TEXT NOT NULL
);

CREATE INDEX idx_comments_post_id ON comments(post_id);
"#,
];
