/// Chat sessions, keyed by the client-visible session id
pub fn migration() -> String {
    r#"
CREATE TABLE chat_sessions (
    id TEXT PRIMARY KEY NOT NULL,
    twin_id TEXT NOT NULL,
    is_active INTEGER NOT NULL DEFAULT 1 CHECK (is_active IN (0, 1)),
    created_at INTEGER NOT NULL,
    updated_at INTEGER NOT NULL
);

CREATE INDEX idx_chat_sessions_twin_updated
    ON chat_sessions(twin_id, updated_at);
"#
    .to_string()
}
