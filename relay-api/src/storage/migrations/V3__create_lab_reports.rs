/// Lab report submissions together with the webhook's answer
pub fn migration() -> String {
    r#"
CREATE TABLE lab_reports (
    id TEXT PRIMARY KEY NOT NULL,
    twin_id TEXT NOT NULL,
    session_id TEXT,
    payload TEXT NOT NULL,
    response TEXT NOT NULL,
    created_at INTEGER NOT NULL
);

CREATE INDEX idx_lab_reports_twin
    ON lab_reports(twin_id, created_at);
"#
    .to_string()
}
