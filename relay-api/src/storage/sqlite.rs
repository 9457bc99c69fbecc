use crate::DbConnection;
use async_trait::async_trait;
use rusqlite::{params, OptionalExtension};
use serde_json::Value;
use uuid::Uuid;

use super::{ChatMessage, ChatSession, ChatStorage, MessageRole, StorageError};

pub struct SqliteChatStorage {
    connection: DbConnection,
}

impl SqliteChatStorage {
    pub fn new(connection: DbConnection) -> Self {
        Self { connection }
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, rusqlite::Connection>, StorageError> {
        self.connection
            .lock()
            .map_err(|e| StorageError::OperationFailed(format!("Lock error: {}", e)))
    }
}

fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

#[async_trait]
impl ChatStorage for SqliteChatStorage {
    async fn upsert_session(&self, session_id: &str, twin_id: &str) -> Result<(), StorageError> {
        let conn = self.lock()?;
        let now = now_millis();

        conn.execute(
            r#"
            INSERT INTO chat_sessions (id, twin_id, is_active, created_at, updated_at)
            VALUES (?1, ?2, 1, ?3, ?3)
            ON CONFLICT(id) DO UPDATE SET is_active = 1, updated_at = excluded.updated_at
            "#,
            params![session_id, twin_id, now],
        )?;

        Ok(())
    }

    async fn resolve_session(&self, twin_id: &str) -> Result<String, StorageError> {
        let mut conn = self.lock()?;
        let now = now_millis();
        let tx = conn.transaction()?;

        let existing: Option<String> = tx
            .query_row(
                r#"
                SELECT id FROM chat_sessions
                WHERE twin_id = ?1 AND is_active = 1
                ORDER BY updated_at DESC, rowid DESC
                LIMIT 1
                "#,
                params![twin_id],
                |row| row.get(0),
            )
            .optional()?;

        let session_id = match existing {
            Some(id) => {
                tx.execute(
                    "UPDATE chat_sessions SET updated_at = ?1 WHERE id = ?2",
                    params![now, id],
                )?;
                id
            }
            None => {
                let id = Uuid::new_v4().to_string();
                tx.execute(
                    r#"
                    INSERT INTO chat_sessions (id, twin_id, is_active, created_at, updated_at)
                    VALUES (?1, ?2, 1, ?3, ?3)
                    "#,
                    params![id, twin_id, now],
                )?;
                id
            }
        };

        tx.commit()?;
        Ok(session_id)
    }

    async fn get_session(&self, session_id: &str) -> Result<Option<ChatSession>, StorageError> {
        let conn = self.lock()?;

        let session = conn
            .query_row(
                r#"
                SELECT id, twin_id, is_active, created_at, updated_at
                FROM chat_sessions
                WHERE id = ?1
                "#,
                params![session_id],
                |row| {
                    Ok(ChatSession {
                        id: row.get(0)?,
                        twin_id: row.get(1)?,
                        is_active: row.get(2)?,
                        created_at: row.get(3)?,
                        updated_at: row.get(4)?,
                    })
                },
            )
            .optional()?;

        Ok(session)
    }

    async fn append_message(
        &self,
        session_id: &str,
        role: MessageRole,
        content: &str,
    ) -> Result<String, StorageError> {
        let conn = self.lock()?;
        let id = Uuid::new_v4().to_string();

        conn.execute(
            r#"
            INSERT INTO chat_messages (id, session_id, role, content, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
            params![id, session_id, role.as_str(), content, now_millis()],
        )?;

        Ok(id)
    }

    async fn get_messages(&self, session_id: &str) -> Result<Vec<ChatMessage>, StorageError> {
        let conn = self.lock()?;

        let mut stmt = conn.prepare(
            r#"
            SELECT id, session_id, role, content, created_at
            FROM chat_messages
            WHERE session_id = ?1
            ORDER BY created_at ASC, rowid ASC
            "#,
        )?;

        let messages = stmt
            .query_map(params![session_id], |row| {
                let role_str: String = row.get(2)?;
                let role = role_str.parse::<MessageRole>().map_err(|_| {
                    rusqlite::Error::InvalidColumnType(2, role_str, rusqlite::types::Type::Text)
                })?;

                Ok(ChatMessage {
                    id: row.get(0)?,
                    session_id: row.get(1)?,
                    role,
                    content: row.get(3)?,
                    created_at: row.get(4)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(messages)
    }

    async fn record_lab_report(
        &self,
        twin_id: &str,
        session_id: Option<&str>,
        payload: &Value,
        response: &Value,
    ) -> Result<String, StorageError> {
        let payload_json = serde_json::to_string(payload)?;
        let response_json = serde_json::to_string(response)?;

        let conn = self.lock()?;
        let id = Uuid::new_v4().to_string();

        conn.execute(
            r#"
            INSERT INTO lab_reports (id, twin_id, session_id, payload, response, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
            params![id, twin_id, session_id, payload_json, response_json, now_millis()],
        )?;

        Ok(id)
    }

    async fn ping(&self) -> Result<(), StorageError> {
        let conn = self.lock()?;
        conn.query_row("SELECT 1", [], |row| row.get::<_, i64>(0))?;
        Ok(())
    }
}
