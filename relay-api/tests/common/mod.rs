#![allow(dead_code)]

use actix_web::{test, web, App};
use async_trait::async_trait;
use relay_api::handlers;
use relay_api::helpers::database::open_in_memory;
use relay_api::storage::{
    ChatMessage, ChatSession, ChatStorage, MessageRole, SqliteChatStorage, StorageError,
};
use relay_api::{AppState, DbConnection};
use serde_json::Value;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use webhook_client::{WebhookClient, WebhookError};

pub const TEST_TIMEOUT: Duration = Duration::from_secs(5);

pub struct TestApp<S> {
    pub db_conn: DbConnection,
    pub agent: Arc<MockWebhookClient>,
    pub app: S,
}

#[derive(Clone)]
pub enum MockResponse {
    Body(Value),
    Failure { status: u16, body: String },
}

/// Scripted stand-in for the n8n webhook
pub struct MockWebhookClient {
    pub response: MockResponse,
    pub delay: Option<Duration>,
    pub calls: Arc<Mutex<Vec<Value>>>,
}

impl MockWebhookClient {
    pub fn replying(body: Value) -> Self {
        MockWebhookClient {
            response: MockResponse::Body(body),
            delay: None,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn failing(status: u16, body: &str) -> Self {
        MockWebhookClient {
            response: MockResponse::Failure {
                status,
                body: body.to_string(),
            },
            delay: None,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> Vec<Value> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl WebhookClient for MockWebhookClient {
    async fn forward(&self, payload: Value) -> Result<Value, WebhookError> {
        self.calls.lock().unwrap().push(payload);

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        match &self.response {
            MockResponse::Body(body) => Ok(body.clone()),
            MockResponse::Failure { status, body } => Err(WebhookError::api(*status, body.clone())),
        }
    }

    fn endpoint(&self) -> &str {
        "mock://agent"
    }
}

/// Storage operations that `FailingStorage` should reject
#[derive(Debug, Clone, Copy, Default)]
pub struct StorageFailures {
    pub sessions: bool,
    pub assistant_messages: bool,
    pub ping: bool,
}

/// SQLite storage that fails the selected operations and delegates the rest
pub struct FailingStorage {
    inner: SqliteChatStorage,
    failures: StorageFailures,
}

impl FailingStorage {
    pub fn new(db_conn: DbConnection, failures: StorageFailures) -> Self {
        Self {
            inner: SqliteChatStorage::new(db_conn),
            failures,
        }
    }

    fn fail(operation: &str) -> StorageError {
        StorageError::OperationFailed(format!("{} unavailable", operation))
    }
}

#[async_trait]
impl ChatStorage for FailingStorage {
    async fn upsert_session(&self, session_id: &str, twin_id: &str) -> Result<(), StorageError> {
        if self.failures.sessions {
            return Err(Self::fail("upsert_session"));
        }
        self.inner.upsert_session(session_id, twin_id).await
    }

    async fn resolve_session(&self, twin_id: &str) -> Result<String, StorageError> {
        if self.failures.sessions {
            return Err(Self::fail("resolve_session"));
        }
        self.inner.resolve_session(twin_id).await
    }

    async fn get_session(&self, session_id: &str) -> Result<Option<ChatSession>, StorageError> {
        self.inner.get_session(session_id).await
    }

    async fn append_message(
        &self,
        session_id: &str,
        role: MessageRole,
        content: &str,
    ) -> Result<String, StorageError> {
        if self.failures.assistant_messages && role == MessageRole::Assistant {
            return Err(Self::fail("append_message"));
        }
        self.inner.append_message(session_id, role, content).await
    }

    async fn get_messages(&self, session_id: &str) -> Result<Vec<ChatMessage>, StorageError> {
        self.inner.get_messages(session_id).await
    }

    async fn record_lab_report(
        &self,
        twin_id: &str,
        session_id: Option<&str>,
        payload: &Value,
        response: &Value,
    ) -> Result<String, StorageError> {
        self.inner
            .record_lab_report(twin_id, session_id, payload, response)
            .await
    }

    async fn ping(&self) -> Result<(), StorageError> {
        if self.failures.ping {
            return Err(Self::fail("ping"));
        }
        self.inner.ping().await
    }
}

/// Build the relay app around an already assembled state
pub async fn init_relay_app(
    state: AppState,
) -> impl actix_web::dev::Service<
    actix_http::Request,
    Response = actix_web::dev::ServiceResponse,
    Error = actix_web::Error,
> {
    test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .wrap(handlers::cors_headers())
            .configure(handlers::configure),
    )
    .await
}

pub async fn setup_test_app(
    agent: MockWebhookClient,
) -> anyhow::Result<
    TestApp<
        impl actix_web::dev::Service<
            actix_http::Request,
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
        >,
    >,
> {
    setup_test_app_with(agent, None, TEST_TIMEOUT).await
}

pub async fn setup_test_app_with(
    agent: MockWebhookClient,
    lab_reports: Option<Arc<MockWebhookClient>>,
    agent_timeout: Duration,
) -> anyhow::Result<
    TestApp<
        impl actix_web::dev::Service<
            actix_http::Request,
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
        >,
    >,
> {
    let db_conn = open_in_memory()?;
    let storage: Arc<dyn ChatStorage> = Arc::new(SqliteChatStorage::new(db_conn.clone()));
    build_test_app(db_conn, storage, agent, lab_reports, agent_timeout).await
}

/// App whose storage rejects the operations named in `failures`
pub async fn setup_failing_storage_app(
    agent: MockWebhookClient,
    failures: StorageFailures,
) -> anyhow::Result<
    TestApp<
        impl actix_web::dev::Service<
            actix_http::Request,
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
        >,
    >,
> {
    let db_conn = open_in_memory()?;
    let storage: Arc<dyn ChatStorage> = Arc::new(FailingStorage::new(db_conn.clone(), failures));
    build_test_app(db_conn, storage, agent, None, TEST_TIMEOUT).await
}

async fn build_test_app(
    db_conn: DbConnection,
    storage: Arc<dyn ChatStorage>,
    agent: MockWebhookClient,
    lab_reports: Option<Arc<MockWebhookClient>>,
    agent_timeout: Duration,
) -> anyhow::Result<
    TestApp<
        impl actix_web::dev::Service<
            actix_http::Request,
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
        >,
    >,
> {
    let agent = Arc::new(agent);

    let app = init_relay_app(AppState {
        storage,
        agent: agent.clone() as Arc<dyn WebhookClient>,
        lab_reports: lab_reports.map(|client| client as Arc<dyn WebhookClient>),
        agent_timeout,
    })
    .await;

    Ok(TestApp {
        db_conn,
        agent,
        app,
    })
}

/// An http:// URL nothing is listening on
pub fn unreachable_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}/webhook/chat", addr)
}

pub fn count_rows(db_conn: &DbConnection, sql: &str) -> i64 {
    db_conn
        .lock()
        .unwrap()
        .query_row(sql, [], |row| row.get(0))
        .unwrap()
}

pub fn count_messages(db_conn: &DbConnection, role: &str) -> i64 {
    db_conn
        .lock()
        .unwrap()
        .query_row(
            "SELECT COUNT(*) FROM chat_messages WHERE role = ?1",
            [role],
            |row| row.get(0),
        )
        .unwrap()
}

/// The assistant reply is stored after the response is sent; poll briefly for it
pub async fn wait_for_messages(db_conn: &DbConnection, role: &str, expected: i64) -> i64 {
    let mut count = count_messages(db_conn, role);
    for _ in 0..100 {
        if count >= expected {
            break;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
        count = count_messages(db_conn, role);
    }
    count
}
