use super::fake_api::{router, SharedStore, Store, SEED_POSTS};
use apicheck_core::{ApiClient, Config, Session, UserEndpoint, DEFAULT_PASSWORD};
use serde_json::Value;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

/// A fake posts API bound to an ephemeral local port
pub struct FakeApi {
    base_url: String,
    store: SharedStore,
}

impl FakeApi {
    /// Start a server seeded with the default posts
    pub async fn start() -> Self {
        Self::with_store(Store::seeded(SEED_POSTS)).await
    }

    /// Start a server seeded with `count` posts
    pub async fn with_posts(count: u64) -> Self {
        Self::with_store(Store::seeded(count)).await
    }

    async fn with_store(store: Store) -> Self {
        let store = Arc::new(Mutex::new(store));
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind ephemeral port");
        let addr = listener.local_addr().expect("local addr");
        let app = router(store.clone());

        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("fake api server");
        });

        Self {
            base_url: format!("http://{}", addr),
            store,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Default config pointed at this server
    pub fn config(&self) -> Config {
        let mut config = Config::default();
        config.target.base_url = self.base_url.clone();
        config.target.timeout_secs = 5;
        config
    }

    pub fn client(&self) -> ApiClient {
        ApiClient::new(&self.config().target).expect("build client")
    }

    /// Register a user directly in the store (for login tests)
    pub fn add_user(&self, email: &str, password: &str) -> u64 {
        self.store.lock().unwrap().add_user(email, password)
    }

    /// Reject token-less `GET /posts` from now on
    pub fn make_reads_private(&self) {
        self.store.lock().unwrap().private_reads = true;
    }

    /// Hand out ids the way json-server does, from the highest live id
    pub fn recycle_ids(&self) {
        self.store.lock().unwrap().recycle_ids = true;
    }

    pub fn post_count(&self) -> usize {
        self.store.lock().unwrap().post_count()
    }

    pub fn post(&self, id: u64) -> Option<Value> {
        self.store.lock().unwrap().post(id).cloned()
    }

    pub fn posts_titled(&self, title: &str) -> usize {
        self.store.lock().unwrap().posts_titled(title)
    }

    /// Sign up a fresh user through the API and return the session
    pub async fn signed_up_session(&self, email: &str) -> Session {
        let client = self.client();
        let mut session = Session::new();
        UserEndpoint::new(&client)
            .sign_up(&mut session, email, DEFAULT_PASSWORD)
            .await
            .expect("signup against fake api");
        session
    }
}
