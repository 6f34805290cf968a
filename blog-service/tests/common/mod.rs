use blog_service::config::{
    ApiDocsConfig, BlogConfig, JwtConfig, MongoConfig, SecurityConfig, StoreBackend, StoreConfig,
};
use blog_service::startup::Application;
use serde_json::json;
use service_core::config::{Config as CoreConfig, Environment};
use service_core::observability::logging::LogFormat;

pub struct TestApp {
    pub address: String,
    pub client: reqwest::Client,
}

impl TestApp {
    /// Spawn the service on an ephemeral port with the in-memory store, so
    /// the suite needs no external MongoDB.
    pub async fn spawn() -> Self {
        let config = BlogConfig {
            common: CoreConfig {
                port: 0,
                environment: Environment::Dev,
                log_level: "info".to_string(),
            },
            log_format: LogFormat::Compact,
            store: StoreConfig {
                backend: StoreBackend::Memory,
                mongodb: MongoConfig {
                    uri: "mongodb://localhost:27017".to_string(),
                    database: "blog_test".to_string(),
                },
            },
            jwt: JwtConfig {
                secret: "integration-test-secret".to_string(),
                token_expiry_days: 7,
            },
            security: SecurityConfig {
                allowed_origins: vec!["http://localhost:3000".to_string()],
            },
            api_docs: ApiDocsConfig { enabled: true },
        };

        let app = Application::build(config)
            .await
            .expect("Failed to build test application");
        let port = app.port();

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        TestApp {
            address: format!("http://127.0.0.1:{}", port),
            client: reqwest::Client::new(),
        }
    }

    pub async fn register(&self, name: &str, email: &str, password: &str) -> reqwest::Response {
        self.client
            .post(format!("{}/auth/register", self.address))
            .json(&json!({ "name": name, "email": email, "password": password }))
            .send()
            .await
            .expect("register request failed")
    }

    /// Register a user and return `(user_id, token)`.
    pub async fn register_user(&self, email: &str) -> (String, String) {
        let response = self.register("Test User", email, "a sound passphrase").await;
        assert_eq!(response.status(), 201, "registration should succeed");

        let body: serde_json::Value = response.json().await.expect("invalid register body");
        let id = body["data"]["id"].as_str().expect("missing id").to_string();
        let token = body["data"]["token"]
            .as_str()
            .expect("missing token")
            .to_string();
        (id, token)
    }

    pub async fn login(&self, email: &str, password: &str) -> reqwest::Response {
        self.client
            .post(format!("{}/auth/login", self.address))
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await
            .expect("login request failed")
    }

    pub async fn create_post(&self, token: &str, title: &str, content: &str) -> reqwest::Response {
        self.client
            .post(format!("{}/posts", self.address))
            .bearer_auth(token)
            .json(&json!({ "title": title, "content": content }))
            .send()
            .await
            .expect("create post request failed")
    }

    /// Create a post and return its id.
    pub async fn create_post_id(&self, token: &str, title: &str, content: &str) -> String {
        let response = self.create_post(token, title, content).await;
        assert_eq!(response.status(), 201, "post creation should succeed");

        let body: serde_json::Value = response.json().await.expect("invalid post body");
        body["data"]["id"].as_str().expect("missing id").to_string()
    }

    pub async fn get_post(&self, id: &str) -> reqwest::Response {
        self.client
            .get(format!("{}/posts/{}", self.address, id))
            .send()
            .await
            .expect("get post request failed")
    }
}
