#![allow(dead_code)]

use health_chat_service::config::ChatConfig;
use health_chat_service::services::providers::TextProvider;
use health_chat_service::startup::Application;
use service_core::config::Config;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

pub const TEST_API_KEY: &str = "test-api-key";

/// Config as the service would load it with `vars` set in the environment.
pub fn test_config_with(vars: &[(&str, &str)]) -> ChatConfig {
    let mut env: HashMap<String, String> = HashMap::from([
        ("ENVIRONMENT".to_string(), "test".to_string()),
        ("GEMINI_API_KEY".to_string(), TEST_API_KEY.to_string()),
    ]);
    for (k, v) in vars {
        env.insert(k.to_string(), v.to_string());
    }

    ChatConfig::from_lookup(Config { port: 0 }, |key| env.get(key).cloned())
        .expect("Failed to build test config")
}

pub fn test_config() -> ChatConfig {
    test_config_with(&[])
}

pub struct TestApp {
    pub address: String,
    pub client: reqwest::Client,
}

impl TestApp {
    pub async fn spawn(config: ChatConfig) -> Self {
        let app = Application::build(config)
            .await
            .expect("Failed to build application");
        Self::run(app).await
    }

    pub async fn spawn_with_provider(config: ChatConfig, provider: Arc<dyn TextProvider>) -> Self {
        let app = Application::build_with_provider(config, provider)
            .await
            .expect("Failed to build application");
        Self::run(app).await
    }

    async fn run(app: Application) -> Self {
        let address = format!("http://127.0.0.1:{}", app.port());

        tokio::spawn(async move {
            let _ = app.run_until_stopped().await;
        });

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(5))
            .build()
            .expect("Failed to build client");

        // Wait for the listener to accept requests
        for _ in 0..50 {
            if client.get(&address).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }

        Self { address, client }
    }
}
