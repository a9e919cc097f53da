use std::sync::Arc;

use lambda_runtime::{Error, LambdaEvent, run, service_fn};
use secureflow::core::config::AppConfig;
use serde_json::Value;

#[tokio::main]
async fn main() -> Result<(), Error> {
    secureflow::setup_logging();

    let config = AppConfig::from_env();
    let sdk_config = aws_config::from_env().load().await;
    let handler = Arc::new(secureflow::wiring::history_handler(&config, &sdk_config));

    run(service_fn(move |event: LambdaEvent<Value>| {
        let handler = Arc::clone(&handler);
        async move { Ok::<Value, Error>(handler.handle(&event.payload).await) }
    }))
    .await
}
