use blockchair_proxy::api::server;
#[cfg(feature = "lambda")]
use blockchair_proxy::telemetry;

#[cfg(not(feature = "lambda"))]
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    server::run_server().await
}

#[cfg(feature = "lambda")]
#[tokio::main]
async fn main() -> Result<(), lambda_http::Error> {
    telemetry::init_tracing(&telemetry::TelemetryConfig::from_env());

    let app = server::create_app()
        .await
        .map_err(|e| lambda_http::Error::from(e.to_string()))?;

    lambda_http::run(app).await
}
