use actix_web::{middleware, web, App, HttpServer};
use actix_web_prom::PrometheusMetricsBuilder;
use affinity_webhook::{errors, metrics, tls, views, AffinityMutator, Config, DecisionCounter, WebhookEnvironmentConfig};
use log::{debug, info};
use prometheus::Registry;

#[actix_rt::main]
async fn main() -> Result<(), errors::Error> {
    env_logger::init();

    let env_config = WebhookEnvironmentConfig::from_env()?;
    debug!("Environment config: {:?}", &env_config);
    let config = Config::from_env_config(env_config)?;
    info!("Starting with config: {:?}", config);

    let tls_config = tls::load_server_config(&config.tls_cert_file, &config.tls_key_file).await?;

    let registry = Registry::new();
    metrics::custom_metrics(&registry).map_err(|e| errors::Error::Metrics(e.to_string()))?;
    let prometheus = PrometheusMetricsBuilder::new(metrics::METRICS_NAMESPACE)
        .registry(registry)
        .endpoint("/metrics")
        .build()
        .map_err(|e| errors::Error::Metrics(e.to_string()))?;

    let mutator = web::Data::new(AffinityMutator::new(DecisionCounter::new()));
    let max_body_bytes = config.max_body_bytes;

    let bind_address = config.bind_address();
    info!("Starting webhook server on {}", bind_address);
    HttpServer::new(move || {
        App::new()
            .wrap(prometheus.clone())
            .wrap(middleware::Logger::default().exclude("/health").exclude("/metrics"))
            .configure(views::configure(mutator.clone(), max_body_bytes))
    })
    .bind_rustls_0_23(&bind_address, tls_config)?
    .run()
    .await?;

    info!("actix exited");
    Ok(())
}
