use casebook_server::{
    config, controller::StoreHandle, health, openapi, providers::MockProviders, rest::AppState,
    seed, store::EntityStore, telemetry,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    telemetry::init_tracing();
    health::record_start_time();
    let config = config::load_config();

    let store = if config.seed_demo_data {
        seed::demo_store()?
    } else {
        EntityStore::new()
    }
    .with_llm_config(config.llm.clone());

    let state = AppState::new(
        StoreHandle::spawn(store),
        MockProviders::from_config(&config.providers),
    );
    let app = openapi::app_router(state);

    let listener = tokio::net::TcpListener::bind(&config.server.bind_addr).await?;
    tracing::info!(addr = %config.server.bind_addr, "Casebook listening; API docs at /docs");
    axum::serve(listener, app).await?;
    Ok(())
}
