use polotno_gateway::config::{self, Config};
use polotno_gateway::{build_state, logger, server};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Optional config file path (without extension) as the first argument
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| config::DEFAULT_CONFIG_PATH.to_string());
    let cfg = Config::load_from(&config_path)?;
    logger::init(&cfg);

    // Worker threads from config, CPU cores otherwise
    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();
    if let Some(workers) = cfg.server.workers {
        runtime_builder.worker_threads(workers);
    }
    let runtime = runtime_builder.build()?;

    runtime.block_on(async_main(cfg))
}

async fn async_main(cfg: Config) -> Result<(), Box<dyn std::error::Error>> {
    let addr = cfg.get_socket_addr()?;
    let state = build_state(&cfg);

    let listener = server::create_listener(addr)?;
    logger::log_server_start(&listener.local_addr()?, &cfg, &state.registry);

    server::start_server_loop(listener, state, server::shutdown_signal()).await?;
    tracing::info!("Server stopped");
    Ok(())
}
