use engine::{LoopConfig, Simulation};
use tracing::info;
use tracing_subscriber::EnvFilter;

use super::court::PongSimulation;

pub(crate) struct AppWiring {
    pub(crate) config: LoopConfig,
    pub(crate) simulation: Box<dyn Simulation>,
}

pub(crate) fn build_app() -> AppWiring {
    init_tracing();
    info!("=== Pong Startup ===");

    let config = LoopConfig::default();
    let simulation = PongSimulation::new(config.window_width, config.window_height);

    AppWiring {
        config,
        simulation: Box::new(simulation),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_names(true)
        .compact()
        .init();
}
