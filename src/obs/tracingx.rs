use tracing_subscriber::EnvFilter;

/// Diretiva padrão quando `RUST_LOG` não está definido.
pub const DEFAULT_DIRECTIVE: &str = "info";

pub fn filter_from_env() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE))
}

/// Subscriber só com `fmt` (sem OTel), para binários rodando sem collector.
pub fn init_fmt() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter_from_env())
        .with_target(false)
        .try_init();
}
