use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// `RUST_LOG` 未設定時使用的過濾規則
fn default_directives(verbose: bool) -> &'static str {
    if verbose {
        "gene_id_lookup=debug,info"
    } else {
        "gene_id_lookup=info"
    }
}

pub fn init_cli_logger(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(verbose)));

    // 報表走 stdout，日誌一律寫到 stderr
    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .compact();

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .init();
}
