use cinematch::{
    api::{create_router, AppState},
    config::Config,
    services::{ingestion, report, Predictor},
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("cinematch=info,tower_http=info")),
        )
        .init();

    let config = Config::from_env()?;
    let matrix = ingestion::load_ratings_matrix(&config.ratings_path)?;

    if config.serve {
        let state = AppState::from_config(matrix, &config);
        let app = create_router(state);

        let listener = tokio::net::TcpListener::bind(config.bind_address()).await?;
        tracing::info!(address = %config.bind_address(), "Server listening");
        axum::serve(listener, app).await?;
        return Ok(());
    }

    let set = Predictor::new(&matrix).recommend(config.target_user, config.top_n)?;
    report::write_html_report(&set, &config.report_path, config.score_precision)?;

    println!(
        "HTML file '{}' generated successfully. Open it in a browser to view.",
        config.report_path
    );

    Ok(())
}
