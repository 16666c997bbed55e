mod api;
mod trace;

#[cfg(test)]
mod tests;

use libcohabit::{
  catalog,
  personalize::{HttpScoringProvider, ScoringProvider},
  store::{JsonFileStore, PreferenceStore},
};
use tokio::signal;

use crate::api::config::Config;

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  let config = Config::from_env()?;
  let store = JsonFileStore::open(&config.state_path);
  let scoring = HttpScoringProvider::new(config.scoring_url.clone());

  run(config, store, scoring).await
}

async fn run<S: PreferenceStore, P: ScoringProvider>(config: Config, store: S, scoring: P) -> anyhow::Result<()> {
  let _guard = trace::init_tracing(&config, std::io::stdout());

  let entries = catalog::load_snapshot(&config.data_dir)?;
  let profiles = catalog::load_profiles(&config.data_dir);

  let app = api::routes(&config, store, scoring, entries, profiles);
  let listener = tokio::net::TcpListener::bind(&config.listen_addr).await.expect("could not create listener");

  tracing::info!("listening on {}", listener.local_addr()?.to_string());

  axum::serve(listener, app).with_graceful_shutdown(shutdown()).await.expect("could not start app");

  Ok(())
}

async fn shutdown() {
  let ctrl_c = async {
    signal::ctrl_c().await.expect("failed to install ^C handler");
  };

  let terminate = async {
    signal::unix::signal(signal::unix::SignalKind::terminate())
      .expect("failed to install terminate signal handler")
      .recv()
      .await;
  };

  tokio::select! {
      () = ctrl_c => tracing::info!("received ^C, initiating shutdown"),
      () = terminate => tracing::info!("received terminate signal, initiating shutdown"),
  }
}
