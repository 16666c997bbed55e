use axum_test::TestServer;
use libcohabit::prelude::*;

use crate::api::{
  self,
  config::{Config, Env},
};


fn test_config() -> Config {
  Config {
    env: Env::Dev,
    listen_addr: "127.0.0.1:0".to_string(),
    data_dir: "./data".to_string(),
    state_path: "./data/state.json".to_string(),
    scoring_url: None,
    page_size: 30,
  }
}

pub fn listing(id: &str, listing_type: &str, price: Option<f64>, score: Option<f64>) -> ListingEntry {
  ListingEntry {
    listing: Listing {
      id: id.to_string(),
      title: format!("Habitat {id}"),
      description: "Habitat groupe avec jardin et potager".to_string(),
      location: Some("Ottignies".to_string()),
      province: Some("Brabant Wallon".to_string()),
      price_amount: price,
      listing_type: Some(listing_type.to_string()),
      date_scraped: "2026-01-01".to_string(),
      ..Default::default()
    },
    evaluation: score.map(|score| Evaluation {
      listing_id: id.to_string(),
      quality_score: Some(score),
      ..Default::default()
    }),
    ..Default::default()
  }
}

pub fn server_with(entries: Vec<ListingEntry>, profiles: Vec<ProfileCard>, scoring: StaticScoringProvider) -> TestServer {
  let app = api::routes(&test_config(), MemoryStore::default(), scoring, entries, profiles);

  TestServer::new(app)
}
