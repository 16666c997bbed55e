use crate::{
  matching::{MatchState, ProfileState, match_and_sort, match_profiles},
  model::{Evaluation, Listing, ListingEntry, ListingStatus, ListingTags, ProfileCard, StatusView},
  prelude::{RefinementFilters, SortKey, TagFilters, TriState, UiFilters},
};

fn entry(id: &str, listing_type: &str, price: Option<f64>, score: Option<f64>) -> ListingEntry {
  ListingEntry {
    listing: Listing {
      id: id.to_string(),
      title: format!("Habitat {id}"),
      description: "Habitat groupe avec jardin".to_string(),
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

fn collection() -> Vec<ListingEntry> {
  vec![
    entry("rental", "offre-location", Some(650.0), Some(80.0)),
    entry("sale", "offre-vente", Some(250_000.0), Some(60.0)),
    entry("group", "creation-groupe", None, Some(45.0)),
    entry("junk", "spam-category", Some(100.0), Some(90.0)),
    entry("low", "offre-location", Some(400.0), Some(5.0)),
    entry("unrated", "offre-location", Some(500.0), None),
  ]
}

fn ids(entries: &[ListingEntry]) -> Vec<&str> {
  entries.iter().map(|entry| entry.listing.id.as_str()).collect()
}

#[test]
fn default_state_applies_only_the_gate() {
  let outcome = match_and_sort(&collection(), &MatchState::default());

  // junk, low and unrated are gated out; the rest sort by score descending
  assert_eq!(ids(&outcome.entries), vec!["rental", "sale", "group"]);
  assert_eq!(outcome.gated_total, 3);
}

#[test]
fn adding_filters_only_narrows() {
  let entries = collection();
  let baseline = match_and_sort(&entries, &MatchState::default()).entries.len();

  let narrowed = match_and_sort(
    &entries,
    &MatchState {
      ui: UiFilters {
        price_max: Some(700.0),
        include_null_price: false,
        ..Default::default()
      },
      ..Default::default()
    },
  );

  assert!(narrowed.entries.len() <= baseline);
  assert_eq!(ids(&narrowed.entries), vec!["rental"]);
}

#[test]
fn view_runs_before_the_gate() {
  let mut entries = collection();
  entries[0].status = ListingStatus::Archived;

  let outcome = match_and_sort(&entries, &MatchState::default());

  assert_eq!(ids(&outcome.entries), vec!["sale", "group"]);

  let archived = match_and_sort(
    &entries,
    &MatchState {
      view: StatusView::Archived,
      ..Default::default()
    },
  );

  assert_eq!(ids(&archived.entries), vec!["rental"]);
}

#[test]
fn facets_reflect_the_gated_set_not_the_filters() {
  let entries = collection();

  let filtered = match_and_sort(
    &entries,
    &MatchState {
      ui: UiFilters {
        listing_types: vec!["offre-vente".to_string()],
        ..Default::default()
      },
      ..Default::default()
    },
  );

  assert_eq!(ids(&filtered.entries), vec!["sale"]);

  // the filter removed rentals from the results, not from the facet counts
  let rentals = filtered.facets.listing_types.iter().find(|facet| facet.value == "offre-location");

  assert_eq!(rentals.map(|facet| facet.count), Some(1));
}

#[test]
fn refinement_activates_adjusted_scores() {
  let mut entries = collection();
  entries[0].evaluation = Some(Evaluation {
    listing_id: "rental".to_string(),
    quality_score: Some(80.0),
    criteria_scores: Some(crate::model::CriteriaScores {
      rental_price: 9.0,
      location_brussels: 9.0,
      ..Default::default()
    }),
    ..Default::default()
  });

  let outcome = match_and_sort(
    &entries,
    &MatchState {
      refinement: Some(RefinementFilters::default()),
      ..Default::default()
    },
  );

  assert!(outcome.adjusted.contains_key("rental"));
  assert!(!outcome.adjusted.contains_key("sale"), "no criteria, no refined score");
}

#[test]
fn refinement_price_cap_spares_null_prices() {
  let outcome = match_and_sort(
    &collection(),
    &MatchState {
      refinement: Some(RefinementFilters {
        max_price: Some(700.0),
        ..Default::default()
      }),
      ..Default::default()
    },
  );

  // the sale listing breaks the cap, the unpriced group project does not
  assert_eq!(ids(&outcome.entries), vec!["rental", "group"]);
}

#[test]
fn tag_filters_compose_with_ui_filters() {
  let mut entries = collection();
  entries[0].tags = Some(ListingTags {
    pets_allowed: Some(true),
    ..Default::default()
  });
  entries[1].tags = Some(ListingTags {
    pets_allowed: Some(false),
    ..Default::default()
  });

  let outcome = match_and_sort(
    &entries,
    &MatchState {
      tags: TagFilters {
        pets_allowed: TriState::Yes,
        ..Default::default()
      },
      ..Default::default()
    },
  );

  assert_eq!(ids(&outcome.entries), vec!["rental"]);
}

#[test]
fn sort_key_reorders_the_same_set() {
  let entries = collection();

  let by_score = match_and_sort(&entries, &MatchState::default());
  let by_price = match_and_sort(
    &entries,
    &MatchState {
      sort: SortKey::Price,
      ..Default::default()
    },
  );

  assert_eq!(by_score.entries.len(), by_price.entries.len());
  assert_eq!(ids(&by_price.entries), vec!["rental", "sale", "group"]);
}

#[test]
fn profile_pipeline_has_no_gate() {
  let profiles = vec![
    ProfileCard {
      id: "p1".to_string(),
      display_name: "Claire".to_string(),
      ..Default::default()
    },
    ProfileCard {
      id: "p2".to_string(),
      display_name: "Benoit".to_string(),
      ..Default::default()
    },
  ];

  let outcome = match_profiles(&profiles, &ProfileState::default());

  assert_eq!(outcome.profiles.len(), 2);

  let searched = match_profiles(
    &profiles,
    &ProfileState {
      search: "claire".to_string(),
      ..Default::default()
    },
  );

  assert_eq!(searched.profiles.len(), 1);
  assert_eq!(searched.profiles[0].id, "p1");
}
