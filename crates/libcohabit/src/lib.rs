mod error;
mod geo;
mod matching;
mod model;
mod questionnaire;

pub mod catalog;
pub mod personalize;
pub mod scoring;
pub mod store;

pub mod prelude {
  pub use crate::error::CohabitError;
  pub use crate::geo::{BELGIUM_CENTER, BRUSSELS, Coordinates, haversine, listing_coordinates, province_centroid};
  pub use crate::matching::{
    MatchOutcome, MatchState, ProfileOutcome, ProfileState, match_and_sort, match_profiles,
    facets::{BoolFacet, FacetCount, ListingFacets, ProfileFacets, listing_facets, profile_facets},
    filters::{ProfileTagFilters, ProfileUiFilters, RefinementFilters, RefinementWeights, TagFilters, TriState, UiFilters},
    predicates::{MIN_QUALITY_SCORE, quality_gate},
    sort::{SortContext, SortKey, sort_entries},
  };
  pub use crate::model::{
    AnswerValue, AvailabilityStatus, CriteriaScores, Evaluation, Listing, ListingEntry, ListingStatus, ListingTags, PersonalizedResult, ProfileCard, QuestionnaireAnswers, StatusView,
  };
  pub use crate::questionnaire::{MappedProfile, map_answers};

  pub use crate::catalog::{load_profiles, load_snapshot};
  pub use crate::personalize::{
    ExtractionOutcome, HttpScoringProvider, ListingSummary, MIN_EXTRACTED_ANSWERS, PersonalizationCache, SCORING_BATCH_SIZE, ScoringProvider, StaticScoringProvider, score_all,
    validate_extraction,
  };
  pub use crate::scoring::{adjusted_scores, refined_score};
  pub use crate::store::{JsonFileStore, MemoryStore, PreferenceStore, UserState, keys};
}
