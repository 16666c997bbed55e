use crate::{
  matching::filters::{RefinementFilters, RefinementWeights, TagFilters, TriState},
  model::QuestionnaireAnswers,
  questionnaire::{MappedProfile, get_arr, get_num, get_str, regions},
};

fn push_unique(list: &mut Vec<String>, value: &str) {
  if !list.iter().any(|existing| existing == value) {
    list.push(value.to_string());
  }
}

fn strings(values: &[&str]) -> Vec<String> {
  values.iter().map(|value| value.to_string()).collect()
}

/// Turn raw questionnaire answers into criterion weights, hard filters and
/// tag filters. Deterministic: the same answers always produce the same
/// profile. An empty answer set produces an inactive profile with all
/// defaults.
pub fn map_answers(answers: &QuestionnaireAnswers) -> MappedProfile {
  let mut weights = RefinementWeights::default();
  let mut filters = RefinementFilters::default();
  let mut tag_filters = TagFilters::default();
  let mut summary: Vec<String> = vec![];

  if answers.is_empty() {
    return MappedProfile {
      weights,
      filters,
      tag_filters,
      is_active: false,
      summary,
    };
  }

  let most_important = get_str(answers, "single_most_important");

  match most_important {
    Some("budget") => {
      weights.rental_price += 1.0;
      summary.push("Priorite : budget".to_string());
    }

    Some("location") => {
      weights.location_brussels += 1.0;
      summary.push("Priorite : emplacement".to_string());
    }

    Some("community_spirit") => {
      weights.community_meals += 0.5;
      weights.community_size_and_maturity += 0.5;
      weights.common_projects += 0.5;
      summary.push("Priorite : esprit communautaire".to_string());
    }

    Some("values") => {
      weights.values_alignment += 1.0;
      summary.push("Priorite : valeurs partagees".to_string());
    }

    Some("practical") => {
      weights.unit_type += 0.5;
      weights.parking += 0.5;
      summary.push("Priorite : logement pratique".to_string());
    }

    Some("health") => {
      weights.near_hospital += 1.5;
      summary.push("Priorite : proximite des soins".to_string());
    }

    _ => {}
  }

  let spiritual = get_str(answers, "spiritual_importance");

  match spiritual {
    Some("central") => {
      weights.spiritual_alignment += 1.5;
      weights.large_hall_biodanza += 1.5;
      weights.values_alignment += 0.5;
    }

    Some("welcome") => {
      weights.spiritual_alignment += 0.5;
      weights.large_hall_biodanza += 0.3;
    }

    Some("prefer_without") => {
      weights.spiritual_alignment = 0.2;
      weights.large_hall_biodanza = 0.2;
    }

    _ => {}
  }

  let brussels = get_str(answers, "brussels_proximity");

  match brussels {
    Some("in_brussels") => weights.location_brussels += 2.0,
    Some("very_close") => weights.location_brussels += 1.5,
    Some("somewhat") => weights.location_brussels += 0.5,
    Some("not_important") => weights.location_brussels = 0.3,
    _ => {}
  }

  let health = get_str(answers, "health_proximity");

  match health {
    Some("essential") => weights.near_hospital += 1.5,
    Some("preferable") => weights.near_hospital += 0.5,
    Some("not_needed") => weights.near_hospital = 0.3,
    _ => {}
  }

  let meals = get_str(answers, "shared_meals_importance");

  match meals {
    Some("essential") => {
      weights.community_meals += 1.5;
      tag_filters.shared_meals = strings(&["daily", "weekly"]);
    }

    Some("nice") => weights.community_meals += 0.5,
    Some("not_interested") => weights.community_meals = 0.3,
    _ => {}
  }

  if let Some(involvement) = get_num(answers, "involvement_level") {
    if involvement >= 4.0 {
      weights.common_projects += 0.5;
      weights.community_meals += 0.3;
    } else if involvement <= 2.0 {
      weights.common_projects = (weights.common_projects - 0.3).max(0.3);
      weights.community_meals = (weights.community_meals - 0.3).max(0.3);
    }
  }

  match get_str(answers, "charter_preference") {
    Some("essential") => {
      weights.charter_openness += 1.0;
      tag_filters.has_charter = TriState::Yes;
    }

    Some("good_idea") => weights.charter_openness += 0.3,
    Some("informal") => weights.charter_openness = 0.5,
    _ => {}
  }

  let parking = get_arr(answers, "parking_needs");

  if !parking.is_empty() {
    if parking.iter().any(|need| need == "car" || need == "motorcycle") {
      weights.parking += 1.0;
    } else {
      weights.parking = 0.3;
    }
  }

  if let Some(budget) = get_num(answers, "budget_max") {
    if budget <= 600.0 {
      weights.rental_price += 1.0;
    } else if budget <= 800.0 {
      weights.rental_price += 0.5;
    } else if budget >= 1200.0 {
      weights.rental_price = 0.3;
    }

    // A tighter margin when budget is the declared priority.
    let buffer = if most_important == Some("budget") { 1.05 } else { 1.15 };
    let max_price = (budget * buffer).round();

    filters.max_price = Some(max_price);
    summary.push(format!("Budget max: {max_price}€"));
  }

  let unit_type = get_str(answers, "unit_type").filter(|answer| *answer != "flexible");

  match unit_type {
    Some("studio") => {
      weights.unit_type += 0.5;
      tag_filters.unit_types = strings(&["studio"]);
    }

    Some("1_bedroom") => {
      weights.unit_type += 0.5;
      tag_filters.unit_types = strings(&["apartment"]);
    }

    Some("2_bedrooms") => {
      weights.unit_type += 1.0;
      tag_filters.unit_types = strings(&["apartment", "house"]);
    }

    Some("small_house") => {
      weights.unit_type += 1.0;
      tag_filters.unit_types = strings(&["house"]);
    }

    _ => {}
  }

  match get_str(answers, "tenure_type") {
    Some("rental") => filters.listing_types_include = strings(&["offre-location", "creation-groupe"]),
    Some("purchase") => filters.listing_types_include = strings(&["offre-vente", "creation-groupe"]),
    Some("either") => filters.listing_types_include = strings(&["offre-location", "offre-vente", "creation-groupe"]),
    _ => {}
  }

  let preferred = get_arr(answers, "preferred_regions");

  if !preferred.is_empty() && !preferred.iter().any(|region| region == "no_preference") {
    let mut provinces: Vec<String> = vec![];

    for region in preferred {
      for province in regions::region_provinces(region) {
        push_unique(&mut provinces, province);
      }
    }

    if !provinces.is_empty() {
      summary.push(format!("Regions: {}", provinces.join(", ")));
      filters.locations_include = provinces;
    }
  }

  if let Some(avoid) = get_str(answers, "locations_avoid")
    && !avoid.trim().is_empty()
  {
    for province in regions::scan_provinces(avoid) {
      push_unique(&mut filters.locations_exclude, &province);
    }
  }

  match get_str(answers, "setting_preference") {
    Some("rural") => tag_filters.environments = strings(&["rural"]),
    Some("semi_rural") => tag_filters.environments = strings(&["rural", "suburban"]),
    Some("urban_green") => tag_filters.environments = strings(&["suburban", "urban"]),
    Some("urban") => tag_filters.environments = strings(&["urban"]),
    _ => {}
  }

  let practical = get_arr(answers, "practical_needs");

  if practical.iter().any(|need| need == "pet_friendly") {
    tag_filters.pets_allowed = TriState::Yes;
  }

  if practical.iter().any(|need| need == "garden_access") {
    push_unique(&mut tag_filters.shared_spaces, "garden");
    push_unique(&mut tag_filters.shared_spaces, "vegetable_garden");
  }

  let activities = get_arr(answers, "community_activities");

  if activities.iter().any(|activity| activity == "garden") {
    push_unique(&mut tag_filters.shared_spaces, "vegetable_garden");
    push_unique(&mut tag_filters.shared_spaces, "garden");
  }

  if activities.iter().any(|activity| activity == "workshops" || activity == "diy") {
    push_unique(&mut tag_filters.shared_spaces, "workshop");
  }

  if activities.iter().any(|activity| activity == "spiritual") {
    weights.spiritual_alignment += 0.5;
    weights.large_hall_biodanza += 0.3;
  }

  if activities.iter().any(|activity| activity == "shared_meals") {
    weights.community_meals += 0.3;
  }

  if activities.iter().any(|activity| activity == "none") {
    weights.common_projects = (weights.common_projects - 0.5).max(0.3);
    weights.community_meals = (weights.community_meals - 0.3).max(0.3);
  }

  if get_str(answers, "community_size").is_some_and(|size| size != "no_preference") {
    weights.community_size_and_maturity += 0.5;
  }

  let values = get_arr(answers, "core_values");

  if values.iter().any(|value| value == "ecology") {
    weights.values_alignment += 0.3;
  }

  if values.iter().any(|value| value == "solidarity") {
    weights.values_alignment += 0.3;
  }

  if values.iter().any(|value| value == "spirituality") {
    weights.spiritual_alignment += 0.5;
    weights.large_hall_biodanza += 0.3;
  }

  if values.iter().any(|value| value == "openness") {
    weights.charter_openness += 0.3;
  }

  if values.iter().any(|value| value == "creativity") {
    weights.common_projects += 0.3;
  }

  let motivation = get_arr(answers, "motivation");

  if motivation.iter().any(|reason| reason == "valeurs") {
    weights.values_alignment += 0.3;
  }

  if motivation.iter().any(|reason| reason == "economique") {
    weights.rental_price += 0.5;
  }

  if motivation.iter().any(|reason| reason == "ecologique") {
    weights.values_alignment += 0.3;
  }

  if motivation.iter().any(|reason| reason == "projets_communs") {
    weights.common_projects += 0.5;
  }

  if motivation.iter().any(|reason| reason == "entraide") {
    weights.community_size_and_maturity += 0.3;
  }

  if motivation.iter().any(|reason| reason == "securite") {
    weights.near_hospital += 0.3;
  }

  let dealbreakers = get_arr(answers, "dealbreakers");

  if dealbreakers.iter().any(|item| item == "language_barrier") {
    push_unique(&mut filters.locations_exclude, "Flandre");
  }

  if dealbreakers.iter().any(|item| item == "pet_ban") {
    tag_filters.pets_allowed = TriState::Yes;
  }

  if dealbreakers.iter().any(|item| item == "too_isolated") && tag_filters.environments.is_empty() {
    tag_filters.environments = strings(&["suburban", "urban"]);
  }

  if dealbreakers.iter().any(|item| item == "too_chaotic") {
    weights.charter_openness += 0.5;
  }

  if dealbreakers.iter().any(|item| item == "too_rigid") {
    weights.charter_openness = (weights.charter_openness - 0.5).max(0.3);
  }

  if dealbreakers.iter().any(|item| item == "no_accessibility") {
    weights.unit_type += 0.3;
  }

  weights.clamp_all();

  match brussels {
    Some("in_brussels") => summary.push("Dans Bruxelles".to_string()),
    Some("very_close") => summary.push("Proche Bruxelles (30 min)".to_string()),
    Some("somewhat") => summary.push("30-45 min de Bruxelles".to_string()),
    Some("not_important") => summary.push("Distance indifferente".to_string()),
    _ => {}
  }

  if spiritual == Some("central") {
    summary.push("Spiritualite importante".to_string());
  }

  if health == Some("essential") {
    summary.push("Proximite soins essentielle".to_string());
  }

  if meals == Some("essential") {
    summary.push("Repas partages importants".to_string());
  }

  match unit_type {
    Some("studio") => summary.push("Logement: Studio".to_string()),
    Some("1_bedroom") => summary.push("Logement: 1 chambre".to_string()),
    Some("2_bedrooms") => summary.push("Logement: 2 chambres".to_string()),
    Some("small_house") => summary.push("Logement: Petite maison".to_string()),
    _ => {}
  }

  if !filters.locations_exclude.is_empty() {
    summary.push(format!("Exclut: {}", filters.locations_exclude.join(", ")));
  }

  MappedProfile {
    weights,
    filters,
    tag_filters,
    is_active: true,
    summary,
  }
}
