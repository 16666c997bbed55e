use std::sync::LazyLock;

use aho_corasick::{AhoCorasick, AhoCorasickBuilder, MatchKind};
use any_ascii::any_ascii;

/// Province names behind each multiple-choice region answer. Flemish Brabant
/// is folded into the single Flanders bucket the scrapers use.
const REGION_PROVINCES: &[(&str, &[&str])] = &[
  ("bruxelles", &["Bruxelles"]),
  ("brabant_wallon", &["Brabant Wallon"]),
  ("hainaut", &["Hainaut"]),
  ("liege", &["Liège"]),
  ("namur", &["Namur"]),
  ("luxembourg", &["Luxembourg"]),
  ("brabant_flamand", &["Flandre"]),
  ("flandre", &["Flandre"]),
];

// Tokens recognized in free-text answers, with the province each one maps to.
const REGION_TOKENS: &[(&str, &str)] = &[
  ("flandre", "Flandre"),
  ("flamand", "Flandre"),
  ("flamande", "Flandre"),
  ("bruxelles", "Bruxelles"),
  ("brabant wallon", "Brabant Wallon"),
  ("hainaut", "Hainaut"),
  ("liege", "Liège"),
  ("namur", "Namur"),
  ("luxembourg", "Luxembourg"),
];

static SCANNER: LazyLock<AhoCorasick> = LazyLock::new(|| {
  AhoCorasickBuilder::new()
    .match_kind(MatchKind::LeftmostLongest)
    .ascii_case_insensitive(true)
    .build(REGION_TOKENS.iter().map(|(token, _)| *token))
    .unwrap()
});

/// Provinces selected by a region answer id; unknown ids map to nothing.
pub(crate) fn region_provinces(region: &str) -> &'static [&'static str] {
  REGION_PROVINCES.iter().find(|(id, _)| *id == region).map(|(_, provinces)| *provinces).unwrap_or_default()
}

/// Scan free text for province mentions. Accents are folded before matching
/// so "Liège" and "liege" both hit; the result is deduplicated and ordered by
/// the token table.
pub(crate) fn scan_provinces(text: &str) -> Vec<String> {
  let folded = any_ascii(text).to_lowercase();
  let matched = SCANNER.find_iter(&folded).map(|hit| hit.pattern().as_usize()).collect::<Vec<_>>();
  let mut found: Vec<&str> = vec![];

  for (index, (_, province)) in REGION_TOKENS.iter().enumerate() {
    if matched.contains(&index) && !found.contains(province) {
      found.push(province);
    }
  }

  found.into_iter().map(str::to_string).collect()
}
