use crate::model::Listing;

const EARTH_RADIUS_KM: f64 = 6371.0;

#[derive(Clone, Copy, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct Coordinates {
  pub lat: f64,
  pub lng: f64,
}

/// Default reference point for distance sorting (Brussels).
pub const BRUSSELS: Coordinates = Coordinates { lat: 50.8503, lng: 4.3517 };

pub const BELGIUM_CENTER: Coordinates = Coordinates { lat: 50.5039, lng: 4.4699 };

// Approximate centroids for the provinces listings are bucketed into.
const PROVINCE_CENTROIDS: &[(&str, Coordinates)] = &[
  ("brabant wallon", Coordinates { lat: 50.6694, lng: 4.6154 }),
  ("bruxelles", Coordinates { lat: 50.8503, lng: 4.3517 }),
  ("namur", Coordinates { lat: 50.4674, lng: 4.8720 }),
  ("hainaut", Coordinates { lat: 50.4542, lng: 3.9566 }),
  ("liege", Coordinates { lat: 50.6326, lng: 5.5797 }),
  ("luxembourg", Coordinates { lat: 49.9307, lng: 5.3625 }),
  ("flandre", Coordinates { lat: 51.0500, lng: 3.7303 }),
];

/// Great-circle distance between two points, in kilometers.
pub fn haversine(from: Coordinates, to: Coordinates) -> f64 {
  let dlat = (to.lat - from.lat).to_radians();
  let dlng = (to.lng - from.lng).to_radians();

  let a = (dlat / 2.0).sin().powi(2) + from.lat.to_radians().cos() * to.lat.to_radians().cos() * (dlng / 2.0).sin().powi(2);

  2.0 * EARTH_RADIUS_KM * a.sqrt().atan2((1.0 - a).sqrt())
}

/// Look up a province centroid, tolerating case and accent variations
/// ("Liège", "liege" and "LIEGE" all resolve to the same point).
pub fn province_centroid(name: &str) -> Option<Coordinates> {
  let folded = any_ascii::any_ascii(name).to_lowercase();

  PROVINCE_CENTROIDS.iter().find(|(province, _)| folded.contains(province)).map(|(_, point)| *point)
}

/// Resolve a listing to coordinates: explicit coordinates win, otherwise the
/// province (or location) centroid, otherwise nothing.
pub fn listing_coordinates(listing: &Listing) -> Option<Coordinates> {
  if let (Some(lat), Some(lng)) = (listing.latitude, listing.longitude) {
    return Some(Coordinates { lat, lng });
  }

  listing
    .province
    .as_deref()
    .and_then(province_centroid)
    .or_else(|| listing.location.as_deref().and_then(province_centroid))
}

#[cfg(test)]
mod tests {
  use float_cmp::approx_eq;

  use super::{BRUSSELS, Coordinates, haversine, listing_coordinates, province_centroid};
  use crate::model::Listing;

  #[test]
  fn haversine_zero_for_same_point() {
    assert!(approx_eq!(f64, haversine(BRUSSELS, BRUSSELS), 0.0, epsilon = 1e-9));
  }

  #[test]
  fn haversine_brussels_namur() {
    let namur = Coordinates { lat: 50.4674, lng: 4.8720 };
    let distance = haversine(BRUSSELS, namur);

    assert!(distance > 50.0 && distance < 62.0, "unexpected distance: {distance}");
  }

  #[test]
  fn haversine_is_symmetric() {
    let liege = Coordinates { lat: 50.6326, lng: 5.5797 };

    assert!(approx_eq!(f64, haversine(BRUSSELS, liege), haversine(liege, BRUSSELS), epsilon = 1e-9));
  }

  #[test]
  fn centroid_lookup_ignores_case_and_accents() {
    assert_eq!(province_centroid("Liège"), province_centroid("liege"));
    assert!(province_centroid("Brabant Wallon").is_some());
    assert!(province_centroid("Atlantis").is_none());
  }

  #[test]
  fn explicit_coordinates_win_over_centroid() {
    let listing = Listing {
      latitude: Some(50.0),
      longitude: Some(4.0),
      province: Some("Namur".to_string()),
      ..Default::default()
    };

    assert_eq!(listing_coordinates(&listing), Some(Coordinates { lat: 50.0, lng: 4.0 }));
  }

  #[test]
  fn centroid_fallback_through_location() {
    let listing = Listing {
      location: Some("Ottignies, Brabant wallon".to_string()),
      ..Default::default()
    };

    assert!(listing_coordinates(&listing).is_some());

    let listing = Listing::default();

    assert!(listing_coordinates(&listing).is_none());
  }
}
