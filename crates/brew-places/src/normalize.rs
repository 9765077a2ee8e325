use brew_core::CoffeeStore;

use crate::types::FoursquarePlace;

/// Maps a Foursquare place onto the store shape.
///
/// Missing address and neighborhood become empty strings; multiple
/// neighborhoods are joined with `", "`.
#[must_use]
pub fn normalize_place(place: FoursquarePlace, img_url: Option<String>) -> CoffeeStore {
    let location = place.location.unwrap_or_default();
    CoffeeStore {
        id: place.fsq_id,
        name: place.name,
        address: location.formatted_address.unwrap_or_default(),
        neighbourhood: location.neighborhood.join(", "),
        img_url: img_url.unwrap_or_default(),
        voting: 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FoursquareLocation;

    #[test]
    fn normalize_place_maps_location_fields() {
        let place = FoursquarePlace {
            fsq_id: "4ac5".to_string(),
            name: "Flat White".to_string(),
            location: Some(FoursquareLocation {
                formatted_address: Some("17 Berwick St, London".to_string()),
                neighborhood: vec!["Soho".to_string(), "West End".to_string()],
            }),
        };
        let store = normalize_place(place, Some("https://img/1.jpg".to_string()));
        assert_eq!(store.id, "4ac5");
        assert_eq!(store.address, "17 Berwick St, London");
        assert_eq!(store.neighbourhood, "Soho, West End");
        assert_eq!(store.img_url, "https://img/1.jpg");
        assert_eq!(store.voting, 0);
    }

    #[test]
    fn normalize_place_defaults_missing_location_to_empty() {
        let place = FoursquarePlace {
            fsq_id: "4ac6".to_string(),
            name: "Kiosk".to_string(),
            location: None,
        };
        let store = normalize_place(place, None);
        assert_eq!(store.address, "");
        assert_eq!(store.neighbourhood, "");
        assert_eq!(store.img_url, "");
    }
}
