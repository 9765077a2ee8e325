//! How fetched photos get attached to places.

use crate::types::FoursquarePlace;

/// Chooses an illustrative photo for each place.
///
/// `photos` is the full list returned by the photo search, shared by every
/// place in one fetch. Returning `None` leaves the store without an image.
pub trait ImagePolicy: Send + Sync {
    fn image_for(&self, index: usize, place: &FoursquarePlace, photos: &[String])
        -> Option<String>;
}

/// Gives place *i* photo *i*.
///
/// Photos come from a generic "coffee cafe" search, so the picture is
/// decorative and does not show the store.
#[derive(Debug, Clone, Copy, Default)]
pub struct PositionalImages;

impl ImagePolicy for PositionalImages {
    fn image_for(
        &self,
        index: usize,
        _place: &FoursquarePlace,
        photos: &[String],
    ) -> Option<String> {
        photos.get(index).cloned()
    }
}
