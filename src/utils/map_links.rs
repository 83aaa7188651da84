// External map links shown next to a place (open in Google / Apple Maps)

use url::Url;

use crate::models::LatLng;

const GOOGLE_MAPS_SEARCH: &str = "https://www.google.com/maps/search/";
const APPLE_MAPS: &str = "https://maps.apple.com/";

pub fn google_maps_url(position: LatLng) -> Result<Url, url::ParseError> {
    let query = format!("{},{}", position.lat, position.lng);
    Url::parse_with_params(GOOGLE_MAPS_SEARCH, &[("api", "1"), ("query", query.as_str())])
}

pub fn apple_maps_url(title: &str, position: LatLng) -> Result<Url, url::ParseError> {
    let ll = format!("{},{}", position.lat, position.lng);
    Url::parse_with_params(APPLE_MAPS, &[("ll", ll.as_str()), ("q", title)])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn google_link_queries_coordinates() {
        let url = google_maps_url(LatLng::new(1.5, 2.25)).unwrap();
        assert_eq!(url.as_str(), "https://www.google.com/maps/search/?api=1&query=1.5%2C2.25");
    }

    #[test]
    fn apple_link_encodes_title() {
        let url = apple_maps_url("수원 교구", LatLng::new(1.5, 2.25)).unwrap();
        let q = url
            .query_pairs()
            .find(|(key, _)| key == "q")
            .map(|(_, value)| value.into_owned());

        assert_eq!(q.as_deref(), Some("수원 교구"));
        assert!(url.as_str().starts_with("https://maps.apple.com/?ll=1.5%2C2.25&q="));
        assert!(!url.as_str().contains(' '));
    }
}
