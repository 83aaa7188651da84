use serde::Serialize;

use crate::context::Language;
use crate::models::{LatLng, MapViewProps, PlaceMarkerSpec};
use crate::utils::constants::{CATHOLIC_SITE_URL, DIOCESE_CENTER_TITLE, LISTING_ZOOM};
use crate::utils::map_links::{apple_maps_url, google_maps_url};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaceCategory {
    Region,
    Sanctuary,
}

impl PlaceCategory {
    pub fn as_path(&self) -> &'static str {
        match self {
            PlaceCategory::Region => "region",
            PlaceCategory::Sanctuary => "sanctuary",
        }
    }

    pub fn from_path(path: &str) -> Option<Self> {
        match path {
            "region" => Some(PlaceCategory::Region),
            "sanctuary" => Some(PlaceCategory::Sanctuary),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LocalizedText {
    pub kr: &'static str,
    pub en: &'static str,
}

impl LocalizedText {
    pub fn get(&self, language: Language) -> &'static str {
        match language {
            Language::Korean => self.kr,
            Language::English => self.en,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Place {
    pub id: &'static str,
    pub category: PlaceCategory,
    pub lat: f64,
    pub lng: f64,
    pub name: LocalizedText,
    pub summary: LocalizedText,
    pub address: LocalizedText,
}

pub const PLACES: &[Place] = &[
    Place {
        id: "suwon-diocese-center",
        category: PlaceCategory::Region,
        lat: 37.310444562914,
        lng: 126.98581065993,
        name: LocalizedText {
            kr: "천주교 수원교구청",
            en: "Catholic Diocese of Suwon Center",
        },
        summary: LocalizedText {
            kr: "수원교구 지역 안내의 중심 지점입니다.",
            en: "Central point for the Suwon Diocese regional map.",
        },
        address: LocalizedText {
            kr: "경기 수원시 장안구 이목로 39",
            en: "39 Imok-ro, Jangan-gu, Suwon-si, Gyeonggi-do",
        },
    },
    Place {
        id: "suwon-sanctuary-center",
        category: PlaceCategory::Sanctuary,
        lat: 37.310444562914,
        lng: 126.98581065993,
        name: LocalizedText {
            kr: "수원교구 성지 안내 중심",
            en: "Suwon Diocese Sanctuary Guide Center",
        },
        summary: LocalizedText {
            kr: "성지 지도를 위한 기준 지점입니다.",
            en: "Reference point for the sanctuary map.",
        },
        address: LocalizedText {
            kr: "경기 수원시 장안구 이목로 39",
            en: "39 Imok-ro, Jangan-gu, Suwon-si, Gyeonggi-do",
        },
    },
];

/// Detail page path, e.g. `/kr/region/places/suwon-diocese-center`
pub fn place_href(language: Language, category: PlaceCategory, place_id: &str) -> String {
    format!("/{}/{}/places/{}", language.locale(), category.as_path(), place_id)
}

impl Place {
    pub fn position(&self) -> LatLng {
        LatLng::new(self.lat, self.lng)
    }

    pub fn by_category(category: PlaceCategory) -> impl Iterator<Item = &'static Place> {
        PLACES.iter().filter(move |place| place.category == category)
    }

    pub fn find(id: &str) -> Option<&'static Place> {
        PLACES.iter().find(|place| place.id == id)
    }

    /// Marker for this place, linking to its localized detail page
    pub fn to_marker(&self, language: Language) -> PlaceMarkerSpec {
        let title = self.name.get(language).to_string();
        PlaceMarkerSpec {
            id: self.id.to_string(),
            lat: self.lat,
            lng: self.lng,
            label: Some(title.clone()),
            title,
            navigation_target: place_href(language, self.category, self.id),
        }
    }

    /// "Open in Google Maps / Apple Maps" links for the detail page
    pub fn links(&self, language: Language) -> Result<PlaceLinks, url::ParseError> {
        Ok(PlaceLinks {
            google: google_maps_url(self.position())?.to_string(),
            apple: apple_maps_url(self.name.get(language), self.position())?.to_string(),
            site: CATHOLIC_SITE_URL.to_string(),
            site_label: match language {
                Language::Korean => "사이트 연결",
                Language::English => "Website",
            },
        })
    }

    /// Text of the place detail page in one language
    pub fn localized(&self, language: Language) -> LocalizedPlace {
        LocalizedPlace {
            id: self.id,
            category: self.category,
            position: self.position(),
            title: self.name.get(language),
            description: self.summary.get(language),
            address: self.address.get(language),
            href: place_href(language, self.category, self.id),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalizedPlace {
    pub id: &'static str,
    pub category: PlaceCategory,
    pub position: LatLng,
    pub title: &'static str,
    pub description: &'static str,
    pub address: &'static str,
    pub href: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceLinks {
    pub google: String,
    pub apple: String,
    pub site: String,
    pub site_label: &'static str,
}

/// Listing-page map: the diocese office as anchor, one labelled marker per place of `category`
pub fn category_view_props(language: Language, category: PlaceCategory) -> MapViewProps {
    let mut props = MapViewProps::new(crate::config::CONFIG.map_config.default_center(), DIOCESE_CENTER_TITLE);
    props.marker_label = Some(
        match language {
            Language::Korean => "천주교 수원교구 중심",
            Language::English => "Suwon Diocese Center",
        }
        .to_string(),
    );
    props.zoom = LISTING_ZOOM;
    props.language = language;
    props.markers = Place::by_category(category)
        .map(|place| place.to_marker(language))
        .collect();
    props
}
