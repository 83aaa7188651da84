use std::collections::HashMap;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

/// Display language of the site. The Naver SDK is loaded once per language.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
pub enum Language {
    #[default]
    #[serde(rename = "ko", alias = "kr")]
    Korean,
    #[serde(rename = "en")]
    English,
}

impl Language {
    /// Tag understood by the SDK `language` query parameter
    pub fn sdk_tag(&self) -> &'static str {
        match self {
            Language::Korean => "ko",
            Language::English => "en",
        }
    }

    /// Locale segment used in site paths (`/kr/...`, `/en/...`)
    pub fn locale(&self) -> &'static str {
        match self {
            Language::Korean => "kr",
            Language::English => "en",
        }
    }

    pub fn from_locale(locale: &str) -> Self {
        match locale {
            "en" => Language::English,
            _ => Language::Korean,
        }
    }
}

#[derive(Clone)]
pub struct LanguageContext {
    pub language: Language,
    pub texts: Rc<HashMap<&'static str, &'static str>>,
}

impl PartialEq for LanguageContext {
    fn eq(&self, other: &Self) -> bool {
        self.language == other.language
    }
}

impl LanguageContext {
    pub fn new(language: Language) -> Self {
        let mut texts = HashMap::new();

        match language {
            Language::Korean => {
                texts.insert("current_location", "현재 위치");
                texts.insert("my_location", "내 위치");
                texts.insert("move_to_current_location", "현재 위치로 이동");
                texts.insert("locating", "위치 확인 중");
                texts.insert("map_loading", "네이버 지도 불러오는 중...");
                texts.insert("map_unavailable", "지도를 불러올 수 없습니다.");
                texts.insert("missing_client_id", "`NAVER_CLIENT_ID`가 설정되지 않았습니다.");
            }
            Language::English => {
                texts.insert("current_location", "Current Location");
                texts.insert("my_location", "My Location");
                texts.insert("move_to_current_location", "Move to current location");
                texts.insert("locating", "Locating");
                texts.insert("map_loading", "Loading Naver Map...");
                texts.insert("map_unavailable", "The map could not be loaded.");
                texts.insert("missing_client_id", "`NAVER_CLIENT_ID` is not configured.");
            }
        }

        Self { language, texts: Rc::new(texts) }
    }

    pub fn get(&self, key: &str) -> String {
        self.texts
            .get(key)
            .map(|text| text.to_string())
            .unwrap_or_else(|| key.to_string())
    }
}
