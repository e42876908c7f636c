//! Display languages and the translation catalog
//!
//! Every user-visible string lives here, one catalog per supported
//! language. Components take a `Language` and look strings up through
//! [`Translations::for_language`]; unknown language tags fall back to
//! English.

use serde::{Deserialize, Serialize};

/// Supported display languages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// English
    #[default]
    En,
    /// Simplified Chinese
    Zh,
}

impl Language {
    /// Language code sent to the weather and geocoding endpoints
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Zh => "zh",
        }
    }

    /// Parse a language tag, accepting region-qualified forms like
    /// "zh-CN". Returns `None` for unknown tags.
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        let tag = tag.trim();
        if tag.eq_ignore_ascii_case("en") || tag.to_ascii_lowercase().starts_with("en-") {
            Some(Language::En)
        } else if tag.eq_ignore_ascii_case("zh") || tag.to_ascii_lowercase().starts_with("zh-") {
            Some(Language::Zh)
        } else {
            None
        }
    }
}

/// One catalog of user-visible strings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Translations {
    pub app_title: &'static str,
    pub current_location: &'static str,
    pub search_placeholder: &'static str,
    pub save_location: &'static str,
    pub saved_locations: &'static str,
    pub no_saved_locations: &'static str,
    pub no_saved_locations_desc: &'static str,
    pub hourly_forecast: &'static str,
    pub daily_forecast: &'static str,
    pub humidity: &'static str,
    pub wind: &'static str,
    pub sunrise: &'static str,
    pub sunset: &'static str,
    pub search_error: &'static str,
    pub location_error: &'static str,
    pub location_not_supported: &'static str,
    pub location_saved: &'static str,
    pub location_saved_desc: &'static str,
    pub already_saved: &'static str,
    pub already_saved_desc: &'static str,
    pub location_removed: &'static str,
    pub location_removed_desc: &'static str,
    pub select_location: &'static str,
    pub weather_fetch_error: &'static str,
    pub location_not_found: &'static str,
    pub empty_state_message: &'static str,
    pub loading: &'static str,
    pub wind_unit: &'static str,
    pub feels_like: &'static str,
    pub language: &'static str,
}

static EN: Translations = Translations {
    app_title: "SkyView Weather",
    current_location: "Current Location",
    search_placeholder: "Search location...",
    save_location: "Save",
    saved_locations: "Saved Locations",
    no_saved_locations: "No saved locations yet",
    no_saved_locations_desc: "Search for a location and save it to see it here.",
    hourly_forecast: "Hourly Forecast",
    daily_forecast: "5-Day Forecast",
    humidity: "Humidity",
    wind: "Wind",
    sunrise: "Sunrise",
    sunset: "Sunset",
    search_error: "Search Error",
    location_error: "Location Error",
    location_not_supported: "Geolocation Not Supported",
    location_saved: "Location Saved",
    location_saved_desc: "has been added to your saved locations.",
    already_saved: "Already Saved",
    already_saved_desc: "is already in your saved locations.",
    location_removed: "Location Removed",
    location_removed_desc: "has been removed from your saved locations.",
    select_location: "Select a location",
    weather_fetch_error: "Failed to fetch weather data. Please try again.",
    location_not_found: "not found. Please try a different search term.",
    empty_state_message: "Search for a location or use your current location to see weather information",
    loading: "Loading...",
    wind_unit: "m/s",
    feels_like: "Feels like",
    language: "Language",
};

static ZH: Translations = Translations {
    app_title: "天气预报",
    current_location: "当前位置",
    search_placeholder: "搜索地点...",
    save_location: "保存",
    saved_locations: "已保存地点",
    no_saved_locations: "暂无保存的地点",
    no_saved_locations_desc: "搜索并保存地点以在此处查看。",
    hourly_forecast: "小时预报",
    daily_forecast: "5天预报",
    humidity: "湿度",
    wind: "风速",
    sunrise: "日出",
    sunset: "日落",
    search_error: "搜索错误",
    location_error: "位置错误",
    location_not_supported: "不支持地理位置",
    location_saved: "地点已保存",
    location_saved_desc: "已添加到您的保存地点。",
    already_saved: "已保存",
    already_saved_desc: "已在您的保存地点中。",
    location_removed: "地点已移除",
    location_removed_desc: "已从您的保存地点中移除。",
    select_location: "选择地点",
    weather_fetch_error: "获取天气数据失败。请重试。",
    location_not_found: "未找到。请尝试其他搜索词。",
    empty_state_message: "搜索地点或使用当前位置查看天气信息",
    loading: "加载中...",
    wind_unit: "米/秒",
    feels_like: "体感温度",
    language: "语言",
};

impl Translations {
    /// Catalog for the given language
    #[must_use]
    pub fn for_language(language: Language) -> &'static Translations {
        match language {
            Language::En => &EN,
            Language::Zh => &ZH,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_codes() {
        assert_eq!(Language::En.code(), "en");
        assert_eq!(Language::Zh.code(), "zh");
    }

    #[test]
    fn test_from_tag() {
        assert_eq!(Language::from_tag("en"), Some(Language::En));
        assert_eq!(Language::from_tag("EN"), Some(Language::En));
        assert_eq!(Language::from_tag("en-US"), Some(Language::En));
        assert_eq!(Language::from_tag("zh"), Some(Language::Zh));
        assert_eq!(Language::from_tag("zh-CN"), Some(Language::Zh));
        assert_eq!(Language::from_tag("fr"), None);
        assert_eq!(Language::from_tag(""), None);
    }

    #[test]
    fn test_catalogs_differ() {
        let en = Translations::for_language(Language::En);
        let zh = Translations::for_language(Language::Zh);
        assert_eq!(en.app_title, "SkyView Weather");
        assert_eq!(zh.app_title, "天气预报");
        assert_ne!(en.current_location, zh.current_location);
    }

    #[test]
    fn test_no_empty_strings() {
        for lang in [Language::En, Language::Zh] {
            let t = Translations::for_language(lang);
            assert!(!t.app_title.is_empty());
            assert!(!t.current_location.is_empty());
            assert!(!t.weather_fetch_error.is_empty());
            assert!(!t.location_not_found.is_empty());
            assert!(!t.wind_unit.is_empty());
        }
    }

    #[test]
    fn test_language_serde_roundtrip() {
        let json = serde_json::to_string(&Language::Zh).unwrap();
        assert_eq!(json, "\"zh\"");
        let back: Language = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Language::Zh);
    }
}
