//! Weather condition code translation
//!
//! Maps WMO weather codes from the Open-Meteo API to localized
//! descriptions and OpenWeatherMap-compatible icon ids. Unmapped codes
//! never fail: they yield the locale's "Unknown" string and the fog icon.

use crate::i18n::Language;

/// Human-readable description for a WMO weather code
#[must_use]
pub fn describe(code: u8, language: Language) -> &'static str {
    match language {
        Language::En => describe_en(code),
        Language::Zh => describe_zh(code),
    }
}

fn describe_en(code: u8) -> &'static str {
    match code {
        0 => "Clear Sky",
        1 => "Mainly Clear",
        2 => "Partly Cloudy",
        3 => "Overcast",
        45 => "Fog",
        48 => "Depositing Rime Fog",
        51 => "Light Drizzle",
        53 => "Moderate Drizzle",
        55 => "Dense Drizzle",
        56 => "Light Freezing Drizzle",
        57 => "Dense Freezing Drizzle",
        61 => "Slight Rain",
        63 => "Moderate Rain",
        65 => "Heavy Rain",
        66 => "Light Freezing Rain",
        67 => "Heavy Freezing Rain",
        71 => "Slight Snow Fall",
        73 => "Moderate Snow Fall",
        75 => "Heavy Snow Fall",
        77 => "Snow Grains",
        80 => "Slight Rain Showers",
        81 => "Moderate Rain Showers",
        82 => "Violent Rain Showers",
        85 => "Slight Snow Showers",
        86 => "Heavy Snow Showers",
        95 => "Thunderstorm",
        96 => "Thunderstorm with Slight Hail",
        99 => "Thunderstorm with Heavy Hail",
        _ => "Unknown",
    }
}

fn describe_zh(code: u8) -> &'static str {
    match code {
        0 => "晴天",
        1 => "大部晴朗",
        2 => "局部多云",
        3 => "阴天",
        45 => "雾",
        48 => "雾凇",
        51 => "小毛毛雨",
        53 => "中毛毛雨",
        55 => "大毛毛雨",
        56 => "小冻雨",
        57 => "大冻雨",
        61 => "小雨",
        63 => "中雨",
        65 => "大雨",
        66 => "小冻雨",
        67 => "大冻雨",
        71 => "小雪",
        73 => "中雪",
        75 => "大雪",
        77 => "雪粒",
        80 => "小阵雨",
        81 => "中阵雨",
        82 => "大阵雨",
        85 => "小阵雪",
        86 => "大阵雪",
        95 => "雷暴",
        96 => "雷暴伴有小冰雹",
        99 => "雷暴伴有大冰雹",
        _ => "未知",
    }
}

/// Description for the legacy named condition groups some providers
/// return instead of numeric codes
#[must_use]
pub fn describe_named(group: &str, language: Language) -> &'static str {
    match language {
        Language::En => match group {
            "Clear" => "Clear Sky",
            "Clouds" => "Cloudy",
            "Rain" => "Rain",
            "Drizzle" => "Drizzle",
            "Thunderstorm" => "Thunderstorm",
            "Snow" => "Snow",
            "Mist" => "Mist",
            "Smoke" => "Smoke",
            "Haze" => "Haze",
            "Dust" => "Dust",
            "Fog" => "Fog",
            "Sand" => "Sand",
            "Ash" => "Ash",
            "Squall" => "Squall",
            "Tornado" => "Tornado",
            _ => "Unknown",
        },
        Language::Zh => match group {
            "Clear" => "晴天",
            "Clouds" => "多云",
            "Rain" => "雨",
            "Drizzle" => "毛毛雨",
            "Thunderstorm" => "雷暴",
            "Snow" => "雪",
            "Mist" => "薄雾",
            "Smoke" => "烟雾",
            "Haze" => "霾",
            "Dust" => "尘土",
            "Fog" => "雾",
            "Sand" => "沙尘",
            "Ash" => "火山灰",
            "Squall" => "暴风",
            "Tornado" => "龙卷风",
            _ => "未知",
        },
    }
}

/// OpenWeatherMap icon id for a WMO weather code
///
/// Many-to-one: whole code ranges collapse to a single icon. Codes
/// outside every range fall back to the fog icon.
#[must_use]
pub fn icon_for(code: u8) -> &'static str {
    match code {
        0 | 1 => "01d",
        2 => "02d",
        3 => "04d",
        45..=48 => "50d",
        51..=57 => "09d",
        61..=67 => "10d",
        71..=77 => "13d",
        80..=82 => "09d",
        85..=86 => "13d",
        95.. => "11d",
        _ => "50d",
    }
}

/// Image URL for an icon id at the given scale (1x, 2x, 4x)
#[must_use]
pub fn icon_url(icon_id: &str, scale: u8) -> String {
    format!("https://openweathermap.org/img/wn/{icon_id}@{scale}x.png")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, "Clear Sky", "晴天")]
    #[case(1, "Mainly Clear", "大部晴朗")]
    #[case(2, "Partly Cloudy", "局部多云")]
    #[case(3, "Overcast", "阴天")]
    #[case(45, "Fog", "雾")]
    #[case(48, "Depositing Rime Fog", "雾凇")]
    #[case(55, "Dense Drizzle", "大毛毛雨")]
    #[case(57, "Dense Freezing Drizzle", "大冻雨")]
    #[case(61, "Slight Rain", "小雨")]
    #[case(67, "Heavy Freezing Rain", "大冻雨")]
    #[case(75, "Heavy Snow Fall", "大雪")]
    #[case(77, "Snow Grains", "雪粒")]
    #[case(82, "Violent Rain Showers", "大阵雨")]
    #[case(86, "Heavy Snow Showers", "大阵雪")]
    #[case(95, "Thunderstorm", "雷暴")]
    #[case(96, "Thunderstorm with Slight Hail", "雷暴伴有小冰雹")]
    #[case(99, "Thunderstorm with Heavy Hail", "雷暴伴有大冰雹")]
    fn test_describe_known_codes(#[case] code: u8, #[case] en: &str, #[case] zh: &str) {
        assert_eq!(describe(code, Language::En), en);
        assert_eq!(describe(code, Language::Zh), zh);
    }

    #[rstest]
    #[case(4)]
    #[case(50)]
    #[case(60)]
    #[case(79)]
    #[case(94)]
    fn test_describe_unknown_codes(#[case] code: u8) {
        assert_eq!(describe(code, Language::En), "Unknown");
        assert_eq!(describe(code, Language::Zh), "未知");
    }

    #[rstest]
    #[case(0, "01d")]
    #[case(1, "01d")]
    #[case(2, "02d")]
    #[case(3, "04d")]
    #[case(45, "50d")]
    #[case(48, "50d")]
    #[case(51, "09d")]
    #[case(57, "09d")]
    #[case(61, "10d")]
    #[case(67, "10d")]
    #[case(71, "13d")]
    #[case(77, "13d")]
    #[case(80, "09d")]
    #[case(82, "09d")]
    #[case(85, "13d")]
    #[case(86, "13d")]
    #[case(95, "11d")]
    #[case(96, "11d")]
    #[case(99, "11d")]
    #[case(100, "11d")]
    fn test_icon_mapping(#[case] code: u8, #[case] icon: &str) {
        assert_eq!(icon_for(code), icon);
    }

    #[test]
    fn test_icon_fog_fallback() {
        // Codes that sit between the mapped ranges
        assert_eq!(icon_for(4), "50d");
        assert_eq!(icon_for(49), "50d");
        assert_eq!(icon_for(60), "50d");
        assert_eq!(icon_for(78), "50d");
        assert_eq!(icon_for(90), "50d");
    }

    #[test]
    fn test_icon_url() {
        assert_eq!(
            icon_url("02d", 2),
            "https://openweathermap.org/img/wn/02d@2x.png"
        );
        assert_eq!(
            icon_url("11d", 4),
            "https://openweathermap.org/img/wn/11d@4x.png"
        );
    }

    #[test]
    fn test_describe_named_groups() {
        assert_eq!(describe_named("Clear", Language::En), "Clear Sky");
        assert_eq!(describe_named("Clouds", Language::Zh), "多云");
        assert_eq!(describe_named("Tornado", Language::En), "Tornado");
        assert_eq!(describe_named("Tornado", Language::Zh), "龙卷风");
        assert_eq!(describe_named("Plasma", Language::En), "Unknown");
        assert_eq!(describe_named("Plasma", Language::Zh), "未知");
    }
}
