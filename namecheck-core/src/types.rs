//! Public types shared by the checker, the proxy and the CLI.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::CheckError;

/// A platform whose username registry can be queried.
///
/// The set is fixed at build time. Declaration order is the display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// TikTok
    Tiktok,
    /// Twitch
    Twitch,
    /// Spotify
    Spotify,
    /// SoundCloud
    Soundcloud,
    /// Telegram
    Telegram,
}

impl Platform {
    /// Every platform the lookup proxy can forward to.
    pub const ALL: [Self; 5] = [
        Self::Tiktok,
        Self::Twitch,
        Self::Spotify,
        Self::Soundcloud,
        Self::Telegram,
    ];

    /// Platforms included in a check when the caller does not pick any.
    pub const DEFAULT_CHECKED: [Self; 4] =
        [Self::Tiktok, Self::Twitch, Self::Spotify, Self::Soundcloud];

    /// Path key used by the proxy route and the upstream service.
    pub fn key(self) -> &'static str {
        match self {
            Self::Tiktok => "tiktok",
            Self::Twitch => "twitch",
            Self::Spotify => "spotify",
            Self::Soundcloud => "soundcloud",
            Self::Telegram => "telegram",
        }
    }

    /// Human-readable name.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Tiktok => "TikTok",
            Self::Twitch => "Twitch",
            Self::Spotify => "Spotify",
            Self::Soundcloud => "SoundCloud",
            Self::Telegram => "Telegram",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Self::Tiktok => "🎵",
            Self::Twitch => "🎮",
            Self::Spotify => "🎧",
            Self::Soundcloud => "☁️",
            Self::Telegram => "✈️",
        }
    }

    /// Accent colour as a CSS hex string.
    pub fn color(self) -> &'static str {
        match self {
            Self::Tiktok => "#ec4899",
            Self::Twitch => "#a855f7",
            Self::Spotify => "#22c55e",
            Self::Soundcloud => "#f97316",
            Self::Telegram => "#0ea5e9",
        }
    }

    /// Static descriptor for rendering a platform card.
    pub fn info(self) -> PlatformInfo {
        PlatformInfo {
            key: self.key(),
            display_name: self.display_name(),
            icon: self.icon(),
            color: self.color(),
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Platform {
    type Err = CheckError;

    /// Keys are matched exactly; `"TikTok"` is not a valid key.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.key() == s)
            .ok_or_else(|| CheckError::UnknownPlatform(s.to_string()))
    }
}

/// Presentation metadata for one platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformInfo {
    pub key: &'static str,
    pub display_name: &'static str,
    pub icon: &'static str,
    pub color: &'static str,
}

/// Availability of a username on one platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LookupStatus {
    /// No check has run yet.
    #[default]
    Idle,
    /// A check is in flight.
    Loading,
    /// The username is free.
    Available,
    /// The username is registered.
    Taken,
    /// The lookup failed or the answer could not be interpreted.
    Error,
}

impl LookupStatus {
    /// Whether this status ends a check (`available`, `taken` or `error`).
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Available | Self::Taken | Self::Error)
    }

    /// Interpret a decoded lookup body.
    ///
    /// Only a boolean `data.available` is meaningful; every other shape,
    /// including the proxy's `{"error": ...}` body, maps to [`Self::Error`].
    pub fn from_response(body: &Value) -> Self {
        match body.get("data").and_then(|data| data.get("available")) {
            Some(Value::Bool(true)) => Self::Available,
            Some(Value::Bool(false)) => Self::Taken,
            _ => Self::Error,
        }
    }
}

impl fmt::Display for LookupStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Idle => "idle",
            Self::Loading => "loading",
            Self::Available => "available",
            Self::Taken => "taken",
            Self::Error => "error",
        };
        f.write_str(label)
    }
}

/// Platform → status mapping for one check.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatusMap(BTreeMap<Platform, LookupStatus>);

impl StatusMap {
    /// Empty map (every platform implicitly idle).
    pub fn new() -> Self {
        Self::default()
    }

    /// Map with every given platform set to [`LookupStatus::Loading`].
    pub fn loading(platforms: &[Platform]) -> Self {
        platforms
            .iter()
            .map(|&platform| (platform, LookupStatus::Loading))
            .collect()
    }

    /// Status of a platform; platforms absent from the map are idle.
    pub fn get(&self, platform: Platform) -> LookupStatus {
        self.0.get(&platform).copied().unwrap_or_default()
    }

    pub fn set(&mut self, platform: Platform, status: LookupStatus) {
        self.0.insert(platform, status);
    }

    pub fn contains(&self, platform: Platform) -> bool {
        self.0.contains_key(&platform)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether every entry holds a terminal status.
    pub fn is_complete(&self) -> bool {
        !self.0.is_empty() && self.0.values().all(|status| status.is_terminal())
    }

    pub fn iter(&self) -> impl Iterator<Item = (Platform, LookupStatus)> + '_ {
        self.0.iter().map(|(&platform, &status)| (platform, status))
    }
}

impl FromIterator<(Platform, LookupStatus)> for StatusMap {
    fn from_iter<I: IntoIterator<Item = (Platform, LookupStatus)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Outcome of the lookup for a single platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformCheckResult {
    /// Platform that was queried.
    pub platform: Platform,
    /// Terminal status.
    pub status: LookupStatus,
    /// Error message when the lookup itself failed.
    pub error: Option<String>,
    /// Lookup round-trip time in milliseconds.
    pub response_time_ms: u64,
}

/// Full result of one availability check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckReport {
    /// Trimmed username that was checked.
    pub username: String,
    /// Per-platform results, in the checker's platform order.
    pub results: Vec<PlatformCheckResult>,
    /// Wall-clock time of the whole fan-out in milliseconds.
    pub total_time_ms: u64,
}

impl CheckReport {
    pub fn status_map(&self) -> StatusMap {
        self.results
            .iter()
            .map(|result| (result.platform, result.status))
            .collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_platform_keys_round_trip_through_from_str() {
        for platform in Platform::ALL {
            assert_eq!(platform.key().parse::<Platform>().unwrap(), platform);
        }
    }

    #[test]
    fn test_platform_unknown_key() {
        assert_eq!(
            "myspace".parse::<Platform>(),
            Err(CheckError::UnknownPlatform("myspace".to_string()))
        );
        assert!("TikTok".parse::<Platform>().is_err());
        assert!("".parse::<Platform>().is_err());
    }

    #[test]
    fn test_default_checked_excludes_telegram() {
        assert_eq!(Platform::DEFAULT_CHECKED.len(), 4);
        assert!(!Platform::DEFAULT_CHECKED.contains(&Platform::Telegram));
    }

    #[test]
    fn test_platform_info_serializes_camel_case() {
        let json = serde_json::to_value(Platform::Soundcloud.info()).unwrap();
        assert_eq!(json["key"], "soundcloud");
        assert_eq!(json["displayName"], "SoundCloud");
        assert_eq!(json["color"], "#f97316");
    }

    #[test]
    fn test_from_response_available() {
        let body = json!({"data": {"available": true}});
        assert_eq!(LookupStatus::from_response(&body), LookupStatus::Available);
    }

    #[test]
    fn test_from_response_taken() {
        let body = json!({"data": {"available": false, "username": "foo"}});
        assert_eq!(LookupStatus::from_response(&body), LookupStatus::Taken);
    }

    #[test]
    fn test_from_response_other_shapes_are_errors() {
        let shapes = [
            json!({"data": {"available": "true"}}),
            json!({"data": {"available": 1}}),
            json!({"data": {"available": null}}),
            json!({"data": {}}),
            json!({"data": true}),
            json!({"available": true}),
            json!({"error": "Failed to fetch from upstream"}),
            json!([]),
            json!("available"),
            Value::Null,
        ];
        for body in shapes {
            assert_eq!(
                LookupStatus::from_response(&body),
                LookupStatus::Error,
                "body {body} should map to error"
            );
        }
    }

    #[test]
    fn test_status_map_loading_and_complete() {
        let mut map = StatusMap::loading(&Platform::DEFAULT_CHECKED);
        assert_eq!(map.len(), 4);
        assert!(!map.is_complete());
        assert_eq!(map.get(Platform::Twitch), LookupStatus::Loading);
        assert_eq!(map.get(Platform::Telegram), LookupStatus::Idle);

        for platform in Platform::DEFAULT_CHECKED {
            map.set(platform, LookupStatus::Taken);
        }
        assert!(map.is_complete());
    }

    #[test]
    fn test_empty_status_map_is_not_complete() {
        assert!(!StatusMap::new().is_complete());
    }

    #[test]
    fn test_status_map_serializes_as_object() {
        let map: StatusMap = [
            (Platform::Tiktok, LookupStatus::Available),
            (Platform::Twitch, LookupStatus::Taken),
        ]
        .into_iter()
        .collect();
        let json = serde_json::to_value(&map).unwrap();
        assert_eq!(json, json!({"tiktok": "available", "twitch": "taken"}));
    }

    #[test]
    fn test_report_status_map_projection() {
        let report = CheckReport {
            username: "foo".to_string(),
            results: vec![
                PlatformCheckResult {
                    platform: Platform::Spotify,
                    status: LookupStatus::Error,
                    error: Some("Network error: refused".to_string()),
                    response_time_ms: 3,
                },
                PlatformCheckResult {
                    platform: Platform::Tiktok,
                    status: LookupStatus::Available,
                    error: None,
                    response_time_ms: 5,
                },
            ],
            total_time_ms: 5,
        };
        let map = report.status_map();
        assert_eq!(map.get(Platform::Spotify), LookupStatus::Error);
        assert_eq!(map.get(Platform::Tiktok), LookupStatus::Available);
        assert_eq!(map.len(), 2);
    }
}
