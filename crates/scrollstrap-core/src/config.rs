use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub bootstrap: BootstrapConfig,
    #[serde(default)]
    pub smoother: SmootherConfig,
    #[serde(default)]
    pub panels: PanelConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bootstrap: BootstrapConfig::default(),
            smoother: SmootherConfig::default(),
            panels: PanelConfig::default(),
        }
    }
}

/// How the bootstrap guard waits between readiness checks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WaitMode {
    /// Wake on registry change notifications; no idle re-checks.
    #[default]
    Subscribe,
    /// Re-check on a fixed timer cadence.
    Poll,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BootstrapConfig {
    /// Wait strategy while required capabilities are missing.
    #[serde(default)]
    pub mode: WaitMode,
    /// Re-check cadence for poll mode, in milliseconds.
    #[serde(default = "default_poll_interval")]
    pub poll_interval_ms: u64,
    /// Maximum readiness checks before giving up (absent = wait forever).
    #[serde(default)]
    pub max_attempts: Option<u64>,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            mode: WaitMode::default(),
            poll_interval_ms: default_poll_interval(),
            max_attempts: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SmootherConfig {
    /// Create the smoothed-scrolling session
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Scroll wrapper element identifier
    #[serde(default = "default_wrapper")]
    pub wrapper: String,
    /// Scroll content element identifier
    #[serde(default = "default_content")]
    pub content: String,
    /// Smoothness coefficient (seconds the viewport trails native scroll)
    #[serde(default = "default_smooth")]
    pub smooth: f64,
    /// Smoothness coefficient on touch devices
    #[serde(default = "default_smooth_touch")]
    pub smooth_touch: f64,
    /// Apply per-element speed and lag effects
    #[serde(default = "default_true")]
    pub effects: bool,
    /// Scroll normalization; accepts a bare boolean or a table
    #[serde(default)]
    pub normalize_scroll: NormalizeScroll,
    /// Ignore resize events produced by mobile browser chrome
    #[serde(default = "default_true")]
    pub ignore_mobile_resize: bool,
}

impl Default for SmootherConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            wrapper: default_wrapper(),
            content: default_content(),
            smooth: default_smooth(),
            smooth_touch: default_smooth_touch(),
            effects: default_true(),
            normalize_scroll: NormalizeScroll::default(),
            ignore_mobile_resize: default_true(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PanelConfig {
    /// Create the horizontal panel timeline
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Horizontal scroll container element identifier
    #[serde(default = "default_container")]
    pub container: String,
    /// Selector for the panels inside the container
    #[serde(default = "default_item_selector")]
    pub item_selector: String,
    /// Pin the container while the timeline plays
    #[serde(default = "default_true")]
    pub pin: bool,
    /// Scrub coefficient (seconds the playhead trails the scrollbar)
    #[serde(default = "default_scrub")]
    pub scrub: f64,
    /// Scroll distance covered by the timeline, in pixels past its start
    #[serde(default = "default_end_offset")]
    pub end_offset: u32,
    /// Show the runtime's debug markers
    #[serde(default)]
    pub markers: bool,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            container: default_container(),
            item_selector: default_item_selector(),
            pin: default_true(),
            scrub: default_scrub(),
            end_offset: default_end_offset(),
            markers: false,
        }
    }
}

/// Scroll normalization settings.
/// Can be specified as a simple boolean or as a table with per-field values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NormalizeScroll {
    /// Intercept native scroll and replay it on the runtime's own clock
    pub enabled: bool,
    /// Let nested scrollable elements consume the gesture first
    pub allow_nested_scroll: bool,
}

impl Default for NormalizeScroll {
    fn default() -> Self {
        Self {
            enabled: true,
            allow_nested_scroll: true,
        }
    }
}

// Custom deserializer to accept either a boolean or a table
impl<'de> Deserialize<'de> for NormalizeScroll {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::{self, MapAccess, Visitor};
        use std::fmt;

        struct NormalizeScrollVisitor;

        impl<'de> Visitor<'de> for NormalizeScrollVisitor {
            type Value = NormalizeScroll;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a boolean or a table with 'enabled' and 'allow_nested_scroll'")
            }

            // A bare boolean toggles normalization without nested-scroll handling
            fn visit_bool<E>(self, value: bool) -> Result<NormalizeScroll, E>
            where
                E: de::Error,
            {
                Ok(NormalizeScroll {
                    enabled: value,
                    allow_nested_scroll: false,
                })
            }

            // A table implies normalization is on unless 'enabled' says otherwise
            fn visit_map<M>(self, mut map: M) -> Result<NormalizeScroll, M::Error>
            where
                M: MapAccess<'de>,
            {
                let mut enabled: Option<bool> = None;
                let mut allow_nested_scroll: Option<bool> = None;

                while let Some(key) = map.next_key::<String>()? {
                    match key.as_str() {
                        "enabled" => {
                            enabled = Some(map.next_value()?);
                        }
                        "allow_nested_scroll" => {
                            allow_nested_scroll = Some(map.next_value()?);
                        }
                        _ => {
                            // Ignore unknown fields
                            let _: serde::de::IgnoredAny = map.next_value()?;
                        }
                    }
                }

                Ok(NormalizeScroll {
                    enabled: enabled.unwrap_or(true),
                    allow_nested_scroll: allow_nested_scroll.unwrap_or(false),
                })
            }
        }

        deserializer.deserialize_any(NormalizeScrollVisitor)
    }
}

fn default_poll_interval() -> u64 {
    100
}

fn default_true() -> bool {
    true
}

fn default_wrapper() -> String {
    "#smooth-wrapper".to_string()
}

fn default_content() -> String {
    "#smooth-content".to_string()
}

fn default_smooth() -> f64 {
    1.5
}

fn default_smooth_touch() -> f64 {
    0.1
}

fn default_container() -> String {
    "#horizontal".to_string()
}

fn default_item_selector() -> String {
    ".content".to_string()
}

fn default_scrub() -> f64 {
    2.0
}

fn default_end_offset() -> u32 {
    10000
}

impl AppConfig {
    /// Load configuration from file or return defaults
    pub fn load() -> crate::Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            toml::from_str(&content).map_err(|e| crate::Error::Config(e.to_string()))
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to file
    pub fn save(&self) -> crate::Result<()> {
        let config_path = Self::config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| crate::Error::Config(e.to_string()))?;
        std::fs::write(&config_path, content)?;

        Ok(())
    }

    /// Get the configuration file path
    /// Always uses ~/.config/scrollstrap/config.toml on all platforms
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("scrollstrap")
            .join("config.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();

        assert_eq!(config.bootstrap.mode, WaitMode::Subscribe);
        assert_eq!(config.bootstrap.poll_interval_ms, 100);
        assert_eq!(config.bootstrap.max_attempts, None);

        assert!(config.smoother.enabled);
        assert_eq!(config.smoother.wrapper, "#smooth-wrapper");
        assert_eq!(config.smoother.content, "#smooth-content");
        assert_eq!(config.smoother.smooth, 1.5);
        assert_eq!(config.smoother.smooth_touch, 0.1);
        assert!(config.smoother.effects);
        assert!(config.smoother.normalize_scroll.enabled);
        assert!(config.smoother.normalize_scroll.allow_nested_scroll);
        assert!(config.smoother.ignore_mobile_resize);

        assert!(config.panels.enabled);
        assert_eq!(config.panels.container, "#horizontal");
        assert_eq!(config.panels.item_selector, ".content");
        assert!(config.panels.pin);
        assert_eq!(config.panels.scrub, 2.0);
        assert_eq!(config.panels.end_offset, 10000);
        assert!(!config.panels.markers);
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config.bootstrap.poll_interval_ms, 100);
        assert_eq!(config.smoother.smooth, 1.5);
        assert_eq!(config.panels.end_offset, 10000);
    }

    #[test]
    fn test_normalize_scroll_bool_form() {
        let config: AppConfig = toml::from_str(
            r#"
            [smoother]
            normalize_scroll = false
            "#,
        )
        .unwrap();
        assert!(!config.smoother.normalize_scroll.enabled);
        assert!(!config.smoother.normalize_scroll.allow_nested_scroll);

        let config: AppConfig = toml::from_str(
            r#"
            [smoother]
            normalize_scroll = true
            "#,
        )
        .unwrap();
        assert!(config.smoother.normalize_scroll.enabled);
        assert!(!config.smoother.normalize_scroll.allow_nested_scroll);
    }

    #[test]
    fn test_normalize_scroll_table_form() {
        let config: AppConfig = toml::from_str(
            r#"
            [smoother]
            normalize_scroll = { allow_nested_scroll = true }
            "#,
        )
        .unwrap();
        assert!(config.smoother.normalize_scroll.enabled);
        assert!(config.smoother.normalize_scroll.allow_nested_scroll);
    }

    #[test]
    fn test_config_round_trip() {
        let mut config = AppConfig::default();
        config.bootstrap.mode = WaitMode::Poll;
        config.bootstrap.max_attempts = Some(50);
        config.smoother.smooth = 2.5;

        let serialized = toml::to_string_pretty(&config).unwrap();
        let parsed: AppConfig = toml::from_str(&serialized).unwrap();

        assert_eq!(parsed.bootstrap.mode, WaitMode::Poll);
        assert_eq!(parsed.bootstrap.max_attempts, Some(50));
        assert_eq!(parsed.smoother.smooth, 2.5);
        assert_eq!(
            parsed.smoother.normalize_scroll,
            config.smoother.normalize_scroll
        );
    }

    #[test]
    fn test_wait_mode_names() {
        let config: AppConfig = toml::from_str(
            r#"
            [bootstrap]
            mode = "poll"
            "#,
        )
        .unwrap();
        assert_eq!(config.bootstrap.mode, WaitMode::Poll);
    }
}
