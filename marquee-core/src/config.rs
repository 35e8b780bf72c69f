//! Centralized configuration for Marquee.
//!
//! All tunable parameters are defined here to avoid hard-coded values
//! scattered throughout the codebase.

use std::time::Duration;

/// Central configuration for all Marquee components.
///
/// Groups related configuration settings into logical sections.
#[derive(Debug, Clone, Default)]
pub struct MarqueeConfig {
    pub search: SearchConfig,
    pub network: NetworkConfig,
}

/// Query orchestration behavior.
///
/// Controls debounce timing, pagination, and the scroll trigger.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Delay between the last keystroke and the debounced fetch
    pub debounce_delay: Duration,
    /// Results per page, fixed by the external API
    pub page_size: u32,
    /// Distance from the content bottom that triggers the next page
    pub scroll_threshold: u32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce_delay: Duration::from_millis(500),
            page_size: 10,
            scroll_threshold: 100,
        }
    }
}

/// Network communication configuration.
///
/// Controls the metadata fetch deadline and HTTP identification.
#[derive(Debug, Clone)]
pub struct NetworkConfig {
    /// Deadline for a single metadata fetch
    pub request_timeout: Duration,
    /// User agent for HTTP requests
    pub user_agent: &'static str,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(10),
            user_agent: "marquee/0.1.0",
        }
    }
}
