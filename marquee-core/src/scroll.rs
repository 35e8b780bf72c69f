//! Scroll position monitoring for infinite pagination.

use serde::{Deserialize, Serialize};

/// Viewport measurements reported by the presentation layer.
///
/// Units are whatever distance measure the presentation uses (pixels,
/// rows); the monitor only compares them against its threshold.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ViewportMetrics {
    /// Distance scrolled from the top of the content.
    pub scroll_offset: u32,
    /// Visible height of the viewport.
    pub viewport_height: u32,
    /// Total height of the rendered content.
    pub content_height: u32,
}

impl ViewportMetrics {
    /// Metrics describing a viewport scrolled to the very bottom of its
    /// content. Used by drivers that page without a real scrollbar.
    pub fn at_bottom(content_height: u32, viewport_height: u32) -> Self {
        Self {
            scroll_offset: content_height.saturating_sub(viewport_height),
            viewport_height,
            content_height,
        }
    }
}

/// Decides when scrolling should request the next result page.
#[derive(Debug, Clone)]
pub struct ScrollMonitor {
    threshold: u32,
}

impl ScrollMonitor {
    /// Creates a monitor that triggers within `threshold` units of the
    /// content bottom.
    pub fn new(threshold: u32) -> Self {
        Self { threshold }
    }

    /// True when the viewport is within the threshold of the bottom.
    pub fn near_bottom(&self, metrics: &ViewportMetrics) -> bool {
        metrics.scroll_offset + metrics.viewport_height + self.threshold >= metrics.content_height
    }

    /// Raises the "request next page" signal.
    ///
    /// Suppressed while a fetch is in flight or when no further pages
    /// exist, even if the scroll threshold is met.
    pub fn should_request_next(
        &self,
        metrics: &ViewportMetrics,
        loading: bool,
        has_more: bool,
    ) -> bool {
        self.near_bottom(metrics) && !loading && has_more
    }
}
