// Copyright 2026 the Planeshift Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Offload planner configuration.

/// Configuration for the [`OffloadPlanner`](crate::OffloadPlanner).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OffloadConfig {
    /// Master switch. When `false`, every bound overlay node is rejected and
    /// previously attached overlays are detached.
    pub enabled: bool,
    /// Whether planned overlays may sit above the parent surface. When
    /// `false` they are always stacked below it.
    pub allow_raise: bool,
    /// Whether subtrees carrying an opaque black background may be
    /// offloaded.
    pub allow_background: bool,
    /// Per-channel tolerance when deciding that a color is opaque black.
    pub background_tolerance: f32,
}

impl OffloadConfig {
    /// Default for [`background_tolerance`](Self::background_tolerance): one
    /// 8-bit step.
    pub const DEFAULT_BACKGROUND_TOLERANCE: f32 = 1.0 / 255.0;

    /// Everything enabled.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            enabled: true,
            allow_raise: true,
            allow_background: true,
            background_tolerance: Self::DEFAULT_BACKGROUND_TOLERANCE,
        }
    }

    /// Offloading switched off.
    #[must_use]
    pub const fn disabled() -> Self {
        Self::new().with_enabled(false)
    }

    /// Sets [`enabled`](Self::enabled).
    #[must_use]
    pub const fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Sets [`allow_raise`](Self::allow_raise).
    #[must_use]
    pub const fn with_allow_raise(mut self, allow_raise: bool) -> Self {
        self.allow_raise = allow_raise;
        self
    }

    /// Sets [`allow_background`](Self::allow_background).
    #[must_use]
    pub const fn with_allow_background(mut self, allow_background: bool) -> Self {
        self.allow_background = allow_background;
        self
    }

    /// Sets [`background_tolerance`](Self::background_tolerance).
    #[must_use]
    pub const fn with_background_tolerance(mut self, tolerance: f32) -> Self {
        self.background_tolerance = tolerance;
        self
    }
}

impl Default for OffloadConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets() {
        let c = OffloadConfig::default();
        assert!(c.enabled && c.allow_raise && c.allow_background);
        assert_eq!(c, OffloadConfig::new());
        assert!(!OffloadConfig::disabled().enabled);
    }

    #[test]
    fn builders() {
        let c = OffloadConfig::new()
            .with_allow_raise(false)
            .with_allow_background(false)
            .with_background_tolerance(0.1);
        assert!(c.enabled);
        assert!(!c.allow_raise);
        assert!(!c.allow_background);
        assert_eq!(c.background_tolerance, 0.1);
    }
}
