//! Per-view render statistics.
//!
//! Counters record how often the view asked for a repaint and how often each
//! piece of derived state was rebuilt, which makes the lazy-rebuild and
//! no-op-setter contracts observable from tests and debugging tools.

/// Snapshot of accumulated render statistics.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct StatsSnapshot {
    /// Repaints requested by the view itself (setters, invalidation).
    pub redraw_requests: u64,
    pub geometry_updates: u64,
    /// Flattener runs that had a source to work on.
    pub flattens: u64,
    pub shader_rebuilds: u64,
    /// Procedural content redrawn into an existing backing buffer.
    pub content_redraws: u64,
    pub frames_painted: u64,
    /// Paint calls skipped because the geometry had no area.
    pub frames_skipped: u64,
    /// Paint calls handed back to the host because masking is disabled.
    pub frames_delegated: u64,
}

#[derive(Debug, Default)]
pub(crate) struct RenderStats {
    snapshot: StatsSnapshot,
}

impl RenderStats {
    #[inline]
    pub fn record_redraw_request(&mut self) {
        self.snapshot.redraw_requests += 1;
    }

    #[inline]
    pub fn record_geometry_update(&mut self) {
        self.snapshot.geometry_updates += 1;
    }

    #[inline]
    pub fn record_flatten(&mut self) {
        self.snapshot.flattens += 1;
    }

    #[inline]
    pub fn record_shader_rebuild(&mut self) {
        self.snapshot.shader_rebuilds += 1;
    }

    #[inline]
    pub fn record_content_redraw(&mut self) {
        self.snapshot.content_redraws += 1;
    }

    #[inline]
    pub fn record_frame_painted(&mut self) {
        self.snapshot.frames_painted += 1;
    }

    #[inline]
    pub fn record_frame_skipped(&mut self) {
        self.snapshot.frames_skipped += 1;
    }

    #[inline]
    pub fn record_frame_delegated(&mut self) {
        self.snapshot.frames_delegated += 1;
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        self.snapshot.clone()
    }

    pub fn reset(&mut self) {
        self.snapshot = StatsSnapshot::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_counters() {
        let mut stats = RenderStats::default();
        stats.record_frame_painted();
        stats.record_frame_painted();
        stats.record_frame_skipped();
        let s = stats.snapshot();
        assert_eq!(s.frames_painted, 2);
        assert_eq!(s.frames_skipped, 1);
        assert_eq!(s.frames_delegated, 0);
    }

    #[test]
    fn test_rebuild_counters() {
        let mut stats = RenderStats::default();
        stats.record_flatten();
        stats.record_shader_rebuild();
        stats.record_shader_rebuild();
        stats.record_content_redraw();
        let s = stats.snapshot();
        assert_eq!(s.flattens, 1);
        assert_eq!(s.shader_rebuilds, 2);
        assert_eq!(s.content_redraws, 1);
    }

    #[test]
    fn test_reset() {
        let mut stats = RenderStats::default();
        stats.record_redraw_request();
        stats.record_geometry_update();
        stats.reset();
        assert_eq!(stats.snapshot(), StatsSnapshot::default());
    }
}
