//! Popup panel placement and staged reveal.
//!
//! The calendar panel anchors to the text input and normally opens below
//! it. On viewports wider than the mobile breakpoint, the panel flips above
//! the anchor when its bottom edge would run past the usable screen height;
//! the connector arrow mirrors with it. Placement and visibility are plain
//! enum view state ([`PanelPhase`], [`ArrowEdge`]) that the view layer
//! renders however it likes — this module never touches a real window.
//!
//! # Staged reveal
//!
//! Revealing happens in two phases split across two UI ticks: the panel
//! first becomes present in its entrance pose (`Revealing`), then one tick
//! later settles into `Visible`. The split exists because a view layer that
//! toggles presence and entrance transform in the same paint frame never
//! animates the transition; two distinct frames let it fire.

use std::sync::{Arc, Weak};

use datespan_core::{Property, Signal, TickScheduler};

/// Viewport width at and below which the panel never flips (mobile layout).
pub const MOBILE_BREAKPOINT: f32 = 767.0;

/// Reserved space at the bottom of the screen; a panel whose bottom edge
/// would intrude into it flips above the anchor.
pub const BOTTOM_INSET: f32 = 100.0;

/// Where the panel sits relative to its anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PanelPlacement {
    /// Panel opens below the anchor.
    #[default]
    Below,
    /// Panel opens above the anchor.
    Above,
}

impl PanelPlacement {
    /// Decide placement from the current geometry.
    ///
    /// Flips to `Above` only when the viewport is wider than
    /// [`MOBILE_BREAKPOINT`] *and* the panel's bottom edge would pass
    /// `screen_height - BOTTOM_INSET`. At or below the breakpoint the
    /// panel always opens below, regardless of position.
    pub fn resolve(metrics: RevealMetrics) -> Self {
        if metrics.viewport_width > MOBILE_BREAKPOINT
            && metrics.screen_height - BOTTOM_INSET < metrics.panel_bottom
        {
            PanelPlacement::Above
        } else {
            PanelPlacement::Below
        }
    }

    /// The connector-arrow edge matching this placement.
    pub fn arrow_edge(self) -> ArrowEdge {
        match self {
            PanelPlacement::Below => ArrowEdge::Top,
            PanelPlacement::Above => ArrowEdge::Bottom,
        }
    }
}

/// Which panel edge carries the connector arrow.
///
/// The arrow is a rotated square, so only two of its borders are drawn:
/// the pair facing away from the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ArrowEdge {
    /// Arrow on the panel's top edge, pointing at an anchor above
    /// (left+top borders drawn).
    #[default]
    Top,
    /// Arrow on the panel's bottom edge, pointing at an anchor below
    /// (right+bottom borders drawn).
    Bottom,
}

/// Geometry inputs for the placement decision.
///
/// Captured by the view layer at reveal time: the anchor-relative panel
/// layout has already happened, so `panel_bottom` is where the panel's
/// bottom edge *would* land if it opened below.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RevealMetrics {
    /// Current viewport width in px.
    pub viewport_width: f32,
    /// Screen height in px.
    pub screen_height: f32,
    /// Bottom edge of the panel, in screen coordinates, when placed below.
    pub panel_bottom: f32,
}

/// Visibility phase of the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PanelPhase {
    /// Panel is not present.
    #[default]
    Hidden,
    /// Panel is present in its entrance pose (shifted, transparent);
    /// advances to `Visible` on the next tick.
    Revealing(PanelPlacement),
    /// Panel is fully shown.
    Visible(PanelPlacement),
}

impl PanelPhase {
    /// Whether the panel is absent.
    pub fn is_hidden(&self) -> bool {
        matches!(self, PanelPhase::Hidden)
    }

    /// The placement, if the panel is present.
    pub fn placement(&self) -> Option<PanelPlacement> {
        match self {
            PanelPhase::Hidden => None,
            PanelPhase::Revealing(placement) | PanelPhase::Visible(placement) => Some(*placement),
        }
    }
}

/// View-state handle for the calendar panel.
///
/// Owned by the view layer; the positioner holds it weakly so a deferred
/// reveal step never acts on a torn-down panel.
///
/// # Signals
///
/// - `phase_changed(PanelPhase)`: visibility phase moved
/// - `arrow_changed(ArrowEdge)`: connector arrow mirrored
pub struct PanelView {
    phase: Property<PanelPhase>,
    arrow: Property<ArrowEdge>,

    /// Signal emitted when the visibility phase changes.
    pub phase_changed: Signal<PanelPhase>,
    /// Signal emitted when the arrow edge changes.
    pub arrow_changed: Signal<ArrowEdge>,
}

impl PanelView {
    /// Create a hidden panel.
    pub fn new() -> Self {
        Self {
            phase: Property::new(PanelPhase::Hidden),
            arrow: Property::new(ArrowEdge::Top),
            phase_changed: Signal::new(),
            arrow_changed: Signal::new(),
        }
    }

    /// The current visibility phase.
    pub fn phase(&self) -> PanelPhase {
        self.phase.get()
    }

    /// The current arrow edge.
    pub fn arrow(&self) -> ArrowEdge {
        self.arrow.get()
    }

    /// Hide the panel. The next reveal recomputes placement and arrow.
    pub fn conceal(&self) -> bool {
        let changed = self.phase.set(PanelPhase::Hidden);
        if changed {
            self.phase_changed.emit(PanelPhase::Hidden);
        }
        changed
    }

    fn set_phase(&self, phase: PanelPhase) {
        if self.phase.set(phase) {
            self.phase_changed.emit(phase);
        }
    }

    fn set_arrow(&self, arrow: ArrowEdge) {
        if self.arrow.set(arrow) {
            self.arrow_changed.emit(arrow);
        }
    }
}

impl Default for PanelView {
    fn default() -> Self {
        Self::new()
    }
}

/// Drives panel placement and the two-tick reveal.
pub struct PopupPositioner {
    panel: Weak<PanelView>,
    scheduler: Arc<TickScheduler>,
    metrics: Property<RevealMetrics>,
}

impl PopupPositioner {
    /// Create a positioner for `panel`, deferring reveal completion through
    /// `scheduler`.
    pub fn new(panel: &Arc<PanelView>, scheduler: Arc<TickScheduler>) -> Self {
        Self {
            panel: Arc::downgrade(panel),
            scheduler,
            metrics: Property::new(RevealMetrics::default()),
        }
    }

    /// Update the geometry used by the next placement decision.
    ///
    /// The view layer calls this whenever layout or viewport size changes.
    pub fn set_metrics(&self, metrics: RevealMetrics) {
        self.metrics.set(metrics);
    }

    /// The geometry the next reveal will use.
    pub fn metrics(&self) -> RevealMetrics {
        self.metrics.get()
    }

    /// Reveal the panel if it is hidden.
    ///
    /// Resolves placement, mirrors the arrow, and moves the panel to its
    /// entrance phase synchronously; completion to `Visible` runs on the
    /// next tick. A panel that is already revealing or visible is left
    /// untouched (no duplicate phase changes). Returns whether a reveal
    /// started.
    pub fn reveal(&self) -> bool {
        let Some(panel) = self.panel.upgrade() else {
            return false;
        };
        if !panel.phase().is_hidden() {
            return false;
        }

        let placement = PanelPlacement::resolve(self.metrics.get());
        tracing::debug!(target: "datespan::popup", ?placement, "revealing panel");

        panel.set_arrow(placement.arrow_edge());
        panel.set_phase(PanelPhase::Revealing(placement));

        let weak = Arc::downgrade(&panel);
        self.scheduler.defer(move || {
            // The panel may have been torn down, or hidden again, between
            // the two phases; both cases are silent no-ops.
            let Some(panel) = weak.upgrade() else {
                return;
            };
            if let PanelPhase::Revealing(placement) = panel.phase() {
                panel.set_phase(PanelPhase::Visible(placement));
            }
        });

        true
    }

    /// Hide the panel, if it still exists.
    pub fn conceal(&self) -> bool {
        match self.panel.upgrade() {
            Some(panel) => panel.conceal(),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics(viewport_width: f32, screen_height: f32, panel_bottom: f32) -> RevealMetrics {
        RevealMetrics {
            viewport_width,
            screen_height,
            panel_bottom,
        }
    }

    fn positioner_with(m: RevealMetrics) -> (Arc<PanelView>, Arc<TickScheduler>, PopupPositioner) {
        let panel = Arc::new(PanelView::new());
        let scheduler = Arc::new(TickScheduler::new());
        let positioner = PopupPositioner::new(&panel, scheduler.clone());
        positioner.set_metrics(m);
        (panel, scheduler, positioner)
    }

    #[test]
    fn test_placement_flips_above_when_panel_runs_past_inset() {
        // screen_height - 100 < panel_bottom on a desktop viewport
        let m = metrics(1024.0, 800.0, 750.0);
        assert_eq!(PanelPlacement::resolve(m), PanelPlacement::Above);
    }

    #[test]
    fn test_placement_stays_below_when_panel_fits() {
        let m = metrics(1024.0, 800.0, 600.0);
        assert_eq!(PanelPlacement::resolve(m), PanelPlacement::Below);
    }

    #[test]
    fn test_placement_never_flips_at_or_below_breakpoint() {
        // Same overflowing geometry, mobile-width viewport.
        assert_eq!(
            PanelPlacement::resolve(metrics(767.0, 800.0, 750.0)),
            PanelPlacement::Below
        );
        assert_eq!(
            PanelPlacement::resolve(metrics(375.0, 800.0, 750.0)),
            PanelPlacement::Below
        );
    }

    #[test]
    fn test_placement_boundary_is_strict() {
        // panel_bottom exactly at screen_height - 100 does not flip.
        assert_eq!(
            PanelPlacement::resolve(metrics(1024.0, 800.0, 700.0)),
            PanelPlacement::Below
        );
        // One pixel past does.
        assert_eq!(
            PanelPlacement::resolve(metrics(1024.0, 800.0, 701.0)),
            PanelPlacement::Above
        );
    }

    #[test]
    fn test_arrow_mirrors_with_placement() {
        assert_eq!(PanelPlacement::Below.arrow_edge(), ArrowEdge::Top);
        assert_eq!(PanelPlacement::Above.arrow_edge(), ArrowEdge::Bottom);
    }

    #[test]
    fn test_reveal_runs_in_two_phases() {
        let (panel, scheduler, positioner) = positioner_with(metrics(1024.0, 800.0, 600.0));

        assert!(positioner.reveal());
        assert_eq!(panel.phase(), PanelPhase::Revealing(PanelPlacement::Below));

        scheduler.run_pending();
        assert_eq!(panel.phase(), PanelPhase::Visible(PanelPlacement::Below));
    }

    #[test]
    fn test_reveal_above_mirrors_arrow() {
        let (panel, scheduler, positioner) = positioner_with(metrics(1024.0, 800.0, 750.0));

        positioner.reveal();
        assert_eq!(panel.arrow(), ArrowEdge::Bottom);

        scheduler.run_pending();
        assert_eq!(panel.phase(), PanelPhase::Visible(PanelPlacement::Above));
    }

    #[test]
    fn test_reveal_is_idempotent() {
        let (panel, scheduler, positioner) = positioner_with(metrics(1024.0, 800.0, 600.0));
        let changes = {
            use parking_lot::Mutex;
            let changes = Arc::new(Mutex::new(0));
            let counter = changes.clone();
            panel.phase_changed.connect(move |_| *counter.lock() += 1);
            changes
        };

        assert!(positioner.reveal());
        // Second reveal while revealing: no-op.
        assert!(!positioner.reveal());
        scheduler.run_pending();
        // Third reveal while visible: no-op.
        assert!(!positioner.reveal());
        scheduler.run_pending();

        assert_eq!(panel.phase(), PanelPhase::Visible(PanelPlacement::Below));
        // Exactly two phase changes: Hidden -> Revealing -> Visible.
        assert_eq!(*changes.lock(), 2);
    }

    #[test]
    fn test_deferred_step_survives_panel_teardown() {
        let (panel, scheduler, positioner) = positioner_with(metrics(1024.0, 800.0, 600.0));

        positioner.reveal();
        drop(panel);
        drop(positioner);

        // The deferred completion fires against a dead panel: silent no-op.
        assert_eq!(scheduler.run_pending(), 1);
    }

    #[test]
    fn test_deferred_step_respects_conceal_between_phases() {
        let (panel, scheduler, positioner) = positioner_with(metrics(1024.0, 800.0, 600.0));

        positioner.reveal();
        positioner.conceal();
        scheduler.run_pending();

        // Concealed between the two phases: the panel stays hidden.
        assert_eq!(panel.phase(), PanelPhase::Hidden);
    }

    #[test]
    fn test_reveal_after_teardown_reports_false() {
        let (panel, _scheduler, positioner) = positioner_with(metrics(1024.0, 800.0, 600.0));
        drop(panel);
        assert!(!positioner.reveal());
        assert!(!positioner.conceal());
    }

    #[test]
    fn test_conceal_then_reveal_recomputes_placement() {
        let (panel, scheduler, positioner) = positioner_with(metrics(1024.0, 800.0, 750.0));

        positioner.reveal();
        scheduler.run_pending();
        assert_eq!(panel.phase(), PanelPhase::Visible(PanelPlacement::Above));

        positioner.conceal();
        positioner.set_metrics(metrics(1024.0, 800.0, 500.0));
        positioner.reveal();
        scheduler.run_pending();
        assert_eq!(panel.phase(), PanelPhase::Visible(PanelPlacement::Below));
        assert_eq!(panel.arrow(), ArrowEdge::Top);
    }
}
