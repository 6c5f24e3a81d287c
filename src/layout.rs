//! Pure layout geometry: orientation hysteresis and aspect fitting.
//!
//! Nothing in here touches the DOM; sizes come in as plain pixels and the
//! callers in `lib.rs` turn the results into style writes. That keeps the
//! flappiest part of the shell (the orientation decision) testable natively.

/// On-screen controls thickness, in rem.
pub const CONTROLS_THICKNESS_REM: f64 = 35.0;
/// Margin reserved from the game area for the canvas box, in rem.
pub const RESERVED_MARGIN_REM: f64 = 37.0;

/// A measured or computed pixel box. Zero is valid (hidden element).
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Orientation {
    Portrait,
    Landscape,
}

/// Which single CSS dimension to pin so the canvas fits its container
/// without distortion. The other dimension is left to auto-scale.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum AspectFix {
    PinWidth(f64),
    PinHeight(f64),
}

/// Result of one orientation decision: the (possibly unchanged) orientation
/// and the concrete target boxes for the canvas container and the controls.
#[derive(Clone, Copy, Debug)]
pub struct LayoutPlan {
    pub orientation: Orientation,
    pub changed: bool,
    pub canvas_box: Size,
    pub controls_box: Size,
}

/// Page-lifetime layout state: the hysteretic orientation, the last applied
/// canvas-container box (read back from the DOM, cached so the fit step does
/// not feed the size observer its own writes), and the last applied fit.
#[derive(Default)]
pub struct LayoutContext {
    orientation: Option<Orientation>,
    snapshot: Option<Size>,
    last_fit: Option<(Size, AspectFix)>,
}

impl LayoutContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn orientation(&self) -> Option<Orientation> {
        self.orientation
    }

    pub fn snapshot(&self) -> Option<Size> {
        self.snapshot
    }

    /// Refreshed once per layout pass, after the container boxes are applied.
    pub fn set_snapshot(&mut self, snapshot: Size) {
        self.snapshot = Some(snapshot);
    }

    /// Decide the layout orientation for the current game-area box.
    ///
    /// The orientation whose canvas box ends up closer to square wins, since
    /// the engine renders a fixed near-square picture. Switching away from
    /// the current orientation requires the other deviation to be strictly
    /// lower, so identical repeated measurements (and exact ties) never flap.
    /// The first measurement always commits, to Landscape on a tie.
    pub fn decide(&mut self, game: Size, rem: f64) -> LayoutPlan {
        let margin = RESERVED_MARGIN_REM * rem;
        let landscape_canvas_width = game.width - margin;
        let portrait_canvas_height = game.height - margin;

        let portrait_deviation = (portrait_canvas_height - game.width).abs();
        let landscape_deviation = (game.height - landscape_canvas_width).abs();

        let next = match self.orientation {
            None => {
                if portrait_deviation < landscape_deviation {
                    Orientation::Portrait
                } else {
                    Orientation::Landscape
                }
            }
            Some(Orientation::Portrait) => {
                if landscape_deviation < portrait_deviation {
                    Orientation::Landscape
                } else {
                    Orientation::Portrait
                }
            }
            Some(Orientation::Landscape) => {
                if portrait_deviation < landscape_deviation {
                    Orientation::Portrait
                } else {
                    Orientation::Landscape
                }
            }
        };

        let changed = self.orientation != Some(next);
        self.orientation = Some(next);

        let thickness = CONTROLS_THICKNESS_REM * rem;
        let (canvas_box, controls_box) = match next {
            Orientation::Portrait => (
                Size::new(game.width, portrait_canvas_height),
                Size::new(game.width, thickness),
            ),
            Orientation::Landscape => (
                Size::new(landscape_canvas_width, game.height),
                Size::new(thickness, game.height),
            ),
        };

        LayoutPlan {
            orientation: next,
            changed,
            canvas_box,
            controls_box,
        }
    }

    /// Fit the canvas inside the last snapshotted container box.
    ///
    /// The no-op guard is keyed on the canvas's *current* measured size, not
    /// just the fix this code last produced: the engine rewrites the surface
    /// style on its own, and when its new size happens to yield the same pin
    /// as before the corrective write must still go out. Only a replay of an
    /// identical measurement (or a not-yet-measured snapshot) is skipped,
    /// which is what keeps the size observer from re-triggering itself.
    pub fn fit(&mut self, intrinsic: Size) -> Option<AspectFix> {
        let container = self.snapshot?;
        let fix = aspect_fit(container, intrinsic);
        if self.last_fit == Some((intrinsic, fix)) {
            return None;
        }
        self.last_fit = Some((intrinsic, fix));
        Some(fix)
    }
}

/// Pick the one dimension to pin so that a box with the canvas's intrinsic
/// ratio fits entirely inside `container`. Compared cross-multiplied to stay
/// well defined at zero sizes.
pub fn aspect_fit(container: Size, intrinsic: Size) -> AspectFix {
    if container.height * intrinsic.width > intrinsic.height * container.width {
        AspectFix::PinWidth(container.width)
    } else {
        AspectFix::PinHeight(container.height)
    }
}
