use kurbo::Rect;

use crate::core::RootMargin;

/// Applies a root margin to the viewport bounds. Positive values grow the
/// rectangle outward, negative values shrink it; percentages resolve against
/// the viewport's own width/height. A margin that inverts an axis collapses
/// it to an empty span rather than producing a negative extent.
pub fn expand(viewport: Rect, margin: RootMargin) -> Rect {
    let w = viewport.width();
    let h = viewport.height();
    let x0 = viewport.x0 - margin.left.resolve(w);
    let x1 = viewport.x1 + margin.right.resolve(w);
    let y0 = viewport.y0 - margin.top.resolve(h);
    let y1 = viewport.y1 + margin.bottom.resolve(h);
    Rect::new(x0, y0, x1.max(x0), y1.max(y0))
}

/// Fraction of `target`'s area inside `root`, in [0, 1].
///
/// A zero-area target counts as fully visible when it touches `root` at all,
/// mirroring the rendering environment's edge-adjacent intersection rule.
pub fn visible_fraction(target: Rect, root: Rect) -> f64 {
    let overlap_w = target.x1.min(root.x1) - target.x0.max(root.x0);
    let overlap_h = target.y1.min(root.y1) - target.y0.max(root.y0);
    if overlap_w < 0.0 || overlap_h < 0.0 {
        return 0.0;
    }

    let area = target.width() * target.height();
    if area <= 0.0 {
        return 1.0;
    }

    ((overlap_w * overlap_h) / area).clamp(0.0, 1.0)
}
