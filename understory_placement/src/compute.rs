// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Placement computation: primary placement, then collision flip, then clamp.

use kurbo::{Point, Rect, Size};

use crate::types::{Align, Collision, Placement, Positioned, Side};

/// Compute where a panel goes relative to its anchor using [`Collision::default`].
///
/// See [`compute_position_with`].
pub fn compute_position(
    anchor: Rect,
    panel: Size,
    placement: Placement,
    viewport: Rect,
) -> Positioned {
    compute_position_with(anchor, panel, placement, viewport, Collision::default())
}

/// Compute where a panel goes relative to its anchor.
///
/// All rectangles are in the same (viewport) coordinate space.
///
/// Steps:
/// 1. Place the panel on `placement.side`, aligned by `placement.align`.
/// 2. If the panel leaves the viewport along the main axis and `collision.flip`
///    is set, place it on the opposite side instead. The result's
///    [`side`](Positioned::side) records the flip.
/// 3. If `collision.clamp` is set, slide the panel inward on any axis that
///    still overflows so it sits `collision.margin` away from the nearest edge.
///    When the panel is larger than the viewport the leading margin wins.
///
/// A zero-sized anchor or panel has not been laid out yet; the result is the
/// anchor's top-left with `settled == false`.
pub fn compute_position_with(
    anchor: Rect,
    panel: Size,
    placement: Placement,
    viewport: Rect,
    collision: Collision,
) -> Positioned {
    if is_unmeasured(anchor.size()) || is_unmeasured(panel) {
        return Positioned {
            left: anchor.x0,
            top: anchor.y0,
            side: placement.side,
            settled: false,
        };
    }

    let mut side = placement.side;
    let mut origin = primary_origin(anchor, panel, placement, side);

    if collision.flip && overflows_main_axis(origin, panel, side, viewport) {
        side = side.opposite();
        origin = primary_origin(anchor, panel, placement, side);
    }

    if collision.clamp {
        origin.x = clamp_axis(
            origin.x,
            panel.width,
            viewport.x0,
            viewport.x1,
            collision.margin,
        );
        origin.y = clamp_axis(
            origin.y,
            panel.height,
            viewport.y0,
            viewport.y1,
            collision.margin,
        );
    }

    Positioned {
        left: origin.x,
        top: origin.y,
        side,
        settled: true,
    }
}

fn is_unmeasured(size: Size) -> bool {
    size.width <= 0.0 || size.height <= 0.0
}

fn primary_origin(anchor: Rect, panel: Size, placement: Placement, side: Side) -> Point {
    let gap = placement.side_offset;
    if side.is_vertical() {
        let x = cross_start(
            anchor.x0,
            anchor.x1,
            panel.width,
            placement.align,
            placement.align_offset,
        );
        let y = match side {
            Side::Top => anchor.y0 - panel.height - gap,
            _ => anchor.y1 + gap,
        };
        Point::new(x, y)
    } else {
        let y = cross_start(
            anchor.y0,
            anchor.y1,
            panel.height,
            placement.align,
            placement.align_offset,
        );
        let x = match side {
            Side::Left => anchor.x0 - panel.width - gap,
            _ => anchor.x1 + gap,
        };
        Point::new(x, y)
    }
}

fn cross_start(lo: f64, hi: f64, len: f64, align: Align, shift: f64) -> f64 {
    match align {
        Align::Start => lo + shift,
        Align::Center => lo + (hi - lo - len) / 2.0 + shift,
        Align::End => hi - len - shift,
    }
}

fn overflows_main_axis(origin: Point, panel: Size, side: Side, viewport: Rect) -> bool {
    match side {
        Side::Top => origin.y < viewport.y0,
        Side::Bottom => origin.y + panel.height > viewport.y1,
        Side::Left => origin.x < viewport.x0,
        Side::Right => origin.x + panel.width > viewport.x1,
    }
}

fn clamp_axis(start: f64, len: f64, lo: f64, hi: f64, margin: f64) -> f64 {
    if start >= lo && start + len <= hi {
        return start;
    }
    // Apply the trailing limit first so the leading margin wins for oversized panels.
    start.min(hi - len - margin).max(lo + margin)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn anchor() -> Rect {
        // {top: 100, left: 50, width: 80, height: 30}
        Rect::from_origin_size((50.0, 100.0), (80.0, 30.0))
    }

    fn viewport(w: f64, h: f64) -> Rect {
        Rect::new(0.0, 0.0, w, h)
    }

    #[test]
    fn bottom_start_concrete_scenario() {
        let p = compute_position(
            anchor(),
            Size::new(200.0, 120.0),
            Placement::new(Side::Bottom, Align::Start).with_side_offset(4.0),
            viewport(800.0, 600.0),
        );
        assert_eq!((p.top, p.left), (134.0, 50.0));
        assert_eq!(p.side, Side::Bottom);
        assert!(p.settled);
    }

    #[test]
    fn bottom_start_without_collision_is_anchor_bottom_plus_offset() {
        let vp = viewport(2000.0, 2000.0);
        for (x, y, w, h, off) in [
            (0.0, 0.0, 10.0, 10.0, 0.0),
            (300.0, 40.0, 64.0, 24.0, 6.0),
            (900.0, 700.0, 1.0, 1.0, 12.5),
        ] {
            let a = Rect::from_origin_size((x, y), (w, h));
            let p = compute_position_with(
                a,
                Size::new(50.0, 40.0),
                Placement::new(Side::Bottom, Align::Start).with_side_offset(off),
                vp,
                Collision::NONE,
            );
            assert_eq!(p.top, a.y1 + off);
            assert_eq!(p.left, a.x0);
        }
    }

    #[test]
    fn flip_then_clamp_concrete_scenario() {
        let placement = Placement::new(Side::Bottom, Align::Start).with_side_offset(4.0);
        let panel = Size::new(200.0, 120.0);

        let unclamped = compute_position_with(
            anchor(),
            panel,
            placement,
            viewport(800.0, 150.0),
            Collision {
                clamp: false,
                ..Collision::default()
            },
        );
        assert_eq!(unclamped.side, Side::Top);
        assert_eq!((unclamped.top, unclamped.left), (-24.0, 50.0));

        let clamped = compute_position(anchor(), panel, placement, viewport(800.0, 150.0));
        assert_eq!(clamped.side, Side::Top);
        assert_eq!((clamped.top, clamped.left), (8.0, 50.0));
    }

    #[test]
    fn flip_puts_panel_bottom_at_anchor_top_minus_offset() {
        let panel = Size::new(100.0, 80.0);
        let a = Rect::from_origin_size((40.0, 300.0), (60.0, 20.0));
        let p = compute_position(
            a,
            panel,
            Placement::new(Side::Bottom, Align::Start).with_side_offset(6.0),
            viewport(800.0, 380.0),
        );
        assert_eq!(p.side, Side::Top);
        assert_eq!(p.top + panel.height, a.y0 - 6.0);
    }

    #[test]
    fn center_overflow_clamps_to_right_margin() {
        let vp = viewport(400.0, 600.0);
        let a = Rect::from_origin_size((360.0, 100.0), (30.0, 20.0));
        let panel = Size::new(120.0, 50.0);
        let p = compute_position(a, panel, Placement::new(Side::Bottom, Align::Center), vp);
        assert_eq!(p.left, 400.0 - 120.0 - 8.0);
        assert_eq!(p.side, Side::Bottom);
    }

    #[test]
    fn clamp_never_goes_past_leading_margin() {
        let vp = viewport(100.0, 600.0);
        let a = Rect::from_origin_size((40.0, 100.0), (20.0, 20.0));
        // Wider than the viewport: trailing clamp would go negative.
        let p = compute_position(
            a,
            Size::new(300.0, 50.0),
            Placement::new(Side::Bottom, Align::Center),
            vp,
        );
        assert_eq!(p.left, 8.0);
    }

    #[test]
    fn cross_axis_is_clamped_not_flipped() {
        let vp = viewport(400.0, 600.0);
        let a = Rect::from_origin_size((380.0, 100.0), (20.0, 20.0));
        let p = compute_position(
            a,
            Size::new(100.0, 50.0),
            Placement::new(Side::Bottom, Align::Start),
            vp,
        );
        assert_eq!(p.side, Side::Bottom);
        assert_eq!(p.left, 292.0);
        assert_eq!(p.top, 120.0);
    }

    #[test]
    fn inside_margin_but_not_overflowing_is_untouched() {
        let vp = viewport(400.0, 600.0);
        let a = Rect::from_origin_size((3.0, 100.0), (20.0, 20.0));
        let p = compute_position(
            a,
            Size::new(100.0, 50.0),
            Placement::new(Side::Bottom, Align::Start),
            vp,
        );
        assert_eq!(p.left, 3.0);
    }

    #[test]
    fn horizontal_sides_swap_axes() {
        let vp = viewport(800.0, 600.0);
        let a = anchor();
        let panel = Size::new(100.0, 60.0);

        let right = compute_position(
            a,
            panel,
            Placement::new(Side::Right, Align::Start).with_side_offset(4.0),
            vp,
        );
        assert_eq!((right.left, right.top), (134.0, 100.0));

        let left = compute_position(
            Rect::from_origin_size((300.0, 100.0), (80.0, 30.0)),
            panel,
            Placement::new(Side::Left, Align::End).with_side_offset(4.0),
            vp,
        );
        assert_eq!((left.left, left.top), (196.0, 70.0));

        let centered = compute_position(
            Rect::from_origin_size((300.0, 100.0), (80.0, 30.0)),
            panel,
            Placement::new(Side::Right, Align::Center),
            vp,
        );
        assert_eq!(centered.top, 85.0);
    }

    #[test]
    fn left_side_flips_to_right() {
        let vp = viewport(800.0, 600.0);
        let p = compute_position(
            Rect::from_origin_size((20.0, 100.0), (40.0, 20.0)),
            Size::new(100.0, 50.0),
            Placement::new(Side::Left, Align::Start),
            vp,
        );
        assert_eq!(p.side, Side::Right);
        assert_eq!(p.left, 60.0);
    }

    #[test]
    fn top_side_flips_to_bottom() {
        let vp = viewport(800.0, 600.0);
        let a = Rect::from_origin_size((100.0, 10.0), (40.0, 20.0));
        let p = compute_position(
            a,
            Size::new(100.0, 50.0),
            Placement::new(Side::Top, Align::Start).with_side_offset(4.0),
            vp,
        );
        assert_eq!(p.side, Side::Bottom);
        assert_eq!(p.top, 34.0);
    }

    #[test]
    fn align_end_and_align_offset() {
        let vp = viewport(800.0, 600.0);
        let p = compute_position(
            anchor(),
            Size::new(40.0, 20.0),
            Placement::new(Side::Bottom, Align::End).with_align_offset(5.0),
            vp,
        );
        // anchor right (130) - width (40) - shift (5)
        assert_eq!(p.left, 85.0);

        let p = compute_position(
            anchor(),
            Size::new(40.0, 20.0),
            Placement::new(Side::Bottom, Align::Start).with_align_offset(5.0),
            vp,
        );
        assert_eq!(p.left, 55.0);
    }

    #[test]
    fn zero_sized_inputs_defer() {
        let vp = viewport(800.0, 600.0);
        let placement = Placement::new(Side::Bottom, Align::Start).with_side_offset(4.0);

        let p = compute_position(anchor(), Size::ZERO, placement, vp);
        assert!(!p.settled);
        assert_eq!((p.top, p.left), (100.0, 50.0));

        let flat = Rect::from_origin_size((10.0, 20.0), (0.0, 30.0));
        let p = compute_position(flat, Size::new(10.0, 10.0), placement, vp);
        assert!(!p.settled);
        assert_eq!((p.top, p.left), (20.0, 10.0));
        assert_eq!(p.side, Side::Bottom);
    }

    #[test]
    fn offset_viewport_origin_is_respected() {
        let vp = Rect::new(100.0, 100.0, 500.0, 400.0);
        let a = Rect::from_origin_size((90.0, 200.0), (20.0, 20.0));
        let p = compute_position(
            a,
            Size::new(50.0, 50.0),
            Placement::new(Side::Bottom, Align::Start),
            vp,
        );
        assert_eq!(p.left, 108.0);
    }

    #[test]
    fn no_collision_returns_primary() {
        let p = compute_position_with(
            anchor(),
            Size::new(200.0, 120.0),
            Placement::new(Side::Bottom, Align::Start).with_side_offset(4.0),
            viewport(800.0, 150.0),
            Collision::NONE,
        );
        assert_eq!(p.side, Side::Bottom);
        assert_eq!(p.top, 134.0);
    }
}
