use footprint_rs::core::layout::{
    optimal_candlestick_width, resolve_body_width, resolve_border_width, resolve_wick_width,
};
use footprint_rs::core::{FnCoordinateMapper, FootprintBar, LayoutCursor, Viewport, VisibleRange};
use footprint_rs::render::{DrawCommand, RenderFrame};
use footprint_rs::{FootprintRenderData, FootprintRenderer, FootprintStyleOptions};
use proptest::prelude::*;

#[test]
fn optimal_width_follows_lightweight_curve() {
    assert_eq!(optimal_candlestick_width(3.0, 1.0), 3);
    assert_eq!(optimal_candlestick_width(3.0, 2.0), 6);
    assert_eq!(optimal_candlestick_width(1.0, 1.0), 1);
    assert_eq!(optimal_candlestick_width(10.0, 1.0), 8);
}

#[test]
fn body_width_is_parity_matched_to_grid_lines() {
    // align_edges: floor(10 * 1) - 1 = 9, odd like the 1px grid line.
    assert_eq!(resolve_body_width(10.0, 1.0, true), 9);
    // floor(10 * 2) - 1 = 19, grid lines are 2px so drop to 18.
    assert_eq!(resolve_body_width(10.0, 2.0, true), 18);
    assert_eq!(resolve_body_width(0.2, 1.0, true), 1);
}

#[test]
fn wick_and_border_widths_stay_within_body() {
    assert_eq!(resolve_wick_width(10.0, 2.0, 18), 2);
    assert_eq!(resolve_wick_width(0.5, 1.0, 1), 1);
    assert_eq!(resolve_border_width(9, 1.0), 1);
    assert_eq!(resolve_border_width(18, 2.0), 2);
    assert_eq!(resolve_border_width(2, 1.0), 1);
}

#[test]
fn cursor_is_threaded_per_pass() {
    let cursor = LayoutCursor::new();
    let (first, cursor) = cursor.place(10, 5);
    let (second, cursor) = cursor.place(12, 5);

    assert_eq!((first.left, first.right), (8, 12));
    assert_eq!((second.left, second.right), (13, 14));
    assert_eq!(cursor.previous_edge(), Some(14));
}

proptest! {
    #[test]
    fn placed_spans_never_overlap(
        steps in prop::collection::vec(1i64..12, 1..64),
        width in 1i64..16
    ) {
        let mut cursor = LayoutCursor::new();
        let mut center = 0_i64;
        let mut previous_right: Option<i64> = None;
        for step in steps {
            center += step;
            let (span, next) = cursor.place(center, width);
            cursor = next;
            prop_assert!(span.left <= span.right);
            if let Some(previous_right) = previous_right {
                prop_assert!(previous_right < span.left);
            }
            previous_right = Some(span.right);
        }
    }

    #[test]
    fn rendered_bodies_are_ordered_left_to_right(
        bar_count in 2usize..40,
        bar_spacing in 1.0f64..30.0,
        jitter in 1.0f64..1.5,
        pixel_ratio in prop::sample::select(vec![1.0, 1.5, 2.0, 3.0]),
        align_edges in any::<bool>()
    ) {
        let bars: Vec<FootprintBar> = (0..bar_count)
            .map(|i| {
                let open = 100.0 + i as f64;
                FootprintBar::new(i as i64, open, open + 4.0, open - 4.0, open + 1.0, Vec::new())
                    .expect("bar")
            })
            .collect();
        let options = FootprintStyleOptions {
            align_edges,
            candle_body_visible: true,
            candle_border_visible: false,
            candle_wick_visible: false,
            cluster_visible: false,
            ..FootprintStyleOptions::default()
        };

        let mut renderer = FootprintRenderer::new();
        renderer
            .set_data(
                FootprintRenderData::new(bars, bar_spacing, options)
                    .with_visible_range(VisibleRange::new(0, bar_count)),
            )
            .expect("data");
        let mapper = FnCoordinateMapper::new(
            |price: f64| (300.0 - price) * 3.0,
            move |index: i64| 50.0 + index as f64 * bar_spacing * jitter,
        );

        let mut frame = RenderFrame::new(Viewport::new(4000, 2000));
        let stats = renderer.draw(&mut frame, &mapper, pixel_ratio).expect("draw");
        prop_assert_eq!(stats.bodies_drawn, bar_count);

        let rects: Vec<_> = frame
            .commands
            .iter()
            .filter_map(|command| match command {
                DrawCommand::FillRect(rect) => Some(*rect),
                _ => None,
            })
            .collect();
        for pair in rects.windows(2) {
            prop_assert!(pair[0].right < pair[1].left);
        }
    }
}
