use footprint_rs::ChartError;
use footprint_rs::core::{
    DensityTable, FnCoordinateMapper, HeatmapColumn, HeatmapSample, PriceWindow, Viewport,
    VisibleRange,
};
use footprint_rs::render::{Color, DrawCommand, RenderFrame, RenderRect};
use footprint_rs::{HeatmapRenderData, HeatmapRenderer, HeatmapStyleOptions};

const C0: Color = Color::rgb8(0x45, 0x75, 0xB4);
const C1: Color = Color::rgb8(0xCD, 0x47, 0x3E);
const C2: Color = Color::rgb8(0xAB, 0xD9, 0xE9);

fn options() -> HeatmapStyleOptions {
    HeatmapStyleOptions::default()
        .with_tiers(DensityTable::from_parallel(&[3e6, 5e6, 8e6], &[C0, C1, C2]).expect("tiers"))
        .with_block_size_y(10.0)
        .with_alpha(0.5)
}

fn columns(values: &[f64]) -> Vec<HeatmapColumn> {
    values
        .iter()
        .enumerate()
        .map(|(index, &value)| {
            HeatmapColumn::new(index as i64, vec![HeatmapSample::new(150.0, value)])
        })
        .collect()
}

fn renderer(values: &[f64], bar_spacing: f64) -> HeatmapRenderer {
    let mut renderer = HeatmapRenderer::new();
    renderer
        .set_data(
            HeatmapRenderData::new(columns(values), bar_spacing, options())
                .with_visible_range(VisibleRange::new(0, values.len())),
        )
        .expect("data");
    renderer
}

#[test]
fn sample_is_classified_and_drawn_with_global_alpha() {
    let mapper = FnCoordinateMapper::new(
        |price: f64| (200.0 - price) * 2.0,
        |index: i64| 20.0 + index as f64 * 10.0,
    );
    let mut renderer = renderer(&[4e6], 10.0);

    let mut frame = RenderFrame::new(Viewport::new(200, 400));
    let stats = renderer.draw(&mut frame, &mapper, 1.0).expect("draw");

    assert_eq!(stats.blocks_drawn, 1);
    assert_eq!(
        frame.commands,
        vec![
            DrawCommand::SetGlobalAlpha(0.5),
            // y(150) = 100, 10px block centered on it; 10px column around x=20.
            DrawCommand::FillRect(RenderRect::new(15, 95, 24, 104, C0)),
            DrawCommand::SetGlobalAlpha(1.0),
        ]
    );
}

#[test]
fn bar_spacing_change_rebuilds_column_geometry() {
    let narrow = FnCoordinateMapper::new(|_: f64| 100.0, |index: i64| 20.0 + index as f64 * 10.0);
    let wide = FnCoordinateMapper::new(|_: f64| 100.0, |index: i64| 20.0 + index as f64 * 20.0);
    let mut renderer = renderer(&[4e6, 6e6], 10.0);

    let mut frame = RenderFrame::new(Viewport::new(200, 400));
    renderer.draw(&mut frame, &narrow, 1.0).expect("draw");
    let before = renderer.column_geometry().to_vec();
    assert_eq!((before[0].left, before[0].right, before[0].center_x), (15, 24, 20));
    assert_eq!((before[1].left, before[1].right, before[1].center_x), (25, 34, 30));

    renderer
        .set_viewport(Some(VisibleRange::new(0, 2)), 20.0)
        .expect("viewport");
    assert!(renderer.column_geometry().is_empty());

    let stats = renderer.draw(&mut frame, &wide, 1.0).expect("draw");
    let after = renderer.column_geometry().to_vec();
    assert!(stats.geometry_rebuilt);
    assert_eq!(renderer.cache_builds(), 2);
    assert_ne!(before, after);
    assert_eq!((after[1].left, after[1].right, after[1].center_x), (30, 49, 40));
}

#[test]
fn restyling_and_value_updates_keep_geometry() {
    let mapper = FnCoordinateMapper::new(|_: f64| 100.0, |index: i64| 20.0 + index as f64 * 10.0);
    let mut renderer = renderer(&[4e6, 6e6], 10.0);
    let mut frame = RenderFrame::new(Viewport::new(200, 400));
    renderer.draw(&mut frame, &mapper, 1.0).expect("draw");

    renderer.set_options(options().with_alpha(0.8)).expect("options");
    renderer.update_samples(columns(&[9e6, 1e6]));
    renderer
        .set_viewport(Some(VisibleRange::new(0, 2)), 10.0)
        .expect("same viewport");
    let stats = renderer.draw(&mut frame, &mapper, 1.0).expect("draw");

    assert!(!stats.geometry_rebuilt);
    assert_eq!(renderer.cache_builds(), 1);
    assert_eq!(stats.blocks_drawn, 1);
    assert_eq!(stats.samples_unclassified, 1);
}

#[test]
fn structural_sample_change_invalidates_geometry() {
    let mapper = FnCoordinateMapper::new(|_: f64| 100.0, |index: i64| 20.0 + index as f64 * 10.0);
    let mut renderer = renderer(&[4e6, 6e6], 10.0);
    let mut frame = RenderFrame::new(Viewport::new(200, 400));
    renderer.draw(&mut frame, &mapper, 1.0).expect("draw");

    renderer.update_samples(columns(&[4e6, 6e6, 9e6]));
    assert!(renderer.column_geometry().is_empty());
    renderer.draw(&mut frame, &mapper, 1.0).expect("draw");
    assert_eq!(renderer.cache_builds(), 2);

    renderer.invalidate_geometry();
    renderer.draw(&mut frame, &mapper, 1.0).expect("draw");
    assert_eq!(renderer.cache_builds(), 3);
}

#[test]
fn samples_outside_window_or_above_pane_are_skipped() {
    let mapper = FnCoordinateMapper::new(
        |price: f64| (200.0 - price) * 2.0,
        |index: i64| 20.0 + index as f64 * 10.0,
    );
    let column = HeatmapColumn::new(
        0,
        vec![
            HeatmapSample::new(150.0, 9e6),
            HeatmapSample::new(120.0, 9e6),
            HeatmapSample::new(200.0, 9e6),
        ],
    );
    let mut renderer = HeatmapRenderer::new();
    renderer
        .set_data(
            HeatmapRenderData::new(vec![column], 10.0, options())
                .with_visible_range(VisibleRange::new(0, 1))
                .with_price_window(PriceWindow::new(130.0, 210.0)),
        )
        .expect("data");

    let mut frame = RenderFrame::new(Viewport::new(200, 400));
    let stats = renderer.draw(&mut frame, &mapper, 1.0).expect("draw");

    assert_eq!(stats.blocks_drawn, 1);
    assert_eq!(stats.samples_clipped, 2);

    renderer.set_price_window(None);
    let stats = renderer.draw(&mut frame, &mapper, 1.0).expect("draw");
    assert_eq!(stats.blocks_drawn, 2);
}

#[test]
fn block_height_scales_with_pixel_ratio() {
    let mapper = FnCoordinateMapper::new(|_: f64| 50.0, |_: i64| 20.0);
    let mut renderer = renderer(&[9e6], 10.0);

    let mut frame = RenderFrame::new(Viewport::new(200, 400));
    renderer.draw(&mut frame, &mapper, 2.0).expect("draw");

    let block = frame.rects().next().copied().expect("block");
    assert_eq!(block.height(), 20);
    assert_eq!(block.width(), 20);
    assert_eq!((block.top, block.bottom), (90, 109));
}

#[test]
fn missing_data_is_a_no_op_and_bad_options_fail() {
    let mapper = FnCoordinateMapper::new(|_: f64| 50.0, |_: i64| 20.0);
    let mut renderer = HeatmapRenderer::new();
    let mut frame = RenderFrame::new(Viewport::new(10, 10));
    let stats = renderer.draw(&mut frame, &mapper, 1.0).expect("no data");
    assert_eq!(stats.columns_visited, 0);
    assert!(frame.is_empty());

    let err = renderer
        .set_data(HeatmapRenderData::new(
            columns(&[1.0]),
            10.0,
            options().with_block_size_y(-1.0),
        ))
        .expect_err("negative block size");
    assert!(matches!(err, ChartError::InvalidConfiguration(_)));

    let err = renderer
        .set_options(options().with_alpha(f64::NAN))
        .expect_err("nan alpha");
    assert!(matches!(err, ChartError::InvalidConfiguration(_)));
}

#[test]
fn far_off_screen_columns_do_not_overflow() {
    let mapper = FnCoordinateMapper::new(|_: f64| 1e19, |_: i64| 1e19);
    let mut renderer = renderer(&[9e6, 9e6], 1e12);
    let mut frame = RenderFrame::new(Viewport::new(200, 400));

    let stats = renderer.draw(&mut frame, &mapper, 2.0).expect("draw");
    assert_eq!(stats.blocks_drawn, 2);
    assert!(renderer.column_geometry().iter().all(|column| column.left <= column.right));
    frame.validate().expect("valid frame");
}
