use footprint_rs::ChartError;
use footprint_rs::core::Viewport;
use footprint_rs::render::{
    Color, DrawCommand, DrawingSurface, FontSpec, NullRenderer, RenderFrame, RenderRect, Renderer,
};

#[test]
fn recorded_frame_replays_identically() {
    let mut frame = RenderFrame::new(Viewport::new(64, 64));
    frame.set_global_alpha(0.4);
    frame.set_fill_color(Color::rgb8(0x45, 0x75, 0xB4));
    frame.fill_rect(1, 2, 10, 12).expect("rect");
    frame.set_font(&FontSpec::new(11.0, "Helvetica"));
    frame.set_fill_color(Color::rgb(1.0, 1.0, 1.0));
    frame.fill_text_centered("1.2M", 5.5, 7.0).expect("text");

    let mut copy = RenderFrame::new(Viewport::new(64, 64));
    frame.replay(&mut copy).expect("replay");
    assert_eq!(copy.commands, frame.commands);
    assert_eq!(copy.global_alpha(), 0.4);
}

#[test]
fn degenerate_rects_are_skipped_by_surfaces() {
    let mut frame = RenderFrame::new(Viewport::new(8, 8));
    let drawn = frame
        .fill_render_rect(&RenderRect::new(4, 0, 3, 2, Color::TRANSPARENT))
        .expect("skip");
    assert!(!drawn);
    assert!(frame.is_empty());

    let err = frame.fill_rect(0, 5, 2, 4).expect_err("inverted rect");
    assert!(matches!(err, ChartError::InvalidData(_)));
}

#[test]
fn null_renderer_validates_and_counts() {
    let mut frame = RenderFrame::new(Viewport::new(32, 32));
    frame.set_fill_color(Color::rgb(0.2, 0.3, 0.4));
    frame.fill_rect(0, 0, 3, 3).expect("rect");
    frame.fill_text_centered("0.00", 2.0, 2.0).expect("text");

    let mut renderer = NullRenderer::default();
    renderer.render(&frame).expect("render");
    assert_eq!(renderer.last_rect_count, 1);
    assert_eq!(renderer.last_text_count, 1);

    frame.commands.push(DrawCommand::SetGlobalAlpha(3.0));
    assert!(renderer.render(&frame).is_err());

    let empty = RenderFrame::new(Viewport::new(0, 10));
    let err = renderer.render(&empty).expect_err("zero viewport");
    assert!(matches!(err, ChartError::InvalidViewport { width: 0, height: 10 }));
}
