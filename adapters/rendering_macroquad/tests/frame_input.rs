use glam::Vec2;
use tile_arena_rendering::FrameInput;
use tile_arena_rendering_macroquad::gather_frame_input_from_observations;

#[test]
fn cursor_is_reported_only_for_left_clicks() {
    let cursor = Vec2::new(230.0, 150.0);

    let hover = gather_frame_input_from_observations(cursor, false, false);
    assert_eq!(hover, FrameInput::default());

    let click = gather_frame_input_from_observations(cursor, true, false);
    assert_eq!(click.click, Some(cursor));
    assert!(!click.escape_pressed);
}

#[test]
fn escape_is_forwarded_with_or_without_click() {
    let cursor = Vec2::new(799.0, 599.0);

    let escape = gather_frame_input_from_observations(cursor, false, true);
    assert_eq!(
        escape,
        FrameInput {
            click: None,
            escape_pressed: true,
        }
    );

    let both = gather_frame_input_from_observations(cursor, true, true);
    assert_eq!(both.click, Some(cursor));
    assert!(both.escape_pressed);
}
