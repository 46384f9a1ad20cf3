use glam::Vec2;
use tile_arena_core::{Command, GameState, TileCoord};
use tile_arena_system_input::{menu_buttons, ControlInput, InputRouting};
use tile_arena_world::{self as world, query, World};

fn click(x: f32, y: f32) -> ControlInput {
    ControlInput::new(Some(Vec2::new(x, y)), false)
}

#[test]
fn menu_click_on_start_button_starts_round() {
    let routing = InputRouting::default();
    let mut commands = Vec::new();
    routing.handle(GameState::Menu, click(400.0, 300.0), &mut commands);
    assert_eq!(commands, vec![Command::StartRound]);
}

#[test]
fn menu_click_on_exit_button_requests_quit() {
    let routing = InputRouting::default();
    let mut commands = Vec::new();
    routing.handle(GameState::Menu, click(301.0, 409.0), &mut commands);
    assert_eq!(commands, vec![Command::Quit]);
}

#[test]
fn menu_click_between_buttons_does_nothing() {
    let routing = InputRouting::default();
    let mut commands = Vec::new();
    routing.handle(GameState::Menu, click(400.0, 340.0), &mut commands);
    routing.handle(GameState::Menu, ControlInput::new(None, true), &mut commands);
    assert!(commands.is_empty());
}

#[test]
fn playing_click_requests_move_to_clicked_tile() {
    let routing = InputRouting::default();
    let mut commands = Vec::new();
    routing.handle(GameState::Playing, click(230.0, 150.0), &mut commands);
    assert_eq!(
        commands,
        vec![Command::MovePlayer {
            tile: TileCoord::new(3, 2)
        }]
    );
}

#[test]
fn click_on_partial_edge_tile_is_ignored() {
    let routing = InputRouting::default();
    let mut commands = Vec::new();
    routing.handle(GameState::Playing, click(799.0, 599.0), &mut commands);
    assert!(commands.is_empty());
}

#[test]
fn ignored_edge_click_leaves_player_target_unchanged() {
    let routing = InputRouting::default();
    let mut world = World::with_seed(5);
    let mut events = Vec::new();
    world::apply(&mut world, Command::StartRound, &mut events);
    let before = *query::actor_view(&world).player().expect("player");

    let mut commands = Vec::new();
    routing.handle(query::game_state(&world), click(799.0, 599.0), &mut commands);
    for command in commands {
        world::apply(&mut world, command, &mut events);
    }

    let after = *query::actor_view(&world).player().expect("player");
    assert_eq!(after.target, before.target);
    assert!(!after.moving);
}

#[test]
fn escape_only_matters_on_game_over() {
    let routing = InputRouting::default();
    let escape = ControlInput::new(None, true);
    let mut commands = Vec::new();

    routing.handle(GameState::Playing, escape, &mut commands);
    assert!(commands.is_empty());

    routing.handle(GameState::GameOver, escape, &mut commands);
    assert_eq!(commands, vec![Command::ReturnToMenu]);
}

#[test]
fn game_over_clicks_are_ignored() {
    let routing = InputRouting::default();
    let mut commands = Vec::new();
    let start = menu_buttons()[0].bounds.center();
    routing.handle(GameState::GameOver, click(start.x, start.y), &mut commands);
    assert!(commands.is_empty());
}
