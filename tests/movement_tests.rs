use image::RgbaImage;

use tile_walk::{
    game::{Game, GameState},
    grid::{Direction, Size},
    input::{InputEvent, Key, MouseButton},
    player::Player,
    sprite::Sprite,
    tile::TileSet,
};

const GRID: Size = Size {
    width: 6,
    height: 5,
};
const TILE: Size = Size {
    width: 94,
    height: 94,
};

fn create_test_game() -> Game {
    let mut tiles = TileSet::new();
    let sprite = tiles.insert("player", Sprite::from(RgbaImage::new(94, 94)));

    Game::new(Player::new(sprite, (0, 0), GRID, TILE))
}

fn key_down(key: Key) -> InputEvent {
    InputEvent::KeyDown(key)
}

#[test]
fn test_right_right_down() {
    let mut game = create_test_game();

    game.handle_event(&key_down(Key::Right));
    game.handle_event(&key_down(Key::Right));
    game.handle_event(&key_down(Key::Down));

    assert_eq!(game.player().position(), (2, 1));
    assert_eq!(game.player().tile().rect().x, 188);
    assert_eq!(game.player().tile().rect().y, 94);
}

#[test]
fn test_left_and_up_at_origin_are_ignored() {
    let mut game = create_test_game();

    game.handle_event(&key_down(Key::Left));
    game.handle_event(&key_down(Key::Up));

    assert_eq!(game.player().position(), (0, 0));
    assert_eq!(game.state(), GameState::Running);
}

#[test]
fn test_right_and_down_stop_at_last_cell() {
    let mut tiles = TileSet::new();
    let sprite = tiles.insert("player", Sprite::from(RgbaImage::new(94, 94)));
    let mut player = Player::new(sprite, (5, 4), GRID, TILE);

    assert!(!player.move_right());
    assert!(!player.move_down());
    assert_eq!(player.position(), (5, 4));

    assert!(player.move_left());
    assert!(player.move_up());
    assert_eq!(player.position(), (4, 3));
}

#[test]
fn test_start_position_is_clamped() {
    let mut tiles = TileSet::new();
    let sprite = tiles.insert("player", Sprite::from(RgbaImage::new(94, 94)));
    let player = Player::new(sprite, (40, 40), GRID, TILE);

    assert_eq!(player.position(), (5, 4));
}

#[test]
fn test_position_stays_in_bounds_for_any_walk() {
    let mut tiles = TileSet::new();
    let sprite = tiles.insert("player", Sprite::from(RgbaImage::new(94, 94)));
    let mut player = Player::new(sprite, (0, 0), GRID, TILE);

    // Deterministic but irregular walk, biased towards the far corner.
    let mut state: u32 = 7;
    let mut visited_corner = false;

    for _ in 0..2000 {
        state = state.wrapping_mul(1_103_515_245).wrapping_add(12_345);
        let direction = match (state >> 16) % 6 {
            0 => Direction::Left,
            1 => Direction::Up,
            2 | 3 => Direction::Right,
            _ => Direction::Down,
        };

        let before = player.position();
        let moved = player.step(direction);
        let (x, y) = player.position();

        assert!(x < GRID.width && y < GRID.height, "({}, {}) left the grid", x, y);
        assert_eq!(moved, before != (x, y));

        visited_corner |= (x, y) == (5, 4);
    }

    assert!(visited_corner);
}

#[test]
fn test_mouse_click_updates_message_only() {
    let mut game = create_test_game();

    game.handle_event(&InputEvent::MouseButtonDown {
        button: MouseButton::Left,
        x: 120,
        y: 80,
    });

    assert_eq!(game.player().position(), (0, 0));
    assert!(game.message().text().contains("left button"));
    assert!(game.message().text().contains("120,80"));
}

#[test]
fn test_every_event_replaces_message_once() {
    let mut game = create_test_game();
    let events = [
        key_down(Key::Right),
        InputEvent::KeyUp(Key::Right),
        key_down(Key::Char('x')),
        key_down(Key::Left),
        InputEvent::MouseButtonDown {
            button: MouseButton::Right,
            x: 1,
            y: 2,
        },
    ];

    assert_eq!(game.message().text(), "Initialized");
    assert_eq!(game.message().generation(), 0);

    for (i, event) in events.iter().enumerate() {
        game.handle_event(event);

        assert_eq!(game.message().generation(), i as u64 + 1);
        assert_eq!(game.message().text(), event.to_string());
    }
}

#[test]
fn test_key_up_does_not_move() {
    let mut game = create_test_game();

    game.handle_event(&InputEvent::KeyUp(Key::Right));

    assert_eq!(game.player().position(), (0, 0));
    assert_eq!(game.message().text(), "key up: right");
}

#[test]
fn test_quit_transitions() {
    for event in [
        InputEvent::Quit,
        key_down(Key::Char('q')),
        key_down(Key::Escape),
    ] {
        let mut game = create_test_game();

        game.handle_event(&event);

        assert_eq!(game.state(), GameState::Quit);
        assert!(!game.is_running());
    }
}
