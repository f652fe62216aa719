//! ASCII rendering of a layout
//!
//! Each room is one glyph on even columns and rows. Doors sit in the gaps
//! between neighbors. North is up, so row 0 of the output is `y = height - 1`.

use dg_core::dungeon::{Cell, Direction, DoorState, DungeonLayout, RoomType};

pub fn room_glyph(room_type: RoomType) -> char {
    match room_type {
        RoomType::Spawn => 'S',
        RoomType::Loot => 'L',
        RoomType::Key => 'K',
        RoomType::Locked => 'X',
        RoomType::Gate => 'G',
        RoomType::Trap => 'T',
        RoomType::Empty => '.',
    }
}

fn door_glyph(state: DoorState, passage: char) -> char {
    match state {
        DoorState::Wall => ' ',
        DoorState::Open => passage,
        DoorState::Locked => '#',
    }
}

/// Render the layout as lines of text
pub fn render_map(layout: &DungeonLayout) -> String {
    let (width, height) = layout.grid_size();
    let cols = (2 * width - 1).max(0) as usize;
    let mut out = String::new();

    for y in (0..height).rev() {
        let mut room_row = String::with_capacity(cols);
        let mut door_row = String::with_capacity(cols);
        for x in 0..width {
            let cell = Cell::new(x, y);
            match layout.room_at(cell) {
                Some(room) => {
                    room_row.push(room_glyph(room.room_type));
                    if x + 1 < width {
                        room_row.push(door_glyph(room.door(Direction::Right), '-'));
                    }
                    door_row.push(door_glyph(room.door(Direction::Down), '|'));
                }
                None => {
                    room_row.push(' ');
                    if x + 1 < width {
                        room_row.push(' ');
                    }
                    door_row.push(' ');
                }
            }
            if x + 1 < width {
                door_row.push(' ');
            }
        }
        out.push_str(room_row.trim_end());
        out.push('\n');
        if y > 0 {
            out.push_str(door_row.trim_end());
            out.push('\n');
        }
    }
    out
}

/// Per-type room counts, in `RoomType::ALL` order
pub fn render_summary(layout: &DungeonLayout) -> String {
    let counts: Vec<String> = RoomType::ALL
        .iter()
        .map(|&t| format!("{}={}", t, layout.count(t)))
        .collect();
    format!(
        "seed {} | {} of {} rooms | {}",
        layout.seed(),
        layout.len(),
        layout.requested_rooms(),
        counts.join(" ")
    )
}
