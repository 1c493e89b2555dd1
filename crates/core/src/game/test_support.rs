//! Shared fixtures for the session tests: pre-settled sessions, scripted
//! placement, and content fixtures the shipped tables deliberately avoid.

use crate::content::{ContentPack, battles, items};
use crate::content::rooms::{DoorLink, ExitSpec, RoomDef};
use crate::types::{Dir, DoorMark, InputFrame, ItemKey, Pos, RoomKey};

use super::Session;

/// A fresh session already exploring the first room, intro text dismissed.
pub(crate) fn explore_session(seed: u64) -> Session {
    let mut session = Session::new(seed);
    session.start_new_game();
    settle(&mut session);
    session
}

/// Pump frames until the session is quiet: fades finished, line dialogue
/// dismissed, gaslight holds elapsed. Stops at an open option menu so tests
/// can drive the selection themselves.
pub(crate) fn settle(session: &mut Session) {
    for _ in 0..1_000 {
        if session.fx.fade_in_progress() {
            session.update(InputFrame::default());
        } else if session.dialogue.current_page().is_some() {
            session.update(InputFrame::press_confirm());
        } else if session.dialogue.is_blocking() {
            if session.dialogue.current_options().is_some() {
                return;
            }
            session.update(InputFrame::default());
        } else {
            return;
        }
    }
    panic!("session never settled");
}

/// Move the cursor down `index` times and confirm.
pub(crate) fn choose(session: &mut Session, index: usize) {
    for _ in 0..index {
        session.update(InputFrame::press(Dir::Down));
    }
    session.update(InputFrame::press_confirm());
}

/// Drop the player at an exact position, marking the room visited so no
/// description fires.
pub(crate) fn place(session: &mut Session, room: RoomKey, pos: Pos) {
    session.world.room = room;
    session.world.pos = pos;
    session.world.visited.insert(room);
    session.world.move_cooldown = 0;
    session.recompute_nearby();
}

/// Walk into a door mark from the adjacent inward tile and let the
/// transition finish.
pub(crate) fn take_door(session: &mut Session, mark: DoorMark) {
    let room = session.content.room(session.world.room).expect("current room");
    let door = room.door_pos(mark).expect("door in layout");
    let (dir, inward) = match mark {
        DoorMark::Up => (Dir::Up, door.offset(Dir::Down)),
        DoorMark::Down => (Dir::Down, door.offset(Dir::Up)),
        DoorMark::Left => (Dir::Left, door.offset(Dir::Right)),
        DoorMark::Right => (Dir::Right, door.offset(Dir::Left)),
    };
    place(session, room.key, inward);
    session.update(InputFrame::press(dir));
    settle(session);
}

/// Position of an item placement in a room's layout.
pub(crate) fn item_pos(session: &Session, room: RoomKey, item: ItemKey) -> Pos {
    let def = session.content.room(room).expect("room");
    for y in 0..def.height() {
        for x in 0..def.width() {
            let pos = Pos::new(x as i32, y as i32);
            if def.cell_at(pos) == Some(crate::content::Cell::Item(item)) {
                return pos;
            }
        }
    }
    panic!("item {item:?} not placed in {room:?}");
}

/// Single-room world behind a locked door, for the key gate the shipped
/// rooms never use.
pub(crate) static LOCKED_ROOMS: &[RoomDef] = &[RoomDef {
    key: RoomKey("cell"),
    name: "cell",
    description: "四面都是墙。",
    rows: &["#^#", "#.#", "###"],
    legend: &[],
    spawn: Pos::new(1, 1),
    door_links: &[(
        DoorMark::Up,
        DoorLink {
            label: "出口",
            locked: true,
            spec: Some(ExitSpec::Fixed { target: RoomKey("cell"), spawn: Pos::new(1, 1) }),
        },
    )],
    key_spot: None,
    key_fly_rooms: &[],
    trigger_battle: false,
}];

/// World whose first room forces the battle on entry.
pub(crate) static TRAP_ROOMS: &[RoomDef] = &[RoomDef {
    key: RoomKey("trap"),
    name: "trap",
    description: "这里不该进来。",
    rows: &["###", "#.#", "###"],
    legend: &[],
    spawn: Pos::new(1, 1),
    door_links: &[],
    key_spot: None,
    key_fly_rooms: &[],
    trigger_battle: true,
}];

pub(crate) fn fixture_pack(rooms: &'static [RoomDef]) -> ContentPack {
    ContentPack { rooms, items: items::TABLE, battles: battles::TABLE }
}

/// A session already sitting in the battle's first menu.
pub(crate) fn battle_session(seed: u64) -> Session {
    let mut session = explore_session(seed);
    session.handle_after(crate::dialogue::AfterDialogue::BattleCutscene);
    settle(&mut session);
    session
}
