use serde::{Deserialize, Serialize};

/// Grid coordinate. `y` first to match row-major room layouts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Pos {
    pub y: i32,
    pub x: i32,
}

impl Pos {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { y, x }
    }

    pub fn offset(self, dir: Dir) -> Self {
        let (dx, dy) = dir.delta();
        Self { y: self.y + dy, x: self.x + dx }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Dir {
    Up,
    Down,
    Left,
    Right,
}

impl Dir {
    pub fn delta(self) -> (i32, i32) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }
}

/// Stable content id of a room. Content-defined; runtime code only obtains
/// one by lookup through the room table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RoomKey(pub &'static str);

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ItemKey(pub &'static str);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BattleKey(pub &'static str);

/// Door marker inside a room layout. Each mark appears at most once per room
/// and maps to one entry in the room's door-link table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DoorMark {
    Up,
    Down,
    Left,
    Right,
}

/// Fire-and-forget audio cue names consumed by the frontend. The core never
/// reads anything back from the audio collaborator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cue {
    Step,
    Hurt,
    ItemBreak,
    Confirm,
    Cancel,
    MenuMove,
    KeyFly,
    BattleStart,
    Save,
    Gaslight,
}

/// One frame of sampled input. Pressed fields are edge-triggered; held fields
/// are level-triggered and only consulted by the bullet phase.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InputFrame {
    pub dir_pressed: Option<Dir>,
    pub held_up: bool,
    pub held_down: bool,
    pub held_left: bool,
    pub held_right: bool,
    pub confirm: bool,
    pub cancel: bool,
}

impl InputFrame {
    pub fn press(dir: Dir) -> Self {
        Self { dir_pressed: Some(dir), ..Self::default() }
    }

    pub fn press_confirm() -> Self {
        Self { confirm: true, ..Self::default() }
    }
}

/// Session event log. Read by the frontend for diagnostics display; also the
/// channel through which ignored content errors surface (they never abort a
/// tick).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LogEvent {
    RoomEntered { room: RoomKey, first_visit: bool },
    ExitTaken { from: RoomKey, door: DoorMark, to: RoomKey },
    KeyFlew { from: RoomKey, to: RoomKey, attempt: u32 },
    KeyCaught { attempts: u32 },
    GaslightShown { count: u32 },
    BattleTriggered { room: RoomKey },
    BattleEnded,
    SaveRequested,
    SaveCompleted,
    SaveFailed,
    ContentErrorIgnored { context: &'static str, id: String },
}

/// Load-time content validation failures. These are defects in the shipped
/// tables, not runtime conditions; `ContentPack::validate` collects all of
/// them so a single run reports every broken link.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ContentError {
    UnknownRoomTarget { room: RoomKey, door: DoorMark, target: RoomKey },
    SpawnOutOfBounds { room: RoomKey, door: DoorMark, target: RoomKey, spawn: Pos },
    DuplicateDoorMark { room: RoomKey, door: DoorMark },
    UnknownLegendItem { room: RoomKey, marker: char },
    KeyRoomWithoutSpot { room: RoomKey, key_room: RoomKey },
    UnknownKeyRoom { room: RoomKey, key_room: RoomKey },
    BadDistortedWeights { room: RoomKey, door: DoorMark },
}

/// Why a saved snapshot could not be applied to a fresh session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RestoreError {
    UnknownRoom(String),
    UnknownKeyRoom(String),
    PositionOutOfBounds { room: &'static str, pos: Pos },
}
