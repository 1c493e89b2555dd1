//! Room table in the layout-array + door-link representation.
//! A room's grid is authored as character rows: `#` wall, `.` floor,
//! `^ v < >` door marks, any other byte an item placement resolved through
//! the room's legend. Door labels are part of the disorientation mechanic:
//! they routinely lie about the link's real target and must not be "fixed"
//! to match it.

use super::keys;
use crate::types::{DoorMark, ItemKey, Pos, RoomKey};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cell {
    Wall,
    Floor,
    Door(DoorMark),
    Item(ItemKey),
}

/// What a door mark claims versus where it actually leads.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DoorLink {
    /// Player-facing name of the destination. Frequently a lie.
    pub label: &'static str,
    /// Locked doors refuse traversal until the key is held.
    pub locked: bool,
    /// `None` means the door never opens: rejection cue, no state change.
    pub spec: Option<ExitSpec>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ExitSpec {
    /// Deterministic link.
    Fixed { target: RoomKey, spawn: Pos },
    /// Deterministic, but lands with a discontinuity flicker instead of a
    /// walk, optionally announced by a one-shot message.
    Teleport { target: RoomKey, spawn: Pos, message: Option<&'static str> },
    /// Weighted random draw over candidate destinations. Weights must sum to
    /// one; absent weights mean uniform.
    Distorted { targets: &'static [(RoomKey, Pos)], weights: Option<&'static [f64]> },
    /// Deterministic "you are back where you started", even when the target
    /// id differs from the current room.
    Loop { target: RoomKey, spawn: Pos, message: &'static str },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExitKind {
    Fixed,
    Teleport,
    Distorted,
    Loop,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResolvedExit {
    pub target: RoomKey,
    pub spawn: Pos,
    pub message: Option<&'static str>,
    pub kind: ExitKind,
}

pub struct RoomDef {
    pub key: RoomKey,
    pub name: &'static str,
    pub description: &'static str,
    pub rows: &'static [&'static str],
    pub legend: &'static [(u8, ItemKey)],
    pub spawn: Pos,
    pub door_links: &'static [(DoorMark, DoorLink)],
    /// Where the roaming key appears while this room hosts it.
    pub key_spot: Option<Pos>,
    /// Rooms eligible to host the roaming key. Declared once, on the room
    /// that owns the chase.
    pub key_fly_rooms: &'static [RoomKey],
    /// Entering this room forces the battle, once per session.
    pub trigger_battle: bool,
}

impl RoomDef {
    pub fn width(&self) -> usize {
        self.rows.first().map_or(0, |row| row.len())
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn in_bounds(&self, pos: Pos) -> bool {
        pos.x >= 0
            && pos.y >= 0
            && (pos.x as usize) < self.width()
            && (pos.y as usize) < self.height()
    }

    pub fn marker_at(&self, pos: Pos) -> Option<u8> {
        if !self.in_bounds(pos) {
            return None;
        }
        self.rows[pos.y as usize].as_bytes().get(pos.x as usize).copied()
    }

    pub fn cell_at(&self, pos: Pos) -> Option<Cell> {
        let marker = self.marker_at(pos)?;
        Some(match marker {
            b'#' => Cell::Wall,
            b'.' => Cell::Floor,
            b'^' => Cell::Door(DoorMark::Up),
            b'v' => Cell::Door(DoorMark::Down),
            b'<' => Cell::Door(DoorMark::Left),
            b'>' => Cell::Door(DoorMark::Right),
            other => self
                .legend
                .iter()
                .find(|(byte, _)| *byte == other)
                .map_or(Cell::Floor, |&(_, item)| Cell::Item(item)),
        })
    }

    /// Floor and item cells are walkable; walls and doors are not (stepping
    /// onto a door resolves the exit instead of moving).
    pub fn is_walkable(&self, pos: Pos) -> bool {
        matches!(self.cell_at(pos), Some(Cell::Floor | Cell::Item(_)))
    }

    pub fn link(&self, door: DoorMark) -> Option<DoorLink> {
        self.door_links.iter().find(|(mark, _)| *mark == door).map(|&(_, link)| link)
    }

    pub fn door_pos(&self, door: DoorMark) -> Option<Pos> {
        for y in 0..self.height() {
            for x in 0..self.width() {
                let pos = Pos::new(x as i32, y as i32);
                if self.cell_at(pos) == Some(Cell::Door(door)) {
                    return Some(pos);
                }
            }
        }
        None
    }
}

pub static TABLE: &[RoomDef] = &[
    RoomDef {
        key: keys::BEDROOM_1,
        name: "卧室",
        description: "你的卧室。一切看起来都很熟悉，但又有些不对劲。",
        rows: &[
            "####^#####",
            "#b..w..d.#",
            "#........#",
            "#........#",
            "<........>",
            "#........#",
            "#........#",
            "####v#####",
        ],
        legend: &[(b'b', keys::BED), (b'w', keys::WINDOW), (b'd', keys::DESK)],
        spawn: Pos::new(5, 4),
        door_links: &[
            (
                DoorMark::Up,
                DoorLink {
                    label: "走廊",
                    locked: false,
                    spec: Some(ExitSpec::Fixed { target: keys::LIVING_ROOM, spawn: Pos::new(6, 6) }),
                },
            ),
            (
                DoorMark::Left,
                DoorLink {
                    label: "客厅",
                    locked: false,
                    spec: Some(ExitSpec::Distorted {
                        targets: &[
                            (keys::LIVING_ROOM, Pos::new(10, 4)),
                            (keys::BEDROOM_2, Pos::new(8, 4)),
                        ],
                        weights: None,
                    }),
                },
            ),
            (
                DoorMark::Right,
                DoorLink {
                    label: "卧室",
                    locked: false,
                    spec: Some(ExitSpec::Fixed { target: keys::LIVING_ROOM, spawn: Pos::new(1, 4) }),
                },
            ),
            // The down door exists in the layout but never opens.
            (DoorMark::Down, DoorLink { label: "???", locked: false, spec: None }),
        ],
        key_spot: None,
        key_fly_rooms: &[],
        trigger_battle: false,
    },
    RoomDef {
        key: keys::LIVING_ROOM,
        name: "客厅",
        description: "客厅。光线有些诡异，物品摆放也不太对劲。",
        rows: &[
            "#####^######",
            "#....g..t..#",
            "#.s........#",
            "#..........#",
            "<..........>",
            "#..........#",
            "#..........#",
            "#####v######",
        ],
        legend: &[(b's', keys::SOFA), (b't', keys::TV), (b'g', keys::WINDOW_GASLIGHT)],
        spawn: Pos::new(6, 4),
        door_links: &[
            (
                DoorMark::Up,
                DoorLink {
                    label: "妈妈的房间",
                    locked: false,
                    spec: Some(ExitSpec::Fixed { target: keys::HALLWAY, spawn: Pos::new(7, 4) }),
                },
            ),
            (
                DoorMark::Left,
                DoorLink {
                    label: "卧室",
                    locked: false,
                    spec: Some(ExitSpec::Loop {
                        target: keys::LIVING_ROOM,
                        spawn: Pos::new(6, 4),
                        message: "你走了很久，却又回到了原地。",
                    }),
                },
            ),
            (
                DoorMark::Right,
                DoorLink {
                    label: "走廊",
                    locked: false,
                    spec: Some(ExitSpec::Distorted {
                        targets: &[
                            (keys::BEDROOM_2, Pos::new(1, 4)),
                            (keys::HALLWAY, Pos::new(7, 4)),
                            (keys::LIVING_ROOM, Pos::new(6, 4)),
                        ],
                        weights: Some(&[0.4, 0.4, 0.2]),
                    }),
                },
            ),
            (
                DoorMark::Down,
                DoorLink {
                    label: "储藏室",
                    locked: false,
                    spec: Some(ExitSpec::Teleport {
                        target: keys::BEDROOM_2,
                        spawn: Pos::new(5, 1),
                        message: Some("你迈出一步，世界闪了一下。"),
                    }),
                },
            ),
        ],
        key_spot: None,
        key_fly_rooms: &[],
        trigger_battle: false,
    },
    RoomDef {
        key: keys::BEDROOM_2,
        name: "卧室...?",
        description: "这是你的卧室吗？看起来不太一样...",
        rows: &[
            "####^#####",
            "#b..w..d.#",
            "#........#",
            "#........#",
            "<........>",
            "#........#",
            "#........#",
            "##########",
        ],
        legend: &[
            (b'b', keys::BED_BROKEN),
            (b'w', keys::WINDOW_DARK),
            (b'd', keys::DESK_EMPTY),
        ],
        spawn: Pos::new(5, 4),
        door_links: &[
            (
                DoorMark::Up,
                DoorLink {
                    label: "卧室",
                    locked: false,
                    spec: Some(ExitSpec::Distorted {
                        targets: &[
                            (keys::BEDROOM_1, Pos::new(5, 6)),
                            (keys::HALLWAY, Pos::new(7, 4)),
                            (keys::LIVING_ROOM, Pos::new(6, 6)),
                        ],
                        weights: None,
                    }),
                },
            ),
            (
                DoorMark::Left,
                DoorLink {
                    label: "客厅",
                    locked: false,
                    spec: Some(ExitSpec::Fixed { target: keys::LIVING_ROOM, spawn: Pos::new(10, 4) }),
                },
            ),
            (
                DoorMark::Right,
                DoorLink {
                    label: "走廊",
                    locked: false,
                    spec: Some(ExitSpec::Fixed { target: keys::HALLWAY, spawn: Pos::new(1, 3) }),
                },
            ),
        ],
        key_spot: None,
        key_fly_rooms: &[],
        trigger_battle: false,
    },
    RoomDef {
        key: keys::HALLWAY,
        name: "走廊",
        description: "走廊。尽头有一扇门...",
        rows: &[
            "#######^######",
            "#............#",
            "#............#",
            "<.S..........>",
            "#............#",
            "#######v######",
        ],
        legend: &[(b'S', keys::SAVE_POINT)],
        spawn: Pos::new(7, 3),
        door_links: &[
            (
                DoorMark::Up,
                DoorLink {
                    label: "妈妈的房间",
                    locked: false,
                    spec: Some(ExitSpec::Fixed { target: keys::MOM_DOOR_ROOM, spawn: Pos::new(5, 6) }),
                },
            ),
            (
                DoorMark::Left,
                DoorLink {
                    label: "卧室",
                    locked: false,
                    spec: Some(ExitSpec::Fixed { target: keys::BEDROOM_1, spawn: Pos::new(8, 4) }),
                },
            ),
            (
                DoorMark::Right,
                DoorLink {
                    label: "客厅",
                    locked: false,
                    spec: Some(ExitSpec::Teleport {
                        target: keys::LIVING_ROOM,
                        spawn: Pos::new(1, 4),
                        message: None,
                    }),
                },
            ),
            (
                DoorMark::Down,
                DoorLink {
                    label: "卧室",
                    locked: false,
                    spec: Some(ExitSpec::Fixed { target: keys::BEDROOM_2, spawn: Pos::new(5, 1) }),
                },
            ),
        ],
        key_spot: None,
        key_fly_rooms: &[],
        trigger_battle: false,
    },
    RoomDef {
        key: keys::MOM_DOOR_ROOM,
        name: "妈妈的房间",
        description: "妈妈的房间门口。门是锁着的。",
        rows: &[
            "##########",
            "#...M....#",
            "#........#",
            "#........#",
            "<........>",
            "#........#",
            "#........#",
            "#####v####",
        ],
        legend: &[(b'M', keys::MOM_DOOR)],
        spawn: Pos::new(5, 6),
        door_links: &[
            (
                DoorMark::Left,
                DoorLink {
                    label: "储藏室",
                    locked: false,
                    spec: Some(ExitSpec::Fixed { target: keys::KEY_ROOM_1, spawn: Pos::new(6, 4) }),
                },
            ),
            (
                DoorMark::Right,
                DoorLink {
                    label: "杂物间",
                    locked: false,
                    spec: Some(ExitSpec::Fixed { target: keys::KEY_ROOM_2, spawn: Pos::new(1, 4) }),
                },
            ),
            (
                DoorMark::Down,
                DoorLink {
                    label: "走廊",
                    locked: false,
                    spec: Some(ExitSpec::Fixed { target: keys::HALLWAY, spawn: Pos::new(7, 1) }),
                },
            ),
        ],
        key_spot: Some(Pos::new(7, 4)),
        key_fly_rooms: &[keys::KEY_ROOM_1, keys::KEY_ROOM_2, keys::MOM_DOOR_ROOM],
        trigger_battle: false,
    },
    RoomDef {
        key: keys::KEY_ROOM_1,
        name: "储藏室",
        description: "一个黑暗的储藏室。",
        rows: &[
            "####^###",
            "#......#",
            "#.B....#",
            "#......#",
            "#......>",
            "#......#",
            "#......#",
            "####v###",
        ],
        legend: &[(b'B', keys::BOXES)],
        spawn: Pos::new(4, 4),
        door_links: &[
            (
                DoorMark::Up,
                DoorLink {
                    label: "走廊",
                    locked: false,
                    spec: Some(ExitSpec::Fixed { target: keys::MOM_DOOR_ROOM, spawn: Pos::new(2, 4) }),
                },
            ),
            (
                DoorMark::Down,
                DoorLink {
                    label: "杂物间",
                    locked: false,
                    spec: Some(ExitSpec::Fixed { target: keys::KEY_ROOM_2, spawn: Pos::new(4, 1) }),
                },
            ),
            (
                DoorMark::Right,
                DoorLink {
                    label: "妈妈的房间",
                    locked: false,
                    spec: Some(ExitSpec::Loop {
                        target: keys::KEY_ROOM_1,
                        spawn: Pos::new(4, 4),
                        message: "门开了。门后还是这个房间。",
                    }),
                },
            ),
        ],
        key_spot: Some(Pos::new(4, 2)),
        key_fly_rooms: &[],
        trigger_battle: false,
    },
    RoomDef {
        key: keys::KEY_ROOM_2,
        name: "杂物间",
        description: "堆满杂物的房间。",
        rows: &[
            "####^###",
            "#......#",
            "#......#",
            "#..J...#",
            "<......#",
            "#......#",
            "#......#",
            "####v###",
        ],
        legend: &[(b'J', keys::JUNK)],
        spawn: Pos::new(4, 4),
        door_links: &[
            (
                DoorMark::Up,
                DoorLink {
                    label: "储藏室",
                    locked: false,
                    spec: Some(ExitSpec::Fixed { target: keys::KEY_ROOM_1, spawn: Pos::new(4, 6) }),
                },
            ),
            (
                DoorMark::Left,
                DoorLink {
                    label: "妈妈的房间",
                    locked: false,
                    spec: Some(ExitSpec::Fixed { target: keys::MOM_DOOR_ROOM, spawn: Pos::new(8, 4) }),
                },
            ),
            (
                DoorMark::Down,
                DoorLink {
                    label: "走廊",
                    locked: false,
                    spec: Some(ExitSpec::Distorted {
                        targets: &[
                            (keys::MOM_DOOR_ROOM, Pos::new(5, 6)),
                            (keys::KEY_ROOM_2, Pos::new(4, 4)),
                        ],
                        weights: Some(&[0.6, 0.4]),
                    }),
                },
            ),
        ],
        key_spot: Some(Pos::new(3, 5)),
        key_fly_rooms: &[],
        trigger_battle: false,
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_are_rectangular() {
        for room in TABLE {
            let width = room.width();
            for row in room.rows {
                assert_eq!(row.len(), width, "ragged layout in {:?}", room.key);
            }
        }
    }

    #[test]
    fn default_spawns_are_walkable() {
        for room in TABLE {
            assert!(room.is_walkable(room.spawn), "spawn blocked in {:?}", room.key);
        }
    }

    #[test]
    fn key_spots_are_walkable_floor() {
        for room in TABLE {
            if let Some(spot) = room.key_spot {
                assert!(room.is_walkable(spot), "key spot blocked in {:?}", room.key);
            }
        }
    }

    #[test]
    fn cell_lookup_reads_layout_markers() {
        let bedroom = TABLE.iter().find(|r| r.key == super::keys::BEDROOM_1).unwrap();
        assert_eq!(bedroom.cell_at(Pos::new(4, 0)), Some(Cell::Door(DoorMark::Up)));
        assert_eq!(bedroom.cell_at(Pos::new(0, 4)), Some(Cell::Door(DoorMark::Left)));
        assert_eq!(bedroom.cell_at(Pos::new(1, 1)), Some(Cell::Item(super::keys::BED)));
        assert_eq!(bedroom.cell_at(Pos::new(0, 0)), Some(Cell::Wall));
        assert_eq!(bedroom.cell_at(Pos::new(-1, 0)), None);
    }

    #[test]
    fn bedroom_up_door_label_lies_about_its_target() {
        // The door says "走廊" (hallway); the link actually goes to the
        // living room. This mismatch is gameplay, not a data bug.
        let bedroom = TABLE.iter().find(|r| r.key == super::keys::BEDROOM_1).unwrap();
        let link = bedroom.link(DoorMark::Up).unwrap();
        assert_eq!(link.label, "走廊");
        match link.spec {
            Some(ExitSpec::Fixed { target, .. }) => assert_eq!(target, super::keys::LIVING_ROOM),
            other => panic!("unexpected spec {other:?}"),
        }
    }
}
