//! Static world content: rooms, items, and battle definitions.
//! Tables are authored as `'static` data and validated once at startup;
//! nothing in here is mutated during a session.

use crate::rng::UnitRoll;
use crate::types::{ContentError, DoorMark, ItemKey, Pos, RoomKey};

pub mod battles;
pub mod items;
pub mod rooms;

pub use battles::{
    ActionMechanic, BattleAction, BattleDef, BulletPattern, EnhancedBullet, NegotiateOption, RectPx,
};
pub use items::{EffectKind, Interaction, InteractionKind, ItemDef, ItemOption};
pub use rooms::{Cell, DoorLink, ExitKind, ExitSpec, ResolvedExit, RoomDef};

/// Frames between accepted grid steps.
pub const MOVE_COOLDOWN_FRAMES: u8 = 8;

/// Interactions with the roaming key before it lets itself be caught.
pub const MAX_KEY_FLY_ATTEMPTS: u32 = 3;

/// Failed attempts on mom's door before the battle is forced, key or no key.
pub const MOM_DOOR_BATTLE_ATTEMPTS: u32 = 2;

/// HP lost by a `Hurt` effect that declares no explicit damage.
pub const DEFAULT_HURT_DAMAGE: i32 = 5;

pub mod keys {
    use crate::types::{BattleKey, ItemKey, RoomKey};

    pub const BEDROOM_1: RoomKey = RoomKey("bedroom_1");
    pub const LIVING_ROOM: RoomKey = RoomKey("living_room");
    pub const BEDROOM_2: RoomKey = RoomKey("bedroom_2");
    pub const HALLWAY: RoomKey = RoomKey("hallway");
    pub const MOM_DOOR_ROOM: RoomKey = RoomKey("mom_door");
    pub const KEY_ROOM_1: RoomKey = RoomKey("key_room_1");
    pub const KEY_ROOM_2: RoomKey = RoomKey("key_room_2");

    pub const BED: ItemKey = ItemKey("bed");
    pub const BED_BROKEN: ItemKey = ItemKey("bed_broken");
    pub const DESK: ItemKey = ItemKey("desk");
    pub const DESK_EMPTY: ItemKey = ItemKey("desk_empty");
    pub const WINDOW: ItemKey = ItemKey("window");
    pub const WINDOW_GASLIGHT: ItemKey = ItemKey("window_gaslight");
    pub const WINDOW_DARK: ItemKey = ItemKey("window_dark");
    pub const SOFA: ItemKey = ItemKey("sofa");
    pub const TV: ItemKey = ItemKey("tv");
    pub const BOXES: ItemKey = ItemKey("boxes");
    pub const JUNK: ItemKey = ItemKey("junk");
    pub const KEY: ItemKey = ItemKey("key");
    pub const MOM_DOOR: ItemKey = ItemKey("mom_door");
    pub const SAVE_POINT: ItemKey = ItemKey("save_point");

    pub const MOM_BATTLE: BattleKey = BattleKey("mom_battle");
}

/// Forced cutscene shown right before control passes to the battle.
pub const BATTLE_CUTSCENE_LINES: &[&str] =
    &["门后传来声音...", "【孩子... 快来...】", "【妈妈需要你...】"];

/// All static content, one instance per session.
pub struct ContentPack {
    pub rooms: &'static [RoomDef],
    pub items: &'static [ItemDef],
    pub battles: &'static [BattleDef],
}

impl ContentPack {
    pub fn build_default() -> Self {
        Self { rooms: rooms::TABLE, items: items::TABLE, battles: battles::TABLE }
    }

    pub fn room(&self, key: RoomKey) -> Option<&'static RoomDef> {
        self.rooms.iter().find(|room| room.key == key)
    }

    pub fn room_by_id(&self, id: &str) -> Option<&'static RoomDef> {
        self.rooms.iter().find(|room| room.key.0 == id)
    }

    pub fn item(&self, key: ItemKey) -> Option<&'static ItemDef> {
        self.items.iter().find(|item| item.key == key)
    }

    pub fn battle(&self, key: crate::types::BattleKey) -> Option<&'static BattleDef> {
        self.battles.iter().find(|battle| battle.key == key)
    }

    /// Rooms eligible to host the roaming key, in declaration order. Declared
    /// on the room that owns the chase (mom's door room).
    pub fn key_fly_rooms(&self) -> &'static [RoomKey] {
        self.rooms
            .iter()
            .find(|room| !room.key_fly_rooms.is_empty())
            .map(|room| room.key_fly_rooms)
            .unwrap_or(&[])
    }

    /// Load-time invariant check over every room, door link, and legend
    /// entry. Returns every violation rather than stopping at the first.
    pub fn validate(&self) -> Vec<ContentError> {
        let mut errors = Vec::new();

        for room in self.rooms {
            self.validate_layout(room, &mut errors);
            self.validate_links(room, &mut errors);
            self.validate_key_rooms(room, &mut errors);
        }

        errors
    }

    fn validate_layout(&self, room: &RoomDef, errors: &mut Vec<ContentError>) {
        let mut seen_marks: Vec<DoorMark> = Vec::new();
        for y in 0..room.height() {
            for x in 0..room.width() {
                let pos = Pos::new(x as i32, y as i32);
                match room.cell_at(pos) {
                    Some(Cell::Door(mark)) => {
                        if seen_marks.contains(&mark) {
                            errors.push(ContentError::DuplicateDoorMark { room: room.key, door: mark });
                        }
                        seen_marks.push(mark);
                    }
                    Some(Cell::Item(item)) => {
                        if self.item(item).is_none() {
                            errors.push(ContentError::UnknownLegendItem {
                                room: room.key,
                                marker: room.marker_at(pos).unwrap_or(b'?') as char,
                            });
                        }
                    }
                    _ => {}
                }
            }
        }
    }

    fn validate_links(&self, room: &RoomDef, errors: &mut Vec<ContentError>) {
        for &(door, link) in room.door_links {
            let Some(spec) = link.spec else { continue };
            for (target, spawn) in spec.destinations() {
                match self.room(target) {
                    None => {
                        errors.push(ContentError::UnknownRoomTarget { room: room.key, door, target });
                    }
                    Some(dest) if !dest.is_walkable(spawn) => {
                        errors.push(ContentError::SpawnOutOfBounds {
                            room: room.key,
                            door,
                            target,
                            spawn,
                        });
                    }
                    Some(_) => {}
                }
            }
            if let ExitSpec::Distorted { targets, weights: Some(weights) } = spec
                && (weights.len() != targets.len()
                    || weights.iter().any(|w| *w < 0.0)
                    || (weights.iter().sum::<f64>() - 1.0).abs() > 1e-6)
            {
                errors.push(ContentError::BadDistortedWeights { room: room.key, door });
            }
        }
    }

    fn validate_key_rooms(&self, room: &RoomDef, errors: &mut Vec<ContentError>) {
        for &key_room in room.key_fly_rooms {
            match self.room(key_room) {
                None => {
                    errors.push(ContentError::UnknownKeyRoom { room: room.key, key_room });
                }
                Some(host) if host.key_spot.is_none() => {
                    errors.push(ContentError::KeyRoomWithoutSpot { room: room.key, key_room });
                }
                Some(_) => {}
            }
        }
    }
}

impl ExitSpec {
    /// Every `(target, spawn)` pair this spec can produce, for validation.
    pub fn destinations(&self) -> Vec<(RoomKey, Pos)> {
        match *self {
            Self::Fixed { target, spawn }
            | Self::Teleport { target, spawn, .. }
            | Self::Loop { target, spawn, .. } => vec![(target, spawn)],
            Self::Distorted { targets, .. } => targets.to_vec(),
        }
    }

    /// Resolve this exit to a concrete destination. Only `Distorted` consumes
    /// randomness: one unit draw, cumulative-weight scan, first interval that
    /// contains the draw wins (declaration order).
    pub fn resolve(&self, roll: &mut impl UnitRoll) -> ResolvedExit {
        match *self {
            Self::Fixed { target, spawn } => {
                ResolvedExit { target, spawn, message: None, kind: ExitKind::Fixed }
            }
            Self::Teleport { target, spawn, message } => {
                ResolvedExit { target, spawn, message, kind: ExitKind::Teleport }
            }
            Self::Loop { target, spawn, message } => {
                ResolvedExit { target, spawn, message: Some(message), kind: ExitKind::Loop }
            }
            Self::Distorted { targets, weights } => {
                let draw = roll.unit();
                let uniform = 1.0 / targets.len() as f64;
                let mut cumulative = 0.0;
                for (index, &(target, spawn)) in targets.iter().enumerate() {
                    cumulative += weights.map_or(uniform, |w| w[index]);
                    if draw < cumulative {
                        return ResolvedExit {
                            target,
                            spawn,
                            message: None,
                            kind: ExitKind::Distorted,
                        };
                    }
                }
                // Floating-point shortfall: the scan can leave the final
                // interval open; the last declared target absorbs it.
                let &(target, spawn) = targets.last().expect("distorted exit has targets");
                ResolvedExit { target, spawn, message: None, kind: ExitKind::Distorted }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::test_support::ScriptedRoll;

    #[test]
    fn default_content_validates_clean() {
        let content = ContentPack::build_default();
        let errors = content.validate();
        assert!(errors.is_empty(), "content errors: {errors:?}");
    }

    #[test]
    fn every_door_mark_with_a_link_exists_in_its_layout() {
        let content = ContentPack::build_default();
        for room in content.rooms {
            for &(door, _) in room.door_links {
                assert!(
                    room.door_pos(door).is_some(),
                    "room {:?} links door {door:?} that its layout never places",
                    room.key,
                );
            }
        }
    }

    #[test]
    fn distorted_resolution_is_pick_first_on_boundary_draws() {
        static TARGETS: [(RoomKey, Pos); 2] = [
            (keys::LIVING_ROOM, Pos::new(1, 4)),
            (keys::BEDROOM_2, Pos::new(1, 4)),
        ];
        let spec = ExitSpec::Distorted { targets: &TARGETS, weights: Some(&[0.5, 0.5]) };

        let mut at_zero = ScriptedRoll::new(&[0.0]);
        assert_eq!(spec.resolve(&mut at_zero).target, keys::LIVING_ROOM);

        // A draw exactly on the first cumulative bound falls into the second
        // interval; just below it stays in the first.
        let mut at_bound = ScriptedRoll::new(&[0.5]);
        assert_eq!(spec.resolve(&mut at_bound).target, keys::BEDROOM_2);
        let mut below_bound = ScriptedRoll::new(&[0.499_999]);
        assert_eq!(spec.resolve(&mut below_bound).target, keys::LIVING_ROOM);
    }

    #[test]
    fn distorted_resolution_without_weights_is_uniform_over_declaration() {
        static TARGETS: [(RoomKey, Pos); 3] = [
            (keys::BEDROOM_1, Pos::new(5, 6)),
            (keys::HALLWAY, Pos::new(7, 4)),
            (keys::LIVING_ROOM, Pos::new(6, 6)),
        ];
        let spec = ExitSpec::Distorted { targets: &TARGETS, weights: None };
        let mut mid = ScriptedRoll::new(&[0.34]);
        assert_eq!(spec.resolve(&mut mid).target, keys::HALLWAY);
        let mut high = ScriptedRoll::new(&[0.99]);
        assert_eq!(spec.resolve(&mut high).target, keys::LIVING_ROOM);
    }

    #[test]
    fn distorted_empirical_frequencies_match_weights() {
        use rand_chacha::ChaCha8Rng;
        use rand_chacha::rand_core::SeedableRng;

        static TARGETS: [(RoomKey, Pos); 3] = [
            (keys::BEDROOM_2, Pos::new(1, 4)),
            (keys::HALLWAY, Pos::new(7, 4)),
            (keys::LIVING_ROOM, Pos::new(6, 4)),
        ];
        let spec = ExitSpec::Distorted { targets: &TARGETS, weights: Some(&[0.4, 0.4, 0.2]) };

        let mut rng = ChaCha8Rng::seed_from_u64(0xBAD_D00E);
        let trials = 10_000;
        let mut counts = [0u32; 3];
        for _ in 0..trials {
            let landed = spec.resolve(&mut rng).target;
            let slot = match landed {
                k if k == keys::BEDROOM_2 => 0,
                k if k == keys::HALLWAY => 1,
                _ => 2,
            };
            counts[slot] += 1;
        }

        for (count, weight) in counts.iter().zip([0.4, 0.4, 0.2]) {
            let frequency = f64::from(*count) / f64::from(trials);
            assert!(
                (frequency - weight).abs() < 0.03,
                "frequency {frequency} strayed from weight {weight}"
            );
        }
    }

    #[test]
    fn validate_reports_unknown_target_and_bad_spawn() {
        static BROKEN: &[RoomDef] = &[RoomDef {
            key: RoomKey("island"),
            name: "island",
            description: "nowhere",
            rows: &["#^#", "#.#", "###"],
            legend: &[],
            spawn: Pos::new(1, 1),
            door_links: &[(
                DoorMark::Up,
                DoorLink {
                    label: "out",
                    locked: false,
                    spec: Some(ExitSpec::Fixed { target: RoomKey("nowhere"), spawn: Pos::new(9, 9) }),
                },
            )],
            key_spot: None,
            key_fly_rooms: &[],
            trigger_battle: false,
        }];
        let content = ContentPack { rooms: BROKEN, items: items::TABLE, battles: battles::TABLE };
        let errors = content.validate();
        assert!(
            errors
                .iter()
                .any(|e| matches!(e, ContentError::UnknownRoomTarget { target, .. } if target.0 == "nowhere"))
        );
    }
}
