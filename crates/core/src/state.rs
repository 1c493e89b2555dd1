//! Mutable world state and its serializable snapshot.
//! This module exists to separate what a save file must capture from the
//! transient parts of a session (dialogue, effects, cooldowns).
//! It does not own any game rules; mutation happens in the game module.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::content::{ContentPack, keys};
use crate::types::{ItemKey, Pos, RestoreError, RoomKey};

pub const SNAPSHOT_FORMAT_VERSION: u32 = 1;

/// Persistent boolean and counter state. Everything here survives a save.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flags {
    pub has_key: bool,
    pub gaslight_count: u32,
    pub key_fly_count: u32,
    pub battle_triggered: bool,
    pub saved_game: bool,
    pub mom_door_attempts: u32,
    /// Set when the key lands in a room, cleared on the next room entry.
    /// Keeps the key from being grabbed in the same room it fled to.
    #[serde(skip)]
    pub key_just_flew: bool,
}

/// What the player is standing on or next to, recomputed after every move
/// and room entry. The roaming key outranks any placed item.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NearbyInteractable {
    Item { key: ItemKey, pos: Pos },
    RoamingKey { pos: Pos },
}

#[derive(Clone, Debug)]
pub struct WorldState {
    pub room: RoomKey,
    pub pos: Pos,
    pub hp: i32,
    pub max_hp: i32,
    pub flags: Flags,
    pub visited: BTreeSet<RoomKey>,
    /// Which room currently holds the key, if it has not been caught.
    pub roaming_key_room: Option<RoomKey>,
    /// Item placements consumed by a vanish outcome.
    pub despawned: BTreeSet<(RoomKey, Pos)>,
    pub move_cooldown: u8,
    pub nearby: Option<NearbyInteractable>,
}

impl WorldState {
    pub fn new_game(pack: &ContentPack) -> Self {
        let start = &pack.rooms[0];
        Self {
            room: start.key,
            pos: start.spawn,
            hp: 100,
            max_hp: 100,
            flags: Flags::default(),
            visited: BTreeSet::new(),
            roaming_key_room: Some(keys::KEY_ROOM_1),
            despawned: BTreeSet::new(),
            move_cooldown: 0,
            nearby: None,
        }
    }

    /// Applies damage and clamps at zero. Returns the resulting HP so callers
    /// can check for the death transition exactly where the mutation happened.
    pub fn apply_damage(&mut self, amount: i32) -> i32 {
        self.hp = (self.hp - amount).max(0);
        self.hp
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            format_version: SNAPSHOT_FORMAT_VERSION,
            room_id: self.room.0.to_string(),
            x: self.pos.x,
            y: self.pos.y,
            hp: self.hp,
            max_hp: self.max_hp,
            flags: self.flags,
            roaming_key_room: self.roaming_key_room.map(|r| r.0.to_string()),
            visited: self.visited.iter().map(|r| r.0.to_string()).collect(),
            despawned: self
                .despawned
                .iter()
                .map(|&(room, pos)| DespawnedEntry { room_id: room.0.to_string(), x: pos.x, y: pos.y })
                .collect(),
        }
    }

    /// Rebuilds world state from a snapshot, validating every content
    /// reference. Unknown visited rooms and despawn entries are dropped
    /// rather than rejected; the player-critical fields are strict.
    pub fn restore(pack: &ContentPack, snap: &Snapshot) -> Result<Self, RestoreError> {
        let room = pack
            .room_by_id(&snap.room_id)
            .ok_or_else(|| RestoreError::UnknownRoom(snap.room_id.clone()))?;
        let pos = Pos::new(snap.x, snap.y);
        if !room.in_bounds(pos) || !room.is_walkable(pos) {
            return Err(RestoreError::PositionOutOfBounds { room: room.key.0, pos });
        }
        let roaming_key_room = match &snap.roaming_key_room {
            Some(id) => Some(
                pack.room_by_id(id)
                    .map(|r| r.key)
                    .ok_or_else(|| RestoreError::UnknownKeyRoom(id.clone()))?,
            ),
            None => None,
        };
        let visited = snap
            .visited
            .iter()
            .filter_map(|id| pack.room_by_id(id).map(|r| r.key))
            .collect();
        let despawned = snap
            .despawned
            .iter()
            .filter_map(|entry| {
                pack.room_by_id(&entry.room_id)
                    .map(|r| (r.key, Pos::new(entry.x, entry.y)))
            })
            .collect();
        let max_hp = snap.max_hp.max(1);
        let mut flags = snap.flags;
        flags.key_just_flew = false;
        Ok(Self {
            room: room.key,
            pos,
            hp: snap.hp.clamp(0, max_hp),
            max_hp,
            flags,
            visited,
            roaming_key_room,
            despawned,
            move_cooldown: 0,
            nearby: None,
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DespawnedEntry {
    pub room_id: String,
    pub x: i32,
    pub y: i32,
}

/// Everything a save file captures. Ids are owned strings so the format does
/// not depend on the content tables being loaded to deserialize.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub format_version: u32,
    pub room_id: String,
    pub x: i32,
    pub y: i32,
    pub hp: i32,
    pub max_hp: i32,
    pub flags: Flags,
    pub roaming_key_room: Option<String>,
    #[serde(default)]
    pub visited: Vec<String>,
    #[serde(default)]
    pub despawned: Vec<DespawnedEntry>,
}

pub fn default_pack() -> ContentPack {
    ContentPack::build_default()
}
