//! Battle definitions. The single shipped battle cannot be won: the enemy
//! never takes damage and every player action costs HP. The tables here only
//! describe the numbers and lines; the state machine lives in the game module.

use super::keys;
use crate::types::BattleKey;

/// Pixel-space rectangle for the dodge arena. The core simulates bullet
/// geometry in pixels so the frontend can draw it one-to-one.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RectPx {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl RectPx {
    pub fn center_x(&self) -> f32 {
        self.x + self.w / 2.0
    }

    pub fn center_y(&self) -> f32 {
        self.y + self.h / 2.0
    }
}

/// Hidden mechanic behind a main-menu action.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActionMechanic {
    /// The action hurts the player instead of the enemy.
    SelfDamage(i32),
    /// No immediate damage; the next bullet phase is faster and harder.
    EnhanceNextBullet,
    /// Doing nothing is punished harder than acting.
    ForcedDamage(i32),
}

/// A main-menu action: what the player reads, what the enemy answers, what
/// actually happens.
#[derive(Clone, Copy, Debug)]
pub struct BattleAction {
    pub name: &'static str,
    pub lines: &'static [&'static str],
    pub mechanic: ActionMechanic,
}

/// One entry of the negotiate submenu. Each option plays the player's line,
/// then two hostile responses, then applies chip damage.
#[derive(Clone, Copy, Debug)]
pub struct NegotiateOption {
    pub name: &'static str,
    pub player_line: &'static str,
    pub responses: [&'static str; 2],
    pub damage: i32,
}

/// Baseline bullet-phase tuning. Speeds are per second; the simulation steps
/// them at 60 frames per second.
#[derive(Clone, Copy, Debug)]
pub struct BulletPattern {
    pub area: RectPx,
    pub enemy_start_y: f32,
    pub approach_speed: f32,
    pub contact_damage: i32,
    pub contact_band: f32,
    pub duration_ms: f32,
    pub player_speed: f32,
    pub dodge_lines: &'static [&'static str],
}

/// Overrides applied for one phase after the freeze action.
#[derive(Clone, Copy, Debug)]
pub struct EnhancedBullet {
    pub approach_speed: f32,
    pub contact_damage: i32,
}

pub struct BattleDef {
    pub key: BattleKey,
    pub enemy_name: &'static str,
    pub enemy_hp: i32,
    /// Always false for the shipped content. Kept as data so the damage path
    /// can assert against it rather than hard-code the rule.
    pub enemy_can_be_damaged: bool,
    pub player_max_hp: i32,
    pub intro_lines: &'static [&'static str],
    pub actions: &'static [BattleAction],
    pub negotiate: &'static [NegotiateOption],
    pub bullet: BulletPattern,
    pub enhanced_bullet: EnhancedBullet,
    pub defeat_lines: &'static [&'static str],
}

pub static TABLE: &[BattleDef] = &[BattleDef {
    key: keys::MOM_BATTLE,
    enemy_name: "妈妈",
    enemy_hp: 999,
    enemy_can_be_damaged: false,
    player_max_hp: 100,
    intro_lines: &["妈妈出现了。", "【这里好可怕，你来妈妈这...】", "【妈妈需要你...】"],
    actions: &[
        BattleAction {
            name: "挥拳",
            lines: &["你挥出拳头...", "拳头打在了自己脸上。", "【你怎么能打妈妈？】"],
            mechanic: ActionMechanic::SelfDamage(15),
        },
        BattleAction {
            name: "冻结",
            lines: &["你试图让一切停下来...", "空气变冷了。", "【你让妈妈更难过了】"],
            mechanic: ActionMechanic::EnhanceNextBullet,
        },
        BattleAction {
            name: "等待",
            lines: &["你站在原地，什么都不做。", "【你在无视妈妈吗？】"],
            mechanic: ActionMechanic::ForcedDamage(20),
        },
    ],
    negotiate: &[
        NegotiateOption {
            name: "辩解",
            player_line: "「我没有做错什么...」",
            responses: ["【你还在狡辩？】", "【妈妈最讨厌撒谎的孩子】"],
            damage: 10,
        },
        NegotiateOption {
            name: "解释",
            player_line: "「我只是想出去看看...」",
            responses: ["【外面很危险】", "【只有妈妈会保护你】"],
            damage: 10,
        },
        NegotiateOption {
            name: "顺从",
            player_line: "「对不起，妈妈...」",
            responses: ["【这才是乖孩子】", "【可是道歉没有用】"],
            damage: 5,
        },
    ],
    bullet: BulletPattern {
        area: RectPx { x: 200.0, y: 180.0, w: 240.0, h: 120.0 },
        enemy_start_y: 180.0,
        approach_speed: 20.0,
        contact_damage: 10,
        contact_band: 20.0,
        duration_ms: 3000.0,
        player_speed: 3.0,
        dodge_lines: &["【你为什么躲开妈妈？】", "【妈妈只是想抱抱你】"],
    },
    enhanced_bullet: EnhancedBullet { approach_speed: 30.0, contact_damage: 15 },
    defeat_lines: &["...", "【你还是一个很糟糕的孩子】", "【你要继续救妈妈】"],
}];
