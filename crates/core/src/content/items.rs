//! Item definitions. The stated intent of every interaction (its prompt)
//! and its actual outcome are deliberately mismatched; the `examine` text is
//! emotional flavor, not a physical description.

use super::keys;
use crate::types::ItemKey;

/// Mechanical tag of an interaction outcome.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EffectKind {
    /// The object breaks. Screen shake, no HP change.
    Break,
    /// The player is hurt for `damage` (or the default).
    Hurt,
    /// The placement is removed from the room.
    Vanish,
    /// A gaslight overlay follows the result text.
    Gaslight,
    /// Pure dread. Shake only.
    Unease,
    /// Persist the world state.
    Save,
    /// The roaming key chase. Never resolved through the generic path.
    Fly,
    /// Nothing mechanical happens.
    Inert,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum InteractionKind {
    Check,
    Take,
    Use,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Interaction {
    /// UI-facing intent, e.g. "检查床".
    pub prompt: &'static str,
    /// What actually happens, usually destructive.
    pub result: &'static str,
    pub effect: EffectKind,
    pub damage: Option<i32>,
    pub gaslight: Option<&'static str>,
}

/// One entry of a multi-choice item menu.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ItemOption {
    pub label: &'static str,
    pub result: &'static str,
    pub effect: EffectKind,
    pub damage: Option<i32>,
    pub gaslight: Option<&'static str>,
}

pub struct ItemDef {
    pub key: ItemKey,
    pub name: &'static str,
    /// Flavor line shown when an item defines no interaction at all.
    pub examine: &'static str,
    /// Intent verb for the nearby-interactable prompt.
    pub action: &'static str,
    pub interactions: &'static [(InteractionKind, Interaction)],
    pub options: &'static [ItemOption],
    /// Shown when the roaming key is finally caught.
    pub final_result: Option<&'static str>,
}

impl ItemDef {
    pub fn interaction(&self, kind: InteractionKind) -> Option<Interaction> {
        self.interactions.iter().find(|(k, _)| *k == kind).map(|&(_, i)| i)
    }
}

/// Gaslight escalation lines, unlocked when the monotonic counter reaches
/// each threshold exactly. Pure lookup, no randomness.
pub const GASLIGHT_ESCALATION: &[(u32, &str)] = &[
    (3, "【没有人会相信你】"),
    (5, "【这些都是为你好】"),
    (7, "【你离不开妈妈的】"),
];

pub fn escalation_line(count: u32) -> Option<&'static str> {
    GASLIGHT_ESCALATION
        .iter()
        .find(|(threshold, _)| *threshold == count)
        .map(|&(_, line)| line)
}

/// Pool for the ambient voice overlay; one is drawn at random when the
/// locked door is examined.
pub const MOM_VOICE_LINES: &[&str] = &[
    "【孩子... 快来...】",
    "【妈妈在等你...】",
    "【你怎么还不来？】",
    "【妈妈需要你...】",
    "【你让妈妈失望了...】",
];

pub const MOM_DOOR_LOCKED_LINE: &str = "门锁着。你需要钥匙。";
pub const MOM_DOOR_MELT_LINE: &str = "你用钥匙开门...\n钥匙突然融化了。\n门还是锁着的。";
pub const MOM_DOOR_GASLIGHT: &str = "【你为什么进不来？】\n【妈妈在等你...】";
pub const LOCKED_EXIT_LINE: &str = "门是锁着的。你需要钥匙。";

pub static TABLE: &[ItemDef] = &[
    ItemDef {
        key: keys::BED,
        name: "床",
        examine: "你的床。你不想靠近它。",
        action: "检查",
        interactions: &[(
            InteractionKind::Check,
            Interaction {
                prompt: "检查床",
                result: "你靠近床...\n床突然塌陷了。",
                effect: EffectKind::Break,
                damage: None,
                gaslight: None,
            },
        )],
        options: &[],
        final_result: None,
    },
    ItemDef {
        key: keys::BED_BROKEN,
        name: "破床",
        examine: "这张床已经坏了。",
        action: "检查",
        interactions: &[(
            InteractionKind::Check,
            Interaction {
                prompt: "检查破床",
                result: "这张床已经坏了。\n床单上有污渍...",
                effect: EffectKind::Inert,
                damage: None,
                gaslight: None,
            },
        )],
        options: &[],
        final_result: None,
    },
    ItemDef {
        key: keys::DESK,
        name: "书桌",
        examine: "你做作业的地方。曾经是。",
        action: "检查",
        // Two interaction kinds: the resolver offers a prompt menu.
        interactions: &[
            (
                InteractionKind::Check,
                Interaction {
                    prompt: "检查书桌",
                    result: "你打开抽屉...\n抽屉突然掉下来，东西散落一地。",
                    effect: EffectKind::Break,
                    damage: None,
                    gaslight: None,
                },
            ),
            (
                InteractionKind::Use,
                Interaction {
                    prompt: "翻找抽屉",
                    result: "抽屉卡住了。\n你的手被夹了一下。",
                    effect: EffectKind::Hurt,
                    damage: Some(3),
                    gaslight: None,
                },
            ),
        ],
        options: &[],
        final_result: None,
    },
    ItemDef {
        key: keys::DESK_EMPTY,
        name: "空书桌",
        examine: "书桌是空的。",
        action: "检查",
        interactions: &[(
            InteractionKind::Check,
            Interaction {
                prompt: "检查书桌",
                result: "书桌是空的。\n什么都没有。",
                effect: EffectKind::Inert,
                damage: None,
                gaslight: None,
            },
        )],
        options: &[],
        final_result: None,
    },
    ItemDef {
        key: keys::WINDOW,
        name: "窗户",
        examine: "夜晚总是从这里开始。",
        action: "看向",
        interactions: &[(
            InteractionKind::Check,
            Interaction {
                prompt: "看向窗外",
                result: "你看向窗外...\n外面一片漆黑。\n好像有什么东西在动...",
                effect: EffectKind::Unease,
                damage: None,
                gaslight: None,
            },
        )],
        options: &[],
        final_result: None,
    },
    ItemDef {
        key: keys::WINDOW_GASLIGHT,
        name: "窗户",
        examine: "窗帘在动。没有风。",
        action: "看向",
        interactions: &[],
        options: &[
            ItemOption {
                label: "仔细看",
                result: "你感觉窗外有什么东西在动...",
                effect: EffectKind::Gaslight,
                damage: None,
                gaslight: Some("【孩子，那只是你的想象】"),
            },
            ItemOption {
                label: "拉上窗帘",
                result: "你伸手去拉窗帘...\n窗帘杆掉了下来，砸在你头上。",
                effect: EffectKind::Hurt,
                damage: Some(5),
                gaslight: None,
            },
        ],
        final_result: None,
    },
    ItemDef {
        key: keys::WINDOW_DARK,
        name: "窗户",
        examine: "这扇窗从来没打开过。",
        action: "看向",
        interactions: &[(
            InteractionKind::Check,
            Interaction {
                prompt: "看向窗外",
                result: "窗户被涂黑了。\n什么都看不到。",
                effect: EffectKind::Inert,
                damage: None,
                gaslight: None,
            },
        )],
        options: &[],
        final_result: None,
    },
    ItemDef {
        key: keys::SOFA,
        name: "沙发",
        examine: "你们曾经一起坐在这里。",
        action: "检查",
        interactions: &[(
            InteractionKind::Check,
            Interaction {
                prompt: "检查沙发",
                result: "你坐下来...\n沙发发出奇怪的声音，弹簧刺入你的腿。",
                effect: EffectKind::Hurt,
                damage: Some(5),
                gaslight: None,
            },
        )],
        options: &[],
        final_result: None,
    },
    ItemDef {
        key: keys::TV,
        name: "电视",
        examine: "屏幕上有你的倒影。只有你的。",
        action: "检查",
        interactions: &[],
        options: &[
            ItemOption {
                label: "打开电视",
                result: "电视突然亮起...\n屏幕上是雪花噪点。\n你听到耳语声。",
                effect: EffectKind::Gaslight,
                damage: None,
                gaslight: Some("【你总是听到不存在的声音】"),
            },
            ItemOption {
                label: "关掉电视",
                result: "你按下开关。\n屏幕碎了。\n你根本没碰到它。",
                effect: EffectKind::Break,
                damage: None,
                gaslight: None,
            },
        ],
        final_result: None,
    },
    ItemDef {
        key: keys::BOXES,
        name: "箱子",
        examine: "落满灰的纸箱。",
        action: "检查",
        interactions: &[(
            InteractionKind::Check,
            Interaction {
                prompt: "检查箱子",
                result: "你打开箱子...\n里面是你小时候的玩具。\n都已经坏了。",
                effect: EffectKind::Inert,
                damage: None,
                gaslight: None,
            },
        )],
        options: &[],
        final_result: None,
    },
    ItemDef {
        key: keys::JUNK,
        name: "杂物",
        examine: "一堆没人要的东西。",
        action: "检查",
        interactions: &[
            (
                InteractionKind::Check,
                Interaction {
                    prompt: "检查杂物",
                    result: "一堆杂乱的东西。\n你找不到任何有用的。",
                    effect: EffectKind::Inert,
                    damage: None,
                    gaslight: None,
                },
            ),
            (
                InteractionKind::Take,
                Interaction {
                    prompt: "拿起杂物",
                    result: "你拿起最上面的一件...\n它在你手里碎成了灰。",
                    effect: EffectKind::Vanish,
                    damage: None,
                    gaslight: None,
                },
            ),
        ],
        options: &[],
        final_result: None,
    },
    ItemDef {
        key: keys::KEY,
        name: "钥匙",
        examine: "它在等你伸手。",
        action: "拾取",
        interactions: &[(
            InteractionKind::Take,
            Interaction {
                prompt: "拿起钥匙",
                result: "你伸手去拿钥匙...\n钥匙飞走了！",
                effect: EffectKind::Fly,
                damage: None,
                gaslight: Some("【你还不够快】\n【你为什么这么笨？】"),
            },
        )],
        options: &[],
        final_result: Some("你终于抓住了钥匙。\n但它在你手里变得冰冷。"),
    },
    ItemDef {
        key: keys::MOM_DOOR,
        name: "妈妈的门",
        examine: "门后很安静。太安静了。",
        action: "检查",
        interactions: &[
            (
                InteractionKind::Check,
                Interaction {
                    prompt: "检查门",
                    result: "门是锁着的。\n你听到里面有声音...",
                    effect: EffectKind::Inert,
                    damage: None,
                    gaslight: None,
                },
            ),
            (
                InteractionKind::Use,
                Interaction {
                    prompt: "开门",
                    result: MOM_DOOR_MELT_LINE,
                    effect: EffectKind::Inert,
                    damage: None,
                    gaslight: Some(MOM_DOOR_GASLIGHT),
                },
            ),
        ],
        options: &[],
        final_result: None,
    },
    ItemDef {
        key: keys::SAVE_POINT,
        name: "光点",
        examine: "一小团温暖的光。",
        action: "靠近",
        interactions: &[(
            InteractionKind::Check,
            Interaction {
                prompt: "靠近光点",
                result: "温暖的光芒包围了你。\n你感到一丝安慰。\n\n【进度已保存】",
                effect: EffectKind::Save,
                damage: None,
                gaslight: None,
            },
        )],
        options: &[],
        final_result: None,
    },
];
