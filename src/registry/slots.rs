//! Declarative property slot tables.
//!
//! A kind's slots are the concatenation of a few of these groups. Keys must be
//! unique within a kind and so must flag bits: the placement, visual and
//! trigger groups claim bits below 16, kind specific groups start at 16.

use super::{PropertySlot, Storage};
use crate::{EnumSet, EnumValue, HsvAdjustment, Property, PropertyValue, ValueKind};

const fn value(key: u32, property: Property, kind: ValueKind, default: PropertyValue) -> PropertySlot {
    PropertySlot {
        key,
        property,
        kind,
        default,
        storage: Storage::Value,
    }
}

const fn int(key: u32, property: Property, default: i32) -> PropertySlot {
    value(key, property, ValueKind::Int, PropertyValue::Int(default))
}

const fn short(key: u32, property: Property, default: i16) -> PropertySlot {
    value(key, property, ValueKind::Short, PropertyValue::Short(default))
}

const fn double(key: u32, property: Property, default: f64) -> PropertySlot {
    value(key, property, ValueKind::Double, PropertyValue::Double(default))
}

const fn hsv(key: u32, property: Property) -> PropertySlot {
    value(
        key,
        property,
        ValueKind::Hsv,
        PropertyValue::Hsv(HsvAdjustment::DEFAULT),
    )
}

const fn enumerated(key: u32, property: Property, set: EnumSet) -> PropertySlot {
    value(
        key,
        property,
        ValueKind::Enum(set),
        PropertyValue::Enum(EnumValue::new(set, 0)),
    )
}

const fn flag(key: u32, property: Property, bit: u8) -> PropertySlot {
    PropertySlot {
        key,
        property,
        kind: ValueKind::Bool,
        default: PropertyValue::Bool(false),
        storage: Storage::Flag(bit),
    }
}

/// Position, transform, layering and grouping. Every kind has these.
pub(crate) const PLACEMENT: &[PropertySlot] = &[
    double(2, Property::X, 0.0),
    double(3, Property::Y, 0.0),
    flag(4, Property::FlipHorizontal, 0),
    flag(5, Property::FlipVertical, 1),
    double(6, Property::Rotation, 0.0),
    short(20, Property::EditorLayer1, 0),
    enumerated(24, Property::ZLayer, EnumSet::ZLayer),
    int(25, Property::ZOrder, 0),
    double(32, Property::Scaling, 1.0),
    flag(34, Property::GroupParent, 2),
    value(
        57,
        Property::GroupIds,
        ValueKind::GroupIds,
        PropertyValue::IntArray(Vec::new()),
    ),
    short(61, Property::EditorLayer2, 0),
    flag(64, Property::DontFade, 3),
    flag(67, Property::DontEnter, 4),
    flag(103, Property::HighDetail, 5),
    short(108, Property::LinkedGroupId, 0),
];

/// Coloring of visible objects
pub(crate) const VISUAL: &[PropertySlot] = &[
    short(21, Property::MainColorId, 0),
    short(22, Property::DetailColorId, 0),
    flag(41, Property::MainColorHsvEnabled, 6),
    flag(42, Property::DetailColorHsvEnabled, 7),
    hsv(43, Property::MainColorHsv),
    hsv(44, Property::DetailColorHsv),
    flag(96, Property::DisableGlow, 8),
];

/// Activation modes shared by every trigger
pub(crate) const TRIGGER: &[PropertySlot] = &[
    flag(11, Property::TouchTriggered, 9),
    flag(62, Property::SpawnTriggered, 10),
    flag(87, Property::MultiTrigger, 11),
];

pub(crate) const PORTAL: &[PropertySlot] = &[flag(13, Property::Checked, 16)];

pub(crate) const TELEPORT_PORTAL: &[PropertySlot] = &[
    flag(13, Property::Checked, 16),
    double(54, Property::TeleportDistance, 0.0),
];

pub(crate) const ORB: &[PropertySlot] = &[flag(99, Property::MultiActivate, 16)];

pub(crate) const ROTATING_OBJECT: &[PropertySlot] = &[
    double(97, Property::RotationSpeed, 0.0),
    flag(98, Property::DisableRotation, 16),
];

pub(crate) const ANIMATED_OBJECT: &[PropertySlot] = &[
    flag(106, Property::RandomizeStart, 16),
    double(107, Property::AnimationSpeed, 1.0),
];

pub(crate) const PICKUP_ITEM: &[PropertySlot] = &[
    short(51, Property::TargetGroupId, 0),
    flag(56, Property::ActivateGroup, 16),
    short(80, Property::ItemId, 0),
];

pub(crate) const TEXT: &[PropertySlot] = &[value(
    31,
    Property::Text,
    ValueKind::Base64Text,
    PropertyValue::Text(String::new()),
)];

pub(crate) const COLLISION_BLOCK: &[PropertySlot] = &[
    short(80, Property::BlockId, 0),
    flag(94, Property::DynamicBlock, 16),
];

pub(crate) const COUNT_DISPLAY: &[PropertySlot] = &[short(80, Property::ItemId, 0)];

pub(crate) const COLOR_TRIGGER: &[PropertySlot] = &[
    int(7, Property::Red, 255),
    int(8, Property::Green, 255),
    int(9, Property::Blue, 255),
    double(10, Property::Duration, 0.5),
    flag(14, Property::TintGround, 16),
    flag(15, Property::PlayerColor1, 17),
    flag(16, Property::PlayerColor2, 18),
    flag(17, Property::Blending, 19),
    short(23, Property::TargetColorId, 1),
    double(35, Property::Opacity, 1.0),
    hsv(49, Property::CopiedColorHsv),
    short(50, Property::CopiedColorId, 0),
    flag(60, Property::CopyOpacity, 20),
];

pub(crate) const MOVE_TRIGGER: &[PropertySlot] = &[
    double(10, Property::Duration, 0.5),
    int(28, Property::MoveOffsetX, 0),
    int(29, Property::MoveOffsetY, 0),
    enumerated(30, Property::Easing, EnumSet::Easing),
    short(51, Property::TargetGroupId, 0),
    flag(58, Property::LockToPlayerX, 16),
    flag(59, Property::LockToPlayerY, 17),
    short(71, Property::TargetPosGroupId, 0),
    double(85, Property::EasingRate, 2.0),
    flag(100, Property::UseTarget, 18),
    enumerated(
        101,
        Property::TargetPosCoordinates,
        EnumSet::TargetPosCoordinates,
    ),
];

pub(crate) const STOP_TRIGGER: &[PropertySlot] = &[short(51, Property::TargetGroupId, 0)];

pub(crate) const PULSE_TRIGGER: &[PropertySlot] = &[
    int(7, Property::Red, 255),
    int(8, Property::Green, 255),
    int(9, Property::Blue, 255),
    double(45, Property::FadeIn, 0.0),
    double(46, Property::Hold, 0.0),
    double(47, Property::FadeOut, 0.0),
    enumerated(48, Property::PulseMode, EnumSet::PulseMode),
    hsv(49, Property::PulseHsv),
    short(50, Property::CopiedColorId, 0),
    short(51, Property::TargetGroupId, 0),
    enumerated(52, Property::PulseTargetType, EnumSet::PulseTargetType),
    flag(65, Property::MainOnly, 16),
    flag(66, Property::DetailOnly, 17),
    flag(86, Property::Exclusive, 18),
];

pub(crate) const ALPHA_TRIGGER: &[PropertySlot] = &[
    double(10, Property::Duration, 0.5),
    double(35, Property::Opacity, 1.0),
    short(51, Property::TargetGroupId, 0),
];

pub(crate) const TOGGLE_TRIGGER: &[PropertySlot] = &[
    short(51, Property::TargetGroupId, 0),
    flag(56, Property::ActivateGroup, 16),
];

pub(crate) const SPAWN_TRIGGER: &[PropertySlot] = &[
    short(51, Property::TargetGroupId, 0),
    double(63, Property::SpawnDelay, 0.0),
    flag(102, Property::EditorDisable, 16),
];

pub(crate) const ROTATE_TRIGGER: &[PropertySlot] = &[
    double(10, Property::Duration, 0.5),
    enumerated(30, Property::Easing, EnumSet::Easing),
    short(51, Property::TargetGroupId, 0),
    int(68, Property::Degrees, 0),
    int(69, Property::Times360, 0),
    flag(70, Property::LockObjectRotation, 16),
    short(71, Property::CenterGroupId, 0),
    double(85, Property::EasingRate, 2.0),
];

pub(crate) const FOLLOW_TRIGGER: &[PropertySlot] = &[
    double(10, Property::Duration, 0.5),
    short(51, Property::TargetGroupId, 0),
    short(71, Property::FollowGroupId, 0),
    double(72, Property::XMod, 1.0),
    double(73, Property::YMod, 1.0),
];

pub(crate) const SHAKE_TRIGGER: &[PropertySlot] = &[
    double(10, Property::Duration, 0.5),
    double(75, Property::Strength, 0.0),
    double(84, Property::Interval, 0.0),
];

pub(crate) const ANIMATE_TRIGGER: &[PropertySlot] = &[
    short(51, Property::TargetGroupId, 0),
    int(76, Property::AnimationId, 0),
];

pub(crate) const TOUCH_TRIGGER: &[PropertySlot] = &[
    short(51, Property::TargetGroupId, 0),
    flag(81, Property::HoldMode, 16),
    enumerated(82, Property::TouchToggleMode, EnumSet::TouchToggleMode),
    flag(89, Property::DualMode, 17),
];

pub(crate) const COUNT_TRIGGER: &[PropertySlot] = &[
    short(51, Property::TargetGroupId, 0),
    flag(56, Property::ActivateGroup, 16),
    int(77, Property::TargetCount, 0),
    short(80, Property::ItemId, 0),
    flag(104, Property::MultiActivate, 17),
];

pub(crate) const INSTANT_COUNT_TRIGGER: &[PropertySlot] = &[
    short(51, Property::TargetGroupId, 0),
    flag(56, Property::ActivateGroup, 16),
    int(77, Property::TargetCount, 0),
    short(80, Property::ItemId, 0),
    enumerated(88, Property::Comparison, EnumSet::InstantCountComparison),
];

pub(crate) const PICKUP_TRIGGER: &[PropertySlot] = &[
    int(77, Property::PickupCount, 0),
    short(80, Property::ItemId, 0),
];

pub(crate) const COLLISION_TRIGGER: &[PropertySlot] = &[
    short(51, Property::TargetGroupId, 0),
    flag(56, Property::ActivateGroup, 16),
    short(80, Property::BlockAId, 0),
    flag(93, Property::TriggerOnExit, 17),
    short(95, Property::BlockBId, 0),
];

pub(crate) const ON_DEATH_TRIGGER: &[PropertySlot] = &[
    short(51, Property::TargetGroupId, 0),
    flag(56, Property::ActivateGroup, 16),
];

pub(crate) const FOLLOW_PLAYER_Y_TRIGGER: &[PropertySlot] = &[
    double(10, Property::Duration, 0.5),
    short(51, Property::TargetGroupId, 0),
    double(90, Property::FollowSpeed, 1.0),
    double(91, Property::FollowDelay, 0.0),
    int(92, Property::FollowYOffset, 0),
    double(105, Property::MaxSpeed, 0.0),
];
