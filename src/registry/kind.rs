use super::ids;
use super::slots::*;
use super::{KindDescriptor, ObjectIds};
use crate::Property;
use std::fmt;

macro_rules! kinds {
    ($($variant:ident => $ids:expr, [$($group:ident),+ $(,)?];)+) => {
        /// The kind of a level object. Selects which property slots an object
        /// has and how their keys are interpreted.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize))]
        pub enum ObjectKind {
            $($variant,)+
        }

        impl ObjectKind {
            /// Every kind in resolution order
            pub const ALL: &'static [ObjectKind] = &[$(ObjectKind::$variant,)+];

            /// Returns the static description of this kind
            pub fn descriptor(&self) -> &'static KindDescriptor {
                match self {
                    $(ObjectKind::$variant => {
                        static DESCRIPTOR: KindDescriptor = KindDescriptor {
                            kind: ObjectKind::$variant,
                            name: stringify!($variant),
                            ids: $ids,
                            slots: &[$($group),+],
                        };
                        &DESCRIPTOR
                    })+
                }
            }
        }
    };
}

kinds! {
    Generic => ObjectIds::Any, [PLACEMENT, VISUAL];

    CubePortal => ObjectIds::Fixed(ids::CUBE_PORTAL), [PLACEMENT, VISUAL, PORTAL];
    ShipPortal => ObjectIds::Fixed(ids::SHIP_PORTAL), [PLACEMENT, VISUAL, PORTAL];
    BallPortal => ObjectIds::Fixed(ids::BALL_PORTAL), [PLACEMENT, VISUAL, PORTAL];
    UfoPortal => ObjectIds::Fixed(ids::UFO_PORTAL), [PLACEMENT, VISUAL, PORTAL];
    WavePortal => ObjectIds::Fixed(ids::WAVE_PORTAL), [PLACEMENT, VISUAL, PORTAL];
    RobotPortal => ObjectIds::Fixed(ids::ROBOT_PORTAL), [PLACEMENT, VISUAL, PORTAL];
    SpiderPortal => ObjectIds::Fixed(ids::SPIDER_PORTAL), [PLACEMENT, VISUAL, PORTAL];
    GravityPortal => ObjectIds::Set(ids::GRAVITY_PORTALS), [PLACEMENT, VISUAL, PORTAL];
    MirrorPortal => ObjectIds::Set(ids::MIRROR_PORTALS), [PLACEMENT, VISUAL, PORTAL];
    SizePortal => ObjectIds::Set(ids::SIZE_PORTALS), [PLACEMENT, VISUAL, PORTAL];
    DualPortal => ObjectIds::Set(ids::DUAL_PORTALS), [PLACEMENT, VISUAL, PORTAL];
    SpeedPortal => ObjectIds::Set(ids::SPEED_PORTALS), [PLACEMENT, VISUAL, PORTAL];
    TeleportPortal => ObjectIds::Fixed(ids::TELEPORT_PORTAL), [PLACEMENT, VISUAL, TELEPORT_PORTAL];

    Orb => ObjectIds::Set(ids::ORBS), [PLACEMENT, VISUAL, ORB];
    RotatingObject => ObjectIds::Predicate(ids::is_rotating_object), [PLACEMENT, VISUAL, ROTATING_OBJECT];
    AnimatedObject => ObjectIds::Set(ids::ANIMATED_OBJECTS), [PLACEMENT, VISUAL, ANIMATED_OBJECT];
    PickupItem => ObjectIds::Set(ids::PICKUP_ITEMS), [PLACEMENT, VISUAL, PICKUP_ITEM];
    TextObject => ObjectIds::Fixed(ids::TEXT), [PLACEMENT, VISUAL, TEXT];
    CollisionBlock => ObjectIds::Fixed(ids::COLLISION_BLOCK), [PLACEMENT, VISUAL, COLLISION_BLOCK];
    CountDisplay => ObjectIds::Fixed(ids::COUNT_DISPLAY), [PLACEMENT, VISUAL, COUNT_DISPLAY];

    ColorTrigger => ObjectIds::Set(ids::COLOR_TRIGGERS), [PLACEMENT, TRIGGER, COLOR_TRIGGER];
    MoveTrigger => ObjectIds::Fixed(ids::MOVE_TRIGGER), [PLACEMENT, TRIGGER, MOVE_TRIGGER];
    StopTrigger => ObjectIds::Fixed(ids::STOP_TRIGGER), [PLACEMENT, TRIGGER, STOP_TRIGGER];
    PulseTrigger => ObjectIds::Fixed(ids::PULSE_TRIGGER), [PLACEMENT, TRIGGER, PULSE_TRIGGER];
    AlphaTrigger => ObjectIds::Fixed(ids::ALPHA_TRIGGER), [PLACEMENT, TRIGGER, ALPHA_TRIGGER];
    ToggleTrigger => ObjectIds::Fixed(ids::TOGGLE_TRIGGER), [PLACEMENT, TRIGGER, TOGGLE_TRIGGER];
    SpawnTrigger => ObjectIds::Fixed(ids::SPAWN_TRIGGER), [PLACEMENT, TRIGGER, SPAWN_TRIGGER];
    RotateTrigger => ObjectIds::Fixed(ids::ROTATE_TRIGGER), [PLACEMENT, TRIGGER, ROTATE_TRIGGER];
    FollowTrigger => ObjectIds::Fixed(ids::FOLLOW_TRIGGER), [PLACEMENT, TRIGGER, FOLLOW_TRIGGER];
    ShakeTrigger => ObjectIds::Fixed(ids::SHAKE_TRIGGER), [PLACEMENT, TRIGGER, SHAKE_TRIGGER];
    AnimateTrigger => ObjectIds::Fixed(ids::ANIMATE_TRIGGER), [PLACEMENT, TRIGGER, ANIMATE_TRIGGER];
    TouchTrigger => ObjectIds::Fixed(ids::TOUCH_TRIGGER), [PLACEMENT, TRIGGER, TOUCH_TRIGGER];
    CountTrigger => ObjectIds::Fixed(ids::COUNT_TRIGGER), [PLACEMENT, TRIGGER, COUNT_TRIGGER];
    InstantCountTrigger => ObjectIds::Fixed(ids::INSTANT_COUNT_TRIGGER), [PLACEMENT, TRIGGER, INSTANT_COUNT_TRIGGER];
    PickupTrigger => ObjectIds::Fixed(ids::PICKUP_TRIGGER), [PLACEMENT, TRIGGER, PICKUP_TRIGGER];
    CollisionTrigger => ObjectIds::Fixed(ids::COLLISION_TRIGGER), [PLACEMENT, TRIGGER, COLLISION_TRIGGER];
    OnDeathTrigger => ObjectIds::Fixed(ids::ON_DEATH_TRIGGER), [PLACEMENT, TRIGGER, ON_DEATH_TRIGGER];
    FollowPlayerYTrigger => ObjectIds::Fixed(ids::FOLLOW_PLAYER_Y_TRIGGER), [PLACEMENT, TRIGGER, FOLLOW_PLAYER_Y_TRIGGER];
    BgEffectTrigger => ObjectIds::Set(ids::BG_EFFECT_TRIGGERS), [PLACEMENT, TRIGGER];
}

impl ObjectKind {
    /// Returns the kind name
    pub fn name(&self) -> &'static str {
        self.descriptor().name()
    }

    /// Returns true for kinds that act on other objects instead of being
    /// visible themselves
    pub fn is_trigger(&self) -> bool {
        self.descriptor().slot(Property::MultiTrigger).is_some()
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
