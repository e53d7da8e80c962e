use std::fmt;

macro_rules! properties {
    ($($(#[$vmeta:meta])* $variant:ident,)+) => {
        /// The meaning of a property slot.
        ///
        /// A record only carries a numeric key, and the same key means
        /// different things for different kinds of objects. A `Property` is
        /// what a key resolves to once the kind of the object is known.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize))]
        pub enum Property {
            $($(#[$vmeta])* $variant,)+
        }

        impl Property {
            /// Returns the property name
            pub fn name(&self) -> &'static str {
                match self {
                    $(Property::$variant => stringify!($variant),)+
                }
            }
        }
    };
}

properties! {
    X,
    Y,
    FlipHorizontal,
    FlipVertical,
    Rotation,
    EditorLayer1,
    EditorLayer2,
    MainColorId,
    DetailColorId,
    ZLayer,
    ZOrder,
    Scaling,
    GroupParent,
    MainColorHsvEnabled,
    DetailColorHsvEnabled,
    MainColorHsv,
    DetailColorHsv,
    GroupIds,
    DontFade,
    DontEnter,
    DisableGlow,
    HighDetail,
    LinkedGroupId,

    TouchTriggered,
    SpawnTriggered,
    MultiTrigger,

    /// Portal preview guide is shown in the editor
    Checked,
    /// Vertical distance between the two halves of a teleport portal
    TeleportDistance,
    MultiActivate,
    RotationSpeed,
    DisableRotation,
    RandomizeStart,
    AnimationSpeed,
    Text,
    BlockId,
    DynamicBlock,
    ItemId,

    Red,
    Green,
    Blue,
    Duration,
    TintGround,
    PlayerColor1,
    PlayerColor2,
    Blending,
    TargetColorId,
    Opacity,
    CopiedColorHsv,
    CopiedColorId,
    CopyOpacity,

    MoveOffsetX,
    MoveOffsetY,
    Easing,
    EasingRate,
    TargetGroupId,
    LockToPlayerX,
    LockToPlayerY,
    UseTarget,
    TargetPosGroupId,
    TargetPosCoordinates,

    FadeIn,
    Hold,
    FadeOut,
    PulseMode,
    PulseHsv,
    PulseTargetType,
    MainOnly,
    DetailOnly,
    Exclusive,

    ActivateGroup,
    SpawnDelay,
    EditorDisable,

    Degrees,
    Times360,
    LockObjectRotation,
    CenterGroupId,

    FollowGroupId,
    XMod,
    YMod,

    Strength,
    Interval,
    AnimationId,

    HoldMode,
    TouchToggleMode,
    DualMode,

    TargetCount,
    Comparison,
    PickupCount,
    BlockAId,
    BlockBId,
    TriggerOnExit,

    FollowSpeed,
    FollowDelay,
    FollowYOffset,
    MaxSpeed,
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
