//! Object ids with dedicated behavior.

pub const CUBE_PORTAL: i32 = 12;
pub const SHIP_PORTAL: i32 = 13;
pub const BALL_PORTAL: i32 = 47;
pub const UFO_PORTAL: i32 = 111;
pub const WAVE_PORTAL: i32 = 660;
pub const ROBOT_PORTAL: i32 = 745;
pub const SPIDER_PORTAL: i32 = 1331;

pub const GRAVITY_PORTALS: &[i32] = &[10, 11];
pub const MIRROR_PORTALS: &[i32] = &[45, 46];
pub const SIZE_PORTALS: &[i32] = &[99, 101];
pub const DUAL_PORTALS: &[i32] = &[286, 287];
pub const SPEED_PORTALS: &[i32] = &[201, 200, 202, 203, 1334];

/// The blue half of a teleport portal pair. It owns the pair's properties.
pub const TELEPORT_PORTAL: i32 = 747;

/// The orange half of a teleport portal pair. It is only ever placed by the
/// game alongside its blue half and is never a standalone record.
pub const TELEPORT_PORTAL_EXIT: i32 = 749;

pub const ORBS: &[i32] = &[36, 84, 141, 1022, 1330, 1333, 1594, 1704, 1751];

pub const ANIMATED_OBJECTS: &[i32] = &[
    918, 1327, 1328, 1584, 1697, 1698, 1699, 1849, 1850, 1851, 1852, 1853, 1854, 1855, 1856,
    1857, 1858, 1860,
];

pub const PICKUP_ITEMS: &[i32] = &[1275, 1587, 1589, 1598, 1614];

pub const TEXT: i32 = 914;
pub const COLLISION_BLOCK: i32 = 1816;
pub const COUNT_DISPLAY: i32 = 1615;

/// Color triggers. The first id is the modern trigger, the rest are legacy
/// triggers whose target channel is implied by the id.
pub const COLOR_TRIGGERS: &[i32] = &[899, 29, 30, 104, 105, 221, 717, 718, 743, 744, 900, 915];

pub const MOVE_TRIGGER: i32 = 901;
pub const STOP_TRIGGER: i32 = 1616;
pub const PULSE_TRIGGER: i32 = 1006;
pub const ALPHA_TRIGGER: i32 = 1007;
pub const TOGGLE_TRIGGER: i32 = 1049;
pub const SPAWN_TRIGGER: i32 = 1268;
pub const ROTATE_TRIGGER: i32 = 1346;
pub const FOLLOW_TRIGGER: i32 = 1347;
pub const SHAKE_TRIGGER: i32 = 1520;
pub const ANIMATE_TRIGGER: i32 = 1585;
pub const TOUCH_TRIGGER: i32 = 1595;
pub const COUNT_TRIGGER: i32 = 1611;
pub const INSTANT_COUNT_TRIGGER: i32 = 1811;
pub const ON_DEATH_TRIGGER: i32 = 1812;
pub const FOLLOW_PLAYER_Y_TRIGGER: i32 = 1814;
pub const COLLISION_TRIGGER: i32 = 1815;
pub const PICKUP_TRIGGER: i32 = 1817;
pub const BG_EFFECT_TRIGGERS: &[i32] = &[1818, 1819];

/// Sorted ids of saws and other objects that spin on their own
const ROTATING_OBJECTS: &[i32] = &[
    85, 86, 87, 88, 89, 97, 98, 137, 138, 139, 154, 155, 156, 180, 181, 182, 183, 184, 185, 186,
    187, 188, 222, 223, 224, 375, 376, 377, 378, 394, 395, 396, 678, 679, 680, 740, 741, 742, 997,
    998, 999, 1000, 1019, 1020, 1021, 1055, 1056, 1057, 1058, 1059, 1060, 1061, 1752, 1831, 1832,
];

/// Returns true if the object spins on its own
pub fn is_rotating_object(id: i32) -> bool {
    ROTATING_OBJECTS.binary_search(&id).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotating_objects_sorted() {
        assert!(ROTATING_OBJECTS.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn rotating_object_lookup() {
        assert!(is_rotating_object(85));
        assert!(is_rotating_object(1832));
        assert!(!is_rotating_object(1));
        assert!(!is_rotating_object(CUBE_PORTAL));
    }
}
