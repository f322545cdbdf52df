//! Category rules for colliding pairs
//!
//! Every decision here is keyed on `NodeCategory`. The functions take the two
//! categories of a pair in visiting order and report which side, if any, an
//! effect applies to.

use crate::scene::NodeCategory;

/// Position of a node within a visited pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    First,
    Second,
}

impl Side {
    pub fn other(self) -> Side {
        match self {
            Side::First => Side::Second,
            Side::Second => Side::First,
        }
    }

    pub fn pick<T>(self, first: T, second: T) -> T {
        match self {
            Side::First => first,
            Side::Second => second,
        }
    }
}

/// Pairs that are never tested: the player against its own launch anchor and
/// arrows, and arrows against the anchor they leave from.
pub fn is_excluded_pair(a: NodeCategory, b: NodeCategory) -> bool {
    use NodeCategory::*;

    matches!(
        (a, b),
        (Player, Projectile)
            | (Projectile, Player)
            | (Player, SpawnAnchor)
            | (SpawnAnchor, Player)
            | (Projectile, SpawnAnchor)
            | (SpawnAnchor, Projectile)
    )
}

fn side_of(a: NodeCategory, b: NodeCategory, wanted: NodeCategory) -> Option<Side> {
    if a == wanted {
        Some(Side::First)
    } else if b == wanted {
        Some(Side::Second)
    } else {
        None
    }
}

/// The side that receives the minimum translation push.
///
/// Only the player is ever displaced, and only by solid bodies (targets and
/// scenery). Pickups are triggers.
pub fn pushed_side(a: NodeCategory, b: NodeCategory) -> Option<Side> {
    let player = side_of(a, b, NodeCategory::Player)?;
    let other = player.other().pick(a, b);
    match other {
        NodeCategory::Target | NodeCategory::Scenery => Some(player),
        _ => None,
    }
}

/// The pickup side when a pickup touches the player
pub fn pickup_side(a: NodeCategory, b: NodeCategory) -> Option<Side> {
    match (a, b) {
        (NodeCategory::Pickup, NodeCategory::Player) => Some(Side::First),
        (NodeCategory::Player, NodeCategory::Pickup) => Some(Side::Second),
        _ => None,
    }
}

/// The projectile side that gets pinned: a projectile stops on anything except
/// another projectile or a pickup.
pub fn pinned_side(a: NodeCategory, b: NodeCategory) -> Option<Side> {
    if is_excluded_pair(a, b) {
        return None;
    }
    let projectile = side_of(a, b, NodeCategory::Projectile)?;
    let other = projectile.other().pick(a, b);
    match other {
        NodeCategory::Projectile | NodeCategory::Pickup => None,
        _ => Some(projectile),
    }
}
