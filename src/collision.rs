//! Collision tests. Everything here is read-only over the field and the
//! pools; callers apply the consequences.

use crate::config::PickupCollision;
use crate::entities::{Enemy, FuelPickup, Player};
use crate::pool::SlotPool;
use crate::river::RiverField;
use crate::sprite::PLANE;
use crate::types::Point;

/// What the plane ran into.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Crash {
    Bank,
    Enemy(usize), // Enemy slot index
}

/// Any occupied plane cell on or beyond a bank of its row.
/// Cells on rows outside the field are ignored.
pub fn plane_hits_bank(origin: Point, field: &RiverField) -> bool {
    PLANE.cells_at(origin).any(|(cell, _)| {
        field
            .row(cell.y)
            .is_some_and(|channel| channel.is_bank(cell.x))
    })
}

/// First enemy, in slot order, whose box contains an occupied plane cell.
pub fn plane_hits_enemy(
    origin: Point,
    field: &RiverField,
    enemies: &SlotPool<Enemy>,
) -> Option<usize> {
    PLANE
        .cells_at(origin)
        .filter(|(cell, _)| field.row(cell.y).is_some())
        .find_map(|(cell, _)| enemies.find_active(|enemy| enemy.bounds().contains(cell)))
}

/// Bank first, then enemies.
pub fn plane_crash(
    player: &Player,
    field: &RiverField,
    enemies: &SlotPool<Enemy>,
) -> Option<Crash> {
    if plane_hits_bank(player.position, field) {
        return Some(Crash::Bank);
    }
    plane_hits_enemy(player.position, field, enemies).map(Crash::Enemy)
}

/// A shot is spent once it reaches row 0 or leaves the water of its row.
pub fn projectile_out_of_play(position: Point, field: &RiverField) -> bool {
    if position.y <= 0 {
        return true;
    }
    match field.row(position.y) {
        Some(channel) => channel.is_bank(position.x),
        None => true,
    }
}

/// First active enemy, in slot order, whose box contains the shot.
pub fn projectile_hits_enemy(position: Point, enemies: &SlotPool<Enemy>) -> Option<usize> {
    enemies.find_active(|enemy| enemy.bounds().contains(position))
}

pub fn pickup_collected(player: &Player, pickup: &FuelPickup, rule: PickupCollision) -> bool {
    match rule {
        PickupCollision::Anchor => player.bounds().contains(pickup.position),
        PickupCollision::Area => player.bounds().intersects(&pickup.label_bounds()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn straight_field() -> RiverField {
        RiverField::new(40, 20) // Channel 10..30 on every row
    }

    #[test]
    fn plane_inside_channel_is_safe() {
        let field = straight_field();
        let enemies: SlotPool<Enemy> = SlotPool::new(4);
        assert!(!plane_hits_bank(Point::new(11, 16), &field));
        assert!(!plane_hits_bank(Point::new(25, 16), &field));
        assert_eq!(plane_hits_enemy(Point::new(18, 16), &field, &enemies), None);
    }

    #[test]
    fn single_cell_on_bank_is_fatal() {
        let field = straight_field();
        // Row 1 of the sprite fills columns 0..5; column 0 lands on the left bank.
        assert!(plane_hits_bank(Point::new(10, 16), &field));
        // Column 4 of the middle row reaches the right bank at x = 30.
        assert!(plane_hits_bank(Point::new(26, 16), &field));
    }

    #[test]
    fn blank_sprite_cells_never_collide() {
        let field = straight_field();
        let mut enemies: SlotPool<Enemy> = SlotPool::new(1);
        // Enemy box spans columns 20..25 on rows 14..17, so it overlaps only
        // the plane's top row, where just the '^' is occupied.
        enemies.acquire(Enemy::new(20, 14));
        // Boxes overlap at (20,16), a blank cell of the plane.
        assert_eq!(plane_hits_enemy(Point::new(16, 16), &field, &enemies), None);
        // The '^' lands on (20,16).
        assert_eq!(plane_hits_enemy(Point::new(18, 16), &field, &enemies), Some(0));
    }

    #[test]
    fn projectile_leaves_play_at_row_zero_or_bank() {
        let field = straight_field();
        assert!(projectile_out_of_play(Point::new(20, 0), &field));
        assert!(projectile_out_of_play(Point::new(10, 5), &field));
        assert!(projectile_out_of_play(Point::new(30, 5), &field));
        assert!(!projectile_out_of_play(Point::new(11, 5), &field));
    }

    #[test]
    fn projectile_hit_prefers_scan_order() {
        let mut enemies: SlotPool<Enemy> = SlotPool::new(3);
        enemies.acquire(Enemy::new(30, 30));
        enemies.acquire(Enemy::new(10, 5));
        enemies.acquire(Enemy::new(12, 5));
        assert_eq!(projectile_hits_enemy(Point::new(13, 6), &enemies), Some(1));
        assert_eq!(projectile_hits_enemy(Point::new(16, 6), &enemies), Some(2));
        assert_eq!(projectile_hits_enemy(Point::new(5, 6), &enemies), None);
    }

    #[test]
    fn anchor_and_area_pickup_rules_differ() {
        let player = Player::new(40, 20, 50); // Box (20..25, 16..19)
        let touching = FuelPickup::new(16, 17); // Label spans 16..22
        assert!(!pickup_collected(&player, &touching, PickupCollision::Anchor));
        assert!(pickup_collected(&player, &touching, PickupCollision::Area));
        let inside = FuelPickup::new(22, 18);
        assert!(pickup_collected(&player, &inside, PickupCollision::Anchor));
    }
}
