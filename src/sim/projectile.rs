//! Player bullets

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::enemy::Enemy;
use super::geometry::{Bounds, Rect, first_overlap};
use crate::consts::*;
use crate::playfield;

/// What happened to a bullet this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BulletStatus {
    /// Still in flight
    Flying,
    /// Struck the enemy at this index
    HitEnemy(usize),
    /// Struck a wall
    HitWall,
    /// Left the playfield or ran out of lifetime
    Expired,
}

/// A bullet entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bullet {
    pub rect: Rect,
    pub vel: Vec2,
    pub lifetime: u32,
}

impl Bullet {
    /// Fire from `origin` along the unit vector `direction` at `speed`
    pub fn new(origin: Vec2, direction: Vec2, speed: f32) -> Self {
        Self {
            rect: Rect::from_center(origin, BULLET_SIZE),
            vel: direction * speed,
            lifetime: BULLET_LIFETIME_TICKS,
        }
    }

    /// Advance one frame and resolve hits.
    ///
    /// Walls and enemies are both tested: a bullet clipping a wall corner
    /// still damages an enemy it overlaps in the same frame. Only the first
    /// overlapping enemy (in collection order) is struck.
    pub fn update<W: Bounds>(
        &mut self,
        walls: &[W],
        enemies: &mut [Enemy],
        damage: i32,
    ) -> BulletStatus {
        self.rect.translate(self.vel);
        self.lifetime = self.lifetime.saturating_sub(1);

        let hit_wall = first_overlap(&self.rect, walls).is_some();

        if let Some(index) = first_overlap(&self.rect, enemies) {
            enemies[index].take_hit(damage);
            return BulletStatus::HitEnemy(index);
        }
        if hit_wall {
            return BulletStatus::HitWall;
        }

        let field = playfield();
        let outside = self.rect.right() < field.left()
            || self.rect.left() > field.right()
            || self.rect.bottom() < field.top()
            || self.rect.top() > field.bottom();
        if outside || self.lifetime == 0 {
            return BulletStatus::Expired;
        }
        BulletStatus::Flying
    }
}

impl Bounds for Bullet {
    fn bounds(&self) -> Rect {
        self.rect
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::difficulty::Progression;
    use crate::sim::enemy::EnemyKind;
    use crate::tuning::Tuning;

    fn enemy_at(center: Vec2) -> Enemy {
        Enemy::spawn(EnemyKind::Normal, center, &Progression::new(&Tuning::default()))
    }

    #[test]
    fn test_bullet_flies_and_expires() {
        let no_walls: [Rect; 0] = [];
        let mut bullet = Bullet::new(Vec2::new(100.0, 350.0), Vec2::X, 7.0);
        for _ in 0..BULLET_LIFETIME_TICKS - 1 {
            // Moving 7 px/frame for 59 frames stays inside 800 px
            assert_eq!(bullet.update(&no_walls, &mut [], 1), BulletStatus::Flying);
        }
        assert_eq!(bullet.update(&no_walls, &mut [], 1), BulletStatus::Expired);
    }

    #[test]
    fn test_bullet_leaving_playfield_expires() {
        let no_walls: [Rect; 0] = [];
        let mut bullet = Bullet::new(Vec2::new(795.0, 350.0), Vec2::X, 30.0);
        assert_eq!(bullet.update(&no_walls, &mut [], 1), BulletStatus::Expired);
    }

    #[test]
    fn test_first_enemy_takes_the_hit() {
        let no_walls: [Rect; 0] = [];
        let mut enemies = vec![
            enemy_at(Vec2::new(110.0, 100.0)),
            enemy_at(Vec2::new(112.0, 100.0)),
        ];
        let mut bullet = Bullet::new(Vec2::new(100.0, 100.0), Vec2::X, 7.0);
        assert_eq!(bullet.update(&no_walls, &mut enemies, 2), BulletStatus::HitEnemy(0));
        assert_eq!(enemies[0].health, 1.0);
        assert_eq!(enemies[1].health, 3.0);
    }

    #[test]
    fn test_enemy_behind_wall_corner_still_hit() {
        let walls = [Rect::new(105.0, 0.0, 10.0, 700.0)];
        let mut enemies = vec![enemy_at(Vec2::new(110.0, 100.0))];
        let mut bullet = Bullet::new(Vec2::new(100.0, 100.0), Vec2::X, 7.0);
        assert_eq!(bullet.update(&walls, &mut enemies, 1), BulletStatus::HitEnemy(0));
        assert_eq!(enemies[0].health, 2.0);
    }

    #[test]
    fn test_wall_stops_bullet() {
        let walls = [Rect::new(110.0, 0.0, 40.0, 700.0)];
        let mut bullet = Bullet::new(Vec2::new(100.0, 100.0), Vec2::X, 7.0);
        assert_eq!(bullet.update(&walls, &mut [], 1), BulletStatus::HitWall);
    }
}
