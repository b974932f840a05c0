//! Collision detection and region culling
//!
//! Hazards are circles of radius `size / 2`; projectiles and the rocket are
//! treated as points. Removal uses mark-and-compact so that no pair is skipped
//! or compared twice while collections shrink.

use glam::Vec2;

use super::state::{Asteroid, Projectile};

/// A projectile that destroyed an asteroid this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProjectileHit {
    pub asteroid_id: u32,
    pub projectile_id: u32,
    pub cluster: bool,
    pub points: u64,
}

/// Whether `point` lies strictly inside the circle
#[inline]
pub fn circle_contains(center: Vec2, radius: f32, point: Vec2) -> bool {
    center.distance(point) < radius
}

/// Axis-aligned area outside of which entities are discarded
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackedRegion {
    pub min: Vec2,
    pub max: Vec2,
}

impl TrackedRegion {
    /// The view rectangle grown by `margin` on every side
    pub fn around_view(camera: Vec2, view_size: Vec2, margin: f32) -> Self {
        Self {
            min: camera - Vec2::splat(margin),
            max: camera + view_size + Vec2::splat(margin),
        }
    }

    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }
}

/// Resolve projectile-vs-asteroid hits.
///
/// Each asteroid is tested against the projectiles still alive, in order; the
/// first one inside its circle destroys both, and no further projectile is
/// tested against that asteroid. Destroyed entries are removed before returning.
pub fn resolve_projectile_hits(
    asteroids: &mut Vec<Asteroid>,
    projectiles: &mut Vec<Projectile>,
) -> Vec<ProjectileHit> {
    let mut hits = Vec::new();
    if asteroids.is_empty() || projectiles.is_empty() {
        return hits;
    }

    let mut asteroid_alive = vec![true; asteroids.len()];
    let mut projectile_alive = vec![true; projectiles.len()];

    for (ai, asteroid) in asteroids.iter().enumerate() {
        let hit = projectiles
            .iter()
            .enumerate()
            .filter(|(pi, _)| projectile_alive[*pi])
            .find(|(_, p)| circle_contains(asteroid.pos, asteroid.radius(), p.pos));

        if let Some((pi, projectile)) = hit {
            asteroid_alive[ai] = false;
            projectile_alive[pi] = false;
            hits.push(ProjectileHit {
                asteroid_id: asteroid.id,
                projectile_id: projectile.id,
                cluster: asteroid.cluster,
                points: asteroid.points(),
            });
        }
    }

    compact(asteroids, &asteroid_alive);
    compact(projectiles, &projectile_alive);
    hits
}

/// Index of the first asteroid whose circle contains the rocket
pub fn first_rocket_hit(asteroids: &[Asteroid], rocket_pos: Vec2) -> Option<usize> {
    asteroids
        .iter()
        .position(|a| circle_contains(a.pos, a.radius(), rocket_pos))
}

/// Drop entries whose mark is false, keeping order
fn compact<T>(items: &mut Vec<T>, alive: &[bool]) {
    let mut marks = alive.iter();
    items.retain(|_| marks.next().copied().unwrap_or(true));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn projectile(id: u32, pos: Vec2) -> Projectile {
        Projectile {
            id,
            pos,
            angle: 0.0,
            speed: 0.0,
        }
    }

    #[test]
    fn test_circle_contains_is_strict() {
        assert!(circle_contains(Vec2::ZERO, 10.0, Vec2::new(9.9, 0.0)));
        assert!(!circle_contains(Vec2::ZERO, 10.0, Vec2::new(10.0, 0.0)));
    }

    #[test]
    fn test_tracked_region() {
        let region = TrackedRegion::around_view(Vec2::new(100.0, 50.0), Vec2::new(200.0, 100.0), 10.0);
        assert!(region.contains(Vec2::new(90.0, 40.0)));
        assert!(region.contains(Vec2::new(310.0, 160.0)));
        assert!(!region.contains(Vec2::new(89.0, 100.0)));
        assert!(!region.contains(Vec2::new(200.0, 161.0)));
    }

    #[test]
    fn test_one_projectile_per_asteroid() {
        let mut asteroids = vec![Asteroid::plain(1, Vec2::ZERO, 0)];
        let mut projectiles = vec![
            projectile(10, Vec2::new(5.0, 0.0)),
            projectile(11, Vec2::new(1.0, 0.0)),
        ];

        let hits = resolve_projectile_hits(&mut asteroids, &mut projectiles);

        assert_eq!(hits.len(), 1);
        // Iteration order decides, not distance
        assert_eq!(hits[0].projectile_id, 10);
        assert!(asteroids.is_empty());
        assert_eq!(projectiles.len(), 1);
        assert_eq!(projectiles[0].id, 11);
    }

    #[test]
    fn test_one_asteroid_per_projectile() {
        let mut asteroids = vec![
            Asteroid::plain(1, Vec2::ZERO, 0),
            Asteroid::cluster(2, Vec2::new(10.0, 0.0), 1),
        ];
        let mut projectiles = vec![projectile(10, Vec2::new(5.0, 0.0))];

        let hits = resolve_projectile_hits(&mut asteroids, &mut projectiles);

        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].asteroid_id, 1);
        assert_eq!(asteroids.len(), 1);
        assert_eq!(asteroids[0].id, 2);
        assert!(projectiles.is_empty());
    }

    #[test]
    fn test_neighbouring_pairs_all_resolve() {
        // Adjacent removals must not skip the next pair
        let mut asteroids: Vec<_> = (0..4)
            .map(|i| Asteroid::plain(i, Vec2::new(i as f32 * 1000.0, 0.0), 0))
            .collect();
        let mut projectiles: Vec<_> = (0..4)
            .map(|i| projectile(100 + i, Vec2::new(i as f32 * 1000.0, 1.0)))
            .collect();

        let hits = resolve_projectile_hits(&mut asteroids, &mut projectiles);

        assert_eq!(hits.len(), 4);
        assert!(asteroids.is_empty());
        assert!(projectiles.is_empty());
    }

    #[test]
    fn test_first_rocket_hit() {
        let asteroids = vec![
            Asteroid::plain(1, Vec2::new(500.0, 0.0), 0),
            Asteroid::plain(2, Vec2::new(10.0, 0.0), 0),
        ];
        assert_eq!(first_rocket_hit(&asteroids, Vec2::ZERO), Some(1));
        assert_eq!(first_rocket_hit(&asteroids, Vec2::new(0.0, 1000.0)), None);
    }
}
