use crate::config::RulesConfig;
use crate::physics::Character;
use crate::terrain::Worm;
use crate::world::WorldConfig;

impl Worm {
    /// Crawl one tick, turning around at the world edges.
    pub fn crawl(&mut self, world: &WorldConfig, rules: &RulesConfig) {
        self.x += self.speed * rules.worm_crawl_factor * self.direction;
        if self.x < 0.0 {
            self.x = 0.0;
            self.direction = 1.0;
        } else if self.x > world.width {
            self.x = world.width;
            self.direction = -1.0;
        }
        self.phase = (self.phase + rules.worm_phase_step) % std::f32::consts::TAU;
    }

    /// Whether the worm touches a character standing on the floor.
    pub fn hits(&self, ch: &Character, world: &WorldConfig, rules: &RulesConfig) -> bool {
        (ch.x - self.x).abs() < rules.worm_hit_radius
            && (ch.y - world.floor_y).abs() < rules.worm_hit_height
    }
}

pub fn crawl_worms(worms: &mut [Worm], world: &WorldConfig, rules: &RulesConfig) {
    for worm in worms {
        worm.crawl(world, rules);
    }
}

/// Remove the first worm hitting the character and return it. A worm is
/// consumed by the hit so it cannot drain several lives in a row.
pub fn take_hit(
    worms: &mut Vec<Worm>,
    ch: &Character,
    world: &WorldConfig,
    rules: &RulesConfig,
) -> Option<Worm> {
    if ch.plummeting {
        return None;
    }
    let idx = worms.iter().position(|w| w.hits(ch, world, rules))?;
    Some(worms.remove(idx))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BlobbyConfig;

    fn setup() -> (WorldConfig, RulesConfig) {
        let cfg = BlobbyConfig::default();
        (WorldConfig::with_width(3072.0, &cfg).unwrap(), cfg.rules)
    }

    fn worm(x: f32, direction: f32) -> Worm {
        Worm {
            x,
            y: 429.0,
            direction,
            speed: 0.1,
            phase: 0.0,
            segments: 4,
        }
    }

    #[test]
    fn crawl_moves_by_damped_speed() {
        let (world, rules) = setup();
        let mut w = worm(1000.0, 1.0);
        w.crawl(&world, &rules);
        assert!((w.x - 1000.06).abs() < 1e-3);
        assert!((w.phase - 0.15).abs() < 1e-6);
    }

    #[test]
    fn crawl_bounces_at_edges() {
        let (world, rules) = setup();
        let mut w = worm(0.01, -1.0);
        w.crawl(&world, &rules);
        assert_eq!(w.x, 0.0);
        assert_eq!(w.direction, 1.0);

        let mut w = worm(world.width - 0.01, 1.0);
        w.crawl(&world, &rules);
        assert_eq!(w.x, world.width);
        assert_eq!(w.direction, -1.0);
    }

    #[test]
    fn hit_requires_character_near_floor() {
        let (world, rules) = setup();
        let mut ch = Character::spawn(&world);
        ch.x = 1000.0;
        let mut worms = vec![worm(1010.0, 1.0), worm(2000.0, 1.0)];

        ch.y = world.floor_y - 30.0;
        assert!(take_hit(&mut worms, &ch, &world, &rules).is_none());

        ch.y = world.floor_y;
        let hit = take_hit(&mut worms, &ch, &world, &rules).unwrap();
        assert_eq!(hit.x, 1010.0);
        assert_eq!(worms.len(), 1);
        assert!(take_hit(&mut worms, &ch, &world, &rules).is_none());
    }

    #[test]
    fn plummeting_character_is_not_hit() {
        let (world, rules) = setup();
        let mut ch = Character::spawn(&world);
        ch.x = 1000.0;
        ch.plummeting = true;
        let mut worms = vec![worm(1000.0, 1.0)];
        assert!(take_hit(&mut worms, &ch, &world, &rules).is_none());
    }
}
