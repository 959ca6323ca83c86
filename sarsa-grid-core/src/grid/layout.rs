use super::{Cell, GridEnvConfig};
use rand::Rng;

impl GridEnvConfig {
    /// A layout with one goal (`+1`), one penalty (`-1`) and `n_obstacles` obstacles, all
    /// placed uniformly at random.
    ///
    /// Placements are independent draws. The goal and the penalty may land on the same
    /// cell, in which case the penalty wins, and obstacles may cover either of them or
    /// each other. Such layouts are valid: they only shape what is learned.
    ///
    /// # Panics
    ///
    /// Panics if `width` or `height` is not positive.
    pub fn random_layout<R: Rng + ?Sized>(
        width: i32,
        height: i32,
        n_obstacles: usize,
        rng: &mut R,
    ) -> Self {
        let goal = draw(width, height, rng);
        let penalty = draw(width, height, rng);
        let mut config = Self::new(width, height).reward(goal, 1).reward(penalty, -1);
        for _ in 0..n_obstacles {
            config = config.obstacle(draw(width, height, rng));
        }
        config
    }
}

fn draw<R: Rng + ?Sized>(width: i32, height: i32, rng: &mut R) -> Cell {
    Cell::new(rng.gen_range(0..width), rng.gen_range(0..height))
}
