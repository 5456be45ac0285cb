use rand::seq::SliceRandom;
use rand::Rng;

use super::object::{GridObject, Rgb};
use super::snake::Snake;

/// The single consumable cell on the field
#[derive(Debug, Clone, PartialEq)]
pub struct Apple {
    body: GridObject,
    value: u32,
}

impl Apple {
    pub fn new(x: i32, y: i32, size: i32, color: Rgb, value: u32) -> Self {
        Self {
            body: GridObject::cell(x, y, size, color),
            value,
        }
    }

    /// Place an apple on a uniformly random aligned cell
    pub fn create_random<R: Rng>(
        rng: &mut R,
        field_width: i32,
        field_height: i32,
        cell_size: i32,
        color: Rgb,
        value: u32,
    ) -> Self {
        let (x, y) = random_cell(rng, field_width, field_height, cell_size);
        Self::new(x, y, cell_size, color, value)
    }

    pub fn body(&self) -> &GridObject {
        &self.body
    }

    pub fn position(&self) -> (i32, i32) {
        self.body.position()
    }

    pub fn value(&self) -> u32 {
        self.value
    }

    /// Move to a uniformly random aligned cell. The snake is not consulted, so
    /// the apple may land under its body.
    pub fn relocate<R: Rng>(
        &mut self,
        rng: &mut R,
        field_width: i32,
        field_height: i32,
        cell_size: i32,
    ) {
        let (x, y) = random_cell(rng, field_width, field_height, cell_size);
        self.body.move_to(x, y);
    }

    /// Move to a uniformly random aligned cell the snake does not cover
    ///
    /// Falls back to [`Apple::relocate`] when the snake fills the whole field.
    /// Returns false in that case.
    pub fn relocate_avoiding<R: Rng>(
        &mut self,
        rng: &mut R,
        field_width: i32,
        field_height: i32,
        cell_size: i32,
        snake: &Snake,
    ) -> bool {
        let free: Vec<(i32, i32)> = cells(field_width, field_height, cell_size)
            .filter(|&(x, y)| {
                let candidate = GridObject::cell(x, y, cell_size, self.body.color);
                !snake.occupies(&candidate)
            })
            .collect();

        match free.choose(rng) {
            Some(&(x, y)) => {
                self.body.move_to(x, y);
                true
            }
            None => {
                self.relocate(rng, field_width, field_height, cell_size);
                false
            }
        }
    }

    #[cfg(test)]
    pub(crate) fn place_at(&mut self, x: i32, y: i32) {
        self.body.move_to(x, y);
    }
}

fn random_cell<R: Rng>(
    rng: &mut R,
    field_width: i32,
    field_height: i32,
    cell_size: i32,
) -> (i32, i32) {
    let cols = (field_width / cell_size).max(1);
    let rows = (field_height / cell_size).max(1);
    (
        rng.gen_range(0..cols) * cell_size,
        rng.gen_range(0..rows) * cell_size,
    )
}

fn cells(field_width: i32, field_height: i32, cell_size: i32) -> impl Iterator<Item = (i32, i32)> {
    let cols = field_width / cell_size;
    let rows = field_height / cell_size;
    (0..rows).flat_map(move |row| (0..cols).map(move |col| (col * cell_size, row * cell_size)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const CELL: i32 = 20;

    fn assert_aligned_in_field(apple: &Apple, width: i32, height: i32) {
        let (x, y) = apple.position();
        assert_eq!(x % CELL, 0, "x={} not aligned", x);
        assert_eq!(y % CELL, 0, "y={} not aligned", y);
        assert!((0..width).contains(&x), "x={} outside field", x);
        assert!((0..height).contains(&y), "y={} outside field", y);
    }

    #[test]
    fn test_create_random_is_aligned() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let apple = Apple::create_random(&mut rng, 200, 140, CELL, Rgb::APPLE, 1);
            assert_aligned_in_field(&apple, 200, 140);
            assert_eq!(apple.body().width, CELL);
            assert_eq!(apple.body().height, CELL);
        }
    }

    #[test]
    fn test_relocate_stays_in_field() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut apple = Apple::new(0, 0, CELL, Rgb::APPLE, 3);
        for _ in 0..200 {
            apple.relocate(&mut rng, 100, 60, CELL);
            assert_aligned_in_field(&apple, 100, 60);
        }
        assert_eq!(apple.value(), 3);
    }

    #[test]
    fn test_relocate_reaches_every_cell() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut apple = Apple::new(0, 0, CELL, Rgb::APPLE, 1);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..500 {
            apple.relocate(&mut rng, 60, 40, CELL);
            seen.insert(apple.position());
        }
        assert_eq!(seen.len(), 6);
    }

    #[test]
    fn test_relocate_avoiding_skips_snake() {
        let mut rng = StdRng::seed_from_u64(5);
        // 3x1 field, snake covers the two leftmost cells.
        let snake = Snake::new(20, 0, CELL, 2, Rgb::HEAD, vec![Rgb::LIME]);
        let mut apple = Apple::new(0, 0, CELL, Rgb::APPLE, 1);

        for _ in 0..50 {
            assert!(apple.relocate_avoiding(&mut rng, 60, 20, CELL, &snake));
            assert_eq!(apple.position(), (40, 0));
        }
    }

    #[test]
    fn test_relocate_avoiding_full_field_falls_back() {
        let mut rng = StdRng::seed_from_u64(5);
        let snake = Snake::new(20, 0, CELL, 2, Rgb::HEAD, vec![Rgb::LIME]);
        let mut apple = Apple::new(0, 0, CELL, Rgb::APPLE, 1);

        assert!(!apple.relocate_avoiding(&mut rng, 40, 20, CELL, &snake));
        assert_aligned_in_field(&apple, 40, 20);
    }
}
