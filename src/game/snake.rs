use super::action::Direction;
use super::object::{GridObject, Rgb};

/// The player-controlled chain of cells
///
/// The head is kept apart from the body so it can be steered; `body[0]` is the
/// segment right behind the head and `body.last()` is the tail.
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    head: GridObject,
    body: Vec<GridObject>,
    /// Direction used by the last step
    direction: Direction,
    /// Direction the next step will commit
    pending_direction: Direction,
    growth_pending: u32,
    body_colors: Vec<Rgb>,
}

impl Snake {
    /// Create a snake heading right with its body trailing to the left
    ///
    /// `length` counts the head; a length of 1 is a lone head. An empty
    /// palette falls back to the head color.
    pub fn new(
        x: i32,
        y: i32,
        cell_size: i32,
        length: usize,
        head_color: Rgb,
        body_colors: Vec<Rgb>,
    ) -> Self {
        let body_colors = if body_colors.is_empty() {
            vec![head_color]
        } else {
            body_colors
        };

        let direction = Direction::Right;
        let (dx, dy) = direction.opposite().delta();

        let body = (1..length.max(1))
            .map(|i| {
                // Saturates instead of overflowing; validated configs never get here.
                let offset = i32::try_from(i)
                    .ok()
                    .and_then(|i| i.checked_mul(cell_size))
                    .unwrap_or(i32::MAX);
                let color = body_colors[(i - 1) % body_colors.len()];
                GridObject::cell(
                    x.saturating_add(dx.saturating_mul(offset)),
                    y.saturating_add(dy.saturating_mul(offset)),
                    cell_size,
                    color,
                )
            })
            .collect();

        Self {
            head: GridObject::cell(x, y, cell_size, head_color),
            body,
            direction,
            pending_direction: direction,
            growth_pending: 0,
            body_colors,
        }
    }

    pub fn head(&self) -> &GridObject {
        &self.head
    }

    /// Body segments from the neck to the tail, head excluded
    pub fn body(&self) -> &[GridObject] {
        &self.body
    }

    /// Head first, then the body in order
    pub fn segments(&self) -> impl Iterator<Item = &GridObject> {
        std::iter::once(&self.head).chain(self.body.iter())
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn pending_direction(&self) -> Direction {
        self.pending_direction
    }

    pub fn growth_pending(&self) -> u32 {
        self.growth_pending
    }

    pub fn body_colors(&self) -> &[Rgb] {
        &self.body_colors
    }

    /// Buffer a turn for the next step
    ///
    /// The reversal check runs against the committed direction, not the
    /// pending one, so every request between two steps is judged against the
    /// same base. Returns whether the request was stored.
    pub fn request_direction(&mut self, candidate: Direction) -> bool {
        if self.direction.is_opposite(candidate) {
            return false;
        }
        self.pending_direction = candidate;
        true
    }

    /// Advance one cell
    pub fn step(&mut self) {
        self.direction = self.pending_direction;

        let previous_head = self.head.position();

        // Tail first, so nothing is overwritten before it is read.
        for i in (1..self.body.len()).rev() {
            let (x, y) = self.body[i - 1].position();
            self.body[i].move_to(x, y);
        }
        if let Some(neck) = self.body.first_mut() {
            neck.move_to(previous_head.0, previous_head.1);
        }

        let (dx, dy) = self.direction.delta();
        self.head.move_by(dx * self.head.width, dy * self.head.height);

        if self.growth_pending > 0 {
            self.append_segment(previous_head);
            self.growth_pending -= 1;
        }
    }

    fn append_segment(&mut self, previous_head: (i32, i32)) {
        let (x, y) = self
            .body
            .last()
            .map(GridObject::position)
            .unwrap_or(previous_head);
        let color = self.body_colors[self.body.len() % self.body_colors.len()];
        self.body
            .push(GridObject::new(x, y, self.head.width, self.head.height, color));
    }

    /// Schedule growth; each unit shows up as one extra segment on a later step
    pub fn request_growth(&mut self, amount: u32) {
        self.growth_pending = self.growth_pending.saturating_add(amount);
    }

    pub fn collides_with_self(&self) -> bool {
        self.body.iter().any(|segment| self.head.overlaps(segment))
    }

    pub fn collides_with_wall(&self, field_width: i32, field_height: i32) -> bool {
        self.head.x < 0
            || self.head.x >= field_width
            || self.head.y < 0
            || self.head.y >= field_height
    }

    /// True if any part of the snake, head included, covers `other`
    pub fn occupies(&self, other: &GridObject) -> bool {
        self.segments().any(|segment| segment.overlaps(other))
    }

    pub fn len(&self) -> usize {
        1 + self.body.len()
    }

    /// Always false: the head cannot be removed
    pub fn is_empty(&self) -> bool {
        false
    }
}
