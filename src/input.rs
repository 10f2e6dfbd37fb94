use raylib::prelude::*;

/// Single-contact pointer event in screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Pressed(Vector2),
    Released(Vector2),
}

/// Gesture addressed to one column, in that column's local coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColumnGesture {
    Start(Vector2),
    End(Vector2),
}

/// Split the screen into `count` equal-width columns.
pub fn column_bounds(screen_width: f32, screen_height: f32, count: usize) -> Vec<Rectangle> {
    if count == 0 {
        return Vec::new();
    }
    let width = screen_width / count as f32;
    (0..count)
        .map(|i| Rectangle::new(i as f32 * width, 0.0, width, screen_height))
        .collect()
}

pub fn column_at(x: f32, bounds: &[Rectangle]) -> Option<usize> {
    bounds.iter().position(|b| x >= b.x && x < b.x + b.width)
}

fn to_local(position: Vector2, bounds: &Rectangle) -> Vector2 {
    Vector2::new(position.x - bounds.x, position.y - bounds.y)
}

/// Routes a press to the column under it, and the matching release to that
/// same column wherever the pointer ends up.
#[derive(Debug, Default)]
pub struct PointerRouter {
    pressed_column: Option<usize>,
}

impl PointerRouter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn route(&mut self, event: PointerEvent, bounds: &[Rectangle]) -> Option<(usize, ColumnGesture)> {
        match event {
            PointerEvent::Pressed(position) => {
                let column = column_at(position.x, bounds)?;
                self.pressed_column = Some(column);
                Some((column, ColumnGesture::Start(to_local(position, &bounds[column]))))
            }
            PointerEvent::Released(position) => {
                let column = self.pressed_column.take()?;
                let column_bounds = bounds.get(column)?;
                Some((column, ColumnGesture::End(to_local(position, column_bounds))))
            }
        }
    }
}

/// Tracks the primary pointer between frames.
///
/// raylib reports the first touch point as the left mouse button, but the
/// touch position is gone on the frame the finger lifts, so the last touch
/// position is kept for the release.
#[derive(Debug, Default)]
pub struct PointerInput {
    last_touch: Option<Vector2>,
}

impl PointerInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn poll(&mut self, rl: &RaylibHandle) -> Option<PointerEvent> {
        let touch = (rl.get_touch_point_count() > 0).then(|| rl.get_touch_position(0));
        let position = touch.or(self.last_touch).unwrap_or_else(|| rl.get_mouse_position());

        let event = if rl.is_mouse_button_pressed(MouseButton::MOUSE_BUTTON_LEFT) {
            Some(PointerEvent::Pressed(position))
        } else if rl.is_mouse_button_released(MouseButton::MOUSE_BUTTON_LEFT) {
            Some(PointerEvent::Released(position))
        } else {
            None
        };

        self.last_touch = match event {
            Some(PointerEvent::Released(_)) => None,
            _ => touch.or(self.last_touch),
        };
        event
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn screen() -> Vec<Rectangle> {
        column_bounds(1200.0, 800.0, 3)
    }

    #[test]
    fn columns_split_the_screen_evenly() {
        let bounds = screen();
        assert_eq!(bounds.len(), 3);
        assert_eq!(bounds[1].x, 400.0);
        assert_eq!(bounds[2].width, 400.0);
        assert_eq!(bounds[0].height, 800.0);
        assert!(column_bounds(1200.0, 800.0, 0).is_empty());
    }

    #[test]
    fn column_lookup_by_x() {
        let bounds = screen();
        assert_eq!(column_at(0.0, &bounds), Some(0));
        assert_eq!(column_at(399.9, &bounds), Some(0));
        assert_eq!(column_at(400.0, &bounds), Some(1));
        assert_eq!(column_at(1199.0, &bounds), Some(2));
        assert_eq!(column_at(1200.0, &bounds), None);
        assert_eq!(column_at(-1.0, &bounds), None);
    }

    #[test]
    fn release_goes_to_the_pressed_column() {
        let bounds = screen();
        let mut router = PointerRouter::new();

        let press = router.route(PointerEvent::Pressed(Vector2::new(450.0, 600.0)), &bounds);
        assert_eq!(press, Some((1, ColumnGesture::Start(Vector2::new(50.0, 600.0)))));

        // Finger drifted into the right column before lifting
        let release = router.route(PointerEvent::Released(Vector2::new(820.0, 300.0)), &bounds);
        assert_eq!(release, Some((1, ColumnGesture::End(Vector2::new(420.0, 300.0)))));
    }

    #[test]
    fn release_without_press_is_dropped() {
        let bounds = screen();
        let mut router = PointerRouter::new();
        assert_eq!(router.route(PointerEvent::Released(Vector2::new(10.0, 10.0)), &bounds), None);

        router.route(PointerEvent::Pressed(Vector2::new(10.0, 10.0)), &bounds);
        assert!(router.route(PointerEvent::Released(Vector2::new(10.0, 90.0)), &bounds).is_some());
        assert_eq!(router.route(PointerEvent::Released(Vector2::new(10.0, 90.0)), &bounds), None);
    }

    #[test]
    fn press_outside_columns_is_dropped() {
        let mut router = PointerRouter::new();
        assert_eq!(router.route(PointerEvent::Pressed(Vector2::new(50.0, 50.0)), &[]), None);
    }
}
