use raylib::prelude::*;
use crate::constants::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,   // Towards the next page: content moves upwards
    Down, // Towards the previous page: content moves downwards
}

/// Identifies one started transition; handed back exactly once when it finishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TransitionHandle(u64);

impl TransitionHandle {
    pub fn new(id: u64) -> Self {
        Self(id)
    }
}

/// Vertical hand-off between the page leaving the viewport and the page entering it.
///
/// Offsets are relative to the viewport's resting position. Both tweens run
/// in viewport heights, so a resize mid-slide only changes the scale they are
/// drawn at. The transition owns both tweens until it has finished; the frame
/// loop drives it through [`SlideTransition::update`].
pub struct SlideTransition {
    handle: TransitionHandle,
    direction: Direction,

    viewport_height: f32,
    outgoing_position: f32,
    incoming_position: f32,
    outgoing_end: f32,

    tween_outgoing: ease::Tween,
    tween_incoming: ease::Tween,

    animation_timer: f32,
    duration: f32,
    finished: bool,
}

impl SlideTransition {
    pub fn start(handle: TransitionHandle, viewport_height: f32, direction: Direction) -> Self {
        Self::start_with_duration(handle, viewport_height, direction, SLIDE_DURATION)
    }

    pub fn start_with_duration(
        handle: TransitionHandle,
        viewport_height: f32,
        direction: Direction,
        duration: f32,
    ) -> Self {
        let (incoming_start, outgoing_end) = match direction {
            Direction::Up => (1.0, -1.0),
            Direction::Down => (-1.0, 1.0),
        };

        Self {
            handle,
            direction,

            viewport_height,
            outgoing_position: 0.0,
            incoming_position: incoming_start,
            outgoing_end,

            tween_outgoing: ease::Tween::new(ease::quad_in_out, 0.0, outgoing_end, duration),
            tween_incoming: ease::Tween::new(ease::quad_in_out, incoming_start, 0.0, duration),

            animation_timer: 0.0,
            duration,
            finished: false,
        }
    }

    pub fn handle(&self) -> TransitionHandle {
        self.handle
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn outgoing_offset(&self) -> f32 {
        self.outgoing_position * self.viewport_height
    }

    pub fn incoming_offset(&self) -> f32 {
        self.incoming_position * self.viewport_height
    }

    /// Keep both elements one full viewport apart after the window changed size.
    pub fn set_viewport_height(&mut self, viewport_height: f32) {
        self.viewport_height = viewport_height;
    }

    /// Advance both elements by `dt` seconds.
    ///
    /// Returns the handle on the frame the incoming element comes to rest and
    /// `None` on every other call, including all calls after that one.
    pub fn update(&mut self, dt: f32) -> Option<TransitionHandle> {
        if self.finished {
            return None;
        }

        self.outgoing_position = self.tween_outgoing.apply(dt);
        self.incoming_position = self.tween_incoming.apply(dt);

        self.animation_timer += dt;
        if self.animation_timer >= self.duration {
            // Snap to the exact end positions
            self.outgoing_position = self.outgoing_end;
            self.incoming_position = 0.0;
            self.finished = true;
            return Some(self.handle);
        }

        None
    }
}
