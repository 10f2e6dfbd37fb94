use raylib::prelude::*;
use tracing::{debug, trace};
use crate::constants::*;
use crate::page::{Page, Size};
use crate::slide::{Direction, SlideTransition, TransitionHandle};
use crate::state::{ActiveTransition, PagerState};

/// One album column: its pages, the page on screen and the swipe/slide state machine.
pub struct Pager<T> {
    pages: Vec<Page<T>>,
    visible: Vec<bool>,
    current_index: usize,
    state: PagerState,
    gesture_origin: Option<Vector2>,
    viewport: Size,
    next_handle: u64,
}

/// Slide direction for a jump from `from` to `to`.
///
/// The two wraparound jumps keep the rotational sense of the swipe that
/// produces them: first to last slides down, last to first slides up.
pub fn direction_between(from: usize, to: usize, page_count: usize) -> Direction {
    let last = page_count.saturating_sub(1);
    if page_count > 1 && from == 0 && to == last {
        Direction::Down
    } else if page_count > 1 && from == last && to == 0 {
        Direction::Up
    } else if to > from {
        Direction::Up
    } else {
        Direction::Down
    }
}

impl<T> Pager<T> {
    pub fn new(pages: Vec<Page<T>>, viewport: Size) -> Self {
        let mut visible = vec![false; pages.len()];
        if let Some(first) = visible.first_mut() {
            *first = true;
        }

        let mut pager = Self {
            pages,
            visible,
            current_index: 0,
            state: PagerState::Resting,
            gesture_origin: None,
            viewport,
            next_handle: 1,
        };
        if let Some(first) = pager.pages.first_mut() {
            first.fit_to(viewport);
        }
        pager
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn current_page(&self) -> Option<&Page<T>> {
        self.pages.get(self.current_index)
    }

    #[cfg(test)]
    pub fn page(&self, index: usize) -> Option<&Page<T>> {
        self.pages.get(index)
    }

    pub fn is_transitioning(&self) -> bool {
        self.state.is_transitioning()
    }

    /// Direction of the slide in flight, if any.
    #[cfg(test)]
    pub fn active_direction(&self) -> Option<Direction> {
        match &self.state {
            PagerState::Transitioning(active) => Some(active.slide.direction()),
            PagerState::Resting => None,
        }
    }

    #[cfg(test)]
    pub fn is_visible(&self, index: usize) -> bool {
        self.visible.get(index).copied().unwrap_or(false)
    }

    #[cfg(test)]
    pub fn visible_count(&self) -> usize {
        self.visible.iter().filter(|v| **v).count()
    }

    #[cfg(test)]
    pub fn gesture_origin(&self) -> Option<Vector2> {
        self.gesture_origin
    }

    /// Pointer pressed. Recorded even mid-slide so the release is still judged on its own.
    pub fn on_gesture_start(&mut self, position: Vector2) {
        self.gesture_origin = Some(position);
    }

    /// Pointer released: swipe down shows the previous page, swipe up the next one.
    pub fn on_gesture_end(&mut self, position: Vector2) -> Option<TransitionHandle> {
        let origin = self.gesture_origin.take()?;
        let delta = position.y - origin.y;

        if delta.abs() <= SWIPE_THRESHOLD {
            trace!(delta, "swipe below threshold");
            return None;
        }

        if delta > 0.0 {
            self.previous()
        } else {
            self.next()
        }
    }

    pub fn next(&mut self) -> Option<TransitionHandle> {
        let count = self.page_count();
        if count < 2 {
            return None;
        }
        self.switch((self.current_index + 1) % count)
    }

    pub fn previous(&mut self) -> Option<TransitionHandle> {
        let count = self.page_count();
        if count < 2 {
            return None;
        }
        self.switch((self.current_index + count - 1) % count)
    }

    /// Slide to `new_index`. Ignored while another slide is running or when the index is
    /// out of range or already shown.
    pub fn switch(&mut self, new_index: usize) -> Option<TransitionHandle> {
        if self.is_transitioning() {
            trace!(new_index, "switch rejected: slide in progress");
            return None;
        }
        if new_index >= self.page_count() || new_index == self.current_index {
            trace!(new_index, page_count = self.page_count(), "switch rejected: bad index");
            return None;
        }

        let from = self.current_index;
        let direction = direction_between(from, new_index, self.page_count());
        self.pages[new_index].fit_to(self.viewport);
        self.visible[new_index] = true;

        let handle = TransitionHandle::new(self.next_handle);
        self.next_handle += 1;
        let slide = SlideTransition::start(handle, self.viewport.height, direction);
        debug!(from, to = new_index, ?direction, "slide started");

        self.state = PagerState::Transitioning(ActiveTransition { from, target: new_index, slide });
        Some(handle)
    }

    /// Advance the slide in flight. Returns its handle on the frame it completes.
    pub fn update(&mut self, dt: f32) -> Option<TransitionHandle> {
        let PagerState::Transitioning(active) = &mut self.state else {
            return None;
        };
        active.slide.update(dt)?;
        let (from, target, direction) = (active.from, active.target, active.slide.direction());
        let handle = active.slide.handle();

        self.current_index = target;
        self.visible[from] = false;
        self.pages[target].fit_to(self.viewport);
        self.state = PagerState::Resting;

        debug!(index = target, ?direction, ?handle, "slide finished");
        Some(handle)
    }

    /// Refit what is on screen now; the other pages are refitted when they slide in.
    pub fn on_resize(&mut self, new_size: Size) {
        self.viewport = new_size;
        if let PagerState::Transitioning(active) = &mut self.state {
            active.slide.set_viewport_height(new_size.height);
        }
        for (page, visible) in self.pages.iter_mut().zip(&self.visible) {
            if *visible {
                page.fit_to(new_size);
            }
        }
    }

    /// Pages to draw this frame with their vertical offsets, outgoing first.
    pub fn layers(&self) -> Vec<(&Page<T>, f32)> {
        match &self.state {
            PagerState::Resting => self.current_page().map(|page| (page, 0.0)).into_iter().collect(),
            PagerState::Transitioning(active) => vec![
                (&self.pages[active.from], active.slide.outgoing_offset()),
                (&self.pages[active.target], active.slide.incoming_offset()),
            ],
        }
    }
}

impl Pager<Texture2D> {
    pub fn draw<D: RaylibDraw>(&self, d: &mut D, bounds: Rectangle) {
        for (page, offset_y) in self.layers() {
            page.draw(d, bounds, offset_y);
        }
    }
}
