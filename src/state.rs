use crate::slide::SlideTransition;

pub enum PagerState {
    Resting,                         // Showing the current page, ready for a gesture
    Transitioning(ActiveTransition), // Sliding towards `target`; further switches are rejected
}

pub struct ActiveTransition {
    pub from: usize,
    pub target: usize,
    pub slide: SlideTransition,
}

impl PagerState {
    pub fn is_transitioning(&self) -> bool {
        matches!(self, PagerState::Transitioning(_))
    }
}
