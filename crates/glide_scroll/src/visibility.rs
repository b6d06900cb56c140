//! Scrollbar fade-in / fade-out control
//!
//! A scrollbar is shown only when it is needed (content overflows) and when
//! the visibility policy wants it shown. Revealing happens in two steps: the
//! scrollbar becomes visible immediately but keeps its invisible class until
//! the next [`ScrollbarVisibilityController::tick`], so a CSS-style transition
//! has a starting state to animate from.

use glide_core::{StateMachine, StateTransitions};
use serde::{Deserialize, Serialize};

/// Visibility policy of one scrollbar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrollbarVisibility {
    /// Shown on activity (hover, scroll, drag), hidden after a timeout
    #[default]
    Auto,
    /// Never shown
    Hidden,
    /// Always shown when needed
    Visible,
}

/// Display phase of a scrollbar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VisibilityPhase {
    #[default]
    Hidden,
    /// Visible, waiting one tick before switching to the visible class
    Revealing,
    Visible,
    /// Hidden with the fade class applied
    FadingOut,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisibilityEvent {
    Reveal,
    Tick,
    HideWithFade,
    HideNow,
}

impl StateTransitions<VisibilityEvent> for VisibilityPhase {
    fn on_event(&self, event: VisibilityEvent) -> Option<Self> {
        use VisibilityEvent::*;
        use VisibilityPhase::*;

        match (self, event) {
            (Hidden | FadingOut, Reveal) => Some(Revealing),
            (Revealing, Tick) => Some(Visible),
            (Revealing | Visible, HideWithFade) => Some(FadingOut),
            (Revealing | Visible | FadingOut, HideNow) => Some(Hidden),
            _ => None,
        }
    }
}

impl VisibilityPhase {
    pub fn is_visible(&self) -> bool {
        matches!(self, VisibilityPhase::Revealing | VisibilityPhase::Visible)
    }
}

/// Per-scrollbar visibility state
#[derive(Debug, Clone)]
pub struct ScrollbarVisibilityController {
    visibility: ScrollbarVisibility,
    visible_class_name: String,
    invisible_class_name: String,
    is_needed: bool,
    raw_should_be_visible: bool,
    should_be_visible: bool,
    phase: StateMachine<VisibilityPhase, VisibilityEvent>,
    class_name: String,
}

impl ScrollbarVisibilityController {
    pub fn new(
        visibility: ScrollbarVisibility,
        visible_class_name: impl Into<String>,
        invisible_class_name: impl Into<String>,
    ) -> Self {
        let invisible_class_name = invisible_class_name.into();
        let mut controller = Self {
            visibility,
            visible_class_name: visible_class_name.into(),
            class_name: invisible_class_name.clone(),
            invisible_class_name,
            is_needed: false,
            raw_should_be_visible: false,
            should_be_visible: false,
            phase: StateMachine::new(VisibilityPhase::Hidden),
        };
        controller.should_be_visible = controller.effective_should_be_visible();
        controller
    }

    /// Controller for a scrollbar tagged with `extra_class_name` (e.g. "vertical")
    pub fn for_scrollbar(visibility: ScrollbarVisibility, extra_class_name: &str) -> Self {
        Self::new(
            visibility,
            format!("visible scrollbar {extra_class_name}"),
            format!("invisible scrollbar {extra_class_name}"),
        )
    }

    pub fn visibility(&self) -> ScrollbarVisibility {
        self.visibility
    }

    pub fn set_visibility(&mut self, visibility: ScrollbarVisibility) {
        if self.visibility != visibility {
            self.visibility = visibility;
            self.update_should_be_visible();
        }
    }

    pub fn set_is_needed(&mut self, is_needed: bool) {
        if self.is_needed != is_needed {
            self.is_needed = is_needed;
            self.ensure_visibility();
        }
    }

    /// Raw request from activity tracking; the policy may override it
    pub fn set_should_be_visible(&mut self, visible: bool) {
        if self.raw_should_be_visible != visible {
            self.raw_should_be_visible = visible;
            self.update_should_be_visible();
        }
    }

    /// Apply a deferred reveal. Returns true when the class name changed.
    pub fn tick(&mut self) -> bool {
        if self.phase.send(VisibilityEvent::Tick).is_some() {
            self.class_name = self.visible_class_name.clone();
            return true;
        }
        false
    }

    pub fn needs_tick(&self) -> bool {
        self.phase.is_in(VisibilityPhase::Revealing)
    }

    pub fn is_visible(&self) -> bool {
        self.phase.current().is_visible()
    }

    pub fn should_be_visible(&self) -> bool {
        self.should_be_visible
    }

    pub fn phase(&self) -> VisibilityPhase {
        self.phase.current()
    }

    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    fn effective_should_be_visible(&self) -> bool {
        match self.visibility {
            ScrollbarVisibility::Hidden => false,
            ScrollbarVisibility::Visible => true,
            ScrollbarVisibility::Auto => self.raw_should_be_visible,
        }
    }

    fn update_should_be_visible(&mut self) {
        let should_be_visible = self.effective_should_be_visible();
        if self.should_be_visible != should_be_visible {
            self.should_be_visible = should_be_visible;
            self.ensure_visibility();
        }
    }

    fn ensure_visibility(&mut self) {
        if !self.is_needed {
            self.hide(false);
        } else if self.should_be_visible {
            self.reveal();
        } else {
            self.hide(true);
        }
    }

    fn reveal(&mut self) {
        // Class name switches on the next tick
        self.phase.send(VisibilityEvent::Reveal);
    }

    fn hide(&mut self, with_fade: bool) {
        let event = if with_fade {
            VisibilityEvent::HideWithFade
        } else {
            VisibilityEvent::HideNow
        };
        if self.phase.send(event).is_some() {
            self.class_name = if with_fade {
                format!("{} fade", self.invisible_class_name)
            } else {
                self.invisible_class_name.clone()
            };
        }
    }
}
