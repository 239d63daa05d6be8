//! Per-element bookkeeping of in-flight gesture tweens.
//!
//! An element owns at most one pooled tween across `current` and `leave`: starting either kind
//! kills and evicts whatever the element had pooled before the new tween is created. Click
//! gestures are tracked separately so a press never interrupts a hover follow.

use std::collections::HashMap;

use crate::animation::tween::{Animator, FinishedTween, TweenId};
use crate::foundation::core::ElementId;

#[derive(Debug, Default)]
pub struct AnimationPool {
    current_tweens: HashMap<ElementId, TweenId>,
    leave_tweens: HashMap<ElementId, TweenId>,
    click_animations: HashMap<ElementId, TweenId>,
}

impl AnimationPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Evict the element's pooled tweens, then start and pool a new "current" tween.
    pub fn replace_current(
        &mut self,
        animator: &mut Animator,
        element: ElementId,
        start: impl FnOnce(&mut Animator) -> TweenId,
    ) -> TweenId {
        self.evict(animator, element);
        let id = start(animator);
        self.current_tweens.insert(element, id);
        id
    }

    /// Evict the element's pooled tweens, then start and pool a new "leave" tween.
    pub fn replace_leave(
        &mut self,
        animator: &mut Animator,
        element: ElementId,
        start: impl FnOnce(&mut Animator) -> TweenId,
    ) -> TweenId {
        self.evict(animator, element);
        let id = start(animator);
        self.leave_tweens.insert(element, id);
        id
    }

    /// Kill and forget the element's current and leave tweens. Returns how many were live.
    pub fn evict(&mut self, animator: &mut Animator, element: ElementId) -> usize {
        [
            self.current_tweens.remove(&element),
            self.leave_tweens.remove(&element),
        ]
        .into_iter()
        .flatten()
        .filter(|id| animator.kill(*id))
        .count()
    }

    /// Start a click gesture unless one is already running on the element.
    pub fn begin_click(
        &mut self,
        animator: &mut Animator,
        element: ElementId,
        start: impl FnOnce(&mut Animator) -> TweenId,
    ) -> Option<TweenId> {
        if self.click_animations.contains_key(&element) {
            return None;
        }
        let id = start(animator);
        self.click_animations.insert(element, id);
        Some(id)
    }

    /// Kill and forget the element's click gesture, if any.
    pub fn cancel_click(&mut self, animator: &mut Animator, element: ElementId) -> bool {
        self.click_animations
            .remove(&element)
            .is_some_and(|id| animator.kill(id))
    }

    pub fn is_clicking(&self, element: ElementId) -> bool {
        self.click_animations.contains_key(&element)
    }

    pub fn current(&self, element: ElementId) -> Option<TweenId> {
        self.current_tweens.get(&element).copied()
    }

    pub fn leave(&self, element: ElementId) -> Option<TweenId> {
        self.leave_tweens.get(&element).copied()
    }

    /// Drop entries for tweens that ran to completion.
    pub fn retire(&mut self, finished: &[FinishedTween]) {
        for f in finished {
            for map in [
                &mut self.current_tweens,
                &mut self.leave_tweens,
                &mut self.click_animations,
            ] {
                if map.get(&f.element) == Some(&f.id) {
                    map.remove(&f.element);
                }
            }
        }
    }

    /// Kill every pooled hover tween (current and leave). Click gestures are left to finish.
    pub fn clear_hover(&mut self, animator: &mut Animator) {
        for id in self
            .current_tweens
            .drain()
            .chain(self.leave_tweens.drain())
            .map(|(_, id)| id)
        {
            animator.kill(id);
        }
    }

    /// Kill every pooled click gesture.
    pub fn clear_clicks(&mut self, animator: &mut Animator) {
        for (_, id) in self.click_animations.drain() {
            animator.kill(id);
        }
    }

    pub fn clear(&mut self, animator: &mut Animator) {
        self.clear_hover(animator);
        self.clear_clicks(animator);
    }

    pub fn current_count(&self) -> usize {
        self.current_tweens.len()
    }

    pub fn leave_count(&self) -> usize {
        self.leave_tweens.len()
    }

    pub fn click_count(&self) -> usize {
        self.click_animations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.current_tweens.is_empty()
            && self.leave_tweens.is_empty()
            && self.click_animations.is_empty()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/pool.rs"]
mod tests;
