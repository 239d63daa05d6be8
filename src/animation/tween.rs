//! Time-based property tweens over element poses.
//!
//! The animator owns the pose (translate + scale) of every element it touches and writes it
//! to the surface after each advance. A tween is a sequence of steps; a single-step tween is a
//! plain `to`, a multi-step one is a timeline.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::animation::ease::Ease;
use crate::foundation::core::{ElementId, Millis, Transform};
use crate::foundation::math::lerp;
use crate::platform::surface::Surface;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize)]
pub struct TweenId(pub u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Channel {
    X,
    Y,
    Scale,
}

/// End values of a step. `None` leaves a channel untouched.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TweenTarget {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub scale: Option<f64>,
}

impl TweenTarget {
    pub fn xy(x: f64, y: f64) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            scale: None,
        }
    }

    pub fn scale(s: f64) -> Self {
        Self {
            scale: Some(s),
            ..Self::default()
        }
    }

    pub fn touches(&self, channel: Channel) -> bool {
        match channel {
            Channel::X => self.x.is_some(),
            Channel::Y => self.y.is_some(),
            Channel::Scale => self.scale.is_some(),
        }
    }

    fn blend(&self, from: Transform, pose: &mut Transform, k: f64) {
        if let Some(x) = self.x {
            pose.translate.x = lerp(from.translate.x, x, k);
        }
        if let Some(y) = self.y {
            pose.translate.y = lerp(from.translate.y, y, k);
        }
        if let Some(s) = self.scale {
            pose.scale = lerp(from.scale, s, k);
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TweenStep {
    pub target: TweenTarget,
    pub duration_ms: u64,
    pub ease: Ease,
}

impl TweenStep {
    pub fn new(target: TweenTarget, duration_ms: u64, ease: Ease) -> Self {
        Self {
            target,
            duration_ms,
            ease,
        }
    }
}

/// A tween that ran to completion during an advance.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FinishedTween {
    pub id: TweenId,
    pub element: ElementId,
}

#[derive(Debug)]
struct Tween {
    element: ElementId,
    steps: Vec<TweenStep>,
    index: usize,
    step_start: Millis,
    from: Transform,
}

impl Tween {
    fn touches_any(&self, channels: &[Channel]) -> bool {
        self.steps
            .iter()
            .any(|s| channels.iter().any(|c| s.target.touches(*c)))
    }

    // Returns true once the last step has been applied.
    fn advance(&mut self, pose: &mut Transform, now: Millis) -> bool {
        if now < self.step_start {
            return false;
        }
        loop {
            let step = self.steps[self.index];
            let elapsed = now.since(self.step_start);
            if elapsed < step.duration_ms {
                let k = step
                    .ease
                    .apply(elapsed as f64 / step.duration_ms as f64);
                step.target.blend(self.from, pose, k);
                return false;
            }
            step.target.blend(self.from, pose, 1.0);
            self.index += 1;
            self.step_start = self.step_start.after(step.duration_ms);
            self.from = *pose;
            if self.index == self.steps.len() {
                return true;
            }
        }
    }
}

#[derive(Debug, Default)]
pub struct Animator {
    next: u64,
    tweens: BTreeMap<TweenId, Tween>,
    poses: HashMap<ElementId, Transform>,
    dirty: BTreeSet<ElementId>,
}

impl Animator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pose(&self, element: ElementId) -> Transform {
        self.poses.get(&element).copied().unwrap_or_default()
    }

    /// Jump channels to their target values and write the pose immediately.
    pub fn set(&mut self, surface: &mut dyn Surface, element: ElementId, target: TweenTarget) {
        let pose = self.poses.entry(element).or_default();
        target.blend(*pose, pose, 1.0);
        surface.set_transform(element, Some(*pose));
        self.dirty.remove(&element);
    }

    /// Start a single-step tween. Other tweens on the element that drive any of the same
    /// channels are killed first.
    pub fn to(&mut self, element: ElementId, step: TweenStep, now: Millis) -> TweenId {
        self.timeline(element, vec![step], now)
    }

    /// Start a sequence of steps played back to back.
    pub fn timeline(&mut self, element: ElementId, steps: Vec<TweenStep>, now: Millis) -> TweenId {
        let channels: Vec<Channel> = [Channel::X, Channel::Y, Channel::Scale]
            .into_iter()
            .filter(|c| steps.iter().any(|s| s.target.touches(*c)))
            .collect();
        self.kill_tweens_of(element, &channels);

        let id = TweenId(self.next);
        self.next += 1;
        if steps.is_empty() {
            return id;
        }
        self.tweens.insert(
            id,
            Tween {
                element,
                steps,
                index: 0,
                step_start: now,
                from: self.pose(element),
            },
        );
        id
    }

    /// Stop a tween where it is. Returns false if it was not running.
    pub fn kill(&mut self, id: TweenId) -> bool {
        self.tweens.remove(&id).is_some()
    }

    /// Kill every tween on `element` that drives any of `channels`.
    pub fn kill_tweens_of(&mut self, element: ElementId, channels: &[Channel]) -> usize {
        let before = self.tweens.len();
        self.tweens
            .retain(|_, t| !(t.element == element && t.touches_any(channels)));
        before - self.tweens.len()
    }

    pub fn is_active(&self, id: TweenId) -> bool {
        self.tweens.contains_key(&id)
    }

    pub fn active_count(&self) -> usize {
        self.tweens.len()
    }

    pub fn active_on(&self, element: ElementId) -> usize {
        self.tweens.values().filter(|t| t.element == element).count()
    }

    /// Drop all state for an element that left the document.
    pub fn forget(&mut self, element: ElementId) {
        self.tweens.retain(|_, t| t.element != element);
        self.poses.remove(&element);
        self.dirty.remove(&element);
    }

    /// Step every tween to `now`, write changed poses, and report completed tweens.
    pub fn advance(&mut self, surface: &mut dyn Surface, now: Millis) -> Vec<FinishedTween> {
        let Self {
            tweens,
            poses,
            dirty,
            ..
        } = self;

        let mut finished = Vec::new();
        for (id, tween) in tweens.iter_mut() {
            let pose = poses.entry(tween.element).or_default();
            let done = tween.advance(pose, now);
            dirty.insert(tween.element);
            if done {
                finished.push(FinishedTween {
                    id: *id,
                    element: tween.element,
                });
            }
        }
        for f in &finished {
            tweens.remove(&f.id);
        }

        for element in std::mem::take(dirty) {
            if surface.contains(element) {
                surface.set_transform(element, Some(self.pose(element)));
            }
        }
        finished
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/tween.rs"]
mod tests;
