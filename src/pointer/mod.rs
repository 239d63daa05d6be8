//! Device-gated pointer effects.
//!
//! Every effect attaches its listeners through a [`ListenerRegistry`] in `setup` and detaches
//! all of them in `cleanup`, whether or not `setup` got past its gates. Elements are registered
//! explicitly by the page; setup skips those no longer mounted.
//!
//! [`ListenerRegistry`]: crate::events::listeners::ListenerRegistry

pub(crate) mod click;
pub(crate) mod haptic;
pub(crate) mod magnetic;
pub(crate) mod parallax;

use crate::animation::pool::AnimationPool;
use crate::animation::tween::Animator;
use crate::foundation::core::Millis;
use crate::platform::surface::{InputEvent, Surface};
use crate::schedule::frames::{FrameClient, FrameLoop};

/// Mutable state shared by the effects for one call.
pub struct PointerCtx<'a> {
    pub surface: &'a mut dyn Surface,
    pub frames: &'a mut FrameLoop,
    pub animator: &'a mut Animator,
    pub pool: &'a mut AnimationPool,
    pub now: Millis,
}

/// What an effect needs to know to decide whether to activate.
#[derive(Clone, Copy, Debug)]
pub struct SetupEnv<'a> {
    pub is_desktop: bool,
    pub is_mobile: bool,
    pub route: &'a str,
}

pub trait PointerEffect {
    fn name(&self) -> &'static str;

    /// Attach listeners for the current page. Any previous setup is torn down first, so
    /// repeated calls never accumulate listeners. Returns the number attached.
    fn setup(&mut self, ctx: &mut PointerCtx<'_>, env: SetupEnv<'_>) -> usize;

    /// Detach every listener and kill every pooled tween this effect owns. Idempotent.
    fn cleanup(&mut self, ctx: &mut PointerCtx<'_>);

    /// React to an input event. Returns true if a listener of this effect handled it.
    fn handle(&mut self, ctx: &mut PointerCtx<'_>, event: &InputEvent) -> bool;

    /// Run deferred work requested through the frame loop.
    fn frame(&mut self, _ctx: &mut PointerCtx<'_>, _client: FrameClient) {}

    fn listener_count(&self) -> usize;

    fn is_active(&self) -> bool {
        self.listener_count() > 0
    }
}
