//! Vernissage is the motion layer of a gallery site, modelled as a host-driven state machine.
//!
//! The host owns the real document and the clock. It hands both to a [`MotionRuntime`] and
//! calls three entry points:
//!
//! 1. **Navigate**: [`MotionRuntime::navigate`] starts (or queues) a wave page transition.
//! 2. **Input**: [`MotionRuntime::handle_event`] dispatches pointer, touch and window events
//!    to the registered effects.
//! 3. **Frame**: [`MotionRuntime::frame`] fires due timers, advances the transition, steps the
//!    scroll engine and tweens, and drains the prioritised task queue.
//!
//! Everything below the runtime is usable on its own: the [`TaskScheduler`], the [`EventBus`],
//! the [`SmoothScroll`] engine, the pointer effects and the [`PageTransition`] machine all take
//! time as an explicit [`Millis`] argument and talk to the page only through [`Surface`].
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic**: the same event and frame sequence yields the same writes.
//! - **Headless-testable**: [`HeadlessDocument`] records every write a host would perform.
#![forbid(unsafe_code)]

mod animation;
mod config;
mod device;
mod events;
mod foundation;
mod platform;
mod pointer;
mod runtime;
mod schedule;
mod scroll;
mod transition;

pub use animation::ease::Ease;
pub use animation::pool::AnimationPool;
pub use animation::tween::{Animator, Channel, FinishedTween, TweenId, TweenStep, TweenTarget};
pub use config::{
    ClickConfig, DeviceConfig, DeviceGate, Elasticity, HapticConfig, MagneticConfig,
    MotionConfig, ParallaxConfig, SchedulerConfig, ScrollConfig, ScrollMode, ThemeConfig,
    TransitionConfig, Vec2Divisor,
};
pub use device::detector::{CapabilityDetector, DeviceInfo, DeviceProfile};
pub use device::theme::ColorScheme;
pub use events::bus::{EventBus, Subscription, TransitionSignal};
pub use events::listeners::ListenerRegistry;
pub use foundation::core::{BezPath, ElementId, Millis, Point, Rect, Size, Transform, Vec2};
pub use foundation::error::{MotionError, MotionResult};
pub use foundation::math::lerp;
pub use platform::headless::HeadlessDocument;
pub use platform::surface::{
    ClassTarget, EventKind, EventTarget, InputEvent, ListenerId, ListenerOptions, Surface,
};
pub use pointer::click::ClickPulse;
pub use pointer::haptic::{HapticFeedback, HapticKind};
pub use pointer::magnetic::MagneticHover;
pub use pointer::parallax::{Parallax, ParallaxLayer, ParallaxOffsets, offsets as parallax_offsets};
pub use pointer::{PointerCtx, PointerEffect, SetupEnv};
pub use runtime::{FrameReport, MotionRuntime, PointerEffects};
pub use schedule::frames::{FrameClient, FrameHandle, FrameLoop};
pub use schedule::observer::{IntersectionEntry, ObserverOptions, OptimizedObserver};
pub use schedule::tasks::{Priority, TaskHandle, TaskScheduler};
pub use schedule::timers::{TimerId, TimerQueue};
pub use schedule::timing::{Debounced, Throttle, Throttled, debounce, throttle};
pub use scroll::engine::SmoothScroll;
pub use scroll::state::{
    JITTER_THRESHOLD, POSITION_EPSILON, SETTLE_FACTOR, SKEW_EPSILON, ScrollFrame, ScrollState,
};
pub use scroll::triggered::TriggeredScroll;
pub use scroll::{EngineState, RefreshOutcome, ScrollDriver};
pub use transition::machine::{
    BODY_CLASS, Navigator, PageTransition, ROOT_CLASS, RequestOutcome, TransitionPhase,
};
pub use transition::overlay::{
    CONTAINER_CLASS, ENTER_CLASS, LEAVE_CLASS, SHAPE_CLASS, WaveOverlay, wave_path,
};
