//! The owned motion context.
//!
//! [`MotionRuntime`] is the single owner of the scroll driver, the transition machine, the
//! pointer effects and the scheduling primitives, so "one active transition" and "one scroll
//! loop" hold by construction. The host drives it with three calls: [`MotionRuntime::navigate`]
//! on route changes, [`MotionRuntime::handle_event`] for input, and [`MotionRuntime::frame`]
//! once per display refresh.

pub(crate) mod context;

use crate::animation::pool::AnimationPool;
use crate::animation::tween::Animator;
use crate::config::{MotionConfig, ScrollMode};
use crate::device::detector::{CapabilityDetector, DeviceProfile};
use crate::device::theme::ColorScheme;
use crate::events::bus::{EventBus, Subscription, TransitionSignal};
use crate::foundation::core::{ElementId, Millis};
use crate::foundation::error::MotionResult;
use crate::platform::surface::{EventKind, InputEvent, Surface};
use crate::pointer::haptic::HapticKind;
use crate::pointer::parallax::ParallaxLayer;
use crate::pointer::{PointerCtx, PointerEffect, SetupEnv};
use crate::schedule::frames::{FrameClient, FrameLoop};
use crate::schedule::observer::{IntersectionEntry, ObserverOptions, OptimizedObserver};
use crate::schedule::tasks::{Priority, TaskHandle, TaskScheduler};
use crate::schedule::timers::TimerQueue;
use crate::schedule::timing::{Debounced, debounce};
use crate::scroll::engine::SmoothScroll;
use crate::scroll::triggered::TriggeredScroll;
use crate::scroll::{RefreshOutcome, ScrollDriver};
use crate::transition::machine::{Navigator, PageTransition, RequestOutcome, TransitionPhase};

pub use context::{FrameReport, PointerEffects};
use context::RuntimeTimer;

fn recheck(_: ()) {}

pub struct MotionRuntime<S: Surface, N: Navigator> {
    config: MotionConfig,
    surface: S,
    navigator: N,
    detector: CapabilityDetector,
    scheduler: TaskScheduler,
    frames: FrameLoop,
    timers: TimerQueue<RuntimeTimer>,
    bus: EventBus<TransitionSignal>,
    scroll_signals: Subscription<TransitionSignal>,
    pointer_signals: Subscription<TransitionSignal>,
    theme_signals: Subscription<TransitionSignal>,
    scroll: Box<dyn ScrollDriver>,
    animator: Animator,
    pool: AnimationPool,
    effects: PointerEffects,
    transition: PageTransition,
    observers: Vec<OptimizedObserver>,
    device_recheck: Debounced<(), fn(())>,
    last_desktop: Option<bool>,
    mounted: bool,
}

impl<S: Surface, N: Navigator> MotionRuntime<S, N> {
    /// Build a runtime for a page currently showing `route`. Fails only on invalid config.
    pub fn new(
        config: MotionConfig,
        surface: S,
        navigator: N,
        route: impl Into<String>,
    ) -> MotionResult<Self> {
        config.validate()?;

        let bus = EventBus::new();
        let scroll: Box<dyn ScrollDriver> = match config.scroll.mode {
            ScrollMode::Lerp => Box::new(SmoothScroll::new(config.scroll.clone())),
            ScrollMode::Triggered => Box::new(TriggeredScroll::new(config.scroll.clone())),
        };
        Ok(Self {
            detector: CapabilityDetector::new(config.device.clone()),
            scheduler: TaskScheduler::new(config.scheduler.batch_size),
            frames: FrameLoop::new(),
            timers: TimerQueue::new(),
            scroll_signals: bus.subscribe("smooth-scroll"),
            pointer_signals: bus.subscribe("pointer-effects"),
            theme_signals: bus.subscribe("color-scheme"),
            transition: PageTransition::new(config.transition.clone(), bus.clone(), route),
            bus,
            scroll,
            animator: Animator::new(),
            pool: AnimationPool::new(),
            effects: PointerEffects::new(&config),
            observers: Vec::new(),
            device_recheck: debounce(recheck as fn(()), config.device.recheck_debounce_ms),
            last_desktop: None,
            mounted: false,
            config,
            surface,
            navigator,
        })
    }

    /// Start the layer on the current page: schedule the first scroll init and install the
    /// pointer effects. A second call is a no-op.
    pub fn mount(&mut self, now: Millis) {
        if self.mounted {
            return;
        }
        self.mounted = true;
        self.apply_color_scheme();
        self.timers.set_timeout(
            now,
            self.config.scroll.init_delay_ms,
            RuntimeTimer::ScrollInit { retry: false },
        );
        self.setup_pointer(now);
        tracing::debug!(route = self.transition.route(), "motion runtime mounted");
    }

    /// Route change from the routing layer.
    pub fn navigate(&mut self, to: &str, now: Millis) -> RequestOutcome {
        self.transition
            .request(to, &mut self.surface, &mut self.frames, now)
    }

    /// Deliver an input event. Returns how many effects handled it.
    pub fn handle_event(&mut self, event: &InputEvent) -> usize {
        if event.kind == EventKind::Resize {
            self.device_recheck.call(event.time, ());
        }
        let mut ctx = PointerCtx {
            surface: &mut self.surface,
            frames: &mut self.frames,
            animator: &mut self.animator,
            pool: &mut self.pool,
            now: event.time,
        };
        self.effects.handle(&mut ctx, event)
    }

    /// One display refresh.
    pub fn frame(&mut self, now: Millis) -> FrameReport {
        for timer in self.timers.due(now) {
            self.run_timer(timer, now);
        }
        self.transition.advance(
            &mut self.surface,
            &mut self.frames,
            &mut self.navigator,
            now,
        );
        let signals = self.dispatch_signals(now);

        if self.device_recheck.flush(now) {
            self.recheck_desktop(now);
        }

        for client in self.frames.begin_frame() {
            match client {
                FrameClient::Scroll => self.scroll.frame(&mut self.surface, now),
                FrameClient::TransitionNudge => {
                    self.transition
                        .frame(&mut self.surface, &mut self.frames, now)
                }
                FrameClient::Parallax | FrameClient::PointerGeometry => {
                    let mut ctx = PointerCtx {
                        surface: &mut self.surface,
                        frames: &mut self.frames,
                        animator: &mut self.animator,
                        pool: &mut self.pool,
                        now,
                    };
                    self.effects.frame(&mut ctx, client);
                }
            }
        }

        let finished = self.animator.advance(&mut self.surface, now);
        self.pool.retire(&finished);

        for observer in &self.observers {
            observer.check(&self.surface, now);
        }
        let tasks_run = self.scheduler.run_frame();

        FrameReport {
            time: now,
            phase: self.transition.phase(),
            route: self.transition.route().to_string(),
            signals,
            scroll: self.scroll.state(),
            rendered_position: self.scroll.rendered_position(),
            tasks_run,
            tweens_finished: finished.len(),
            listeners: self.effects.listener_count(),
        }
    }

    /// Tear everything down: scroll loop, pointer effects, pending tasks, timers, observers and
    /// any in-flight transition. Idempotent; `mount` may be called again afterwards.
    pub fn shutdown(&mut self) {
        self.transition.abort(&mut self.surface, &mut self.frames);
        self.scroll.destroy(&mut self.surface, &mut self.frames);
        self.cleanup_pointer(Millis::default());
        self.pool.clear(&mut self.animator);
        self.scheduler.cleanup();
        self.timers.clear_all();
        for observer in self.observers.drain(..) {
            observer.disconnect();
        }
        self.frames.clear();
        self.device_recheck.cancel();
        for sub in [
            &self.scroll_signals,
            &self.pointer_signals,
            &self.theme_signals,
        ] {
            sub.drain();
        }
        self.mounted = false;
        tracing::debug!("motion runtime shut down");
    }

    pub fn register_magnetic(&mut self, element: ElementId) {
        self.effects.magnetic.register(element);
    }

    pub fn register_click(&mut self, element: ElementId) {
        self.effects.click.register(element);
    }

    /// Magnetic hover plus click pulse, the usual pairing for gallery cards.
    pub fn register_interactive(&mut self, element: ElementId) {
        self.register_magnetic(element);
        self.register_click(element);
    }

    pub fn register_parallax(&mut self, element: ElementId, layer: ParallaxLayer) {
        self.effects.parallax.register(element, layer);
    }

    pub fn register_haptic(&mut self, element: ElementId, kind: HapticKind) {
        self.effects.haptic.register(element, kind);
    }

    pub fn apply_inverse_parallax(&mut self, elements: &[ElementId], speed: f64) {
        self.scroll.apply_inverse_parallax(elements, speed);
    }

    pub fn scroll_to(&mut self, y: f64, now: Millis) {
        self.scroll.scroll_to(&mut self.surface, y, now);
    }

    /// Defer work to a later frame; see [`TaskScheduler::schedule`].
    pub fn schedule<T, F>(&self, task: F, priority: Priority) -> TaskHandle<T>
    where
        T: 'static,
        F: FnOnce() -> anyhow::Result<T> + 'static,
    {
        self.scheduler.schedule(task, priority)
    }

    /// Create an intersection observer checked once per frame. Callbacks run as high-priority
    /// tasks. Disconnected on shutdown.
    pub fn create_observer(
        &mut self,
        options: ObserverOptions,
        callback: impl FnMut(&IntersectionEntry) + 'static,
    ) -> OptimizedObserver {
        let observer = OptimizedObserver::new(self.scheduler.clone(), options, callback);
        self.observers.push(observer.clone());
        observer
    }

    pub fn device_profile(&mut self, now: Millis) -> DeviceProfile {
        self.detector.profile(&self.surface, now)
    }

    pub fn config(&self) -> &MotionConfig {
        &self.config
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn navigator(&self) -> &N {
        &self.navigator
    }

    pub fn bus(&self) -> &EventBus<TransitionSignal> {
        &self.bus
    }

    pub fn phase(&self) -> TransitionPhase {
        self.transition.phase()
    }

    pub fn route(&self) -> &str {
        self.transition.route()
    }

    pub fn transition(&self) -> &PageTransition {
        &self.transition
    }

    pub fn scroll(&self) -> &dyn ScrollDriver {
        self.scroll.as_ref()
    }

    pub fn effects(&self) -> &PointerEffects {
        &self.effects
    }

    pub fn pool(&self) -> &AnimationPool {
        &self.pool
    }

    pub fn animator(&self) -> &Animator {
        &self.animator
    }

    pub fn frames(&self) -> &FrameLoop {
        &self.frames
    }

    pub fn scheduler(&self) -> &TaskScheduler {
        &self.scheduler
    }

    /// Earliest pending timer deadline, for hosts that sleep between frames.
    pub fn next_deadline(&self) -> Option<Millis> {
        [self.timers.next_deadline(), self.transition.next_deadline()]
            .into_iter()
            .flatten()
            .min()
    }

    fn run_timer(&mut self, timer: RuntimeTimer, now: Millis) {
        match timer {
            RuntimeTimer::ScrollInit { retry } => {
                if !retry {
                    self.scroll.destroy(&mut self.surface, &mut self.frames);
                }
                if self.scroll.init(&mut self.surface, &mut self.frames, now) {
                    // Navigated before the mount init fired: `Started` found nothing to pause.
                    if matches!(
                        self.transition.phase(),
                        TransitionPhase::Entering
                            | TransitionPhase::Holding
                            | TransitionPhase::Navigating
                    ) {
                        self.scroll.pause(&mut self.frames);
                    }
                    self.refresh_scroll(now);
                    return;
                }
                if retry {
                    tracing::warn!("smooth scroll init failed after retry");
                } else {
                    self.timers.set_timeout(
                        now,
                        self.config.scroll.init_retry_ms,
                        RuntimeTimer::ScrollInit { retry: true },
                    );
                }
            }
            RuntimeTimer::ScrollRefresh => self.refresh_scroll(now),
            // A queued route may already have started the next transition.
            RuntimeTimer::PointerSetup if self.transition.phase() == TransitionPhase::Idle => {
                self.setup_pointer(now)
            }
            RuntimeTimer::PointerSetup => {}
        }
    }

    fn refresh_scroll(&mut self, now: Millis) {
        if let RefreshOutcome::Deferred { retry_after_ms } =
            self.scroll.refresh(&mut self.surface, now)
        {
            self.timers
                .set_timeout(now, retry_after_ms, RuntimeTimer::ScrollRefresh);
        }
    }

    fn dispatch_signals(&mut self, now: Millis) -> Vec<TransitionSignal> {
        let signals = self.scroll_signals.drain();
        for signal in &signals {
            match signal {
                TransitionSignal::Started => self.scroll.pause(&mut self.frames),
                TransitionSignal::AlmostComplete => {
                    self.timers.set_timeout(
                        now,
                        self.config.scroll.init_delay_ms,
                        RuntimeTimer::ScrollInit { retry: false },
                    );
                }
                TransitionSignal::Complete => {
                    self.scroll.resume(&mut self.frames);
                    self.refresh_scroll(now);
                }
            }
        }

        for signal in self.pointer_signals.drain() {
            match signal {
                TransitionSignal::Started => self.cleanup_pointer(now),
                TransitionSignal::AlmostComplete => self.detector.clear_cache(),
                TransitionSignal::Complete => {
                    self.timers.set_timeout(now, 0, RuntimeTimer::PointerSetup);
                }
            }
        }

        for signal in self.theme_signals.drain() {
            if signal == TransitionSignal::AlmostComplete {
                self.apply_color_scheme();
            }
        }
        signals
    }

    fn apply_color_scheme(&mut self) {
        let scheme =
            ColorScheme::for_route(self.transition.route(), &self.config.theme.dark_routes);
        self.surface.set_color_scheme(scheme);
    }

    fn setup_pointer(&mut self, now: Millis) {
        let profile = self.detector.profile(&self.surface, now);
        self.last_desktop = Some(profile.is_desktop);
        let env = SetupEnv {
            is_desktop: profile.is_desktop,
            is_mobile: profile.is_mobile,
            route: self.transition.route(),
        };
        let mut ctx = PointerCtx {
            surface: &mut self.surface,
            frames: &mut self.frames,
            animator: &mut self.animator,
            pool: &mut self.pool,
            now,
        };
        let attached = self.effects.setup_all(&mut ctx, env);
        tracing::debug!(attached, ?profile, "pointer effects installed");
    }

    fn cleanup_pointer(&mut self, now: Millis) {
        let mut ctx = PointerCtx {
            surface: &mut self.surface,
            frames: &mut self.frames,
            animator: &mut self.animator,
            pool: &mut self.pool,
            now,
        };
        self.effects.cleanup_all(&mut ctx);
    }

    fn recheck_desktop(&mut self, now: Millis) {
        // The cached answer predates the resize.
        self.detector.clear_cache();
        let is_desktop = self.detector.is_desktop(&self.surface, now);
        if self.last_desktop == Some(is_desktop) {
            return;
        }
        self.last_desktop = Some(is_desktop);
        tracing::debug!(is_desktop, "device class changed");

        let profile = self.detector.profile(&self.surface, now);
        let env = SetupEnv {
            is_desktop: profile.is_desktop,
            is_mobile: profile.is_mobile,
            route: self.transition.route(),
        };
        let mut ctx = PointerCtx {
            surface: &mut self.surface,
            frames: &mut self.frames,
            animator: &mut self.animator,
            pool: &mut self.pool,
            now,
        };
        if is_desktop {
            self.effects.magnetic.setup(&mut ctx, env);
        } else {
            self.effects.magnetic.cleanup(&mut ctx);
        }
    }
}
