use crate::config::MotionConfig;
use crate::events::bus::TransitionSignal;
use crate::foundation::core::Millis;
use crate::platform::surface::InputEvent;
use crate::pointer::click::ClickPulse;
use crate::pointer::haptic::HapticFeedback;
use crate::pointer::magnetic::MagneticHover;
use crate::pointer::parallax::Parallax;
use crate::pointer::{PointerCtx, PointerEffect, SetupEnv};
use crate::schedule::frames::FrameClient;
use crate::scroll::EngineState;
use crate::transition::machine::TransitionPhase;

/// Deferred runtime work.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum RuntimeTimer {
    /// Rebuild the scroll driver. The first attempt destroys the old one; a failed first
    /// attempt schedules exactly one retry.
    ScrollInit { retry: bool },
    /// Ask the scroll driver to refresh again after it deferred.
    ScrollRefresh,
    PointerSetup,
}

/// Every pointer effect the runtime owns.
#[derive(Debug)]
pub struct PointerEffects {
    pub magnetic: MagneticHover,
    pub click: ClickPulse,
    pub parallax: Parallax,
    pub haptic: HapticFeedback,
}

impl PointerEffects {
    pub fn new(config: &MotionConfig) -> Self {
        Self {
            magnetic: MagneticHover::new(config.magnetic.clone()),
            click: ClickPulse::new(config.click.clone()),
            parallax: Parallax::new(config.parallax.clone()),
            haptic: HapticFeedback::new(config.haptic.clone()),
        }
    }

    fn all(&mut self) -> [&mut dyn PointerEffect; 4] {
        [
            &mut self.magnetic,
            &mut self.click,
            &mut self.parallax,
            &mut self.haptic,
        ]
    }

    pub(crate) fn setup_all(&mut self, ctx: &mut PointerCtx<'_>, env: SetupEnv<'_>) -> usize {
        self.all()
            .into_iter()
            .map(|effect| {
                let n = effect.setup(ctx, env);
                tracing::debug!(effect = effect.name(), listeners = n, "pointer effect set up");
                n
            })
            .sum()
    }

    pub(crate) fn cleanup_all(&mut self, ctx: &mut PointerCtx<'_>) {
        for effect in self.all() {
            effect.cleanup(ctx);
        }
    }

    /// Returns how many effects handled the event.
    pub(crate) fn handle(&mut self, ctx: &mut PointerCtx<'_>, event: &InputEvent) -> usize {
        let mut handled = 0;
        for effect in self.all() {
            if effect.handle(ctx, event) {
                handled += 1;
            }
        }
        handled
    }

    pub(crate) fn frame(&mut self, ctx: &mut PointerCtx<'_>, client: FrameClient) {
        for effect in self.all() {
            effect.frame(ctx, client);
        }
    }

    pub fn listener_count(&self) -> usize {
        self.magnetic.listener_count()
            + self.click.listener_count()
            + self.parallax.listener_count()
            + self.haptic.listener_count()
    }
}

/// What happened during one [`MotionRuntime::frame`](crate::MotionRuntime::frame).
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct FrameReport {
    pub time: Millis,
    pub phase: TransitionPhase,
    pub route: String,
    pub signals: Vec<TransitionSignal>,
    pub scroll: EngineState,
    pub rendered_position: f64,
    pub tasks_run: usize,
    pub tweens_finished: usize,
    pub listeners: usize,
}
