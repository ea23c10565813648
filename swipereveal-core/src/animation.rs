//! Cooperative tween scheduler for a single animated value.
//!
//! An [`Animator`] never sleeps or spawns. The host loop calls
//! [`Animator::tick`] once per frame with the current instant; the clock of a
//! tween starts at the first tick after [`Animator::animate_to`], so a value
//! animation behaves the same whether the host ticks at 16ms or 100ms.
//!
//! Starting a new animation cancels the one in flight. The cancelled
//! animation never reports completion.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::trace;

/// Interpolation curve applied to normalized animation progress
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    Linear,
    #[default]
    EaseOutCubic,
    EaseInOutCubic,
}

impl Easing {
    /// Map progress `t` in `[0, 1]` onto the curve. Output stays in `[0, 1]`.
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseOutCubic => 1.0 - (1.0 - t).powi(3),
            Easing::EaseInOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
        }
    }
}

/// Duration and curve of a transition
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnimationSpec {
    pub duration: Duration,
    pub easing: Easing,
}

impl AnimationSpec {
    pub fn new(duration: Duration, easing: Easing) -> Self {
        Self { duration, easing }
    }

    /// Zero-length transition, completes on the next tick
    pub fn immediate() -> Self {
        Self {
            duration: Duration::ZERO,
            easing: Easing::Linear,
        }
    }
}

impl Default for AnimationSpec {
    fn default() -> Self {
        Self {
            duration: Duration::from_millis(300),
            easing: Easing::EaseOutCubic,
        }
    }
}

/// Completion signal handed out by [`Animator::animate_to`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct AnimationId(u64);

#[derive(Debug)]
struct Tween {
    id: AnimationId,
    from: f32,
    to: f32,
    spec: AnimationSpec,
    started: Option<Instant>,
}

/// One animated `f32`
#[derive(Debug)]
pub struct Animator {
    value: f32,
    tween: Option<Tween>,
    next_id: u64,
}

impl Animator {
    pub fn new(initial: f32) -> Self {
        Self {
            value: initial,
            tween: None,
            next_id: 0,
        }
    }

    /// Current value (as of the last tick or snap)
    pub fn value(&self) -> f32 {
        self.value
    }

    /// Target of the running animation, if any
    pub fn target(&self) -> Option<f32> {
        self.tween.as_ref().map(|t| t.to)
    }

    pub fn is_running(&self) -> bool {
        self.tween.is_some()
    }

    /// Id of the running animation, if any
    pub fn running(&self) -> Option<AnimationId> {
        self.tween.as_ref().map(|t| t.id)
    }

    /// Start animating from the current value to `target`.
    ///
    /// Cancels any in-flight animation. The returned id is reported by
    /// [`tick`](Self::tick) once the value has reached `target`.
    pub fn animate_to(&mut self, target: f32, spec: AnimationSpec) -> AnimationId {
        self.cancel();
        let id = AnimationId(self.next_id);
        self.next_id += 1;
        trace!(from = self.value, to = target, ?spec, "animation started");
        self.tween = Some(Tween {
            id,
            from: self.value,
            to: target,
            spec,
            started: None,
        });
        id
    }

    /// Jump to `value` without animating. Cancels any in-flight animation.
    pub fn snap_to(&mut self, value: f32) {
        self.cancel();
        self.value = value;
    }

    /// Stop the running animation where it is. Returns the cancelled id.
    pub fn cancel(&mut self) -> Option<AnimationId> {
        let tween = self.tween.take()?;
        trace!(at = self.value, to = tween.to, "animation cancelled");
        Some(tween.id)
    }

    /// Advance to `now`. Returns the id of the animation that completed on
    /// this tick, if one did.
    pub fn tick(&mut self, now: Instant) -> Option<AnimationId> {
        let tween = self.tween.as_mut()?;
        let started = *tween.started.get_or_insert(now);
        let elapsed = now.saturating_duration_since(started);

        if elapsed >= tween.spec.duration {
            self.value = tween.to;
            let id = tween.id;
            self.tween = None;
            return Some(id);
        }

        let progress = elapsed.as_secs_f32() / tween.spec.duration.as_secs_f32();
        self.value = tween.from + (tween.to - tween.from) * tween.spec.easing.apply(progress);
        None
    }
}

impl Default for Animator {
    fn default() -> Self {
        Self::new(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_easing_endpoints() {
        for easing in [Easing::Linear, Easing::EaseOutCubic, Easing::EaseInOutCubic] {
            assert_eq!(easing.apply(0.0), 0.0);
            assert_eq!(easing.apply(1.0), 1.0);
            assert_eq!(easing.apply(-3.0), 0.0);
            assert_eq!(easing.apply(7.0), 1.0);
        }
    }

    #[test]
    fn test_easing_is_monotonic() {
        for easing in [Easing::Linear, Easing::EaseOutCubic, Easing::EaseInOutCubic] {
            let mut last = 0.0;
            for step in 0..=100 {
                let v = easing.apply(step as f32 / 100.0);
                assert!(v >= last, "{:?} not monotonic at step {}", easing, step);
                last = v;
            }
        }
    }

    #[test]
    fn test_animation_reaches_target_exactly() {
        let mut anim = Animator::new(0.0);
        let id = anim.animate_to(100.0, AnimationSpec::new(ms(200), Easing::EaseOutCubic));
        let t0 = Instant::now();

        assert_eq!(anim.tick(t0), None);
        assert_eq!(anim.value(), 0.0);

        assert_eq!(anim.tick(t0 + ms(100)), None);
        assert!(anim.value() > 50.0 && anim.value() < 100.0);

        assert_eq!(anim.tick(t0 + ms(200)), Some(id));
        assert_eq!(anim.value(), 100.0);
        assert!(!anim.is_running());

        // Nothing left to report
        assert_eq!(anim.tick(t0 + ms(300)), None);
    }

    #[test]
    fn test_zero_duration_completes_on_first_tick() {
        let mut anim = Animator::new(10.0);
        let id = anim.animate_to(0.0, AnimationSpec::immediate());
        assert_eq!(anim.tick(Instant::now()), Some(id));
        assert_eq!(anim.value(), 0.0);
    }

    #[test]
    fn test_new_animation_supersedes_running_one() {
        let mut anim = Animator::new(0.0);
        let spec = AnimationSpec::new(ms(100), Easing::Linear);
        let first = anim.animate_to(100.0, spec);
        let t0 = Instant::now();
        anim.tick(t0);
        anim.tick(t0 + ms(50));
        let midway = anim.value();
        assert!((midway - 50.0).abs() < 1e-3);

        let second = anim.animate_to(0.0, spec);
        assert_ne!(first, second);
        assert_eq!(anim.target(), Some(0.0));

        // Second animation starts from where the first one stopped
        anim.tick(t0 + ms(60));
        assert_eq!(anim.value(), midway);
        assert_eq!(anim.tick(t0 + ms(160)), Some(second));
        assert_eq!(anim.value(), 0.0);
    }

    #[test]
    fn test_snap_cancels() {
        let mut anim = Animator::new(0.0);
        anim.animate_to(100.0, AnimationSpec::default());
        anim.snap_to(42.0);
        assert!(!anim.is_running());
        assert_eq!(anim.value(), 42.0);
        assert_eq!(anim.tick(Instant::now()), None);
    }

    #[test]
    fn test_cancel_reports_id_once() {
        let mut anim = Animator::new(0.0);
        let id = anim.animate_to(5.0, AnimationSpec::default());
        assert_eq!(anim.running(), Some(id));
        assert_eq!(anim.cancel(), Some(id));
        assert_eq!(anim.cancel(), None);
    }
}
