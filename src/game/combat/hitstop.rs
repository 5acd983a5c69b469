use bevy::prelude::*;

use crate::config::tuning::Tuning;

/// Global freeze-frame state.
///
/// An active hitstop pauses the virtual clock, which halts the fixed-step
/// simulation (and with it every gameplay timer, hitstun included) without
/// touching any per-fighter state. The countdown itself runs on real time.
#[derive(Resource, Debug, Default)]
pub struct Hitstop {
    pub remaining: f32,
    pub active: bool,
}

impl Hitstop {
    /// Start (or restart) a freeze. `None` uses the tuned default duration.
    ///
    /// Retriggering overwrites the countdown; durations never accumulate.
    /// A duration that resolves to <= 0 is ignored.
    pub fn trigger(&mut self, time: &mut Time<Virtual>, duration: Option<f32>, tuning: &Tuning) {
        let duration =
            duration.unwrap_or(tuning.hitstop_default).max(0.0) * tuning.hitstop_multiplier;
        if duration <= 0.0 {
            warn!("Hitstop trigger ignored: duration resolved to {duration}");
            return;
        }
        self.remaining = duration;
        self.active = true;
        if !time.is_paused() {
            time.pause();
        }
    }

    /// End an active freeze immediately. Safe to call when idle.
    pub fn cancel(&mut self, time: &mut Time<Virtual>) {
        if self.active {
            time.unpause();
        }
        self.active = false;
        self.remaining = 0.0;
    }
}

/// Update: count an active freeze down on the real clock and release the
/// gameplay clock when it expires. Pause/unpause preserves the virtual
/// clock's relative speed.
pub fn tick_hitstop(
    real_time: Res<Time<Real>>,
    mut hitstop: ResMut<Hitstop>,
    mut virtual_time: ResMut<Time<Virtual>>,
) {
    if !hitstop.active {
        return;
    }
    hitstop.remaining -= real_time.delta_secs();
    if hitstop.remaining <= 0.0 {
        hitstop.remaining = 0.0;
        hitstop.active = false;
        virtual_time.unpause();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clock() -> Time<Virtual> {
        Time::<Virtual>::default()
    }

    #[test]
    fn trigger_pauses_and_arms_countdown() {
        let tuning = Tuning::default();
        let mut time = clock();
        let mut hitstop = Hitstop::default();

        hitstop.trigger(&mut time, Some(0.08), &tuning);
        assert!(hitstop.active);
        assert_eq!(hitstop.remaining, 0.08);
        assert!(time.is_paused());
    }

    #[test]
    fn trigger_without_duration_uses_default_and_multiplier() {
        let tuning = Tuning {
            hitstop_default: 0.05,
            hitstop_multiplier: 2.0,
            ..Tuning::default()
        };
        let mut time = clock();
        let mut hitstop = Hitstop::default();

        hitstop.trigger(&mut time, None, &tuning);
        assert_eq!(hitstop.remaining, 0.1);
    }

    #[test]
    fn non_positive_duration_is_a_no_op() {
        let tuning = Tuning::default();
        let mut time = clock();
        let mut hitstop = Hitstop::default();

        hitstop.trigger(&mut time, Some(0.0), &tuning);
        assert!(!hitstop.active);
        assert!(!time.is_paused());

        hitstop.trigger(&mut time, Some(-1.0), &tuning);
        assert!(!hitstop.active);
        assert!(!time.is_paused());
    }

    #[test]
    fn retrigger_overwrites_instead_of_stacking() {
        let tuning = Tuning::default();
        let mut time = clock();
        let mut hitstop = Hitstop::default();

        hitstop.trigger(&mut time, Some(0.05), &tuning);
        hitstop.trigger(&mut time, Some(0.03), &tuning);
        assert_eq!(hitstop.remaining, 0.03);
        assert!(time.is_paused());
    }

    #[test]
    fn cancel_is_idempotent() {
        let tuning = Tuning::default();
        let mut time = clock();
        let mut hitstop = Hitstop::default();

        hitstop.trigger(&mut time, Some(0.05), &tuning);
        hitstop.cancel(&mut time);
        assert!(!hitstop.active);
        assert_eq!(hitstop.remaining, 0.0);
        assert!(!time.is_paused());

        hitstop.cancel(&mut time);
        assert!(!hitstop.active);
        assert!(!time.is_paused());
    }
}
