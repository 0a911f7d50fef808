// BeatSyncAnimator - tolerance-window beat cursor driving an animation cycle
//
// Per tick with elapsed time t:
// 1. Beats with t - beat >= tolerance were missed; the cursor skips them
//    silently (no catch-up, no on-beat flag)
// 2. If |t - beats[cursor]| < tolerance the tick is on-beat: the cycle index
//    advances by one (mod cycle length) and the cursor moves past the beat and
//    any exact duplicates of it
// 3. Otherwise nothing changes
//
// The rendered frame is cycle[index % len] whether or not the tick was on-beat.

use crate::config::SyncConfig;
use crate::styles::instruction::NEUTRAL_CYCLE;
use crate::styles::AnimationFrame;

fn non_empty(cycle: &'static [AnimationFrame]) -> &'static [AnimationFrame] {
    if cycle.is_empty() {
        &NEUTRAL_CYCLE
    } else {
        cycle
    }
}

#[derive(Debug, Clone)]
pub struct BeatSyncAnimator {
    beats: Vec<f64>,
    cursor: usize,
    cycle_index: usize,
    tolerance: f64,
    cycle: &'static [AnimationFrame],
}

impl BeatSyncAnimator {
    pub fn new(beats: Vec<f64>, cycle: &'static [AnimationFrame], config: &SyncConfig) -> Self {
        Self {
            beats,
            cursor: 0,
            cycle_index: 0,
            tolerance: config.tolerance_secs,
            cycle: non_empty(cycle),
        }
    }

    /// Advance to `elapsed_secs`; returns true when this tick lands on a beat
    pub fn tick(&mut self, elapsed_secs: f64) -> bool {
        while self
            .beats
            .get(self.cursor)
            .is_some_and(|&beat| elapsed_secs - beat >= self.tolerance)
        {
            self.cursor += 1;
        }

        let Some(&beat) = self.beats.get(self.cursor) else {
            return false;
        };
        if (elapsed_secs - beat).abs() >= self.tolerance {
            return false;
        }

        self.cycle_index = (self.cycle_index + 1) % self.cycle.len();
        while self.beats.get(self.cursor).is_some_and(|&b| b == beat) {
            self.cursor += 1;
        }
        true
    }

    pub fn current_frame(&self) -> AnimationFrame {
        self.cycle[self.cycle_index % self.cycle.len()]
    }

    /// Swap the animation cycle; index and cursor are kept
    pub fn set_cycle(&mut self, cycle: &'static [AnimationFrame]) {
        self.cycle = non_empty(cycle);
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn cycle_index(&self) -> usize {
        self.cycle_index
    }

    pub fn remaining_beats(&self) -> usize {
        self.beats.len().saturating_sub(self.cursor)
    }

    pub fn is_exhausted(&self) -> bool {
        self.cursor >= self.beats.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pose::PoseLabel;
    use crate::styles::InstructionStyle;

    fn animator(beats: &[f64], style: InstructionStyle) -> BeatSyncAnimator {
        BeatSyncAnimator::new(beats.to_vec(), style.animation_cycle(), &SyncConfig::default())
    }

    #[test]
    fn test_tolerance_window_sequence() {
        let mut anim = animator(&[1.0, 2.0, 3.0], InstructionStyle::Pop);
        let hits: Vec<bool> = [0.5, 1.05, 1.3, 2.0]
            .iter()
            .map(|&t| anim.tick(t))
            .collect();

        assert_eq!(hits, vec![false, true, false, true]);
        assert_eq!(anim.cursor(), 2);
        assert_eq!(anim.cycle_index(), 2);
    }

    #[test]
    fn test_each_beat_is_consumed_once() {
        let mut anim = animator(&[1.0, 2.0], InstructionStyle::Pop);
        assert!(anim.tick(0.95));
        assert!(!anim.tick(1.0));
        assert!(!anim.tick(1.1));
        assert_eq!(anim.cursor(), 1);
    }

    #[test]
    fn test_boundary_is_exclusive() {
        let mut anim = animator(&[1.0], InstructionStyle::Pop);
        assert!(!anim.tick(0.75));
        assert_eq!(anim.cursor(), 0);
        assert!(anim.tick(0.85));
    }

    #[test]
    fn test_missed_beats_are_skipped_without_catch_up() {
        let mut anim = animator(&[1.0, 2.0, 3.0], InstructionStyle::Hiphop);
        // first frame arrives long after the first two beats
        assert!(anim.tick(2.9));
        assert_eq!(anim.cursor(), 3);
        assert_eq!(anim.cycle_index(), 1);
        assert!(anim.is_exhausted());
        assert!(!anim.tick(3.0));
    }

    #[test]
    fn test_duplicate_beats_advance_once() {
        let mut anim = animator(&[1.0, 1.0, 2.0], InstructionStyle::Pop);
        assert!(anim.tick(1.0));
        assert!(!anim.tick(1.05));
        assert_eq!(anim.cursor(), 2);
        assert_eq!(anim.cycle_index(), 1);
    }

    #[test]
    fn test_pose_follows_cycle_and_wraps() {
        let beats: Vec<f64> = (1..=5).map(|b| b as f64).collect();
        let mut anim = animator(&beats, InstructionStyle::Bhajan);
        assert_eq!(anim.current_frame().pose, PoseLabel::BhajanFootTapLeft);

        let poses: Vec<PoseLabel> = beats
            .iter()
            .map(|&t| {
                anim.tick(t);
                anim.current_frame().pose
            })
            .collect();
        assert_eq!(
            poses,
            vec![
                PoseLabel::BhajanFootTapRight,
                PoseLabel::BhajanPrayer,
                PoseLabel::BhajanClap,
                PoseLabel::BhajanFootTapLeft,
                PoseLabel::BhajanFootTapRight,
            ]
        );
    }

    #[test]
    fn test_style_switch_keeps_index_and_cursor() {
        let mut anim = animator(&[1.0, 2.0, 3.0], InstructionStyle::Pop);
        anim.tick(1.0);
        anim.tick(2.0);

        anim.set_cycle(InstructionStyle::Bhojpuri.animation_cycle());
        assert_eq!(anim.cursor(), 2);
        assert_eq!(anim.current_frame().pose, PoseLabel::HandUp);
    }

    #[test]
    fn test_empty_schedule_never_hits() {
        let mut anim = animator(&[], InstructionStyle::Pop);
        assert!(!anim.tick(0.0));
        assert_eq!(anim.current_frame().pose, PoseLabel::HandUp);
    }
}
