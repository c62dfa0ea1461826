//! Transient decorative nodes and the tier policy that bounds them.

use std::collections::VecDeque;

use serde::Deserialize;

use crate::effects::Effect;
use crate::profile::{DeviceProfile, Tier};

/// Upper bound on live decorative nodes per tier.
pub const fn tier_ceiling(tier: Tier) -> usize {
    match tier {
        Tier::Desktop => 30,
        Tier::Tablet => 15,
        Tier::Mobile => 5,
    }
}

/// Animation duration, in seconds, applied to live nodes after a resize.
pub const fn tier_duration_s(tier: Tier) -> f64 {
    match tier {
        Tier::Desktop => 4.0,
        Tier::Tablet => 6.0,
        Tier::Mobile => 8.0,
    }
}

const SLOWEST_TIER_DURATION_S: f64 = tier_duration_s(Tier::Mobile);

/// Extra time a node stays mounted after its longest possible cycle.
pub const LIFETIME_MARGIN_MS: u32 = 500;

/// Cadence and animation envelope of a recurring spawner.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SpawnSpec {
    pub interval_ms: u32,
    pub ttl_ms: u32,
    pub base_duration_s: f64,
    pub duration_jitter_s: f64,
    pub max_delay_s: f64,
}

impl Default for SpawnSpec {
    fn default() -> Self {
        Self {
            interval_ms: 500,
            ttl_ms: 12_000,
            base_duration_s: 8.0,
            duration_jitter_s: 4.0,
            max_delay_s: 0.0,
        }
    }
}

impl SpawnSpec {
    pub const fn new(
        interval_ms: u32,
        ttl_ms: u32,
        base_duration_s: f64,
        duration_jitter_s: f64,
        max_delay_s: f64,
    ) -> Self {
        Self {
            interval_ms,
            ttl_ms,
            base_duration_s,
            duration_jitter_s,
            max_delay_s,
        }
    }

    /// Longest cycle a node can run, including a later tier rewrite.
    pub fn cycle_ceiling_ms(&self) -> u32 {
        let longest = (self.base_duration_s + self.duration_jitter_s).max(SLOWEST_TIER_DURATION_S);
        ((self.max_delay_s + longest) * 1000.0).ceil() as u32
    }

    /// How long a spawned node stays mounted. Always past one full cycle.
    pub fn lifetime_ms(&self) -> u32 {
        self.ttl_ms
            .max(self.cycle_ceiling_ms().saturating_add(LIFETIME_MARGIN_MS))
    }

    /// Maps two unit samples onto `(delay_s, duration_s)`.
    pub fn sample_timing(&self, delay_unit: f64, duration_unit: f64) -> (f64, f64) {
        (
            delay_unit * self.max_delay_s,
            self.base_duration_s + duration_unit * self.duration_jitter_s,
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DecorRecord<N> {
    pub seq: u64,
    pub effect: Effect,
    pub node: N,
}

impl<N> DecorRecord<N> {
    /// Registry key of this node's expiry timer.
    pub fn timer_key(&self) -> String {
        expiry_key(self.effect, self.seq)
    }
}

pub fn expiry_key(effect: Effect, seq: u64) -> String {
    format!("{}#{}", effect.name(), seq)
}

/// Spawn-ordered set of live decorative nodes.
#[derive(Debug)]
pub struct DecorField<N> {
    records: VecDeque<DecorRecord<N>>,
    next_seq: u64,
}

impl<N> Default for DecorField<N> {
    fn default() -> Self {
        Self {
            records: VecDeque::new(),
            next_seq: 0,
        }
    }
}

impl<N> DecorField<N> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, effect: Effect, node: N) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.records.push_back(DecorRecord { seq, effect, node });
        seq
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DecorRecord<N>> {
        self.records.iter()
    }

    pub fn remove(&mut self, seq: u64) -> Option<DecorRecord<N>> {
        // Sequence numbers are sorted, so a binary search finds the slot.
        let idx = self
            .records
            .binary_search_by_key(&seq, |r| r.seq)
            .ok()?;
        self.records.remove(idx)
    }

    /// Removes oldest records until at most `cap` remain.
    pub fn trim_to(&mut self, cap: usize) -> Vec<DecorRecord<N>> {
        let excess = self.records.len().saturating_sub(cap);
        self.records.drain(..excess).collect()
    }

    pub fn drain_effect(&mut self, effect: Effect) -> Vec<DecorRecord<N>> {
        let (gone, kept): (VecDeque<_>, VecDeque<_>) = std::mem::take(&mut self.records)
            .into_iter()
            .partition(|r| r.effect == effect);
        self.records = kept;
        gone.into()
    }

    pub fn drain_all(&mut self) -> Vec<DecorRecord<N>> {
        self.records.drain(..).collect()
    }

    /// Applies a new profile to the field and reports what the host must undo.
    ///
    /// Trims to the tier ceiling oldest-first; on mobile also takes out every
    /// matrix column.
    pub fn plan_resize(&mut self, profile: DeviceProfile, matrix_running: bool) -> ResizePlan<N> {
        let tier = profile.tier();
        let mut removed = self.trim_to(tier_ceiling(tier));
        if profile.is_mobile {
            removed.extend(self.drain_effect(Effect::MatrixRain));
            removed.sort_by_key(|r| r.seq);
        }
        ResizePlan {
            removed,
            stop_matrix: profile.is_mobile && matrix_running,
            duration: format!("{}s", tier_duration_s(tier)),
        }
    }
}

/// Outcome of [`DecorField::plan_resize`].
#[derive(Debug)]
pub struct ResizePlan<N> {
    /// Records no longer in the field, oldest first. Their nodes and expiry
    /// timers are still live.
    pub removed: Vec<DecorRecord<N>>,
    /// The matrix-rain spawner has to stop.
    pub stop_matrix: bool,
    /// `animation-duration` for every node that stays.
    pub duration: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lifetime_outlasts_cycle() {
        let matrix = SpawnSpec::new(300, 12_000, 8.0, 4.0, 5.0);
        assert!(matrix.lifetime_ms() > matrix.cycle_ceiling_ms());
        assert_eq!(matrix.cycle_ceiling_ms(), 17_000);

        let long_ttl = SpawnSpec::new(2000, 60_000, 15.0, 10.0, 10.0);
        assert_eq!(long_ttl.lifetime_ms(), 60_000);
    }

    #[test]
    fn slow_tier_counts_toward_cycle() {
        let short = SpawnSpec::new(100, 0, 1.0, 0.0, 0.0);
        assert_eq!(short.cycle_ceiling_ms(), 8000);
    }

    #[test]
    fn remove_by_seq() {
        let mut f = DecorField::new();
        for i in 0..5 {
            f.push(Effect::BinaryRain, i);
        }
        assert_eq!(f.remove(2).map(|r| r.node), Some(2));
        assert_eq!(f.remove(2), None);
        assert_eq!(f.len(), 4);
    }

    #[test]
    fn drain_effect_keeps_order_of_rest() {
        let mut f = DecorField::new();
        f.push(Effect::MatrixRain, 'a');
        f.push(Effect::BinaryRain, 'b');
        f.push(Effect::MatrixRain, 'c');
        f.push(Effect::TechParticles, 'd');
        let gone = f.drain_effect(Effect::MatrixRain);
        assert_eq!(gone.iter().map(|r| r.node).collect::<String>(), "ac");
        assert_eq!(f.iter().map(|r| r.node).collect::<String>(), "bd");
    }

    fn mixed_field() -> DecorField<u32> {
        let mut f = DecorField::new();
        for i in 0..40 {
            let effect = if i % 2 == 0 { Effect::MatrixRain } else { Effect::TechParticles };
            f.push(effect, i);
        }
        f
    }

    #[test]
    fn mobile_resize_trims_and_stops_matrix() {
        let mut f = mixed_field();
        let mobile = DeviceProfile {
            is_mobile: true,
            ..DeviceProfile::default()
        };
        let plan = f.plan_resize(mobile, true);

        assert!(plan.stop_matrix);
        assert_eq!(plan.duration, "8s");
        assert!(f.len() <= 5);
        assert!(f.iter().all(|r| r.effect == Effect::TechParticles));
        assert_eq!(plan.removed.len() + f.len(), 40);
        assert!(plan.removed.windows(2).all(|w| w[0].seq < w[1].seq));
        // Survivors are the newest tech particles.
        assert_eq!(f.iter().map(|r| r.node).collect::<Vec<_>>(), vec![35, 37, 39]);
    }

    #[test]
    fn tablet_and_desktop_keep_matrix() {
        let mut f = mixed_field();
        let tablet = DeviceProfile {
            is_tablet: true,
            ..DeviceProfile::default()
        };
        let plan = f.plan_resize(tablet, true);
        assert!(!plan.stop_matrix);
        assert_eq!(plan.duration, "6s");
        assert_eq!(f.len(), 15);
        assert_eq!(plan.removed.iter().map(|r| r.node).collect::<Vec<_>>(), (0..25).collect::<Vec<_>>());

        let plan = f.plan_resize(DeviceProfile::default(), true);
        assert!(plan.removed.is_empty());
        assert_eq!(plan.duration, "4s");
    }

    #[test]
    fn removed_records_name_their_expiry_timers() {
        let mut f = mixed_field();
        let plan = f.plan_resize(DeviceProfile::default(), false);
        assert_eq!(plan.removed[0].timer_key(), "matrixRain#0");
        assert_eq!(plan.removed[1].timer_key(), "techParticles#1");
    }

    #[test]
    fn expiry_key_format() {
        assert_eq!(expiry_key(Effect::TechParticles, 7), "techParticles#7");
    }
}
