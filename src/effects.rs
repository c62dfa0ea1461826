//! Capability-gated effect selection.

use std::fmt;

use crate::profile::DeviceProfile;

/// Every optional decorative behaviour the manager knows how to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Effect {
    MatrixRain,
    BinaryRain,
    TechParticles,
    GravityCanvas,
    NetworkDiagram,
    LightParticles,
    CodePattern,
    CursorFollower,
}

impl Effect {
    /// Registry key prefix for this effect's handles.
    pub const fn name(self) -> &'static str {
        match self {
            Effect::MatrixRain => "matrixRain",
            Effect::BinaryRain => "binaryRain",
            Effect::TechParticles => "techParticles",
            Effect::GravityCanvas => "gravityCanvas",
            Effect::NetworkDiagram => "networkDiagram",
            Effect::LightParticles => "lightParticles",
            Effect::CodePattern => "codePattern",
            Effect::CursorFollower => "cursorFollower",
        }
    }

    const fn bit(self) -> u16 {
        1 << (self as u16)
    }
}

impl fmt::Display for Effect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The full desktop background set.
pub const FULL_SET: [Effect; 5] = [
    Effect::MatrixRain,
    Effect::BinaryRain,
    Effect::TechParticles,
    Effect::GravityCanvas,
    Effect::NetworkDiagram,
];

/// The lightweight set used on mobile.
pub const LIGHT_SET: [Effect; 1] = [Effect::LightParticles];

/// Small bitset of [`Effect`]s.
#[derive(Clone, Copy, Default, PartialEq, Eq)]
pub struct EffectSet(u16);

impl EffectSet {
    pub const fn empty() -> Self {
        Self(0)
    }

    pub fn from_slice(effects: &[Effect]) -> Self {
        effects.iter().fold(Self::empty(), |set, &e| set.with(e))
    }

    #[must_use]
    pub const fn with(self, effect: Effect) -> Self {
        Self(self.0 | effect.bit())
    }

    #[must_use]
    pub const fn without(self, effect: Effect) -> Self {
        Self(self.0 & !effect.bit())
    }

    pub const fn contains(self, effect: Effect) -> bool {
        self.0 & effect.bit() != 0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn iter(self) -> impl Iterator<Item = Effect> {
        const ALL: [Effect; 8] = [
            Effect::MatrixRain,
            Effect::BinaryRain,
            Effect::TechParticles,
            Effect::GravityCanvas,
            Effect::NetworkDiagram,
            Effect::LightParticles,
            Effect::CodePattern,
            Effect::CursorFollower,
        ];
        ALL.into_iter().filter(move |&e| self.contains(e))
    }
}

impl fmt::Debug for EffectSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

/// Picks the animated background set for a profile.
///
/// Reduced motion wins over everything else; mobile gets the light set;
/// tablets and desktops get the full set and are throttled later by the
/// resize ceilings instead.
pub fn select_effect_set(profile: &DeviceProfile) -> EffectSet {
    if profile.reduced_motion_preferred {
        EffectSet::empty()
    } else if profile.is_mobile {
        EffectSet::from_slice(&LIGHT_SET)
    } else {
        EffectSet::from_slice(&FULL_SET)
    }
}

/// Ambient extras that sit outside the background set.
pub fn select_ambient(profile: &DeviceProfile) -> EffectSet {
    if profile.reduced_motion_preferred {
        return EffectSet::empty();
    }
    let set = EffectSet::empty().with(Effect::CodePattern);
    if profile.is_mobile || profile.touch_supported {
        set
    } else {
        set.with(Effect::CursorFollower)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_ops() {
        let s = EffectSet::empty().with(Effect::MatrixRain).with(Effect::GravityCanvas);
        assert_eq!(s.len(), 2);
        assert!(s.contains(Effect::GravityCanvas));
        let s = s.without(Effect::MatrixRain);
        assert!(!s.contains(Effect::MatrixRain));
        assert_eq!(s.iter().collect::<Vec<_>>(), vec![Effect::GravityCanvas]);
    }

    #[test]
    fn touch_desktop_has_no_cursor() {
        let p = DeviceProfile {
            touch_supported: true,
            ..DeviceProfile::default()
        };
        let ambient = select_ambient(&p);
        assert!(ambient.contains(Effect::CodePattern));
        assert!(!ambient.contains(Effect::CursorFollower));
    }
}
