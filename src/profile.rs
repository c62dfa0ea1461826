//! Device capability tiering.
//!
//! A [`DeviceProfile`] is the single source of truth for what the current
//! viewport and user preferences allow. It is computed once at startup and
//! again after each debounced resize, then passed by value into every effect
//! routine.

use serde::Serialize;

/// Viewports at or below this width are treated as mobile.
pub const MOBILE_MAX_WIDTH: f64 = 768.0;
/// Viewports above [`MOBILE_MAX_WIDTH`] and at or below this width are tablets.
pub const TABLET_MAX_WIDTH: f64 = 1024.0;

const MOBILE_AGENTS: &[&str] = &[
    "Android",
    "webOS",
    "iPhone",
    "iPad",
    "iPod",
    "BlackBerry",
    "IEMobile",
    "Opera Mini",
];

/// Coarse capability tier used for ceilings and animation pacing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Tier {
    Mobile,
    Tablet,
    Desktop,
}

/// Raw signals read from the host. Kept separate so the tiering rules can be
/// exercised without a browser.
#[derive(Debug, Clone, Default)]
pub struct HostSignals {
    pub viewport_width: f64,
    pub user_agent: String,
    pub touch_supported: bool,
    pub reduced_motion: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceProfile {
    pub is_mobile: bool,
    pub is_tablet: bool,
    pub touch_supported: bool,
    pub reduced_motion_preferred: bool,
}

impl DeviceProfile {
    pub fn from_signals(signals: &HostSignals) -> Self {
        let width = signals.viewport_width;
        let is_mobile = width <= MOBILE_MAX_WIDTH || is_mobile_agent(&signals.user_agent);
        // A mobile user agent on a wide screen is still mobile, never tablet.
        let is_tablet = !is_mobile && width > MOBILE_MAX_WIDTH && width <= TABLET_MAX_WIDTH;
        Self {
            is_mobile,
            is_tablet,
            touch_supported: signals.touch_supported,
            reduced_motion_preferred: signals.reduced_motion,
        }
    }

    pub fn tier(&self) -> Tier {
        if self.is_mobile {
            Tier::Mobile
        } else if self.is_tablet {
            Tier::Tablet
        } else {
            Tier::Desktop
        }
    }
}

pub fn is_mobile_agent(user_agent: &str) -> bool {
    MOBILE_AGENTS.iter().any(|pat| user_agent.contains(pat))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signals(width: f64, ua: &str) -> HostSignals {
        HostSignals {
            viewport_width: width,
            user_agent: ua.to_owned(),
            ..HostSignals::default()
        }
    }

    #[test]
    fn width_boundaries() {
        assert_eq!(DeviceProfile::from_signals(&signals(768.0, "")).tier(), Tier::Mobile);
        assert_eq!(DeviceProfile::from_signals(&signals(769.0, "")).tier(), Tier::Tablet);
        assert_eq!(DeviceProfile::from_signals(&signals(1024.0, "")).tier(), Tier::Tablet);
        assert_eq!(DeviceProfile::from_signals(&signals(1025.0, "")).tier(), Tier::Desktop);
    }

    #[test]
    fn mobile_agent_overrides_width() {
        let ua = "Mozilla/5.0 (iPad; CPU OS 17_0 like Mac OS X)";
        let p = DeviceProfile::from_signals(&signals(1366.0, ua));
        assert!(p.is_mobile);
        assert!(!p.is_tablet);
    }

    #[test]
    fn passes_through_preferences() {
        let p = DeviceProfile::from_signals(&HostSignals {
            viewport_width: 1920.0,
            user_agent: String::new(),
            touch_supported: true,
            reduced_motion: true,
        });
        assert!(p.touch_supported);
        assert!(p.reduced_motion_preferred);
        assert_eq!(p.tier(), Tier::Desktop);
    }
}
