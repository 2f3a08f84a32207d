//! Device classification
//!
//! Laptops and desktops get a wide, short ROI, heavier downscaling, a
//! sharpening pass and rotated variants. Phones get a narrower band with no
//! extra passes so each tick stays cheap.

use std::time::Duration;

use crate::models::RoiFractions;

/// Platform family markers that indicate a desktop OS
const DESKTOP_PLATFORMS: [&str; 3] = ["mac", "win", "linux"];
/// User-agent markers that indicate a mobile OS
const MOBILE_AGENTS: [&str; 3] = ["android", "iphone", "ipad"];

/// Host-reported identity strings
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HostInfo {
    /// `navigator.platform`-style string, e.g. `MacIntel`, `Linux armv8l`
    pub platform: String,
    /// Full user-agent string
    pub user_agent: String,
}

impl HostInfo {
    /// Create host info from platform and user agent
    pub fn new(platform: impl Into<String>, user_agent: impl Into<String>) -> Self {
        Self {
            platform: platform.into(),
            user_agent: user_agent.into(),
        }
    }

    /// Host info for the machine this process runs on
    pub fn current() -> Self {
        let platform = match std::env::consts::OS {
            "macos" => "MacIntel",
            "windows" => "Win32",
            "linux" => "Linux x86_64",
            "android" => "Linux armv8l",
            "ios" => "iPhone",
            other => other,
        };
        let user_agent = match std::env::consts::OS {
            "android" => "Android",
            "ios" => "iPhone",
            _ => "",
        };
        Self::new(platform, user_agent)
    }
}

/// Desktop OS platform and no mobile marker in the user agent.
///
/// Matching is case-insensitive substring matching.
pub fn is_laptop(host: &HostInfo) -> bool {
    let platform = host.platform.to_ascii_lowercase();
    let agent = host.user_agent.to_ascii_lowercase();
    DESKTOP_PLATFORMS.iter().any(|p| platform.contains(p))
        && !MOBILE_AGENTS.iter().any(|m| agent.contains(m))
}

/// Every device-dependent pipeline parameter, fixed for a session
#[derive(Debug, Clone, PartialEq)]
pub struct DeviceProfile {
    /// Desktop-class device
    pub is_laptop: bool,
    /// ROI before the failure threshold
    pub roi_nominal: RoiFractions,
    /// ROI after the failure threshold
    pub roi_widened: RoiFractions,
    /// Downscale factor from ROI to working canvas
    pub scale: f32,
    /// Run the 3x3 sharpening kernel
    pub sharpen: bool,
    /// Rotations (degrees) to add after the bands
    pub rotations: &'static [i16],
    /// Delay between ticks after a decode pass
    pub tick_delay: Duration,
}

impl DeviceProfile {
    /// Desktop-class parameters
    pub fn laptop() -> Self {
        Self {
            is_laptop: true,
            roi_nominal: RoiFractions::new(0.95, 0.60),
            roi_widened: RoiFractions::new(0.98, 0.70),
            scale: 0.40,
            sharpen: true,
            rotations: &[5, -5],
            tick_delay: Duration::from_millis(30),
        }
    }

    /// Phone/tablet parameters
    pub fn mobile() -> Self {
        Self {
            is_laptop: false,
            roi_nominal: RoiFractions::new(0.85, 0.28),
            roi_widened: RoiFractions::new(0.90, 0.35),
            scale: 0.60,
            sharpen: false,
            rotations: &[],
            tick_delay: Duration::from_millis(50),
        }
    }

    /// Classify the host once and pick the matching parameters
    pub fn detect(host: &HostInfo) -> Self {
        let profile = if is_laptop(host) {
            Self::laptop()
        } else {
            Self::mobile()
        };
        log::debug!(
            "device profile: laptop={} (platform={:?})",
            profile.is_laptop,
            host.platform
        );
        profile
    }

    /// ROI fractions for the given widening state
    pub fn roi(&self, widened: bool) -> RoiFractions {
        if widened {
            self.roi_widened
        } else {
            self.roi_nominal
        }
    }

    /// Variants produced per tick for a valid frame
    pub fn variants_per_tick(&self) -> usize {
        3 + self.rotations.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MAC_UA: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15";
    const ANDROID_UA: &str = "Mozilla/5.0 (Linux; Android 14; Pixel 8) AppleWebKit/537.36 Mobile";
    const IPAD_UA: &str = "Mozilla/5.0 (iPad; CPU OS 17_0 like Mac OS X) AppleWebKit/605.1.15";

    #[test]
    fn test_desktop_platforms_are_laptops() {
        for platform in ["MacIntel", "Win32", "Linux x86_64", "linux"] {
            assert!(is_laptop(&HostInfo::new(platform, MAC_UA)), "{platform}");
        }
    }

    #[test]
    fn test_mobile_marker_wins_over_platform() {
        assert!(!is_laptop(&HostInfo::new("Linux armv8l", ANDROID_UA)));
        // iPadOS can report MacIntel
        assert!(!is_laptop(&HostInfo::new("MacIntel", IPAD_UA)));
        assert!(!is_laptop(&HostInfo::new("Win32", "something iPhone something")));
    }

    #[test]
    fn test_unknown_platform_is_mobile() {
        assert!(!is_laptop(&HostInfo::new("iPhone", "")));
        assert!(!is_laptop(&HostInfo::new("", "")));
    }

    #[test]
    fn test_profiles() {
        let laptop = DeviceProfile::detect(&HostInfo::new("Win32", "Mozilla/5.0 (Windows NT 10.0)"));
        assert!(laptop.is_laptop);
        assert!(laptop.sharpen);
        assert_eq!(laptop.variants_per_tick(), 5);
        assert_eq!(laptop.tick_delay, Duration::from_millis(30));

        let mobile = DeviceProfile::detect(&HostInfo::new("Linux armv8l", ANDROID_UA));
        assert!(!mobile.is_laptop);
        assert!(!mobile.sharpen);
        assert_eq!(mobile.variants_per_tick(), 3);
        assert_eq!(mobile.roi(true), RoiFractions::new(0.90, 0.35));
        assert_eq!(mobile.roi(false), RoiFractions::new(0.85, 0.28));
    }
}
