//! The configuration block read by every input call.
//!
//! [`Settings`] is a plain struct with no global state.  The `dinput`
//! controller owns one instance and exposes setter methods for it; the
//! infrastructure layer can populate it from a TOML file.

use std::time::Duration;

/// Runtime behaviour settings for input injection.
///
/// # Example
///
/// ```rust
/// use dinput_core::Settings;
///
/// let settings = Settings::default();
/// assert!(settings.fail_safe);
/// assert_eq!(settings.fail_safe_points, vec![(0, 0)]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Abort any call made while the pointer sits on a fail-safe point.
    pub fail_safe: bool,
    /// Pixel positions that trigger the fail-safe.
    pub fail_safe_points: Vec<(i32, i32)>,
    /// Sleep after every completed call.
    pub pause: Duration,
    /// Minimum interval between the events of a down/up pair, and the
    /// shortest sleep between interpolated mouse-move steps.
    pub minimum_sleep: Duration,
    /// Move durations shorter than this are performed instantly.
    pub minimum_duration: Duration,
    /// Swap which physical button `Primary` and `Secondary` resolve to.
    pub primary_button_swapped: bool,
    /// Normalize absolute moves over the whole virtual desktop rather than
    /// the primary monitor.
    pub virtual_resolution: bool,
    /// Fail instead of clamping when a target lies off screen.
    pub require_on_screen: bool,
    /// Hold shift while typing characters that need it on the US layout.
    pub auto_shift: bool,
    /// Turn OS pointer acceleration off around raw relative moves.
    pub disable_mouse_acceleration: bool,
}

impl Default for Settings {
    /// | Field                        | Default    |
    /// |------------------------------|------------|
    /// | fail_safe                    | `true`     |
    /// | fail_safe_points             | `[(0, 0)]` |
    /// | pause                        | 10 ms      |
    /// | minimum_sleep                | 50 ms      |
    /// | minimum_duration             | 100 ms     |
    /// | primary_button_swapped       | `false`    |
    /// | virtual_resolution           | `false`    |
    /// | require_on_screen            | `false`    |
    /// | auto_shift                   | `true`     |
    /// | disable_mouse_acceleration   | `false`    |
    fn default() -> Self {
        Self {
            fail_safe: true,
            fail_safe_points: vec![(0, 0)],
            pause: Duration::from_millis(10),
            minimum_sleep: Duration::from_millis(50),
            minimum_duration: Duration::from_millis(100),
            primary_button_swapped: false,
            virtual_resolution: false,
            require_on_screen: false,
            auto_shift: true,
            disable_mouse_acceleration: false,
        }
    }
}

impl Settings {
    /// Returns `true` if the fail-safe is armed and `position` is a trigger point.
    pub fn is_fail_safe_point(&self, position: (i32, i32)) -> bool {
        self.fail_safe && self.fail_safe_points.contains(&position)
    }
}
