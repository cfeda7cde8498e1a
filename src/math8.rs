use embassy_time::Duration;

/// Full scale of the analog inputs in millivolts
pub const FULL_SCALE_MV: i32 = 3300;

/// Gamma exponent applied to the white channel
pub const WHITE_GAMMA: f32 = 2.6;

/// Interpolate between two 8-bit values
///
/// `progress` runs from 0 (`a`) to `u16::MAX` (`b`). Rounds half away from
/// zero, so the result is monotonic in `progress` and exact at both ends.
#[inline]
#[allow(
    clippy::cast_lossless,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
pub const fn lerp8(a: u8, b: u8, progress: u16) -> u8 {
    let delta = b as i32 - a as i32;
    let half = if delta >= 0 { 0x7FFF } else { -0x7FFF };
    let step = (delta * progress as i32 + half) / u16::MAX as i32;

    (a as i32 + step) as u8
}

/// Calculate progress (0-`u16::MAX`) based on elapsed time and duration
///
/// A zero duration counts as already complete.
#[inline]
#[allow(clippy::cast_possible_truncation)]
pub const fn progress16(elapsed: Duration, duration: Duration) -> u16 {
    let total = duration.as_millis();
    let elapsed = elapsed.as_millis();
    if total == 0 || elapsed >= total {
        return u16::MAX;
    }

    ((elapsed * u16::MAX as u64) / total) as u16
}

/// Map an analog reading to the 8-bit channel scale
///
/// The reading is truncated to whole millivolts, clamped to
/// `[0, FULL_SCALE_MV]` and scaled linearly to `[0, 255]`.
#[inline]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn level_from_millivolts(millivolts: f32) -> u8 {
    // `as` saturates and maps NaN to zero
    let clamped = (millivolts as i32).clamp(0, FULL_SCALE_MV);
    (clamped * 255 / FULL_SCALE_MV) as u8
}

/// Gamma-correct an 8-bit value
#[inline]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn gamma8(value: u8) -> u8 {
    let normalized = f32::from(value) / 255.0;
    libm::roundf(libm::powf(normalized, WHITE_GAMMA) * 255.0) as u8
}
