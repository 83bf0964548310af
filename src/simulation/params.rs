//! Numerical constants of the wave field
//!
//! `WaveParameters` holds the runtime form of the formula inputs:
//! - amplitude, wave number and gaussian falloff,
//! - the angular frequency tied to the orbital period and the wave speed,
//! - the grid extent used to normalise the polarization term,
//! - the epsilon that keeps `r` off zero at the origin

#[derive(Debug, Clone, PartialEq)]
pub struct WaveParameters {
    pub amplitude: f64, // peak displacement scale
    pub wave_number: f64, // k
    pub angular_frequency: f64, // w = 2*pi / orbital period
    pub speed: f64, // multiplies w*t
    pub falloff: f64, // envelope exp(-r^2 / falloff)
    pub extent: f64, // polarization = (x^2 - y^2) / extent^2
    pub epsilon: f64, // r = sqrt(x^2 + y^2) + epsilon
}
