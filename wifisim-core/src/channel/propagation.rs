use std::{fmt, time::Duration};

/// Position of a PHY, in meters.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// How a signal travels between two positions.
pub trait PropagationModel: Send {
    /// time for the signal to reach `to`
    fn delay(&self, from: &Position, to: &Position) -> Duration;

    /// power received at `to`, in dBm
    fn rx_power(&self, tx_power_dbm: f64, from: &Position, to: &Position) -> f64;
}

/// Constant speed delay and log-distance path loss.
///
/// ```
/// # use wifisim_core::channel::{ConstantSpeedLogDistance, Position, PropagationModel};
/// let model = ConstantSpeedLogDistance::default();
/// let from = Position::default();
/// let to = Position::new(10.0, 0.0, 0.0);
///
/// // 46.6777dB at 1m plus 30dB per decade
/// let rx = model.rx_power(16.0206, &from, &to);
/// assert!((rx - (16.0206 - 76.6777)).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstantSpeedLogDistance {
    /// meters per second
    pub speed: f64,
    pub exponent: f64,
    /// meters
    pub reference_distance: f64,
    /// dB
    pub reference_loss: f64,
}

impl Position {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn distance(&self, other: &Position) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

impl ConstantSpeedLogDistance {
    pub const SPEED_OF_LIGHT: f64 = 299_792_458.0;
}

impl Default for ConstantSpeedLogDistance {
    fn default() -> Self {
        Self {
            speed: Self::SPEED_OF_LIGHT,
            exponent: 3.0,
            reference_distance: 1.0,
            reference_loss: 46.6777,
        }
    }
}

impl PropagationModel for ConstantSpeedLogDistance {
    fn delay(&self, from: &Position, to: &Position) -> Duration {
        Duration::from_secs_f64(from.distance(to) / self.speed)
    }

    fn rx_power(&self, tx_power_dbm: f64, from: &Position, to: &Position) -> f64 {
        let distance = from.distance(to);
        if distance <= self.reference_distance {
            return tx_power_dbm - self.reference_loss;
        }
        let loss = 10.0 * self.exponent * (distance / self.reference_distance).log10();
        tx_power_dbm - self.reference_loss - loss
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delay_at_light_speed() {
        let model = ConstantSpeedLogDistance::default();
        let to = Position::new(0.0, 299.792458, 0.0);

        let delay = model.delay(&Position::default(), &to);

        assert!(delay.as_nanos().abs_diff(1_000) <= 1);
    }

    #[test]
    fn close_receivers_get_reference_loss() {
        let model = ConstantSpeedLogDistance::default();
        let to = Position::new(0.5, 0.0, 0.0);

        assert_eq!(model.rx_power(0.0, &Position::default(), &to), -46.6777);
    }

    #[test]
    fn power_decreases_with_distance() {
        let model = ConstantSpeedLogDistance::default();
        let origin = Position::default();

        let near = model.rx_power(16.0, &origin, &Position::new(5.0, 0.0, 0.0));
        let far = model.rx_power(16.0, &origin, &Position::new(50.0, 0.0, 0.0));

        assert!((near - far - 30.0).abs() < 1e-9);
    }
}
