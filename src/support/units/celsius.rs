use uom::si::{f64::ThermodynamicTemperature, thermodynamic_temperature::degree_celsius};

/// A temperature in degrees Celsius, stored exactly as given.
///
/// [`ThermodynamicTemperature`] stores kelvin, so most decimal Celsius values
/// come back slightly off after a `new::<degree_celsius>` and
/// `get::<degree_celsius>` round trip. Temperatures imposed on a solver field
/// use this type so the field holds the configured value bit for bit.
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd)]
pub struct Celsius(f64);

impl Celsius {
    /// A temperature of `value` °C.
    #[must_use]
    pub const fn new(value: f64) -> Self {
        Self(value)
    }

    /// The value in degrees Celsius.
    #[must_use]
    pub const fn value(self) -> f64 {
        self.0
    }
}

impl From<Celsius> for ThermodynamicTemperature {
    fn from(t: Celsius) -> Self {
        Self::new::<degree_celsius>(t.0)
    }
}

/// Converts from kelvin storage, so the result carries its rounding.
impl From<ThermodynamicTemperature> for Celsius {
    fn from(t: ThermodynamicTemperature) -> Self {
        Self(t.get::<degree_celsius>())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::thermodynamic_temperature::kelvin;

    #[test]
    #[allow(clippy::float_cmp)]
    fn keeps_decimal_values_exact() {
        for value in [20.1, 21.3, 18.7, 0.1, -3.3] {
            assert_eq!(Celsius::new(value).value(), value);
        }
    }

    #[test]
    fn converts_to_and_from_uom() {
        let indoor = ThermodynamicTemperature::from(Celsius::new(22.0));
        assert_relative_eq!(indoor.get::<kelvin>(), 295.15, epsilon = 1e-12);

        let back = Celsius::from(ThermodynamicTemperature::new::<kelvin>(298.15));
        assert_relative_eq!(back.value(), 25.0, epsilon = 1e-12);
    }
}
