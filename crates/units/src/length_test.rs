mod tests {
    use approx::assert_relative_eq;

    use crate::length::{Length, AU_TO_KM, EARTH_RADIUS_KM, SOLAR_RADIUS_KM};

    #[test]
    fn test_length_conversions() {
        let au = Length::from_au(1.0);
        assert_relative_eq!(au.to_km(), AU_TO_KM);
        assert_relative_eq!(au.to_au(), 1.0);

        let sun = Length::from_solar_radii(1.0);
        assert_relative_eq!(sun.to_km(), SOLAR_RADIUS_KM);
        assert_relative_eq!(sun.to_solar_radii(), 1.0);

        let earth = Length::from_earth_radii(2.0);
        assert_relative_eq!(earth.to_km(), 2.0 * EARTH_RADIUS_KM);
        assert_relative_eq!(earth.to_earth_radii(), 2.0);

        let m = Length::from_meters(2_500.0);
        assert_relative_eq!(m.to_km(), 2.5);
        assert_relative_eq!(m.to_m(), 2_500.0);
    }

    #[test]
    fn test_length_ratios() {
        // ~215 solar radii per AU
        let ratio = Length::from_au(1.0) / Length::from_solar_radii(1.0);
        assert_relative_eq!(ratio, 215.03, epsilon = 0.05);

        let star = Length::from_solar_radii(0.15);
        let planet = star * 0.1;
        assert_relative_eq!(planet / star, 0.1);
    }

    #[test]
    fn test_length_arithmetic_operations() {
        let a = Length::from_km(5.0);
        let b = Length::from_km(3.0);

        assert_relative_eq!((a + b).to_km(), 8.0);
        assert_relative_eq!((a - b).to_km(), 2.0);
        assert_relative_eq!((a * 2.0).to_km(), 10.0);
        assert_relative_eq!((2.0 * a).to_km(), 10.0);
        assert_relative_eq!((a / 2.0).to_km(), 2.5);
        assert_relative_eq!(a.powi(2), 25.0);
    }
}
