use std::collections::BTreeMap;

use units::Temperature;

use crate::helpers::{TeffBin, round_teff};

#[test]
fn round_teff_rounds_to_nearest_kelvin() {
    assert_eq!(
        round_teff(Temperature::from_kelvin(100.3)),
        Temperature::from_kelvin(100.0)
    );
    assert_eq!(
        round_teff(Temperature::from_kelvin(2000.4)),
        Temperature::from_kelvin(2000.0)
    );
    assert_eq!(
        round_teff(Temperature::from_kelvin(2699.6)),
        Temperature::from_kelvin(2700.0)
    );
}

#[test]
fn teff_bins_collapse_near_duplicates() {
    let a = TeffBin::from(Temperature::from_kelvin(2999.8));
    let b = TeffBin::from(Temperature::from_kelvin(3000.2));
    assert_eq!(a, b);
    assert_eq!(a.kelvin(), 3000);
    assert_eq!(a.temperature(), Temperature::from_kelvin(3000.0));
    assert_eq!(a.to_string(), "3000 K");
}

#[test]
fn teff_bins_order_by_temperature() {
    let mut table = BTreeMap::new();
    table.insert(TeffBin::from_kelvin(3000), 0.7);
    table.insert(TeffBin::from_kelvin(2600), 0.1);
    table.insert(TeffBin::from_kelvin(2700), 0.2);

    let keys: Vec<i64> = table.keys().map(|k| k.kelvin()).collect();
    assert_eq!(keys, vec![2600, 2700, 3000]);
}
