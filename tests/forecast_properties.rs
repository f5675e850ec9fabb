//! Forecast interval behavior and differencing round trips.

use boxjenkins::core::ObservationSeries;
use boxjenkins::model::{
    difference, fit, forecast, forecast_with_level, integrate, ModelOrders, ModelSpec,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn fitted(orders: ModelOrders, ar: Vec<f64>, ma: Vec<f64>, seed: u64) -> boxjenkins::model::FittedModel {
    let spec = ModelSpec::new(orders, ar, ma).unwrap();
    let mut rng = StdRng::seed_from_u64(seed);
    let series = spec.simulate(600, 1.0, &mut rng).unwrap();
    fit(&series, orders, None).unwrap()
}

#[test]
fn interval_widths_never_shrink() {
    let cases = [
        (ModelOrders::new(1, 0, 0), vec![0.7], vec![]),
        (ModelOrders::new(0, 0, 2), vec![], vec![0.5, 0.2]),
        (ModelOrders::new(1, 1, 0), vec![0.4], vec![]),
        (ModelOrders::new(1, 1, 1), vec![0.3], vec![-0.2]),
        (ModelOrders::new(0, 2, 0), vec![], vec![]),
    ];

    for (orders, ar, ma) in cases {
        let model = fitted(orders, ar, ma, 42);
        let ahead = forecast(&model, 25).unwrap();
        let widths = ahead.widths();
        for k in 1..widths.len() {
            assert!(
                widths[k] >= widths[k - 1] - 1e-9,
                "{orders:?}: width at horizon {} below horizon {}",
                k + 1,
                k
            );
        }
    }
}

#[test]
fn integrated_models_have_unbounded_interval_growth() {
    // A d=1 model accumulates forecast-error variance without bound, so
    // the width far out must dwarf the one-step width.
    let model = fitted(ModelOrders::new(0, 1, 0), vec![], vec![], 9);
    let ahead = forecast(&model, 50).unwrap();
    let widths = ahead.widths();
    assert!(widths[49] > 3.0 * widths[0]);
}

#[test]
fn stationary_model_interval_growth_saturates() {
    // For a stationary AR(1), interval width converges to a finite limit;
    // the step-to-step growth far out is negligible.
    let model = fitted(ModelOrders::new(1, 0, 0), vec![0.5], vec![], 13);
    let ahead = forecast(&model, 60).unwrap();
    let widths = ahead.widths();
    let late_growth = widths[59] - widths[49];
    assert!(late_growth < 0.01 * widths[59], "late growth = {late_growth}");
}

#[test]
fn point_forecast_within_its_own_interval() {
    let model = fitted(ModelOrders::new(1, 1, 1), vec![0.4], vec![0.2], 5);
    let ahead = forecast_with_level(&model, 15, 0.8).unwrap();
    for step in ahead.steps() {
        assert!(step.lower <= step.point && step.point <= step.upper);
    }
}

#[test]
fn difference_then_integrate_round_trips() {
    // d = 1: re-integration reproduces the original series exactly except
    // for the first value, which is the integration constant.
    let original: Vec<f64> = (0..40)
        .map(|i| (i as f64 * 0.7).sin() * 3.0 + i as f64 * 0.1)
        .collect();

    let differenced = difference(&original, 1);
    let restored = integrate(&differenced, &original[..1], 1);
    assert_eq!(restored.len(), original.len() - 1);
    for (r, o) in restored.iter().zip(&original[1..]) {
        assert!((r - o).abs() < 1e-10);
    }
}

#[test]
fn forecast_on_trend_continues_the_trend() {
    // Strongly trending series fitted with d = 1 keeps climbing.
    let values: Vec<f64> = (0..120).map(|i| 5.0 + 2.0 * i as f64 + (i as f64 * 0.9).sin()).collect();
    let series = ObservationSeries::from_values(values.clone()).unwrap();
    let model = fit(&series, ModelOrders::new(1, 1, 0), None).unwrap();

    let ahead = forecast(&model, 10).unwrap();
    let point = ahead.point();
    let last = *values.last().unwrap();
    assert!(point[0] > last - 5.0);
    assert!(point[9] > point[0]);
}
