//! Performance benchmarks for the forecasting core

use std::time::Instant;

use forecast_core::{
    AutoregressiveForecaster, FeatureScaler, ResidualConfidenceEstimator, Result,
    SequencePredictor,
};

struct WindowMean;

impl SequencePredictor for WindowMean {
    fn predict(&self, window: &[Vec<f64>]) -> Result<f64> {
        Ok(window.iter().map(|r| r[0]).sum::<f64>() / window.len() as f64)
    }

    fn name(&self) -> &str {
        "window_mean"
    }
}

fn generate_levels(n: usize) -> Vec<Vec<f64>> {
    (0..n)
        .map(|i| {
            let t = i as f64;
            vec![42.0 - t * 0.01 + 1.5 * (t * std::f64::consts::TAU / 12.0).sin()]
        })
        .collect()
}

fn bench<F>(name: &str, iterations: u32, mut f: F)
where
    F: FnMut(),
{
    for _ in 0..3 {
        f();
    }

    let start = Instant::now();
    for _ in 0..iterations {
        f();
    }
    let elapsed = start.elapsed();
    let per_iter = elapsed / iterations;

    println!(
        "{:36} {:>10.2?} total, {:>10.2?}/iter ({} iters)",
        name, elapsed, per_iter, iterations
    );
}

fn main() {
    println!("=== hydrocast forecaster benchmarks ===\n");

    let predictor = WindowMean;
    for &n in &[120usize, 1_200, 12_000] {
        let levels = generate_levels(n);
        let scaler = FeatureScaler::fit(&levels).expect("levels vary");
        let scaled = scaler.transform(&levels).expect("same width");

        println!("--- history of {} readings ---", n);
        bench("scaler fit + transform", 200, || {
            let s = FeatureScaler::fit(&levels).unwrap();
            let _ = s.transform(&levels).unwrap();
        });
        bench("autoregressive run (h=24, w=12)", 200, || {
            let _ = AutoregressiveForecaster::new(12, 24)
                .run(&scaled, &predictor)
                .unwrap();
        });
        bench("residual estimate (w=12)", 50, || {
            let _ = ResidualConfidenceEstimator::new(12)
                .estimate(&scaled, &predictor)
                .unwrap();
        });
        println!();
    }
}
