//! Model module containing data structures

mod diagnostics;
mod forecast_point;
mod observation;
mod policy;

pub use diagnostics::ForecastDiagnostics;
pub use forecast_point::ForecastPoint;
pub use observation::{Observation, ObservationSeries};
pub use policy::{FillPolicy, MarginScaling};
