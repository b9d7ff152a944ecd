//! Contract module containing trait definitions for forecast operations

mod sequence_predictor;

pub use sequence_predictor::SequencePredictor;
