//! Training and evaluation pipeline
//!
//! This module provides:
//! - The training supervisor (self-play or against a fixed opponent)
//! - Fixed opponent policies
//! - Observers for progress bars, logging and metrics

pub mod observers;
pub mod opponents;
pub mod training;

pub use observers::{LoggingObserver, MetricsObserver, MetricsSummary, ProgressObserver};
pub use opponents::{DefensivePolicy, FixedOrderPolicy, OpponentKind, RandomPolicy};
pub use training::{
    CancellationToken, LearnFrom, TrainingConfig, TrainingResult, TrainingSupervisor,
};

pub use crate::ports::{Observer, ProgressEvent};
