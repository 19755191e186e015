pub mod scenario;
pub mod sweep;

pub use scenario::{
    run_scenarios, standard_presets, ScenarioBatchResult, ScenarioOutcome, ScenarioPreset,
};
pub use sweep::{sweep, SensitivityPoint, SensitivitySpec, SweepResult};
