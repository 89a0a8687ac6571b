//! Turn resolution pipeline.
pub mod modifier;
pub mod on_hit;
pub mod report;
pub mod resolver;

pub use modifier::DamageModifiers;
pub use on_hit::{OnHitProc, OnHitRule, OnHitRules};
pub use report::{ProcEvent, StatusReport, StepReport, TurnOutcome, TurnReport};
pub use resolver::TurnResolver;
