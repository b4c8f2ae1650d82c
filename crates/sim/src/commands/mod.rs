//! Command implementations for battle-sim

mod run;

pub use run::Run;
