pub mod batches;
pub mod species;

pub use batches::{BatchInput, BatchWithSpecies};
pub use species::{SpeciesInput, SpeciesWithSteps, StepInput};
