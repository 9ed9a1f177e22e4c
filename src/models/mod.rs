pub mod batch;
pub mod species;
pub mod stratification_step;

pub use stratification_step::StepType;

#[allow(unused_imports)]
pub mod prelude {
    pub use super::batch::{self, Entity as Batch};
    pub use super::species::{self, Entity as Species};
    pub use super::stratification_step::{self, Entity as StratificationStep, StepType};
}
