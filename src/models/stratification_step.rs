use sea_orm::entity::prelude::*;
use std::str::FromStr;

/// Kind of pre-germination treatment applied in a step
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum StepType {
    #[sea_orm(string_value = "Cold")]
    Cold,
    #[sea_orm(string_value = "Warm")]
    Warm,
    #[sea_orm(string_value = "Scarification")]
    Scarification,
}

impl StepType {
    pub fn as_str(&self) -> &'static str {
        match self {
            StepType::Cold => "Cold",
            StepType::Warm => "Warm",
            StepType::Scarification => "Scarification",
        }
    }
}

impl std::fmt::Display for StepType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StepType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Cold" => Ok(StepType::Cold),
            "Warm" => Ok(StepType::Warm),
            "Scarification" => Ok(StepType::Scarification),
            other => Err(format!("Unknown stratification type: {}", other)),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "stratification_steps")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub species_id: i64,
    /// Position within the species's sequence, contiguous from 0
    pub step_order: i32,
    #[sea_orm(column_name = "type")]
    pub step_type: StepType,
    pub moist: bool,
    pub days: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::species::Entity",
        from = "Column::SpeciesId",
        to = "super::species::Column::Id",
        on_delete = "Cascade"
    )]
    Species,
}

impl Related<super::species::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Species.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
