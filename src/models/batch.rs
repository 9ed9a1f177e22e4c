use sea_orm::entity::prelude::*;

/// A group of seeds of one species sown across a number of cells
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "batches")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub species_id: i64,
    pub num_cells: i32,
    pub seeds_per_cell: i32,
    /// Optional override; never derived from cells x seeds per cell
    pub total_seeds: Option<i32>,
    pub date_created: Date,
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
