use sea_orm::entity::prelude::*;
use uuid::Uuid;

/// Pricing model discriminator, stored as its string value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum PricingType {
    #[sea_orm(string_value = "free")]
    Free,
    #[sea_orm(string_value = "perSession")]
    PerSession,
    #[sea_orm(string_value = "subscription")]
    Subscription,
}

/// One pricing row per activity; `activity_id` is unique so joining this
/// table never multiplies schedule rows.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "activity_pricing")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub activity_id: Uuid,
    pub pricing_type: PricingType,
    pub amount_cents: Option<i64>,
    pub currency: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::activity::Entity",
        from = "Column::ActivityId",
        to = "super::activity::Column::Id"
    )]
    Activity,
}

impl Related<super::activity::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Activity.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
