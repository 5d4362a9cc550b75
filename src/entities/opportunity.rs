use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Deserialize, Serialize)]
#[sea_orm(table_name = "opportunities")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(column_name = "type")]
    pub kind: Kind,
    pub title: String,
    pub company: String,
    pub description: String,
    pub details: Option<Json>,
    pub funding: Option<String>,
    pub location: Option<String>,
    pub category: Option<String>,
    pub deadline: DateTime,
    pub is_active: bool,
    pub applications_count: i32,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(
    EnumIter, DeriveActiveEnum, Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize, utoipa::ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "UPPERCASE")]
pub enum Kind {
    #[sea_orm(string_value = "GRANT")]
    Grant,
    #[sea_orm(string_value = "JOB")]
    Job,
    #[sea_orm(string_value = "COMPETITION")]
    Competition,
    #[sea_orm(string_value = "COLLABORATION")]
    Collaboration,
    #[sea_orm(string_value = "INTERNSHIP")]
    Internship,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::opportunity_application::Entity")]
    OpportunityApplication,
}

impl Related<super::opportunity_application::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OpportunityApplication.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
