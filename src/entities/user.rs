use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Deserialize, Serialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    #[sea_orm(unique)]
    pub email: String,
    /// NULL for accounts created through social login.
    pub password: Option<String>,
    pub user_type: Role,
    pub avatar: Option<String>,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub website: Option<String>,
    pub specialization: Option<Json>,
    pub social_provider: Option<String>,
    pub social_provider_id: Option<String>,
    pub followers: i32,
    pub following: i32,
    pub projects: i32,
    pub awards: i32,
    pub is_verified: bool,
    pub last_login: Option<DateTime>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(
    EnumIter, DeriveActiveEnum, Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize, utoipa::ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[sea_orm(string_value = "filmmaker")]
    Filmmaker,
    #[sea_orm(string_value = "mentor")]
    Mentor,
    #[sea_orm(string_value = "sponsor")]
    Sponsor,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::portfolio::Entity")]
    Portfolio,
    #[sea_orm(has_many = "super::course_enrollment::Entity")]
    CourseEnrollment,
    #[sea_orm(has_many = "super::opportunity_application::Entity")]
    OpportunityApplication,
}

impl Related<super::portfolio::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Portfolio.def()
    }
}

impl Related<super::course_enrollment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CourseEnrollment.def()
    }
}

impl Related<super::opportunity_application::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OpportunityApplication.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
