use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Deserialize, Serialize)]
#[sea_orm(table_name = "courses")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    pub category: Category,
    pub instructor: Option<Json>,
    pub description: String,
    pub image: Option<String>,
    pub duration: Option<String>,
    pub level: Level,
    pub price: f64,
    pub lessons: Option<Json>,
    pub is_published: bool,
    pub enrolled_count: i32,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(
    EnumIter, DeriveActiveEnum, Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize, utoipa::ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum Category {
    #[sea_orm(string_value = "CINEMATOGRAPHY")]
    #[serde(rename = "CINEMATOGRAPHY")]
    Cinematography,
    #[sea_orm(string_value = "EDITING")]
    #[serde(rename = "EDITING")]
    Editing,
    #[sea_orm(string_value = "DIRECTING")]
    #[serde(rename = "DIRECTING")]
    Directing,
    #[sea_orm(string_value = "SOUND DESIGN")]
    #[serde(rename = "SOUND DESIGN")]
    SoundDesign,
    #[sea_orm(string_value = "SCREENWRITING")]
    #[serde(rename = "SCREENWRITING")]
    Screenwriting,
    #[sea_orm(string_value = "LIGHTING")]
    #[serde(rename = "LIGHTING")]
    Lighting,
    #[sea_orm(string_value = "PRODUCTION DESIGN")]
    #[serde(rename = "PRODUCTION DESIGN")]
    ProductionDesign,
    #[sea_orm(string_value = "COLOR GRADING")]
    #[serde(rename = "COLOR GRADING")]
    ColorGrading,
    #[sea_orm(string_value = "DOCUMENTARY")]
    #[serde(rename = "DOCUMENTARY")]
    Documentary,
}

#[derive(
    EnumIter, DeriveActiveEnum, Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize, utoipa::ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum Level {
    #[sea_orm(string_value = "Beginner")]
    Beginner,
    #[sea_orm(string_value = "Intermediate")]
    Intermediate,
    #[sea_orm(string_value = "Advanced")]
    Advanced,
}

/// Embedded instructor record held in the `instructor` JSON column.
#[derive(Clone, Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct Instructor {
    pub name: String,
    #[serde(default)]
    pub avatar: String,
    #[serde(default)]
    pub bio: String,
}

impl Default for Instructor {
    fn default() -> Self {
        Instructor {
            name: "Unknown".to_string(),
            avatar: String::new(),
            bio: String::new(),
        }
    }
}

/// One lesson entry in the ordered `lessons` JSON column.
#[derive(Clone, Debug, Default, Deserialize, Serialize, utoipa::ToSchema)]
pub struct Lesson {
    pub title: String,
    #[serde(default)]
    pub duration: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::course_enrollment::Entity")]
    CourseEnrollment,
}

impl Related<super::course_enrollment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CourseEnrollment.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
