use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Deserialize, Serialize)]
#[sea_orm(table_name = "mentorships")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub mentor_id: i32,
    pub mentee_id: i32,
    pub status: Status,
    pub specialties: Option<Json>,
    pub bio: Option<String>,
    pub years_experience: Option<i32>,
    pub available_slots: i32,
    /// Session history embedded as a JSON list; there is no separate table.
    pub sessions: Option<Json>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(
    EnumIter, DeriveActiveEnum, Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize, utoipa::ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "lowercase")]
pub enum Status {
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "active")]
    Active,
    #[sea_orm(string_value = "completed")]
    Completed,
    #[sea_orm(string_value = "cancelled")]
    Cancelled,
}

impl Status {
    /// pending -> active -> {completed, cancelled}; a pending request may
    /// also be cancelled outright. Completed and cancelled are terminal.
    pub fn can_transition_to(self, next: Status) -> bool {
        use Status::*;
        matches!(
            (self, next),
            (Pending, Active) | (Pending, Cancelled) | (Active, Completed) | (Active, Cancelled)
        )
    }
}

/// One entry in the `sessions` JSON column.
#[derive(Clone, Debug, Default, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub date: String,
    #[serde(default)]
    pub topic: String,
    #[serde(default)]
    pub notes: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::MentorId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    Mentor,
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::MenteeId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    Mentee,
}

impl ActiveModelBehavior for ActiveModel {}

#[cfg(test)]
mod tests {
    use super::Status;

    #[test]
    fn lifecycle_moves_forward_only() {
        assert!(Status::Pending.can_transition_to(Status::Active));
        assert!(Status::Pending.can_transition_to(Status::Cancelled));
        assert!(Status::Active.can_transition_to(Status::Completed));
        assert!(Status::Active.can_transition_to(Status::Cancelled));

        assert!(!Status::Active.can_transition_to(Status::Pending));
        assert!(!Status::Pending.can_transition_to(Status::Completed));
    }

    #[test]
    fn terminal_states_are_absorbing() {
        for next in [
            Status::Pending,
            Status::Active,
            Status::Completed,
            Status::Cancelled,
        ] {
            assert!(!Status::Completed.can_transition_to(next));
            assert!(!Status::Cancelled.can_transition_to(next));
        }
    }
}
