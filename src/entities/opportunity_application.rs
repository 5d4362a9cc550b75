use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Deserialize, Serialize)]
#[sea_orm(table_name = "opportunity_applications")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_id: i32,
    pub opportunity_id: i32,
    pub cover_letter: String,
    pub status: Status,
    pub applied_at: DateTime,
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
    #[sea_orm(string_value = "reviewed")]
    Reviewed,
    #[sea_orm(string_value = "shortlisted")]
    Shortlisted,
    #[sea_orm(string_value = "rejected")]
    Rejected,
    #[sea_orm(string_value = "accepted")]
    Accepted,
}

impl Status {
    /// Forward-only review flow: pending -> {reviewed, shortlisted} ->
    /// {accepted, rejected}. Accepted and rejected are terminal.
    pub fn can_transition_to(self, next: Status) -> bool {
        use Status::*;
        matches!(
            (self, next),
            (Pending, Reviewed)
                | (Pending, Shortlisted)
                | (Reviewed, Shortlisted)
                | (Reviewed, Accepted)
                | (Reviewed, Rejected)
                | (Shortlisted, Accepted)
                | (Shortlisted, Rejected)
        )
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    User,
    #[sea_orm(
        belongs_to = "super::opportunity::Entity",
        from = "Column::OpportunityId",
        to = "super::opportunity::Column::Id",
        on_delete = "Cascade"
    )]
    Opportunity,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::opportunity::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Opportunity.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[cfg(test)]
mod tests {
    use super::Status;

    #[test]
    fn review_flow_moves_forward_only() {
        assert!(Status::Pending.can_transition_to(Status::Reviewed));
        assert!(Status::Pending.can_transition_to(Status::Shortlisted));
        assert!(Status::Reviewed.can_transition_to(Status::Accepted));
        assert!(Status::Shortlisted.can_transition_to(Status::Rejected));

        assert!(!Status::Reviewed.can_transition_to(Status::Pending));
        assert!(!Status::Shortlisted.can_transition_to(Status::Reviewed));
    }

    #[test]
    fn terminal_states_are_absorbing() {
        for next in [
            Status::Pending,
            Status::Reviewed,
            Status::Shortlisted,
            Status::Rejected,
            Status::Accepted,
        ] {
            assert!(!Status::Accepted.can_transition_to(next));
            assert!(!Status::Rejected.can_transition_to(next));
        }
    }
}
