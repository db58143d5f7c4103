//! Ownership and access rules
//!
//! The single place that decides whether an acting user may touch a mutable
//! row. Every mutating endpoint routes its decision through here; a denial
//! never mutates anything and is surfaced as a flash message plus redirect.

use crate::models::{Role, SessionUser, Task};

/// May the actor update or delete this task?
///
/// The owner always may; a primary (broadcast) task has no owner and is
/// editable by administrators only.
pub fn can_modify_task(actor: &SessionUser, task: &Task) -> bool {
    if task.user_id == Some(actor.id) {
        return true;
    }
    task.is_primary && actor.is_admin()
}

/// May the actor manage catalog resources (workshops, team roster, categories)?
pub fn can_manage_catalog(actor: &SessionUser) -> bool {
    actor.is_admin()
}

/// May the actor assign this role to the target account?
///
/// An admin may never downgrade their own role; everything else is allowed
/// here because the admin panel is already admin-gated.
pub fn role_change_allowed(actor: &SessionUser, target_id: i64, new_role: Role) -> bool {
    !(actor.id == target_id && actor.is_admin() && new_role != Role::Admin)
}

/// May the actor delete the target account?
///
/// Self-deletion of the acting admin is rejected.
pub fn can_delete_user(actor: &SessionUser, target_id: i64) -> bool {
    actor.id != target_id
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn session_user(id: i64, role: Role) -> SessionUser {
        SessionUser {
            id,
            username: format!("user{id}"),
            email: format!("user{id}@example.com"),
            role,
            name: None,
            nickname: None,
            avatar_path: None,
        }
    }

    fn task(owner: Option<i64>, is_primary: bool) -> Task {
        Task {
            id: 1,
            user_id: owner,
            category_id: None,
            title: "t".to_string(),
            description: String::new(),
            completed: false,
            is_primary,
            created_by: owner,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_owner_may_modify_own_task() {
        let actor = session_user(1, Role::User);
        assert!(can_modify_task(&actor, &task(Some(1), false)));
    }

    #[test]
    fn test_non_owner_is_denied() {
        let actor = session_user(2, Role::User);
        assert!(!can_modify_task(&actor, &task(Some(1), false)));
    }

    #[test]
    fn test_admin_may_modify_primary_but_not_personal() {
        let admin = session_user(9, Role::Admin);
        assert!(can_modify_task(&admin, &task(None, true)));
        assert!(!can_modify_task(&admin, &task(Some(1), false)));
    }

    #[test]
    fn test_regular_user_cannot_touch_primary() {
        let actor = session_user(2, Role::User);
        assert!(!can_modify_task(&actor, &task(None, true)));
    }

    #[test]
    fn test_catalog_is_admin_only() {
        assert!(can_manage_catalog(&session_user(1, Role::Admin)));
        assert!(!can_manage_catalog(&session_user(1, Role::User)));
    }

    #[test]
    fn test_admin_cannot_downgrade_own_role() {
        let admin = session_user(5, Role::Admin);
        assert!(!role_change_allowed(&admin, 5, Role::User));
        assert!(role_change_allowed(&admin, 5, Role::Admin));
        assert!(role_change_allowed(&admin, 6, Role::User));
    }

    #[test]
    fn test_admin_cannot_delete_self() {
        let admin = session_user(5, Role::Admin);
        assert!(!can_delete_user(&admin, 5));
        assert!(can_delete_user(&admin, 6));
    }
}
