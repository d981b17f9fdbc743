// src/services/policy.rs

//! Authorization policy and organization scoping.
//!
//! Everything here is pure: no IO, no panics. Callers resolve the actor
//! (token middleware) and, where a rule depends on the target, load the
//! target within the actor's organization before asking for a decision.
//! A denial is always an error; the policy never narrows scope silently.

use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::auth::{Actor, Department, Role},
};

/// Kinds of operation the policy decides on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    CreateOrganization,
    /// List or manage the users of an organization.
    ManageUsers,
    CreateUser { role: Role },
    DeleteUser { target_role: Role },
    AssignDepartment,
    StockRead,
    StockWrite,
    /// Record or list sales.
    Sales,
    /// Profit/loss summary and loss history.
    Analytics,
    /// Suppliers and shipments: read, create, status update.
    Shipments,
    RateShipment,
}

/// Decides whether `actor` may perform `op`. First matching rule wins.
pub fn authorize(actor: &Actor, op: Operation) -> Result<(), AppError> {
    use Operation::*;
    use Role::*;

    let allowed = match (op, actor.role) {
        (CreateOrganization, Owner) => true,
        (CreateOrganization, _) => false,

        (ManageUsers, Owner | Admin) => true,
        (ManageUsers, Employee) => false,

        (CreateUser { role }, Owner) => matches!(role, Admin | Employee),
        (CreateUser { role }, Admin) => role == Employee,
        (CreateUser { .. }, Employee) => false,

        // Owners are never deletable through this path, themselves included.
        (DeleteUser { target_role }, Owner) => target_role != Owner,
        (DeleteUser { target_role }, Admin) => target_role == Employee,
        (DeleteUser { .. }, Employee) => false,

        (AssignDepartment, Owner | Admin) => true,
        (AssignDepartment, Employee) => false,

        (StockWrite, Owner | Admin) => true,
        (StockWrite, Employee) => actor.department == Some(Department::Stock),

        (StockRead | Sales, Owner | Admin) => true,
        (StockRead | Sales, Employee) => actor.department.is_some(),

        (Analytics | RateShipment, Owner | Admin) => true,
        (Analytics | RateShipment, Employee) => false,

        (Shipments, _) => true,
    };

    if allowed {
        Ok(())
    } else {
        Err(AppError::permission_denied(denial_message(op)))
    }
}

fn denial_message(op: Operation) -> &'static str {
    match op {
        Operation::CreateOrganization => "Only owners can create organizations",
        Operation::ManageUsers => "Insufficient permissions to manage users",
        Operation::CreateUser { .. } => "Insufficient permissions to create a user with this role",
        Operation::DeleteUser { .. } => "Insufficient permissions to delete this user",
        Operation::AssignDepartment => "Insufficient permissions to assign departments",
        Operation::StockRead => "Insufficient permissions to view stock",
        Operation::StockWrite => "Insufficient permissions for stock management",
        Operation::Sales => "Insufficient permissions for sales management",
        Operation::Analytics => "Restricted to owners and admins",
        Operation::Shipments => "Insufficient permissions for supplier management",
        Operation::RateShipment => "Only admins and owners can rate shipments",
    }
}

/// Resolves the organization an operation runs against.
///
/// Owners may select any organization they created and fall back to their
/// assigned one. Everyone else is pinned to their assigned organization and
/// `requested` is ignored.
pub fn resolve_org_scope(actor: &Actor, requested: Option<Uuid>) -> Result<Uuid, AppError> {
    match (actor.role, requested) {
        (Role::Owner, Some(org_id)) if actor.owns(org_id) => Ok(org_id),
        // Same answer whether the organization exists or not.
        (Role::Owner, Some(_)) => Err(AppError::permission_denied("You do not own this organization")),
        (_, _) => actor
            .org_id
            .ok_or_else(|| AppError::InvalidInput("Organization context missing".to_string())),
    }
}

/// `authorize` then `resolve_org_scope`; the usual guard for scoped operations.
pub fn authorize_in(actor: &Actor, op: Operation, requested: Option<Uuid>) -> Result<Uuid, AppError> {
    authorize(actor, op)?;
    resolve_org_scope(actor, requested)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::error::ErrorKind;

    fn actor(role: Role, department: Option<Department>) -> Actor {
        let org = Uuid::new_v4();
        Actor {
            id: Uuid::new_v4(),
            org_id: Some(org),
            role,
            department,
            owned_orgs: if role == Role::Owner { vec![org] } else { vec![] },
        }
    }

    fn denied(result: Result<(), AppError>) -> bool {
        matches!(result, Err(e) if e.kind() == ErrorKind::PermissionDenied)
    }

    #[test]
    fn only_owners_create_organizations() {
        assert!(authorize(&actor(Role::Owner, None), Operation::CreateOrganization).is_ok());
        assert!(denied(authorize(&actor(Role::Admin, None), Operation::CreateOrganization)));
        assert!(denied(authorize(&actor(Role::Employee, Some(Department::Stock)), Operation::CreateOrganization)));
    }

    #[test]
    fn user_creation_rules() {
        let owner = actor(Role::Owner, None);
        let admin = actor(Role::Admin, None);
        let employee = actor(Role::Employee, Some(Department::Sales));

        assert!(authorize(&owner, Operation::CreateUser { role: Role::Admin }).is_ok());
        assert!(authorize(&owner, Operation::CreateUser { role: Role::Employee }).is_ok());
        assert!(denied(authorize(&owner, Operation::CreateUser { role: Role::Owner })));

        assert!(authorize(&admin, Operation::CreateUser { role: Role::Employee }).is_ok());
        assert!(denied(authorize(&admin, Operation::CreateUser { role: Role::Admin })));

        assert!(denied(authorize(&employee, Operation::CreateUser { role: Role::Employee })));
    }

    #[test]
    fn user_deletion_rules() {
        let owner = actor(Role::Owner, None);
        let admin = actor(Role::Admin, None);

        assert!(authorize(&owner, Operation::DeleteUser { target_role: Role::Admin }).is_ok());
        assert!(authorize(&owner, Operation::DeleteUser { target_role: Role::Employee }).is_ok());
        assert!(denied(authorize(&owner, Operation::DeleteUser { target_role: Role::Owner })));

        // An admin deleting another admin is denied; an employee is fine.
        assert!(denied(authorize(&admin, Operation::DeleteUser { target_role: Role::Admin })));
        assert!(authorize(&admin, Operation::DeleteUser { target_role: Role::Employee }).is_ok());

        let employee = actor(Role::Employee, Some(Department::Stock));
        assert!(denied(authorize(&employee, Operation::DeleteUser { target_role: Role::Employee })));
    }

    #[test]
    fn sales_employee_reads_but_cannot_write_stock() {
        let sales = actor(Role::Employee, Some(Department::Sales));
        assert!(authorize(&sales, Operation::StockRead).is_ok());
        assert!(denied(authorize(&sales, Operation::StockWrite)));
        assert!(authorize(&sales, Operation::Sales).is_ok());
    }

    #[test]
    fn stock_employee_writes_stock() {
        let stock = actor(Role::Employee, Some(Department::Stock));
        assert!(authorize(&stock, Operation::StockWrite).is_ok());
        assert!(authorize(&stock, Operation::StockRead).is_ok());
        assert!(authorize(&stock, Operation::Sales).is_ok());
    }

    #[test]
    fn employee_without_department_sees_nothing_departmental() {
        let idle = actor(Role::Employee, None);
        assert!(denied(authorize(&idle, Operation::StockRead)));
        assert!(denied(authorize(&idle, Operation::Sales)));
        assert!(authorize(&idle, Operation::Shipments).is_ok());
    }

    #[test]
    fn analytics_and_rating_are_owner_admin_only() {
        for op in [Operation::Analytics, Operation::RateShipment, Operation::AssignDepartment] {
            assert!(authorize(&actor(Role::Owner, None), op).is_ok());
            assert!(authorize(&actor(Role::Admin, None), op).is_ok());
            assert!(denied(authorize(&actor(Role::Employee, Some(Department::Stock)), op)));
        }
    }

    #[test]
    fn owner_may_select_any_owned_org() {
        let mut owner = actor(Role::Owner, None);
        let second = Uuid::new_v4();
        owner.owned_orgs.push(second);

        assert_eq!(resolve_org_scope(&owner, Some(second)).unwrap(), second);
        assert_eq!(resolve_org_scope(&owner, None).unwrap(), owner.org_id.unwrap());
    }

    #[test]
    fn owner_cannot_select_foreign_org() {
        let owner = actor(Role::Owner, None);
        let err = resolve_org_scope(&owner, Some(Uuid::new_v4())).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::PermissionDenied);
    }

    #[test]
    fn non_owners_are_pinned_to_their_org() {
        let admin = actor(Role::Admin, None);
        let assigned = admin.org_id.unwrap();
        assert_eq!(resolve_org_scope(&admin, Some(Uuid::new_v4())).unwrap(), assigned);
        assert_eq!(resolve_org_scope(&admin, None).unwrap(), assigned);
    }

    #[test]
    fn missing_org_context_is_a_validation_error() {
        let mut employee = actor(Role::Employee, Some(Department::Stock));
        employee.org_id = None;
        let err = resolve_org_scope(&employee, None).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn deny_is_reported_before_scope() {
        let mut employee = actor(Role::Employee, Some(Department::Sales));
        employee.org_id = None;
        let err = authorize_in(&employee, Operation::StockWrite, None).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::PermissionDenied);
    }
}
