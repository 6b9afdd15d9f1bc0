//! Authenticated principals.
//!
//! The admin service and the guest storefront authenticate differently
//! (server-side session vs. signed token) and grant different capabilities.
//! Both resolve to a type implementing [`Principal`] so request-guarding
//! and audit code can treat them uniformly.

use serde::Serialize;

use crate::types::DbId;

/// Role name carried by admin accounts.
pub const ROLE_ADMIN: &str = "admin";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PrincipalKind {
    Admin,
    Customer,
}

pub trait Principal {
    fn kind(&self) -> PrincipalKind;

    /// Database id of the admin user or customer.
    fn subject_id(&self) -> DbId;

    /// Username for admins, email for customers.
    fn login(&self) -> &str;

    /// Public description, safe to return from `/me` endpoints.
    fn info(&self) -> PrincipalInfo {
        PrincipalInfo {
            kind: self.kind(),
            id: self.subject_id(),
            login: self.login().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PrincipalInfo {
    pub kind: PrincipalKind,
    pub id: DbId,
    pub login: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed;

    impl Principal for Fixed {
        fn kind(&self) -> PrincipalKind {
            PrincipalKind::Customer
        }
        fn subject_id(&self) -> DbId {
            9
        }
        fn login(&self) -> &str {
            "c@example.com"
        }
    }

    #[test]
    fn info_serializes_kind_in_snake_case() {
        let json = serde_json::to_value(Fixed.info()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "kind": "customer", "id": 9, "login": "c@example.com" })
        );
    }
}
