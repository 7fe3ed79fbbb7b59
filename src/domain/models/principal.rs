#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Admin,
    Customer,
}

impl Role {
    /// Parses a role claim, accepting the legacy short names.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "admin" | "adm" => Some(Role::Admin),
            "customer" | "cliente" => Some(Role::Customer),
            _ => None,
        }
    }
}

/// What a caller is allowed to do against the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    ManageProducts,
    BrowseProducts,
    ReadResellerFeed,
}

/// Authenticated caller, whichever credential scheme was used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Principal {
    User { subject: String, roles: Vec<Role> },
    Reseller,
}

impl Principal {
    /// Name used when logging who did what.
    pub fn name(&self) -> &str {
        match self {
            Principal::User { subject, .. } => subject,
            Principal::Reseller => "reseller",
        }
    }

    pub fn can(&self, capability: Capability) -> bool {
        match (self, capability) {
            (Principal::User { roles, .. }, Capability::ManageProducts) => {
                roles.contains(&Role::Admin)
            }
            (Principal::User { roles, .. }, Capability::BrowseProducts) => {
                roles.contains(&Role::Admin) || roles.contains(&Role::Customer)
            }
            (Principal::Reseller, Capability::ReadResellerFeed) => true,
            _ => false,
        }
    }
}
