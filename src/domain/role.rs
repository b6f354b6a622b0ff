/// What a signed-in user is allowed to do. Roles are a closed set and every
/// capability decision goes through an exhaustive match, so adding a role or
/// capability forces every gate to be revisited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Admin,
    Manager,
    Seller,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    CreateOrders,
    ManageClients,
    ManageProducts,
    ViewStats,
    ExportStats,
    ChangeSettings,
}

impl Role {
    pub fn allows(self, capability: Capability) -> bool {
        use Capability::*;
        match self {
            Role::Admin => true,
            Role::Manager => match capability {
                CreateOrders | ManageClients | ManageProducts | ViewStats | ExportStats => true,
                ChangeSettings => false,
            },
            Role::Seller => match capability {
                CreateOrders | ManageClients => true,
                ManageProducts | ViewStats | ExportStats | ChangeSettings => false,
            },
        }
    }
}
