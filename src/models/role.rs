use serde::Serialize;

text_enum! {
    /// Declared in ascending order of authority.
    #[derive(PartialOrd, Ord)]
    pub enum AppRole {
        Staff = "staff" => "role.staff",
        Committee = "committee" => "role.committee",
        Chairman = "chairman" => "role.chairman",
    }
}

impl AppRole {
    pub fn is_admin(self) -> bool {
        matches!(self, AppRole::Committee | AppRole::Chairman)
    }
}

/// Roles held by one user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RoleSet(Vec<AppRole>);

impl RoleSet {
    pub fn new(mut roles: Vec<AppRole>) -> Self {
        roles.sort();
        roles.dedup();
        RoleSet(roles)
    }

    /// Parse a comma-separated aggregate; unknown codes are skipped.
    pub fn from_csv(csv: &str) -> Self {
        Self::new(csv.split(',').filter_map(|s| s.parse().ok()).collect())
    }

    pub fn contains(&self, role: AppRole) -> bool {
        self.0.contains(&role)
    }

    pub fn is_admin(&self) -> bool {
        self.0.iter().any(|r| r.is_admin())
    }

    /// Highest-ranking role, `staff` when none are held.
    pub fn highest(&self) -> AppRole {
        self.0.last().copied().unwrap_or(AppRole::Staff)
    }

    pub fn iter(&self) -> impl Iterator<Item = AppRole> + '_ {
        self.0.iter().copied()
    }

    pub fn codes(&self) -> Vec<&'static str> {
        self.0.iter().map(|r| r.as_str()).collect()
    }
}
