use crate::models::contains_ci;
use crate::models::role::AppRole;
use super::types::{RoleStats, UserWithRoles};

/// Search over name, email and department; optional role filter.
pub fn filter_users<'a>(
    users: &'a [UserWithRoles],
    search: &str,
    role: Option<AppRole>,
) -> Vec<&'a UserWithRoles> {
    users
        .iter()
        .filter(|u| {
            let p = &u.profile;
            contains_ci(&p.full_name, search)
                || contains_ci(&p.email, search)
                || p.department.as_deref().is_some_and(|d| contains_ci(d, search))
        })
        .filter(|u| role.is_none_or(|r| u.roles.contains(r)))
        .collect()
}

/// Users counted once per role they hold.
pub fn role_stats(users: &[UserWithRoles]) -> RoleStats {
    let mut stats = RoleStats { total: users.len(), ..RoleStats::default() };
    for user in users {
        for role in user.roles.iter() {
            match role {
                AppRole::Staff => stats.staff += 1,
                AppRole::Committee => stats.committee += 1,
                AppRole::Chairman => stats.chairman += 1,
            }
        }
    }
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::Language;
    use crate::models::profile::Profile;
    use crate::models::role::RoleSet;
    use chrono::Utc;

    fn user(id: i64, name: &str, dept: Option<&str>, roles: &str) -> UserWithRoles {
        UserWithRoles {
            profile: Profile {
                id,
                user_id: id,
                full_name: name.to_string(),
                email: format!("{}@jpj.gov.my", name.to_lowercase().replace(' ', ".")),
                phone: None,
                department: dept.map(String::from),
                position: None,
                avatar_url: None,
                preferred_language: Language::Ms,
                created_at: Utc::now(),
                updated_at: Utc::now(),
            },
            roles: RoleSet::from_csv(roles),
        }
    }

    #[test]
    fn search_covers_name_email_and_department() {
        let users = vec![
            user(1, "Aminah Yusof", Some("Kewangan"), "staff"),
            user(2, "Rahman Ali", None, "committee"),
        ];
        assert_eq!(filter_users(&users, "kewangan", None).len(), 1);
        assert_eq!(filter_users(&users, "rahman.ali@", None).len(), 1);
        assert_eq!(filter_users(&users, "", None).len(), 2);
    }

    #[test]
    fn role_filter_matches_any_held_role() {
        let users = vec![
            user(1, "A", None, "staff"),
            user(2, "B", None, "staff,committee"),
            user(3, "C", None, "chairman"),
        ];
        let committee = filter_users(&users, "", Some(AppRole::Committee));
        assert_eq!(committee.len(), 1);
        assert_eq!(committee[0].profile.id, 2);

        let stats = role_stats(&users);
        assert_eq!(stats, RoleStats { total: 3, staff: 2, committee: 1, chairman: 1 });
    }
}
