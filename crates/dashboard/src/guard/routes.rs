//! Route classification tables.
//!
//! Kept as plain data - an allow-list and an ordered role/prefix table -
//! so the mapping can be tested on its own, independent of guard wiring.
//! Matching is a plain prefix check on the path string, exactly like the
//! original dashboard: `/company` covers `/company/5/edit`.

use ledger_core::Role;

/// Paths (and their sub-paths) that render without any session.
pub const PUBLIC_ROUTES: &[&str] = &["/login", "/forgot-password", "/unauthorized"];

/// Path prefixes each role may NOT render.
///
/// `branch` carries the same restrictions as `staff`: a branch account has
/// no business managing companies, staff, or branches. Roles missing from
/// this table fall back to the most restrictive entry, see
/// [`forbidden_prefixes`].
pub const FORBIDDEN_ROUTES: &[(Role, &[&str])] = &[
    (Role::Superadmin, &[]),
    (Role::Admin, &["/company"]),
    (Role::Staff, &["/company", "/staff", "/branch"]),
    (Role::Branch, &["/company", "/staff", "/branch"]),
];

/// Whether the route is on the public allow-list.
#[must_use]
pub fn is_public(route: &str) -> bool {
    PUBLIC_ROUTES.iter().any(|public| route.starts_with(public))
}

/// The forbidden prefixes for a role.
///
/// A role with no table entry (today only [`Role::Unknown`]) gets the
/// longest forbidden list in the table - unrecognized roles fail toward
/// least privilege instead of falling through to full access.
#[must_use]
pub fn forbidden_prefixes(role: Role) -> &'static [&'static str] {
    FORBIDDEN_ROUTES
        .iter()
        .find(|(entry_role, _)| *entry_role == role)
        .map_or_else(most_restrictive, |(_, prefixes)| prefixes)
}

/// Whether the route is forbidden for the role.
#[must_use]
pub fn is_forbidden(role: Role, route: &str) -> bool {
    forbidden_prefixes(role)
        .iter()
        .any(|prefix| route.starts_with(prefix))
}

fn most_restrictive() -> &'static [&'static str] {
    FORBIDDEN_ROUTES
        .iter()
        .map(|(_, prefixes)| *prefixes)
        .max_by_key(|prefixes| prefixes.len())
        .unwrap_or(&[])
}
