//! Authorization aggregation over joined role/page rows.

use crate::records::{AuthorizationRow, AuthorizationSet};

/// Fold joined rows into de-duplicated role and page sets.
///
/// Pure function: blank codes are skipped and duplicates collapse by set
/// membership.
pub fn aggregate_authorizations(rows: &[AuthorizationRow]) -> AuthorizationSet {
    let mut set = AuthorizationSet::default();
    for row in rows {
        if !row.role_code.trim().is_empty() {
            set.roles.insert(row.role_code.clone());
        }
        if !row.page_code.trim().is_empty() {
            set.pages.insert(row.page_code.clone());
        }
    }
    set
}
