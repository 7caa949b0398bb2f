//! Edit-permission resolution at the HTTP boundary.
//!
//! Authentication itself lives outside this service; deployments sit behind
//! a proxy that verifies the session and forwards the caller's role in the
//! `X-Role` header. This module converts that header into the explicit
//! [`EditAccess`] decision the scheduling engine expects, keeping the engine
//! free of any session or role state.

use axum::http::HeaderMap;

use crate::scheduler::EditAccess;

/// Header carrying the authenticated caller's role.
pub const ROLE_HEADER: &str = "x-role";

/// Roles allowed to mutate the timetable.
const EDITOR_ROLES: [&str; 2] = ["admin", "scheduler"];

/// Resolve the caller's edit permission from request headers.
pub fn edit_access(headers: &HeaderMap) -> EditAccess {
    let role = headers
        .get(ROLE_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");

    if EDITOR_ROLES.iter().any(|r| role.eq_ignore_ascii_case(r)) {
        EditAccess::granted()
    } else {
        EditAccess::denied()
    }
}
