//! Note access policy.
//!
//! Decides which notes a viewer may see, create, or edit based on role
//! membership. Every function here is pure: the API layer builds a
//! [`Viewer`] from the request and asks the policy, and the repository layer
//! turns the answer into a SQL predicate.

use serde::Serialize;

use crate::error::CoreError;
use crate::roles::Role;
use crate::types::DbId;

/// The identity making a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Viewer {
    /// No valid credentials were presented.
    Anonymous,
    /// An authenticated user.
    User(ViewerIdentity),
}

/// Role membership and staff flag of an authenticated user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewerIdentity {
    pub user_id: DbId,
    pub roles: Vec<Role>,
    /// Administrative override: sees everything merch_ops sees.
    pub is_staff: bool,
}

impl Viewer {
    pub fn user(user_id: DbId, roles: Vec<Role>, is_staff: bool) -> Self {
        Self::User(ViewerIdentity {
            user_id,
            roles,
            is_staff,
        })
    }

    pub fn user_id(&self) -> Option<DbId> {
        match self {
            Self::Anonymous => None,
            Self::User(identity) => Some(identity.user_id),
        }
    }

    pub fn has_role(&self, role: Role) -> bool {
        match self {
            Self::Anonymous => false,
            Self::User(identity) => identity.roles.contains(&role),
        }
    }

    pub fn is_staff(&self) -> bool {
        matches!(self, Self::User(identity) if identity.is_staff)
    }
}

/// Which notes on a SKU a viewer is allowed to list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteScope {
    /// The viewer sees no notes at all.
    None,
    /// Every note on the SKU.
    All,
    /// Only notes authored by the given user.
    AuthoredBy(DbId),
}

/// Resolve the note listing scope for a viewer.
///
/// Rules are evaluated top-down and the first match wins:
///
/// 1. anonymous viewers see nothing;
/// 2. `merch_ops` members and staff see every note;
/// 3. `brand_user` members see only their own notes;
/// 4. everyone else sees nothing.
pub fn note_scope(viewer: &Viewer) -> NoteScope {
    let Viewer::User(identity) = viewer else {
        return NoteScope::None;
    };
    if identity.is_staff || identity.roles.contains(&Role::MerchOps) {
        NoteScope::All
    } else if identity.roles.contains(&Role::BrandUser) {
        NoteScope::AuthoredBy(identity.user_id)
    } else {
        NoteScope::None
    }
}

/// Whether the viewer may create notes.
pub fn can_create_note(viewer: &Viewer) -> bool {
    viewer.has_role(Role::BrandUser)
}

/// Authorize a note creation, returning the user id to record as author.
///
/// The author is always the viewer; callers must not accept an author from
/// the request body.
pub fn authorize_note_creation(viewer: &Viewer) -> Result<DbId, CoreError> {
    match viewer.user_id() {
        Some(user_id) if can_create_note(viewer) => Ok(user_id),
        Some(_) => Err(CoreError::Forbidden(format!(
            "The '{}' role is required to add notes",
            Role::BrandUser
        ))),
        None => Err(CoreError::Unauthorized("Authentication required".into())),
    }
}

/// The author whose notes the viewer may retrieve or edit individually.
///
/// `None` means the candidate set is empty; callers report any lookup as
/// not-found so the existence of other users' notes is not revealed.
pub fn note_edit_scope(viewer: &Viewer) -> Option<DbId> {
    if can_create_note(viewer) {
        viewer.user_id()
    } else {
        None
    }
}

/// UI gating flags rendered into the HTML pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageFlags {
    pub can_add_note: bool,
    pub is_merch_ops: bool,
}

impl PageFlags {
    pub fn for_viewer(viewer: &Viewer) -> Self {
        Self {
            can_add_note: can_create_note(viewer),
            is_merch_ops: viewer.has_role(Role::MerchOps),
        }
    }
}
