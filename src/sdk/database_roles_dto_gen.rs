// Code generated by snowflake-sdk-generator. DO NOT EDIT.

#![allow(unused_imports)]
#![cfg_attr(rustfmt, rustfmt::skip)]

use super::common::{Like, LimitFrom, TagAssociation};
use crate::identifier::{AccountObjectIdentifier, DatabaseObjectIdentifier, SchemaObjectIdentifier};
use super::database_roles_gen::*;

#[derive(Debug, Clone, PartialEq)]
pub struct CreateDatabaseRoleRequest {
    pub(crate) or_replace: bool,
    pub(crate) if_not_exists: bool,
    pub(crate) name: DatabaseObjectIdentifier,
    pub(crate) comment: Option<String>,
}

impl CreateDatabaseRoleRequest {
    pub fn new(name: DatabaseObjectIdentifier) -> Self {
        Self {
            or_replace: false,
            if_not_exists: false,
            name,
            comment: None,
        }
    }

    pub fn with_or_replace(mut self, or_replace: bool) -> Self {
        self.or_replace = or_replace;
        self
    }

    pub fn with_if_not_exists(mut self, if_not_exists: bool) -> Self {
        self.if_not_exists = if_not_exists;
        self
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }
}

/// The new name must stay in the database of the role.
#[derive(Debug, Clone, PartialEq)]
pub struct AlterDatabaseRoleRequest {
    pub(crate) if_exists: bool,
    pub(crate) name: DatabaseObjectIdentifier,
    pub(crate) rename: Option<DatabaseObjectIdentifier>,
    pub(crate) set: Option<DatabaseRoleSet>,
    pub(crate) unset: Option<DatabaseRoleUnset>,
    pub(crate) set_tag: Vec<TagAssociation>,
    pub(crate) unset_tag: Vec<SchemaObjectIdentifier>,
}

impl AlterDatabaseRoleRequest {
    pub fn new(name: DatabaseObjectIdentifier) -> Self {
        Self {
            if_exists: false,
            name,
            rename: None,
            set: None,
            unset: None,
            set_tag: Vec::new(),
            unset_tag: Vec::new(),
        }
    }

    pub fn with_if_exists(mut self, if_exists: bool) -> Self {
        self.if_exists = if_exists;
        self
    }

    pub fn with_rename(mut self, rename: impl Into<DatabaseObjectIdentifier>) -> Self {
        self.rename = Some(rename.into());
        self
    }

    pub fn with_set(mut self, set: impl Into<DatabaseRoleSet>) -> Self {
        self.set = Some(set.into());
        self
    }

    pub fn with_unset(mut self, unset: impl Into<DatabaseRoleUnset>) -> Self {
        self.unset = Some(unset.into());
        self
    }

    pub fn with_set_tag(mut self, set_tag: Vec<TagAssociation>) -> Self {
        self.set_tag = set_tag;
        self
    }

    pub fn with_unset_tag(mut self, unset_tag: Vec<SchemaObjectIdentifier>) -> Self {
        self.unset_tag = unset_tag;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DropDatabaseRoleRequest {
    pub(crate) if_exists: bool,
    pub(crate) name: DatabaseObjectIdentifier,
}

impl DropDatabaseRoleRequest {
    pub fn new(name: DatabaseObjectIdentifier) -> Self {
        Self {
            if_exists: false,
            name,
        }
    }

    pub fn with_if_exists(mut self, if_exists: bool) -> Self {
        self.if_exists = if_exists;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ShowDatabaseRoleRequest {
    pub(crate) like: Option<Like>,
    pub(crate) database: AccountObjectIdentifier,
    pub(crate) limit: Option<LimitFrom>,
}

impl ShowDatabaseRoleRequest {
    pub fn new(database: AccountObjectIdentifier) -> Self {
        Self {
            like: None,
            database,
            limit: None,
        }
    }

    pub fn with_like(mut self, like: impl Into<Like>) -> Self {
        self.like = Some(like.into());
        self
    }

    pub fn with_limit(mut self, limit: impl Into<LimitFrom>) -> Self {
        self.limit = Some(limit.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GrantDatabaseRoleRequest {
    pub(crate) name: DatabaseObjectIdentifier,
    pub(crate) to: DatabaseRoleGrantee,
}

impl GrantDatabaseRoleRequest {
    pub fn new(name: DatabaseObjectIdentifier, to: DatabaseRoleGrantee) -> Self {
        Self {
            name,
            to,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RevokeDatabaseRoleRequest {
    pub(crate) name: DatabaseObjectIdentifier,
    pub(crate) from: DatabaseRoleGrantee,
}

impl RevokeDatabaseRoleRequest {
    pub fn new(name: DatabaseObjectIdentifier, from: DatabaseRoleGrantee) -> Self {
        Self {
            name,
            from,
        }
    }
}
