// Code generated by snowflake-sdk-generator. DO NOT EDIT.

#![allow(unused_imports)]
#![cfg_attr(rustfmt, rustfmt::skip)]

use super::common::{In, Like, LimitFrom, StartsWith, TagAssociation};
use crate::identifier::SchemaObjectIdentifier;
use crate::sql::RawSql;
use super::views_gen::*;

#[derive(Debug, Clone, PartialEq)]
pub struct CreateViewRequest {
    pub(crate) or_replace: bool,
    pub(crate) secure: bool,
    pub(crate) temporary: bool,
    pub(crate) recursive: bool,
    pub(crate) if_not_exists: bool,
    pub(crate) name: SchemaObjectIdentifier,
    pub(crate) columns: Vec<ViewColumn>,
    pub(crate) copy_grants: bool,
    pub(crate) comment: Option<String>,
    pub(crate) change_tracking: Option<bool>,
    pub(crate) tag: Vec<TagAssociation>,
    pub(crate) sql: RawSql,
}

impl CreateViewRequest {
    pub fn new(name: SchemaObjectIdentifier, sql: RawSql) -> Self {
        Self {
            or_replace: false,
            secure: false,
            temporary: false,
            recursive: false,
            if_not_exists: false,
            name,
            columns: Vec::new(),
            copy_grants: false,
            comment: None,
            change_tracking: None,
            tag: Vec::new(),
            sql,
        }
    }

    pub fn with_or_replace(mut self, or_replace: bool) -> Self {
        self.or_replace = or_replace;
        self
    }

    pub fn with_secure(mut self, secure: bool) -> Self {
        self.secure = secure;
        self
    }

    pub fn with_temporary(mut self, temporary: bool) -> Self {
        self.temporary = temporary;
        self
    }

    pub fn with_recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    pub fn with_if_not_exists(mut self, if_not_exists: bool) -> Self {
        self.if_not_exists = if_not_exists;
        self
    }

    pub fn with_columns(mut self, columns: Vec<ViewColumn>) -> Self {
        self.columns = columns;
        self
    }

    pub fn with_copy_grants(mut self, copy_grants: bool) -> Self {
        self.copy_grants = copy_grants;
        self
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    pub fn with_change_tracking(mut self, change_tracking: bool) -> Self {
        self.change_tracking = Some(change_tracking);
        self
    }

    pub fn with_tag(mut self, tag: Vec<TagAssociation>) -> Self {
        self.tag = tag;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AlterViewRequest {
    pub(crate) if_exists: bool,
    pub(crate) name: SchemaObjectIdentifier,
    pub(crate) rename_to: Option<SchemaObjectIdentifier>,
    pub(crate) set_comment: Option<String>,
    pub(crate) unset_comment: bool,
    pub(crate) set_secure: bool,
    pub(crate) unset_secure: bool,
    pub(crate) set_change_tracking: Option<bool>,
    pub(crate) set_tag: Vec<TagAssociation>,
    pub(crate) unset_tag: Vec<SchemaObjectIdentifier>,
}

impl AlterViewRequest {
    pub fn new(name: SchemaObjectIdentifier) -> Self {
        Self {
            if_exists: false,
            name,
            rename_to: None,
            set_comment: None,
            unset_comment: false,
            set_secure: false,
            unset_secure: false,
            set_change_tracking: None,
            set_tag: Vec::new(),
            unset_tag: Vec::new(),
        }
    }

    pub fn with_if_exists(mut self, if_exists: bool) -> Self {
        self.if_exists = if_exists;
        self
    }

    pub fn with_rename_to(mut self, rename_to: impl Into<SchemaObjectIdentifier>) -> Self {
        self.rename_to = Some(rename_to.into());
        self
    }

    pub fn with_set_comment(mut self, set_comment: impl Into<String>) -> Self {
        self.set_comment = Some(set_comment.into());
        self
    }

    pub fn with_unset_comment(mut self, unset_comment: bool) -> Self {
        self.unset_comment = unset_comment;
        self
    }

    pub fn with_set_secure(mut self, set_secure: bool) -> Self {
        self.set_secure = set_secure;
        self
    }

    pub fn with_unset_secure(mut self, unset_secure: bool) -> Self {
        self.unset_secure = unset_secure;
        self
    }

    pub fn with_set_change_tracking(mut self, set_change_tracking: bool) -> Self {
        self.set_change_tracking = Some(set_change_tracking);
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
pub struct DropViewRequest {
    pub(crate) if_exists: bool,
    pub(crate) name: SchemaObjectIdentifier,
}

impl DropViewRequest {
    pub fn new(name: SchemaObjectIdentifier) -> Self {
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
pub struct ShowViewRequest {
    pub(crate) terse: bool,
    pub(crate) like: Option<Like>,
    pub(crate) r#in: Option<In>,
    pub(crate) starts_with: Option<StartsWith>,
    pub(crate) limit: Option<LimitFrom>,
}

impl ShowViewRequest {
    pub fn new() -> Self {
        Self {
            terse: false,
            like: None,
            r#in: None,
            starts_with: None,
            limit: None,
        }
    }

    pub fn with_terse(mut self, terse: bool) -> Self {
        self.terse = terse;
        self
    }

    pub fn with_like(mut self, like: impl Into<Like>) -> Self {
        self.like = Some(like.into());
        self
    }

    pub fn with_in(mut self, r#in: impl Into<In>) -> Self {
        self.r#in = Some(r#in.into());
        self
    }

    pub fn with_starts_with(mut self, starts_with: impl Into<StartsWith>) -> Self {
        self.starts_with = Some(starts_with.into());
        self
    }

    pub fn with_limit(mut self, limit: impl Into<LimitFrom>) -> Self {
        self.limit = Some(limit.into());
        self
    }
}
