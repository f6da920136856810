// Code generated by snowflake-sdk-generator. DO NOT EDIT.

#![allow(unused_imports)]
#![cfg_attr(rustfmt, rustfmt::skip)]

use super::common::{In, Like, LimitFrom, StartsWith, TagAssociation};
use crate::identifier::SchemaObjectIdentifier;
use super::streams_gen::*;

#[derive(Debug, Clone, PartialEq)]
pub struct CreateStreamOnTableRequest {
    pub(crate) or_replace: bool,
    pub(crate) if_not_exists: bool,
    pub(crate) name: SchemaObjectIdentifier,
    pub(crate) tag: Vec<TagAssociation>,
    pub(crate) copy_grants: bool,
    pub(crate) table_id: SchemaObjectIdentifier,
    pub(crate) on: Option<OnStream>,
    pub(crate) append_only: Option<bool>,
    pub(crate) show_initial_rows: Option<bool>,
    pub(crate) comment: Option<String>,
}

impl CreateStreamOnTableRequest {
    pub fn new(name: SchemaObjectIdentifier, table_id: SchemaObjectIdentifier) -> Self {
        Self {
            or_replace: false,
            if_not_exists: false,
            name,
            tag: Vec::new(),
            copy_grants: false,
            table_id,
            on: None,
            append_only: None,
            show_initial_rows: None,
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

    pub fn with_tag(mut self, tag: Vec<TagAssociation>) -> Self {
        self.tag = tag;
        self
    }

    pub fn with_copy_grants(mut self, copy_grants: bool) -> Self {
        self.copy_grants = copy_grants;
        self
    }

    pub fn with_on(mut self, on: impl Into<OnStream>) -> Self {
        self.on = Some(on.into());
        self
    }

    pub fn with_append_only(mut self, append_only: bool) -> Self {
        self.append_only = Some(append_only);
        self
    }

    pub fn with_show_initial_rows(mut self, show_initial_rows: bool) -> Self {
        self.show_initial_rows = Some(show_initial_rows);
        self
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreateStreamOnExternalTableRequest {
    pub(crate) or_replace: bool,
    pub(crate) if_not_exists: bool,
    pub(crate) name: SchemaObjectIdentifier,
    pub(crate) tag: Vec<TagAssociation>,
    pub(crate) copy_grants: bool,
    pub(crate) external_table_id: SchemaObjectIdentifier,
    pub(crate) on: Option<OnStream>,
    pub(crate) insert_only: Option<bool>,
    pub(crate) comment: Option<String>,
}

impl CreateStreamOnExternalTableRequest {
    pub fn new(name: SchemaObjectIdentifier, external_table_id: SchemaObjectIdentifier) -> Self {
        Self {
            or_replace: false,
            if_not_exists: false,
            name,
            tag: Vec::new(),
            copy_grants: false,
            external_table_id,
            on: None,
            insert_only: None,
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

    pub fn with_tag(mut self, tag: Vec<TagAssociation>) -> Self {
        self.tag = tag;
        self
    }

    pub fn with_copy_grants(mut self, copy_grants: bool) -> Self {
        self.copy_grants = copy_grants;
        self
    }

    pub fn with_on(mut self, on: impl Into<OnStream>) -> Self {
        self.on = Some(on.into());
        self
    }

    pub fn with_insert_only(mut self, insert_only: bool) -> Self {
        self.insert_only = Some(insert_only);
        self
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreateStreamOnViewRequest {
    pub(crate) or_replace: bool,
    pub(crate) if_not_exists: bool,
    pub(crate) name: SchemaObjectIdentifier,
    pub(crate) tag: Vec<TagAssociation>,
    pub(crate) copy_grants: bool,
    pub(crate) view_id: SchemaObjectIdentifier,
    pub(crate) on: Option<OnStream>,
    pub(crate) append_only: Option<bool>,
    pub(crate) show_initial_rows: Option<bool>,
    pub(crate) comment: Option<String>,
}

impl CreateStreamOnViewRequest {
    pub fn new(name: SchemaObjectIdentifier, view_id: SchemaObjectIdentifier) -> Self {
        Self {
            or_replace: false,
            if_not_exists: false,
            name,
            tag: Vec::new(),
            copy_grants: false,
            view_id,
            on: None,
            append_only: None,
            show_initial_rows: None,
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

    pub fn with_tag(mut self, tag: Vec<TagAssociation>) -> Self {
        self.tag = tag;
        self
    }

    pub fn with_copy_grants(mut self, copy_grants: bool) -> Self {
        self.copy_grants = copy_grants;
        self
    }

    pub fn with_on(mut self, on: impl Into<OnStream>) -> Self {
        self.on = Some(on.into());
        self
    }

    pub fn with_append_only(mut self, append_only: bool) -> Self {
        self.append_only = Some(append_only);
        self
    }

    pub fn with_show_initial_rows(mut self, show_initial_rows: bool) -> Self {
        self.show_initial_rows = Some(show_initial_rows);
        self
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CloneStreamRequest {
    pub(crate) or_replace: bool,
    pub(crate) name: SchemaObjectIdentifier,
    pub(crate) source_stream: SchemaObjectIdentifier,
    pub(crate) copy_grants: bool,
}

impl CloneStreamRequest {
    pub fn new(name: SchemaObjectIdentifier, source_stream: SchemaObjectIdentifier) -> Self {
        Self {
            or_replace: false,
            name,
            source_stream,
            copy_grants: false,
        }
    }

    pub fn with_or_replace(mut self, or_replace: bool) -> Self {
        self.or_replace = or_replace;
        self
    }

    pub fn with_copy_grants(mut self, copy_grants: bool) -> Self {
        self.copy_grants = copy_grants;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AlterStreamRequest {
    pub(crate) if_exists: bool,
    pub(crate) name: SchemaObjectIdentifier,
    pub(crate) set_comment: Option<String>,
    pub(crate) unset_comment: bool,
    pub(crate) set_tag: Vec<TagAssociation>,
    pub(crate) unset_tag: Vec<SchemaObjectIdentifier>,
}

impl AlterStreamRequest {
    pub fn new(name: SchemaObjectIdentifier) -> Self {
        Self {
            if_exists: false,
            name,
            set_comment: None,
            unset_comment: false,
            set_tag: Vec::new(),
            unset_tag: Vec::new(),
        }
    }

    pub fn with_if_exists(mut self, if_exists: bool) -> Self {
        self.if_exists = if_exists;
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
pub struct DropStreamRequest {
    pub(crate) if_exists: bool,
    pub(crate) name: SchemaObjectIdentifier,
}

impl DropStreamRequest {
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
pub struct ShowStreamRequest {
    pub(crate) terse: bool,
    pub(crate) like: Option<Like>,
    pub(crate) r#in: Option<In>,
    pub(crate) starts_with: Option<StartsWith>,
    pub(crate) limit: Option<LimitFrom>,
}

impl ShowStreamRequest {
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
