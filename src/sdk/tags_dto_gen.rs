// Code generated by snowflake-sdk-generator. DO NOT EDIT.

#![allow(unused_imports)]
#![cfg_attr(rustfmt, rustfmt::skip)]

use super::common::{In, Like};
use crate::identifier::SchemaObjectIdentifier;
use super::tags_gen::*;

#[derive(Debug, Clone, PartialEq)]
pub struct CreateTagRequest {
    pub(crate) or_replace: bool,
    pub(crate) if_not_exists: bool,
    pub(crate) name: SchemaObjectIdentifier,
    pub(crate) allowed_values: Option<AllowedValues>,
    pub(crate) comment: Option<String>,
}

impl CreateTagRequest {
    pub fn new(name: SchemaObjectIdentifier) -> Self {
        Self {
            or_replace: false,
            if_not_exists: false,
            name,
            allowed_values: None,
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

    pub fn with_allowed_values(mut self, allowed_values: impl Into<AllowedValues>) -> Self {
        self.allowed_values = Some(allowed_values.into());
        self
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }
}

/// A rename keeps the tag in its database.
#[derive(Debug, Clone, PartialEq)]
pub struct AlterTagRequest {
    pub(crate) if_exists: bool,
    pub(crate) name: SchemaObjectIdentifier,
    pub(crate) rename: Option<SchemaObjectIdentifier>,
    pub(crate) add: Option<AllowedValues>,
    pub(crate) drop: Option<AllowedValues>,
    pub(crate) set: Option<TagSet>,
    pub(crate) unset: Option<TagUnset>,
}

impl AlterTagRequest {
    pub fn new(name: SchemaObjectIdentifier) -> Self {
        Self {
            if_exists: false,
            name,
            rename: None,
            add: None,
            drop: None,
            set: None,
            unset: None,
        }
    }

    pub fn with_if_exists(mut self, if_exists: bool) -> Self {
        self.if_exists = if_exists;
        self
    }

    pub fn with_rename(mut self, rename: impl Into<SchemaObjectIdentifier>) -> Self {
        self.rename = Some(rename.into());
        self
    }

    pub fn with_add(mut self, add: impl Into<AllowedValues>) -> Self {
        self.add = Some(add.into());
        self
    }

    pub fn with_drop(mut self, drop: impl Into<AllowedValues>) -> Self {
        self.drop = Some(drop.into());
        self
    }

    pub fn with_set(mut self, set: impl Into<TagSet>) -> Self {
        self.set = Some(set.into());
        self
    }

    pub fn with_unset(mut self, unset: impl Into<TagUnset>) -> Self {
        self.unset = Some(unset.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DropTagRequest {
    pub(crate) if_exists: bool,
    pub(crate) name: SchemaObjectIdentifier,
}

impl DropTagRequest {
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
pub struct UndropTagRequest {
    pub(crate) name: SchemaObjectIdentifier,
}

impl UndropTagRequest {
    pub fn new(name: SchemaObjectIdentifier) -> Self {
        Self {
            name,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ShowTagRequest {
    pub(crate) like: Option<Like>,
    pub(crate) r#in: Option<In>,
}

impl ShowTagRequest {
    pub fn new() -> Self {
        Self {
            like: None,
            r#in: None,
        }
    }

    pub fn with_like(mut self, like: impl Into<Like>) -> Self {
        self.like = Some(like.into());
        self
    }

    pub fn with_in(mut self, r#in: impl Into<In>) -> Self {
        self.r#in = Some(r#in.into());
        self
    }
}
