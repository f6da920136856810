// Code generated by snowflake-sdk-generator. DO NOT EDIT.

#![allow(unused_imports)]
#![cfg_attr(rustfmt, rustfmt::skip)]

use super::common::{In, Like};
use super::sequences_ext::ValuesBehavior;
use crate::identifier::SchemaObjectIdentifier;
use super::sequences_gen::*;

#[derive(Debug, Clone, PartialEq)]
pub struct CreateSequenceRequest {
    pub(crate) or_replace: bool,
    pub(crate) if_not_exists: bool,
    pub(crate) name: SchemaObjectIdentifier,
    pub(crate) start: Option<i64>,
    pub(crate) increment: Option<i64>,
    pub(crate) values_behavior: Option<ValuesBehavior>,
    pub(crate) comment: Option<String>,
}

impl CreateSequenceRequest {
    pub fn new(name: SchemaObjectIdentifier) -> Self {
        Self {
            or_replace: false,
            if_not_exists: false,
            name,
            start: None,
            increment: None,
            values_behavior: None,
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

    pub fn with_start(mut self, start: i64) -> Self {
        self.start = Some(start);
        self
    }

    pub fn with_increment(mut self, increment: i64) -> Self {
        self.increment = Some(increment);
        self
    }

    pub fn with_values_behavior(mut self, values_behavior: impl Into<ValuesBehavior>) -> Self {
        self.values_behavior = Some(values_behavior.into());
        self
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AlterSequenceRequest {
    pub(crate) if_exists: bool,
    pub(crate) name: SchemaObjectIdentifier,
    pub(crate) rename_to: Option<SchemaObjectIdentifier>,
    pub(crate) set_increment: Option<i64>,
    pub(crate) set: Option<SequenceSet>,
    pub(crate) unset_comment: bool,
}

impl AlterSequenceRequest {
    pub fn new(name: SchemaObjectIdentifier) -> Self {
        Self {
            if_exists: false,
            name,
            rename_to: None,
            set_increment: None,
            set: None,
            unset_comment: false,
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

    pub fn with_set_increment(mut self, set_increment: i64) -> Self {
        self.set_increment = Some(set_increment);
        self
    }

    pub fn with_set(mut self, set: impl Into<SequenceSet>) -> Self {
        self.set = Some(set.into());
        self
    }

    pub fn with_unset_comment(mut self, unset_comment: bool) -> Self {
        self.unset_comment = unset_comment;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DropSequenceRequest {
    pub(crate) if_exists: bool,
    pub(crate) name: SchemaObjectIdentifier,
    pub(crate) cascade: bool,
    pub(crate) restrict: bool,
}

impl DropSequenceRequest {
    pub fn new(name: SchemaObjectIdentifier) -> Self {
        Self {
            if_exists: false,
            name,
            cascade: false,
            restrict: false,
        }
    }

    pub fn with_if_exists(mut self, if_exists: bool) -> Self {
        self.if_exists = if_exists;
        self
    }

    pub fn with_cascade(mut self, cascade: bool) -> Self {
        self.cascade = cascade;
        self
    }

    pub fn with_restrict(mut self, restrict: bool) -> Self {
        self.restrict = restrict;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ShowSequenceRequest {
    pub(crate) like: Option<Like>,
    pub(crate) r#in: Option<In>,
}

impl ShowSequenceRequest {
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
