// Code generated by snowflake-sdk-generator. DO NOT EDIT.

#![allow(unused_imports)]
#![cfg_attr(rustfmt, rustfmt::skip)]

use super::common::{In, Like};
use super::sequences_ext::ValuesBehavior;
use crate::identifier::SchemaObjectIdentifier;
use super::sequences_dto_gen::*;
use super::sequences_ext::*;
use super::sequences_gen::*;
use crate::client::Client;
use crate::context::Context;
use crate::error::Result;

impl CreateSequenceRequest {
    pub(crate) fn to_opts(&self) -> CreateSequenceOptions {
        CreateSequenceOptions {
            or_replace: self.or_replace,
            if_not_exists: self.if_not_exists,
            name: self.name.clone(),
            start: self.start.clone(),
            increment: self.increment.clone(),
            values_behavior: self.values_behavior.clone(),
            comment: self.comment.clone(),
            ..Default::default()
        }
    }
}

impl AlterSequenceRequest {
    pub(crate) fn to_opts(&self) -> AlterSequenceOptions {
        AlterSequenceOptions {
            if_exists: self.if_exists,
            name: self.name.clone(),
            rename_to: self.rename_to.clone(),
            set_increment: self.set_increment.clone(),
            set: self.set.clone(),
            unset_comment: self.unset_comment,
            ..Default::default()
        }
    }
}

impl DropSequenceRequest {
    pub(crate) fn to_opts(&self) -> DropSequenceOptions {
        DropSequenceOptions {
            if_exists: self.if_exists,
            name: self.name.clone(),
            cascade: self.cascade,
            restrict: self.restrict,
            ..Default::default()
        }
    }
}

impl ShowSequenceRequest {
    pub(crate) fn to_opts(&self) -> ShowSequenceOptions {
        ShowSequenceOptions {
            like: self.like.clone(),
            r#in: self.r#in.clone(),
            ..Default::default()
        }
    }
}

/// `SEQUENCE` statements.
pub struct Sequences<'a> {
    pub(crate) client: &'a Client,
}

impl<'a> Sequences<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Sequences { client }
    }

    pub async fn create(&self, ctx: &Context, request: &CreateSequenceRequest) -> Result<()> {
        self.client.validate_and_exec(ctx, &request.to_opts()).await
    }

    pub async fn alter(&self, ctx: &Context, request: &AlterSequenceRequest) -> Result<()> {
        self.client.validate_and_exec(ctx, &request.to_opts()).await
    }

    pub async fn drop(&self, ctx: &Context, request: &DropSequenceRequest) -> Result<()> {
        self.client.validate_and_exec(ctx, &request.to_opts()).await
    }

    pub async fn show(&self, ctx: &Context, request: &ShowSequenceRequest) -> Result<Vec<Sequence>> {
        let rows: Vec<SequenceRow> = self.client.validate_and_query(ctx, &request.to_opts()).await?;
        Ok(rows.into_iter().map(Sequence::from).collect())
    }

    pub async fn describe(&self, ctx: &Context, id: &SchemaObjectIdentifier) -> Result<Sequence> {
        let opts = DescribeSequenceOptions {
            name: id.clone(),
            ..Default::default()
        };
        let row: SequenceRow = self.client.validate_and_query_one(ctx, &opts).await?;
        Ok(row.into())
    }
}
