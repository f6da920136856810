// Code generated by snowflake-sdk-generator. DO NOT EDIT.

#![allow(unused_imports)]
#![cfg_attr(rustfmt, rustfmt::skip)]

use super::common::{In, Like};
use crate::identifier::SchemaObjectIdentifier;
use super::tags_dto_gen::*;
use super::tags_ext::*;
use super::tags_gen::*;
use crate::client::Client;
use crate::context::Context;
use crate::error::Result;

impl CreateTagRequest {
    pub(crate) fn to_opts(&self) -> CreateTagOptions {
        CreateTagOptions {
            or_replace: self.or_replace,
            if_not_exists: self.if_not_exists,
            name: self.name.clone(),
            allowed_values: self.allowed_values.clone(),
            comment: self.comment.clone(),
            ..Default::default()
        }
    }
}

impl AlterTagRequest {
    pub(crate) fn to_opts(&self) -> AlterTagOptions {
        AlterTagOptions {
            if_exists: self.if_exists,
            name: self.name.clone(),
            rename: self.rename.clone(),
            add: self.add.clone(),
            drop: self.drop.clone(),
            set: self.set.clone(),
            unset: self.unset.clone(),
            ..Default::default()
        }
    }
}

impl DropTagRequest {
    pub(crate) fn to_opts(&self) -> DropTagOptions {
        DropTagOptions {
            if_exists: self.if_exists,
            name: self.name.clone(),
            ..Default::default()
        }
    }
}

impl UndropTagRequest {
    pub(crate) fn to_opts(&self) -> UndropTagOptions {
        UndropTagOptions {
            name: self.name.clone(),
            ..Default::default()
        }
    }
}

impl ShowTagRequest {
    pub(crate) fn to_opts(&self) -> ShowTagOptions {
        ShowTagOptions {
            like: self.like.clone(),
            r#in: self.r#in.clone(),
            ..Default::default()
        }
    }
}

/// `TAG` statements. Setting tags on other objects lives in `tags_ext`.
pub struct Tags<'a> {
    pub(crate) client: &'a Client,
}

impl<'a> Tags<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Tags { client }
    }

    pub async fn create(&self, ctx: &Context, request: &CreateTagRequest) -> Result<()> {
        self.client.validate_and_exec(ctx, &request.to_opts()).await
    }

    /// A rename keeps the tag in its database.
    pub async fn alter(&self, ctx: &Context, request: &AlterTagRequest) -> Result<()> {
        self.client.validate_and_exec(ctx, &request.to_opts()).await
    }

    pub async fn drop(&self, ctx: &Context, request: &DropTagRequest) -> Result<()> {
        self.client.validate_and_exec(ctx, &request.to_opts()).await
    }

    pub async fn undrop(&self, ctx: &Context, request: &UndropTagRequest) -> Result<()> {
        self.client.validate_and_exec(ctx, &request.to_opts()).await
    }

    pub async fn show(&self, ctx: &Context, request: &ShowTagRequest) -> Result<Vec<Tag>> {
        let rows: Vec<TagRow> = self.client.validate_and_query(ctx, &request.to_opts()).await?;
        Ok(rows.into_iter().map(Tag::from).collect())
    }
}
