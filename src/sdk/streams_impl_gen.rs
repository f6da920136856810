// Code generated by snowflake-sdk-generator. DO NOT EDIT.

#![allow(unused_imports)]
#![cfg_attr(rustfmt, rustfmt::skip)]

use super::common::{In, Like, LimitFrom, StartsWith, TagAssociation};
use crate::identifier::SchemaObjectIdentifier;
use super::streams_dto_gen::*;
use super::streams_ext::*;
use super::streams_gen::*;
use crate::client::Client;
use crate::context::Context;
use crate::error::Result;

impl CreateStreamOnTableRequest {
    pub(crate) fn to_opts(&self) -> CreateStreamOnTableOptions {
        CreateStreamOnTableOptions {
            or_replace: self.or_replace,
            if_not_exists: self.if_not_exists,
            name: self.name.clone(),
            tag: self.tag.clone(),
            copy_grants: self.copy_grants,
            table_id: self.table_id.clone(),
            on: self.on.clone(),
            append_only: self.append_only.clone(),
            show_initial_rows: self.show_initial_rows.clone(),
            comment: self.comment.clone(),
            ..Default::default()
        }
    }
}

impl CreateStreamOnExternalTableRequest {
    pub(crate) fn to_opts(&self) -> CreateStreamOnExternalTableOptions {
        CreateStreamOnExternalTableOptions {
            or_replace: self.or_replace,
            if_not_exists: self.if_not_exists,
            name: self.name.clone(),
            tag: self.tag.clone(),
            copy_grants: self.copy_grants,
            external_table_id: self.external_table_id.clone(),
            on: self.on.clone(),
            insert_only: self.insert_only.clone(),
            comment: self.comment.clone(),
            ..Default::default()
        }
    }
}

impl CreateStreamOnViewRequest {
    pub(crate) fn to_opts(&self) -> CreateStreamOnViewOptions {
        CreateStreamOnViewOptions {
            or_replace: self.or_replace,
            if_not_exists: self.if_not_exists,
            name: self.name.clone(),
            tag: self.tag.clone(),
            copy_grants: self.copy_grants,
            view_id: self.view_id.clone(),
            on: self.on.clone(),
            append_only: self.append_only.clone(),
            show_initial_rows: self.show_initial_rows.clone(),
            comment: self.comment.clone(),
            ..Default::default()
        }
    }
}

impl CloneStreamRequest {
    pub(crate) fn to_opts(&self) -> CloneStreamOptions {
        CloneStreamOptions {
            or_replace: self.or_replace,
            name: self.name.clone(),
            source_stream: self.source_stream.clone(),
            copy_grants: self.copy_grants,
            ..Default::default()
        }
    }
}

impl AlterStreamRequest {
    pub(crate) fn to_opts(&self) -> AlterStreamOptions {
        AlterStreamOptions {
            if_exists: self.if_exists,
            name: self.name.clone(),
            set_comment: self.set_comment.clone(),
            unset_comment: self.unset_comment,
            set_tag: self.set_tag.clone(),
            unset_tag: self.unset_tag.clone(),
            ..Default::default()
        }
    }
}

impl DropStreamRequest {
    pub(crate) fn to_opts(&self) -> DropStreamOptions {
        DropStreamOptions {
            if_exists: self.if_exists,
            name: self.name.clone(),
            ..Default::default()
        }
    }
}

impl ShowStreamRequest {
    pub(crate) fn to_opts(&self) -> ShowStreamOptions {
        ShowStreamOptions {
            terse: self.terse,
            like: self.like.clone(),
            r#in: self.r#in.clone(),
            starts_with: self.starts_with.clone(),
            limit: self.limit.clone(),
            ..Default::default()
        }
    }
}

/// `STREAM` statements; change tracking over tables, external tables and views.
pub struct Streams<'a> {
    pub(crate) client: &'a Client,
}

impl<'a> Streams<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Streams { client }
    }

    pub async fn create_on_table(&self, ctx: &Context, request: &CreateStreamOnTableRequest) -> Result<()> {
        self.client.validate_and_exec(ctx, &request.to_opts()).await
    }

    pub async fn create_on_external_table(&self, ctx: &Context, request: &CreateStreamOnExternalTableRequest) -> Result<()> {
        self.client.validate_and_exec(ctx, &request.to_opts()).await
    }

    pub async fn create_on_view(&self, ctx: &Context, request: &CreateStreamOnViewRequest) -> Result<()> {
        self.client.validate_and_exec(ctx, &request.to_opts()).await
    }

    pub async fn clone(&self, ctx: &Context, request: &CloneStreamRequest) -> Result<()> {
        self.client.validate_and_exec(ctx, &request.to_opts()).await
    }

    pub async fn alter(&self, ctx: &Context, request: &AlterStreamRequest) -> Result<()> {
        self.client.validate_and_exec(ctx, &request.to_opts()).await
    }

    pub async fn drop(&self, ctx: &Context, request: &DropStreamRequest) -> Result<()> {
        self.client.validate_and_exec(ctx, &request.to_opts()).await
    }

    pub async fn show(&self, ctx: &Context, request: &ShowStreamRequest) -> Result<Vec<Stream>> {
        let rows: Vec<StreamRow> = self.client.validate_and_query(ctx, &request.to_opts()).await?;
        Ok(rows.into_iter().map(Stream::from).collect())
    }

    pub async fn describe(&self, ctx: &Context, id: &SchemaObjectIdentifier) -> Result<Stream> {
        let opts = DescribeStreamOptions {
            name: id.clone(),
            ..Default::default()
        };
        let row: StreamRow = self.client.validate_and_query_one(ctx, &opts).await?;
        Ok(row.into())
    }
}
