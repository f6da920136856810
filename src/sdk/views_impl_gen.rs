// Code generated by snowflake-sdk-generator. DO NOT EDIT.

#![allow(unused_imports)]
#![cfg_attr(rustfmt, rustfmt::skip)]

use super::common::{In, Like, LimitFrom, StartsWith, TagAssociation};
use crate::identifier::SchemaObjectIdentifier;
use crate::sql::RawSql;
use super::views_dto_gen::*;
use super::views_ext::*;
use super::views_gen::*;
use crate::client::Client;
use crate::context::Context;
use crate::error::Result;

impl CreateViewRequest {
    pub(crate) fn to_opts(&self) -> CreateViewOptions {
        CreateViewOptions {
            or_replace: self.or_replace,
            secure: self.secure,
            temporary: self.temporary,
            recursive: self.recursive,
            if_not_exists: self.if_not_exists,
            name: self.name.clone(),
            columns: self.columns.clone(),
            copy_grants: self.copy_grants,
            comment: self.comment.clone(),
            change_tracking: self.change_tracking.clone(),
            tag: self.tag.clone(),
            sql: self.sql.clone(),
            ..Default::default()
        }
    }
}

impl AlterViewRequest {
    pub(crate) fn to_opts(&self) -> AlterViewOptions {
        AlterViewOptions {
            if_exists: self.if_exists,
            name: self.name.clone(),
            rename_to: self.rename_to.clone(),
            set_comment: self.set_comment.clone(),
            unset_comment: self.unset_comment,
            set_secure: self.set_secure,
            unset_secure: self.unset_secure,
            set_change_tracking: self.set_change_tracking.clone(),
            set_tag: self.set_tag.clone(),
            unset_tag: self.unset_tag.clone(),
            ..Default::default()
        }
    }
}

impl DropViewRequest {
    pub(crate) fn to_opts(&self) -> DropViewOptions {
        DropViewOptions {
            if_exists: self.if_exists,
            name: self.name.clone(),
            ..Default::default()
        }
    }
}

impl ShowViewRequest {
    pub(crate) fn to_opts(&self) -> ShowViewOptions {
        ShowViewOptions {
            terse: self.terse,
            like: self.like.clone(),
            r#in: self.r#in.clone(),
            starts_with: self.starts_with.clone(),
            limit: self.limit.clone(),
            ..Default::default()
        }
    }
}

/// `VIEW` statements.
pub struct Views<'a> {
    pub(crate) client: &'a Client,
}

impl<'a> Views<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Views { client }
    }

    pub async fn create(&self, ctx: &Context, request: &CreateViewRequest) -> Result<()> {
        self.client.validate_and_exec(ctx, &request.to_opts()).await
    }

    pub async fn alter(&self, ctx: &Context, request: &AlterViewRequest) -> Result<()> {
        self.client.validate_and_exec(ctx, &request.to_opts()).await
    }

    pub async fn drop(&self, ctx: &Context, request: &DropViewRequest) -> Result<()> {
        self.client.validate_and_exec(ctx, &request.to_opts()).await
    }

    pub async fn show(&self, ctx: &Context, request: &ShowViewRequest) -> Result<Vec<View>> {
        let rows: Vec<ViewRow> = self.client.validate_and_query(ctx, &request.to_opts()).await?;
        Ok(rows.into_iter().map(View::from).collect())
    }

    /// One row per column of the view.
    pub async fn describe(&self, ctx: &Context, id: &SchemaObjectIdentifier) -> Result<Vec<ViewColumnDetails>> {
        let opts = DescribeViewOptions {
            name: id.clone(),
            ..Default::default()
        };
        let rows: Vec<ViewColumnRow> = self.client.validate_and_query(ctx, &opts).await?;
        Ok(rows.into_iter().map(ViewColumnDetails::from).collect())
    }
}
