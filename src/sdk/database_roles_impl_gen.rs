// Code generated by snowflake-sdk-generator. DO NOT EDIT.

#![allow(unused_imports)]
#![cfg_attr(rustfmt, rustfmt::skip)]

use super::common::{Like, LimitFrom, TagAssociation};
use crate::identifier::{AccountObjectIdentifier, DatabaseObjectIdentifier, SchemaObjectIdentifier};
use super::database_roles_dto_gen::*;
use super::database_roles_ext::*;
use super::database_roles_gen::*;
use crate::client::Client;
use crate::context::Context;
use crate::error::Result;

impl CreateDatabaseRoleRequest {
    pub(crate) fn to_opts(&self) -> CreateDatabaseRoleOptions {
        CreateDatabaseRoleOptions {
            or_replace: self.or_replace,
            if_not_exists: self.if_not_exists,
            name: self.name.clone(),
            comment: self.comment.clone(),
            ..Default::default()
        }
    }
}

impl AlterDatabaseRoleRequest {
    pub(crate) fn to_opts(&self) -> AlterDatabaseRoleOptions {
        AlterDatabaseRoleOptions {
            if_exists: self.if_exists,
            name: self.name.clone(),
            rename: self.rename.clone(),
            set: self.set.clone(),
            unset: self.unset.clone(),
            set_tag: self.set_tag.clone(),
            unset_tag: self.unset_tag.clone(),
            ..Default::default()
        }
    }
}

impl DropDatabaseRoleRequest {
    pub(crate) fn to_opts(&self) -> DropDatabaseRoleOptions {
        DropDatabaseRoleOptions {
            if_exists: self.if_exists,
            name: self.name.clone(),
            ..Default::default()
        }
    }
}

impl ShowDatabaseRoleRequest {
    pub(crate) fn to_opts(&self) -> ShowDatabaseRoleOptions {
        ShowDatabaseRoleOptions {
            like: self.like.clone(),
            database: self.database.clone(),
            limit: self.limit.clone(),
            ..Default::default()
        }
    }
}

impl GrantDatabaseRoleRequest {
    pub(crate) fn to_opts(&self) -> GrantDatabaseRoleOptions {
        GrantDatabaseRoleOptions {
            name: self.name.clone(),
            to: self.to.clone(),
            ..Default::default()
        }
    }
}

impl RevokeDatabaseRoleRequest {
    pub(crate) fn to_opts(&self) -> RevokeDatabaseRoleOptions {
        RevokeDatabaseRoleOptions {
            name: self.name.clone(),
            from: self.from.clone(),
            ..Default::default()
        }
    }
}

/// `DATABASE ROLE` statements.
pub struct DatabaseRoles<'a> {
    pub(crate) client: &'a Client,
}

impl<'a> DatabaseRoles<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        DatabaseRoles { client }
    }

    pub async fn create(&self, ctx: &Context, request: &CreateDatabaseRoleRequest) -> Result<()> {
        self.client.validate_and_exec(ctx, &request.to_opts()).await
    }

    /// The new name must stay in the database of the role.
    pub async fn alter(&self, ctx: &Context, request: &AlterDatabaseRoleRequest) -> Result<()> {
        self.client.validate_and_exec(ctx, &request.to_opts()).await
    }

    pub async fn drop(&self, ctx: &Context, request: &DropDatabaseRoleRequest) -> Result<()> {
        self.client.validate_and_exec(ctx, &request.to_opts()).await
    }

    pub async fn show(&self, ctx: &Context, request: &ShowDatabaseRoleRequest) -> Result<Vec<DatabaseRole>> {
        let rows: Vec<DatabaseRoleRow> = self.client.validate_and_query(ctx, &request.to_opts()).await?;
        Ok(rows.into_iter().map(DatabaseRole::from).collect())
    }

    pub async fn describe(&self, ctx: &Context, id: &DatabaseObjectIdentifier) -> Result<DatabaseRoleDetails> {
        let opts = DescribeDatabaseRoleOptions {
            name: id.clone(),
            ..Default::default()
        };
        let row: DatabaseRoleDetailsRow = self.client.validate_and_query_one(ctx, &opts).await?;
        Ok(row.into())
    }

    pub async fn grant(&self, ctx: &Context, request: &GrantDatabaseRoleRequest) -> Result<()> {
        self.client.validate_and_exec(ctx, &request.to_opts()).await
    }

    pub async fn revoke(&self, ctx: &Context, request: &RevokeDatabaseRoleRequest) -> Result<()> {
        self.client.validate_and_exec(ctx, &request.to_opts()).await
    }
}
