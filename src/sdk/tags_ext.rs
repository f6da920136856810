use snowflake_sdk_derive::{SnowflakeDeserialize, ToSql, Validate};

use super::common::{non_empty, In, Like, ObjectType, TagAssociation, Timestamp};
use super::tags_dto_gen::ShowTagRequest;
use super::tags_gen::{AllowedValues, AlterTagOptions, TagMaskingPolicy, TagSet, TagUnset};
use super::tags_impl_gen::Tags;
use crate::context::Context;
use crate::error::{Error, Result};
use crate::identifier::{Identifier, ObjectIdentifier, SchemaObjectIdentifier};
use crate::validation::{same_database, ValidationError, ValidationErrors};

pub(crate) fn validate_alter_tag(opts: &AlterTagOptions, errors: &mut ValidationErrors) {
    if let Some(rename) = &opts.rename {
        same_database(
            errors,
            "AlterTagOptions",
            "rename",
            opts.name.database_name(),
            rename.database_name(),
        );
    }
}

impl AllowedValues {
    pub fn new<S: Into<String>>(values: impl IntoIterator<Item = S>) -> Self {
        AllowedValues {
            values: values.into_iter().map(Into::into).collect(),
        }
    }
}

impl TagMaskingPolicy {
    pub fn new(name: SchemaObjectIdentifier) -> Self {
        TagMaskingPolicy { name }
    }
}

impl TagSet {
    /// At most one policy per data type; `force` replaces a policy already set for that type.
    pub fn masking_policies(policies: Vec<SchemaObjectIdentifier>, force: bool) -> Self {
        TagSet {
            masking_policies: policies.into_iter().map(TagMaskingPolicy::new).collect(),
            force,
            ..Default::default()
        }
    }

    pub fn comment(comment: impl Into<String>) -> Self {
        TagSet {
            comment: Some(comment.into()),
            ..Default::default()
        }
    }
}

impl TagUnset {
    pub fn allowed_values() -> Self {
        TagUnset {
            allowed_values: true,
            ..Default::default()
        }
    }

    pub fn masking_policies(policies: Vec<SchemaObjectIdentifier>) -> Self {
        TagUnset {
            masking_policies: policies.into_iter().map(TagMaskingPolicy::new).collect(),
            ..Default::default()
        }
    }

    pub fn comment() -> Self {
        TagUnset {
            comment: true,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, SnowflakeDeserialize)]
pub(crate) struct TagRow {
    created_on: Timestamp,
    name: String,
    database_name: String,
    schema_name: String,
    owner: Option<String>,
    comment: Option<String>,
    #[snowflake(json)]
    allowed_values: Option<Vec<String>>,
    owner_role_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Tag {
    pub created_on: Timestamp,
    pub name: String,
    pub database_name: String,
    pub schema_name: String,
    pub owner: Option<String>,
    pub comment: Option<String>,
    /// Empty when any value is accepted.
    pub allowed_values: Vec<String>,
    pub owner_role_type: Option<String>,
}

impl Tag {
    pub fn id(&self) -> SchemaObjectIdentifier {
        SchemaObjectIdentifier::new(&self.database_name, &self.schema_name, &self.name)
    }
}

impl From<TagRow> for Tag {
    fn from(row: TagRow) -> Self {
        Tag {
            created_on: row.created_on,
            name: row.name,
            database_name: row.database_name,
            schema_name: row.schema_name,
            owner: non_empty(row.owner),
            comment: non_empty(row.comment),
            allowed_values: row.allowed_values.unwrap_or_default(),
            owner_role_type: non_empty(row.owner_role_type),
        }
    }
}

/// Column tags are set through their table, `ALTER TABLE <table> MODIFY COLUMN <column>`.
fn alter_target(object_type: ObjectType, object: Identifier) -> (ObjectType, Identifier, Option<String>) {
    match (object_type, object) {
        (ObjectType::Column, Identifier::TableColumn(column)) => (
            ObjectType::Table,
            Identifier::Schema(column.table_id()),
            Some(column.name().to_string()),
        ),
        (object_type, object) => (object_type, object, None),
    }
}

fn validate_column_target(object_type: ObjectType, struct_name: &'static str, errors: &mut ValidationErrors) {
    if object_type == ObjectType::Column {
        errors.push(ValidationError::Invalid {
            struct_name,
            message: "columns must be identified by <database>.<schema>.<table>.<column>".to_string(),
        });
    }
}

/// `ALTER <object type> <object> SET TAG ...` for any taggable object.
#[derive(Debug, Clone, PartialEq, ToSql, Validate)]
#[validate(at_least_one(set_tag))]
#[validate(custom = "validate_set_tag_target")]
pub struct SetTagOnObjectOptions {
    #[ddl(static, sql = "ALTER")]
    alter: (),
    #[ddl(keyword)]
    object_type: ObjectType,
    #[ddl(keyword, sql = "IF EXISTS")]
    pub if_exists: bool,
    #[ddl(identifier)]
    #[validate(identifier)]
    object_name: Identifier,
    #[ddl(parameter, no_equals, double_quotes, sql = "MODIFY COLUMN")]
    column: Option<String>,
    #[ddl(list, no_parentheses, sql = "SET TAG")]
    pub set_tag: Vec<TagAssociation>,
}

impl SetTagOnObjectOptions {
    pub fn new(object_type: ObjectType, object: impl Into<Identifier>, set_tag: Vec<TagAssociation>) -> Self {
        let (object_type, object_name, column) = alter_target(object_type, object.into());
        SetTagOnObjectOptions {
            alter: (),
            object_type,
            if_exists: false,
            object_name,
            column,
            set_tag,
        }
    }
}

fn validate_set_tag_target(opts: &SetTagOnObjectOptions, errors: &mut ValidationErrors) {
    validate_column_target(opts.object_type, "SetTagOnObjectOptions", errors);
}

/// `ALTER <object type> <object> UNSET TAG ...` for any taggable object.
#[derive(Debug, Clone, PartialEq, ToSql, Validate)]
#[validate(at_least_one(unset_tag))]
#[validate(custom = "validate_unset_tag_target")]
pub struct UnsetTagOnObjectOptions {
    #[ddl(static, sql = "ALTER")]
    alter: (),
    #[ddl(keyword)]
    object_type: ObjectType,
    #[ddl(keyword, sql = "IF EXISTS")]
    pub if_exists: bool,
    #[ddl(identifier)]
    #[validate(identifier)]
    object_name: Identifier,
    #[ddl(parameter, no_equals, double_quotes, sql = "MODIFY COLUMN")]
    column: Option<String>,
    #[ddl(list, no_parentheses, sql = "UNSET TAG")]
    pub unset_tag: Vec<SchemaObjectIdentifier>,
}

impl UnsetTagOnObjectOptions {
    pub fn new(
        object_type: ObjectType,
        object: impl Into<Identifier>,
        unset_tag: Vec<SchemaObjectIdentifier>,
    ) -> Self {
        let (object_type, object_name, column) = alter_target(object_type, object.into());
        UnsetTagOnObjectOptions {
            alter: (),
            object_type,
            if_exists: false,
            object_name,
            column,
            unset_tag,
        }
    }
}

fn validate_unset_tag_target(opts: &UnsetTagOnObjectOptions, errors: &mut ValidationErrors) {
    validate_column_target(opts.object_type, "UnsetTagOnObjectOptions", errors);
}

impl Tags<'_> {
    pub async fn show_by_id(&self, ctx: &Context, id: &SchemaObjectIdentifier) -> Result<Tag> {
        let request = ShowTagRequest::new()
            .with_like(Like::name(id))
            .with_in(In::Schema(id.schema_id()));
        self.show(ctx, &request)
            .await?
            .into_iter()
            .find(|tag| tag.name == id.name())
            .ok_or_else(|| Error::object_not_found(id))
    }

    pub async fn set_on_object(&self, ctx: &Context, opts: &SetTagOnObjectOptions) -> Result<()> {
        self.client.validate_and_exec(ctx, opts).await
    }

    pub async fn unset_on_object(&self, ctx: &Context, opts: &UnsetTagOnObjectOptions) -> Result<()> {
        self.client.validate_and_exec(ctx, opts).await
    }
}
