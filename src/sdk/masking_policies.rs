use snowflake_sdk_derive::{SnowflakeDeserialize, ToSql, Validate};

use super::common::{non_empty, In, Like, TagAssociation, Timestamp};
use crate::client::Client;
use crate::context::Context;
use crate::error::{Error, Result};
use crate::identifier::{ObjectIdentifier, SchemaObjectIdentifier};
use crate::sql::RawSql;

/// One `"<arg>" <type>` entry of a policy signature.
#[derive(Debug, Clone, PartialEq, Eq, Default, ToSql)]
pub struct PolicySignatureArgument {
    #[ddl(keyword, double_quotes)]
    pub name: String,
    #[ddl(keyword)]
    pub data_type: String,
}

impl PolicySignatureArgument {
    pub fn new(name: impl Into<String>, data_type: impl Into<String>) -> Self {
        PolicySignatureArgument {
            name: name.into(),
            data_type: data_type.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, ToSql, Validate)]
#[validate(conflicting(or_replace, if_not_exists))]
pub struct CreateMaskingPolicyOptions {
    #[ddl(static, sql = "CREATE")]
    create: (),
    #[ddl(keyword, sql = "OR REPLACE")]
    pub or_replace: bool,
    #[ddl(static, sql = "MASKING POLICY")]
    masking_policy: (),
    #[ddl(keyword, sql = "IF NOT EXISTS")]
    pub if_not_exists: bool,
    #[ddl(identifier)]
    #[validate(identifier)]
    pub name: SchemaObjectIdentifier,
    #[ddl(list, must_parentheses, sql = "AS")]
    pub signature: Vec<PolicySignatureArgument>,
    #[ddl(parameter, no_equals, sql = "RETURNS")]
    pub returns: String,
    #[ddl(parameter, no_equals, sql = "->")]
    pub body: RawSql,
    #[ddl(parameter, single_quotes, sql = "COMMENT")]
    pub comment: Option<String>,
    #[ddl(parameter, sql = "EXEMPT_OTHER_POLICIES")]
    pub exempt_other_policies: Option<bool>,
}

impl CreateMaskingPolicyOptions {
    pub fn new(
        name: SchemaObjectIdentifier,
        signature: Vec<PolicySignatureArgument>,
        returns: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        CreateMaskingPolicyOptions {
            name,
            signature,
            returns: returns.into(),
            body: RawSql(body.into()),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, ToSql, Validate)]
#[validate(exactly_one(new_name, set, unset, set_tag, unset_tag))]
pub struct AlterMaskingPolicyOptions {
    #[ddl(static, sql = "ALTER MASKING POLICY")]
    alter: (),
    #[ddl(keyword, sql = "IF EXISTS")]
    pub if_exists: bool,
    #[ddl(identifier)]
    #[validate(identifier)]
    pub name: SchemaObjectIdentifier,
    #[ddl(identifier, sql = "RENAME TO")]
    #[validate(identifier_if_set)]
    pub new_name: Option<SchemaObjectIdentifier>,
    #[ddl(keyword, sql = "SET")]
    #[validate(nested)]
    pub set: Option<MaskingPolicySet>,
    #[ddl(list, no_parentheses, sql = "UNSET")]
    #[validate(nested)]
    pub unset: Option<MaskingPolicyUnset>,
    #[ddl(list, no_parentheses, sql = "SET TAG")]
    pub set_tag: Vec<TagAssociation>,
    #[ddl(list, no_parentheses, sql = "UNSET TAG")]
    pub unset_tag: Vec<SchemaObjectIdentifier>,
}

impl AlterMaskingPolicyOptions {
    pub fn new(name: SchemaObjectIdentifier) -> Self {
        AlterMaskingPolicyOptions {
            name,
            ..Default::default()
        }
    }
}

/// Snowflake accepts one property per `SET`.
#[derive(Debug, Clone, PartialEq, Default, ToSql, Validate)]
#[validate(exactly_one(body, comment))]
pub struct MaskingPolicySet {
    #[ddl(parameter, no_equals, sql = "BODY ->")]
    pub body: Option<RawSql>,
    #[ddl(parameter, single_quotes, sql = "COMMENT")]
    pub comment: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, ToSql, Validate)]
#[validate(at_least_one(comment))]
pub struct MaskingPolicyUnset {
    #[ddl(keyword, sql = "COMMENT")]
    pub comment: bool,
}

#[derive(Debug, Clone, PartialEq, Default, ToSql, Validate)]
pub struct DropMaskingPolicyOptions {
    #[ddl(static, sql = "DROP MASKING POLICY")]
    drop: (),
    #[ddl(keyword, sql = "IF EXISTS")]
    pub if_exists: bool,
    #[ddl(identifier)]
    #[validate(identifier)]
    pub name: SchemaObjectIdentifier,
}

impl DropMaskingPolicyOptions {
    pub fn new(name: SchemaObjectIdentifier) -> Self {
        DropMaskingPolicyOptions {
            name,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, ToSql, Validate)]
pub struct ShowMaskingPoliciesOptions {
    #[ddl(static, sql = "SHOW MASKING POLICIES")]
    show: (),
    #[ddl(keyword)]
    pub like: Option<Like>,
    #[ddl(keyword)]
    pub r#in: Option<In>,
    #[ddl(parameter, no_equals, sql = "LIMIT")]
    pub limit: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Default, ToSql, Validate)]
struct DescribeMaskingPolicyOptions {
    #[ddl(static, sql = "DESCRIBE MASKING POLICY")]
    describe: (),
    #[ddl(identifier)]
    #[validate(identifier)]
    name: SchemaObjectIdentifier,
}

#[derive(Debug, Clone, SnowflakeDeserialize)]
struct MaskingPolicyRow {
    created_on: Timestamp,
    name: String,
    database_name: String,
    schema_name: String,
    kind: Option<String>,
    owner: Option<String>,
    comment: Option<String>,
    owner_role_type: Option<String>,
    #[snowflake(json)]
    options: Option<MaskingPolicyRowOptions>,
}

#[derive(Debug, Clone, Default, serde::Deserialize)]
#[serde(rename_all = "UPPERCASE")]
struct MaskingPolicyRowOptions {
    #[serde(default)]
    exempt_other_policies: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MaskingPolicy {
    pub created_on: Timestamp,
    pub name: String,
    pub database_name: String,
    pub schema_name: String,
    pub kind: String,
    pub owner: Option<String>,
    pub comment: Option<String>,
    pub owner_role_type: Option<String>,
    pub exempt_other_policies: bool,
}

impl MaskingPolicy {
    pub fn id(&self) -> SchemaObjectIdentifier {
        SchemaObjectIdentifier::new(&self.database_name, &self.schema_name, &self.name)
    }
}

impl From<MaskingPolicyRow> for MaskingPolicy {
    fn from(row: MaskingPolicyRow) -> Self {
        MaskingPolicy {
            created_on: row.created_on,
            name: row.name,
            database_name: row.database_name,
            schema_name: row.schema_name,
            kind: row.kind.unwrap_or_else(|| "MASKING_POLICY".to_string()),
            owner: non_empty(row.owner),
            comment: non_empty(row.comment),
            owner_role_type: non_empty(row.owner_role_type),
            exempt_other_policies: row.options.unwrap_or_default().exempt_other_policies,
        }
    }
}

#[derive(Debug, Clone, SnowflakeDeserialize)]
struct MaskingPolicyDetailsRow {
    name: String,
    signature: String,
    return_type: String,
    body: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaskingPolicyDetails {
    pub name: String,
    pub signature: Vec<PolicySignatureArgument>,
    pub return_type: String,
    pub body: String,
}

impl From<MaskingPolicyDetailsRow> for MaskingPolicyDetails {
    fn from(row: MaskingPolicyDetailsRow) -> Self {
        MaskingPolicyDetails {
            name: row.name,
            signature: parse_signature(&row.signature),
            return_type: row.return_type,
            body: row.body,
        }
    }
}

/// Parses the `(VAL VARCHAR, N NUMBER(38,0))` signature column of `DESCRIBE`.
pub fn parse_signature(signature: &str) -> Vec<PolicySignatureArgument> {
    let inner = signature
        .trim()
        .strip_prefix('(')
        .and_then(|rest| rest.strip_suffix(')'))
        .unwrap_or(signature);
    let mut arguments = Vec::new();
    let mut depth = 0usize;
    let mut current = String::new();
    for c in inner.chars() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                arguments.extend(parse_argument(&std::mem::take(&mut current)));
                continue;
            }
            _ => {}
        }
        current.push(c);
    }
    arguments.extend(parse_argument(&current));
    arguments
}

fn parse_argument(text: &str) -> Option<PolicySignatureArgument> {
    let (name, data_type) = text.trim().split_once(char::is_whitespace)?;
    Some(PolicySignatureArgument::new(
        name.trim_matches('"'),
        data_type.trim(),
    ))
}

pub struct MaskingPolicies<'a> {
    client: &'a Client,
}

impl<'a> MaskingPolicies<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        MaskingPolicies { client }
    }

    pub async fn create(&self, ctx: &Context, opts: &CreateMaskingPolicyOptions) -> Result<()> {
        self.client.validate_and_exec(ctx, opts).await
    }

    pub async fn alter(&self, ctx: &Context, opts: &AlterMaskingPolicyOptions) -> Result<()> {
        self.client.validate_and_exec(ctx, opts).await
    }

    pub async fn drop(&self, ctx: &Context, opts: &DropMaskingPolicyOptions) -> Result<()> {
        self.client.validate_and_exec(ctx, opts).await
    }

    pub async fn show(
        &self,
        ctx: &Context,
        opts: &ShowMaskingPoliciesOptions,
    ) -> Result<Vec<MaskingPolicy>> {
        let rows: Vec<MaskingPolicyRow> = self.client.validate_and_query(ctx, opts).await?;
        Ok(rows.into_iter().map(MaskingPolicy::from).collect())
    }

    pub async fn show_by_id(&self, ctx: &Context, id: &SchemaObjectIdentifier) -> Result<MaskingPolicy> {
        let opts = ShowMaskingPoliciesOptions {
            like: Some(Like::name(id)),
            r#in: Some(In::Schema(id.schema_id())),
            ..Default::default()
        };
        self.show(ctx, &opts)
            .await?
            .into_iter()
            .find(|policy| policy.name == id.name())
            .ok_or_else(|| Error::object_not_found(id))
    }

    pub async fn describe(
        &self,
        ctx: &Context,
        id: &SchemaObjectIdentifier,
    ) -> Result<MaskingPolicyDetails> {
        let opts = DescribeMaskingPolicyOptions {
            name: id.clone(),
            ..Default::default()
        };
        let row: MaskingPolicyDetailsRow = self.client.validate_and_query_one(ctx, &opts).await?;
        Ok(row.into())
    }
}
