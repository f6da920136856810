use snowflake_sdk_derive::{SnowflakeDeserialize, ToSql, Validate};

use super::common::{non_empty, split_list, Like, LimitFrom, StartsWith, TagAssociation, Timestamp};
use crate::client::Client;
use crate::context::Context;
use crate::error::{Error, Result};
use crate::identifier::{
    AccountIdentifier, AccountObjectIdentifier, ExternalObjectIdentifier, Identifier, ObjectIdentifier,
    SchemaObjectIdentifier,
};
use crate::validation::{not_empty, ValidationErrors};

crate::sql_enum! {
    pub enum ShareKind {
        Inbound => "INBOUND",
        Outbound => "OUTBOUND",
    }
}

#[derive(Debug, Clone, PartialEq, Default, ToSql, Validate)]
pub struct CreateShareOptions {
    #[ddl(static, sql = "CREATE")]
    create: (),
    #[ddl(keyword, sql = "OR REPLACE")]
    pub or_replace: bool,
    #[ddl(static, sql = "SHARE")]
    share: (),
    #[ddl(identifier)]
    #[validate(identifier)]
    pub name: AccountObjectIdentifier,
    #[ddl(parameter, single_quotes, sql = "COMMENT")]
    pub comment: Option<String>,
}

impl CreateShareOptions {
    pub fn new(name: AccountObjectIdentifier) -> Self {
        CreateShareOptions {
            name,
            ..Default::default()
        }
    }
}

/// `ADD ACCOUNTS = ...` and `REMOVE ACCOUNTS = ...`.
#[derive(Debug, Clone, PartialEq, Default, ToSql, Validate)]
#[validate(custom = "validate_share_accounts")]
pub struct ShareAccounts {
    #[ddl(list, no_parentheses, equals, sql = "ACCOUNTS")]
    pub accounts: Vec<AccountIdentifier>,
    #[ddl(parameter, sql = "SHARE_RESTRICTIONS")]
    pub share_restrictions: Option<bool>,
}

impl ShareAccounts {
    pub fn new(accounts: Vec<AccountIdentifier>) -> Self {
        ShareAccounts {
            accounts,
            share_restrictions: None,
        }
    }
}

fn validate_share_accounts(opts: &ShareAccounts, errors: &mut ValidationErrors) {
    not_empty(errors, "ShareAccounts", "accounts", &opts.accounts);
}

#[derive(Debug, Clone, PartialEq, Default, ToSql, Validate)]
#[validate(exactly_one(add, remove, set, unset, set_tag, unset_tag))]
pub struct AlterShareOptions {
    #[ddl(static, sql = "ALTER SHARE")]
    alter: (),
    #[ddl(keyword, sql = "IF EXISTS")]
    pub if_exists: bool,
    #[ddl(identifier)]
    #[validate(identifier)]
    pub name: AccountObjectIdentifier,
    #[ddl(keyword, sql = "ADD")]
    #[validate(nested)]
    pub add: Option<ShareAccounts>,
    #[ddl(keyword, sql = "REMOVE")]
    #[validate(nested)]
    pub remove: Option<ShareAccounts>,
    #[ddl(keyword, sql = "SET")]
    #[validate(nested)]
    pub set: Option<ShareSet>,
    #[ddl(list, no_parentheses, sql = "UNSET")]
    #[validate(nested)]
    pub unset: Option<ShareUnset>,
    #[ddl(list, no_parentheses, sql = "SET TAG")]
    pub set_tag: Vec<TagAssociation>,
    #[ddl(list, no_parentheses, sql = "UNSET TAG")]
    pub unset_tag: Vec<SchemaObjectIdentifier>,
}

impl AlterShareOptions {
    pub fn new(name: AccountObjectIdentifier) -> Self {
        AlterShareOptions {
            name,
            ..Default::default()
        }
    }
}

/// Replaces the account list and/or the comment.
#[derive(Debug, Clone, PartialEq, Default, ToSql, Validate)]
#[validate(at_least_one(accounts, comment))]
pub struct ShareSet {
    #[ddl(list, no_parentheses, equals, sql = "ACCOUNTS")]
    pub accounts: Vec<AccountIdentifier>,
    #[ddl(parameter, single_quotes, sql = "COMMENT")]
    pub comment: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, ToSql, Validate)]
#[validate(at_least_one(comment))]
pub struct ShareUnset {
    #[ddl(keyword, sql = "COMMENT")]
    pub comment: bool,
}

#[derive(Debug, Clone, PartialEq, Default, ToSql, Validate)]
pub struct DropShareOptions {
    #[ddl(static, sql = "DROP SHARE")]
    drop: (),
    #[ddl(keyword, sql = "IF EXISTS")]
    pub if_exists: bool,
    #[ddl(identifier)]
    #[validate(identifier)]
    pub name: AccountObjectIdentifier,
}

impl DropShareOptions {
    pub fn new(name: AccountObjectIdentifier) -> Self {
        DropShareOptions {
            name,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, ToSql, Validate)]
pub struct ShowSharesOptions {
    #[ddl(static, sql = "SHOW SHARES")]
    show: (),
    #[ddl(keyword)]
    pub like: Option<Like>,
    #[ddl(keyword)]
    pub starts_with: Option<StartsWith>,
    #[ddl(keyword)]
    pub limit: Option<LimitFrom>,
}

/// `DESCRIBE SHARE <name>` for own shares, `<org>.<account>.<name>` for inbound ones.
#[derive(Debug, Clone, PartialEq, ToSql, Validate)]
struct DescribeShareOptions {
    #[ddl(static, sql = "DESCRIBE SHARE")]
    describe: (),
    #[ddl(identifier)]
    #[validate(identifier)]
    name: Identifier,
}

impl DescribeShareOptions {
    fn new(name: Identifier) -> Self {
        DescribeShareOptions { describe: (), name }
    }
}

#[derive(Debug, Clone, SnowflakeDeserialize)]
struct ShareRow {
    created_on: Timestamp,
    kind: ShareKind,
    owner_account: String,
    name: String,
    database_name: Option<String>,
    to: Option<String>,
    owner: Option<String>,
    comment: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Share {
    pub created_on: Timestamp,
    pub kind: ShareKind,
    pub owner_account: String,
    pub name: String,
    pub database_name: Option<String>,
    pub to: Vec<AccountIdentifier>,
    pub owner: Option<String>,
    pub comment: Option<String>,
}

impl Share {
    pub fn id(&self) -> AccountObjectIdentifier {
        AccountObjectIdentifier::new(&self.name)
    }

    /// How consumers address the share, `None` when `owner_account` is not `<org>.<account>`.
    pub fn external_id(&self) -> Option<ExternalObjectIdentifier> {
        let account: AccountIdentifier = self.owner_account.parse().ok()?;
        Some(ExternalObjectIdentifier::new(account, &self.name))
    }
}

impl From<ShareRow> for Share {
    fn from(row: ShareRow) -> Self {
        Share {
            created_on: row.created_on,
            kind: row.kind,
            owner_account: row.owner_account,
            name: row.name,
            database_name: non_empty(row.database_name),
            to: split_list(row.to.as_deref())
                .into_iter()
                .filter_map(|account| account.parse().ok())
                .collect(),
            owner: non_empty(row.owner),
            comment: non_empty(row.comment),
        }
    }
}

/// Object granted to a share.
#[derive(Debug, Clone, PartialEq, SnowflakeDeserialize)]
pub struct ShareDetailsRow {
    pub kind: String,
    pub name: String,
    pub shared_on: Option<Timestamp>,
}

pub struct Shares<'a> {
    client: &'a Client,
}

impl<'a> Shares<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Shares { client }
    }

    pub async fn create(&self, ctx: &Context, opts: &CreateShareOptions) -> Result<()> {
        self.client.validate_and_exec(ctx, opts).await
    }

    pub async fn alter(&self, ctx: &Context, opts: &AlterShareOptions) -> Result<()> {
        self.client.validate_and_exec(ctx, opts).await
    }

    pub async fn drop(&self, ctx: &Context, opts: &DropShareOptions) -> Result<()> {
        self.client.validate_and_exec(ctx, opts).await
    }

    pub async fn show(&self, ctx: &Context, opts: &ShowSharesOptions) -> Result<Vec<Share>> {
        let rows: Vec<ShareRow> = self.client.validate_and_query(ctx, opts).await?;
        Ok(rows.into_iter().map(Share::from).collect())
    }

    pub async fn show_by_id(&self, ctx: &Context, id: &AccountObjectIdentifier) -> Result<Share> {
        let opts = ShowSharesOptions {
            like: Some(Like::name(id)),
            ..Default::default()
        };
        self.show(ctx, &opts)
            .await?
            .into_iter()
            .find(|share| share.name == id.name())
            .ok_or_else(|| Error::object_not_found(id))
    }

    pub async fn describe_provider(
        &self,
        ctx: &Context,
        id: &AccountObjectIdentifier,
    ) -> Result<Vec<ShareDetailsRow>> {
        let opts = DescribeShareOptions::new(Identifier::Account(id.clone()));
        self.client.validate_and_query(ctx, &opts).await
    }

    pub async fn describe_consumer(
        &self,
        ctx: &Context,
        id: &ExternalObjectIdentifier,
    ) -> Result<Vec<ShareDetailsRow>> {
        let opts = DescribeShareOptions::new(Identifier::External(id.clone()));
        self.client.validate_and_query(ctx, &opts).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sdk::testing::{assert_opts_invalid_joined_errors, assert_opts_valid_and_sql_equals};
    use crate::validation::ValidationError;
    use snowflake_driver::ResultSet;

    fn id() -> AccountObjectIdentifier {
        AccountObjectIdentifier::new("sh")
    }

    fn consumer() -> AccountIdentifier {
        AccountIdentifier::new("ORG", "ACCT")
    }

    #[test]
    fn create_share() {
        let mut opts = CreateShareOptions::new(id());
        opts.or_replace = true;
        opts.comment = Some("c".into());
        assert_opts_valid_and_sql_equals(&opts, r#"CREATE OR REPLACE SHARE "sh" COMMENT = 'c'"#);
    }

    #[test]
    fn add_and_remove_accounts() {
        let mut opts = AlterShareOptions::new(id());
        opts.add = Some(ShareAccounts {
            share_restrictions: Some(false),
            ..ShareAccounts::new(vec![consumer(), AccountIdentifier::new("ORG", "OTHER")])
        });
        assert_opts_valid_and_sql_equals(
            &opts,
            r#"ALTER SHARE "sh" ADD ACCOUNTS = "ORG"."ACCT", "ORG"."OTHER" SHARE_RESTRICTIONS = false"#,
        );

        let mut opts = AlterShareOptions::new(id());
        opts.remove = Some(ShareAccounts::new(vec![consumer()]));
        assert_opts_valid_and_sql_equals(&opts, r#"ALTER SHARE "sh" REMOVE ACCOUNTS = "ORG"."ACCT""#);

        let mut opts = AlterShareOptions::new(id());
        opts.remove = Some(ShareAccounts::default());
        assert_opts_invalid_joined_errors(
            &opts,
            &[ValidationError::Empty {
                struct_name: "ShareAccounts",
                field: "accounts",
            }],
        );
    }

    #[test]
    fn set_and_unset() {
        let mut opts = AlterShareOptions::new(id());
        opts.set = Some(ShareSet {
            accounts: vec![consumer()],
            comment: Some("shared".into()),
        });
        assert_opts_valid_and_sql_equals(
            &opts,
            r#"ALTER SHARE "sh" SET ACCOUNTS = "ORG"."ACCT" COMMENT = 'shared'"#,
        );

        let mut opts = AlterShareOptions::new(id());
        opts.unset = Some(ShareUnset { comment: true });
        assert_opts_valid_and_sql_equals(&opts, r#"ALTER SHARE "sh" UNSET COMMENT"#);

        let mut opts = AlterShareOptions::new(id());
        opts.set = Some(ShareSet::default());
        assert_opts_invalid_joined_errors(
            &opts,
            &[ValidationError::AtLeastOneOf {
                struct_name: "ShareSet",
                fields: vec!["accounts", "comment"],
            }],
        );
    }

    #[tokio::test]
    async fn describe_provider_and_consumer() {
        let client = Client::dry_run();
        let ctx = Context::background();
        client.shares().describe_provider(&ctx, &id()).await.unwrap();
        client
            .shares()
            .describe_consumer(&ctx, &ExternalObjectIdentifier::new(consumer(), "sh"))
            .await
            .unwrap();
        assert_eq!(
            client.trace_logs(),
            [r#"DESCRIBE SHARE "sh""#, r#"DESCRIBE SHARE "ORG"."ACCT"."sh""#]
        );
    }

    #[test]
    fn rows_map_to_shares() {
        let rows = ResultSet::from_rows(
            ["created_on", "kind", "owner_account", "name", "database_name", "to", "owner", "comment"],
            [[
                Some("1700000000.000000000"),
                Some("OUTBOUND"),
                Some("ORG.PROVIDER"),
                Some("SH"),
                Some("DB"),
                Some("ORG.ACCT, ORG.OTHER"),
                Some("ACCOUNTADMIN"),
                Some(""),
            ]],
        );
        let share: Share = rows.deserialize::<ShareRow>().unwrap().remove(0).into();
        assert_eq!(share.kind, ShareKind::Outbound);
        assert_eq!(share.to, [consumer(), AccountIdentifier::new("ORG", "OTHER")]);
        assert_eq!(
            share.external_id(),
            Some(ExternalObjectIdentifier::new(AccountIdentifier::new("ORG", "PROVIDER"), "SH"))
        );
        assert_eq!(share.comment, None);
    }
}
