//! Typed management of Snowflake objects.
//!
//! ```no_run
//! use snowflake_sdk::sdk::warehouses::{CreateWarehouseOptions, WarehouseSize};
//! use snowflake_sdk::{AccountObjectIdentifier, Client, Context};
//!
//! # async fn run() -> snowflake_sdk::Result<()> {
//! let client = Client::from_env().await?;
//! let ctx = Context::background();
//! let id = AccountObjectIdentifier::new("REPORTING_WH");
//! let mut opts = CreateWarehouseOptions::new(id.clone());
//! opts.if_not_exists = true;
//! opts.warehouse_size = Some(WarehouseSize::XSmall);
//! client.warehouses().create(&ctx, &opts).await?;
//! let warehouse = client.warehouses().show_by_id(&ctx, &id).await?;
//! println!("{} is {:?}", warehouse.name, warehouse.state);
//! # Ok(())
//! # }
//! ```

extern crate self as snowflake_sdk;

pub use snowflake_driver as driver;
pub use snowflake_sdk_derive::{SnowflakeDeserialize, ToSql, Validate};

pub mod client;
pub mod config;
pub mod context;
pub mod error;
pub mod identifier;
pub mod sdk;
pub mod sql;
pub mod validation;

pub use client::{Client, Driver, DryRunDriver};
pub use config::{Authenticator, Config, ConfigBuilder, ConfigError};
pub use context::{CancelHandle, CancelReason, Context};
pub use error::{Error, Result};
pub use identifier::{
    AccountIdentifier, AccountObjectIdentifier, DatabaseObjectIdentifier, ExternalObjectIdentifier,
    Identifier, ObjectIdentifier, SchemaObjectIdentifier, SchemaObjectIdentifierWithArguments,
    TableColumnIdentifier,
};
