//! Typed builders and executors for Snowflake objects.
//!
//! Every family follows the same shape: options structs rendered by [`ToSql`](crate::sql::ToSql)
//! and checked by [`Validate`](crate::validation::Validate), plus an executor borrowed from
//! [`Client`]. Families generated by `snowflake-sdk-generator` additionally expose request
//! builders (`CreateTaskRequest::new(..).with_comment(..)`).

use crate::client::Client;

pub mod common;
pub mod databases;
pub mod functions;
pub mod masking_policies;
pub mod pipes;
pub mod resource_monitors;
pub mod roles;
pub mod schemas;
pub mod sessions;
pub mod shares;
pub mod system_functions;
pub mod tables;
pub mod users;
pub mod warehouses;

#[cfg(test)]
mod testing;

mod database_roles_dto_gen;
mod database_roles_ext;
mod database_roles_gen;
mod database_roles_impl_gen;

mod sequences_dto_gen;
mod sequences_ext;
mod sequences_gen;
#[cfg(test)]
mod sequences_gen_test;
mod sequences_impl_gen;

mod streams_dto_gen;
mod streams_ext;
mod streams_gen;
#[cfg(test)]
mod streams_gen_test;
mod streams_impl_gen;

mod tags_dto_gen;
mod tags_ext;
mod tags_gen;
mod tags_impl_gen;

mod tasks_dto_gen;
mod tasks_ext;
mod tasks_gen;
#[cfg(test)]
mod tasks_gen_test;
mod tasks_impl_gen;

mod views_dto_gen;
mod views_ext;
mod views_gen;
#[cfg(test)]
mod views_gen_test;
mod views_impl_gen;

pub mod database_roles {
    pub use super::database_roles_dto_gen::*;
    pub use super::database_roles_ext::*;
    pub use super::database_roles_gen::*;
    pub use super::database_roles_impl_gen::*;
}

pub mod sequences {
    pub use super::sequences_dto_gen::*;
    pub use super::sequences_ext::*;
    pub use super::sequences_gen::*;
    pub use super::sequences_impl_gen::*;
}

pub mod streams {
    pub use super::streams_dto_gen::*;
    pub use super::streams_ext::*;
    pub use super::streams_gen::*;
    pub use super::streams_impl_gen::*;
}

pub mod tags {
    pub use super::tags_dto_gen::*;
    pub use super::tags_ext::*;
    pub use super::tags_gen::*;
    pub use super::tags_impl_gen::*;
}

pub mod tasks {
    pub use super::tasks_dto_gen::*;
    pub use super::tasks_ext::*;
    pub use super::tasks_gen::*;
    pub use super::tasks_impl_gen::*;
}

pub mod views {
    pub use super::views_dto_gen::*;
    pub use super::views_ext::*;
    pub use super::views_gen::*;
    pub use super::views_impl_gen::*;
}

impl Client {
    pub fn databases(&self) -> databases::Databases<'_> {
        databases::Databases::new(self)
    }

    pub fn database_roles(&self) -> database_roles::DatabaseRoles<'_> {
        database_roles::DatabaseRoles::new(self)
    }

    pub fn functions(&self) -> functions::Functions<'_> {
        functions::Functions::new(self)
    }

    pub fn masking_policies(&self) -> masking_policies::MaskingPolicies<'_> {
        masking_policies::MaskingPolicies::new(self)
    }

    pub fn pipes(&self) -> pipes::Pipes<'_> {
        pipes::Pipes::new(self)
    }

    pub fn resource_monitors(&self) -> resource_monitors::ResourceMonitors<'_> {
        resource_monitors::ResourceMonitors::new(self)
    }

    pub fn roles(&self) -> roles::Roles<'_> {
        roles::Roles::new(self)
    }

    pub fn schemas(&self) -> schemas::Schemas<'_> {
        schemas::Schemas::new(self)
    }

    pub fn sequences(&self) -> sequences::Sequences<'_> {
        sequences::Sequences::new(self)
    }

    pub fn sessions(&self) -> sessions::Sessions<'_> {
        sessions::Sessions::new(self)
    }

    pub fn shares(&self) -> shares::Shares<'_> {
        shares::Shares::new(self)
    }

    pub fn streams(&self) -> streams::Streams<'_> {
        streams::Streams::new(self)
    }

    /// `SYSTEM$*` functions, ex. `SYSTEM$GET_TAG`.
    pub fn system_functions(&self) -> system_functions::SystemFunctions<'_> {
        system_functions::SystemFunctions::new(self)
    }

    pub fn tables(&self) -> tables::Tables<'_> {
        tables::Tables::new(self)
    }

    pub fn tags(&self) -> tags::Tags<'_> {
        tags::Tags::new(self)
    }

    pub fn tasks(&self) -> tasks::Tasks<'_> {
        tasks::Tasks::new(self)
    }

    pub fn users(&self) -> users::Users<'_> {
        users::Users::new(self)
    }

    pub fn views(&self) -> views::Views<'_> {
        views::Views::new(self)
    }

    pub fn warehouses(&self) -> warehouses::Warehouses<'_> {
        warehouses::Warehouses::new(self)
    }
}
