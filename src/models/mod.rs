//! Records owned by the entity backend.
//!
//! Every record is stored as a camelCase JSON document; `active` is always serialized so a
//! deactivation survives every write path.

mod category;
mod client;
mod location;
mod revenue;
mod role;
mod user;
mod workspace;

pub use category::*;
pub use client::*;
pub use location::*;
pub use revenue::*;
pub use role::*;
pub use user::*;
pub use workspace::*;

use serde::{de::DeserializeOwned, Serialize};

/// Status value of an active record.
pub const STATUS_ACTIVE: &str = "active";
/// Status value of an inactive record.
pub const STATUS_INACTIVE: &str = "inactive";
/// List filter for the client prospect view. No record computes to it.
pub const STATUS_PROSPECT: &str = "prospect";

/// Map the `active` flag to its status string.
pub fn record_status(active: bool) -> &'static str {
    if active {
        STATUS_ACTIVE
    } else {
        STATUS_INACTIVE
    }
}

/// A record the storage backend can persist under its own collection.
pub trait Entity: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Collection name in the document store.
    const COLLECTION: &'static str;
    /// Capitalized noun used in user-facing messages ("Role not found").
    const LABEL: &'static str;

    fn id(&self) -> &str;
    fn set_id(&mut self, id: String);
    fn date_created(&self) -> &str;
    fn set_date_created(&mut self, date_created: String);
    fn is_active(&self) -> bool;
    fn set_active(&mut self, active: bool);

    /// Status the list pages filter on.
    fn status(&self) -> &'static str {
        record_status(self.is_active())
    }
}

fn default_active() -> bool {
    true
}

/// Implement [`Entity`] for a record with `id`, `active` and `date_created` fields.
macro_rules! impl_entity {
    ($ty:ty, $collection:literal, $label:literal) => {
        impl $crate::models::Entity for $ty {
            const COLLECTION: &'static str = $collection;
            const LABEL: &'static str = $label;

            fn id(&self) -> &str {
                &self.id
            }

            fn set_id(&mut self, id: String) {
                self.id = id;
            }

            fn date_created(&self) -> &str {
                &self.date_created
            }

            fn set_date_created(&mut self, date_created: String) {
                self.date_created = date_created;
            }

            fn is_active(&self) -> bool {
                self.active
            }

            fn set_active(&mut self, active: bool) {
                self.active = active;
            }
        }
    };
}

pub(crate) use impl_entity;

/// Store `None` for blank optional form values.
pub fn optional_string(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}
