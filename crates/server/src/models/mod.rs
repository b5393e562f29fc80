//! Entity models and request payloads.
//!
//! Row types derive `sqlx::FromRow` and `Serialize`; they are returned to
//! clients as-is. Payload types derive `Deserialize` and are validated with
//! [`Validate`] before they reach a repository.

pub mod api_key;
pub mod category;
pub mod menu_item;
pub mod order;
pub mod payment;
pub mod user;
pub mod validation;

pub use api_key::{ApiKey, IssuedApiKey, NewApiKey, VerifyApiKey};
pub use category::{Category, CategoryChanges, NewCategory};
pub use menu_item::{MenuItem, MenuItemChanges, NewMenuItem};
pub use order::{NewOrder, Order, OrderChanges};
pub use payment::{NewPayment, Payment, PaymentChanges};
pub use user::{CurrentUser, NewUser, User, UserChanges};
pub use validation::{Validate, ValidationError};
