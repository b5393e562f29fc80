//! Status and role enums.
//!
//! Each enum maps to a PostgreSQL enum type created by schema sync
//! (`user_role`, `order_status`, `payment_status`, `payment_method`).
//! Wire and database spellings are both `snake_case`.

use serde::{Deserialize, Serialize};

/// Role of a user account.
///
/// A descriptive label only. No route checks it, and the open user routes
/// can set any role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(
    feature = "postgres",
    sqlx(type_name = "user_role", rename_all = "snake_case")
)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    /// Manages menu, categories and staff.
    Admin,
    /// Takes orders and records payments.
    Cashier,
    /// Self-registered diner.
    #[default]
    Customer,
}

/// Kitchen lifecycle of an order.
///
/// Clients move orders between states; no transition rules are enforced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(
    feature = "postgres",
    sqlx(type_name = "order_status", rename_all = "snake_case")
)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    Pending,
    Preparing,
    Served,
    Completed,
    Cancelled,
}

/// Settlement state of a payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(
    feature = "postgres",
    sqlx(type_name = "payment_status", rename_all = "snake_case")
)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    #[default]
    Pending,
    Paid,
    Failed,
    Refunded,
}

/// How a payment was made.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(
    feature = "postgres",
    sqlx(type_name = "payment_method", rename_all = "snake_case")
)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Cash,
    Card,
    /// Indonesian standard QR payment.
    Qris,
    Transfer,
}

/// Implements `Display` and `FromStr` using the `snake_case` wire names.
macro_rules! impl_wire_name {
    ($ty:ident { $($variant:ident => $name:literal),+ $(,)? }) => {
        impl $ty {
            /// The `snake_case` name used on the wire and in the database.
            #[must_use]
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $name,)+
                }
            }
        }

        impl ::std::fmt::Display for $ty {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl ::std::str::FromStr for $ty {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($name => Ok(Self::$variant),)+
                    _ => Err(format!(concat!("invalid ", stringify!($ty), ": {}"), s)),
                }
            }
        }
    };
}

impl_wire_name!(UserRole {
    Admin => "admin",
    Cashier => "cashier",
    Customer => "customer",
});

impl_wire_name!(OrderStatus {
    Pending => "pending",
    Preparing => "preparing",
    Served => "served",
    Completed => "completed",
    Cancelled => "cancelled",
});

impl_wire_name!(PaymentStatus {
    Pending => "pending",
    Paid => "paid",
    Failed => "failed",
    Refunded => "refunded",
});

impl_wire_name!(PaymentMethod {
    Cash => "cash",
    Card => "card",
    Qris => "qris",
    Transfer => "transfer",
});

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_display_matches_serde() {
        for status in [
            OrderStatus::Pending,
            OrderStatus::Preparing,
            OrderStatus::Served,
            OrderStatus::Completed,
            OrderStatus::Cancelled,
        ] {
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json, format!("\"{status}\""));
            assert_eq!(status.to_string().parse::<OrderStatus>().unwrap(), status);
        }
    }

    #[test]
    fn test_from_str_rejects_unknown() {
        assert_eq!("cashier".parse::<UserRole>().unwrap(), UserRole::Cashier);
        let err = "chef".parse::<UserRole>().unwrap_err();
        assert_eq!(err, "invalid UserRole: chef");
    }

    #[test]
    fn test_defaults() {
        assert_eq!(UserRole::default(), UserRole::Customer);
        assert_eq!(OrderStatus::default(), OrderStatus::Pending);
        assert_eq!(PaymentStatus::default(), PaymentStatus::Pending);
    }

    #[test]
    fn test_payment_method_wire_names() {
        let method: PaymentMethod = serde_json::from_str("\"qris\"").unwrap();
        assert_eq!(method, PaymentMethod::Qris);
        assert_eq!(PaymentMethod::Transfer.as_str(), "transfer");
    }
}
