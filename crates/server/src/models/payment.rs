//! Payments recorded against orders.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use resto_core::{OrderId, PaymentId, PaymentMethod, PaymentStatus, Price};

use super::validation::{Validate, ValidationError};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct Payment {
    pub id: PaymentId,
    pub order_id: OrderId,
    pub amount: Price,
    pub method: PaymentMethod,
    pub status: PaymentStatus,
    pub paid_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewPayment {
    pub order_id: OrderId,
    pub amount: Price,
    pub method: PaymentMethod,
    #[serde(default)]
    pub status: PaymentStatus,
    #[serde(default)]
    pub paid_at: Option<DateTime<Utc>>,
}

impl Validate for NewPayment {
    fn validate(&self) -> Result<(), ValidationError> {
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PaymentChanges {
    pub order_id: Option<OrderId>,
    pub amount: Option<Price>,
    pub method: Option<PaymentMethod>,
    pub status: Option<PaymentStatus>,
    pub paid_at: Option<DateTime<Utc>>,
}

impl Validate for PaymentChanges {
    fn validate(&self) -> Result<(), ValidationError> {
        let empty = self.order_id.is_none()
            && self.amount.is_none()
            && self.method.is_none()
            && self.status.is_none()
            && self.paid_at.is_none();
        if empty {
            return Err(ValidationError::NoChanges);
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_new_payment_from_json() {
        let payment: NewPayment =
            serde_json::from_str(r#"{"order_id":3,"amount":"45000.00","method":"qris"}"#).unwrap();
        assert_eq!(payment.method, PaymentMethod::Qris);
        assert_eq!(payment.status, PaymentStatus::Pending);
        assert!(payment.paid_at.is_none());
    }

    #[test]
    fn test_unknown_method_rejected() {
        assert!(
            serde_json::from_str::<NewPayment>(r#"{"order_id":3,"amount":1,"method":"bitcoin"}"#)
                .is_err()
        );
    }
}
