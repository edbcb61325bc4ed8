//! Orders
//!
//! Turns a cart and the customer's checkout details into the plain-text message that is sent
//! to the restaurant.

use std::fmt;

use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;

use crate::{
    cart::Cart,
    pricing::{PricingError, Soles, currency_label, format_amount, to_soles},
};

/// Errors raised while building an order summary.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum OrderError {
    /// A required customer field is absent or blank.
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// There is nothing to order.
    #[error("the cart is empty")]
    EmptyCart,

    /// An amount could not be prepared for display.
    #[error(transparent)]
    Pricing(#[from] PricingError),
}

/// How the customer intends to pay.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    /// Cash on pickup or delivery
    #[default]
    #[serde(alias = "efectivo")]
    Cash,

    /// Yape wallet transfer
    Yape,

    /// Plin wallet transfer
    Plin,

    /// Card payment
    #[serde(alias = "tarjeta")]
    Card,
}

impl PaymentMethod {
    /// Label used in the order message.
    pub fn as_str(self) -> &'static str {
        match self {
            PaymentMethod::Cash => "efectivo",
            PaymentMethod::Yape => "yape",
            PaymentMethod::Plin => "plin",
            PaymentMethod::Card => "tarjeta",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where the order is handed over.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Fulfilment {
    /// Picked up at the restaurant, optionally served at a table.
    #[serde(alias = "recojo")]
    Pickup {
        /// Table number
        #[serde(default, alias = "mesa")]
        table: Option<String>,
    },

    /// Delivered to the customer.
    Delivery {
        /// Delivery address
        #[serde(default, alias = "direccion")]
        address: Option<String>,
    },
}

impl Default for Fulfilment {
    fn default() -> Self {
        Fulfilment::Pickup { table: None }
    }
}

impl Fulfilment {
    /// Label used in the order message.
    pub fn as_str(&self) -> &'static str {
        match self {
            Fulfilment::Pickup { .. } => "recojo",
            Fulfilment::Delivery { .. } => "delivery",
        }
    }
}

/// Checkout details entered by the customer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CustomerInfo {
    /// Customer name
    #[serde(default, alias = "nombre")]
    pub name: String,

    /// Contact phone
    #[serde(default, alias = "telefono")]
    pub phone: String,

    /// Payment method
    #[serde(default, alias = "metodo_pago")]
    pub payment: PaymentMethod,

    /// Pickup or delivery
    #[serde(default, alias = "entrega")]
    pub fulfilment: Fulfilment,

    /// Free-text note for the kitchen
    #[serde(default, alias = "observacion")]
    pub note: Option<String>,
}

impl CustomerInfo {
    /// Create checkout details with the default payment method and fulfilment.
    pub fn new(name: impl Into<String>, phone: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            phone: phone.into(),
            ..Self::default()
        }
    }

    /// Set the payment method.
    #[must_use]
    pub fn with_payment(mut self, payment: PaymentMethod) -> Self {
        self.payment = payment;
        self
    }

    /// Set the fulfilment.
    #[must_use]
    pub fn with_fulfilment(mut self, fulfilment: Fulfilment) -> Self {
        self.fulfilment = fulfilment;
        self
    }

    /// Set the kitchen note.
    #[must_use]
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }
}

/// One product line of an order summary.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderLine {
    /// Product name
    pub name: String,

    /// Units ordered
    pub quantity: u32,

    /// Amount payable for the line
    pub total: Soles,

    /// Code of the coupon applied to the line
    pub coupon: Option<String>,
}

/// A validated order, ready to be rendered as a message.
///
/// The `Mesa:`, `Dirección:` and `Observación:` lines are written only when the customer
/// filled them in; a blank table or address leaves its line out of the message.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderSummary {
    customer: CustomerInfo,
    lines: Vec<OrderLine>,
    discount: Soles,
    subtotal: Soles,
}

impl OrderSummary {
    /// Checkout details the order was built from
    pub fn customer(&self) -> &CustomerInfo {
        &self.customer
    }

    /// Ordered product lines
    pub fn lines(&self) -> &[OrderLine] {
        &self.lines
    }

    /// Total discount across lines
    pub fn discount(&self) -> &Soles {
        &self.discount
    }

    /// Amount payable
    pub fn subtotal(&self) -> &Soles {
        &self.subtotal
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

impl fmt::Display for OrderSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let customer = &self.customer;

        writeln!(f, "*Nuevo Pedido*")?;
        writeln!(f)?;
        writeln!(f, "Nombre: {}", customer.name.trim())?;
        writeln!(f, "Teléfono: {}", customer.phone.trim())?;
        writeln!(f, "Método de pago: {}", customer.payment)?;
        writeln!(f, "Entrega: {}", customer.fulfilment.as_str())?;

        match &customer.fulfilment {
            Fulfilment::Delivery { address } => {
                if let Some(address) = non_blank(address.as_deref()) {
                    writeln!(f, "Dirección: {address}")?;
                }
            }
            Fulfilment::Pickup { table } => {
                if let Some(table) = non_blank(table.as_deref()) {
                    writeln!(f, "Mesa: {table}")?;
                }
            }
        }

        if let Some(note) = non_blank(customer.note.as_deref()) {
            writeln!(f, "Observación: {note}")?;
        }

        writeln!(f)?;
        writeln!(f, "--- Productos ---")?;

        for line in &self.lines {
            writeln!(
                f,
                "• {} x{} - {}{}",
                line.name,
                line.quantity,
                currency_label(&line.total),
                format_amount(&line.total)
            )?;

            if let Some(code) = &line.coupon {
                writeln!(f, "   Cupón: {code}")?;
            }
        }

        writeln!(f)?;
        write!(
            f,
            "Total: {} {}",
            currency_label(&self.subtotal),
            format_amount(&self.subtotal)
        )
    }
}

/// Validate the checkout details and summarise the cart.
///
/// # Errors
///
/// - [`OrderError::MissingField`]: the customer's name or phone is blank.
/// - [`OrderError::EmptyCart`]: the cart has no lines.
/// - [`OrderError::Pricing`]: an amount is too large to display.
pub fn build_order_summary(cart: &Cart, customer: &CustomerInfo) -> Result<OrderSummary, OrderError> {
    if customer.name.trim().is_empty() {
        return Err(OrderError::MissingField("name"));
    }

    if customer.phone.trim().is_empty() {
        return Err(OrderError::MissingField("phone"));
    }

    if cart.is_empty() {
        return Err(OrderError::EmptyCart);
    }

    let lines = cart
        .lines()
        .iter()
        .map(|line| {
            Ok(OrderLine {
                name: line.name().to_string(),
                quantity: line.quantity(),
                total: to_soles(line.total())?,
                coupon: line.coupon().map(|coupon| coupon.code.clone()),
            })
        })
        .collect::<Result<Vec<_>, OrderError>>()?;

    Ok(OrderSummary {
        customer: customer.clone(),
        lines,
        discount: to_soles(cart.total_discount())?,
        subtotal: to_soles(cart.subtotal())?,
    })
}

/// Subtotal rendered the way the order message shows it.
///
/// # Errors
///
/// - [`OrderError::Pricing`]: the amount is too large to display.
pub fn format_total(amount: Decimal) -> Result<String, OrderError> {
    Ok(format_amount(&to_soles(amount)?))
}
