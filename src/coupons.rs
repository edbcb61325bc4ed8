//! Coupons
//!
//! A coupon is a named discount rule with a validity window and an optional product or
//! category scope. The [`CouponBook`] holds the coupons loaded for the current session and
//! answers lookups by code.

use std::fmt;

use jiff::civil::Date;
use rust_decimal::Decimal;
use rustc_hash::FxHashMap;
use thiserror::Error;

use crate::{
    categories::CategoryId, discounts::Discountable, ids::TypedId, products::ProductId,
};

/// Coupon Id
pub type CouponId = TypedId<Coupon>;

/// How a coupon's value is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CouponKind {
    /// `value` is a percentage of the unit price.
    Percentage,

    /// `value` is a flat amount of money.
    FixedAmount,
}

impl fmt::Display for CouponKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CouponKind::Percentage => f.write_str("percentage"),
            CouponKind::FixedAmount => f.write_str("fixed amount"),
        }
    }
}

/// Which products a coupon applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CouponScope {
    /// Any product.
    Any,

    /// A single product.
    Product(ProductId),

    /// Every product in a category.
    Category(CategoryId),
}

impl CouponScope {
    /// Check whether a product falls inside this scope.
    pub fn covers(&self, product_id: ProductId, category_id: CategoryId) -> bool {
        match self {
            CouponScope::Any => true,
            CouponScope::Product(scoped) => *scoped == product_id,
            CouponScope::Category(scoped) => *scoped == category_id,
        }
    }
}

impl fmt::Display for CouponScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CouponScope::Any => f.write_str("any product"),
            CouponScope::Product(id) => write!(f, "product {id}"),
            CouponScope::Category(id) => write!(f, "category {id}"),
        }
    }
}

/// Reasons a coupon cannot be applied.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CouponError {
    /// No coupon with this code exists, or it has been switched off.
    #[error("invalid or inactive coupon: {0}")]
    InvalidOrInactive(String),

    /// Today falls outside the coupon's validity window.
    #[error("coupon {code} is expired or not yet valid ({starts_on} to {ends_on})")]
    OutsideValidity {
        /// Coupon code
        code: String,

        /// First valid day
        starts_on: Date,

        /// Last valid day
        ends_on: Date,
    },

    /// The coupon is restricted to another product or category.
    #[error("coupon {code} only applies to {scope}")]
    ScopeMismatch {
        /// Coupon code
        code: String,

        /// The scope the coupon is restricted to
        scope: CouponScope,
    },
}

/// Reasons a coupon definition is rejected.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CouponDefinitionError {
    /// The code is empty or whitespace.
    #[error("coupon code is blank")]
    BlankCode,

    /// The value is below zero.
    #[error("coupon {0} has a negative value")]
    NegativeValue(String),

    /// A percentage coupon above 100%.
    #[error("coupon {0} has a percentage above 100")]
    PercentageOutOfRange(String),

    /// The validity window ends before it starts.
    #[error("coupon {code} ends on {ends_on}, before it starts on {starts_on}")]
    InvertedValidity {
        /// Coupon code
        code: String,

        /// First valid day
        starts_on: Date,

        /// Last valid day
        ends_on: Date,
    },
}

/// A discount rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Coupon {
    /// Id assigned by the API; `None` until the coupon is created.
    pub id: Option<CouponId>,

    /// Code typed by the customer
    pub code: String,

    /// Interpretation of `value`
    pub kind: CouponKind,

    /// Percentage or amount, depending on `kind`
    pub value: Decimal,

    /// Product the coupon is restricted to
    pub product_id: Option<ProductId>,

    /// Category the coupon is restricted to
    pub category_id: Option<CategoryId>,

    /// First valid day, inclusive
    pub starts_on: Date,

    /// Last valid day, inclusive
    pub ends_on: Date,

    /// Whether the coupon is switched on
    pub active: bool,

    /// Number of redemptions allowed, when limited
    pub total_quantity: Option<u32>,

    /// Number of redemptions so far, when tracked
    pub used_quantity: Option<u32>,
}

impl Coupon {
    /// Create an active, unscoped coupon.
    pub fn new(
        code: impl Into<String>,
        kind: CouponKind,
        value: Decimal,
        starts_on: Date,
        ends_on: Date,
    ) -> Self {
        Self {
            id: None,
            code: code.into(),
            kind,
            value,
            product_id: None,
            category_id: None,
            starts_on,
            ends_on,
            active: true,
            total_quantity: None,
            used_quantity: None,
        }
    }

    /// Restrict the coupon to one product.
    #[must_use]
    pub fn for_product(mut self, product_id: ProductId) -> Self {
        self.product_id = Some(product_id);
        self
    }

    /// Restrict the coupon to one category.
    #[must_use]
    pub fn for_category(mut self, category_id: CategoryId) -> Self {
        self.category_id = Some(category_id);
        self
    }

    /// Switch the coupon on or off.
    #[must_use]
    pub fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    /// Check the definition is internally consistent.
    ///
    /// # Errors
    ///
    /// Returns a [`CouponDefinitionError`] for a blank code, a negative value, a percentage
    /// above 100, or a validity window that ends before it starts.
    pub fn validate(&self) -> Result<(), CouponDefinitionError> {
        if self.code.trim().is_empty() {
            return Err(CouponDefinitionError::BlankCode);
        }

        if self.value.is_sign_negative() && !self.value.is_zero() {
            return Err(CouponDefinitionError::NegativeValue(self.code.clone()));
        }

        if self.kind == CouponKind::Percentage && self.value > Decimal::ONE_HUNDRED {
            return Err(CouponDefinitionError::PercentageOutOfRange(
                self.code.clone(),
            ));
        }

        if self.ends_on < self.starts_on {
            return Err(CouponDefinitionError::InvertedValidity {
                code: self.code.clone(),
                starts_on: self.starts_on,
                ends_on: self.ends_on,
            });
        }

        Ok(())
    }

    /// The products this coupon applies to.
    ///
    /// A product restriction takes precedence over a category restriction.
    pub fn scope(&self) -> CouponScope {
        match (self.product_id, self.category_id) {
            (Some(product), _) => CouponScope::Product(product),
            (None, Some(category)) => CouponScope::Category(category),
            (None, None) => CouponScope::Any,
        }
    }

    /// Check whether `today` falls inside the validity window.
    pub fn is_valid_on(&self, today: Date) -> bool {
        self.starts_on <= today && today <= self.ends_on
    }

    /// Check the coupon can be applied to the target today.
    ///
    /// Checks run in order: active flag, validity window, scope.
    ///
    /// # Errors
    ///
    /// Returns the first failing check as a [`CouponError`].
    pub fn check_eligibility<T>(&self, target: &T, today: Date) -> Result<(), CouponError>
    where
        T: Discountable + ?Sized,
    {
        if !self.active {
            return Err(CouponError::InvalidOrInactive(self.code.clone()));
        }

        if !self.is_valid_on(today) {
            return Err(CouponError::OutsideValidity {
                code: self.code.clone(),
                starts_on: self.starts_on,
                ends_on: self.ends_on,
            });
        }

        let scope = self.scope();

        if !scope.covers(target.product_id(), target.category_id()) {
            return Err(CouponError::ScopeMismatch {
                code: self.code.clone(),
                scope,
            });
        }

        Ok(())
    }

    /// Usage as `used/total`, when the API tracks it.
    pub fn usage(&self) -> Option<String> {
        self.total_quantity
            .map(|total| format!("{}/{total}", self.used_quantity.unwrap_or_default()))
    }
}

/// The coupons loaded for the current session.
#[derive(Debug, Clone, Default)]
pub struct CouponBook {
    coupons: Vec<Coupon>,
    by_code: FxHashMap<String, usize>,
}

impl CouponBook {
    /// Index the given coupons by code.
    ///
    /// When a code appears more than once the first active coupon wins, falling back to the
    /// first coupon with that code.
    pub fn new(coupons: impl Into<Vec<Coupon>>) -> Self {
        let coupons = coupons.into();
        let mut by_code: FxHashMap<String, usize> = FxHashMap::default();

        for (index, coupon) in coupons.iter().enumerate() {
            let code = coupon.code.trim();
            let replace = match by_code.get(code) {
                None => true,
                Some(&existing) => {
                    coupon.active
                        && coupons
                            .get(existing)
                            .is_some_and(|current: &Coupon| !current.active)
                }
            };

            if replace {
                by_code.insert(code.to_string(), index);
            }
        }

        Self { coupons, by_code }
    }

    /// Get a coupon by code, whatever its state.
    pub fn get(&self, code: &str) -> Option<&Coupon> {
        self.by_code
            .get(code.trim())
            .and_then(|&index| self.coupons.get(index))
    }

    /// Get an active coupon by code.
    ///
    /// # Errors
    ///
    /// Returns [`CouponError::InvalidOrInactive`] when no coupon has this code or the coupon
    /// is switched off.
    pub fn lookup(&self, code: &str) -> Result<&Coupon, CouponError> {
        self.get(code)
            .filter(|coupon| coupon.active)
            .ok_or_else(|| CouponError::InvalidOrInactive(code.trim().to_string()))
    }

    /// The coupon advertised on a product card, if any.
    ///
    /// Only coupons restricted to the product or its category are advertised; unscoped
    /// coupons must be entered by code.
    pub fn promotion_for<T>(&self, target: &T, today: Date) -> Option<&Coupon>
    where
        T: Discountable + ?Sized,
    {
        self.coupons.iter().find(|coupon| {
            coupon.scope() != CouponScope::Any && coupon.check_eligibility(target, today).is_ok()
        })
    }

    /// Iterate over every coupon in load order.
    pub fn iter(&self) -> impl Iterator<Item = &Coupon> {
        self.coupons.iter()
    }

    /// Number of coupons.
    pub fn len(&self) -> usize {
        self.coupons.len()
    }

    /// Check if no coupons are loaded.
    pub fn is_empty(&self) -> bool {
        self.coupons.is_empty()
    }
}

impl From<Vec<Coupon>> for CouponBook {
    fn from(coupons: Vec<Coupon>) -> Self {
        Self::new(coupons)
    }
}
