//! API Records
//!
//! Wire shapes of the REST API resources. The API is loose about types: numbers may arrive as
//! JSON numbers or numeric strings, flags as booleans or `0`/`1`, and dates may carry a time
//! part. Records accept all of those and are validated when converted into domain types.

use std::str::FromStr;

use carta::{
    categories::{Category, CategoryId},
    coupons::{Coupon, CouponDefinitionError, CouponId, CouponKind},
    products::{Product, ProductId},
};
use jiff::civil::Date;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while converting API records into domain types.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RecordError {
    /// The coupon kind is neither `porcentaje` nor `monto`.
    #[error("coupon {code}: unknown coupon kind {kind:?}")]
    UnknownCouponKind {
        /// Coupon code
        code: String,

        /// Kind as sent by the API
        kind: String,
    },

    /// A date field could not be parsed.
    #[error("{record}: invalid {field} {value:?}")]
    InvalidDate {
        /// Record the date belongs to
        record: String,

        /// Field name
        field: &'static str,

        /// Raw value
        value: String,
    },

    /// A product has a negative price.
    #[error("product {id}: negative price {price}")]
    NegativePrice {
        /// Product id
        id: ProductId,

        /// Price as sent by the API
        price: Decimal,
    },

    /// The coupon's definition is inconsistent.
    #[error(transparent)]
    InvalidCoupon(#[from] CouponDefinitionError),
}

/// Coupon kind as named on the wire.
pub fn coupon_kind_name(kind: CouponKind) -> &'static str {
    match kind {
        CouponKind::Percentage => "porcentaje",
        CouponKind::FixedAmount => "monto",
    }
}

fn parse_coupon_kind(code: &str, kind: &str) -> Result<CouponKind, RecordError> {
    match kind.trim().to_lowercase().as_str() {
        "porcentaje" | "percentage" => Ok(CouponKind::Percentage),
        "monto" | "fijo" | "fixed" => Ok(CouponKind::FixedAmount),
        _ => Err(RecordError::UnknownCouponKind {
            code: code.to_string(),
            kind: kind.to_string(),
        }),
    }
}

fn parse_date(record: &str, field: &'static str, value: &str) -> Result<Date, RecordError> {
    value
        .trim()
        .split(['T', ' '])
        .next()
        .and_then(|day| Date::from_str(day).ok())
        .ok_or_else(|| RecordError::InvalidDate {
            record: record.to_string(),
            field,
            value: value.to_string(),
        })
}

/// A coupon as returned by `GET /api/cupon`.
#[derive(Debug, Clone, Deserialize)]
pub struct CouponRecord {
    /// Coupon id
    #[serde(rename = "id_cupon", default, deserialize_with = "lenient::optional_number")]
    pub id: Option<u64>,

    /// Code typed by customers
    #[serde(rename = "codigo")]
    pub code: String,

    /// `porcentaje` or `monto`
    #[serde(rename = "tipo")]
    pub kind: String,

    /// Percentage or amount
    #[serde(rename = "valor", deserialize_with = "lenient::decimal")]
    pub value: Decimal,

    /// Product scope, unscoped when null or 0
    #[serde(rename = "id_producto", default, deserialize_with = "lenient::optional_id")]
    pub product_id: Option<u64>,

    /// Category scope, unscoped when null or 0
    #[serde(rename = "id_categoria", default, deserialize_with = "lenient::optional_id")]
    pub category_id: Option<u64>,

    /// First valid day
    #[serde(rename = "fecha_inicio")]
    pub starts_on: String,

    /// Last valid day
    #[serde(rename = "fecha_fin")]
    pub ends_on: String,

    /// Whether the coupon is switched on, off when missing or null
    #[serde(rename = "estado", default, deserialize_with = "lenient::strict_flag")]
    pub active: bool,

    /// Number of uses allowed
    #[serde(rename = "cantidad_total", default, deserialize_with = "lenient::optional_number")]
    pub total_quantity: Option<u32>,

    /// Number of uses so far
    #[serde(rename = "cantidad_usada", default, deserialize_with = "lenient::optional_number")]
    pub used_quantity: Option<u32>,
}

impl TryFrom<CouponRecord> for Coupon {
    type Error = RecordError;

    fn try_from(record: CouponRecord) -> Result<Self, Self::Error> {
        let label = format!("coupon {}", record.code);
        let kind = parse_coupon_kind(&record.code, &record.kind)?;
        let starts_on = parse_date(&label, "fecha_inicio", &record.starts_on)?;
        let ends_on = parse_date(&label, "fecha_fin", &record.ends_on)?;

        let mut coupon = Coupon::new(record.code, kind, record.value, starts_on, ends_on)
            .with_active(record.active);

        coupon.id = record.id.map(CouponId::new);
        coupon.product_id = record.product_id.map(ProductId::new);
        coupon.category_id = record.category_id.map(CategoryId::new);
        coupon.total_quantity = record.total_quantity;
        coupon.used_quantity = record.used_quantity;

        coupon.validate()?;

        Ok(coupon)
    }
}

/// Body of `POST /api/cupon` and `PUT /api/cupon/{id}`.
#[derive(Debug, Clone, Serialize)]
pub struct CouponPayload<'a> {
    #[serde(rename = "codigo")]
    code: &'a str,

    #[serde(rename = "tipo")]
    kind: &'static str,

    #[serde(rename = "valor")]
    value: Decimal,

    #[serde(rename = "id_categoria")]
    category_id: Option<u64>,

    #[serde(rename = "id_producto")]
    product_id: Option<u64>,

    #[serde(rename = "fecha_inicio")]
    starts_on: Date,

    #[serde(rename = "fecha_fin")]
    ends_on: Date,

    #[serde(rename = "estado")]
    active: bool,

    #[serde(rename = "cantidad_total")]
    total_quantity: Option<u32>,
}

impl<'a> From<&'a Coupon> for CouponPayload<'a> {
    fn from(coupon: &'a Coupon) -> Self {
        Self {
            code: coupon.code.trim(),
            kind: coupon_kind_name(coupon.kind),
            value: coupon.value,
            category_id: coupon.category_id.map(CategoryId::get),
            product_id: coupon.product_id.map(ProductId::get),
            starts_on: coupon.starts_on,
            ends_on: coupon.ends_on,
            active: coupon.active,
            total_quantity: coupon.total_quantity,
        }
    }
}

/// A product as returned by `GET /api/producto`.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductRecord {
    /// Product id
    #[serde(rename = "id_producto", deserialize_with = "lenient::number")]
    pub id: u64,

    /// Display name
    #[serde(rename = "nombre")]
    pub name: String,

    /// Long description
    #[serde(rename = "descripcion", default)]
    pub description: Option<String>,

    /// Unit price
    #[serde(rename = "precio", deserialize_with = "lenient::decimal")]
    pub price: Decimal,

    /// Category id
    #[serde(rename = "id_categoria", deserialize_with = "lenient::number")]
    pub category_id: u64,

    /// Image path
    #[serde(rename = "imagen_url", default)]
    pub image_url: Option<String>,

    /// Whether the product is published
    #[serde(rename = "estado", default = "lenient::enabled", deserialize_with = "lenient::flag")]
    pub active: bool,
}

impl TryFrom<ProductRecord> for Product {
    type Error = RecordError;

    fn try_from(record: ProductRecord) -> Result<Self, Self::Error> {
        let id = ProductId::new(record.id);

        if record.price.is_sign_negative() && !record.price.is_zero() {
            return Err(RecordError::NegativePrice {
                id,
                price: record.price,
            });
        }

        Ok(Product {
            id,
            name: record.name,
            description: record.description.filter(|text| !text.trim().is_empty()),
            price: record.price,
            category_id: CategoryId::new(record.category_id),
            image_url: record.image_url.unwrap_or_default(),
            active: record.active,
        })
    }
}

/// A category as returned by `GET /api/categorias`.
#[derive(Debug, Clone, Deserialize)]
pub struct CategoryRecord {
    /// Category id
    #[serde(rename = "id_categoria", deserialize_with = "lenient::number")]
    pub id: u64,

    /// Display name
    #[serde(rename = "nombre")]
    pub name: String,

    /// Banner text
    #[serde(rename = "descripcion", default)]
    pub description: Option<String>,

    /// Image path
    #[serde(rename = "imagen_url", default)]
    pub image_url: Option<String>,

    /// Whether the category is published
    #[serde(rename = "estado", default = "lenient::enabled", deserialize_with = "lenient::flag")]
    pub active: bool,
}

impl From<CategoryRecord> for Category {
    fn from(record: CategoryRecord) -> Self {
        Category {
            id: CategoryId::new(record.id),
            name: record.name,
            description: record.description.filter(|text| !text.trim().is_empty()),
            image_url: record.image_url.filter(|path| !path.trim().is_empty()),
            active: record.active,
        }
    }
}

/// The restaurant profile returned by `GET /api/empresa`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CompanyRecord {
    /// Trading name
    #[serde(rename = "nombre", default)]
    pub name: String,

    /// Opening hours, free text
    #[serde(rename = "horario", default)]
    pub schedule: Option<String>,

    /// Street address
    #[serde(rename = "ubicacion", default)]
    pub address: Option<String>,

    /// Presentation video
    #[serde(rename = "video_pres_url", default)]
    pub video_url: Option<String>,

    /// Facebook page
    #[serde(default)]
    pub facebook_url: Option<String>,

    /// Instagram profile
    #[serde(default)]
    pub instagram_url: Option<String>,

    /// TikTok profile
    #[serde(default)]
    pub tiktok_url: Option<String>,

    /// Logo image path
    #[serde(default)]
    pub logo_url: Option<String>,

    /// Cover image path
    #[serde(rename = "portada_url", default)]
    pub cover_url: Option<String>,
}

mod lenient {
    use std::{fmt::Display, str::FromStr};

    use rust_decimal::Decimal;
    use serde::{Deserialize, Deserializer, de::Error};
    use serde_json::Number;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Bool(bool),
        Number(Number),
        Text(String),
    }

    impl Raw {
        fn text(&self) -> String {
            match self {
                Raw::Bool(value) => value.to_string(),
                Raw::Number(value) => value.to_string(),
                Raw::Text(value) => value.trim().to_string(),
            }
        }
    }

    fn parse<T, E>(raw: &Raw) -> Result<T, E>
    where
        T: FromStr,
        T::Err: Display,
        E: Error,
    {
        let text = raw.text();

        text.parse::<T>()
            .map_err(|source| E::custom(format!("invalid number {text:?}: {source}")))
    }

    pub(super) fn enabled() -> bool {
        true
    }

    pub(super) fn decimal<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Raw::deserialize(deserializer)?;

        parse(&raw)
    }

    pub(super) fn number<'de, D, T>(deserializer: D) -> Result<T, D::Error>
    where
        D: Deserializer<'de>,
        T: FromStr,
        T::Err: Display,
    {
        let raw = Raw::deserialize(deserializer)?;

        parse(&raw)
    }

    pub(super) fn optional_number<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: FromStr,
        T::Err: Display,
    {
        match Option::<Raw>::deserialize(deserializer)? {
            None => Ok(None),
            Some(Raw::Text(text)) if text.trim().is_empty() => Ok(None),
            Some(raw) => parse(&raw).map(Some),
        }
    }

    pub(super) fn optional_id<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let id: Option<u64> = optional_number(deserializer)?;

        Ok(id.filter(|&id| id != 0))
    }

    fn parse_flag<E: Error>(raw: Option<Raw>, missing: bool) -> Result<bool, E> {
        match raw {
            None => Ok(missing),
            Some(Raw::Bool(value)) => Ok(value),
            Some(raw) => match raw.text().to_lowercase().as_str() {
                "1" | "true" | "activo" => Ok(true),
                "0" | "false" | "inactivo" => Ok(false),
                other => Err(E::custom(format!("invalid flag {other:?}"))),
            },
        }
    }

    /// Null reads as on.
    pub(super) fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
    where
        D: Deserializer<'de>,
    {
        parse_flag(Option::<Raw>::deserialize(deserializer)?, true)
    }

    /// Null reads as off.
    pub(super) fn strict_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
    where
        D: Deserializer<'de>,
    {
        parse_flag(Option::<Raw>::deserialize(deserializer)?, false)
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;
    use rust_decimal_macros::dec;
    use serde_json::json;
    use testresult::TestResult;

    use super::*;

    fn coupon_json() -> serde_json::Value {
        json!({
            "id_cupon": 7,
            "codigo": "X10",
            "tipo": "porcentaje",
            "valor": "10.00",
            "id_producto": null,
            "id_categoria": "3",
            "fecha_inicio": "2025-03-01",
            "fecha_fin": "2025-03-31 23:59:59",
            "estado": 1,
            "cantidad_total": "50",
            "cantidad_usada": 4
        })
    }

    #[test]
    fn coupon_record_accepts_loose_types() -> TestResult {
        let record: CouponRecord = serde_json::from_value(coupon_json())?;
        let coupon = Coupon::try_from(record)?;

        assert_eq!(coupon.id, Some(CouponId::new(7)));
        assert_eq!(coupon.kind, CouponKind::Percentage);
        assert_eq!(coupon.value, dec!(10.00));
        assert_eq!(coupon.product_id, None);
        assert_eq!(coupon.category_id, Some(CategoryId::new(3)));
        assert_eq!(coupon.starts_on, date(2025, 3, 1));
        assert_eq!(coupon.ends_on, date(2025, 3, 31));
        assert!(coupon.active);
        assert_eq!(coupon.usage().as_deref(), Some("4/50"));

        Ok(())
    }

    #[test]
    fn unknown_coupon_kind_is_rejected() -> TestResult {
        let mut value = coupon_json();
        value["tipo"] = json!("regalo");

        let record: CouponRecord = serde_json::from_value(value)?;

        assert!(matches!(
            Coupon::try_from(record),
            Err(RecordError::UnknownCouponKind { ref kind, .. }) if kind == "regalo"
        ));

        Ok(())
    }

    #[test]
    fn percentage_above_hundred_is_rejected() -> TestResult {
        let mut value = coupon_json();
        value["valor"] = json!(150);

        let record: CouponRecord = serde_json::from_value(value)?;

        assert!(matches!(
            Coupon::try_from(record),
            Err(RecordError::InvalidCoupon(
                CouponDefinitionError::PercentageOutOfRange(_)
            ))
        ));

        Ok(())
    }

    #[test]
    fn inverted_window_is_rejected() -> TestResult {
        let mut value = coupon_json();
        value["fecha_inicio"] = json!("2025-04-01");

        let record: CouponRecord = serde_json::from_value(value)?;

        assert!(matches!(
            Coupon::try_from(record),
            Err(RecordError::InvalidCoupon(
                CouponDefinitionError::InvertedValidity { .. }
            ))
        ));

        Ok(())
    }

    #[test]
    fn unparsable_date_names_the_record() -> TestResult {
        let mut value = coupon_json();
        value["fecha_fin"] = json!("31/03/2025");

        let record: CouponRecord = serde_json::from_value(value)?;
        let error = Coupon::try_from(record).err().ok_or("expected an error")?;

        assert_eq!(
            error.to_string(),
            "coupon X10: invalid fecha_fin \"31/03/2025\""
        );

        Ok(())
    }

    #[test]
    fn coupon_without_state_is_inactive() -> TestResult {
        let mut missing = coupon_json();
        missing
            .as_object_mut()
            .ok_or("expected an object")?
            .remove("estado");

        let mut null = coupon_json();
        null["estado"] = json!(null);

        for value in [missing, null] {
            let record: CouponRecord = serde_json::from_value(value)?;
            let coupon = Coupon::try_from(record)?;

            assert!(!coupon.active);
        }

        Ok(())
    }

    #[test]
    fn zero_scope_ids_mean_unscoped() -> TestResult {
        let mut value = coupon_json();
        value["id_producto"] = json!(0);
        value["id_categoria"] = json!("0");

        let record: CouponRecord = serde_json::from_value(value)?;
        let coupon = Coupon::try_from(record)?;

        assert_eq!(coupon.product_id, None);
        assert_eq!(coupon.category_id, None);

        Ok(())
    }

    #[test]
    fn bad_flag_fails_to_deserialize() {
        let mut value = coupon_json();
        value["estado"] = json!("quizas");

        assert!(serde_json::from_value::<CouponRecord>(value).is_err());
    }

    #[test]
    fn product_record_converts() -> TestResult {
        let record: ProductRecord = serde_json::from_value(json!({
            "id_producto": "12",
            "nombre": "Lomo Saltado",
            "descripcion": "",
            "precio": 28.5,
            "id_categoria": 2,
            "imagen_url": "uploads/lomo.jpg",
            "estado": "0"
        }))?;

        let product = Product::try_from(record)?;

        assert_eq!(product.id, ProductId::new(12));
        assert_eq!(product.price, dec!(28.5));
        assert_eq!(product.category_id, CategoryId::new(2));
        assert_eq!(product.description, None);
        assert_eq!(product.image_url, "uploads/lomo.jpg");
        assert!(!product.active);

        Ok(())
    }

    #[test]
    fn negative_price_is_rejected() -> TestResult {
        let record: ProductRecord = serde_json::from_value(json!({
            "id_producto": 1,
            "nombre": "Error",
            "precio": "-1.00",
            "id_categoria": 1
        }))?;

        assert!(matches!(
            Product::try_from(record),
            Err(RecordError::NegativePrice { .. })
        ));

        Ok(())
    }

    #[test]
    fn category_record_defaults_to_active() -> TestResult {
        let record: CategoryRecord = serde_json::from_value(json!({
            "id_categoria": 4,
            "nombre": "Bebidas",
            "imagen_url": " "
        }))?;

        let category = Category::from(record);

        assert!(category.active);
        assert_eq!(category.image_url, None);

        Ok(())
    }

    #[test]
    fn coupon_payload_uses_wire_names() -> TestResult {
        let coupon = Coupon::new(
            " LOMO5 ",
            CouponKind::FixedAmount,
            dec!(5),
            date(2025, 1, 1),
            date(2025, 1, 31),
        )
        .for_product(ProductId::new(3));

        let value = serde_json::to_value(CouponPayload::from(&coupon))?;

        assert_eq!(value["codigo"], "LOMO5");
        assert_eq!(value["tipo"], "monto");
        assert_eq!(value["id_producto"], 3);
        assert_eq!(value["id_categoria"], serde_json::Value::Null);
        assert_eq!(value["fecha_inicio"], "2025-01-01");
        assert_eq!(value["estado"], true);

        Ok(())
    }
}
