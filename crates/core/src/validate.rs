//! Per-record validation rules.
//!
//! Every product is checked independently against three rule families
//! (title, price, rating). Rules never short-circuit each other across
//! families, but within a family the first failing check wins.

use serde_json::Value;

use crate::defect::{FieldDefect, ProductDefectGroup};
use crate::product::{
    coerce_number, is_empty_value, number_value, quoted, text_of, type_name, RawProduct,
};

const NON_EMPTY_STRING: &str = "Non-empty string";
const NON_NEGATIVE_NUMBER: &str = "Non-negative number";
const VALID_NUMBER: &str = "Valid number";
const RATING_OBJECT: &str = "Object with rate property";
const RATING_RANGE: &str = "Number between 0 and 5";

/// Highest accepted `rating.rate`.
pub const MAX_RATING: f64 = 5.0;

/// Validates every product, returning one group per product with defects.
///
/// Group order follows input order; products without defects contribute
/// nothing.
pub fn validate(products: &[RawProduct]) -> Vec<ProductDefectGroup> {
    products
        .iter()
        .enumerate()
        .filter_map(|(index, product)| validate_product(index, product))
        .collect()
}

/// Validates a single product at position `index` of the collection.
pub fn validate_product(index: usize, product: &RawProduct) -> Option<ProductDefectGroup> {
    let defects: Vec<FieldDefect> = [
        check_title(product),
        check_price(product),
        check_rating(product),
    ]
    .into_iter()
    .flatten()
    .collect();

    if defects.is_empty() {
        return None;
    }

    Some(ProductDefectGroup {
        product_id: product.report_id(index),
        product_title: product.report_title(),
        defects,
    })
}

fn check_title(product: &RawProduct) -> Option<FieldDefect> {
    let Some(title) = product.field("title") else {
        return Some(FieldDefect::missing(
            "title",
            "Missing title field",
            NON_EMPTY_STRING,
        ));
    };

    if is_blank(title) {
        return Some(FieldDefect::new(
            "title",
            "Empty or whitespace-only title",
            NON_EMPTY_STRING,
            quoted(title),
        ));
    }

    None
}

fn is_blank(value: &Value) -> bool {
    is_empty_value(value) || text_of(value).trim().is_empty()
}

fn check_price(product: &RawProduct) -> Option<FieldDefect> {
    let Some(price) = product.field("price") else {
        return Some(FieldDefect::missing(
            "price",
            "Missing price field",
            NON_NEGATIVE_NUMBER,
        ));
    };

    match coerce_number(price) {
        None => Some(FieldDefect::new(
            "price",
            "Invalid price format",
            VALID_NUMBER,
            quoted(price),
        )),
        Some(value) if value < 0.0 => Some(FieldDefect::new(
            "price",
            "Negative price",
            NON_NEGATIVE_NUMBER,
            number_value(value),
        )),
        Some(_) => None,
    }
}

fn check_rating(product: &RawProduct) -> Option<FieldDefect> {
    let Some(rating) = product.field("rating") else {
        return Some(FieldDefect::missing(
            "rating",
            "Missing rating field",
            RATING_OBJECT,
        ));
    };

    let Some(rating) = rating.as_object() else {
        // A null rating is reported with the kind of an absent object.
        let kind = if rating.is_null() {
            "object"
        } else {
            type_name(rating)
        };
        return Some(FieldDefect::new(
            "rating",
            "Rating is not an object",
            RATING_OBJECT,
            Value::String(kind.to_string()),
        ));
    };

    let Some(rate) = rating.get("rate") else {
        return Some(FieldDefect::missing(
            "rating.rate",
            "Missing rate field in rating",
            RATING_RANGE,
        ));
    };

    match coerce_number(rate) {
        None => Some(FieldDefect::new(
            "rating.rate",
            "Invalid rating format",
            VALID_NUMBER,
            quoted(rate),
        )),
        Some(value) if value > MAX_RATING => Some(FieldDefect::new(
            "rating.rate",
            "Rating exceeds maximum value",
            RATING_RANGE,
            number_value(value),
        )),
        Some(value) if value < 0.0 => Some(FieldDefect::new(
            "rating.rate",
            "Negative rating",
            RATING_RANGE,
            number_value(value),
        )),
        Some(_) => None,
    }
}
