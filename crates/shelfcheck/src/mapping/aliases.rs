//! Static alias tables: known header synonyms per dataset type.
//!
//! Keys are in normalized header form (see [`normalize_header`]). Every
//! canonical name maps to itself.
//!
//! [`normalize_header`]: crate::text::normalize_header

use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::schema::DatasetType;

type AliasTable = HashMap<&'static str, &'static str>;

const SALES: &[(&str, &[&str])] = &[
    (
        "receipt_date",
        &[
            "receipt_date",
            "purchase_date",
            "transaction_date",
            "sale_date",
            "order_date",
            "date_of_purchase",
            "date",
        ],
    ),
    (
        "product_name",
        &[
            "product_name",
            "product",
            "item",
            "item_name",
            "product_description",
            "description",
            "sku_name",
        ],
    ),
    (
        "chain",
        &[
            "chain",
            "retailer",
            "retailer_name",
            "store_name",
            "store",
            "banner",
            "shop",
            "supermarket",
        ],
    ),
    (
        "sales_value",
        &[
            "sales_value",
            "sale_amount",
            "sales_amount",
            "amount",
            "value",
            "price",
            "total",
            "revenue",
            "spend",
        ],
    ),
    ("quantity", &["quantity", "qty", "units", "units_sold"]),
    ("category", &["category", "product_category", "department"]),
    ("brand", &["brand", "brand_name", "manufacturer"]),
    ("store_id", &["store_id", "store_code", "branch_id"]),
    ("receipt_id", &["receipt_id", "receipt_number", "transaction_id", "basket_id"]),
];

const OFFERS: &[(&str, &[&str])] = &[
    (
        "offer_name",
        &[
            "offer_name",
            "offer",
            "promotion",
            "promotion_name",
            "promo_name",
            "deal",
        ],
    ),
    (
        "chain",
        &["chain", "retailer", "retailer_name", "store_name", "store", "banner"],
    ),
    ("hits", &["hits", "offer_hits", "redemptions", "uses", "hit_count"]),
    ("offer_id", &["offer_id", "promotion_id", "promo_id", "promo_code"]),
    ("offer_date", &["offer_date", "hit_date", "date"]),
    ("start_date", &["start_date", "valid_from", "offer_start"]),
    ("end_date", &["end_date", "valid_to", "offer_end", "expiry_date"]),
    ("discount_value", &["discount_value", "discount", "saving", "savings"]),
    ("category", &["category", "offer_category"]),
    ("product_name", &["product_name", "product", "item"]),
];

const DEMOGRAPHICS: &[(&str, &[&str])] = &[
    (
        "age_group",
        &["age_group", "age", "age_range", "age_band", "age_bracket"],
    ),
    ("gender", &["gender", "sex"]),
    ("region", &["region", "area", "location", "county"]),
    ("household_size", &["household_size", "hh_size", "household"]),
    ("income_band", &["income_band", "income", "household_income"]),
    (
        "respondent_id",
        &["respondent_id", "panelist_id", "panel_id", "customer_id", "user_id"],
    ),
    ("chain", &["chain", "retailer", "main_retailer", "preferred_retailer"]),
];

fn build(entries: &[(&'static str, &[&'static str])]) -> AliasTable {
    let mut table = HashMap::new();
    for (canonical, aliases) in entries {
        for alias in aliases.iter() {
            table.insert(*alias, *canonical);
        }
    }
    table
}

static SALES_ALIASES: Lazy<AliasTable> = Lazy::new(|| build(SALES));
static OFFERS_ALIASES: Lazy<AliasTable> = Lazy::new(|| build(OFFERS));
static DEMOGRAPHICS_ALIASES: Lazy<AliasTable> = Lazy::new(|| build(DEMOGRAPHICS));
static EMPTY: Lazy<AliasTable> = Lazy::new(HashMap::new);

/// The alias table for a dataset type (empty for `Unknown`).
pub fn aliases_for(dataset_type: DatasetType) -> &'static AliasTable {
    match dataset_type {
        DatasetType::Sales => &*SALES_ALIASES,
        DatasetType::Offers => &*OFFERS_ALIASES,
        DatasetType::Demographics => &*DEMOGRAPHICS_ALIASES,
        DatasetType::Unknown => &*EMPTY,
    }
}
