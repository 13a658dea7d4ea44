// ==========================================
// stockbook - sheet resolver
// ==========================================
// Decides which worksheet feeds which entity. Each entity has an
// ordered alias list; the generic "Sheet1" fallback may be
// claimed by at most one entity, first-come in evaluation order
// Product -> Purchase -> Sale. An entity with no matching sheet
// simply contributes zero records.
// ==========================================

use crate::domain::types::EntityKind;
use crate::importer::workbook::{ParsedWorkbook, RawRow, Sheet};

/// Generic sheet name some tools emit; last-resort fallback.
const FALLBACK_SHEET: &str = "sheet1";

const PRODUCT_SHEETS: &[&str] = &[
    "product master",
    "products",
    "product_master",
    "productmaster",
    "product",
];

const PURCHASE_SHEETS: &[&str] = &[
    "purchase record",
    "purchases",
    "purchase_record",
    "purchaserecord",
    "purchase",
];

const SALE_SHEETS: &[&str] = &[
    "sales record",
    "sales",
    "sales_record",
    "salesrecord",
    "sale",
];

// Columns a sales row must have at least one of; trailing blank
// rows emitted by some spreadsheet tools carry none of them.
const SALE_REQUIRED_ANY: &[&str] = &[
    "product id",
    "product name",
    "customer name",
    "quantity sold",
];

// ==========================================
// ResolvedSheets
// ==========================================
#[derive(Debug, Default)]
pub struct ResolvedSheets<'a> {
    pub product: Option<&'a Sheet>,
    pub purchase: Option<&'a Sheet>,
    pub sale: Option<&'a Sheet>,
}

impl<'a> ResolvedSheets<'a> {
    pub fn for_entity(&self, entity: EntityKind) -> Option<&'a Sheet> {
        match entity {
            EntityKind::Product => self.product,
            EntityKind::Purchase => self.purchase,
            EntityKind::Sale => self.sale,
        }
    }
}

fn aliases_for(entity: EntityKind) -> &'static [&'static str] {
    match entity {
        EntityKind::Product => PRODUCT_SHEETS,
        EntityKind::Purchase => PURCHASE_SHEETS,
        EntityKind::Sale => SALE_SHEETS,
    }
}

/// Named (non-fallback) match for one entity.
fn named_match<'a>(workbook: &'a ParsedWorkbook, entity: EntityKind) -> Option<&'a Sheet> {
    aliases_for(entity)
        .iter()
        .find_map(|alias| workbook.sheet(alias))
}

/// Resolve all three entities against a workbook in one pass so
/// the fallback-claim bookkeeping stays in one place.
pub fn resolve<'a>(workbook: &'a ParsedWorkbook) -> ResolvedSheets<'a> {
    let mut resolved = ResolvedSheets::default();
    let mut fallback_claimed = false;
    let fallback = workbook.sheet(FALLBACK_SHEET);

    for entity in [EntityKind::Product, EntityKind::Purchase, EntityKind::Sale] {
        let sheet = match named_match(workbook, entity) {
            Some(sheet) => Some(sheet),
            None => {
                if fallback_claimed {
                    None
                } else if let Some(sheet) = fallback {
                    fallback_claimed = true;
                    Some(sheet)
                } else {
                    None
                }
            }
        };

        match entity {
            EntityKind::Product => resolved.product = sheet,
            EntityKind::Purchase => resolved.purchase = sheet,
            EntityKind::Sale => resolved.sale = sheet,
        }
    }

    resolved
}

/// Pre-filter for sales rows: keep only rows carrying at least one
/// of the identifying sales columns.
pub fn is_processable_sale_row(row: &RawRow) -> bool {
    row.iter().any(|(header, value)| {
        !value.is_blank() && SALE_REQUIRED_ANY.contains(&header.trim().to_lowercase().as_str())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::CellValue;

    fn sheet(name: &str) -> Sheet {
        Sheet {
            name: name.to_string(),
            rows: Vec::new(),
        }
    }

    #[test]
    fn test_named_sheet_beats_fallback() {
        let wb = ParsedWorkbook::new(vec![sheet("Sheet1"), sheet("Product Master")]);
        let resolved = resolve(&wb);
        assert_eq!(resolved.product.unwrap().name, "Product Master");
        // Fallback goes to the next unresolved entity.
        assert_eq!(resolved.purchase.unwrap().name, "Sheet1");
        assert!(resolved.sale.is_none());
    }

    #[test]
    fn test_fallback_claimed_once_by_first_entity() {
        let wb = ParsedWorkbook::new(vec![sheet("Sheet1")]);
        let resolved = resolve(&wb);
        assert_eq!(resolved.product.unwrap().name, "Sheet1");
        assert!(resolved.purchase.is_none());
        assert!(resolved.sale.is_none());
    }

    #[test]
    fn test_all_named_sheets() {
        let wb = ParsedWorkbook::new(vec![
            sheet("Sales Record"),
            sheet("Purchase Record"),
            sheet("Product Master"),
        ]);
        let resolved = resolve(&wb);
        assert_eq!(resolved.product.unwrap().name, "Product Master");
        assert_eq!(resolved.purchase.unwrap().name, "Purchase Record");
        assert_eq!(resolved.sale.unwrap().name, "Sales Record");
    }

    #[test]
    fn test_case_insensitive_aliases() {
        let wb = ParsedWorkbook::new(vec![sheet("PRODUCTS"), sheet("purchases")]);
        let resolved = resolve(&wb);
        assert_eq!(resolved.product.unwrap().name, "PRODUCTS");
        assert_eq!(resolved.purchase.unwrap().name, "purchases");
    }

    #[test]
    fn test_no_sheet_resolves_is_not_an_error() {
        let wb = ParsedWorkbook::new(vec![sheet("Notes")]);
        let resolved = resolve(&wb);
        assert!(resolved.product.is_none());
        assert!(resolved.purchase.is_none());
        assert!(resolved.sale.is_none());
    }

    #[test]
    fn test_sale_row_prefilter() {
        let mut good = RawRow::new();
        good.insert("Customer Name".to_string(), CellValue::from("Asha"));
        assert!(is_processable_sale_row(&good));

        // Trailing formatting junk without identifying columns.
        let mut junk = RawRow::new();
        junk.insert("Tax".to_string(), CellValue::Number(5.0));
        assert!(!is_processable_sale_row(&junk));
    }
}
