//! Human-readable sequential document identifiers

use serde::{Deserialize, Serialize};

/// The two kinds of numbered documents in the system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    Bill,
    PurchaseOrder,
}

impl DocumentKind {
    /// Key used for the kind's row in the `document_sequences` table.
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentKind::Bill => "bill",
            DocumentKind::PurchaseOrder => "purchase_order",
        }
    }

    /// Identifier prefix, e.g. `BL-004` for bills, `PO-017` for purchase
    /// orders.
    pub fn prefix(&self) -> &'static str {
        match self {
            DocumentKind::Bill => "BL",
            DocumentKind::PurchaseOrder => "PO",
        }
    }
}

/// Format an allocated sequence value as a document id.
///
/// Values are zero-padded to three digits; wider values keep all their
/// digits (`BL-004`, `BL-1024`).
pub fn format_document_id(kind: DocumentKind, sequence: i64) -> String {
    format!("{}-{:03}", kind.prefix(), sequence)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pads_to_three_digits() {
        assert_eq!(format_document_id(DocumentKind::Bill, 4), "BL-004");
        assert_eq!(format_document_id(DocumentKind::PurchaseOrder, 17), "PO-017");
        assert_eq!(format_document_id(DocumentKind::Bill, 100), "BL-100");
    }

    #[test]
    fn grows_past_three_digits() {
        assert_eq!(format_document_id(DocumentKind::Bill, 1024), "BL-1024");
    }
}
