use serde::Serialize;
use std::collections::BTreeMap;

use crate::models::document::Document;

/// Documentos agrupados por tipo, en el orden en que llegan
pub type DocumentGroups = BTreeMap<String, Vec<Document>>;

pub fn group_documents(documents: Vec<Document>) -> DocumentGroups {
    let mut groups: DocumentGroups = BTreeMap::new();
    for document in documents {
        groups.entry(document.doc_type.clone()).or_default().push(document);
    }
    groups
}

// Response de una subida de documentos
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub stored: Vec<Document>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn document(doc_type: &str, version: i32) -> Document {
        Document {
            id: Uuid::new_v4(),
            vehicle_id: Uuid::nil(),
            doc_type: doc_type.to_string(),
            version,
            filename: format!("{}.pdf", Uuid::new_v4().simple()),
            original_name: "scan.pdf".to_string(),
            uploaded_at: Utc::now(),
        }
    }

    #[test]
    fn test_group_documents_keeps_order_within_type() {
        let groups = group_documents(vec![
            document("invoice", 2),
            document("contract", 1),
            document("invoice", 1),
        ]);
        assert_eq!(groups.len(), 2);
        let versions: Vec<i32> = groups["invoice"].iter().map(|d| d.version).collect();
        assert_eq!(versions, vec![2, 1]);
        assert_eq!(groups["contract"].len(), 1);
    }
}
