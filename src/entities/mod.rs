//! sea-orm entities for the store.
//!
//! Parent records keep denormalized child-id lists in JSON columns
//! (`category.product_ids`, `work_schedule.work_shift_ids`, ...). They are
//! only ever appended to, inside the same transaction that inserts the child.

pub mod category;
pub mod importing_request;
pub mod product;
pub mod supplier;
pub mod user;
pub mod work_assignment;
pub mod work_schedule;
pub mod work_shift;

use sea_orm::entity::prelude::Json;
use uuid::Uuid;

/// Reads a JSON id-list column. Entries that are not UUIDs are skipped.
pub fn id_list(value: &Json) -> Vec<Uuid> {
    value
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(|item| item.as_str())
                .filter_map(|s| Uuid::parse_str(s).ok())
                .collect()
        })
        .unwrap_or_default()
}

/// Returns the id list with `id` appended, unless it is already present.
pub fn append_id(value: &Json, id: Uuid) -> Json {
    let mut ids = id_list(value);
    if !ids.contains(&id) {
        ids.push(id);
    }
    ids_to_json(&ids)
}

pub fn ids_to_json(ids: &[Uuid]) -> Json {
    Json::Array(ids.iter().map(|id| Json::String(id.to_string())).collect())
}

/// Empty id list for freshly created parents
pub fn empty_ids() -> Json {
    Json::Array(Vec::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn append_keeps_order_and_skips_duplicates() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();

        let list = append_id(&empty_ids(), a);
        let list = append_id(&list, b);
        let list = append_id(&list, a);

        assert_eq!(id_list(&list), vec![a, b]);
    }

    #[test]
    fn malformed_entries_are_ignored() {
        let id = Uuid::new_v4();
        let value = json!([id.to_string(), "not-a-uuid", 7]);
        assert_eq!(id_list(&value), vec![id]);
        assert!(id_list(&json!(null)).is_empty());
    }
}
