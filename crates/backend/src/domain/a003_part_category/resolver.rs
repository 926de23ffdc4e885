use super::repository;
use crate::shared::lookup::LookupTables;
use contracts::domain::a003_part_category::PartCategory;
use sea_orm::ConnectionTrait;

/// Category path for a vendor title or part name.
///
/// Walks the keyword rules in order and returns the path of the first rule
/// with a keyword contained in `text`. Matching is case-insensitive. No match,
/// or a matched key without a path, yields the default path.
pub fn resolve_path(tables: &LookupTables, text: &str) -> Vec<String> {
    let haystack = text.to_lowercase();
    let matched = tables
        .category_keywords()
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|kw| haystack.contains(kw.as_str())))
        .map(|(key, _)| key.as_str());

    matched
        .and_then(|key| tables.category_path(key))
        .filter(|path| !path.is_empty())
        .unwrap_or_else(|| tables.default_path())
        .to_vec()
}

/// Fetches or creates every node of `path` from the root and returns the leaf.
/// An empty path is replaced by the default path.
pub async fn get_or_create_hierarchy<C: ConnectionTrait>(
    db: &C,
    tables: &LookupTables,
    path: &[String],
) -> anyhow::Result<PartCategory> {
    let path = if path.is_empty() {
        tables.default_path()
    } else {
        path
    };

    let mut current: Option<PartCategory> = None;
    for name in path {
        let parent_id = current.as_ref().map(|c| c.id);
        current = Some(repository::get_or_create(db, name, parent_id).await?);
    }

    current.ok_or_else(|| anyhow::anyhow!("Default category path is empty"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data::test_support::memory_connection;
    use std::collections::HashMap;

    fn tables() -> LookupTables {
        LookupTables::new()
            .with_category_keywords("brakes", &["brake"])
            .with_category_keywords("oil_filter", &["oil filter"])
            .with_category_keywords("oil", &["oil"])
            .with_category_keywords("orphan", &["orphan"])
            .with_category_path("brakes", &["Spare Parts", "Brakes"])
            .with_category_path("oil_filter", &["Spare Parts", "Filters", "Oil Filter"])
            .with_category_path("oil", &["Consumables", "Oil"])
    }

    fn path(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_keyword_hit_returns_mapped_path() {
        assert_eq!(
            resolve_path(&tables(), "Brake Pads"),
            path(&["Spare Parts", "Brakes"])
        );
    }

    #[test]
    fn test_first_matching_rule_wins() {
        assert_eq!(
            resolve_path(&tables(), "OIL FILTER 206"),
            path(&["Spare Parts", "Filters", "Oil Filter"])
        );
        assert_eq!(resolve_path(&tables(), "Engine oil"), path(&["Consumables", "Oil"]));
    }

    #[test]
    fn test_no_match_and_missing_path_use_default() {
        assert_eq!(resolve_path(&tables(), "Wipers"), path(&["لوازم یدکی"]));
        assert_eq!(resolve_path(&tables(), "orphan part"), path(&["لوازم یدکی"]));
    }

    #[test]
    fn test_custom_default_path() {
        let t = tables().with_default_path(&["Misc", "Other"]);
        assert_eq!(resolve_path(&t, "Wipers"), path(&["Misc", "Other"]));
    }

    #[test]
    fn test_builtin_persian_keywords() {
        let resolved = resolve_path(LookupTables::builtin(), "فیلتر روغن پژو 206");
        assert_eq!(resolved.last().map(String::as_str), Some("فیلتر روغن"));
    }

    #[tokio::test]
    async fn test_hierarchy_created_once() {
        let db = memory_connection().await;
        let t = tables();
        let leaf = get_or_create_hierarchy(&db, &t, &path(&["Spare Parts", "Brakes"]))
            .await
            .unwrap();
        let again = get_or_create_hierarchy(&db, &t, &path(&["Spare Parts", "Brakes"]))
            .await
            .unwrap();
        assert_eq!(leaf.id, again.id);
        assert_eq!(leaf.name, "Brakes");
        assert_eq!(repository::count(&db).await.unwrap(), 2);

        let root = repository::get_by_name(&db, "Spare Parts").await.unwrap().unwrap();
        assert!(root.is_root());
        assert_eq!(leaf.parent_id, Some(root.id));
    }

    #[tokio::test]
    async fn test_empty_path_uses_default() {
        let db = memory_connection().await;
        let leaf = get_or_create_hierarchy(&db, &tables(), &[]).await.unwrap();
        assert_eq!(leaf.name, "لوازم یدکی");
        assert!(leaf.is_root());
    }

    #[tokio::test]
    async fn test_no_cycles_after_conflicting_paths() {
        let db = memory_connection().await;
        let t = tables();
        for p in [
            path(&["A", "B", "C"]),
            path(&["C", "A"]),
            path(&["B", "D", "A"]),
            path(&["D", "C", "B"]),
            path(&["E", "D"]),
        ] {
            get_or_create_hierarchy(&db, &t, &p).await.unwrap();
        }

        let nodes = repository::list_all(&db).await.unwrap();
        let parents: HashMap<i32, Option<i32>> =
            nodes.iter().map(|n| (n.id, n.parent_id)).collect();
        for node in &nodes {
            let mut steps = 0;
            let mut cursor = node.parent_id;
            while let Some(id) = cursor {
                steps += 1;
                assert!(steps <= nodes.len(), "cycle through node {}", node.name);
                cursor = parents[&id];
            }
        }
        assert_eq!(nodes.len(), 5);
    }
}
