use super::domain::{Item, Trait};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

const STANDARD_CATALOG_CSV: &str = include_str!("../../data/items.csv");

/// Immutable item lookup keyed by item id.
#[derive(Debug, Clone, Default)]
pub struct ItemCatalog {
    items: Vec<Item>,
    index: HashMap<String, usize>,
}

impl ItemCatalog {
    pub fn from_items(items: Vec<Item>) -> Result<Self, CatalogError> {
        let mut index = HashMap::with_capacity(items.len());
        for (position, item) in items.iter().enumerate() {
            if index.insert(item.id.clone(), position).is_some() {
                return Err(CatalogError::DuplicateItem {
                    id: item.id.clone(),
                });
            }
        }

        Ok(Self { items, index })
    }

    /// The bundled 50-item IPIP marker questionnaire (`q1`..`q50`).
    pub fn standard() -> Result<Self, CatalogError> {
        Self::from_csv_reader(STANDARD_CATALOG_CSV.as_bytes())
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let file = File::open(path.as_ref())?;
        Self::from_csv_reader(file)
    }

    /// Reads `id,trait,keyed` rows.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self, CatalogError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut items = Vec::new();

        for (index, record) in csv_reader.deserialize::<CatalogRow>().enumerate() {
            let row = record?;
            // header occupies line 1
            let line = index + 2;
            let trait_key = Trait::parse(&row.trait_key).ok_or_else(|| {
                CatalogError::UnknownTrait {
                    line,
                    value: row.trait_key.clone(),
                }
            })?;
            let reversed = parse_keyed(&row.keyed).ok_or_else(|| CatalogError::UnknownKeying {
                line,
                value: row.keyed.clone(),
            })?;

            items.push(Item {
                id: row.id,
                trait_key,
                reversed,
            });
        }

        Self::from_items(items)
    }

    pub fn get(&self, id: &str) -> Option<&Item> {
        self.index.get(id).map(|position| &self.items[*position])
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Items keyed to one trait, for checking a replacement catalog's balance.
    pub fn count_for(&self, trait_key: Trait) -> usize {
        self.items
            .iter()
            .filter(|item| item.trait_key == trait_key)
            .count()
    }
}

#[derive(Debug, Deserialize)]
struct CatalogRow {
    id: String,
    #[serde(rename = "trait")]
    trait_key: String,
    #[serde(default = "default_keyed")]
    keyed: String,
}

fn default_keyed() -> String {
    "plus".to_string()
}

fn parse_keyed(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "" | "plus" | "+" | "direct" => Some(false),
        "minus" | "-" | "reverse" | "reversed" => Some(true),
        _ => None,
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("duplicate item id '{id}' in catalog")]
    DuplicateItem { id: String },
    #[error("line {line}: unknown trait '{value}'")]
    UnknownTrait { line: usize, value: String },
    #[error("line {line}: unknown keying '{value}' (expected plus or minus)")]
    UnknownKeying { line: usize, value: String },
    #[error("failed to parse catalog CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to read catalog: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_catalog_balances_traits() {
        let catalog = ItemCatalog::standard().expect("bundled catalog parses");
        assert_eq!(catalog.len(), 50);
        for trait_key in Trait::ordered() {
            assert_eq!(catalog.count_for(trait_key), 10, "{trait_key}");
        }

        let q1 = catalog.get("q1").expect("q1 present");
        assert_eq!(q1.trait_key, Trait::Extraversion);
        assert!(!q1.reversed);
        assert!(catalog.get("q2").expect("q2 present").reversed);
    }

    #[test]
    fn csv_accepts_names_and_symbols() {
        let csv = "id,trait,keyed\na,openness,+\nb,N,minus\nc,Extraversion,\n";
        let catalog = ItemCatalog::from_csv_reader(csv.as_bytes()).expect("parses");

        assert_eq!(catalog.get("a"), Some(&Item::direct("a", Trait::Openness)));
        assert_eq!(
            catalog.get("b"),
            Some(&Item::reversed("b", Trait::Neuroticism))
        );
        assert!(!catalog.get("c").expect("c present").reversed);
    }

    #[test]
    fn rejects_duplicate_ids() {
        let err = ItemCatalog::from_items(vec![
            Item::direct("q1", Trait::Openness),
            Item::reversed("q1", Trait::Neuroticism),
        ])
        .expect_err("duplicate rejected");

        assert!(matches!(err, CatalogError::DuplicateItem { id } if id == "q1"));
    }

    #[test]
    fn rejects_unknown_trait_with_line_number() {
        let csv = "id,trait,keyed\nq1,O,plus\nq2,Z,plus\n";
        let err = ItemCatalog::from_csv_reader(csv.as_bytes()).expect_err("unknown trait");

        match err {
            CatalogError::UnknownTrait { line, value } => {
                assert_eq!(line, 3);
                assert_eq!(value, "Z");
            }
            other => panic!("expected unknown trait, got {other:?}"),
        }
    }
}
