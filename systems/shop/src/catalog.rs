//! Shop catalog entries and their TOML representation.

use data_defence_core::{Data, Hitbox, Tower, TowerKind};
use serde::Deserialize;
use thiserror::Error;

/// Catalog format version understood by [`Catalog::from_toml_str`].
pub const SUPPORTED_CATALOG_VERSION: u32 = 1;

/// Icon scale applied to catalog entries that do not specify one.
pub const DEFAULT_ITEM_SCALE: f32 = 2.0;

/// Immutable description of one buyable tower type.
#[derive(Clone, Debug, PartialEq)]
pub struct ShopItemTemplate {
    name: String,
    description: String,
    price: Data,
    tower: Tower,
    scale: f32,
}

impl ShopItemTemplate {
    /// Creates a template drawn at the default scale.
    #[must_use]
    pub fn new<N, D>(name: N, description: D, price: Data, tower: Tower) -> Self
    where
        N: Into<String>,
        D: Into<String>,
    {
        Self {
            name: name.into(),
            description: description.into(),
            price,
            tower,
            scale: DEFAULT_ITEM_SCALE,
        }
    }

    /// Overrides the scale applied to the item's icon on the shop bar.
    #[must_use]
    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    /// Display name of the item.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Longer description shown in the info panel.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Data the player pays when the placement is committed.
    #[must_use]
    pub const fn price(&self) -> Data {
        self.price
    }

    /// Prototype cloned for every purchase.
    #[must_use]
    pub const fn tower(&self) -> &Tower {
        &self.tower
    }

    /// Scale applied to the item's icon on the shop bar.
    #[must_use]
    pub const fn scale(&self) -> f32 {
        self.scale
    }
}

/// Ordered list of shop item templates.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Catalog {
    items: Vec<ShopItemTemplate>,
}

impl Catalog {
    /// Creates a catalog from explicitly constructed templates.
    #[must_use]
    pub fn new(items: Vec<ShopItemTemplate>) -> Self {
        Self { items }
    }

    /// Parses a catalog from its TOML representation.
    pub fn from_toml_str(contents: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = toml::from_str(contents)?;
        if file.version != SUPPORTED_CATALOG_VERSION {
            return Err(CatalogError::UnsupportedVersion {
                found: file.version,
                expected: SUPPORTED_CATALOG_VERSION,
            });
        }

        if file.items.is_empty() {
            return Err(CatalogError::Empty);
        }

        let items = file
            .items
            .into_iter()
            .map(CatalogEntry::into_template)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { items })
    }

    /// Templates in catalog order.
    #[must_use]
    pub fn items(&self) -> &[ShopItemTemplate] {
        &self.items
    }

    /// Number of templates in the catalog.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the catalog lists no templates.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub(crate) fn into_items(self) -> Vec<ShopItemTemplate> {
        self.items
    }
}

/// Errors that can occur while parsing a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The contents were not valid catalog TOML.
    #[error("failed to parse catalog toml contents: {0}")]
    Parse(#[from] toml::de::Error),
    /// The catalog declared a version this build does not understand.
    #[error("unsupported catalog version {found}; expected {expected}")]
    UnsupportedVersion {
        /// Version declared by the catalog.
        found: u32,
        /// Version supported by this build.
        expected: u32,
    },
    /// The catalog listed no items.
    #[error("catalog does not list any items")]
    Empty,
    /// An item declared a scale that would make its icon vanish.
    #[error("catalog item `{name}` has non-positive scale {scale}")]
    InvalidScale {
        /// Name of the offending item.
        name: String,
        /// Declared scale.
        scale: f32,
    },
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CatalogFile {
    version: u32,
    #[serde(default)]
    items: Vec<CatalogEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CatalogEntry {
    name: String,
    description: String,
    price: Data,
    #[serde(default)]
    scale: Option<f32>,
    tower: TowerEntry,
}

impl CatalogEntry {
    fn into_template(self) -> Result<ShopItemTemplate, CatalogError> {
        let scale = self.scale.unwrap_or(DEFAULT_ITEM_SCALE);
        if scale.is_nan() || scale <= 0.0 {
            return Err(CatalogError::InvalidScale {
                name: self.name,
                scale,
            });
        }

        let tower = Tower::new(self.tower.kind, self.tower.hitbox);
        Ok(ShopItemTemplate::new(self.name, self.description, self.price, tower).with_scale(scale))
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct TowerEntry {
    kind: TowerKind,
    hitbox: Hitbox,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_items_in_declaration_order() {
        let contents = r#"
            version = 1

            [[items]]
            name = "Firewall"
            description = "Blocks packets."
            price = 30
            tower = { kind = "basic", hitbox = { shape = "circle", radius = 20.0 } }

            [[items]]
            name = "Scanner"
            description = "Sweeps quickly."
            price = 45
            scale = 1.5
            tower = { kind = "rapid", hitbox = { shape = "rect", width = 32.0, height = 24.0 } }
        "#;

        let catalog = Catalog::from_toml_str(contents).expect("catalog should parse");
        assert_eq!(catalog.len(), 2);

        let firewall = &catalog.items()[0];
        assert_eq!(firewall.name(), "Firewall");
        assert_eq!(firewall.price(), Data::new(30));
        assert_eq!(firewall.scale(), DEFAULT_ITEM_SCALE);
        assert_eq!(firewall.tower().kind(), TowerKind::Basic);
        assert!(!firewall.tower().is_activated());

        let scanner = &catalog.items()[1];
        assert_eq!(scanner.scale(), 1.5);
        assert_eq!(
            scanner.tower().hitbox(),
            Hitbox::Rect {
                width: 32.0,
                height: 24.0
            }
        );
    }

    #[test]
    fn rejects_unsupported_version() {
        let contents = r#"
            version = 2

            [[items]]
            name = "Firewall"
            description = "Blocks packets."
            price = 30
            tower = { kind = "basic", hitbox = { shape = "circle", radius = 20.0 } }
        "#;

        let error = Catalog::from_toml_str(contents).expect_err("version 2 must be rejected");
        assert!(matches!(
            error,
            CatalogError::UnsupportedVersion {
                found: 2,
                expected: SUPPORTED_CATALOG_VERSION
            }
        ));
    }

    #[test]
    fn rejects_empty_catalog() {
        let error = Catalog::from_toml_str("version = 1").expect_err("empty catalog");
        assert!(matches!(error, CatalogError::Empty));
    }

    #[test]
    fn rejects_negative_price_and_unknown_fields() {
        let negative_price = r#"
            version = 1

            [[items]]
            name = "Firewall"
            description = "Blocks packets."
            price = -5
            tower = { kind = "basic", hitbox = { shape = "circle", radius = 20.0 } }
        "#;
        assert!(matches!(
            Catalog::from_toml_str(negative_price),
            Err(CatalogError::Parse(_))
        ));

        let unknown_field = r#"
            version = 1

            [[items]]
            name = "Firewall"
            description = "Blocks packets."
            price = 5
            img = "firewall.png"
            tower = { kind = "basic", hitbox = { shape = "circle", radius = 20.0 } }
        "#;
        assert!(matches!(
            Catalog::from_toml_str(unknown_field),
            Err(CatalogError::Parse(_))
        ));
    }

    #[test]
    fn rejects_non_positive_scale() {
        let contents = r#"
            version = 1

            [[items]]
            name = "Firewall"
            description = "Blocks packets."
            price = 5
            scale = 0.0
            tower = { kind = "basic", hitbox = { shape = "circle", radius = 20.0 } }
        "#;

        let error = Catalog::from_toml_str(contents).expect_err("zero scale must be rejected");
        assert!(
            matches!(error, CatalogError::InvalidScale { ref name, .. } if name == "Firewall"),
            "unexpected error: {error}"
        );
    }
}
