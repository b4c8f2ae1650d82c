//! Ship design catalog loader.

use std::collections::BTreeSet;
use std::path::Path;

use battle_core::{DesignTable, ShipDesign};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file, ron_options};

/// Design catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DesignCatalog {
    pub designs: Vec<ShipDesign>,
}

/// Loader for ship design catalogs from RON files.
pub struct DesignLoader;

impl DesignLoader {
    /// Load a design catalog from a RON file.
    ///
    /// Fails if two designs share the same player and id.
    pub fn load(path: &Path) -> LoadResult<DesignTable> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<DesignTable> {
        let catalog: DesignCatalog = ron_options()
            .from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse design catalog RON: {}", e))?;

        let mut seen = BTreeSet::new();
        for design in &catalog.designs {
            if !seen.insert((design.player, design.id)) {
                anyhow::bail!(
                    "Duplicate {} for player {} ({})",
                    design.id,
                    design.player,
                    design.name
                );
            }
        }

        Ok(catalog.designs.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use battle_core::{DesignId, DesignOracle, PlayerId, WeaponKind};

    const CATALOG: &str = r#"
        (
            designs: [
                (
                    id: 1,
                    player: 1,
                    name: "Stalwart Defender",
                    armor: 275,
                    initiative: 3,
                    movement: 2,
                    weapons: [
                        (name: "Beta Torpedo", kind: Torpedo, power: 12, range: 4, accuracy: 45, initiative: 1, quantity: 1),
                        (name: "X-Ray Laser", kind: Beam, power: 16, range: 1, initiative: 9, quantity: 1),
                    ],
                ),
                (
                    id: 1,
                    player: 2,
                    name: "Teamster",
                    armor: 100,
                    cargo_capacity: 70,
                ),
            ],
        )
    "#;

    #[test]
    fn parses_designs_with_defaults() {
        let table = DesignLoader::parse(CATALOG).unwrap();

        let destroyer = table.design(PlayerId(1), DesignId(1)).unwrap();
        assert_eq!(destroyer.weapons.len(), 2);
        assert_eq!(destroyer.weapons[0].kind, WeaponKind::Torpedo);
        assert_eq!(destroyer.weapons[1].accuracy, 0);

        let freighter = table.design(PlayerId(2), DesignId(1)).unwrap();
        assert_eq!(freighter.shields, 0);
        assert!(!freighter.is_armed());
        assert_eq!(freighter.cargo_capacity, 70);
    }

    #[test]
    fn rejects_duplicate_designs() {
        let duplicated = r#"(designs: [
            (id: 4, player: 1, name: "A", armor: 10),
            (id: 4, player: 1, name: "B", armor: 20),
        ])"#;

        let error = DesignLoader::parse(duplicated).unwrap_err();
        assert!(error.to_string().contains("Duplicate"));
    }

    #[test]
    fn loads_from_disk() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("designs.ron");
        std::fs::write(&path, CATALOG).unwrap();

        let table = DesignLoader::load(&path).unwrap();
        assert_eq!(table.len(), 2);

        assert!(DesignLoader::load(&temp_dir.path().join("missing.ron")).is_err());
    }
}
