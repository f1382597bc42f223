//! Drinkcalc Status Tool
//!
//! Provides runtime status information about the drinkcalc service.

use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;
use sysinfo::{Pid, ProcessesToUpdate, System};

use crate::build_info::BuildInfo;
use crate::catalog::Catalog;

/// Drink calculation instructions for AI assistants
pub const DRINK_INSTRUCTIONS: &str = r#"
# Drink Calculator Instructions

This guide explains how to estimate a mixed drink's strength and nutrition with the drinkcalc tools.

## Overview

A drink is described by:
1. **Alcohols** - spirits, liqueurs, wines, and beers, each with a volume and an ABV
2. **Mixers** - non-alcoholic ingredients, each with a volume
3. **Serving options** - prep method, ice type, serving time, glass, and rim

`calculate_drink` returns the volume and ABV as served (`start_*`), the volume and ABV after the ice
has melted (`end_*`), and total calories, sugar, carbs, fat, and sodium.

---

## Volumes and Units

Volumes default to US fluid ounces. Each ingredient may carry a `unit`:

| Unit | Meaning |
|------|---------|
| `oz` | fluid ounce (default) |
| `ml`, `cl`, `l` | metric volumes |
| `tsp`, `tbsp`, `cup` | kitchen measures |
| `barspoon` | 1/6 oz |
| `dash` | 1/32 oz |
| `shot` | 1.5 oz |
| `jigger` | 2 oz |

An unknown unit makes that ingredient invalid and it is left out of the totals.

---

## ABV

- Give `abv` (percent, 0-100) when the bottle is known. It is used exactly as given, including 0.
- Omit `abv` for common spirits and the default table value is used (vodka 40, bourbon 45, mezcal 42, ...).
- Use `lookup_ingredient` to see the default ABV and per-ounce nutrition for a name.
- An alcohol with no usable ABV or volume is excluded; the response reports how many rows were excluded.

---

## Dilution

Water is added in two stages:

1. **Prep** - mixing with ice (`shaken_neat`, `shaken_over_ice`, `stirred_neat`, `stirred_over_ice`,
   `built_over_ice`, `built_neat`, `built_neat_served_ice`)
2. **Service** - ice melting in the glass (`crushed`, `small_cube`, `large_cube`, `top_hat`, `none`)

Both stages scale with serving time (`shot`, `sipped`, `nursed`). Service melt also scales with the square
root of `ice_pieces` relative to the glass's typical load; omit `ice_pieces` for a normally filled glass.

Glasses: `rocks`, `highball`, `collins`, `coupe`, `martini`, `nick_and_nora`, `wine`, `flute`, `pint`,
`copper_mug`, `hurricane`, `shot`.

Rims: `none`, `sugar`, `salt`, `tajin`, `cinnamon_sugar` (added once per drink).

Unknown option names are accepted and add no dilution.

---

## Mixers

Mixer nutrition comes from the built-in table by name (`tonic`, `cola`, `lime juice`, `simple syrup`, ...).
Unknown mixers add volume but no nutrition. Pass `sugar_per_oz` to override a mixer's sugar; carbs and
calories shift by the same difference (4 kcal per gram).

---

## Saving Drinks

```
save_drink(name: "House Negroni", alcohols: [...], mixers: [...], prep_method: "stirred_over_ice", ...)
```

Names are case-insensitive: saving "house negroni" later replaces the same drink.

| Task | Tool |
|------|------|
| Calculate a drink | `calculate_drink` |
| Look up an ingredient | `lookup_ingredient` |
| Save a drink | `save_drink` |
| View a saved drink | `get_saved_drink` |
| List saved drinks | `list_saved_drinks` |
| Delete a saved drink | `delete_saved_drink` |
| Refresh cached results | `recalculate_saved_drinks` |
| Browse classics | `list_classics`, `get_classic` |
| Find drinks by ABV/calories/sugar | `suggest_recipes` |

## Notes

- Results are estimates. Ethanol is counted at 0.789 g/ml and 7 kcal/g.
- Spirits add only ethanol calories; liqueurs, wines, and beers also add sugar and carbs.
"#;

/// Runtime status of the drinkcalc service
#[derive(Debug, Clone, Serialize)]
pub struct DrinkcalcStatus {
    /// Build information
    pub build_number: u64,
    pub build_timestamp: &'static str,
    pub version: &'static str,

    /// Database information
    pub database_path: String,
    pub database_size_bytes: Option<u64>,
    pub saved_drinks: Option<i64>,

    /// Catalog information
    pub catalog_source: String,
    pub catalog_size: usize,
    pub catalog_loaded_at: String,

    /// Process information
    pub uptime_seconds: u64,
    pub process_id: u32,
    pub memory_usage_bytes: u64,
}

/// Status tracker for collecting runtime information
pub struct StatusTracker {
    start_time: Instant,
    database_path: PathBuf,
}

impl StatusTracker {
    /// Create a new status tracker
    pub fn new(database_path: PathBuf) -> Self {
        Self {
            start_time: Instant::now(),
            database_path,
        }
    }

    /// Get the current status
    pub fn get_status(&self, catalog: &Catalog, saved_drinks: Option<i64>) -> DrinkcalcStatus {
        let build_info = BuildInfo::current();

        let database_size_bytes = std::fs::metadata(&self.database_path)
            .ok()
            .map(|m| m.len());

        let pid = std::process::id();
        let mut sys = System::new();
        sys.refresh_processes(ProcessesToUpdate::Some(&[Pid::from_u32(pid)]));

        let memory_usage_bytes = sys
            .process(Pid::from_u32(pid))
            .map(|p| p.memory())
            .unwrap_or(0);

        DrinkcalcStatus {
            build_number: build_info.build_number,
            build_timestamp: build_info.build_timestamp,
            version: build_info.version,
            database_path: self.database_path.display().to_string(),
            database_size_bytes,
            saved_drinks,
            catalog_source: catalog.source.clone(),
            catalog_size: catalog.len(),
            catalog_loaded_at: catalog.loaded_at.clone(),
            uptime_seconds: self.start_time.elapsed().as_secs(),
            process_id: pid,
            memory_usage_bytes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogSource;

    #[test]
    fn test_status_reports_catalog_and_missing_database() {
        let tracker = StatusTracker::new(PathBuf::from("/nonexistent/drinkcalc.db"));
        let catalog = Catalog::empty(&CatalogSource::Url("https://example.com/c.json".to_string()));

        let status = tracker.get_status(&catalog, Some(3));
        assert_eq!(status.database_size_bytes, None);
        assert_eq!(status.saved_drinks, Some(3));
        assert_eq!(status.catalog_size, 0);
        assert_eq!(status.catalog_source, "https://example.com/c.json");
        assert_eq!(status.process_id, std::process::id());
    }

    #[test]
    fn test_instructions_name_every_tool() {
        for tool in [
            "calculate_drink",
            "lookup_ingredient",
            "save_drink",
            "get_saved_drink",
            "list_saved_drinks",
            "delete_saved_drink",
            "recalculate_saved_drinks",
            "list_classics",
            "get_classic",
            "suggest_recipes",
        ] {
            assert!(DRINK_INSTRUCTIONS.contains(tool), "missing {}", tool);
        }
    }
}
