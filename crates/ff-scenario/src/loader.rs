//! JSON scenario loader.
//!
//! # Scenario JSON shape
//!
//! ```json
//! {
//!   "id": "cafe-on-the-plaza",
//!   "title": "Add a cafe fronting the plaza",
//!   "poi_add": [
//!     {"type": "cafe", "anchor": "center", "dy": -3, "dx": 2, "name": "Plaza Cafe"}
//!   ],
//!   "poi_update": [
//!     {"match": {"type": "grocery"}, "set": {"tags": {"hours": "7-22"}}}
//!   ],
//!   "tags": {"bias": {"cafe": 0.6}}
//! }
//! ```
//!
//! A scenario with no `poi_add`/`poi_update`/`tags` at all is a valid
//! "baseline" scenario (an empty-edits run against the unmodified grid).

use std::io::Read;
use std::path::Path;

use crate::error::ScenarioResult;
use crate::scenario::Scenario;

/// Load and validate a scenario document from a JSON file.
pub fn load_scenario(path: &Path) -> ScenarioResult<Scenario> {
    let file = std::fs::File::open(path)?;
    load_scenario_reader(file)
}

/// Like [`load_scenario`] but accepts any `Read` source (tests pass a
/// `std::io::Cursor`).
pub fn load_scenario_reader<R: Read>(reader: R) -> ScenarioResult<Scenario> {
    let scenario: Scenario = serde_json::from_reader(reader)?;
    scenario.validate()?;
    Ok(scenario)
}
