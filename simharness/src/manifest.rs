//! The two generated simulator configuration documents.
//!
//! Both documents are rendered from constants, never from runtime state, so
//! regenerating them is byte-for-byte idempotent. Paths inside the documents
//! are relative to the project root, matching what the simulator expects.

use crate::context::RunContext;
use crate::errors::HarnessError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::info;

/// Name of the single simulation scenario declared in the manifest.
pub const SCENARIO_NAME: &str = "ESP32 Mining Test";

/// Scenario timeout in milliseconds.
pub const SCENARIO_TIMEOUT_MS: u32 = 60_000;

const FIRMWARE_ELF_RELATIVE: &str = "addon/esp32/miner_esp32.ino.elf";
const FIRMWARE_BIN_RELATIVE: &str = "addon/esp32/miner_esp32.ino.bin";

/// Top-level `wokwi.toml` document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WokwiManifest {
    /// The single `[wokwi]` table.
    pub wokwi: WokwiSection,
}

/// The `[wokwi]` table of the manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WokwiSection {
    /// Manifest format version.
    pub version: u32,
    /// Project-relative path of the firmware ELF.
    pub elf: String,
    /// Project-relative path of the firmware binary.
    pub firmware: String,
    /// Declared simulation scenarios (`[[wokwi.scenario]]`).
    pub scenario: Vec<Scenario>,
}

/// One simulation scenario.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    /// Scenario display name.
    pub name: String,
    /// Scenario timeout in milliseconds.
    pub timeout: u32,
}

impl WokwiManifest {
    /// The fixed manifest the harness materializes.
    #[must_use]
    pub fn fixed() -> Self {
        Self {
            wokwi: WokwiSection {
                version: 1,
                elf: FIRMWARE_ELF_RELATIVE.to_string(),
                firmware: FIRMWARE_BIN_RELATIVE.to_string(),
                scenario: vec![Scenario {
                    name: SCENARIO_NAME.to_string(),
                    timeout: SCENARIO_TIMEOUT_MS,
                }],
            },
        }
    }

    /// Renders the manifest as TOML.
    pub fn render(&self) -> Result<String, HarnessError> {
        Ok(toml::to_string(self)?)
    }
}

/// A connection between two pins: from, to, wire color, waypoints.
pub type Connection = (String, String, String, Vec<String>);

/// One simulated part in the circuit diagram.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagramPart {
    /// Simulator part type identifier.
    #[serde(rename = "type")]
    pub part_type: String,
    /// Part id referenced from the wiring list.
    pub id: String,
    /// Vertical position.
    pub top: f64,
    /// Horizontal position.
    pub left: f64,
    /// Part attributes (LED color, resistor value).
    pub attrs: BTreeMap<String, String>,
}

impl DiagramPart {
    fn new(part_type: &str, id: &str, top: f64, left: f64) -> Self {
        Self {
            part_type: part_type.to_string(),
            id: id.to_string(),
            top,
            left,
            attrs: BTreeMap::new(),
        }
    }

    fn with_attr(mut self, key: &str, value: &str) -> Self {
        self.attrs.insert(key.to_string(), value.to_string());
        self
    }
}

/// The `diagram.json` circuit description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagramDocument {
    /// Diagram format version.
    pub version: u32,
    /// Document author field.
    pub author: String,
    /// Target editor identifier.
    pub editor: String,
    /// Simulated parts.
    pub parts: Vec<DiagramPart>,
    /// Wiring list.
    pub connections: Vec<Connection>,
    /// External part dependencies (always empty here).
    pub dependencies: BTreeMap<String, String>,
}

impl DiagramDocument {
    /// The fixed circuit the harness materializes: an ESP32 devkit, two
    /// status LEDs behind 220 ohm resistors, and serial wired to the
    /// virtual monitor.
    #[must_use]
    pub fn fixed() -> Self {
        let parts = vec![
            DiagramPart::new("wokwi-esp32-devkit-v1", "esp", 0.0, 0.0),
            DiagramPart::new("wokwi-led", "led1", -24.0, 178.67).with_attr("color", "red"),
            DiagramPart::new("wokwi-led", "led2", -24.0, 207.33).with_attr("color", "green"),
            DiagramPart::new("wokwi-resistor", "r1", 29.6, 172.8).with_attr("value", "220"),
            DiagramPart::new("wokwi-resistor", "r2", 29.6, 201.6).with_attr("value", "220"),
        ];
        let connections = vec![
            wire("esp:TX0", "$serialMonitor:RX"),
            wire("esp:RX0", "$serialMonitor:TX"),
            wire("esp:D2", "led1:A"),
            wire("led1:C", "r1:1"),
            wire("r1:2", "esp:GND.1"),
            wire("esp:D4", "led2:A"),
            wire("led2:C", "r2:1"),
            wire("r2:2", "esp:GND.2"),
        ];
        Self {
            version: 1,
            author: "simharness".to_string(),
            editor: "wokwi".to_string(),
            parts,
            connections,
            dependencies: BTreeMap::new(),
        }
    }

    /// Renders the diagram as pretty-printed JSON.
    pub fn render(&self) -> Result<String, HarnessError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

fn wire(from: &str, to: &str) -> Connection {
    (from.to_string(), to.to_string(), String::new(), Vec::new())
}

/// Writes both configuration documents under the project root, overwriting
/// any prior version. Returns the two paths written.
pub async fn materialize(ctx: &RunContext) -> Result<(String, String), HarnessError> {
    let manifest = WokwiManifest::fixed().render()?;
    let diagram = DiagramDocument::fixed().render()?;

    tokio::fs::write(ctx.manifest_path(), manifest)
        .await
        .map_err(|source| HarnessError::ArtifactWrite {
            path: ctx.manifest_path().to_path_buf(),
            source,
        })?;
    info!(path = %ctx.manifest_path().display(), "wrote simulator manifest");

    tokio::fs::write(ctx.diagram_path(), diagram)
        .await
        .map_err(|source| HarnessError::ArtifactWrite {
            path: ctx.diagram_path().to_path_buf(),
            source,
        })?;
    info!(path = %ctx.diagram_path().display(), "wrote circuit diagram");

    Ok((
        ctx.manifest_path().display().to_string(),
        ctx.diagram_path().display().to_string(),
    ))
}
