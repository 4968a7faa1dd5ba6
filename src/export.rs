use std::collections::HashSet;
use std::fmt;

use crate::color::{rgb_to_hex, Rgb8};
use crate::draft::{
    Draft, RoleSlot, ARABLE_RESOURCES, CAPPED_RESOURCES, GOLD_FIELDS, SPECIAL_RESOURCES,
    SUBSISTENCE_BUILDINGS,
};

/// Commit-time validation failures. Clicking and editing never raise these;
/// they are only reported when the user tries to save the draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitError {
    MissingName,
    DuplicateOrInvalidId,
    InvalidArableLand,
}

impl fmt::Display for CommitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommitError::MissingName => write!(f, "Please enter a state name."),
            CommitError::DuplicateOrInvalidId => write!(f, "State ID must be a unique number."),
            CommitError::InvalidArableLand => write!(f, "Arable land must be a number."),
        }
    }
}

impl std::error::Error for CommitError {}

/// Unsigned decimal check matching the reference's `isdigit` gate.
fn is_number(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_digit())
}

/// Serialize the draft into its text block.
///
/// A pure projection of the draft: two calls without an intervening edit
/// yield byte-identical text. Field order is fixed — id, subsistence,
/// provinces (selection order), roles (slot order), arable land, arable
/// resources, capped resources, special resource blocks.
pub fn render_state_block(draft: &Draft) -> String {
    let name = draft.name.trim().replace(' ', "_").to_uppercase();
    let mut out = format!("STATE_{} = {{\n", name);

    out.push_str(&format!("    id = {}\n", draft.id_text));

    match draft.subsistence {
        Some(i) => out.push_str(&format!(
            "    subsistence_building = \"{}\"\n",
            SUBSISTENCE_BUILDINGS[i]
        )),
        None => out.push_str("    subsistence_building = \"\"\n"),
    }

    let codes: Vec<String> = draft
        .provinces
        .iter()
        .map(|k| format!("\"{}\"", k.hex()))
        .collect();
    out.push_str(&format!("    provinces = {{ {} }}\n", codes.join(" ")));

    for slot in RoleSlot::ALL {
        if let Some(key) = draft.roles[slot.index()] {
            out.push_str(&format!("    {} = \"{}\"\n", slot.tag(), key.hex()));
        }
    }

    let arable_land = draft.arable_land.trim();
    if is_number(arable_land) {
        out.push_str(&format!("    arable_land = {}\n", arable_land));
    }

    let tags: Vec<String> = ARABLE_RESOURCES
        .iter()
        .zip(&draft.arable)
        .filter(|(_, on)| **on)
        .map(|(tag, _)| format!("\"{}\"", tag))
        .collect();
    if !tags.is_empty() {
        out.push_str(&format!("    arable_resources = {{ {} }}\n", tags.join(" ")));
    }

    let mut capped_lines = String::new();
    for (i, tag) in CAPPED_RESOURCES.iter().enumerate() {
        if draft.capped_checked[i] && !draft.capped_values[i].trim().is_empty() {
            capped_lines.push_str(&format!("        {} = {}\n", tag, draft.capped_values[i]));
        }
    }
    if !capped_lines.is_empty() {
        out.push_str("    capped_resources = {\n");
        out.push_str(&capped_lines);
        out.push_str("    }\n");
    }

    for (i, tag) in SPECIAL_RESOURCES.iter().enumerate() {
        if draft.special_checked[i] && !draft.special_values[i].trim().is_empty() {
            out.push_str("    resource = {\n");
            out.push_str(&format!("        type = \"{}\"\n", tag));
            if *tag == GOLD_FIELDS {
                out.push_str("        depleted_type = \"bg_gold_mining\"\n");
            }
            out.push_str(&format!(
                "        undiscovered_amount = {}\n",
                draft.special_values[i]
            ));
            out.push_str("    }\n");
        }
    }

    out.push_str("}\n");
    out
}

/// Commit-time checks. Mutates nothing; returns the parsed numeric id on
/// success.
pub fn validate_for_commit(draft: &Draft, registry: &StateRegistry) -> Result<u64, CommitError> {
    if draft.name.trim().is_empty() {
        return Err(CommitError::MissingName);
    }
    let id_text = draft.id_text.trim();
    if !is_number(id_text) {
        return Err(CommitError::DuplicateOrInvalidId);
    }
    let id: u64 = id_text
        .parse()
        .map_err(|_| CommitError::DuplicateOrInvalidId)?;
    if registry.is_used_id(id) {
        return Err(CommitError::DuplicateOrInvalidId);
    }
    if !is_number(draft.arable_land.trim()) {
        return Err(CommitError::InvalidArableLand);
    }
    Ok(id)
}

/// An immutable committed state: unique id, exclusive display color, and
/// the serialized text block.
pub struct StateRecord {
    pub id: u64,
    pub color: Rgb8,
    pub text: String,
}

/// Append-only collection of committed states. Owns the used-id and
/// used-color sets; both are reserved forever once a commit lands.
pub struct StateRegistry {
    records: Vec<StateRecord>,
    used_ids: HashSet<u64>,
    used_colors: HashSet<Rgb8>,
}

impl StateRegistry {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            used_ids: HashSet::new(),
            used_colors: HashSet::new(),
        }
    }

    pub fn records(&self) -> &[StateRecord] {
        &self.records
    }

    pub fn used_colors(&self) -> &HashSet<Rgb8> {
        &self.used_colors
    }

    pub fn is_used_id(&self, id: u64) -> bool {
        self.used_ids.contains(&id)
    }

    /// A pixel currently displayed in a used color belongs to a committed
    /// state and cannot be reselected.
    pub fn is_used_color(&self, color: Rgb8) -> bool {
        self.used_colors.contains(&color)
    }

    /// Smallest positive id not yet reserved.
    pub fn suggest_id(&self) -> u64 {
        let mut id = 1;
        while self.used_ids.contains(&id) {
            id += 1;
        }
        id
    }

    /// Validate, freeze, and append the draft as a committed record,
    /// reserving its id and color. The draft itself is untouched; the caller
    /// resets it and mints a fresh color afterwards.
    pub fn commit(&mut self, draft: &Draft) -> Result<u64, CommitError> {
        let id = validate_for_commit(draft, self)?;
        let text = render_state_block(draft);
        // Two states sharing a display color would silently merge their
        // locked territory, so treat it as a hard invariant violation.
        assert!(
            !self.used_colors.contains(&draft.color),
            "display color {} already reserved by a committed state",
            rgb_to_hex(draft.color)
        );
        self.used_ids.insert(id);
        self.used_colors.insert(draft.color);
        self.records.push(StateRecord {
            id,
            color: draft.color,
            text,
        });
        Ok(id)
    }

    /// Every committed record's text block in commit order, each followed by
    /// one extra newline (blocks end in `}\n`, so records are separated by a
    /// blank line).
    pub fn export_all(&self) -> String {
        let mut out = String::new();
        for record in &self.records {
            out.push_str(&record.text);
            out.push('\n');
        }
        out
    }
}

impl Default for StateRegistry {
    fn default() -> Self {
        Self::new()
    }
}
