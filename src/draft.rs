use crate::color::{ProvinceKey, Rgb8};

// Tag tables, in declaration order. Declaration order is also serialization
// order in the exported record.

pub const SUBSISTENCE_BUILDINGS: [&str; 3] = [
    "building_subsistence_farms",
    "building_subsistence_rice_paddies",
    "building_subsistence_pastures",
];

pub const ARABLE_RESOURCES: [&str; 13] = [
    "bg_silk_plantations",
    "bg_opium_plantations",
    "bg_cotton_plantations",
    "bg_coffee_plantations",
    "bg_dye_plantations",
    "bg_sugar_plantations",
    "bg_banana_plantations",
    "bg_tobacco_plantations",
    "bg_vineyard_plantations",
    "bg_maize_farms",
    "bg_rye_farms",
    "bg_livestock_ranches",
    "bg_wheat_farms",
];

pub const CAPPED_RESOURCES: [&str; 7] = [
    "bg_coal_mining",
    "bg_iron_mining",
    "bg_lead_mining",
    "bg_sulfur_mining",
    "bg_logging",
    "bg_fishing",
    "bg_monuments",
];

pub const SPECIAL_RESOURCES: [&str; 3] = ["bg_oil_extraction", "bg_gold_fields", "bg_rubber"];

/// Gold fields carry an extra `depleted_type` line in the exported record.
pub const GOLD_FIELDS: &str = "bg_gold_fields";

/// The five fixed special designations a draft can hand out, one province
/// each. `ALL` is also the serialization order of the role lines.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum RoleSlot {
    City,
    Port,
    Farm,
    Mine,
    Wood,
}

impl RoleSlot {
    pub const ALL: [RoleSlot; 5] = [
        RoleSlot::City,
        RoleSlot::Port,
        RoleSlot::Farm,
        RoleSlot::Mine,
        RoleSlot::Wood,
    ];

    pub fn tag(self) -> &'static str {
        match self {
            RoleSlot::City => "city",
            RoleSlot::Port => "port",
            RoleSlot::Farm => "farm",
            RoleSlot::Mine => "mine",
            RoleSlot::Wood => "wood",
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }
}

/// The in-progress, uncommitted state under construction.
///
/// All text fields hold exactly what the user typed; validation happens only
/// at commit time, never while editing. `provinces` keeps selection order —
/// that order is what the exported record shows.
pub struct Draft {
    pub id_text: String,
    pub name: String,
    pub provinces: Vec<ProvinceKey>,
    /// Indexed by `RoleSlot::index()`.
    pub roles: [Option<ProvinceKey>; 5],
    /// Index into `SUBSISTENCE_BUILDINGS`; the three options are mutually
    /// exclusive.
    pub subsistence: Option<usize>,
    pub arable_land: String,
    pub arable: [bool; ARABLE_RESOURCES.len()],
    pub capped_checked: [bool; CAPPED_RESOURCES.len()],
    pub capped_values: [String; CAPPED_RESOURCES.len()],
    pub special_checked: [bool; SPECIAL_RESOURCES.len()],
    pub special_values: [String; SPECIAL_RESOURCES.len()],
    /// Exclusively-held display color. Counts as "used" only once the draft
    /// commits.
    pub color: Rgb8,
}

impl Draft {
    pub fn new(color: Rgb8) -> Self {
        Self {
            id_text: String::new(),
            name: String::new(),
            provinces: Vec::new(),
            roles: [None; 5],
            subsistence: None,
            arable_land: String::new(),
            arable: [false; ARABLE_RESOURCES.len()],
            capped_checked: [false; CAPPED_RESOURCES.len()],
            capped_values: std::array::from_fn(|_| String::new()),
            special_checked: [false; SPECIAL_RESOURCES.len()],
            special_values: std::array::from_fn(|_| String::new()),
            color,
        }
    }

    /// Clear everything and take a fresh display color. Used after a commit.
    pub fn reset(&mut self, color: Rgb8) {
        *self = Draft::new(color);
    }

    pub fn is_selected(&self, key: ProvinceKey) -> bool {
        self.provinces.contains(&key)
    }

    /// The slot `key` currently occupies, if any. A key holds at most one.
    pub fn role_of(&self, key: ProvinceKey) -> Option<RoleSlot> {
        RoleSlot::ALL
            .into_iter()
            .find(|slot| self.roles[slot.index()] == Some(key))
    }

    pub fn clear_role_of(&mut self, key: ProvinceKey) {
        for slot in RoleSlot::ALL {
            if self.roles[slot.index()] == Some(key) {
                self.roles[slot.index()] = None;
            }
        }
    }

    /// Bind `key` to `slot`, evicting both the slot's previous occupant and
    /// any other slot `key` held.
    pub fn bind_role(&mut self, slot: RoleSlot, key: ProvinceKey) {
        self.clear_role_of(key);
        self.roles[slot.index()] = Some(key);
    }
}
