//! Built-in archetype registry.
//!
//! Each archetype pairs an eligibility rule on the player's listed positions
//! with a weighted linear formula. Weights sum to 1.0 so ratings are roughly
//! comparable between archetypes. Percentage stats enter as fractions via
//! [`Row::ratio`]; missing stats count as zero.

use crate::models::{columns, Positions, Row};

/// A named playing-style role with its eligibility rule and formula.
#[derive(Clone, Copy)]
pub struct Archetype {
    pub name: &'static str,

    /// Column label for the raw rating, e.g. "SK Rating"
    pub label: &'static str,

    pub eligible: fn(&Row) -> bool,
    pub formula: fn(&Row) -> f64,
}

impl std::fmt::Debug for Archetype {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Archetype")
            .field("name", &self.name)
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}

impl Archetype {
    pub fn is_eligible(&self, row: &Row) -> bool {
        (self.eligible)(row)
    }

    pub fn rating(&self, row: &Row) -> f64 {
        (self.formula)(row)
    }
}

/// Every built-in archetype, in display order.
pub const ARCHETYPES: &[Archetype] = &[
    Archetype {
        name: "Sweeper Keeper",
        label: "SK Rating",
        eligible: is_goalkeeper,
        formula: sweeper_keeper,
    },
    Archetype {
        name: "Ball-Playing Defender",
        label: "BPD Rating",
        eligible: is_centre_back,
        formula: ball_playing_defender,
    },
    Archetype {
        name: "Stopper",
        label: "STP Rating",
        eligible: is_centre_back,
        formula: stopper,
    },
    Archetype {
        name: "Wing Back",
        label: "WB Rating",
        eligible: is_full_back,
        formula: wing_back,
    },
    Archetype {
        name: "Ball-Winning Midfielder",
        label: "BWM Rating",
        eligible: is_holding_midfielder,
        formula: ball_winning_midfielder,
    },
    Archetype {
        name: "Deep-Lying Playmaker",
        label: "DLP Rating",
        eligible: is_holding_midfielder,
        formula: deep_lying_playmaker,
    },
    Archetype {
        name: "Box-to-Box Midfielder",
        label: "BBM Rating",
        eligible: is_central_midfielder,
        formula: box_to_box,
    },
    Archetype {
        name: "Advanced Playmaker",
        label: "AP Rating",
        eligible: is_attacking_midfielder,
        formula: advanced_playmaker,
    },
    Archetype {
        name: "Winger",
        label: "W Rating",
        eligible: is_wide_midfielder,
        formula: winger,
    },
    Archetype {
        name: "Inside Forward",
        label: "IF Rating",
        eligible: is_wide_attacker,
        formula: inside_forward,
    },
    Archetype {
        name: "Target Forward",
        label: "TF Rating",
        eligible: is_striker,
        formula: target_forward,
    },
    Archetype {
        name: "Poacher",
        label: "P Rating",
        eligible: is_striker,
        formula: poacher,
    },
];

/// Look up a built-in archetype by name.
pub fn find(name: &str) -> Option<&'static Archetype> {
    ARCHETYPES.iter().find(|a| a.name == name)
}

fn positions(row: &Row) -> Positions {
    Positions::parse(row.text(columns::POSITION).unwrap_or_default())
}

// Eligibility

fn is_goalkeeper(row: &Row) -> bool {
    positions(row).plays("GK", None)
}

fn is_centre_back(row: &Row) -> bool {
    positions(row).plays("D", Some('C'))
}

fn is_full_back(row: &Row) -> bool {
    let p = positions(row);
    p.plays_wide("D") || p.plays("WB", None)
}

fn is_holding_midfielder(row: &Row) -> bool {
    let p = positions(row);
    p.plays("DM", None) || p.plays("M", Some('C'))
}

fn is_central_midfielder(row: &Row) -> bool {
    positions(row).plays("M", Some('C'))
}

fn is_attacking_midfielder(row: &Row) -> bool {
    positions(row).plays("AM", Some('C'))
}

fn is_wide_midfielder(row: &Row) -> bool {
    let p = positions(row);
    p.plays_wide("M") || p.plays_wide("AM")
}

fn is_wide_attacker(row: &Row) -> bool {
    positions(row).plays_wide("AM")
}

fn is_striker(row: &Row) -> bool {
    positions(row).plays("ST", None)
}

// Formulas

fn sweeper_keeper(r: &Row) -> f64 {
    0.80 * r.stat("xGP/90") + 0.10 * (1.0 - r.stat("Gl Mst/90")) + 0.10 * r.stat("Cln/90")
}

fn ball_playing_defender(r: &Row) -> f64 {
    0.25 * r.ratio("Pas %")
        + 0.20 * r.stat("Pr passes/90")
        + 0.20 * r.stat("Int/90")
        + 0.20 * r.ratio("Hdr %")
        + 0.15 * r.ratio("Tck R")
}

fn stopper(r: &Row) -> f64 {
    0.30 * r.stat("Hdrs W/90")
        + 0.25 * r.stat("Tck/90")
        + 0.20 * r.stat("Blk/90")
        + 0.25 * r.stat("Clr/90")
}

fn wing_back(r: &Row) -> f64 {
    0.30 * r.stat("Cr C/90")
        + 0.20 * r.ratio("OP-Cr %")
        + 0.20 * r.stat("Drb/90")
        + 0.15 * r.stat("xA/90")
        + 0.15 * r.stat("Tck/90")
}

fn ball_winning_midfielder(r: &Row) -> f64 {
    0.35 * r.stat("Tck/90")
        + 0.30 * r.stat("Int/90")
        + 0.20 * r.stat("Poss Won/90")
        + 0.15 * r.ratio("Tck R")
}

fn deep_lying_playmaker(r: &Row) -> f64 {
    0.40 * r.stat("Pr passes/90") + 0.30 * r.ratio("Pas %") + 0.30 * r.stat("K Ps/90")
}

/// Distance is scaled against a 13 km ceiling so it sits with the per-90
/// counts.
fn box_to_box(r: &Row) -> f64 {
    0.25 * (r.stat(columns::DISTANCE_PER_90) / 13.0)
        + 0.25 * r.stat("Tck/90")
        + 0.25 * r.stat("Drb/90")
        + 0.25 * r.stat("xG/90")
}

fn advanced_playmaker(r: &Row) -> f64 {
    0.35 * r.stat("K Ps/90")
        + 0.30 * r.stat("xA/90")
        + 0.20 * r.stat("Ch C/90")
        + 0.15 * r.stat("Drb/90")
}

fn winger(r: &Row) -> f64 {
    0.30 * r.stat("Drb/90")
        + 0.30 * r.stat("Cr C/90")
        + 0.20 * r.stat("xA/90")
        + 0.20 * r.ratio("OP-Cr %")
}

fn inside_forward(r: &Row) -> f64 {
    0.35 * r.stat("xG/90")
        + 0.25 * r.stat("Shot/90")
        + 0.20 * r.stat("Drb/90")
        + 0.20 * r.ratio("Conv %")
}

fn target_forward(r: &Row) -> f64 {
    0.35 * r.stat("Hdrs W/90")
        + 0.25 * r.ratio("Hdr %")
        + 0.20 * r.stat("Gls/90")
        + 0.20 * r.stat("K Ps/90")
}

fn poacher(r: &Row) -> f64 {
    0.45 * r.stat("NP-xG/90") + 0.30 * r.ratio("Conv %") + 0.25 * r.ratio("Shot %")
}
