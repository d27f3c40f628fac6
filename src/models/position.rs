//! Parser for the game's position notation.
//!
//! Positions are comma-separated groups of slash-separated roles with an
//! optional side list in parentheses: `"GK"`, `"D (RC), DM"`, `"D/WB (R)"`,
//! `"AM (RL), ST (C)"`.

/// One comma-separated group, e.g. `M/AM (RL)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionGroup {
    pub roles: Vec<String>,
    pub sides: Vec<char>,
}

/// Every role/side combination a player is listed at.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Positions {
    groups: Vec<PositionGroup>,
}

impl Positions {
    pub fn parse(raw: &str) -> Self {
        let groups = raw
            .split(',')
            .map(str::trim)
            .filter(|g| !g.is_empty())
            .map(parse_group)
            .filter(|g| !g.roles.is_empty())
            .collect();
        Self { groups }
    }

    pub fn groups(&self) -> &[PositionGroup] {
        &self.groups
    }

    /// Whether the player is listed at `role`, optionally on a given side.
    ///
    /// `side = None` matches the role on any side.
    pub fn plays(&self, role: &str, side: Option<char>) -> bool {
        self.groups.iter().any(|g| {
            g.roles.iter().any(|r| r == role)
                && side.map_or(true, |s| g.sides.contains(&s))
        })
    }

    /// Listed at `role` on the right or the left.
    pub fn plays_wide(&self, role: &str) -> bool {
        self.plays(role, Some('R')) || self.plays(role, Some('L'))
    }
}

fn parse_group(group: &str) -> PositionGroup {
    let (roles_part, sides) = match group.find('(') {
        Some(open) => {
            let inner = group[open + 1..].trim_end_matches(')');
            let sides = inner
                .chars()
                .map(|c| c.to_ascii_uppercase())
                .filter(|c| matches!(c, 'R' | 'L' | 'C'))
                .collect();
            (&group[..open], sides)
        }
        None => (group, Vec::new()),
    };

    let roles = roles_part
        .split('/')
        .map(|r| r.trim().to_ascii_uppercase())
        .filter(|r| !r.is_empty())
        .collect();

    PositionGroup { roles, sides }
}
