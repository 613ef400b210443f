use serde::{Deserialize, Serialize};

/// Sort direction for a single list-view column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Asc,
    Desc,
}

impl Direction {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }

    #[must_use]
    pub fn flipped(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

/// The active sort of a list view: at most one `(field, direction)` pair.
///
/// Selecting a new field replaces the previous one; multi-field sort is not
/// supported. The URL representation is a single token: `title` sorts
/// ascending, `-title` descending, and the empty token means "no sort".
///
/// Field names are ASCII alphanumeric/underscore identifiers, the same
/// charset the token decoder accepts. Constructors map anything else to the
/// empty ordering, so every constructible value survives the URL round trip.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Ordering {
    active: Option<(String, Direction)>,
}

/// The field-name charset shared by the constructors and the token decoder.
fn is_valid_field(field: &str) -> bool {
    !field.is_empty() && field.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

impl Ordering {
    /// No active sort.
    #[must_use]
    pub fn none() -> Self {
        Self { active: None }
    }

    #[must_use]
    pub fn asc(field: impl Into<String>) -> Self {
        Self::with(field.into(), Direction::Asc)
    }

    #[must_use]
    pub fn desc(field: impl Into<String>) -> Self {
        Self::with(field.into(), Direction::Desc)
    }

    fn with(field: String, direction: Direction) -> Self {
        if is_valid_field(&field) {
            Self {
                active: Some((field, direction)),
            }
        } else {
            Self::none()
        }
    }

    #[must_use]
    pub fn is_none(&self) -> bool {
        self.active.is_none()
    }

    /// The active sort field, if any.
    #[must_use]
    pub fn field(&self) -> Option<&str> {
        self.active.as_ref().map(|(field, _)| field.as_str())
    }

    /// The direction applied to `field`, or `None` when `field` is not the
    /// active sort.
    #[must_use]
    pub fn direction_of(&self, field: &str) -> Option<Direction> {
        match &self.active {
            Some((active, direction)) if active == field => Some(*direction),
            _ => None,
        }
    }

    /// Two-state column-header toggle.
    ///
    /// Clicking the active ascending field flips it to descending and vice
    /// versa; clicking an inactive field replaces the sort with `{field: asc}`.
    /// There is no third "unsorted" state: once a field has been toggled the
    /// cycle is `asc -> desc -> asc -> ...`.
    #[must_use]
    pub fn toggled(&self, field: &str) -> Self {
        match self.direction_of(field) {
            Some(direction) => Self::with(field.to_string(), direction.flipped()),
            None => Self::asc(field),
        }
    }

    /// Encode to the URL token: `field`, `-field`, or `""` for no sort.
    #[must_use]
    pub fn token(&self) -> String {
        match &self.active {
            Some((field, Direction::Asc)) => field.clone(),
            Some((field, Direction::Desc)) => format!("-{field}"),
            None => String::new(),
        }
    }

    /// Decode a URL token. Never errors: a blank or structurally invalid
    /// token yields the empty ordering.
    #[must_use]
    pub fn parse(token: &str) -> Self {
        let token = token.trim();
        let (field, direction) = match token.strip_prefix('-') {
            Some(rest) => (rest, Direction::Desc),
            None => (token, Direction::Asc),
        };
        Self::with(field.to_string(), direction)
    }

    /// Drop the active sort unless its field is in `fields`.
    ///
    /// Used when seeding from the URL so that a token naming a field the view
    /// cannot sort by decodes to the empty ordering instead of an error.
    #[must_use]
    pub fn restrict_to(&self, fields: &[&str]) -> Self {
        match self.field() {
            Some(active) if fields.contains(&active) => self.clone(),
            _ => Self::none(),
        }
    }
}
