//! Static lookup tables: category icons and budget-status styling.
//!
//! Every lookup is fail-soft. Unknown keys map to a designated fallback rather
//! than an error, so rendering never stops on bad data.

#[cfg(test)]
#[path = "lookup_test.rs"]
mod lookup_test;

/// Display icons shipped in the SVG sprite.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Icon {
    Clothing,
    Education,
    Games,
    Electricity,
    Housing,
    Food,
    Shopping,
    Healthcare,
    Job,
    Entertainment,
    Travel,
    Other,
    OverBudget,
    AtLimit,
    OnTrack,
}

impl Icon {
    /// Symbol id inside the sprite sheet.
    #[must_use]
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Clothing => "icon-clothing",
            Self::Education => "icon-education",
            Self::Games => "icon-games",
            Self::Electricity => "icon-electricity",
            Self::Housing => "icon-housing",
            Self::Food => "icon-food",
            Self::Shopping => "icon-shopping",
            Self::Healthcare => "icon-healthcare",
            Self::Job => "icon-job",
            Self::Entertainment => "icon-entertainment",
            Self::Travel => "icon-travel",
            Self::Other => "icon-other",
            Self::OverBudget => "icon-over-budget",
            Self::AtLimit => "icon-at-limit",
            Self::OnTrack => "icon-on-track",
        }
    }

    /// `href` for an SVG `<use>` element.
    #[must_use]
    pub fn sprite_href(self) -> String {
        format!("/icons.svg#{}", self.symbol())
    }
}

/// One selectable category icon.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CategoryIcon {
    pub id: &'static str,
    pub name: &'static str,
    pub icon: Icon,
}

/// Icons offered when creating a category, in picker order.
pub static CATEGORY_ICONS: [CategoryIcon; 12] = [
    CategoryIcon { id: "clothing", name: "Clothing", icon: Icon::Clothing },
    CategoryIcon { id: "education", name: "Education", icon: Icon::Education },
    CategoryIcon { id: "games", name: "Games", icon: Icon::Games },
    CategoryIcon { id: "electricity", name: "Electricity", icon: Icon::Electricity },
    CategoryIcon { id: "housing", name: "Housing", icon: Icon::Housing },
    CategoryIcon { id: "food", name: "Food", icon: Icon::Food },
    CategoryIcon { id: "shopping", name: "Shopping", icon: Icon::Shopping },
    CategoryIcon { id: "healthcare", name: "Healthcare", icon: Icon::Healthcare },
    CategoryIcon { id: "job", name: "Job", icon: Icon::Job },
    CategoryIcon { id: "entertainment", name: "Entertainment", icon: Icon::Entertainment },
    CategoryIcon { id: "travel", name: "Travel", icon: Icon::Travel },
    CategoryIcon { id: "other", name: "Other", icon: Icon::Other },
];

pub const FALLBACK_CATEGORY_ICON: Icon = Icon::Other;

/// Entry whose display name is `name`.
#[must_use]
pub fn category_icon(name: &str) -> Option<&'static CategoryIcon> {
    CATEGORY_ICONS.iter().find(|entry| entry.name == name)
}

/// Entry with the given id.
#[must_use]
pub fn category_by_id(id: &str) -> Option<&'static CategoryIcon> {
    CATEGORY_ICONS.iter().find(|entry| entry.id == id)
}

/// Icon for a stored category icon name, falling back to [`Icon::Other`].
#[must_use]
pub fn icon_for_category(name: &str) -> Icon {
    category_icon(name).map_or(FALLBACK_CATEGORY_ICON, |entry| entry.icon)
}

// =============================================================================
// BUDGET STATUS
// =============================================================================

pub const NEUTRAL_STATUS_CLASS: &str = "bg-gray-100 text-gray-600 dark:bg-gray-800 dark:text-gray-200";

/// Spending position of a budget relative to its allocation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BudgetStatus {
    OverBudget,
    AtLimit,
    OnTrack,
}

impl BudgetStatus {
    /// Classify spending against an allocation, both in minor currency units.
    #[must_use]
    pub fn classify(spent: i64, allocated: i64) -> Self {
        match spent.cmp(&allocated) {
            std::cmp::Ordering::Greater => Self::OverBudget,
            std::cmp::Ordering::Equal => Self::AtLimit,
            std::cmp::Ordering::Less => Self::OnTrack,
        }
    }

    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Over Budget" => Some(Self::OverBudget),
            "At Limit" => Some(Self::AtLimit),
            "On Track" => Some(Self::OnTrack),
            _ => None,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::OverBudget => "Over Budget",
            Self::AtLimit => "At Limit",
            Self::OnTrack => "On Track",
        }
    }

    /// Badge classes for this status.
    #[must_use]
    pub fn class(self) -> &'static str {
        match self {
            Self::OverBudget => "bg-error/20 text-error",
            Self::AtLimit => "bg-warning/20 text-warning",
            Self::OnTrack => "bg-success/20 text-success",
        }
    }

    #[must_use]
    pub fn icon(self) -> Icon {
        match self {
            Self::OverBudget => Icon::OverBudget,
            Self::AtLimit => Icon::AtLimit,
            Self::OnTrack => Icon::OnTrack,
        }
    }
}

/// Badge classes for a status label; neutral grey for anything unknown.
#[must_use]
pub fn status_class(label: &str) -> &'static str {
    BudgetStatus::from_label(label).map_or(NEUTRAL_STATUS_CLASS, BudgetStatus::class)
}

/// Icon for a status label; unknown labels show the on-track icon.
#[must_use]
pub fn status_icon(label: &str) -> Icon {
    BudgetStatus::from_label(label).map_or(Icon::OnTrack, BudgetStatus::icon)
}
