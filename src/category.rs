//! Known category tags and their filter-chip descriptors.
//!
//! Points carry raw tag strings; this table only describes the tags the
//! filter chips offer. The table is validated at startup so a variant
//! without a descriptor fails loudly instead of falling back silently.

use crate::error::ConfigError;

#[cfg(test)]
#[path = "category_test.rs"]
mod category_test;

/// Category tags offered as filter chips.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Category {
    Books,
    Clothes,
    Toys,
    Electronics,
    KitchenItems,
    HouseholdGoods,
    Shoes,
    Bags,
    Games,
    Decorations,
    Tools,
    OfficeSupplies,
    Plants,
    Food,
    Other,
}

impl Category {
    /// Every variant, in chip order.
    pub const ALL: [Self; 15] = [
        Self::Books,
        Self::Clothes,
        Self::Toys,
        Self::Electronics,
        Self::KitchenItems,
        Self::HouseholdGoods,
        Self::Shoes,
        Self::Bags,
        Self::Games,
        Self::Decorations,
        Self::Tools,
        Self::OfficeSupplies,
        Self::Plants,
        Self::Food,
        Self::Other,
    ];

    /// Wire and route tag.
    #[must_use]
    pub fn tag(self) -> &'static str {
        match self {
            Self::Books => "books",
            Self::Clothes => "clothes",
            Self::Toys => "toys",
            Self::Electronics => "electronics",
            Self::KitchenItems => "kitchen_items",
            Self::HouseholdGoods => "household_goods",
            Self::Shoes => "shoes",
            Self::Bags => "bags",
            Self::Games => "games",
            Self::Decorations => "decorations",
            Self::Tools => "tools",
            Self::OfficeSupplies => "office_supplies",
            Self::Plants => "plants",
            Self::Food => "food",
            Self::Other => "other",
        }
    }
}

/// How a category is presented as a filter chip.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CategoryDescriptor {
    pub category: Category,
    pub label: &'static str,
    /// Icon name from the lucide set, kebab-case.
    pub icon: &'static str,
}

const fn descriptor(category: Category, label: &'static str, icon: &'static str) -> CategoryDescriptor {
    CategoryDescriptor { category, label, icon }
}

/// Built-in chip table, in display order.
pub static DESCRIPTORS: [CategoryDescriptor; 15] = [
    descriptor(Category::Books, "Bücher", "book-open"),
    descriptor(Category::Clothes, "Kleidung", "shirt"),
    descriptor(Category::Toys, "Spielzeug", "toy-brick"),
    descriptor(Category::Electronics, "Elektronik", "cpu"),
    descriptor(Category::KitchenItems, "Küchenartikel", "chef-hat"),
    descriptor(Category::HouseholdGoods, "Haushaltswaren", "home"),
    descriptor(Category::Shoes, "Schuhe", "footprints"),
    descriptor(Category::Bags, "Taschen", "shopping-bag"),
    descriptor(Category::Games, "Spiele", "gamepad"),
    descriptor(Category::Decorations, "Dekoration", "sparkles"),
    descriptor(Category::Tools, "Werkzeuge", "hammer"),
    descriptor(Category::OfficeSupplies, "Bürobedarf", "pen-line"),
    descriptor(Category::Plants, "Pflanzen", "sprout"),
    descriptor(Category::Food, "Lebensmittel", "utensils-crossed"),
    descriptor(Category::Other, "Sonstiges", "more-horizontal"),
];

/// Check that `table` describes every category exactly once.
///
/// # Errors
///
/// Returns [`ConfigError::MissingDescriptor`] or
/// [`ConfigError::DuplicateDescriptor`] for the first offending category.
pub fn validate_descriptors(table: &[CategoryDescriptor]) -> Result<(), ConfigError> {
    for category in Category::ALL {
        match table.iter().filter(|d| d.category == category).count() {
            0 => return Err(ConfigError::MissingDescriptor(category.tag())),
            1 => {}
            _ => return Err(ConfigError::DuplicateDescriptor(category.tag())),
        }
    }
    Ok(())
}
