//! Activity categories and the filterable subset.
//!
//! Every schedule entry carries a `type` tag. Two of those tags can be
//! toggled by the user (`informatica` and `automotores`); every other tag,
//! including ones we don't recognize, always renders.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Category tag of a schedule entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    Informatica,
    Automotores,
    General,
    Other,
    Receso,
    /// A tag outside the closed set. Rendered like `Other`.
    Unknown(String),
}

/// A category the user can switch on and off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Filter {
    Informatica,
    Automotores,
}

/// Visual styling of a category.
///
/// `gradient` is what the web surface paints as the row's bar colour;
/// `accent` is the first stop of that gradient, used by the terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyleToken {
    pub gradient: &'static str,
    pub accent: (u8, u8, u8),
}

const INFORMATICA_STYLE: StyleToken = StyleToken {
    gradient: "linear-gradient(180deg,#00fff6 0%, #3ad6ff 100%)",
    accent: (0x00, 0xff, 0xf6),
};
const AUTOMOTORES_STYLE: StyleToken = StyleToken {
    gradient: "linear-gradient(180deg,#ff2d95 0%, #ff7ab3 100%)",
    accent: (0xff, 0x2d, 0x95),
};
const GENERAL_STYLE: StyleToken = StyleToken {
    gradient: "linear-gradient(180deg,#7a00ff 0%, #b58cff 100%)",
    accent: (0x7a, 0x00, 0xff),
};
const OTHER_STYLE: StyleToken = StyleToken {
    gradient: "linear-gradient(180deg,#5b6b7a 0%, #7e8fa0 100%)",
    accent: (0x5b, 0x6b, 0x7a),
};
const RECESO_STYLE: StyleToken = StyleToken {
    gradient: "linear-gradient(180deg,#12324a 0%, #1b4b63 100%)",
    accent: (0x12, 0x32, 0x4a),
};

impl Category {
    pub fn as_str(&self) -> &str {
        match self {
            Category::Informatica => "informatica",
            Category::Automotores => "automotores",
            Category::General => "general",
            Category::Other => "other",
            Category::Receso => "receso",
            Category::Unknown(tag) => tag,
        }
    }

    /// The filter gating this category, if it is filterable at all.
    pub fn filter(&self) -> Option<Filter> {
        match self {
            Category::Informatica => Some(Filter::Informatica),
            Category::Automotores => Some(Filter::Automotores),
            _ => None,
        }
    }

    pub fn is_receso(&self) -> bool {
        matches!(self, Category::Receso)
    }

    /// Styling token, falling back to the `other` token for unknown tags.
    pub fn style(&self) -> StyleToken {
        match self {
            Category::Informatica => INFORMATICA_STYLE,
            Category::Automotores => AUTOMOTORES_STYLE,
            Category::General => GENERAL_STYLE,
            Category::Receso => RECESO_STYLE,
            Category::Other | Category::Unknown(_) => OTHER_STYLE,
        }
    }

    /// Badge shown next to the activity. Only filterable categories get one.
    pub fn badge(&self) -> Option<&'static str> {
        self.filter().map(|f| f.label())
    }
}

impl From<&str> for Category {
    fn from(tag: &str) -> Self {
        match tag {
            "informatica" => Category::Informatica,
            "automotores" => Category::Automotores,
            "general" => Category::General,
            "other" => Category::Other,
            "receso" => Category::Receso,
            other => Category::Unknown(other.to_string()),
        }
    }
}

impl From<String> for Category {
    fn from(tag: String) -> Self {
        Category::from(tag.as_str())
    }
}

impl From<Category> for String {
    fn from(category: Category) -> Self {
        category.as_str().to_string()
    }
}

impl From<Filter> for Category {
    fn from(filter: Filter) -> Self {
        match filter {
            Filter::Informatica => Category::Informatica,
            Filter::Automotores => Category::Automotores,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Filter {
    /// Every filterable category, in display order.
    pub const ALL: [Filter; 2] = [Filter::Informatica, Filter::Automotores];

    pub fn as_str(&self) -> &'static str {
        match self {
            Filter::Informatica => "informatica",
            Filter::Automotores => "automotores",
        }
    }

    /// Human label used on filter buttons and row badges.
    pub fn label(&self) -> &'static str {
        match self {
            Filter::Informatica => "Informática",
            Filter::Automotores => "Automotor",
        }
    }
}

impl FromStr for Filter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "informatica" => Ok(Filter::Informatica),
            "automotores" => Ok(Filter::Automotores),
            _ => Err(format!(
                "'{}' is not a filterable category. Expected one of: informatica, automotores",
                s
            )),
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_tags_keep_their_text_and_style_like_other() {
        let cat = Category::from("taller");
        assert_eq!(cat, Category::Unknown("taller".to_string()));
        assert_eq!(cat.as_str(), "taller");
        assert_eq!(cat.style(), Category::Other.style());
        assert_eq!(cat.filter(), None);
    }

    #[test]
    fn only_filterable_categories_get_a_badge() {
        assert_eq!(Category::Informatica.badge(), Some("Informática"));
        assert_eq!(Category::Automotores.badge(), Some("Automotor"));
        assert_eq!(Category::Receso.badge(), None);
        assert_eq!(Category::General.badge(), None);
        assert_eq!(Category::Other.badge(), None);
    }

    #[test]
    fn deserializes_from_plain_string() {
        let cat: Category = serde_json::from_str("\"receso\"").unwrap();
        assert!(cat.is_receso());
        assert_eq!(serde_json::to_string(&Category::General).unwrap(), "\"general\"");
    }

    #[test]
    fn filter_parse_rejects_non_filterable() {
        assert_eq!("automotores".parse::<Filter>(), Ok(Filter::Automotores));
        assert!("receso".parse::<Filter>().is_err());
    }
}
