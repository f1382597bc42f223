//! Serving options
//!
//! Enumerations describing how a drink is prepared and served. All of them
//! parse leniently: an unrecognized string becomes `Unknown`, which the
//! reference tables treat as "no entry" (factor 0).

use serde::{Deserialize, Serialize};

/// Canonicalize an option string: trim, lower-case, spaces/dashes to underscores
fn option_key(s: &str) -> String {
    s.trim()
        .to_lowercase()
        .split(|c: char| c.is_whitespace() || c == '-')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("_")
}

/// How the drink is mixed before it is served
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PrepMethod {
    ShakenNeat,
    ShakenOverIce,
    StirredNeat,
    StirredOverIce,
    BuiltOverIce,
    #[default]
    BuiltNeat,
    BuiltNeatServedIce,
    Unknown,
}

impl PrepMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PrepMethod::ShakenNeat => "shaken_neat",
            PrepMethod::ShakenOverIce => "shaken_over_ice",
            PrepMethod::StirredNeat => "stirred_neat",
            PrepMethod::StirredOverIce => "stirred_over_ice",
            PrepMethod::BuiltOverIce => "built_over_ice",
            PrepMethod::BuiltNeat => "built_neat",
            PrepMethod::BuiltNeatServedIce => "built_neat_served_ice",
            PrepMethod::Unknown => "unknown",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match option_key(s).as_str() {
            "shaken_neat" | "shaken" => PrepMethod::ShakenNeat,
            "shaken_over_ice" => PrepMethod::ShakenOverIce,
            "stirred_neat" | "stirred" => PrepMethod::StirredNeat,
            "stirred_over_ice" => PrepMethod::StirredOverIce,
            "built_over_ice" => PrepMethod::BuiltOverIce,
            "built_neat" | "built" | "neat" => PrepMethod::BuiltNeat,
            "built_neat_served_ice" => PrepMethod::BuiltNeatServedIce,
            _ => PrepMethod::Unknown,
        }
    }
}

impl From<String> for PrepMethod {
    fn from(s: String) -> Self {
        Self::from_str(&s)
    }
}

impl From<PrepMethod> for String {
    fn from(p: PrepMethod) -> Self {
        p.as_str().to_string()
    }
}

/// Ice the drink is served over
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum IceType {
    Crushed,
    SmallCube,
    LargeCube,
    TopHat,
    #[default]
    None,
    Unknown,
}

impl IceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            IceType::Crushed => "crushed",
            IceType::SmallCube => "small_cube",
            IceType::LargeCube => "large_cube",
            IceType::TopHat => "top_hat",
            IceType::None => "none",
            IceType::Unknown => "unknown",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match option_key(s).as_str() {
            "crushed" | "pebble" => IceType::Crushed,
            "small_cube" | "cubes" | "cube" => IceType::SmallCube,
            "large_cube" | "big_cube" => IceType::LargeCube,
            "top_hat" | "sphere" => IceType::TopHat,
            "none" | "no_ice" | "" => IceType::None,
            _ => IceType::Unknown,
        }
    }
}

impl From<String> for IceType {
    fn from(s: String) -> Self {
        Self::from_str(&s)
    }
}

impl From<IceType> for String {
    fn from(i: IceType) -> Self {
        i.as_str().to_string()
    }
}

/// How long the drink sits in the glass while it is consumed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ServingTime {
    Shot,
    #[default]
    Sipped,
    Nursed,
    Unknown,
}

impl ServingTime {
    pub fn as_str(&self) -> &'static str {
        match self {
            ServingTime::Shot => "shot",
            ServingTime::Sipped => "sipped",
            ServingTime::Nursed => "nursed",
            ServingTime::Unknown => "unknown",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match option_key(s).as_str() {
            "shot" | "quick" => ServingTime::Shot,
            "sipped" | "sip" => ServingTime::Sipped,
            "nursed" | "slow" => ServingTime::Nursed,
            _ => ServingTime::Unknown,
        }
    }
}

impl From<String> for ServingTime {
    fn from(s: String) -> Self {
        Self::from_str(&s)
    }
}

impl From<ServingTime> for String {
    fn from(t: ServingTime) -> Self {
        t.as_str().to_string()
    }
}

/// Glassware, used to size the ice load
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Glass {
    #[default]
    Rocks,
    Highball,
    Collins,
    Coupe,
    Martini,
    NickAndNora,
    Wine,
    Flute,
    Pint,
    CopperMug,
    Hurricane,
    Shot,
    Unknown,
}

impl Glass {
    pub fn as_str(&self) -> &'static str {
        match self {
            Glass::Rocks => "rocks",
            Glass::Highball => "highball",
            Glass::Collins => "collins",
            Glass::Coupe => "coupe",
            Glass::Martini => "martini",
            Glass::NickAndNora => "nick_and_nora",
            Glass::Wine => "wine",
            Glass::Flute => "flute",
            Glass::Pint => "pint",
            Glass::CopperMug => "copper_mug",
            Glass::Hurricane => "hurricane",
            Glass::Shot => "shot",
            Glass::Unknown => "unknown",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match option_key(s).as_str() {
            "rocks" | "old_fashioned" | "lowball" => Glass::Rocks,
            "highball" => Glass::Highball,
            "collins" => Glass::Collins,
            "coupe" => Glass::Coupe,
            "martini" | "cocktail" => Glass::Martini,
            "nick_and_nora" | "nick_&_nora" => Glass::NickAndNora,
            "wine" => Glass::Wine,
            "flute" => Glass::Flute,
            "pint" => Glass::Pint,
            "copper_mug" | "mule_mug" => Glass::CopperMug,
            "hurricane" => Glass::Hurricane,
            "shot" | "shot_glass" => Glass::Shot,
            _ => Glass::Unknown,
        }
    }
}

impl From<String> for Glass {
    fn from(s: String) -> Self {
        Self::from_str(&s)
    }
}

impl From<Glass> for String {
    fn from(g: Glass) -> Self {
        g.as_str().to_string()
    }
}

/// Edible rim coating
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Rim {
    #[default]
    None,
    Sugar,
    Salt,
    Tajin,
    CinnamonSugar,
    Unknown,
}

impl Rim {
    pub fn as_str(&self) -> &'static str {
        match self {
            Rim::None => "none",
            Rim::Sugar => "sugar",
            Rim::Salt => "salt",
            Rim::Tajin => "tajin",
            Rim::CinnamonSugar => "cinnamon_sugar",
            Rim::Unknown => "unknown",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match option_key(s).as_str() {
            "none" | "no_rim" | "" => Rim::None,
            "sugar" => Rim::Sugar,
            "salt" => Rim::Salt,
            "tajin" | "chili_salt" | "chili_lime" => Rim::Tajin,
            "cinnamon_sugar" => Rim::CinnamonSugar,
            _ => Rim::Unknown,
        }
    }
}

impl From<String> for Rim {
    fn from(s: String) -> Self {
        Self::from_str(&s)
    }
}

impl From<Rim> for String {
    fn from(r: Rim) -> Self {
        r.as_str().to_string()
    }
}
