#![forbid(unsafe_code)]

//! Shape tags: the discriminant that selects a cell's value type and
//! rendering behavior.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Visual kind of a cell.
///
/// The set is open-ended: anything not listed here parses into
/// [`Shape::Custom`]. Equality, ordering and hashing all go through
/// [`Shape::as_str`], so `Shape::Custom("text".into())` and `Shape::Text`
/// are the same shape.
#[derive(Debug, Clone, Default)]
pub enum Shape {
    #[default]
    Text,
    Number,
    Toggle,
    Button,
    Image,
    Badge,
    Card,
    Chart,
    Chat,
    Chip,
    Code,
    Photoframe,
    Slot,
    Upload,
    Typewriter,
    Canvas,
    Progressbar,
    Textfield,
    /// A shape registered by the application.
    Custom(String),
}

impl Shape {
    /// Every built-in shape, in declaration order.
    pub const BUILTIN: [Shape; 18] = [
        Shape::Text,
        Shape::Number,
        Shape::Toggle,
        Shape::Button,
        Shape::Image,
        Shape::Badge,
        Shape::Card,
        Shape::Chart,
        Shape::Chat,
        Shape::Chip,
        Shape::Code,
        Shape::Photoframe,
        Shape::Slot,
        Shape::Upload,
        Shape::Typewriter,
        Shape::Canvas,
        Shape::Progressbar,
        Shape::Textfield,
    ];

    /// Parse a shape tag. Unknown tags become [`Shape::Custom`].
    #[must_use]
    pub fn parse(tag: &str) -> Self {
        match tag {
            "text" => Self::Text,
            "number" => Self::Number,
            "toggle" => Self::Toggle,
            "button" => Self::Button,
            "image" => Self::Image,
            "badge" => Self::Badge,
            "card" => Self::Card,
            "chart" => Self::Chart,
            "chat" => Self::Chat,
            "chip" => Self::Chip,
            "code" => Self::Code,
            "photoframe" => Self::Photoframe,
            "slot" => Self::Slot,
            "upload" => Self::Upload,
            "typewriter" => Self::Typewriter,
            "canvas" => Self::Canvas,
            "progressbar" => Self::Progressbar,
            "textfield" => Self::Textfield,
            other => Self::Custom(other.to_string()),
        }
    }

    /// The tag string as it appears in JSON.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Text => "text",
            Self::Number => "number",
            Self::Toggle => "toggle",
            Self::Button => "button",
            Self::Image => "image",
            Self::Badge => "badge",
            Self::Card => "card",
            Self::Chart => "chart",
            Self::Chat => "chat",
            Self::Chip => "chip",
            Self::Code => "code",
            Self::Photoframe => "photoframe",
            Self::Slot => "slot",
            Self::Upload => "upload",
            Self::Typewriter => "typewriter",
            Self::Canvas => "canvas",
            Self::Progressbar => "progressbar",
            Self::Textfield => "textfield",
            Self::Custom(tag) => tag,
        }
    }

    /// Whether this is one of the built-in shapes.
    #[must_use]
    pub fn is_builtin(&self) -> bool {
        !matches!(Self::parse(self.as_str()), Self::Custom(_))
    }
}

impl PartialEq for Shape {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Eq for Shape {}

impl Hash for Shape {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_str().hash(state);
    }
}

impl PartialOrd for Shape {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Shape {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_str().cmp(other.as_str())
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for Shape {
    fn from(tag: &str) -> Self {
        Self::parse(tag)
    }
}

impl Serialize for Shape {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Shape {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tag = String::deserialize(deserializer)?;
        Ok(Self::parse(&tag))
    }
}
