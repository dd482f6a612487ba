//! Common types used throughout the client
//!
//! This module contains shared type aliases and the parameter enums
//! accepted by the endpoint methods.

use crate::native::Native;
use serde::{Deserialize, Serialize};
use std::ops::{BitOr, BitOrAssign};

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// JSON object type
pub type JsonObject = serde_json::Map<String, JsonValue>;

/// Declares a string-valued parameter enum with its wire names
macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        $name:ident { $($(#[$vmeta:meta])* $variant:ident => $wire:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                $(#[$vmeta])*
                #[serde(rename = $wire)]
                $variant,
            )+
        }

        impl $name {
            /// Name used on the wire
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $wire,)+
                }
            }
        }

        impl From<$name> for Native {
            fn from(value: $name) -> Self {
                Native::from(value.as_str())
            }
        }
    };
}

// ============================================================================
// Listing Parameters
// ============================================================================

wire_enum! {
    /// Time window for listings
    Period {
        Day => "Day",
        Week => "Week",
        Month => "Month",
        Year => "Year",
        AllTime => "AllTime",
    }
}

impl Default for Period {
    fn default() -> Self {
        Period::AllTime
    }
}

wire_enum! {
    /// Image listing order
    ImageSort {
        Newest => "Newest",
        Oldest => "Oldest",
        MostReactions => "Most Reactions",
        MostBuzz => "Most Buzz",
        MostComments => "Most Comments",
        MostCollected => "Most Collected",
    }
}

wire_enum! {
    /// Model listing order
    ModelSort {
        Newest => "Newest",
        Oldest => "Oldest",
        MostBuzz => "Most Buzz",
        MostCollected => "Most Collected",
        HighestRated => "Highest Rated",
        MostDownloaded => "Most Downloaded",
        MostLiked => "Most Liked",
        MostDiscussed => "Most Discussed",
        MostImages => "Most Images",
    }
}

wire_enum! {
    /// Tag listing order
    TagSort {
        MostModels => "Most Models",
        MostImages => "Most Images",
        MostPosts => "Most Posts",
        MostArticles => "Most Articles",
        MostHidden => "Most Hidden",
    }
}

wire_enum! {
    /// Entities that can be tagged
    TagEntity {
        Model => "Model",
        Image => "Image",
        Post => "Post",
        Article => "Article",
    }
}

impl TagEntity {
    /// Sort order used when none is requested
    pub fn default_sort(&self) -> TagSort {
        match self {
            TagEntity::Model => TagSort::MostModels,
            TagEntity::Image => TagSort::MostImages,
            TagEntity::Post => TagSort::MostPosts,
            TagEntity::Article => TagSort::MostArticles,
        }
    }
}

wire_enum! {
    /// Reaction kinds
    Reaction {
        Like => "Like",
        Dislike => "Dislike",
        Heart => "Heart",
        Laugh => "Laugh",
        Cry => "Cry",
    }
}

wire_enum! {
    /// Model kinds
    ModelType {
        Checkpoint => "Checkpoint",
        Embedding => "Embedding",
        Hypernetwork => "Hypernetwork",
        AestheticGradient => "AestheticGradient",
        Lora => "LORA",
        /// Shown as LyCORIS on the site
        LoCon => "LoCon",
        DoRA => "DoRA",
        Controlnet => "Controlnet",
        Upscaler => "Upscaler",
        MotionModule => "MotionModule",
        Vae => "VAE",
        Poses => "Poses",
        Wildcards => "Wildcards",
        Workflows => "Workflows",
        Other => "Other",
    }
}

wire_enum! {
    /// How a checkpoint was produced
    CheckpointType {
        Trained => "Trained",
        Merge => "Merge",
    }
}

wire_enum! {
    /// Commercial uses a model license permits
    CommercialUse {
        Image => "Image",
        RentCivit => "RentCivit",
        Rent => "Rent",
        Sell => "Sell",
    }
}

// ============================================================================
// Browsing Level
// ============================================================================

/// Content rating bit set used as `browsingLevel`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Level(u32);

impl Level {
    pub const PG: Level = Level(0x1);
    pub const PG13: Level = Level(0x2);
    pub const R: Level = Level(0x4);
    pub const X: Level = Level(0x8);
    pub const XXX: Level = Level(0x10);

    pub const SFW: Level = Level(Self::PG.0 | Self::PG13.0);
    pub const NSFW: Level = Level(Self::R.0 | Self::X.0 | Self::XXX.0);
    pub const ALL: Level = Level(Self::SFW.0 | Self::NSFW.0);

    /// Raw bit value
    pub fn bits(&self) -> u32 {
        self.0
    }

    /// Check whether every bit of `other` is set
    pub fn contains(&self, other: Level) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for Level {
    type Output = Level;

    fn bitor(self, rhs: Level) -> Level {
        Level(self.0 | rhs.0)
    }
}

impl BitOrAssign for Level {
    fn bitor_assign(&mut self, rhs: Level) {
        self.0 |= rhs.0;
    }
}

impl From<Level> for Native {
    fn from(level: Level) -> Self {
        Native::from(level.0)
    }
}

// ============================================================================
// Retry Backoff
// ============================================================================

/// Type of backoff for retries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackoffType {
    /// Same delay before every retry
    Constant,
    /// Delay grows by the initial delay each attempt
    Linear,
    /// Delay doubles each attempt
    #[default]
    Exponential,
}
