//! Listing filters for the endpoint methods

use crate::types::{
    CheckpointType, CommercialUse, ImageSort, Level, ModelSort, ModelType, Period, TagEntity,
    TagSort,
};

/// Filters for the model listing
#[derive(Debug, Clone, PartialEq)]
pub struct ModelQuery {
    /// Only models uploaded by this user
    pub username: Option<String>,
    pub level: Level,
    pub sort: ModelSort,
    pub period: Period,
    pub followed_only: bool,
    pub generation_supported_only: bool,
    pub show_early_access: bool,
    /// Only these model kinds; empty means all
    pub types: Vec<ModelType>,
}

impl Default for ModelQuery {
    fn default() -> Self {
        Self {
            username: None,
            level: Level::ALL,
            sort: ModelSort::Newest,
            period: Period::AllTime,
            followed_only: false,
            generation_supported_only: false,
            show_early_access: false,
            types: Vec::new(),
        }
    }
}

/// Filters for the image listing.
///
/// `None` for `period`, `sort` or `post_id` leaves the field out of the
/// request; `None` for `level` sends `null`.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageQuery {
    pub username: Option<String>,
    pub period: Option<Period>,
    pub sort: Option<ImageSort>,
    pub level: Option<Level>,
    pub post_id: Option<u64>,
    /// Do not restrict the listing to still images
    pub any_type: bool,
}

impl Default for ImageQuery {
    fn default() -> Self {
        Self {
            username: None,
            period: Some(Period::AllTime),
            sort: Some(ImageSort::Newest),
            level: Some(Level::ALL),
            post_id: None,
            any_type: false,
        }
    }
}

impl ImageQuery {
    /// All images attached to one post
    pub fn of_post(post_id: u64) -> Self {
        Self {
            period: None,
            sort: None,
            post_id: Some(post_id),
            any_type: true,
            ..Self::default()
        }
    }
}

/// Filters for the tag listing
#[derive(Debug, Clone, PartialEq)]
pub struct TagQuery {
    pub entity: TagEntity,
    /// Name search
    pub query: Option<String>,
    /// Defaults to the entity's natural order
    pub sort: Option<TagSort>,
    pub categories_only: bool,
    /// Only tags users can vote on
    pub votable: bool,
}

impl TagQuery {
    pub fn new(entity: TagEntity) -> Self {
        Self {
            entity,
            query: None,
            sort: None,
            categories_only: false,
            votable: false,
        }
    }
}

/// A model to create or update with `upsert_model`
#[derive(Debug, Clone, PartialEq)]
pub struct ModelDraft {
    pub name: String,
    /// HTML shown on the model page
    pub description: String,
    /// Tag names; tags that already exist on the site are reused
    pub tags: Vec<String>,
    /// Category tag, attached after `tags`
    pub category: String,
    pub model_type: ModelType,
    /// Only sent for checkpoints
    pub checkpoint_type: CheckpointType,
    pub commercial_use: Vec<CommercialUse>,
    pub allow_no_credit: bool,
    pub allow_derivatives: bool,
    pub allow_different_license: bool,
    pub nsfw: bool,
    /// Depicts a real person
    pub poi: bool,
    /// Update this model instead of creating a draft
    pub existing_id: Option<u64>,
}

impl ModelDraft {
    /// A LORA draft in the `character` category with the site's default license
    pub fn new<I, S>(name: impl Into<String>, description: impl Into<String>, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            description: description.into(),
            tags: tags.into_iter().map(Into::into).collect(),
            category: "character".to_string(),
            model_type: ModelType::Lora,
            checkpoint_type: CheckpointType::Trained,
            commercial_use: vec![CommercialUse::RentCivit, CommercialUse::Rent],
            allow_no_credit: true,
            allow_derivatives: true,
            allow_different_license: true,
            nsfw: false,
            poi: false,
            existing_id: None,
        }
    }
}

/// A model version to create or update with `upsert_version`
#[derive(Debug, Clone, PartialEq)]
pub struct VersionDraft {
    pub model_id: u64,
    pub name: String,
    /// HTML shown on the version tab
    pub description: String,
    pub trigger_words: Vec<String>,
    pub base_model: String,
    pub steps: Option<u32>,
    pub epochs: Option<u32>,
    pub clip_skip: Option<u32>,
    /// Recommended VAE, looked up by model name
    pub vae_name: Option<String>,
    /// Early access window in days
    pub early_access_days: u32,
    /// Model version ids suggested alongside this one
    pub recommended_resources: Vec<u64>,
    /// Only signed-in users may download
    pub require_auth: bool,
    /// Update this version instead of creating one
    pub existing_id: Option<u64>,
}

impl VersionDraft {
    pub fn new<I, S>(
        model_id: u64,
        name: impl Into<String>,
        description: impl Into<String>,
        trigger_words: I,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            model_id,
            name: name.into(),
            description: description.into(),
            trigger_words: trigger_words.into_iter().map(Into::into).collect(),
            base_model: "SD 1.5".to_string(),
            steps: None,
            epochs: None,
            clip_skip: Some(2),
            vae_name: None,
            early_access_days: 0,
            recommended_resources: Vec::new(),
            require_auth: false,
            existing_id: None,
        }
    }
}
