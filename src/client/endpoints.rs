//! Endpoint methods
//!
//! Each method builds the request template the web app sends for the same
//! view. Listings return lazy streams; nothing is fetched until the stream
//! is polled.

use super::trpc::TrpcClient;
use super::types::{ImageQuery, ModelDraft, ModelQuery, TagQuery, VersionDraft};
use crate::error::{Error, Result};
use crate::marker::{or_omit, or_undefined, CURSOR, OMIT, PAGE, UNDEFINED};
use crate::native::{Native, NativeObject};
use crate::pagination::DEFAULT_ITEMS_KEY;
use crate::time::parse_publish_at;
use crate::types::{ImageSort, ModelType, Period, Reaction};
use chrono::Utc;
use futures::{Stream, TryStreamExt};
use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;
use tracing::info;

/// Builds a request template; every value goes through `Native::from`
macro_rules! input {
    ($($key:literal => $value:expr),* $(,)?) => {
        Native::object([$(($key, Native::from($value))),*])
    };
}

static NON_WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[\W_]+").unwrap());

/// Lowercase and collapse every run of non-word characters
fn normalize_name(name: &str, keep_space: bool) -> String {
    let replacement = if keep_space { " " } else { "" };
    NON_WORD
        .replace_all(&name.to_lowercase(), replacement)
        .trim()
        .to_string()
}

/// Tag names match when they agree up to case and punctuation
pub fn same_tag_name(a: &str, b: &str) -> bool {
    normalize_name(a, true) == normalize_name(b, true)
}

/// Model names match when they agree up to case, punctuation and spacing
pub fn same_model_name(a: &str, b: &str) -> bool {
    normalize_name(a, false) == normalize_name(b, false)
}

// ============================================================================
// Account
// ============================================================================

impl TrpcClient {
    /// Buzz balance of the signed-in user
    pub async fn buzz_account(&self) -> Result<Native> {
        self.query("/api/trpc/buzz.getUserAccount", &UNDEFINED).await
    }

    /// Recent buzz transactions of the signed-in user
    pub async fn buzz_transactions(&self, limit: u32) -> Result<Native> {
        let data = self
            .query(
                "/api/trpc/buzz.getUserTransactions",
                &input! { "limit" => limit, "authed" => self.is_authed() },
            )
            .await?;
        data.get("transactions")
            .cloned()
            .ok_or_else(|| Error::unexpected("response has no 'transactions'"))
    }

    /// Follower and following lists of a user
    pub async fn followers(&self, username: &str) -> Result<Native> {
        self.query(
            "/api/trpc/user.getLists",
            &input! { "username" => username, "authed" => self.is_authed() },
        )
        .await
    }

    pub async fn followers_self(&self) -> Result<Native> {
        self.followers(self.username()?).await
    }

    /// Notifications of the signed-in user, newest first
    pub fn iter_notifications(&self) -> impl Stream<Item = Result<Native>> + '_ {
        self.iter_cursor(
            "/api/trpc/notification.getAllByUser",
            input! { "cursor" => CURSOR, "authed" => self.is_authed() },
            DEFAULT_ITEMS_KEY,
        )
    }

    /// Mark every notification as read
    pub async fn mark_notifications_read(&self) -> Result<Native> {
        let input = input! {
            "id" => UNDEFINED,
            "all" => true,
            "userId" => self.user_id()?,
            "authed" => self.is_authed(),
        };
        self.mutate("/api/trpc/notification.markRead", &input).await
    }

    /// Creator profile by username
    pub async fn creator(&self, username: &str) -> Result<Native> {
        self.query(
            "/api/trpc/user.getCreator",
            &input! { "username" => username, "authed" => self.is_authed() },
        )
        .await
    }

    /// Creator profile by user id
    pub async fn creator_by_id(&self, user_id: u64) -> Result<Native> {
        self.query(
            "/api/trpc/user.getCreator",
            &input! { "id" => user_id, "authed" => self.is_authed() },
        )
        .await
    }

    /// Creator profile of the signed-in user
    pub async fn myself(&self) -> Result<Native> {
        self.creator(self.username()?).await
    }
}

// ============================================================================
// Articles
// ============================================================================

impl TrpcClient {
    pub fn iter_articles(&self, username: &str) -> impl Stream<Item = Result<Native>> + '_ {
        self.iter_cursor(
            "/api/trpc/article.getInfinite",
            input! {
                "period" => Period::AllTime,
                "periodMode" => "published",
                "sort" => "Newest",
                "view" => "categories",
                "username" => username,
                "includeDrafts" => false,
                "browsingMode" => "NSFW",
                "cursor" => CURSOR,
                "authed" => self.is_authed(),
            },
            DEFAULT_ITEMS_KEY,
        )
    }

    pub fn iter_articles_self(&self) -> Result<impl Stream<Item = Result<Native>> + '_> {
        Ok(self.iter_articles(self.username()?))
    }

    pub async fn article(&self, article_id: u64) -> Result<Native> {
        self.query(
            "/api/trpc/article.getById",
            &input! { "id" => article_id, "authed" => self.is_authed() },
        )
        .await
    }

    /// Comment thread of an article
    pub async fn article_comments(&self, article_id: u64) -> Result<Native> {
        let input = input! {
            "entityId" => article_id,
            "entityType" => "article",
            "hidden" => UNDEFINED,
            "authed" => self.is_authed(),
        };
        self.query("/api/trpc/commentv2.getThreadDetails", &input).await
    }

    /// Favorite or unfavorite an article
    pub async fn toggle_article_engagement(&self, article_id: u64) -> Result<Native> {
        let input = input! {
            "type" => "Favorite",
            "articleId" => article_id,
            "authed" => self.is_authed(),
        };
        self.mutate("/api/trpc/user.toggleArticleEngagement", &input).await
    }
}

// ============================================================================
// Reactions
// ============================================================================

impl TrpcClient {
    async fn toggle_reaction(
        &self,
        entity_id: u64,
        entity_type: &str,
        reaction: Reaction,
    ) -> Result<Native> {
        let input = input! {
            "entityId" => entity_id,
            "entityType" => entity_type,
            "reaction" => reaction,
            "authed" => self.is_authed(),
        };
        self.mutate("/api/trpc/reaction.toggle", &input).await
    }

    pub async fn toggle_article_reaction(&self, article_id: u64, reaction: Reaction) -> Result<Native> {
        self.toggle_reaction(article_id, "article", reaction).await
    }

    pub async fn toggle_article_comment_reaction(
        &self,
        comment_id: u64,
        reaction: Reaction,
    ) -> Result<Native> {
        self.toggle_reaction(comment_id, "comment", reaction).await
    }

    pub async fn toggle_image_reaction(&self, image_id: u64, reaction: Reaction) -> Result<Native> {
        self.toggle_reaction(image_id, "image", reaction).await
    }

    /// Model comments use their own reaction endpoint
    pub async fn toggle_model_comment_reaction(
        &self,
        comment_id: u64,
        reaction: Reaction,
    ) -> Result<Native> {
        let input = input! {
            "id" => comment_id,
            "reaction" => reaction,
            "authed" => self.is_authed(),
        };
        self.mutate("/api/trpc/comment.toggleReaction", &input).await
    }
}

// ============================================================================
// Models
// ============================================================================

impl TrpcClient {
    pub fn iter_models(&self, query: &ModelQuery) -> impl Stream<Item = Result<Native>> + '_ {
        let types = if query.types.is_empty() {
            OMIT
        } else {
            Native::from(query.types.clone())
        };
        self.iter_cursor(
            "/api/trpc/model.getAll",
            input! {
                "period" => query.period,
                "periodMode" => "published",
                "sort" => query.sort,
                "earlyAccess" => query.show_early_access,
                "supportsGeneration" => query.generation_supported_only,
                "followed" => query.followed_only,
                "browsingLevel" => query.level,
                "username" => or_omit(query.username.clone()),
                "types" => types,
                "cursor" => CURSOR,
                "authed" => self.is_authed(),
            },
            DEFAULT_ITEMS_KEY,
        )
    }

    /// Models of one user in feed order
    pub fn iter_models_of_user(&self, username: &str) -> impl Stream<Item = Result<Native>> + '_ {
        self.iter_cursor(
            "/api/trpc/model.getAll",
            input! {
                "period" => Period::AllTime,
                "periodMode" => "published",
                "sort" => "Newest",
                "view" => "feed",
                "username" => username,
                "cursor" => CURSOR,
                "authed" => self.is_authed(),
            },
            DEFAULT_ITEMS_KEY,
        )
    }

    pub fn iter_models_self(&self) -> Result<impl Stream<Item = Result<Native>> + '_> {
        Ok(self.iter_models_of_user(self.username()?))
    }

    /// Unpublished models of the signed-in user
    pub fn iter_draft_models(&self, limit: u32) -> impl Stream<Item = Result<Native>> + '_ {
        self.iter_page(
            "/api/trpc/model.getMyDraftModels",
            input! { "page" => PAGE, "limit" => limit, "authed" => self.is_authed() },
        )
    }

    /// Models of the signed-in user still in training
    pub fn iter_training_models(&self, limit: u32) -> impl Stream<Item = Result<Native>> + '_ {
        self.iter_page(
            "/api/trpc/model.getMyTrainingModels",
            input! { "page" => PAGE, "limit" => limit, "authed" => self.is_authed() },
        )
    }

    pub async fn model(&self, model_id: u64) -> Result<Native> {
        self.query(
            "/api/trpc/model.getById",
            &input! { "id" => model_id, "authed" => self.is_authed() },
        )
        .await
    }

    pub async fn model_suggested_resources(&self, model_id: u64) -> Result<Native> {
        let input = input! {
            "fromId" => model_id,
            "type" => "Suggested",
            "authed" => self.is_authed(),
        };
        self.query("/api/trpc/model.getAssociatedResourcesCardData", &input).await
    }

    pub fn iter_model_comments(&self, model_id: u64) -> impl Stream<Item = Result<Native>> + '_ {
        self.iter_cursor(
            "/api/trpc/comment.getAll",
            input! {
                "modelId" => model_id,
                "limit" => 8,
                "sort" => "newest",
                "hidden" => UNDEFINED,
                "cursor" => CURSOR,
                "authed" => self.is_authed(),
            },
            "comments",
        )
    }

    /// Posts made with one model version
    pub fn iter_model_posts(
        &self,
        model_id: u64,
        model_version_id: u64,
    ) -> impl Stream<Item = Result<Native>> + '_ {
        self.iter_cursor(
            "/api/trpc/image.getImagesAsPostsInfinite",
            input! {
                "period" => Period::AllTime,
                "sort" => "Newest",
                "view" => "categories",
                "modelVersionId" => model_version_id,
                "modelId" => model_id,
                "limit" => 50,
                "cursor" => CURSOR,
                "authed" => self.is_authed(),
            },
            DEFAULT_ITEMS_KEY,
        )
    }

    /// Every VAE model version known to the site
    pub async fn vae_models(&self) -> Result<Native> {
        self.query(
            "/api/trpc/modelVersion.getModelVersionsByModelType",
            &input! { "type" => "VAE", "authed" => true },
        )
        .await
    }

    /// Look up a VAE by model name
    pub async fn find_vae_model(&self, name: &str) -> Result<Option<Native>> {
        let models = self.vae_models().await?;
        let found = models.as_array().and_then(|items| {
            items
                .iter()
                .find(|item| {
                    item.get("modelName")
                        .and_then(Native::as_str)
                        .is_some_and(|n| same_model_name(n, name))
                })
                .cloned()
        });
        Ok(found)
    }

    /// Leave a positive review on a model version
    pub async fn model_thumb_up(&self, model_id: u64, model_version_id: u64) -> Result<Native> {
        let input = input! {
            "modelId" => model_id,
            "modelVersionId" => model_version_id,
            "recommended" => true,
            "rating" => 5,
            "authed" => self.is_authed(),
        };
        self.mutate("/api/trpc/resourceReview.create", &input).await
    }
}

// ============================================================================
// Model Management
// ============================================================================

impl TrpcClient {
    /// Publish a model version now, or schedule it when `publish_at` is given
    pub async fn model_publish(
        &self,
        model_id: u64,
        model_version_id: u64,
        publish_at: Option<&str>,
    ) -> Result<Native> {
        let publish_at = parse_publish_at(publish_at)?;
        match publish_at {
            Some(at) => info!(
                "Publishing model {}'s version {}, at {} ...",
                model_id,
                model_version_id,
                at.to_rfc3339()
            ),
            None => info!("Publishing model {}'s version {} ...", model_id, model_version_id),
        }

        let input = input! {
            "id" => model_id,
            "versionIds" => vec![model_version_id],
            "publishedAt" => or_undefined(publish_at),
            "authed" => true,
        };
        self.mutate("/api/trpc/model.publish", &input).await
    }

    /// Publish a single model version
    pub async fn model_version_publish(
        &self,
        model_version_id: u64,
        publish_at: Option<&str>,
    ) -> Result<Native> {
        let publish_at = parse_publish_at(publish_at)?;
        match publish_at {
            Some(at) => info!(
                "Publishing model version {}, at {} ...",
                model_version_id,
                at.to_rfc3339()
            ),
            None => info!("Publishing model version {} ...", model_version_id),
        }

        let input = input! {
            "id" => model_version_id,
            "publishedAt" => or_undefined(publish_at),
            "authed" => true,
        };
        self.mutate("/api/trpc/modelVersion.publish", &input).await
    }

    /// Soft-delete a model
    pub async fn model_delete(&self, model_id: u64) -> Result<Native> {
        info!("Deleting model {} ...", model_id);
        let input = input! { "id" => model_id, "permanently" => false, "authed" => true };
        self.mutate("/api/trpc/model.delete", &input).await
    }

    /// Create a draft model, or update the model `draft.existing_id` names.
    ///
    /// Tags already known to the site are attached by id; the rest are created.
    pub async fn upsert_model(&self, draft: &ModelDraft) -> Result<Native> {
        let tags = self.resolve_model_tags(&draft.tags, &draft.category).await?;
        let tag_names: Vec<&str> = tags
            .iter()
            .filter_map(|tag| tag.get("name").and_then(Native::as_str))
            .collect();
        match draft.existing_id {
            Some(id) => info!(
                "Model {:?}({}) already exists, updating its information. Tags: {:?} ...",
                draft.name, id, tag_names
            ),
            None => info!("Creating model {:?}, tags: {:?} ...", draft.name, tag_names),
        }

        let checkpoint_type = if draft.model_type == ModelType::Checkpoint {
            Native::from(draft.checkpoint_type)
        } else {
            Native::Null
        };
        let mut input = input! {
            "name" => draft.name.as_str(),
            "description" => draft.description.as_str(),
            "type" => draft.model_type,
            "checkpointType" => checkpoint_type,
            "allowCommercialUse" => draft.commercial_use.clone(),
            "allowNoCredit" => draft.allow_no_credit,
            "allowDerivatives" => draft.allow_derivatives,
            "allowDifferentLicense" => draft.allow_different_license,
            "nsfw" => draft.nsfw,
            "poi" => draft.poi,
            "tagsOnModels" => tags,
            "authed" => true,
            "status" => "Draft",
            "uploadType" => "Created",
            "templateId" => UNDEFINED,
            "bountyId" => UNDEFINED,
        };
        if let (Some(id), Native::Object(map)) = (draft.existing_id, &mut input) {
            mark_existing(map, id);
        }
        self.mutate("/api/trpc/model.upsert", &input).await
    }

    /// Create a version of a model, or update the version `draft.existing_id` names
    pub async fn upsert_version(&self, draft: &VersionDraft) -> Result<Native> {
        let vae_id = match &draft.vae_name {
            Some(name) => self
                .find_vae_model(name)
                .await?
                .and_then(|vae| vae.get("id").cloned()),
            None => None,
        };
        match draft.existing_id {
            Some(id) => info!(
                "Version {:?}({}) already exists in model {}, updating its information ...",
                draft.name, id, draft.model_id
            ),
            None => info!(
                "Creating version {:?} for model {}, with base model {:?} ...",
                draft.name, draft.model_id, draft.base_model
            ),
        }

        let recommended: Vec<Native> = draft
            .recommended_resources
            .iter()
            .map(|&id| input! { "resourceId" => id, "settings" => NativeObject::new() })
            .collect();
        let mut input = input! {
            "modelId" => draft.model_id,
            "name" => draft.name.as_str(),
            "baseModel" => draft.base_model.as_str(),
            "baseModelType" => UNDEFINED,
            "description" => draft.description.as_str(),
            "steps" => draft.steps,
            "epochs" => draft.epochs,
            "clipSkip" => draft.clip_skip,
            "vaeId" => vae_id.unwrap_or(UNDEFINED),
            "trainedWords" => draft.trigger_words.clone(),
            "earlyAccessTimeFrame" => draft.early_access_days,
            "skipTrainedWords" => draft.trigger_words.is_empty(),
            "recommendedResources" => recommended,
            "authed" => true,
            "templateId" => UNDEFINED,
            "bountyId" => UNDEFINED,
            "requireAuth" => draft.require_auth,
            "monetization" => UNDEFINED,
        };
        if let (Some(id), Native::Object(map)) = (draft.existing_id, &mut input) {
            mark_existing(map, id);
        }
        self.mutate("/api/trpc/modelVersion.upsert", &input).await
    }

    /// Site tags for `tags` followed by `category`, deduplicated by id and name
    async fn resolve_model_tags(&self, tags: &[String], category: &str) -> Result<Vec<Native>> {
        let mut resolved = Vec::new();
        let mut seen_ids = HashSet::new();
        let mut seen_names = HashSet::new();

        for tag in tags.iter().map(String::as_str).chain([category]) {
            let Some(item) = self.find_model_tag(tag).await? else {
                info!("Tag {:?} not found, it will be created.", tag);
                if seen_names.insert(tag.to_lowercase()) {
                    resolved.push(input! { "id" => UNDEFINED, "name" => tag });
                }
                continue;
            };

            let id = item
                .get("id")
                .and_then(Native::as_i64)
                .ok_or_else(|| Error::unexpected("tag has no 'id'"))?;
            let name = item.get("name").and_then(Native::as_str).unwrap_or(tag);
            info!("Tag {}({}) found.", name, id);
            if seen_ids.contains(&id) || seen_names.contains(&name.to_lowercase()) {
                continue;
            }
            seen_ids.insert(id);
            seen_names.insert(name.to_lowercase());

            let is_category = item
                .get("isCategory")
                .and_then(Native::as_bool)
                .unwrap_or(false);
            resolved.push(if is_category {
                input! { "id" => id, "name" => name, "models" => UNDEFINED }
            } else {
                input! { "id" => id, "name" => name, "isCategory" => false }
            });
        }
        Ok(resolved)
    }

    /// Replace the suggested resources shown on a model page
    pub async fn model_set_associated(&self, model_id: u64, resource_ids: &[u64]) -> Result<Native> {
        info!(
            "Setting resource association to model {}: {:?} ...",
            model_id, resource_ids
        );
        let associations: Vec<Native> = resource_ids
            .iter()
            .map(|&id| {
                input! {
                    "id" => UNDEFINED,
                    "resourceType" => "model",
                    "resourceId" => id,
                }
            })
            .collect();
        let input = input! {
            "fromId" => model_id,
            "type" => "Suggested",
            "associations" => associations,
            "authed" => true,
        };
        self.mutate("/api/trpc/model.setAssociatedResources", &input).await
    }
}

/// Turn a create request into an update of `id`
fn mark_existing(input: &mut NativeObject, id: u64) {
    input.insert("id".to_string(), Native::from(id));
    input.insert("locked".to_string(), Native::from(false));
    input.insert("status".to_string(), Native::from("Published"));
}

// ============================================================================
// Posts & Images
// ============================================================================

impl TrpcClient {
    pub fn iter_posts(&self, username: &str) -> impl Stream<Item = Result<Native>> + '_ {
        self.iter_cursor(
            "/api/trpc/post.getInfinite",
            input! {
                "period" => Period::AllTime,
                "periodMode" => "published",
                "sort" => "Newest",
                "view" => "categories",
                "username" => username,
                "draftOnly" => false,
                "browsingMode" => "NSFW",
                "include" => Vec::<Native>::new(),
                "cursor" => CURSOR,
                "authed" => self.is_authed(),
            },
            DEFAULT_ITEMS_KEY,
        )
    }

    pub fn iter_posts_self(&self) -> Result<impl Stream<Item = Result<Native>> + '_> {
        Ok(self.iter_posts(self.username()?))
    }

    pub async fn post(&self, post_id: u64) -> Result<Native> {
        self.query(
            "/api/trpc/post.get",
            &input! { "id" => post_id, "authed" => self.is_authed() },
        )
        .await
    }

    /// Publish a post at `publish_at`, or now
    pub async fn post_publish(&self, post_id: u64, publish_at: Option<&str>) -> Result<Native> {
        let publish_at = parse_publish_at(publish_at)?.unwrap_or_else(Utc::now);
        info!("Publishing post {}, at {} ...", post_id, publish_at.to_rfc3339());
        let input = input! {
            "id" => post_id,
            "authed" => true,
            "publishedAt" => publish_at,
        };
        self.mutate("/api/trpc/post.update", &input).await
    }

    pub fn iter_images(&self, query: &ImageQuery) -> impl Stream<Item = Result<Native>> + '_ {
        let types = if query.any_type {
            OMIT
        } else {
            Native::from(vec!["image"])
        };
        let mut template = input! {
            "postId" => or_omit(query.post_id),
            "period" => or_omit(query.period),
            "sort" => or_omit(query.sort),
            "types" => types,
            "browsingLevel" => query.level,
            "cursor" => CURSOR,
            "authed" => self.is_authed(),
        };
        if let (Some(username), Native::Object(map)) = (&query.username, &mut template) {
            map.insert("username".to_string(), Native::from(username.as_str()));
        }
        self.iter_cursor("/api/trpc/image.getInfinite", template, DEFAULT_ITEMS_KEY)
    }

    pub fn iter_images_self(&self) -> Result<impl Stream<Item = Result<Native>> + '_> {
        let query = ImageQuery {
            username: Some(self.username()?.to_string()),
            period: Some(Period::AllTime),
            sort: Some(ImageSort::Newest),
            ..ImageQuery::default()
        };
        Ok(self.iter_images(&query))
    }

    /// Every image of a post, in post order
    pub fn iter_post_images(&self, post_id: u64) -> impl Stream<Item = Result<Native>> + '_ {
        self.iter_images(&ImageQuery::of_post(post_id))
    }

    /// Recent images grouped by category, as on the site's image page
    pub fn iter_images_by_category(&self) -> impl Stream<Item = Result<Native>> + '_ {
        self.iter_cursor(
            "/api/trpc/image.getImagesByCategory",
            input! {
                "period" => Period::Week,
                "sort" => ImageSort::Newest,
                "view" => "categories",
                "limit" => 6,
                "browsingMode" => "NSFW",
                "cursor" => CURSOR,
                "authed" => self.is_authed(),
            },
            DEFAULT_ITEMS_KEY,
        )
    }

    /// Post tags matching a name search
    pub async fn post_tags(&self, query: &str) -> Result<Native> {
        let input = input! { "query" => query, "authed" => true };
        self.query_batched("/api/trpc/post.getTags", &input).await
    }

    pub fn iter_collections(&self, user_id: u64) -> impl Stream<Item = Result<Native>> + '_ {
        self.iter_cursor(
            "/api/trpc/collection.getInfinite",
            input! {
                "sort" => "Newest",
                "userId" => user_id,
                "cursor" => CURSOR,
                "authed" => self.is_authed(),
            },
            DEFAULT_ITEMS_KEY,
        )
    }

    pub fn iter_collections_self(&self) -> Result<impl Stream<Item = Result<Native>> + '_> {
        Ok(self.iter_collections(self.user_id()?))
    }
}

// ============================================================================
// Tags
// ============================================================================

impl TrpcClient {
    pub fn iter_tags(&self, query: &TagQuery) -> impl Stream<Item = Result<Native>> + '_ {
        let sort = query.sort.unwrap_or_else(|| query.entity.default_sort());
        let types = if query.votable {
            Native::from(vec!["UserGenerated", "Label"])
        } else {
            OMIT
        };
        self.iter_page(
            "/api/trpc/tag.getAll",
            input! {
                "entityType" => vec![query.entity],
                "types" => types,
                "sort" => sort,
                "query" => or_omit(query.query.clone()),
                "categories" => query.categories_only,
                "limit" => 100,
                "include" => vec!["nsfwLevel"],
                "authed" => self.is_authed(),
                "page" => PAGE,
            },
        )
    }

    /// Model tags matching a name search
    pub fn iter_model_tags(&self, tag: &str) -> impl Stream<Item = Result<Native>> + '_ {
        self.iter_page(
            "/api/trpc/tag.getAll",
            input! {
                "limit" => 20,
                "entityType" => vec!["Model"],
                "categories" => false,
                "query" => tag,
                "authed" => true,
                "page" => PAGE,
            },
        )
    }

    /// Find an existing model tag with the same name as `tag`
    pub async fn find_model_tag(&self, tag: &str) -> Result<Option<Native>> {
        info!("Querying tag {:?} ...", tag);
        let tags = self.iter_model_tags(tag);
        futures::pin_mut!(tags);

        while let Some(item) = tags.try_next().await? {
            if item
                .get("name")
                .and_then(Native::as_str)
                .is_some_and(|name| same_tag_name(name, tag))
            {
                return Ok(Some(item));
            }
        }
        Ok(None)
    }

    /// Tags on an image that can be voted on
    pub async fn votable_tags(&self, image_id: u64, force_auth: bool) -> Result<Native> {
        let input = input! {
            "id" => image_id,
            "type" => "image",
            "authed" => force_auth || self.is_authed(),
        };
        self.query("/api/trpc/tag.getVotableTags", &input).await
    }
}

