//! Tests for the tRPC client

use super::*;
use crate::config::ClientConfig;
use crate::error::Error;
use crate::native::Native;
use crate::session::{Identity, Session};
use crate::types::{CheckpointType, ModelType, Reaction, TagEntity};
use futures::TryStreamExt;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

fn config_for(server: &MockServer) -> ClientConfig {
    ClientConfig {
        base_url: server.uri(),
        max_retries: 0,
        rate_limit: None,
        ..ClientConfig::default()
    }
}

fn client_for(server: &MockServer) -> TrpcClient {
    TrpcClient::new(&config_for(server)).unwrap()
}

fn alice() -> Identity {
    Identity::from_raw_user(&json!({"id": 42, "username": "alice"}))
        .unwrap()
        .unwrap()
}

/// Wrap a payload the way a successful tRPC response does
fn data(payload: Value) -> Value {
    json!({"result": {"data": {"json": payload}}})
}

/// Decoded `input` query parameter of a request
fn input_of(request: &Request) -> Value {
    request
        .url
        .query_pairs()
        .find(|(k, _)| k == "input")
        .and_then(|(_, v)| serde_json::from_str(&v).ok())
        .unwrap_or(Value::Null)
}

fn input_field_is(field: &'static str, expected: Value) -> impl Fn(&Request) -> bool {
    move |request: &Request| input_of(request)["json"][field] == expected
}

// ============================================================================
// Identity
// ============================================================================

#[test]
fn test_identity_required() {
    let client = TrpcClient::anonymous().unwrap();
    assert!(!client.is_authed());
    assert!(client.identity().is_none());

    let err = client.username().unwrap_err();
    assert_eq!(err.to_string(), "Session error: You need to login first.");
    assert!(matches!(client.user_id(), Err(Error::Session { .. })));
    assert!(client.iter_articles_self().is_err());
    assert!(client.iter_collections_self().is_err());
}

#[test]
fn test_with_identity() {
    let client = TrpcClient::anonymous().unwrap().with_identity(Some(alice()));
    assert!(client.is_authed());
    assert_eq!(client.username().unwrap(), "alice");
    assert_eq!(client.user_id().unwrap(), 42);
}

#[test]
fn test_invalid_config_is_rejected() {
    let config = ClientConfig {
        base_url: "nowhere".to_string(),
        ..ClientConfig::default()
    };
    assert!(matches!(TrpcClient::new(&config), Err(Error::Config { .. })));
}

#[tokio::test]
async fn test_refresh_identity() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/auth/session"))
        .and(header("Cookie", "__Secure-civitai-token=tok"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "user": {"id": 7, "username": "bob", "createdAt": "2023-01-01T00:00:00.000Z"},
            "expires": "2099-01-01T00:00:00.000Z"
        })))
        .mount(&server)
        .await;

    let config = config_for(&server).with_session(&Session::from_cookies([(
        "__Secure-civitai-token",
        "tok",
    )]));
    let mut client = TrpcClient::new(&config).unwrap();

    let identity = client.refresh_identity().await.unwrap().unwrap();
    assert_eq!(identity.username, "bob");
    assert_eq!(client.user_id().unwrap(), 7);
}

#[tokio::test]
async fn test_refresh_identity_logged_out() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/auth/session"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let mut client = client_for(&server).with_identity(Some(alice()));
    assert!(client.refresh_identity().await.unwrap().is_none());
    assert!(!client.is_authed());
}

// ============================================================================
// Request Encoding
// ============================================================================

#[tokio::test]
async fn test_query_sends_envelope_as_input() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/trpc/user.getCreator"))
        .and(query_param(
            "input",
            r#"{"json":{"username":"alice","authed":false}}"#,
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(data(json!({"id": 42}))))
        .expect(1)
        .mount(&server)
        .await;

    let creator = client_for(&server).creator("alice").await.unwrap();
    assert_eq!(creator.get("id"), Some(&Native::from(42)));
}

#[tokio::test]
async fn test_query_without_input_sends_undefined() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/trpc/buzz.getUserAccount"))
        .and(query_param(
            "input",
            r#"{"json":null,"meta":{"values":["undefined"]}}"#,
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(data(json!({"balance": 100}))))
        .expect(1)
        .mount(&server)
        .await;

    let account = client_for(&server).buzz_account().await.unwrap();
    assert_eq!(account.get("balance"), Some(&Native::from(100)));
}

#[tokio::test]
async fn test_omitted_fields_are_not_sent() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/trpc/model.getAll"))
        .and(|request: &Request| {
            let input = input_of(request);
            input["json"].get("username").is_none()
                && input["json"]["types"] == json!(["LORA"])
                && input["json"]["browsingLevel"] == json!(31)
        })
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(data(json!({"items": [{"id": 1}], "nextCursor": null}))),
        )
        .expect(1)
        .mount(&server)
        .await;

    let query = ModelQuery {
        types: vec![ModelType::Lora],
        ..ModelQuery::default()
    };
    let client = client_for(&server);
    let models: Vec<Native> = client.iter_models(&query).try_collect().await.unwrap();
    assert_eq!(models.len(), 1);
}

#[tokio::test]
async fn test_mutation_posts_envelope() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/trpc/model.delete"))
        .and(body_json(json!({"json": {"id": 5, "permanently": false, "authed": true}})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": {"data": {"json": null, "meta": {"values": ["undefined"]}}}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let result = client_for(&server).model_delete(5).await.unwrap();
    assert!(result.is_null());
}

#[tokio::test]
async fn test_publish_at_is_sent_as_date() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/trpc/modelVersion.publish"))
        .and(body_json(json!({
            "json": {"id": 9, "publishedAt": "2024-05-01T10:00:00+00:00", "authed": true},
            "meta": {"values": {"publishedAt": ["Date"]}}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(data(json!({"ok": true}))))
        .expect(1)
        .mount(&server)
        .await;

    client_for(&server)
        .model_version_publish(9, Some("2024-05-01T12:00:00+02:00"))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_publish_without_time_sends_undefined() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/trpc/model.publish"))
        .and(body_json(json!({
            "json": {"id": 1, "versionIds": [2], "publishedAt": null, "authed": true},
            "meta": {"values": {"publishedAt": ["undefined"]}}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(data(json!({"ok": true}))))
        .expect(1)
        .mount(&server)
        .await;

    client_for(&server).model_publish(1, 2, None).await.unwrap();
}

#[tokio::test]
async fn test_reaction_toggle() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/trpc/reaction.toggle"))
        .and(body_json(json!({"json": {
            "entityId": 3, "entityType": "image", "reaction": "Heart", "authed": true
        }})))
        .respond_with(ResponseTemplate::new(200).set_body_json(data(json!(true))))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).with_identity(Some(alice()));
    let result = client.toggle_image_reaction(3, Reaction::Heart).await.unwrap();
    assert_eq!(result, Native::from(true));
}

// ============================================================================
// Model Management
// ============================================================================

async fn mount_model_tags(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/api/trpc/tag.getAll"))
        .and(input_field_is("query", json!("Blue Archive")))
        .respond_with(ResponseTemplate::new(200).set_body_json(data(json!({
            "items": [{"id": 2, "name": "Blue-Archive", "isCategory": false}]
        }))))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/trpc/tag.getAll"))
        .and(input_field_is("query", json!("character")))
        .respond_with(ResponseTemplate::new(200).set_body_json(data(json!({
            "items": [{"id": 5, "name": "character", "isCategory": true}]
        }))))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/trpc/tag.getAll"))
        .respond_with(ResponseTemplate::new(200).set_body_json(data(json!({"items": []}))))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_upsert_model_resolves_tags() {
    let server = MockServer::start().await;
    mount_model_tags(&server).await;

    Mock::given(method("POST"))
        .and(path("/api/trpc/model.upsert"))
        .and(body_json(json!({
            "json": {
                "name": "Shiroko",
                "description": "<p>hello</p>",
                "type": "LORA",
                "checkpointType": null,
                "allowCommercialUse": ["RentCivit", "Rent"],
                "allowNoCredit": true,
                "allowDerivatives": true,
                "allowDifferentLicense": true,
                "nsfw": false,
                "poi": false,
                "tagsOnModels": [
                    {"id": 2, "name": "Blue-Archive", "isCategory": false},
                    {"id": null, "name": "brand new"},
                    {"id": 5, "name": "character", "models": null}
                ],
                "authed": true,
                "status": "Draft",
                "uploadType": "Created",
                "templateId": null,
                "bountyId": null
            },
            "meta": {"values": {
                "tagsOnModels.1.id": ["undefined"],
                "tagsOnModels.2.models": ["undefined"],
                "templateId": ["undefined"],
                "bountyId": ["undefined"]
            }}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(data(json!({"id": 100}))))
        .expect(1)
        .mount(&server)
        .await;

    let draft = ModelDraft::new(
        "Shiroko",
        "<p>hello</p>",
        ["Blue Archive", "brand new", "BRAND NEW", "blue-archive"],
    );
    let model = client_for(&server).upsert_model(&draft).await.unwrap();
    assert_eq!(model.get("id"), Some(&Native::from(100)));
}

#[tokio::test]
async fn test_upsert_model_updates_existing() {
    let server = MockServer::start().await;
    mount_model_tags(&server).await;

    Mock::given(method("POST"))
        .and(path("/api/trpc/model.upsert"))
        .and(|request: &Request| {
            let body: Value = serde_json::from_slice(&request.body).unwrap_or_default();
            body["json"]["id"] == json!(9)
                && body["json"]["locked"] == json!(false)
                && body["json"]["status"] == json!("Published")
                && body["json"]["checkpointType"] == json!("Merge")
                && body["json"]["allowCommercialUse"] == json!(["Sell"])
                && body["json"]["tagsOnModels"] == json!([{"id": null, "name": "style"}])
                && body["meta"]["values"]["tagsOnModels.0.id"] == json!(["undefined"])
        })
        .respond_with(ResponseTemplate::new(200).set_body_json(data(json!({"id": 9}))))
        .expect(1)
        .mount(&server)
        .await;

    let draft = ModelDraft {
        category: "style".to_string(),
        model_type: ModelType::Checkpoint,
        checkpoint_type: CheckpointType::Merge,
        commercial_use: vec![crate::types::CommercialUse::Sell],
        existing_id: Some(9),
        ..ModelDraft::new("Mix", "", Vec::<String>::new())
    };
    client_for(&server).upsert_model(&draft).await.unwrap();
}

#[tokio::test]
async fn test_upsert_version_with_vae() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/trpc/modelVersion.getModelVersionsByModelType"))
        .respond_with(ResponseTemplate::new(200).set_body_json(data(json!([
            {"id": 70, "modelName": "vae-ft-mse"},
            {"id": 77, "modelName": "KL F8 Anime 2"}
        ]))))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/trpc/modelVersion.upsert"))
        .and(body_json(json!({
            "json": {
                "modelId": 1,
                "name": "v1",
                "baseModel": "SD 1.5",
                "baseModelType": null,
                "description": "<p>v1</p>",
                "steps": 1500,
                "epochs": null,
                "clipSkip": 2,
                "vaeId": 77,
                "trainedWords": [],
                "earlyAccessTimeFrame": 0,
                "skipTrainedWords": true,
                "recommendedResources": [{"resourceId": 3, "settings": {}}],
                "authed": true,
                "templateId": null,
                "bountyId": null,
                "requireAuth": false,
                "monetization": null
            },
            "meta": {"values": {
                "baseModelType": ["undefined"],
                "templateId": ["undefined"],
                "bountyId": ["undefined"],
                "monetization": ["undefined"]
            }}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(data(json!({"id": 500}))))
        .expect(1)
        .mount(&server)
        .await;

    let draft = VersionDraft {
        steps: Some(1500),
        vae_name: Some("kl-f8-anime2".to_string()),
        recommended_resources: vec![3],
        ..VersionDraft::new(1, "v1", "<p>v1</p>", Vec::<String>::new())
    };
    let version = client_for(&server).upsert_version(&draft).await.unwrap();
    assert_eq!(version.get("id"), Some(&Native::from(500)));
}

#[tokio::test]
async fn test_upsert_version_without_vae_sends_undefined() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/trpc/modelVersion.upsert"))
        .and(|request: &Request| {
            let body: Value = serde_json::from_slice(&request.body).unwrap_or_default();
            body["meta"]["values"]["vaeId"] == json!(["undefined"])
                && body["json"]["id"] == json!(8)
                && body["json"]["status"] == json!("Published")
                && body["json"]["trainedWords"] == json!(["shiroko"])
                && body["json"]["skipTrainedWords"] == json!(false)
        })
        .respond_with(ResponseTemplate::new(200).set_body_json(data(json!({"id": 8}))))
        .expect(1)
        .mount(&server)
        .await;

    let draft = VersionDraft {
        existing_id: Some(8),
        ..VersionDraft::new(1, "v2", "", ["shiroko"])
    };
    client_for(&server).upsert_version(&draft).await.unwrap();
}

// ============================================================================
// Batched Queries
// ============================================================================

#[tokio::test]
async fn test_post_tags_uses_batch_link() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/trpc/post.getTags"))
        .and(query_param("batch", "1"))
        .and(query_param(
            "input",
            r#"{"0":{"json":{"query":"cat","authed":true}}}"#,
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"result": {"data": {"json": [{"id": 1, "name": "cat"}]}}}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let tags = client_for(&server).post_tags("cat").await.unwrap();
    assert_eq!(
        tags,
        Native::from(vec![Native::object([
            ("id", Native::from(1)),
            ("name", Native::from("cat")),
        ])])
    );
}

#[tokio::test]
async fn test_batched_error_is_api_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/trpc/post.getTags"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!([
            {"error": {"json": {"message": "bad query"}}}
        ])))
        .mount(&server)
        .await;

    let err = client_for(&server).post_tags("").await.unwrap_err();
    assert!(matches!(err, Error::Api { status: 400, .. }));
}

// ============================================================================
// Response Decoding
// ============================================================================

#[tokio::test]
async fn test_response_dates_are_decoded() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/trpc/post.get"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": {"data": {
                "json": {"id": 1, "publishedAt": "2024-01-02T03:04:05.000Z"},
                "meta": {"values": {"publishedAt": ["Date"]}}
            }}
        })))
        .mount(&server)
        .await;

    let post = client_for(&server).post(1).await.unwrap();
    let published = post.get("publishedAt").and_then(Native::as_date).unwrap();
    assert_eq!(published.timestamp(), 1_704_164_645);
}

#[tokio::test]
async fn test_top_level_error_is_api_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/trpc/model.getById"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "error": {"json": {"message": "No model with id 1", "code": -32004}}
        })))
        .mount(&server)
        .await;

    let err = client_for(&server).model(1).await.unwrap_err();
    match err {
        Error::Api { status, error } => {
            assert_eq!(status, 404);
            assert_eq!(
                error.get("message").and_then(Native::as_str),
                Some("No model with id 1")
            );
        }
        other => panic!("expected API error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_result_error_is_api_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/trpc/article.getById"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": {"error": true, "data": {"json": {"message": "hidden"}}}
        })))
        .mount(&server)
        .await;

    let err = client_for(&server).article(3).await.unwrap_err();
    assert!(matches!(err, Error::Api { status: 200, .. }));
}

#[tokio::test]
async fn test_non_json_error_body_is_http_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/trpc/post.get"))
        .respond_with(ResponseTemplate::new(500).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = client_for(&server).post(1).await.unwrap_err();
    assert!(matches!(err, Error::HttpStatus { status: 500, .. }));
}

#[tokio::test]
async fn test_non_json_success_body_is_decode_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/trpc/post.get"))
        .respond_with(ResponseTemplate::new(200).set_body_string("maintenance"))
        .mount(&server)
        .await;

    let err = client_for(&server).post(1).await.unwrap_err();
    assert!(matches!(err, Error::Decode { .. }));
}

#[tokio::test]
async fn test_missing_result_is_unexpected() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/trpc/post.get"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .mount(&server)
        .await;

    let err = client_for(&server).post(1).await.unwrap_err();
    assert!(matches!(err, Error::UnexpectedResponse { .. }));
}

#[tokio::test]
async fn test_unknown_tag_in_response() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/trpc/post.get"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": {"data": {"json": {"n": "1"}, "meta": {"values": {"n": ["bigint"]}}}}
        })))
        .mount(&server)
        .await;

    let err = client_for(&server).post(1).await.unwrap_err();
    assert!(matches!(err, Error::UnknownTag { ref tag } if tag == "bigint"));
    assert!(err.is_codec_error());
}

// ============================================================================
// Pagination
// ============================================================================

#[tokio::test]
async fn test_cursor_listing_with_custom_items_key() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/trpc/comment.getAll"))
        .and(input_field_is("cursor", Value::Null))
        .respond_with(ResponseTemplate::new(200).set_body_json(data(json!({
            "comments": [{"id": 1}, {"id": 2}],
            "nextCursor": 2
        }))))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/trpc/comment.getAll"))
        .and(input_field_is("cursor", json!(2)))
        .respond_with(ResponseTemplate::new(200).set_body_json(data(json!({
            "comments": [{"id": 3}],
            "nextCursor": null
        }))))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let comments: Vec<Native> = client.iter_model_comments(10).try_collect().await.unwrap();

    let ids: Vec<i64> = comments
        .iter()
        .filter_map(|c| c.get("id").and_then(Native::as_i64))
        .collect();
    assert_eq!(ids, vec![1, 2, 3]);
}

#[tokio::test]
async fn test_page_listing_stops_on_empty_page() {
    let server = MockServer::start().await;

    for (page, items) in [(1, json!([{"id": "a"}])), (2, json!([{"id": "b"}])), (3, json!([]))] {
        Mock::given(method("GET"))
            .and(path("/api/trpc/model.getMyDraftModels"))
            .and(input_field_is("page", json!(page)))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(data(json!({"items": items}))),
            )
            .expect(1)
            .mount(&server)
            .await;
    }

    let client = client_for(&server).with_identity(Some(alice()));
    let drafts: Vec<Native> = client.iter_draft_models(10).try_collect().await.unwrap();
    assert_eq!(drafts.len(), 2);
}

#[tokio::test]
async fn test_listing_error_stops_stream() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/trpc/notification.getAllByUser"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": {"json": {"message": "UNAUTHORIZED"}}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let result: Result<Vec<Native>, Error> = client.iter_notifications().try_collect().await;
    assert!(matches!(result, Err(Error::Api { status: 401, .. })));
}

#[tokio::test]
async fn test_post_images_query() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/trpc/image.getInfinite"))
        .and(|request: &Request| {
            let input = input_of(request);
            input["json"]
                == json!({"postId": 77, "browsingLevel": 31, "cursor": null, "authed": false})
        })
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(data(json!({"items": [{"id": 1}], "nextCursor": null}))),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let images: Vec<Native> = client.iter_post_images(77).try_collect().await.unwrap();
    assert_eq!(images.len(), 1);
}

#[tokio::test]
async fn test_images_by_category() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/trpc/image.getImagesByCategory"))
        .and(input_field_is("period", json!("Week")))
        .and(input_field_is("limit", json!(6)))
        .and(input_field_is("cursor", Value::Null))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(data(json!({"items": [{"id": 1}, {"id": 2}], "nextCursor": null}))),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let categories: Vec<Native> = client.iter_images_by_category().try_collect().await.unwrap();
    assert_eq!(categories.len(), 2);
}

#[tokio::test]
async fn test_find_model_tag() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/trpc/tag.getAll"))
        .and(input_field_is("page", json!(1)))
        .respond_with(ResponseTemplate::new(200).set_body_json(data(json!({
            "items": [{"id": 1, "name": "anime girl"}, {"id": 2, "name": "Blue-Archive"}]
        }))))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let tag = client.find_model_tag("blue archive").await.unwrap().unwrap();
    assert_eq!(tag.get("id"), Some(&Native::from(2)));
}

#[tokio::test]
async fn test_tag_listing_uses_entity_default_sort() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/trpc/tag.getAll"))
        .and(input_field_is("sort", json!("Most Posts")))
        .and(input_field_is("entityType", json!(["Post"])))
        .respond_with(ResponseTemplate::new(200).set_body_json(data(json!({"items": []}))))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let tags: Vec<Native> = client
        .iter_tags(&TagQuery::new(TagEntity::Post))
        .try_collect()
        .await
        .unwrap();
    assert!(tags.is_empty());
}

// ============================================================================
// Name Matching
// ============================================================================

#[test]
fn test_same_tag_name() {
    assert!(same_tag_name("Blue-Archive", "blue archive"));
    assert!(same_tag_name("  Hello__World!! ", "hello world"));
    assert!(!same_tag_name("bluearchive", "blue archive"));
}

#[test]
fn test_same_model_name() {
    assert!(same_model_name("kl-f8-anime2", "KL F8 Anime 2"));
    assert!(!same_model_name("vae-ft-mse", "vae-ft-ema"));
}
