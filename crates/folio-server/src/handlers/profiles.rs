use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use folio_shared::{
    api::{CreatedResponse, ProfileInput},
    vcard::{self, Variant},
    Profile,
};
use serde::Deserialize;

use super::parse_id;
use crate::error::AppError;
use crate::routes::AppState;

const ENTITY: &str = "Profile";

/// GET /api/users
pub async fn list_profiles(State(state): State<AppState>) -> Result<Json<Vec<Profile>>, AppError> {
    let profiles = state.store.list_profiles().await?;
    Ok(Json(profiles))
}

/// GET /api/users/:id
pub async fn get_profile(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Profile>, AppError> {
    let id = parse_id(&id, ENTITY)?;

    let profile = state
        .store
        .get_profile(id)
        .await?
        .ok_or(AppError::NotFound(ENTITY))?;

    Ok(Json(profile))
}

/// POST /api/users
pub async fn create_profile(
    State(state): State<AppState>,
    Json(req): Json<ProfileInput>,
) -> Result<(StatusCode, Json<CreatedResponse>), AppError> {
    let profile = req.validate()?;
    let created = state.store.create_profile(profile).await?;

    tracing::info!(profile_id = %created.id, name = %created.name, "Profile created");

    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse {
            id: created.id,
            message: "Profile created successfully".to_string(),
        }),
    ))
}

/// PUT /api/users/:id
///
/// Full replace: fields missing from the body are cleared.
pub async fn update_profile(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<ProfileInput>,
) -> Result<Json<Profile>, AppError> {
    let id = parse_id(&id, ENTITY)?;
    let profile = match req.validate() {
        Ok(profile) => profile,
        Err(e) => {
            if state.store.get_profile(id).await?.is_none() {
                return Err(AppError::NotFound(ENTITY));
            }
            return Err(e.into());
        }
    };

    let updated = state
        .store
        .update_profile(id, profile)
        .await?
        .ok_or(AppError::NotFound(ENTITY))?;

    tracing::info!(profile_id = %id, "Profile updated");

    Ok(Json(updated))
}

/// DELETE /api/users/:id
pub async fn delete_profile(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = parse_id(&id, ENTITY)?;

    if !state.store.delete_profile(id).await? {
        return Err(AppError::NotFound(ENTITY));
    }

    tracing::info!(profile_id = %id, "Profile deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// Attachment header with an ASCII `filename` and the exact UTF-8 `filename*`
fn content_disposition(file_name: &str) -> String {
    let fallback: String = file_name
        .chars()
        .map(|c| if c.is_ascii() && c != '"' && c != '\\' { c } else { '_' })
        .collect();

    if fallback == file_name {
        format!("attachment; filename=\"{}\"", fallback)
    } else {
        format!(
            "attachment; filename=\"{}\"; filename*=UTF-8''{}",
            fallback,
            urlencoding::encode(file_name)
        )
    }
}

#[derive(Debug, Deserialize)]
pub struct VcardQuery {
    #[serde(default)]
    pub variant: Variant,
}

/// GET /api/users/:id/vcard
pub async fn download_vcard(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<VcardQuery>,
) -> Result<Response, AppError> {
    let id = parse_id(&id, ENTITY)?;

    let profile = state
        .store
        .get_profile(id)
        .await?
        .ok_or(AppError::NotFound(ENTITY))?;

    let file_name = vcard::file_name(&profile.name);
    let disposition =
        HeaderValue::from_str(&content_disposition(&file_name)).map_err(anyhow::Error::from)?;

    Ok((
        [
            (header::CONTENT_TYPE, HeaderValue::from_static(vcard::MIME_TYPE)),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        query.variant.render(&profile),
    )
        .into_response())
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::{json, Value};

    use super::super::test_support::{raw, send, test_app};
    use super::content_disposition;

    fn jean() -> Value {
        json!({
            "name": "Jean Dupont",
            "profession": "Développeur",
            "photo": "http://x/y.png"
        })
    }

    #[tokio::test]
    async fn test_profile_lifecycle() {
        let app = test_app();

        let (status, body) = send(&app, "POST", "/api/users", Some(jean())).await;
        assert_eq!(status, StatusCode::CREATED);
        let id = body["id"].as_str().unwrap().to_string();

        let (status, body) = send(&app, "GET", &format!("/api/users/{}", id), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["name"], "Jean Dupont");
        assert_eq!(body["profession"], "Développeur");
        assert_eq!(body["photo"], "http://x/y.png");
        assert!(body["created_at"].is_string());
        assert!(body["updated_at"].is_string());
        assert_eq!(body["skills"], json!([]));

        let (status, _) = send(&app, "DELETE", &format!("/api/users/{}", id), None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, body) = send(&app, "GET", &format!("/api/users/{}", id), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Profile not found");
    }

    #[tokio::test]
    async fn test_create_requires_name_profession_and_photo() {
        let app = test_app();

        for field in ["name", "profession", "photo"] {
            let mut body = jean();
            body.as_object_mut().unwrap().remove(field);
            let (status, body) = send(&app, "POST", "/api/users", Some(body)).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(body["error"], "Name, profession, and photo are required");
        }

        let mut blank = jean();
        blank["photo"] = json!("  ");
        let (status, _) = send(&app, "POST", "/api/users", Some(blank)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (_, list) = send(&app, "GET", "/api/users", None).await;
        assert_eq!(list, json!([]));
    }

    #[tokio::test]
    async fn test_update_replaces_whole_record() {
        let app = test_app();

        let mut full = jean();
        full["company"] = json!("Acme");
        full["skills"] = json!(["Rust", "SQL"]);
        let (_, created) = send(&app, "POST", "/api/users", Some(full)).await;
        let uri = format!("/api/users/{}", created["id"].as_str().unwrap());

        let mut replacement = jean();
        replacement["name"] = json!("Jean-Paul Dupont");
        let (status, body) = send(&app, "PUT", &uri, Some(replacement)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["name"], "Jean-Paul Dupont");
        assert!(body.get("company").is_none());
        assert_eq!(body["skills"], json!([]));

        let (_, fetched) = send(&app, "GET", &uri, None).await;
        assert_eq!(fetched, body);
    }

    #[tokio::test]
    async fn test_update_unknown_id_is_not_found() {
        let app = test_app();

        let uri = format!("/api/users/{}", uuid::Uuid::new_v4());
        let (status, _) = send(&app, "PUT", &uri, Some(jean())).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (_, list) = send(&app, "GET", "/api/users", None).await;
        assert_eq!(list, json!([]));
    }

    #[tokio::test]
    async fn test_update_unknown_id_with_partial_body_is_not_found() {
        let app = test_app();

        let uri = format!("/api/users/{}", uuid::Uuid::new_v4());
        let (status, body) = send(&app, "PUT", &uri, Some(json!({"bio": "x"}))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn test_update_validates_body() {
        let app = test_app();
        let (_, created) = send(&app, "POST", "/api/users", Some(jean())).await;
        let uri = format!("/api/users/{}", created["id"].as_str().unwrap());

        let (status, _) = send(&app, "PUT", &uri, Some(json!({"name": "Only"}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (_, fetched) = send(&app, "GET", &uri, None).await;
        assert_eq!(fetched["name"], "Jean Dupont");
    }

    #[tokio::test]
    async fn test_malformed_id_is_not_found() {
        let app = test_app();
        for method in ["GET", "DELETE"] {
            let (status, _) = send(&app, method, "/api/users/abc", None).await;
            assert_eq!(status, StatusCode::NOT_FOUND);
        }
    }

    #[tokio::test]
    async fn test_delete_unknown_id_is_not_found() {
        let app = test_app();
        let uri = format!("/api/users/{}", uuid::Uuid::new_v4());
        let (status, _) = send(&app, "DELETE", &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_list_returns_created_profiles() {
        let app = test_app();
        send(&app, "POST", "/api/users", Some(jean())).await;
        let mut other = jean();
        other["name"] = json!("Marie Curie");
        send(&app, "POST", "/api/users", Some(other)).await;

        let (status, list) = send(&app, "GET", "/api/users", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(list.as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_download_vcard() {
        let app = test_app();
        let mut body = jean();
        body["skills"] = json!(["Rust"]);
        let (_, created) = send(&app, "POST", "/api/users", Some(body)).await;
        let id = created["id"].as_str().unwrap();

        let response = raw(&app, "GET", &format!("/api/users/{}/vcard", id)).await;
        assert_eq!(response.0, StatusCode::OK);
        assert_eq!(response.1["content-type"], "text/vcard; charset=utf-8");
        assert_eq!(
            response.1["content-disposition"],
            "attachment; filename=\"Jean_Dupont.vcf\""
        );
        assert!(response.2.contains("NOTE:Compétences: Rust"));

        let uri = format!("/api/users/{}/vcard?variant=contact", id);
        let response = raw(&app, "GET", &uri).await;
        assert_eq!(
            response.2,
            "BEGIN:VCARD\nVERSION:3.0\nFN:Jean Dupont\nTITLE:Développeur\nEND:VCARD"
        );
    }

    #[tokio::test]
    async fn test_download_vcard_with_accented_name() {
        let app = test_app();
        let mut body = jean();
        body["name"] = json!("Jean-François Dupont");
        let (_, created) = send(&app, "POST", "/api/users", Some(body)).await;
        let uri = format!("/api/users/{}/vcard", created["id"].as_str().unwrap());

        let (status, headers, card) = raw(&app, "GET", &uri).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            headers["content-disposition"],
            "attachment; filename=\"Jean-Fran_ois_Dupont.vcf\"; \
             filename*=UTF-8''Jean-Fran%C3%A7ois_Dupont.vcf"
        );
        assert!(card.contains("FN:Jean-François Dupont"));
    }

    #[test]
    fn test_content_disposition_escapes_quotes() {
        assert_eq!(
            content_disposition("a\"b.vcf"),
            "attachment; filename=\"a_b.vcf\"; filename*=UTF-8''a%22b.vcf"
        );
    }
}
