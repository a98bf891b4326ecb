use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::{
    auth::extractors::{AdminUser, CurrentUser},
    error::ApiError,
    state::AppState,
};

use super::dto::{RestockRequest, SearchQuery, SeedCreate, SeedUpdate};
use super::repo::{Seed, DEFAULT_SEED_IMAGE};

pub fn seed_routes() -> Router<AppState> {
    Router::new()
        .route("/seeds", get(list_seeds).post(create_seed))
        .route("/seeds/search", get(search_seeds))
        .route(
            "/seeds/:id",
            get(get_seed).put(update_seed).delete(delete_seed),
        )
        .route("/seeds/:id/purchase", post(purchase_seed))
        .route("/seeds/:id/restock", post(restock_seed))
}

fn not_found() -> ApiError {
    ApiError::NotFound("Seed not found".into())
}

#[instrument(skip(state, _admin, payload))]
pub async fn create_seed(
    State(state): State<AppState>,
    _admin: AdminUser,
    Json(payload): Json<SeedCreate>,
) -> Result<(StatusCode, Json<Seed>), ApiError> {
    payload.validate()?;

    let image = payload
        .image
        .as_deref()
        .filter(|s| !s.is_empty())
        .unwrap_or(DEFAULT_SEED_IMAGE);

    let seed = Seed::create(
        &state.db,
        &payload.name,
        &payload.category,
        payload.price,
        payload.quantity,
        image,
    )
    .await
    .map_err(ApiError::Internal)?;

    info!(seed_id = %seed.id, name = %seed.name, "seed created");
    Ok((StatusCode::CREATED, Json(seed)))
}

#[instrument(skip(state, _user))]
pub async fn list_seeds(
    State(state): State<AppState>,
    _user: CurrentUser,
) -> Result<Json<Vec<Seed>>, ApiError> {
    let seeds = Seed::list_all(&state.db).await.map_err(ApiError::Internal)?;
    Ok(Json(seeds))
}

#[instrument(skip(state, _user))]
pub async fn search_seeds(
    State(state): State<AppState>,
    _user: CurrentUser,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<Seed>>, ApiError> {
    query.validate()?;
    let q = query.normalized();
    let seeds = Seed::search(
        &state.db,
        q.name.as_deref(),
        q.category.as_deref(),
        q.min_price,
        q.max_price,
    )
    .await
    .map_err(ApiError::Internal)?;
    Ok(Json(seeds))
}

#[instrument(skip(state, _user))]
pub async fn get_seed(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Seed>, ApiError> {
    let seed = Seed::find_by_id(&state.db, id)
        .await
        .map_err(ApiError::Internal)?
        .ok_or_else(not_found)?;
    Ok(Json(seed))
}

// Deliberately open to any authenticated user, matching the upstream
// contract; create and delete stay admin-only.
#[instrument(skip(state, _user, payload))]
pub async fn update_seed(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<SeedUpdate>,
) -> Result<Json<Seed>, ApiError> {
    payload.validate()?;

    let seed = Seed::update_partial(
        &state.db,
        id,
        payload.name.as_deref(),
        payload.category.as_deref(),
        payload.price,
        payload.quantity,
        payload.image.as_deref(),
    )
    .await
    .map_err(ApiError::Internal)?
    .ok_or_else(not_found)?;

    info!(seed_id = %seed.id, "seed updated");
    Ok(Json(seed))
}

#[instrument(skip(state, _admin))]
pub async fn delete_seed(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let deleted = Seed::delete(&state.db, id).await.map_err(ApiError::Internal)?;
    if !deleted {
        return Err(not_found());
    }
    info!(seed_id = %id, "seed deleted");
    Ok(StatusCode::NO_CONTENT)
}

#[instrument(skip(state, user))]
pub async fn purchase_seed(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Seed>, ApiError> {
    match Seed::purchase(&state.db, id).await.map_err(ApiError::Internal)? {
        Some(seed) => {
            info!(seed_id = %id, user_id = %user.0.id, quantity = seed.quantity, "seed purchased");
            Ok(Json(seed))
        }
        // The conditional decrement matched nothing: either out of stock or
        // no such seed.
        None => match Seed::find_by_id(&state.db, id)
            .await
            .map_err(ApiError::Internal)?
        {
            Some(_) => Err(ApiError::BadRequest("Seed is out of stock".into())),
            None => Err(not_found()),
        },
    }
}

#[instrument(skip(state, _admin, payload))]
pub async fn restock_seed(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<RestockRequest>,
) -> Result<Json<Seed>, ApiError> {
    payload.validate()?;

    let seed = Seed::restock(&state.db, id, payload.quantity)
        .await
        .map_err(ApiError::Internal)?
        .ok_or_else(not_found)?;

    info!(seed_id = %id, quantity = seed.quantity, "seed restocked");
    Ok(Json(seed))
}
