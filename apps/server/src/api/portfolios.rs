use std::sync::Arc;

use crate::{
    error::ApiResult,
    main_lib::AppState,
    models::{MessageResponse, NewPortfolio, Portfolio, PortfolioStats, PortfolioUpdate},
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};

#[utoipa::path(get, path = "/api/v1/portfolios", responses((status = 200, body = [Portfolio])))]
pub async fn list_portfolios(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<Portfolio>>> {
    let portfolios = state.portfolio_service.get_portfolios()?;
    Ok(Json(portfolios.into_iter().map(Portfolio::from).collect()))
}

#[utoipa::path(
    post,
    path = "/api/v1/portfolios",
    request_body = NewPortfolio,
    responses((status = 201, body = Portfolio), (status = 400, description = "Missing field"))
)]
pub async fn create_portfolio(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<NewPortfolio>,
) -> ApiResult<(StatusCode, Json<Portfolio>)> {
    let created = state.portfolio_service.create_portfolio(payload.into()).await?;
    Ok((StatusCode::CREATED, Json(Portfolio::from(created))))
}

/// Reading a portfolio counts as one view.
#[utoipa::path(
    get,
    path = "/api/v1/portfolios/{id}",
    params(("id" = String, Path, description = "Portfolio id")),
    responses((status = 200, body = Portfolio), (status = 404, description = "Not found"))
)]
pub async fn view_portfolio(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Portfolio>> {
    let viewed = state.portfolio_service.view_portfolio(id).await?;
    Ok(Json(Portfolio::from(viewed)))
}

#[utoipa::path(
    get,
    path = "/api/v1/portfolios/{id}/stats",
    params(("id" = String, Path, description = "Portfolio id")),
    responses((status = 200, body = PortfolioStats), (status = 404, description = "Not found"))
)]
pub async fn get_portfolio_stats(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<PortfolioStats>> {
    let stats = state.portfolio_service.get_portfolio_stats(&id)?;
    Ok(Json(PortfolioStats::from(stats)))
}

#[utoipa::path(
    put,
    path = "/api/v1/portfolios/{id}",
    params(("id" = String, Path, description = "Portfolio id")),
    request_body = PortfolioUpdate,
    responses((status = 200, body = Portfolio), (status = 404, description = "Not found"))
)]
pub async fn update_portfolio(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(payload): Json<PortfolioUpdate>,
) -> ApiResult<Json<Portfolio>> {
    let updated = state
        .portfolio_service
        .update_portfolio(id, payload.into())
        .await?;
    Ok(Json(Portfolio::from(updated)))
}

#[utoipa::path(
    delete,
    path = "/api/v1/portfolios/{id}",
    params(("id" = String, Path, description = "Portfolio id")),
    responses((status = 200, body = MessageResponse), (status = 404, description = "Not found"))
)]
pub async fn delete_portfolio(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<MessageResponse>> {
    state.portfolio_service.delete_portfolio(id).await?;
    Ok(Json(MessageResponse {
        message: "Portfolio deleted".to_string(),
    }))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/portfolios", get(list_portfolios).post(create_portfolio))
        .route(
            "/portfolios/{id}",
            get(view_portfolio)
                .put(update_portfolio)
                .delete(delete_portfolio),
        )
        .route("/portfolios/{id}/stats", get(get_portfolio_stats))
}
