use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{
    application::{
        manage_customers::{
            dto::{UpdateCustomerRequest, UpdateCustomerResponse},
            use_case::ManageCustomersUseCase,
        },
        register_customer::{dto::RegisterCustomerRequest, use_case::RegisterCustomerUseCase},
        search_customers::{
            dto::{SearchRequest, SearchResponse},
            use_case::SearchCustomersUseCase,
        },
    },
    domain::{
        customer::{entity::Customer, repository::FindOptions},
        shared::unique_entity_id::UniqueEntityId,
    },
    presentation::http::{errors::AppError, state::AppState},
};

/// `GET /api/v1/customers/search`. Answers 204 when nothing matches.
pub async fn search_customers(
    State(state): State<AppState>,
    Query(params): Query<SearchRequest>,
) -> Result<Response, AppError> {
    let page = params.pagination();
    let use_case = SearchCustomersUseCase::new(state.customer_repo.clone(), state.logger.clone());

    let found = use_case
        .execute_with(params.filter(), Some(FindOptions::from(page)))
        .await?;

    Ok(match found {
        Some(customers) => Json(SearchResponse {
            customers,
            limit: page.limit,
            offset: page.offset,
        })
        .into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    })
}

pub async fn register_customer(
    State(state): State<AppState>,
    Json(request): Json<RegisterCustomerRequest>,
) -> Result<(StatusCode, Json<Customer>), AppError> {
    let use_case = RegisterCustomerUseCase::new(state.customer_repo.clone(), state.logger.clone());
    let customer = use_case.execute(request).await?;
    Ok((StatusCode::CREATED, Json(customer)))
}

pub async fn get_customer(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Customer>, AppError> {
    let id = parse_id(&id)?;
    let use_case = ManageCustomersUseCase::new(state.customer_repo.clone(), state.logger.clone());
    Ok(Json(use_case.get(id).await?))
}

pub async fn update_customer(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateCustomerRequest>,
) -> Result<Json<UpdateCustomerResponse>, AppError> {
    let id = parse_id(&id)?;
    let use_case = ManageCustomersUseCase::new(state.customer_repo.clone(), state.logger.clone());
    let updated = use_case.update(id, request).await?;
    Ok(Json(UpdateCustomerResponse { updated }))
}

pub async fn remove_customer(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = parse_id(&id)?;
    let use_case = ManageCustomersUseCase::new(state.customer_repo.clone(), state.logger.clone());
    use_case.remove(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

fn parse_id(raw: &str) -> Result<UniqueEntityId, AppError> {
    UniqueEntityId::parse(raw).map_err(|_| AppError::BadRequest(format!("invalid customer id '{}'", raw)))
}
