use std::collections::HashMap;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    Extension,
};
use serde_json::{json, Value};

use crate::api::mapping::{self, OrderPayload, OrderUpdatePayload};
use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::store::{ItemRecord, OrderStore};

/// POST /order - create an order with its line items.
///
/// The order row and each item row are inserted sequentially with no
/// enclosing transaction; a failed item insert surfaces as 500 and leaves
/// the rows written so far in place.
pub async fn order_post(
    State(store): State<OrderStore>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<OrderPayload>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let order = mapping::order_to_internal(&payload)
        .map_err(|e| ApiError::validation_error(e.to_string()))?;
    let items = mapping::items_to_internal(&payload.items);

    store.insert_order(&order).await?;
    for item in &items {
        store.insert_item(&order.order_id, item).await?;
    }

    tracing::info!(subject = %user.subject, order_id = %order.order_id, "order created");

    let response = mapping::created_order_response(&order, &items);
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Pedido criado com sucesso!",
            "order": response,
        })),
    ))
}

/// GET /order/:id - fetch one order with its items.
pub async fn order_get(
    State(store): State<OrderStore>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let order = store
        .get_order(&id)
        .await?
        .ok_or_else(|| ApiError::not_found("Pedido não encontrado"))?;

    let items = store.list_items(&id).await?;

    Ok(Json(serde_json::to_value(mapping::order_to_response(&order, &items)).unwrap_or(Value::Null)))
}

/// GET /order/list - fetch every order with its items.
///
/// Items are fetched in one query and partitioned in memory by order id to
/// avoid a per-order lookup. An empty store is 404, which is the documented
/// contract for this endpoint.
pub async fn order_list(
    State(store): State<OrderStore>,
) -> Result<Json<Value>, ApiError> {
    let orders = store.list_orders().await?;

    if orders.is_empty() {
        return Err(ApiError::not_found("Nenhum pedido encontrado"));
    }

    let mut items_by_order: HashMap<String, Vec<ItemRecord>> = HashMap::new();
    for item in store.list_all_items().await? {
        items_by_order.entry(item.order_id.clone()).or_default().push(item);
    }

    let combined: Vec<_> = orders
        .iter()
        .map(|order| {
            let items = items_by_order.get(&order.order_id).map(Vec::as_slice).unwrap_or(&[]);
            mapping::order_to_response(order, items)
        })
        .collect();

    Ok(Json(serde_json::to_value(combined).unwrap_or(Value::Null)))
}

/// PUT /order/:id - update order fields and fully replace its item set.
///
/// The submitted items replace whatever was stored before; this is a
/// delete-then-reinsert, not a merge.
pub async fn order_put(
    State(store): State<OrderStore>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
    Json(payload): Json<OrderUpdatePayload>,
) -> Result<Json<Value>, ApiError> {
    let affected = store
        .update_order(&id, payload.valor_total, payload.data_criacao.as_deref())
        .await?;

    if affected == 0 {
        return Err(ApiError::not_found("Pedido não encontrado"));
    }

    store.delete_items(&id).await?;
    for item in &mapping::items_to_internal(&payload.items) {
        store.insert_item(&id, item).await?;
    }

    tracing::info!(subject = %user.subject, order_id = %id, "order updated");

    Ok(Json(json!({ "message": "Pedido atualizado com sucesso!" })))
}

/// DELETE /order/:id - delete an order and all of its items.
pub async fn order_delete(
    State(store): State<OrderStore>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let affected = store.delete_order(&id).await?;

    if affected == 0 {
        return Err(ApiError::not_found("Pedido não encontrado"));
    }

    store.delete_items(&id).await?;

    tracing::info!(subject = %user.subject, order_id = %id, "order deleted");

    Ok(Json(json!({ "message": "Pedido deletado com sucesso!" })))
}
