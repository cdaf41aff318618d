//! Field-name mapping between the external contract and the internal schema.
//!
//! The external API speaks Portuguese (`numeroPedido`, `valorTotal`, ...)
//! while the store uses English column names. Both directions are pure,
//! deterministic transformations with no side effects.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::store::{ItemRecord, NewItem, OrderRecord};

#[derive(Debug, Error, PartialEq)]
pub enum MappingError {
    #[error("Campo 'numeroPedido' é obrigatório.")]
    MissingOrderNumber,
}

/// Inbound order payload as submitted by clients.
#[derive(Debug, Deserialize)]
pub struct OrderPayload {
    #[serde(rename = "numeroPedido")]
    pub numero_pedido: Option<String>,
    #[serde(rename = "valorTotal")]
    pub valor_total: Option<f64>,
    #[serde(rename = "dataCriacao")]
    pub data_criacao: Option<String>,
    #[serde(default)]
    pub items: Vec<ItemPayload>,
}

/// Inbound update payload; the order identifier comes from the URL path.
#[derive(Debug, Deserialize)]
pub struct OrderUpdatePayload {
    #[serde(rename = "valorTotal")]
    pub valor_total: Option<f64>,
    #[serde(rename = "dataCriacao")]
    pub data_criacao: Option<String>,
    #[serde(default)]
    pub items: Vec<ItemPayload>,
}

/// Inbound line item as submitted by clients.
#[derive(Debug, Deserialize)]
pub struct ItemPayload {
    #[serde(rename = "idItem")]
    pub id_item: Option<i64>,
    #[serde(rename = "quantidadeItem")]
    pub quantidade_item: Option<i64>,
    #[serde(rename = "valorItem")]
    pub valor_item: Option<f64>,
}

/// Outbound combined order shape.
#[derive(Debug, Serialize)]
pub struct OrderResponse {
    #[serde(rename = "orderId")]
    pub order_id: String,
    pub value: Option<f64>,
    #[serde(rename = "creationDate")]
    pub creation_date: Option<String>,
    pub items: Vec<ItemResponse>,
}

/// Outbound line item shape.
#[derive(Debug, Serialize)]
pub struct ItemResponse {
    #[serde(rename = "productId")]
    pub product_id: Option<i64>,
    pub quantity: Option<i64>,
    pub price: Option<f64>,
}

/// Map an inbound order to the internal schema. The order number is the
/// single required field; everything else passes through as given.
pub fn order_to_internal(payload: &OrderPayload) -> Result<OrderRecord, MappingError> {
    let order_id = payload
        .numero_pedido
        .as_ref()
        .filter(|s| !s.is_empty())
        .ok_or(MappingError::MissingOrderNumber)?;

    Ok(OrderRecord {
        order_id: order_id.clone(),
        value: payload.valor_total,
        creation_date: payload.data_criacao.clone(),
    })
}

/// Map inbound line items to the internal schema.
pub fn items_to_internal(items: &[ItemPayload]) -> Vec<NewItem> {
    items
        .iter()
        .map(|item| NewItem {
            product_id: item.id_item,
            quantity: item.quantidade_item,
            price: item.valor_item,
        })
        .collect()
}

/// Map a stored order plus its items back to the response shape.
pub fn order_to_response(order: &OrderRecord, items: &[ItemRecord]) -> OrderResponse {
    OrderResponse {
        order_id: order.order_id.clone(),
        value: order.value,
        creation_date: order.creation_date.clone(),
        items: items.iter().map(item_to_response).collect(),
    }
}

/// Response shape for an order created from a not-yet-stored item set.
pub fn created_order_response(order: &OrderRecord, items: &[NewItem]) -> OrderResponse {
    OrderResponse {
        order_id: order.order_id.clone(),
        value: order.value,
        creation_date: order.creation_date.clone(),
        items: items
            .iter()
            .map(|item| ItemResponse {
                product_id: item.product_id,
                quantity: item.quantity,
                price: item.price,
            })
            .collect(),
    }
}

fn item_to_response(item: &ItemRecord) -> ItemResponse {
    ItemResponse {
        product_id: item.product_id,
        quantity: item.quantity,
        price: item.price,
    }
}
