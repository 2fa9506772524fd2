use std::collections::HashMap;

use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool};
use tracing::{error, info, instrument};

use bangbang_auth::{Identity, Role};
use bangbang_core::AppError;

use crate::modules::orders::model::{
    CreateOrderDto, ORDER_COLUMNS, Order, OrderFilterParams, OrderItem, OrderItemInput,
    OrderScope, OrderStatus, OrderWithItems,
};

/// Largest value a `NUMERIC(10, 2)` total column holds.
pub(crate) fn max_order_total() -> Decimal {
    Decimal::new(9_999_999_999, 2)
}

fn order_too_large() -> AppError {
    AppError::bad_request(anyhow::anyhow!("Order total is too large"))
}

fn order_not_found() -> AppError {
    AppError::not_found(anyhow::anyhow!("Order not found"))
}

/// Catalog facts an order line is priced from.
#[derive(Debug, Clone, FromRow)]
pub(crate) struct CatalogEntry {
    pub id: i64,
    pub name: String,
    pub price: Decimal,
    pub in_stock: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PricedItem {
    pub product_id: i64,
    pub product_name: String,
    pub quantity: i32,
    pub price: Decimal,
}

/// Resolves every line against the catalog and returns the lines with the order total.
pub(crate) fn price_items(
    items: &[OrderItemInput],
    catalog: &HashMap<i64, CatalogEntry>,
) -> Result<(Vec<PricedItem>, Decimal), AppError> {
    let mut priced = Vec::with_capacity(items.len());
    let mut total = Decimal::ZERO;

    for item in items {
        let entry = catalog.get(&item.product_id).ok_or_else(|| {
            AppError::bad_request(anyhow::anyhow!("Product {} does not exist", item.product_id))
        })?;
        if !entry.in_stock {
            return Err(AppError::bad_request(anyhow::anyhow!(
                "{} is out of stock",
                entry.name
            )));
        }

        total = entry
            .price
            .checked_mul(Decimal::from(item.quantity))
            .and_then(|line_total| total.checked_add(line_total))
            .filter(|total| *total <= max_order_total())
            .ok_or_else(order_too_large)?;
        priced.push(PricedItem {
            product_id: entry.id,
            product_name: entry.name.clone(),
            quantity: item.quantity,
            price: entry.price,
        });
    }

    Ok((priced, total))
}

/// Back office sees everything, customers their own orders, guests look up by phone.
pub fn list_scope(
    caller: Option<&Identity>,
    filters: &OrderFilterParams,
) -> Result<OrderScope, AppError> {
    match caller {
        Some(identity) if identity.role.satisfies(Role::Staff) => Ok(OrderScope::All {
            status: filters.status,
        }),
        Some(identity) => Ok(OrderScope::Customer {
            user_id: identity.id,
        }),
        None => filters
            .phone
            .as_deref()
            .map(str::trim)
            .filter(|phone| !phone.is_empty())
            .map(|phone| OrderScope::Phone {
                phone: phone.to_string(),
            })
            .ok_or_else(|| {
                AppError::bad_request(anyhow::anyhow!(
                    "Log in or provide a phone number to look up orders"
                ))
            }),
    }
}

/// Whether `caller` may see `order`. Guests must know the order's phone number.
pub fn can_view_order(order: &Order, caller: Option<&Identity>, phone: Option<&str>) -> bool {
    match caller {
        Some(identity) if identity.role.satisfies(Role::Staff) => true,
        Some(identity) => order.user_id == Some(identity.id),
        None => phone.map(str::trim) == Some(order.phone.as_str()),
    }
}

pub struct OrderService;

impl OrderService {
    async fn attach_items(
        db: &PgPool,
        orders: Vec<Order>,
    ) -> Result<Vec<OrderWithItems>, AppError> {
        let ids: Vec<i64> = orders.iter().map(|o| o.id).collect();

        let items = sqlx::query_as::<_, OrderItem>(
            r#"SELECT id, order_id, product_id, product_name, quantity, price
               FROM order_items
               WHERE order_id = ANY($1)
               ORDER BY id"#,
        )
        .bind(&ids)
        .fetch_all(db)
        .await
        .map_err(AppError::database)?;

        let mut by_order: HashMap<i64, Vec<OrderItem>> = HashMap::new();
        for item in items {
            by_order.entry(item.order_id).or_default().push(item);
        }

        Ok(orders
            .into_iter()
            .map(|order| {
                let items = by_order.remove(&order.id).unwrap_or_default();
                OrderWithItems { order, items }
            })
            .collect())
    }

    /// Newest first.
    #[instrument(skip(db), fields(db.operation = "SELECT", db.table = "orders"))]
    pub async fn list_orders(
        db: &PgPool,
        scope: &OrderScope,
    ) -> Result<Vec<OrderWithItems>, AppError> {
        let base = format!("SELECT {} FROM orders", ORDER_COLUMNS);
        let order_by = " ORDER BY created_at DESC";

        let orders = match scope {
            OrderScope::All { status: None } => {
                sqlx::query_as::<_, Order>(&format!("{}{}", base, order_by))
                    .fetch_all(db)
                    .await
            }
            OrderScope::All {
                status: Some(status),
            } => {
                sqlx::query_as::<_, Order>(&format!("{} WHERE status = $1{}", base, order_by))
                    .bind(*status)
                    .fetch_all(db)
                    .await
            }
            OrderScope::Customer { user_id } => {
                sqlx::query_as::<_, Order>(&format!("{} WHERE user_id = $1{}", base, order_by))
                    .bind(*user_id)
                    .fetch_all(db)
                    .await
            }
            OrderScope::Phone { phone } => {
                sqlx::query_as::<_, Order>(&format!("{} WHERE phone = $1{}", base, order_by))
                    .bind(phone)
                    .fetch_all(db)
                    .await
            }
        }
        .map_err(|e| {
            error!(error = %e, "Failed to list orders");
            AppError::database(e)
        })?;

        Self::attach_items(db, orders).await
    }

    #[instrument(skip(db), fields(db.operation = "SELECT", db.table = "orders"))]
    pub async fn get_order(db: &PgPool, id: i64) -> Result<OrderWithItems, AppError> {
        let order = sqlx::query_as::<_, Order>(&format!(
            "SELECT {} FROM orders WHERE id = $1",
            ORDER_COLUMNS
        ))
        .bind(id)
        .fetch_optional(db)
        .await
        .map_err(AppError::database)?
        .ok_or_else(order_not_found)?;

        Self::attach_items(db, vec![order])
            .await?
            .pop()
            .ok_or_else(order_not_found)
    }

    /// Prices the order from the catalog and stores it with its items atomically.
    #[instrument(skip(db, dto), fields(db.operation = "INSERT", db.table = "orders", items = dto.items.len()))]
    pub async fn create_order(
        db: &PgPool,
        dto: &CreateOrderDto,
        user_id: Option<i64>,
    ) -> Result<OrderWithItems, AppError> {
        let mut tx = db.begin().await.map_err(AppError::database)?;

        let product_ids: Vec<i64> = dto.items.iter().map(|item| item.product_id).collect();
        let catalog: HashMap<i64, CatalogEntry> = sqlx::query_as::<_, CatalogEntry>(
            "SELECT id, name, price, in_stock FROM products WHERE id = ANY($1)",
        )
        .bind(&product_ids)
        .fetch_all(&mut *tx)
        .await
        .map_err(AppError::database)?
        .into_iter()
        .map(|entry| (entry.id, entry))
        .collect();

        let (priced, total) = price_items(&dto.items, &catalog)?;

        let order = sqlx::query_as::<_, Order>(&format!(
            r#"INSERT INTO orders (user_id, customer_name, phone, address, total, slip_image, note, status)
               VALUES ($1, $2, $3, $4, $5, $6, $7, 'pending')
               RETURNING {}"#,
            ORDER_COLUMNS
        ))
        .bind(user_id)
        .bind(dto.customer_name.trim())
        .bind(dto.phone.trim())
        .bind(&dto.address)
        .bind(total)
        .bind(&dto.slip_image)
        .bind(&dto.note)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to insert order");
            AppError::database(e)
        })?;

        let mut items = Vec::with_capacity(priced.len());
        for line in priced {
            let item = sqlx::query_as::<_, OrderItem>(
                r#"INSERT INTO order_items (order_id, product_id, product_name, quantity, price)
                   VALUES ($1, $2, $3, $4, $5)
                   RETURNING id, order_id, product_id, product_name, quantity, price"#,
            )
            .bind(order.id)
            .bind(line.product_id)
            .bind(&line.product_name)
            .bind(line.quantity)
            .bind(line.price)
            .fetch_one(&mut *tx)
            .await
            .map_err(AppError::database)?;
            items.push(item);
        }

        tx.commit().await.map_err(AppError::database)?;

        info!(order.id = order.id, total = %order.total, "Order placed");
        Ok(OrderWithItems { order, items })
    }

    /// Sets the status and returns the previous one.
    #[instrument(skip(db), fields(db.operation = "UPDATE", db.table = "orders"))]
    pub async fn update_status(
        db: &PgPool,
        id: i64,
        status: OrderStatus,
    ) -> Result<OrderStatus, AppError> {
        sqlx::query_scalar::<_, OrderStatus>(
            r#"UPDATE orders o
               SET status = $1, updated_at = NOW()
               FROM (SELECT id, status FROM orders WHERE id = $2 FOR UPDATE) previous
               WHERE o.id = previous.id
               RETURNING previous.status"#,
        )
        .bind(status)
        .bind(id)
        .fetch_optional(db)
        .await
        .map_err(|e| {
            error!(error = %e, order.id = id, "Failed to update order status");
            AppError::database(e)
        })?
        .ok_or_else(order_not_found)
    }
}
