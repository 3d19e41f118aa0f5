//! In-process mock of the Ridgeline backend.
//!
//! Serves the production wire contract over a real TCP socket so the
//! client's HTTP stack, auth headers, and error normalization are all
//! exercised. State lives in plain maps; every route counts its hits and
//! can have a one-shot failure or a delay injected.

use std::collections::{HashMap, HashSet};
use std::net::SocketAddr;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::{Value, json};
use uuid::Uuid;

/// Card number the mock always declines with `402`.
pub const DECLINE_CARD: &str = "4000 0000 0000 0002";

const TAX_RATE_PERCENT: i64 = 10;
const SHIPPING_CENTS: i64 = 795;
const FREE_SHIPPING_THRESHOLD_CENTS: i64 = 100_00;

/// Catalog seed. Descriptions are chosen so category inference in the
/// client sees every category plus one uncategorized product.
struct ProductSeed {
    id: i64,
    description: &'static str,
    image_url: Option<&'static str>,
    price_cents: i64,
    quantity_available: u32,
}

const SEED_PRODUCTS: &[ProductSeed] = &[
    ProductSeed {
        id: 1,
        description: "Soccer cleats with firm-ground studs",
        image_url: Some("https://img.example.com/cleats.jpg"),
        price_cents: 59_99,
        quantity_available: 10,
    },
    ProductSeed {
        id: 2,
        description: "Futsal ball, size 4",
        image_url: None,
        price_cents: 24_50,
        quantity_available: 25,
    },
    ProductSeed {
        id: 3,
        description: "Goalkeeper gloves",
        image_url: None,
        price_cents: 34_99,
        quantity_available: 0,
    },
    ProductSeed {
        id: 4,
        description: "Basketball, indoor-outdoor composite",
        image_url: Some("https://img.example.com/basketball.jpg"),
        price_cents: 29_99,
        quantity_available: 12,
    },
    ProductSeed {
        id: 5,
        description: "Running shoes for trail and road",
        image_url: None,
        price_cents: 89_95,
        quantity_available: 7,
    },
    ProductSeed {
        id: 6,
        description: "Marathon training belt",
        image_url: None,
        price_cents: 19_99,
        quantity_available: 30,
    },
    ProductSeed {
        id: 7,
        description: "Yoga mat, 6mm",
        image_url: None,
        price_cents: 39_99,
        quantity_available: 15,
    },
    ProductSeed {
        id: 8,
        description: "Insulated water bottle",
        image_url: None,
        price_cents: 14_99,
        quantity_available: 50,
    },
];

#[derive(Clone)]
struct Account {
    first_name: String,
    last_name: String,
    email: String,
    password: String,
    birth_date: Option<String>,
    shipping_address: Option<String>,
}

#[derive(Clone, Copy)]
struct CartRow {
    item_id: i64,
    product_id: i64,
    quantity: u32,
}

struct PendingCheckout {
    email: String,
    billing_address: String,
    subtotal_cents: i64,
    tax_cents: i64,
    shipping_cents: i64,
    total_cents: i64,
}

struct OrderItem {
    product_id: i64,
    description: String,
    image_url: Option<String>,
    quantity: u32,
    price_cents: i64,
}

struct Order {
    order_id: i64,
    date: DateTime<Utc>,
    total_cents: i64,
    items: Vec<OrderItem>,
    shipping_address: String,
}

struct BackendState {
    next_id: AtomicI64,
    accounts: Mutex<HashMap<String, Account>>,
    tokens: Mutex<HashMap<String, String>>,
    carts: Mutex<HashMap<String, Vec<CartRow>>>,
    checkouts: Mutex<HashMap<i64, PendingCheckout>>,
    orders: Mutex<HashMap<String, Vec<Order>>>,
    hits: Mutex<HashMap<String, usize>>,
    fail_once: Mutex<HashSet<String>>,
    delays: Mutex<HashMap<String, Duration>>,
}

impl BackendState {
    fn new() -> Self {
        Self {
            next_id: AtomicI64::new(100),
            accounts: Mutex::new(HashMap::new()),
            tokens: Mutex::new(HashMap::new()),
            carts: Mutex::new(HashMap::new()),
            checkouts: Mutex::new(HashMap::new()),
            orders: Mutex::new(HashMap::new()),
            hits: Mutex::new(HashMap::new()),
            fail_once: Mutex::new(HashSet::new()),
            delays: Mutex::new(HashMap::new()),
        }
    }

    fn next_id(&self) -> i64 {
        self.next_id.fetch_add(1, Ordering::SeqCst)
    }

    /// Count the hit, apply any injected delay, then fire any one-shot
    /// failure. Every handler calls this first with its route template.
    async fn begin(&self, route: &'static str) -> Result<(), Response> {
        {
            let mut hits = self.hits.lock().expect("hits lock");
            *hits.entry(route.to_string()).or_insert(0) += 1;
        }

        let delay = self
            .delays
            .lock()
            .expect("delays lock")
            .get(route)
            .copied();
        if let Some(duration) = delay {
            tokio::time::sleep(duration).await;
        }

        if self.fail_once.lock().expect("fail_once lock").remove(route) {
            // Deliberately bodyless so clients exercise their fallback
            // error message path.
            return Err((StatusCode::INTERNAL_SERVER_ERROR, String::new()).into_response());
        }
        Ok(())
    }

    /// Resolve the bearer token to the account email it belongs to.
    fn authenticate(&self, headers: &HeaderMap) -> Result<String, Response> {
        let token = headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .ok_or_else(|| error(StatusCode::UNAUTHORIZED, "Unauthorized"))?;

        self.tokens
            .lock()
            .expect("tokens lock")
            .get(token)
            .cloned()
            .ok_or_else(|| error(StatusCode::UNAUTHORIZED, "Unauthorized"))
    }
}

fn error(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "message": message }))).into_response()
}

fn dollars(cents: i64) -> Decimal {
    Decimal::new(cents, 2)
}

fn seed_product(id: i64) -> Option<&'static ProductSeed> {
    SEED_PRODUCTS.iter().find(|product| product.id == id)
}

fn product_json(product: &ProductSeed) -> Value {
    json!({
        "id": product.id,
        "description": product.description,
        "imageUrl": product.image_url,
        "price": dollars(product.price_cents),
        "quantityAvailable": product.quantity_available,
    })
}

fn user_json(account: &Account) -> Value {
    json!({
        "firstName": account.first_name,
        "lastName": account.last_name,
        "email": account.email,
        "birthDate": account.birth_date,
        "shippingAddress": account.shipping_address,
    })
}

/// A running mock backend bound to an ephemeral localhost port.
pub struct TestBackend {
    addr: SocketAddr,
    state: Arc<BackendState>,
}

impl TestBackend {
    /// Bind, seed, and serve the mock.
    ///
    /// # Panics
    ///
    /// Panics if no local port can be bound.
    pub async fn spawn() -> Self {
        let state = Arc::new(BackendState::new());
        let app = router(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind mock backend listener");
        let addr = listener.local_addr().expect("mock backend local addr");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("serve mock backend");
        });

        Self { addr, state }
    }

    #[must_use]
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// How many times a route template has been hit, e.g.
    /// `hits("PUT /cart/items/{id}")`.
    ///
    /// # Panics
    ///
    /// Panics if the hit counter lock is poisoned.
    #[must_use]
    pub fn hits(&self, route: &str) -> usize {
        self.state
            .hits
            .lock()
            .expect("hits lock")
            .get(route)
            .copied()
            .unwrap_or(0)
    }

    /// Make the next hit on a route answer `500` with an empty body.
    ///
    /// # Panics
    ///
    /// Panics if the injection lock is poisoned.
    pub fn fail_once(&self, route: &str) {
        self.state
            .fail_once
            .lock()
            .expect("fail_once lock")
            .insert(route.to_string());
    }

    /// Make every hit on a route sleep before answering.
    ///
    /// # Panics
    ///
    /// Panics if the injection lock is poisoned.
    pub fn delay(&self, route: &str, duration: Duration) {
        self.state
            .delays
            .lock()
            .expect("delays lock")
            .insert(route.to_string(), duration);
    }
}

fn router(state: Arc<BackendState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/users/me", get(get_profile).put(update_profile))
        .route("/users/me/password", put(change_password))
        .route("/products", get(list_products))
        .route("/products/{id}", get(get_product))
        .route("/cart", get(get_cart))
        .route("/cart/items", post(add_cart_item))
        .route(
            "/cart/items/{id}",
            put(update_cart_item).delete(delete_cart_item),
        )
        .route("/checkout", post(create_checkout))
        .route("/checkout/{id}/pay", post(pay_checkout))
        .route("/orders", get(list_orders))
        .route("/orders/{id}", get(get_order))
        .with_state(state)
}

// ===== Health =====

async fn health(State(state): State<Arc<BackendState>>) -> Result<Response, Response> {
    state.begin("GET /health").await?;
    // Plain text on purpose; the production endpoint is not JSON.
    Ok("OK".into_response())
}

// ===== Auth =====

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RegisterBody {
    first_name: String,
    last_name: String,
    email: String,
    password: String,
}

async fn register(
    State(state): State<Arc<BackendState>>,
    Json(body): Json<RegisterBody>,
) -> Result<Response, Response> {
    state.begin("POST /auth/register").await?;

    let mut accounts = state.accounts.lock().expect("accounts lock");
    if accounts.contains_key(&body.email) {
        return Err(error(StatusCode::CONFLICT, "Email already registered"));
    }
    accounts.insert(
        body.email.clone(),
        Account {
            first_name: body.first_name,
            last_name: body.last_name,
            email: body.email.clone(),
            password: body.password,
            birth_date: None,
            shipping_address: None,
        },
    );
    drop(accounts);

    state
        .carts
        .lock()
        .expect("carts lock")
        .insert(body.email, Vec::new());

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Account created" })),
    )
        .into_response())
}

#[derive(Deserialize)]
struct LoginBody {
    email: String,
    password: String,
}

async fn login(
    State(state): State<Arc<BackendState>>,
    Json(body): Json<LoginBody>,
) -> Result<Response, Response> {
    state.begin("POST /auth/login").await?;

    let valid = state
        .accounts
        .lock()
        .expect("accounts lock")
        .get(&body.email)
        .is_some_and(|account| account.password == body.password);
    if !valid {
        return Err(error(StatusCode::UNAUTHORIZED, "Invalid email or password"));
    }

    let token = Uuid::new_v4().to_string();
    state
        .tokens
        .lock()
        .expect("tokens lock")
        .insert(token.clone(), body.email);

    Ok(Json(json!({ "token": token })).into_response())
}

// ===== Profile =====

async fn get_profile(
    State(state): State<Arc<BackendState>>,
    headers: HeaderMap,
) -> Result<Response, Response> {
    state.begin("GET /users/me").await?;
    let email = state.authenticate(&headers)?;

    let accounts = state.accounts.lock().expect("accounts lock");
    let account = accounts
        .get(&email)
        .ok_or_else(|| error(StatusCode::NOT_FOUND, "Account not found"))?;
    Ok(Json(user_json(account)).into_response())
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProfileBody {
    first_name: String,
    last_name: String,
    birth_date: String,
    shipping_address: String,
}

async fn update_profile(
    State(state): State<Arc<BackendState>>,
    headers: HeaderMap,
    Json(body): Json<ProfileBody>,
) -> Result<Response, Response> {
    state.begin("PUT /users/me").await?;
    let email = state.authenticate(&headers)?;

    let mut accounts = state.accounts.lock().expect("accounts lock");
    let account = accounts
        .get_mut(&email)
        .ok_or_else(|| error(StatusCode::NOT_FOUND, "Account not found"))?;
    account.first_name = body.first_name;
    account.last_name = body.last_name;
    account.birth_date = Some(body.birth_date);
    account.shipping_address = Some(body.shipping_address);

    Ok(Json(user_json(account)).into_response())
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PasswordBody {
    current_password: String,
    new_password: String,
}

async fn change_password(
    State(state): State<Arc<BackendState>>,
    headers: HeaderMap,
    Json(body): Json<PasswordBody>,
) -> Result<Response, Response> {
    state.begin("PUT /users/me/password").await?;
    let email = state.authenticate(&headers)?;

    let mut accounts = state.accounts.lock().expect("accounts lock");
    let account = accounts
        .get_mut(&email)
        .ok_or_else(|| error(StatusCode::NOT_FOUND, "Account not found"))?;
    if account.password != body.current_password {
        return Err(error(
            StatusCode::UNAUTHORIZED,
            "Current password is incorrect",
        ));
    }
    account.password = body.new_password;

    Ok(Json(json!({ "message": "Password changed" })).into_response())
}

// ===== Catalog =====

#[derive(Deserialize)]
struct ProductQuery {
    search: Option<String>,
}

async fn list_products(
    State(state): State<Arc<BackendState>>,
    Query(query): Query<ProductQuery>,
) -> Result<Response, Response> {
    match query.search {
        Some(needle) => {
            state.begin("GET /products?search").await?;
            let needle = needle.to_lowercase();
            let rows: Vec<Value> = SEED_PRODUCTS
                .iter()
                .filter(|product| product.description.to_lowercase().contains(&needle))
                .map(product_json)
                .collect();
            Ok(Json(rows).into_response())
        }
        None => {
            state.begin("GET /products").await?;
            let rows: Vec<Value> = SEED_PRODUCTS.iter().map(product_json).collect();
            Ok(Json(rows).into_response())
        }
    }
}

async fn get_product(
    State(state): State<Arc<BackendState>>,
    Path(id): Path<i64>,
) -> Result<Response, Response> {
    state.begin("GET /products/{id}").await?;

    let product =
        seed_product(id).ok_or_else(|| error(StatusCode::NOT_FOUND, "Product not found"))?;
    Ok(Json(product_json(product)).into_response())
}

// ===== Cart =====

fn cart_row_json(row: CartRow) -> Value {
    let product = seed_product(row.product_id).expect("cart row references seeded product");
    json!({
        "itemId": row.item_id,
        "productId": row.product_id,
        "productDescription": product.description,
        "imageUrl": product.image_url,
        "price": dollars(product.price_cents),
        "quantity": row.quantity,
        "subtotal": dollars(product.price_cents * i64::from(row.quantity)),
    })
}

async fn get_cart(
    State(state): State<Arc<BackendState>>,
    headers: HeaderMap,
) -> Result<Response, Response> {
    state.begin("GET /cart").await?;
    let email = state.authenticate(&headers)?;

    let carts = state.carts.lock().expect("carts lock");
    let rows: Vec<Value> = carts
        .get(&email)
        .map(|rows| rows.iter().copied().map(cart_row_json).collect())
        .unwrap_or_default();
    Ok(Json(rows).into_response())
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AddItemBody {
    product_id: i64,
    quantity: u32,
}

async fn add_cart_item(
    State(state): State<Arc<BackendState>>,
    headers: HeaderMap,
    Json(body): Json<AddItemBody>,
) -> Result<Response, Response> {
    state.begin("POST /cart/items").await?;
    let email = state.authenticate(&headers)?;

    if seed_product(body.product_id).is_none() {
        return Err(error(StatusCode::NOT_FOUND, "Product not found"));
    }

    let item_id = state.next_id();
    let mut carts = state.carts.lock().expect("carts lock");
    let rows = carts.entry(email).or_default();
    // Adding a product that is already in the cart folds into the
    // existing line, the same way production does.
    if let Some(row) = rows.iter_mut().find(|row| row.product_id == body.product_id) {
        row.quantity += body.quantity;
    } else {
        rows.push(CartRow {
            item_id,
            product_id: body.product_id,
            quantity: body.quantity,
        });
    }

    Ok((StatusCode::CREATED, Json(json!({ "message": "Added" }))).into_response())
}

#[derive(Deserialize)]
struct UpdateItemBody {
    quantity: u32,
}

async fn update_cart_item(
    State(state): State<Arc<BackendState>>,
    Path(id): Path<i64>,
    headers: HeaderMap,
    Json(body): Json<UpdateItemBody>,
) -> Result<Response, Response> {
    state.begin("PUT /cart/items/{id}").await?;
    let email = state.authenticate(&headers)?;

    let mut carts = state.carts.lock().expect("carts lock");
    let row = carts
        .get_mut(&email)
        .and_then(|rows| rows.iter_mut().find(|row| row.item_id == id))
        .ok_or_else(|| error(StatusCode::NOT_FOUND, "Item not found"))?;
    row.quantity = body.quantity;

    Ok(Json(json!({ "message": "Updated" })).into_response())
}

async fn delete_cart_item(
    State(state): State<Arc<BackendState>>,
    Path(id): Path<i64>,
    headers: HeaderMap,
) -> Result<Response, Response> {
    state.begin("DELETE /cart/items/{id}").await?;
    let email = state.authenticate(&headers)?;

    let mut carts = state.carts.lock().expect("carts lock");
    let rows = carts
        .get_mut(&email)
        .ok_or_else(|| error(StatusCode::NOT_FOUND, "Item not found"))?;
    let before = rows.len();
    rows.retain(|row| row.item_id != id);
    if rows.len() == before {
        return Err(error(StatusCode::NOT_FOUND, "Item not found"));
    }

    Ok(StatusCode::NO_CONTENT.into_response())
}

// ===== Checkout =====

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(dead_code)]
struct CheckoutBody {
    billing_address: String,
    payment_method: String,
}

async fn create_checkout(
    State(state): State<Arc<BackendState>>,
    headers: HeaderMap,
    Json(body): Json<CheckoutBody>,
) -> Result<Response, Response> {
    state.begin("POST /checkout").await?;
    let email = state.authenticate(&headers)?;

    let subtotal_cents: i64 = {
        let carts = state.carts.lock().expect("carts lock");
        let rows = carts
            .get(&email)
            .ok_or_else(|| error(StatusCode::BAD_REQUEST, "Cart is empty"))?;
        if rows.is_empty() {
            return Err(error(StatusCode::BAD_REQUEST, "Cart is empty"));
        }
        rows.iter()
            .map(|row| {
                let product = seed_product(row.product_id).expect("seeded product");
                product.price_cents * i64::from(row.quantity)
            })
            .sum()
    };

    let tax_cents = subtotal_cents * TAX_RATE_PERCENT / 100;
    let shipping_cents = if subtotal_cents >= FREE_SHIPPING_THRESHOLD_CENTS {
        0
    } else {
        SHIPPING_CENTS
    };
    let total_cents = subtotal_cents + tax_cents + shipping_cents;

    let checkout_id = state.next_id();
    state.checkouts.lock().expect("checkouts lock").insert(
        checkout_id,
        PendingCheckout {
            email,
            billing_address: body.billing_address,
            subtotal_cents,
            tax_cents,
            shipping_cents,
            total_cents,
        },
    );

    Ok(Json(json!({
        "checkoutId": checkout_id,
        "subtotal": dollars(subtotal_cents),
        "tax": dollars(tax_cents),
        "shipping": dollars(shipping_cents),
        "total": dollars(total_cents),
    }))
    .into_response())
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(dead_code)]
struct PayBody {
    card_number: String,
    card_expiry: String,
    card_cvv: String,
}

fn strip_spaces(card_number: &str) -> String {
    card_number
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect()
}

async fn pay_checkout(
    State(state): State<Arc<BackendState>>,
    Path(id): Path<i64>,
    headers: HeaderMap,
    Json(body): Json<PayBody>,
) -> Result<Response, Response> {
    state.begin("POST /checkout/{id}/pay").await?;
    let email = state.authenticate(&headers)?;

    let mut checkouts = state.checkouts.lock().expect("checkouts lock");
    if !checkouts
        .get(&id)
        .is_some_and(|pending| pending.email == email)
    {
        return Err(error(StatusCode::NOT_FOUND, "Checkout not found"));
    }

    // A declined card leaves the checkout open for a retry.
    if strip_spaces(&body.card_number) == strip_spaces(DECLINE_CARD) {
        return Err(error(StatusCode::PAYMENT_REQUIRED, "Card declined"));
    }

    let pending = checkouts
        .remove(&id)
        .ok_or_else(|| error(StatusCode::NOT_FOUND, "Checkout not found"))?;
    drop(checkouts);

    let items: Vec<OrderItem> = {
        let mut carts = state.carts.lock().expect("carts lock");
        let rows = carts.entry(email.clone()).or_default();
        let items = rows
            .iter()
            .map(|row| {
                let product = seed_product(row.product_id).expect("seeded product");
                OrderItem {
                    product_id: row.product_id,
                    description: product.description.to_string(),
                    image_url: product.image_url.map(ToString::to_string),
                    quantity: row.quantity,
                    price_cents: product.price_cents,
                }
            })
            .collect();
        rows.clear();
        items
    };

    let order_id = state.next_id();
    state
        .orders
        .lock()
        .expect("orders lock")
        .entry(email)
        .or_default()
        .push(Order {
            order_id,
            date: Utc::now(),
            total_cents: pending.total_cents,
            items,
            shipping_address: pending.billing_address,
        });

    Ok(Json(json!({
        "orderId": order_id,
        "message": "Payment accepted",
    }))
    .into_response())
}

// ===== Orders =====

async fn list_orders(
    State(state): State<Arc<BackendState>>,
    headers: HeaderMap,
) -> Result<Response, Response> {
    state.begin("GET /orders").await?;
    let email = state.authenticate(&headers)?;

    let orders = state.orders.lock().expect("orders lock");
    let rows: Vec<Value> = orders
        .get(&email)
        .map(|orders| {
            orders
                .iter()
                .map(|order| {
                    json!({
                        "orderId": order.order_id,
                        "orderDate": order.date.to_rfc3339(),
                        "status": "completed",
                        "totalAmount": dollars(order.total_cents),
                    })
                })
                .collect()
        })
        .unwrap_or_default();
    Ok(Json(rows).into_response())
}

async fn get_order(
    State(state): State<Arc<BackendState>>,
    Path(id): Path<i64>,
    headers: HeaderMap,
) -> Result<Response, Response> {
    state.begin("GET /orders/{id}").await?;
    let email = state.authenticate(&headers)?;

    let orders = state.orders.lock().expect("orders lock");
    let order = orders
        .get(&email)
        .and_then(|orders| orders.iter().find(|order| order.order_id == id))
        .ok_or_else(|| error(StatusCode::NOT_FOUND, "Order not found"))?;

    let items: Vec<Value> = order
        .items
        .iter()
        .map(|item| {
            json!({
                "productId": item.product_id,
                "description": item.description,
                "imageUrl": item.image_url,
                "quantity": item.quantity,
                "priceAtTime": dollars(item.price_cents),
            })
        })
        .collect();

    Ok(Json(json!({
        "orderId": order.order_id,
        "orderDate": order.date.to_rfc3339(),
        "status": "completed",
        "totalAmount": dollars(order.total_cents),
        "items": items,
        "shippingAddress": order.shipping_address,
        "trackingNumber": null,
    }))
    .into_response())
}
