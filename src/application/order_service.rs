use std::sync::Arc;

use tokio::sync::{watch, Mutex};

use crate::domain::cart::{Cart, CartLine};
use crate::domain::client::ClientForm;
use crate::domain::errors::DomainError;
use crate::domain::order::{OrderStatus, OrderSubmission, PayType};
use crate::domain::ports::OrderGateway;

/// Lifecycle of the order-creation view. `Submitting` is reachable only
/// from `HasLines` and exits back to `HasLines` on failure, or to `Idle`
/// (with everything cleared) on success.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewState {
    Idle,
    ScanningOrSearching,
    HasLines,
    Submitting,
}

/// The order being built: the shared cart the capture pipeline merges into,
/// the client form, and the view state.
pub struct OrderDraft {
    cart: Arc<Mutex<Cart>>,
    pub client: ClientForm,
    state: ViewState,
}

impl Default for OrderDraft {
    fn default() -> Self {
        Self::new()
    }
}

impl OrderDraft {
    pub fn new() -> Self {
        Self {
            cart: Arc::new(Mutex::new(Cart::new())),
            client: ClientForm::default(),
            state: ViewState::Idle,
        }
    }

    /// Handle shared with the capture pipeline and any manual-add UI.
    pub fn cart(&self) -> Arc<Mutex<Cart>> {
        self.cart.clone()
    }

    pub fn state(&self) -> ViewState {
        self.state
    }

    /// The user opened the scanner panel or the product search.
    pub fn begin_scanning(&mut self) {
        if self.state == ViewState::Idle {
            self.state = ViewState::ScanningOrSearching;
        }
    }

    /// Re-derive the state from current cart contents. No-op while a
    /// submission is outstanding.
    pub async fn sync_with_cart(&mut self) {
        if self.state == ViewState::Submitting {
            return;
        }
        let empty = self.cart.lock().await.is_empty();
        self.state = match (empty, self.state) {
            (false, _) => ViewState::HasLines,
            (true, ViewState::Idle) => ViewState::Idle,
            (true, _) => ViewState::ScanningOrSearching,
        };
    }
}

/// Validates and persists draft orders through the backend gateway.
pub struct OrderService<G> {
    gateway: Arc<G>,
    orders_rev: watch::Sender<u64>,
}

impl<G: OrderGateway> OrderService<G> {
    pub fn new(gateway: Arc<G>) -> Self {
        let (orders_rev, _) = watch::channel(0);
        Self {
            gateway,
            orders_rev,
        }
    }

    /// Revision counter bumped on every successful submission. Cached list
    /// views refetch when the value changes.
    pub fn subscribe_orders(&self) -> watch::Receiver<u64> {
        self.orders_rev.subscribe()
    }

    /// Validate the draft and post it. All preconditions are checked before
    /// any network call; on failure the cart and client fields are left
    /// intact for a retry.
    pub async fn submit(
        &self,
        draft: &mut OrderDraft,
        status: OrderStatus,
        pay_type: PayType,
    ) -> Result<String, DomainError> {
        draft.sync_with_cart().await;
        let lines = draft.cart.lock().await.lines().to_vec();
        validate(&lines, &draft.client)?;

        draft.state = ViewState::Submitting;
        let submission = OrderSubmission {
            client: draft.client.clone(),
            lines,
            status,
            pay_type,
        };

        match self.gateway.submit(&submission).await {
            Ok(order_id) => {
                draft.cart.lock().await.clear();
                draft.client.clear();
                draft.state = ViewState::Idle;
                self.orders_rev.send_modify(|rev| *rev += 1);
                log::info!("order {order_id} submitted");
                Ok(order_id)
            }
            Err(e) => {
                draft.state = ViewState::HasLines;
                Err(e)
            }
        }
    }
}

fn validate(lines: &[CartLine], client: &ClientForm) -> Result<(), DomainError> {
    if lines.is_empty() {
        return Err(DomainError::Validation(
            "Cart is empty: add at least one product".to_string(),
        ));
    }
    if client.name.trim().is_empty() {
        return Err(DomainError::Validation("Client name is required".to_string()));
    }
    if client.phone.trim().is_empty() {
        return Err(DomainError::Validation(
            "Client phone is required".to_string(),
        ));
    }
    if let Some(line) = lines.iter().find(|l| l.unit_price == 0) {
        return Err(DomainError::Validation(format!(
            "'{}' has no price set",
            line.title
        )));
    }
    Ok(())
}
